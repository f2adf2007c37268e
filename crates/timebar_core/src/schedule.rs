use crate::clock;
use crate::config::Config;
use crate::error::TimerError;
use crate::model::{DoneEntry, EntryKind, LiveEntry};
use crate::notify::{Notifier, play_sound};
use crate::storage::log_store;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub deadline: i64,
    pub kind: EntryKind,
    pub window: i64,
    pub sound: bool,
    pub message: String,
}

/// Seam between scheduling and process creation, so tests can schedule
/// without forking off a real waiter.
pub trait Detacher {
    fn detach(&self, request: &ScheduleRequest) -> Result<u32, TimerError>;
}

/// Re-executes the current binary as a detached waiter process. The waiter
/// is moved into its own session so it outlives the invoking terminal.
pub struct ExecDetacher;

impl Detacher for ExecDetacher {
    fn detach(&self, request: &ScheduleRequest) -> Result<u32, TimerError> {
        let exe = std::env::current_exe().map_err(|err| TimerError::io(err.to_string()))?;

        let mut command = Command::new(exe);
        command
            .arg("--waiter")
            .arg("--deadline")
            .arg(request.deadline.to_string())
            .arg("--kind")
            .arg(request.kind.label())
            .arg("--near-secs")
            .arg(request.window.to_string())
            .arg("--chime")
            .arg(if request.sound { "1" } else { "0" })
            // = form keeps a message starting with '-' out of flag parsing
            .arg(format!("--message={}", request.message))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            unsafe {
                command.pre_exec(|| {
                    let _ = unsafe { libc::setsid() };
                    Ok(())
                });
            }
        }

        let child = command
            .spawn()
            .map_err(|err| TimerError::io(err.to_string()))?;
        Ok(child.id())
    }
}

/// Validate, detach the waiter, append the live record. The record carries
/// the waiter's real PID, which is why the spawn happens first; the entry is
/// still in the store before this returns, so listings see it immediately.
pub fn schedule_with_path(
    path: &Path,
    now: i64,
    request: &ScheduleRequest,
    detacher: &dyn Detacher,
) -> Result<LiveEntry, TimerError> {
    if request.message.trim().is_empty() {
        return Err(TimerError::missing_fields("message is required"));
    }
    if request.window < 0 {
        return Err(TimerError::invalid_window("window cannot be negative"));
    }
    if request.deadline <= now {
        return Err(TimerError::time_in_past(format!(
            "{} is not in the future",
            request.deadline
        )));
    }

    let pid = detacher.detach(request)?;
    let entry = LiveEntry {
        deadline: request.deadline,
        kind: request.kind,
        pid,
        window: request.window,
        sound: request.sound,
        message: request.message.clone(),
    };
    log_store::append(path, &entry.to_line())?;
    Ok(entry)
}

/// Parameters the detached waiter was re-executed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaiterTask {
    pub deadline: i64,
    pub kind: EntryKind,
    pub window: i64,
    pub sound: bool,
    pub message: String,
}

/// Body of the detached waiter process: sleep out the delay, swap the live
/// record for a completed one, fire the side effects, then linger for the
/// retention window and clean up after itself.
pub fn run_waiter(
    path: &Path,
    task: &WaiterTask,
    config: &Config,
    notifier: &dyn Notifier,
) -> Result<(), TimerError> {
    let delay = task.deadline - clock::unix_now();
    if delay > 0 {
        std::thread::sleep(Duration::from_secs(delay as u64));
    }

    let live = LiveEntry {
        deadline: task.deadline,
        kind: task.kind,
        pid: std::process::id(),
        window: task.window,
        sound: task.sound,
        message: task.message.clone(),
    };
    let removed = log_store::remove_record(path, &live.to_line())?;
    if !removed {
        log::debug!("live record was already gone at expiry");
    }

    let done = DoneEntry {
        completed_at: clock::unix_now(),
        message: task.message.clone(),
    };
    log_store::append(path, &done.to_line())?;

    if config.notify_on_expire
        && let Err(err) = notifier.alert("timebar", &task.message)
    {
        log::warn!("expire notification failed: {err}");
    }
    if task.sound
        && let Some(file) = config.sound_file.as_deref()
    {
        play_sound(file);
    }

    std::thread::sleep(Duration::from_secs(config.cleanup_age.max(0) as u64));
    let _ = log_store::remove_record(path, &done.to_line());
    log_store::cleanup(path, clock::unix_now(), config.cleanup_age)?;
    Ok(())
}
