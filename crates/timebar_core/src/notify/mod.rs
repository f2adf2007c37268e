use crate::error::TimerError;
use std::path::Path;
use std::process::{Command, Stdio};

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub use linux::DesktopNotifier;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::ToastNotifier;

pub trait Notifier {
    fn alert(&self, summary: &str, body: &str) -> Result<(), TimerError>;
}

pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn alert(&self, _summary: &str, _body: &str) -> Result<(), TimerError> {
        Ok(())
    }
}

pub fn notifier_from_env() -> Result<Box<dyn Notifier>, TimerError> {
    if std::env::var("TIMEBAR_DISABLE_NOTIFICATIONS").is_ok() {
        return Ok(Box::new(NoopNotifier));
    }

    match platform_notifier() {
        Ok(notifier) => Ok(notifier),
        Err(err) => match err {
            TimerError::InvalidData(_) => Ok(Box::new(NoopNotifier)),
            other => Err(other),
        },
    }
}

#[cfg(target_os = "linux")]
pub fn platform_notifier() -> Result<Box<dyn Notifier>, TimerError> {
    Ok(Box::new(DesktopNotifier))
}

#[cfg(windows)]
pub fn platform_notifier() -> Result<Box<dyn Notifier>, TimerError> {
    Ok(Box::new(ToastNotifier))
}

#[cfg(not(any(target_os = "linux", windows)))]
pub fn platform_notifier() -> Result<Box<dyn Notifier>, TimerError> {
    Err(TimerError::invalid_data(
        "notifications are not supported on this platform",
    ))
}

/// Hand a sound file to the system player, fire and forget. Playback
/// problems never affect the waiter's bookkeeping.
pub fn play_sound(file: &Path) {
    let player = if cfg!(target_os = "macos") {
        "afplay"
    } else {
        "paplay"
    };

    let spawned = Command::new(player)
        .arg(file)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    if let Err(err) = spawned {
        log::warn!("could not play {}: {}", file.display(), err);
    }
}
