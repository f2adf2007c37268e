use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("timebar-{nanos}-{file_name}"))
}

fn run_timebar(store_path: &Path, config_path: &Path, args: &[&str]) -> Output {
    let exe = env!("CARGO_BIN_EXE_timebar");
    Command::new(exe)
        .args(args)
        .env("TIMEBAR_STORE_PATH", store_path)
        .env("TIMEBAR_CONFIG_PATH", config_path)
        .env("TIMEBAR_DISABLE_NOTIFICATIONS", "1")
        .output()
        .expect("failed to run timebar")
}

/// Reap the detached waiter a test left behind, by the pid recorded in the
/// store line.
fn kill_waiter(store_line: &str) {
    if let Some(pid) = store_line.split(' ').nth(2) {
        Command::new("kill").arg(pid).output().ok();
    }
}

fn wait_for<F: Fn(&str) -> bool>(path: &Path, budget: Duration, predicate: F) -> String {
    let started = SystemTime::now();
    loop {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if predicate(&content) {
            return content;
        }
        if started.elapsed().unwrap() > budget {
            return content;
        }
        std::thread::sleep(Duration::from_millis(200));
    }
}

#[test]
fn schedule_timer_appends_live_record() {
    let store_path = temp_path("schedule.log");
    let config_path = temp_path("schedule-config");

    let output = run_timebar(&store_path, &config_path, &["tea", "1h"]);

    let content = std::fs::read_to_string(&store_path).expect("store written");
    kill_waiter(content.lines().next().unwrap_or(""));
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Scheduled timer: tea"));
    let line = content.lines().next().expect("one record");
    assert!(line.contains(" TIMER "));
    assert!(line.ends_with(" tea"));
}

#[test]
fn one_second_timer_completes_and_prunes_itself() {
    let store_path = temp_path("lifecycle.log");
    let config_path = temp_path("lifecycle-config");
    std::fs::write(&config_path, "cleanup_age=2\nnotify_on_expire=0\n").unwrap();

    let output = run_timebar(&store_path, &config_path, &["brew|strong", "1s"]);
    assert!(output.status.success());

    let immediate = std::fs::read_to_string(&store_path).expect("store written");
    assert!(immediate.contains(" TIMER "));
    assert!(immediate.contains("brew|strong"));

    // The waiter fires after ~1s and swaps the live record for a checkmark.
    let fired = wait_for(&store_path, Duration::from_secs(8), |content| {
        content.contains('✓') && !content.contains(" TIMER ")
    });
    let done_line = fired
        .lines()
        .find(|line| line.contains('✓'))
        .expect("completed record")
        .to_string();
    let mut fields = done_line.splitn(3, ' ');
    fields.next().unwrap().parse::<i64>().expect("epoch stamp");
    assert_eq!(fields.next().unwrap(), "✓");
    assert_eq!(fields.next().unwrap(), "brew|strong");

    // After the 2s retention window the waiter removes its own record.
    let pruned = wait_for(&store_path, Duration::from_secs(8), |content| {
        !content.contains("brew|strong")
    });
    std::fs::remove_file(&store_path).ok();
    std::fs::remove_file(&config_path).ok();

    assert!(!pruned.contains("brew|strong"));
}

#[test]
fn visibility_window_round_trips_through_scheduling() {
    let store_path = temp_path("window.log");
    let config_path = temp_path("window-config");

    let output = run_timebar(
        &store_path,
        &config_path,
        &["-n", "2s", "quiet one", "5m"],
    );
    assert!(output.status.success());

    let hidden = run_timebar(&store_path, &config_path, &[]);
    assert!(hidden.status.success());
    assert!(hidden.stdout.is_empty());

    let shown = run_timebar(&store_path, &config_path, &["--all"]);
    assert!(shown.status.success());
    assert!(String::from_utf8_lossy(&shown.stdout).contains("quiet one"));

    let content = std::fs::read_to_string(&store_path).unwrap_or_default();
    kill_waiter(content.lines().next().unwrap_or(""));
    std::fs::remove_file(&store_path).ok();
}

#[test]
fn unparseable_time_is_rejected_without_trace() {
    let store_path = temp_path("schedule-garbage.log");
    let config_path = temp_path("garbage-config");

    let output = run_timebar(&store_path, &config_path, &["tea", "whenever"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: unparseable"));
    assert_eq!(std::fs::read_to_string(&store_path).unwrap_or_default(), "");
}

#[test]
fn past_alarm_is_rejected_without_trace() {
    let store_path = temp_path("schedule-past.log");
    let config_path = temp_path("past-config");

    let output = run_timebar(&store_path, &config_path, &["old news", "2020-01-01"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: time_in_past"));
    assert_eq!(std::fs::read_to_string(&store_path).unwrap_or_default(), "");
}

#[test]
fn missing_time_is_rejected() {
    let store_path = temp_path("schedule-missing.log");
    let config_path = temp_path("missing-config");

    let output = run_timebar(&store_path, &config_path, &["tea"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: missing_fields"));
    assert_eq!(std::fs::read_to_string(&store_path).unwrap_or_default(), "");
}

#[test]
fn malformed_window_is_rejected() {
    let store_path = temp_path("schedule-badwindow.log");
    let config_path = temp_path("badwindow-config");

    let output = run_timebar(&store_path, &config_path, &["-n", "soonish", "tea", "5m"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_window"));
    assert_eq!(std::fs::read_to_string(&store_path).unwrap_or_default(), "");
}
