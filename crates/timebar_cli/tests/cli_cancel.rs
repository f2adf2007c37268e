use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

// A pid far above any default pid_max, so termination is a harmless miss.
const DEAD_PID: u32 = 4_999_999;

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("timebar-{nanos}-{file_name}"))
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

fn run_cancel(store_path: &Path, selection: &str) -> Output {
    let exe = env!("CARGO_BIN_EXE_timebar");
    let mut child = Command::new(exe)
        .arg("-c")
        .env("TIMEBAR_STORE_PATH", store_path)
        .env("TIMEBAR_CONFIG_PATH", temp_path("no-config"))
        .env("TIMEBAR_DISABLE_NOTIFICATIONS", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn cancel command");

    // The command may exit before reading stdin (e.g. "nothing to cancel"),
    // closing the pipe; a broken-pipe write is expected in that case.
    let _ = child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(selection.as_bytes());
    child.wait_with_output().expect("failed to wait for cancel")
}

fn timer_line(deadline: i64, pid: u32, message: &str) -> String {
    format!("{deadline} TIMER {pid} 0 0 {message}")
}

#[test]
fn empty_store_reports_nothing_to_cancel() {
    let store_path = temp_path("cancel-empty.log");
    let output = run_cancel(&store_path, "");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("nothing to cancel"));
}

#[test]
fn completed_records_are_not_offered() {
    let store_path = temp_path("cancel-done-only.log");
    let completed_at = unix_now() - 5;
    std::fs::write(&store_path, format!("{completed_at} ✓ already done\n")).unwrap();

    let output = run_cancel(&store_path, "1\n");
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("nothing to cancel"));
    assert!(!stdout.contains("already done"));
}

#[test]
fn invalid_selection_is_a_noop_and_exits_zero() {
    let store_path = temp_path("cancel-invalid.log");
    let deadline = unix_now() + 300;
    std::fs::write(&store_path, format!("{}\n", timer_line(deadline, DEAD_PID, "keep me"))).unwrap();

    for selection in ["zap\n", "7\n", "0\n", "\n"] {
        let output = run_cancel(&store_path, selection);
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("invalid selection"));
    }

    let content = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();
    assert!(content.contains("keep me"));
}

#[test]
fn cancelling_removes_only_the_selected_record() {
    let store_path = temp_path("cancel-selected.log");
    let deadline = unix_now() + 300;
    std::fs::write(
        &store_path,
        format!(
            "{}\n{}\n",
            timer_line(deadline, DEAD_PID, "foo"),
            timer_line(deadline, DEAD_PID + 1, "foo|bar")
        ),
    )
    .unwrap();

    let output = run_cancel(&store_path, "2\n");
    let content = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1. foo"));
    assert!(stdout.contains("2. foo|bar"));
    assert!(stdout.contains("cancelled: foo|bar"));

    assert!(content.contains(" foo\n"));
    assert!(!content.contains("foo|bar"));
}

#[test]
fn cancel_menu_numbers_entries_in_file_order() {
    let store_path = temp_path("cancel-order.log");
    let deadline = unix_now() + 300;
    std::fs::write(
        &store_path,
        format!(
            "{}\n{}\n{}\n",
            timer_line(deadline, DEAD_PID, "first"),
            format!("{} ✓ fresh", unix_now() - 2),
            timer_line(deadline, DEAD_PID + 1, "second")
        ),
    )
    .unwrap();

    let output = run_cancel(&store_path, "1\n");
    let content = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1. first"));
    assert!(stdout.contains("2. second"));
    assert!(!content.contains("first"));
    assert!(content.contains("second"));
    assert!(content.contains("✓ fresh"));
}
