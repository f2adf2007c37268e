use crate::error::TimerError;
use crate::model::{LiveEntry, Record};
use crate::storage::log_store;
use std::path::Path;

/// Live timer/alarm entries in file order; completed records are never
/// offered for cancellation.
pub fn live_entries(records: &[Record]) -> Vec<LiveEntry> {
    records
        .iter()
        .filter_map(|record| match record {
            Record::Live(entry) => Some(entry.clone()),
            _ => None,
        })
        .collect()
}

/// Map a 1-based prompt answer to an index into the listed entries.
pub fn parse_selection(input: &str, count: usize) -> Option<usize> {
    let chosen: usize = input.trim().parse().ok()?;
    (1..=count).contains(&chosen).then(|| chosen - 1)
}

/// Terminate the waiter (best effort, never surfaced) and remove the exact
/// record text. If the entry fired in the meantime the removal is a no-op;
/// the completed record it left behind is untouched.
pub fn cancel_with_path(path: &Path, entry: &LiveEntry) -> Result<bool, TimerError> {
    terminate(entry.pid);
    log_store::remove_record(path, &entry.to_line())
}

fn terminate(pid: u32) {
    #[cfg(unix)]
    {
        let _ = unsafe { libc::kill(pid as i32, libc::SIGTERM) };
    }
    #[cfg(not(unix))]
    {
        let _ = pid;
    }
}
