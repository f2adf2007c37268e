use crate::error::TimerError;
use crate::model::Record;
use std::io::Write;
use std::path::{Path, PathBuf};

const STORE_FILE_NAME: &str = "timers.log";
const STORE_ENV_VAR: &str = "TIMEBAR_STORE_PATH";

pub fn store_path() -> Result<PathBuf, TimerError> {
    if let Ok(path) = std::env::var(STORE_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    let cache = std::env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))
        .ok_or_else(|| TimerError::invalid_data("HOME is not set"))?;
    Ok(cache.join("timebar").join(STORE_FILE_NAME))
}

/// Read every record in file order. A missing file is created empty, parent
/// directory included, so every later mutation is a plain file operation.
pub fn load(path: &Path) -> Result<Vec<Record>, TimerError> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| TimerError::io(err.to_string()))?;
        }
        std::fs::write(path, "").map_err(|err| TimerError::io(err.to_string()))?;
        return Ok(Vec::new());
    }

    let content =
        std::fs::read_to_string(path).map_err(|err| TimerError::io(err.to_string()))?;
    Ok(content
        .lines()
        .filter(|line| !line.is_empty())
        .map(Record::parse)
        .collect())
}

/// Append one record line. Creation is a pure append so two concurrent
/// schedules never clobber each other the way racing rewrites could.
pub fn append(path: &Path, line: &str) -> Result<(), TimerError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| TimerError::io(err.to_string()))?;
    }

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| TimerError::io(err.to_string()))?;
    file.write_all(format!("{line}\n").as_bytes())
        .map_err(|err| TimerError::io(err.to_string()))?;
    Ok(())
}

/// Replace the whole file via write-temp-then-rename so a concurrent reader
/// never observes a half-written store.
pub fn rewrite(path: &Path, records: &[Record]) -> Result<(), TimerError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| TimerError::io(err.to_string()))?;
    }

    let mut content = String::new();
    for record in records {
        content.push_str(&record.to_line());
        content.push('\n');
    }

    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(STORE_FILE_NAME);
    let temp = path.with_file_name(format!(".{}.{}.tmp", name, std::process::id()));
    std::fs::write(&temp, content).map_err(|err| TimerError::io(err.to_string()))?;
    std::fs::rename(&temp, path).map_err(|err| TimerError::io(err.to_string()))?;
    Ok(())
}

/// Remove the first record whose serialized line matches `exact` byte for
/// byte. Literal matching keeps messages full of pipes or digits from ever
/// deleting a neighboring record. Returns whether anything was removed.
pub fn remove_record(path: &Path, exact: &str) -> Result<bool, TimerError> {
    let records = load(path)?;
    let mut kept = Vec::with_capacity(records.len());
    let mut removed = false;

    for record in records {
        if !removed && record.to_line() == exact {
            removed = true;
            continue;
        }
        kept.push(record);
    }

    if removed {
        rewrite(path, &kept)?;
    }
    Ok(removed)
}

/// Drop live records that are due and completed records past the retention
/// window. Unrecognized lines always survive. Rewrites only on change.
pub fn cleanup(path: &Path, now: i64, retention: i64) -> Result<(), TimerError> {
    let records = load(path)?;
    if records.is_empty() {
        return Ok(());
    }

    let kept: Vec<Record> = records
        .iter()
        .filter(|record| match record {
            Record::Live(entry) => entry.deadline > now,
            Record::Done(done) => now - done.completed_at < retention,
            Record::Unrecognized(_) => true,
        })
        .cloned()
        .collect();

    if kept.len() != records.len() {
        log::debug!("cleanup pruned {} record(s)", records.len() - kept.len());
        rewrite(path, &kept)?;
    }
    Ok(())
}
