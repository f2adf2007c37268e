use crate::error::TimerError;
use crate::format::{CHECKMARK, icon_for};
use crate::model::Record;
use crate::storage::log_store;
use serde::Serialize;
use std::path::Path;

/// One renderable listing entry. The serialized shape is the `--json`
/// contract; `remaining` and `completed` only drive the text layouts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub id: u32,
    pub name: String,
    pub label: &'static str,
    pub emoji: &'static str,
    pub expiration: i64,
    pub sound: bool,
    #[serde(skip)]
    pub remaining: i64,
    #[serde(skip)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub items: Vec<ListItem>,
    /// True when the store held no records at all, which renders differently
    /// from "records exist but every one is hidden".
    pub store_empty: bool,
}

/// Prune, then build the visible entries from a fresh snapshot.
pub fn list_with_path(
    path: &Path,
    now: i64,
    retention: i64,
    show_all: bool,
) -> Result<Listing, TimerError> {
    log_store::cleanup(path, now, retention)?;
    let records = log_store::load(path)?;
    Ok(Listing {
        items: build_items(&records, now, show_all),
        store_empty: records.is_empty(),
    })
}

/// Live entries inside their visibility window (or with none) are shown with
/// remaining time; completed entries always show until retention prunes
/// them. A live entry that is already due renders completed-style rather
/// than as a negative countdown; a concurrent append can slip one past the
/// cleanup snapshot.
pub fn build_items(records: &[Record], now: i64, show_all: bool) -> Vec<ListItem> {
    let mut items = Vec::new();

    for record in records {
        match record {
            Record::Live(entry) => {
                let remaining = entry.deadline - now;
                if remaining <= 0 {
                    items.push(ListItem {
                        id: entry.pid,
                        name: entry.message.clone(),
                        label: entry.kind.label(),
                        emoji: CHECKMARK,
                        expiration: entry.deadline,
                        sound: entry.sound,
                        remaining: 0,
                        completed: true,
                    });
                    continue;
                }
                if !show_all && entry.window > 0 && remaining > entry.window {
                    continue;
                }
                items.push(ListItem {
                    id: entry.pid,
                    name: entry.message.clone(),
                    label: entry.kind.label(),
                    emoji: icon_for(remaining),
                    expiration: entry.deadline,
                    sound: entry.sound,
                    remaining,
                    completed: false,
                });
            }
            Record::Done(done) => {
                items.push(ListItem {
                    id: 0,
                    name: done.message.clone(),
                    label: "completed",
                    emoji: CHECKMARK,
                    expiration: done.completed_at,
                    sound: false,
                    remaining: 0,
                    completed: true,
                });
            }
            Record::Unrecognized(_) => {}
        }
    }

    items
}
