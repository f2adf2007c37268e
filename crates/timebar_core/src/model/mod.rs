mod entry;

pub use entry::{CHECKMARK, DoneEntry, EntryKind, LiveEntry, Record};
