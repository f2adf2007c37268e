pub mod cancel;
pub mod clock;
pub mod config;
pub mod error;
pub mod format;
pub mod list;
pub mod model;
pub mod notify;
pub mod parse;
pub mod schedule;
pub mod storage;
