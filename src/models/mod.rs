//! Data models for things2md

pub mod item;
pub mod snapshot;

pub use item::{
    ChecklistItem, DATE_FORMAT, DATETIME_FORMAT, INBOX_ID, Item, ItemKind, StartBucket, Status,
};
pub use snapshot::{SourceList, parse_snapshot, read_snapshot};
