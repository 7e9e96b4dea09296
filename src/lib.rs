//! things2md - Things3 JSON export to Markdown vault converter
//!
//! This library turns the snapshot produced by `things-cli -j all` into a
//! tree of Markdown files mirroring the area/project/heading/to-do
//! hierarchy. The core pipeline deduplicates items across source lists,
//! resolves each item's single parent, and assigns collision-free,
//! filesystem-legal relative paths before anything touches the disk.

pub mod cli;
pub mod export;
pub mod models;
pub mod vault;

pub use export::{ExportError, ExportStats, export, render};
pub use models::{ChecklistItem, Item, ItemKind, SourceList, Status};
pub use vault::{Registry, Resolved, ResolveError, SnapshotError, Vault};
