//! Snapshot document parsing
//!
//! The input is the JSON produced by `things-cli -j all`: an array of named
//! lists (Inbox, Today, Upcoming, Anytime, Someday, Areas, No Area, ...),
//! each carrying the items that belong to it. Membership is non-exclusive;
//! the same item may appear under several lists.

use crate::models::item::Item;
use serde::Deserialize;
use std::io::Read;

/// One named list from the export
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceList {
    pub title: String,
    pub items: Vec<Item>,
}

/// Parse a snapshot document from a JSON string
pub fn parse_snapshot(json: &str) -> Result<Vec<SourceList>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parse a snapshot document from a reader
pub fn read_snapshot<R: Read>(reader: R) -> Result<Vec<SourceList>, serde_json::Error> {
    serde_json::from_reader(reader)
}
