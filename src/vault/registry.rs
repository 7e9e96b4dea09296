//! Item registry and list index
//!
//! One pass over the snapshot's named lists produces a deduplicated
//! `uuid -> item` map plus an ordered list index. The same item may appear
//! under several lists; every occurrence must carry an identical record, and
//! a divergence is treated as a corrupt snapshot rather than a warning.

use crate::models::{Item, SourceList, Status, read_snapshot};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use thiserror::Error;

/// Errors raised while building the registry from a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to parse snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Item {0} has divergent records across lists")]
    DuplicateMismatch(String),
    #[error("Item {id} appears twice within list '{list}'")]
    DuplicateInList { list: String, id: String },
}

/// A named list's resolved membership, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct NamedList {
    pub name: String,
    pub members: Vec<String>,
}

/// Deduplicated item registry plus the list index, built in a single pass
#[derive(Debug, Clone)]
pub struct Registry {
    items: BTreeMap<String, Item>,
    lists: Vec<NamedList>,
}

impl Registry {
    /// Load a registry from a snapshot file on disk
    pub fn load(path: &Path, include_all: bool) -> Result<Self, SnapshotError> {
        let file = std::fs::File::open(path)?;
        let lists = read_snapshot(std::io::BufReader::new(file))?;
        Self::from_snapshot(lists, include_all)
    }

    /// Build a registry from a parsed snapshot.
    ///
    /// When `include_all` is false, items whose status is present and not
    /// incomplete are dropped; items without a status (areas, headings,
    /// most projects in list context) are always kept.
    pub fn from_snapshot(
        snapshot: Vec<SourceList>,
        include_all: bool,
    ) -> Result<Self, SnapshotError> {
        let mut items: BTreeMap<String, Item> = BTreeMap::new();
        let mut lists = Vec::with_capacity(snapshot.len());

        for list in snapshot {
            let mut members = Vec::with_capacity(list.items.len());
            let mut seen: HashSet<String> = HashSet::new();

            for item in list.items {
                // Uniqueness within a list is checked on the unfiltered
                // membership; a repeat is corrupt even if both copies would
                // be dropped below
                if !seen.insert(item.uuid.clone()) {
                    return Err(SnapshotError::DuplicateInList {
                        list: list.title,
                        id: item.uuid,
                    });
                }

                if !include_all
                    && let Some(status) = item.status
                    && status != Status::Incomplete
                {
                    continue;
                }

                members.push(item.uuid.clone());

                match items.get(&item.uuid) {
                    Some(existing) => {
                        if *existing != item {
                            return Err(SnapshotError::DuplicateMismatch(item.uuid));
                        }
                    }
                    None => {
                        items.insert(item.uuid.clone(), item);
                    }
                }
            }

            lists.push(NamedList {
                name: list.title,
                members,
            });
        }

        Ok(Registry { items, lists })
    }

    /// Look up an item by identifier
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Whether an identifier is present in the registry
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Iterate over all items in identifier order
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Number of registered items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The list index, in input order
    pub fn lists(&self) -> &[NamedList] {
        &self.lists
    }

    /// Members of a named list, if the snapshot contains it
    pub fn list(&self, name: &str) -> Option<&[String]> {
        self.lists
            .iter()
            .find(|l| l.name == name)
            .map(|l| l.members.as_slice())
    }

    /// Insert a synthesized item. Caller must have checked the identifier is
    /// free; see [`crate::vault::hierarchy`].
    pub(crate) fn insert(&mut self, item: Item) {
        self.items.insert(item.uuid.clone(), item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_snapshot;

    fn registry(json: &str, include_all: bool) -> Result<Registry, SnapshotError> {
        Registry::from_snapshot(parse_snapshot(json).unwrap(), include_all)
    }

    #[test]
    fn test_build_registry() {
        let reg = registry(
            r#"[
                {"title": "Inbox", "items": [
                    {"uuid": "t1", "type": "to-do", "title": "One", "status": "incomplete"}
                ]},
                {"title": "Areas", "items": [
                    {"uuid": "a1", "type": "area", "title": "Work"}
                ]}
            ]"#,
            false,
        )
        .unwrap();

        assert_eq!(reg.len(), 2);
        assert!(reg.contains("t1"));
        assert_eq!(reg.get("a1").unwrap().title, "Work");
        assert_eq!(reg.list("Inbox").unwrap(), &["t1".to_string()]);
        assert!(reg.list("Someday").is_none());
    }

    #[test]
    fn test_overlapping_lists_dedupe() {
        let reg = registry(
            r#"[
                {"title": "Today", "items": [
                    {"uuid": "t1", "type": "to-do", "title": "One", "status": "incomplete", "index": 2}
                ]},
                {"title": "Anytime", "items": [
                    {"uuid": "t1", "type": "to-do", "title": "One", "status": "incomplete", "index": 2}
                ]}
            ]"#,
            false,
        )
        .unwrap();

        assert_eq!(reg.len(), 1);
        assert_eq!(reg.list("Today").unwrap().len(), 1);
        assert_eq!(reg.list("Anytime").unwrap().len(), 1);
    }

    #[test]
    fn test_divergent_duplicate_is_fatal() {
        let err = registry(
            r#"[
                {"title": "Today", "items": [
                    {"uuid": "t1", "type": "to-do", "title": "One", "status": "incomplete", "index": 2}
                ]},
                {"title": "Anytime", "items": [
                    {"uuid": "t1", "type": "to-do", "title": "One", "status": "incomplete", "index": 3}
                ]}
            ]"#,
            false,
        )
        .unwrap_err();

        assert!(matches!(err, SnapshotError::DuplicateMismatch(id) if id == "t1"));
    }

    #[test]
    fn test_duplicate_within_list_is_fatal() {
        let err = registry(
            r#"[
                {"title": "Today", "items": [
                    {"uuid": "t1", "type": "to-do", "title": "One", "status": "incomplete"},
                    {"uuid": "t1", "type": "to-do", "title": "One", "status": "incomplete"}
                ]}
            ]"#,
            false,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            SnapshotError::DuplicateInList { list, id } if list == "Today" && id == "t1"
        ));
    }

    #[test]
    fn test_duplicate_of_filtered_item_still_fatal() {
        // The uniqueness gate sees the unfiltered membership
        let err = registry(
            r#"[
                {"title": "Logbook", "items": [
                    {"uuid": "t1", "type": "to-do", "title": "Done", "status": "completed"},
                    {"uuid": "t1", "type": "to-do", "title": "Done", "status": "completed"}
                ]}
            ]"#,
            false,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            SnapshotError::DuplicateInList { list, id } if list == "Logbook" && id == "t1"
        ));
    }

    #[test]
    fn test_status_filter() {
        let json = r#"[
            {"title": "Anytime", "items": [
                {"uuid": "t1", "type": "to-do", "title": "Open", "status": "incomplete"},
                {"uuid": "t2", "type": "to-do", "title": "Done", "status": "completed"},
                {"uuid": "t3", "type": "to-do", "title": "Dropped", "status": "canceled"},
                {"uuid": "a1", "type": "area", "title": "No status"}
            ]}
        ]"#;

        let reg = registry(json, false).unwrap();
        assert_eq!(reg.len(), 2);
        assert!(reg.contains("t1"));
        assert!(reg.contains("a1"));
        assert_eq!(reg.list("Anytime").unwrap().len(), 2);

        let reg = registry(json, true).unwrap();
        assert_eq!(reg.len(), 4);
    }

    #[test]
    fn test_filtered_item_not_checked_for_divergence() {
        // A completed duplicate is dropped before the equality gate
        let reg = registry(
            r#"[
                {"title": "Anytime", "items": [
                    {"uuid": "t1", "type": "to-do", "title": "One", "status": "incomplete"}
                ]},
                {"title": "Logbook", "items": [
                    {"uuid": "t1", "type": "to-do", "title": "One", "status": "completed"}
                ]}
            ]"#,
            false,
        )
        .unwrap();
        assert_eq!(reg.len(), 1);
    }
}
