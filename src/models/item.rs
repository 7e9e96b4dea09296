//! Item model for the Things export snapshot

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Reserved identifier for the synthetic Inbox container.
///
/// Real Things identifiers are 22 case-sensitive alphanumeric characters, so
/// this short name cannot be a well-formed uuid; the resolver still verifies
/// absence before inserting it.
pub const INBOX_ID: &str = "Inbox";

/// Item kind, from the export's `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    Area,
    Project,
    Heading,
    ToDo,
    /// Synthetic container for Inbox members; never present in the input
    Inbox,
}

impl ItemKind {
    /// Container kinds own a directory in the output tree
    pub fn is_container(self) -> bool {
        matches!(self, ItemKind::Area | ItemKind::Project | ItemKind::Inbox)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Area => write!(f, "area"),
            ItemKind::Project => write!(f, "project"),
            ItemKind::Heading => write!(f, "heading"),
            ItemKind::ToDo => write!(f, "to-do"),
            ItemKind::Inbox => write!(f, "inbox"),
        }
    }
}

/// Completion status of a to-do or project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Incomplete,
    Completed,
    Canceled,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Incomplete => write!(f, "incomplete"),
            Status::Completed => write!(f, "completed"),
            Status::Canceled => write!(f, "canceled"),
        }
    }
}

/// Start bucket tag from the export's `start` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum StartBucket {
    Inbox,
    Anytime,
    Someday,
}

/// A checklist entry nested inside a to-do
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChecklistItem {
    pub uuid: String,
    pub title: String,
    #[serde(default)]
    pub status: Option<Status>,
}

impl ChecklistItem {
    pub fn is_completed(&self) -> bool {
        self.status == Some(Status::Completed)
    }
}

/// A single item from the snapshot: area, project, heading, or to-do.
///
/// All fields beyond `uuid`, `type`, and `title` are optional in the export.
/// Derived data (parent, filename, path) is never stored here; see
/// [`crate::vault::Resolved`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Item {
    pub uuid: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub title: String,
    #[serde(default)]
    pub status: Option<Status>,
    /// Parent references; at most one is meaningful, precedence
    /// heading > project > area
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub heading_title: Option<String>,
    #[serde(default)]
    pub project_title: Option<String>,
    #[serde(default)]
    pub area_title: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Relative ordering within a list; can be negative
    #[serde(default)]
    pub index: Option<i64>,
    #[serde(default)]
    pub today_index: Option<i64>,
    #[serde(default)]
    pub start: Option<StartBucket>,
    #[serde(default, deserialize_with = "opt_datetime")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "opt_datetime")]
    pub modified: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "opt_date")]
    pub deadline: Option<NaiveDate>,
    #[serde(default, deserialize_with = "opt_datetime")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "opt_datetime")]
    pub stop_date: Option<NaiveDateTime>,
    /// Nested child items of a project, area, or heading
    #[serde(default)]
    pub items: Vec<Item>,
    /// Nested checklist entries of a to-do
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
}

impl Item {
    /// Create a bare item with the given identity; all optional fields empty
    pub fn new(uuid: impl Into<String>, kind: ItemKind, title: impl Into<String>) -> Self {
        Item {
            uuid: uuid.into(),
            kind,
            title: title.into(),
            status: None,
            heading: None,
            project: None,
            area: None,
            heading_title: None,
            project_title: None,
            area_title: None,
            notes: None,
            index: None,
            today_index: None,
            start: None,
            created: None,
            modified: None,
            deadline: None,
            start_date: None,
            stop_date: None,
            items: Vec::new(),
            checklist: Vec::new(),
        }
    }

    /// The synthetic Inbox container under the reserved identifier
    pub fn inbox_container() -> Self {
        Item::new(INBOX_ID, ItemKind::Inbox, "Inbox")
    }

    /// Whether this item owns a directory in the output tree
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }
}

/// Timestamp format used throughout the export, e.g. `2021-03-28 12:15:20`
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date format used for deadlines, e.g. `2021-04-01`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn opt_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    value
        .map(|s| {
            // Some fields carry a bare date without a time component
            NaiveDateTime::parse_from_str(&s, DATETIME_FORMAT)
                .or_else(|_| {
                    NaiveDate::parse_from_str(&s, DATE_FORMAT).map(|d| d.and_time(NaiveTime::MIN))
                })
                .map_err(serde::de::Error::custom)
        })
        .transpose()
}

fn opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    value
        .map(|s| {
            NaiveDate::parse_from_str(&s, DATE_FORMAT)
                .or_else(|_| NaiveDateTime::parse_from_str(&s, DATETIME_FORMAT).map(|dt| dt.date()))
                .map_err(serde::de::Error::custom)
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(ItemKind::Area.to_string(), "area");
        assert_eq!(ItemKind::ToDo.to_string(), "to-do");
        assert_eq!(ItemKind::Inbox.to_string(), "inbox");
    }

    #[test]
    fn test_kind_is_container() {
        assert!(ItemKind::Area.is_container());
        assert!(ItemKind::Project.is_container());
        assert!(ItemKind::Inbox.is_container());
        assert!(!ItemKind::Heading.is_container());
        assert!(!ItemKind::ToDo.is_container());
    }

    #[test]
    fn test_deserialize_minimal() {
        let json = r#"{"uuid": "Aqbl1CgUWJD7eUXWnjLB22", "type": "to-do", "title": "Buy milk"}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.uuid, "Aqbl1CgUWJD7eUXWnjLB22");
        assert_eq!(item.kind, ItemKind::ToDo);
        assert_eq!(item.title, "Buy milk");
        assert!(item.status.is_none());
        assert!(item.items.is_empty());
        assert!(item.checklist.is_empty());
    }

    #[test]
    fn test_deserialize_full() {
        let json = r#"{
            "uuid": "Aqbl1CgUWJD7eUXWnjLB22",
            "type": "to-do",
            "title": "Ship it",
            "status": "incomplete",
            "project": "Bqbl1CgUWJD7eUXWnjLB22",
            "project_title": "Launch",
            "notes": "Press the button.",
            "index": -3,
            "today_index": 7,
            "start": "Anytime",
            "created": "2021-03-28 12:15:20",
            "modified": "2021-03-29 08:00:00",
            "deadline": "2021-04-01",
            "start_date": "2021-03-28",
            "checklist": [
                {"uuid": "c1", "title": "step one", "status": "completed"},
                {"uuid": "c2", "title": "step two", "status": "incomplete"}
            ]
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.status, Some(Status::Incomplete));
        assert_eq!(item.project.as_deref(), Some("Bqbl1CgUWJD7eUXWnjLB22"));
        assert_eq!(item.project_title.as_deref(), Some("Launch"));
        assert_eq!(item.index, Some(-3));
        assert_eq!(item.start, Some(StartBucket::Anytime));
        assert_eq!(
            item.created.unwrap().format(DATETIME_FORMAT).to_string(),
            "2021-03-28 12:15:20"
        );
        assert_eq!(
            item.deadline.unwrap().format(DATE_FORMAT).to_string(),
            "2021-04-01"
        );
        assert_eq!(item.checklist.len(), 2);
        assert!(item.checklist[0].is_completed());
        assert!(!item.checklist[1].is_completed());
    }

    #[test]
    fn test_deserialize_null_dates() {
        let json = r#"{"uuid": "x", "type": "to-do", "title": "t", "deadline": null, "stop_date": null}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert!(item.deadline.is_none());
        assert!(item.stop_date.is_none());
    }

    #[test]
    fn test_deserialize_nested_items() {
        let json = r#"{
            "uuid": "p1", "type": "project", "title": "Launch",
            "items": [{"uuid": "t1", "type": "to-do", "title": "Ship it", "status": "incomplete"}]
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.items.len(), 1);
        assert_eq!(item.items[0].uuid, "t1");
    }

    #[test]
    fn test_inbox_container() {
        let inbox = Item::inbox_container();
        assert_eq!(inbox.uuid, INBOX_ID);
        assert_eq!(inbox.kind, ItemKind::Inbox);
        assert!(inbox.is_container());
    }

    #[test]
    fn test_duplicate_equality() {
        let json = r#"{"uuid": "x", "type": "to-do", "title": "t", "index": 4}"#;
        let a: Item = serde_json::from_str(json).unwrap();
        let b: Item = serde_json::from_str(json).unwrap();
        assert_eq!(a, b);

        let c: Item = serde_json::from_str(
            r#"{"uuid": "x", "type": "to-do", "title": "t", "index": 5}"#,
        )
        .unwrap();
        assert_ne!(a, c);
    }
}
