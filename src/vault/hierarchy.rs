//! Hierarchy resolution
//!
//! Computes each item's single logical parent from the flat reference fields
//! and synthesizes the virtual Inbox container. The precedence is
//! heading > project > area > Inbox membership > none; an item never has more
//! than one meaningful reference in a well-formed snapshot.

use crate::models::{INBOX_ID, Item};
use crate::vault::ResolveError;
use crate::vault::registry::Registry;
use std::collections::{BTreeMap, HashSet};

/// Normalized parent reference, resolved once per item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentRef {
    Heading(String),
    Project(String),
    Area(String),
    /// No reference fields, but the item is an Inbox list member
    InboxMember,
    Root,
}

impl ParentRef {
    /// The parent identifier this reference resolves to, if any
    pub fn parent_id(&self) -> Option<&str> {
        match self {
            ParentRef::Heading(id) | ParentRef::Project(id) | ParentRef::Area(id) => Some(id),
            ParentRef::InboxMember => Some(INBOX_ID),
            ParentRef::Root => None,
        }
    }
}

/// Classify an item's parent reference
pub fn parent_ref(item: &Item, inbox_members: &HashSet<&str>) -> ParentRef {
    if let Some(id) = &item.heading {
        ParentRef::Heading(id.clone())
    } else if let Some(id) = &item.project {
        ParentRef::Project(id.clone())
    } else if let Some(id) = &item.area {
        ParentRef::Area(id.clone())
    } else if inbox_members.contains(item.uuid.as_str()) {
        ParentRef::InboxMember
    } else {
        ParentRef::Root
    }
}

/// Resolved parent link per item; `None` marks a root
pub type ParentMap = BTreeMap<String, Option<String>>;

/// Resolve every item's parent and synthesize the Inbox container.
///
/// Inserts the container into the registry under the reserved identifier and
/// verifies every referenced parent exists. Returns the parent table; the
/// registry itself is not annotated.
pub fn resolve(registry: &mut Registry) -> Result<ParentMap, ResolveError> {
    if registry.contains(INBOX_ID) {
        return Err(ResolveError::ReservedIdCollision(INBOX_ID.to_string()));
    }
    registry.insert(Item::inbox_container());

    let inbox_members: HashSet<&str> = registry
        .list("Inbox")
        .unwrap_or_default()
        .iter()
        .map(String::as_str)
        .collect();

    let mut parents = ParentMap::new();
    for item in registry.items() {
        let parent = parent_ref(item, &inbox_members).parent_id().map(String::from);
        if let Some(id) = &parent
            && !registry.contains(id)
        {
            return Err(ResolveError::UnknownParent {
                item: item.uuid.clone(),
                parent: id.clone(),
            });
        }
        parents.insert(item.uuid.clone(), parent);
    }

    Ok(parents)
}

/// Derive the ordered children table from the parent table.
///
/// Children are ordered by their `index` field ascending, ties broken by
/// identifier so the result never depends on map iteration order.
pub fn children(registry: &Registry, parents: &ParentMap) -> BTreeMap<String, Vec<String>> {
    let mut table: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for (id, parent) in parents {
        if let Some(parent_id) = parent {
            table.entry(parent_id.clone()).or_default().push(id.clone());
        }
    }

    for ids in table.values_mut() {
        ids.sort_by_key(|id| {
            let index = registry.get(id).and_then(|i| i.index).unwrap_or(0);
            (index, id.clone())
        });
    }

    table
}
