//! Vault resolution: registry, hierarchy, and path assignment
//!
//! The phases are strictly ordered: the full registry is built first, then
//! every parent link is resolved, then paths are synthesized. The resolved
//! vault is immutable; rendering and writing only read from it.

pub mod hierarchy;
pub mod paths;
pub mod registry;

pub use hierarchy::{ParentMap, ParentRef, parent_ref};
pub use paths::{
    COLON_SUBSTITUTE, MAX_PATH_BYTES, PathInfo, SLASH_SUBSTITUTE, filename_component,
};
pub use registry::{NamedList, Registry, SnapshotError};

use crate::models::Item;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors raised while resolving hierarchy and paths.
///
/// Every variant is a data-integrity violation: the snapshot is corrupt or
/// unsupported, and the run aborts before any output is written.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Reserved identifier '{0}' collides with a real item")]
    ReservedIdCollision(String),
    #[error("Item {item} references unknown parent {parent}")]
    UnknownParent { item: String, parent: String },
    #[error("Cycle in parent chain reached from item {0}")]
    ParentCycle(String),
    #[error("Distinct items resolved to the same path: {0}")]
    PathCollision(String),
    #[error("Path for item {id} exceeds {MAX_PATH_BYTES} bytes: {path}")]
    PathTooLong { id: String, path: String },
}

/// Derived data for one item, kept apart from the source record
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// Resolved single parent, `None` for roots
    pub parent: Option<String>,
    /// Final filename component; empty for headings
    pub filename: String,
    /// Relative path below the output root; `None` for headings
    pub path: Option<std::path::PathBuf>,
}

/// A fully resolved snapshot, ready for rendering
#[derive(Debug, Clone)]
pub struct Vault {
    registry: Registry,
    resolved: BTreeMap<String, Resolved>,
    children: BTreeMap<String, Vec<String>>,
}

impl Vault {
    /// Resolve a registry into a vault: synthesize the Inbox container,
    /// attach parents, and assign collision-free paths.
    pub fn resolve(mut registry: Registry) -> Result<Self, ResolveError> {
        let parents = hierarchy::resolve(&mut registry)?;
        let path_table = paths::assign(&registry, &parents)?;
        let children = hierarchy::children(&registry, &parents);

        let mut resolved = BTreeMap::new();
        for (id, parent) in parents {
            let info = path_table.get(&id).cloned().unwrap_or(PathInfo {
                filename: String::new(),
                path: None,
            });
            resolved.insert(
                id,
                Resolved {
                    parent,
                    filename: info.filename,
                    path: info.path,
                },
            );
        }

        Ok(Vault {
            registry,
            resolved,
            children,
        })
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.registry.get(id)
    }

    pub fn resolved(&self, id: &str) -> Option<&Resolved> {
        self.resolved.get(id)
    }

    /// Children of an item, ordered by `index` then identifier
    pub fn children(&self, id: &str) -> &[String] {
        self.children.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Relative path of an item, if it has one
    pub fn path(&self, id: &str) -> Option<&Path> {
        self.resolved.get(id).and_then(|r| r.path.as_deref())
    }

    /// Members of a named source list, in input order
    pub fn list(&self, name: &str) -> Option<&[String]> {
        self.registry.list(name)
    }

    /// Iterate over all items with their derived data, in identifier order
    pub fn iter(&self) -> impl Iterator<Item = (&Item, &Resolved)> {
        self.registry
            .items()
            .filter_map(|item| self.resolved.get(&item.uuid).map(|r| (item, r)))
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}
