//! Path synthesis
//!
//! Derives a filesystem-legal relative path for every addressable item by
//! sanitizing titles, walking the parent chain (headings contribute no
//! segment), rewriting colliding paths with an identifier suffix, and
//! enforcing the path length limit.

use crate::models::ItemKind;
use crate::vault::ResolveError;
use crate::vault::hierarchy::ParentMap;
use crate::vault::registry::Registry;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;

/// Maximum relative path length in bytes (APFS limit)
pub const MAX_PATH_BYTES: usize = 255;

/// Substitute for `:`, U+A789 MODIFIER LETTER COLON.
/// Colons are path-illegal on the reference filesystem (macOS).
pub const COLON_SUBSTITUTE: char = '\u{A789}';

/// Substitute for `/`, U+2215 DIVISION SLASH.
/// Slashes are technically legal in macOS filenames but break path handling.
pub const SLASH_SUBSTITUTE: char = '\u{2215}';

/// Sanitize a title into a filename component.
///
/// Both substitutions are one-to-one, so the original title can be recovered
/// as long as it did not already contain the look-alike characters.
pub fn filename_component(title: &str) -> String {
    title
        .replace(':', &COLON_SUBSTITUTE.to_string())
        .replace('/', &SLASH_SUBSTITUTE.to_string())
}

/// Derived path data for one item
#[derive(Debug, Clone, PartialEq)]
pub struct PathInfo {
    /// Sanitized title; empty for headings
    pub filename: String,
    /// Relative path below the output root; `None` for headings
    pub path: Option<PathBuf>,
}

/// Assign a unique relative path to every non-heading item.
///
/// Runs after hierarchy resolution; every parent link in `parents` must
/// reference a registered item. The result is deterministic: the collision
/// rewrite depends only on each item's own identifier, never on map
/// iteration order.
pub fn assign(
    registry: &Registry,
    parents: &ParentMap,
) -> Result<BTreeMap<String, PathInfo>, ResolveError> {
    // Walk up from every non-heading item, collecting its raw path (for
    // collision detection) and its nearest non-heading ancestor (for final
    // path assembly).
    let mut raw: BTreeMap<String, String> = BTreeMap::new();
    let mut dir_parent: BTreeMap<String, Option<String>> = BTreeMap::new();

    for item in registry.items() {
        if item.kind == ItemKind::Heading {
            continue;
        }

        let mut segments = vec![filename_component(&item.title)];
        let mut nearest: Option<String> = None;
        let mut visited: HashSet<&str> = HashSet::from([item.uuid.as_str()]);
        let mut current = item.uuid.as_str();

        while let Some(parent_id) = parents.get(current).and_then(|p| p.as_deref()) {
            if !visited.insert(parent_id) {
                return Err(ResolveError::ParentCycle(item.uuid.clone()));
            }
            let parent = registry
                .get(parent_id)
                .ok_or_else(|| ResolveError::UnknownParent {
                    item: current.to_string(),
                    parent: parent_id.to_string(),
                })?;
            // Headings own no directory; their children attach to the
            // owning project's path
            if parent.kind != ItemKind::Heading {
                segments.push(filename_component(&parent.title));
                if nearest.is_none() {
                    nearest = Some(parent_id.to_string());
                }
            }
            current = parent_id;
        }

        segments.reverse();
        raw.insert(item.uuid.clone(), segments.join("/"));
        dir_parent.insert(item.uuid.clone(), nearest);
    }

    // Two distinct items resolving to the same raw path each get their
    // identifier appended to their own segment; identifiers are unique, so
    // one pass suffices.
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for path in raw.values() {
        *counts.entry(path.as_str()).or_default() += 1;
    }

    let mut segment: BTreeMap<String, String> = BTreeMap::new();
    for item in registry.items() {
        if item.kind == ItemKind::Heading {
            continue;
        }
        let mut own = filename_component(&item.title);
        if let Some(path) = raw.get(&item.uuid)
            && counts[path.as_str()] > 1
        {
            own = format!("{}-{}", own, item.uuid);
        }
        segment.insert(item.uuid.clone(), own);
    }

    // Final paths are assembled from each ancestor's *final* segment, so a
    // rewritten container carries its descendants with it.
    let mut finals: BTreeMap<String, String> = BTreeMap::new();
    let mut seen_paths: HashSet<String> = HashSet::new();
    let mut resolved = BTreeMap::new();

    for id in segment.keys() {
        let path = assemble(id, &dir_parent, &segment, &mut finals);
        if path.len() > MAX_PATH_BYTES {
            return Err(ResolveError::PathTooLong {
                id: id.clone(),
                path,
            });
        }
        if !seen_paths.insert(path.clone()) {
            return Err(ResolveError::PathCollision(path));
        }
        resolved.insert(
            id.clone(),
            PathInfo {
                filename: segment[id].clone(),
                path: Some(PathBuf::from(path)),
            },
        );
    }

    // Headings get an empty filename component and no standalone path
    for item in registry.items() {
        if item.kind == ItemKind::Heading {
            resolved.insert(
                item.uuid.clone(),
                PathInfo {
                    filename: String::new(),
                    path: None,
                },
            );
        }
    }

    Ok(resolved)
}

/// Join an item's final segment onto its nearest non-heading ancestor's
/// final path, memoized. Cycles were ruled out during the raw walk.
fn assemble(
    id: &str,
    dir_parent: &BTreeMap<String, Option<String>>,
    segment: &BTreeMap<String, String>,
    finals: &mut BTreeMap<String, String>,
) -> String {
    if let Some(done) = finals.get(id) {
        return done.clone();
    }
    let path = match dir_parent.get(id).and_then(|p| p.as_deref()) {
        Some(parent_id) => format!(
            "{}/{}",
            assemble(parent_id, dir_parent, segment, finals),
            segment[id]
        ),
        None => segment[id].clone(),
    };
    finals.insert(id.to_string(), path.clone());
    path
}
