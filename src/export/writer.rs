//! Output tree writer
//!
//! Walks the resolved vault and materializes it on disk: one directory per
//! container, one Markdown file per addressable item. Resolution has fully
//! completed before the first write, so a failed run never leaves a
//! partially resolved tree behind.

use crate::export::{ExportError, markdown, md_file};
use crate::models::ItemKind;
use crate::vault::Vault;
use std::path::Path;

/// Source lists that get a view page at the output root. Areas and No Area
/// only mirror the hierarchy; Inbox is covered by its synthetic container.
const LIST_PAGES: [&str; 5] = ["Today", "Upcoming", "Anytime", "Someday", "Logbook"];

/// Counts reported after a successful export
#[derive(Debug, Default, Clone)]
pub struct ExportStats {
    pub areas: usize,
    pub projects: usize,
    pub todos: usize,
    pub headings_skipped: usize,
    pub list_pages: usize,
    pub directories_created: usize,
    pub files_written: usize,
}

/// Write the vault below `output`.
///
/// The output directory must not exist yet; the transform targets a fresh
/// tree, never an incremental update.
pub fn export(vault: &Vault, output: &Path) -> Result<ExportStats, ExportError> {
    if output.exists() {
        return Err(ExportError::OutputExists(output.to_path_buf()));
    }
    std::fs::create_dir_all(output)?;

    let mut stats = ExportStats::default();

    // Directories first so every file write lands in an existing parent
    for (item, resolved) in vault.iter() {
        if item.is_container()
            && let Some(path) = &resolved.path
        {
            std::fs::create_dir_all(output.join(path))?;
            stats.directories_created += 1;
        }
    }

    for (item, resolved) in vault.iter() {
        match item.kind {
            ItemKind::Heading => {
                stats.headings_skipped += 1;
                continue;
            }
            ItemKind::Area => stats.areas += 1,
            ItemKind::Project => stats.projects += 1,
            ItemKind::ToDo => stats.todos += 1,
            ItemKind::Inbox => {}
        }

        if let Some(path) = &resolved.path {
            let content = markdown::render(&item.uuid, vault)?;
            std::fs::write(output.join(md_file(path)), content)?;
            stats.files_written += 1;
        }
    }

    for name in LIST_PAGES {
        let Some(members) = vault.list(name) else {
            continue;
        };
        if members.is_empty() {
            continue;
        }
        // An item whose path equals the list name already owns <name>.md
        if vault.iter().any(|(_, r)| r.path.as_deref() == Some(Path::new(name))) {
            log::warn!("Skipping list page '{}': an item already owns that path", name);
            continue;
        }
        let content = markdown::render_list(name, vault)?;
        std::fs::write(output.join(format!("{}.md", name)), content)?;
        stats.list_pages += 1;
        stats.files_written += 1;
    }

    log::debug!(
        "Exported {} files into {} directories",
        stats.files_written,
        stats.directories_created
    );

    Ok(stats)
}
