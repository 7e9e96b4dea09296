//! Markdown rendering
//!
//! Every non-heading item renders to a Markdown document with YAML
//! frontmatter. To-dos carry their notes and checklist; containers carry
//! their notes and a link list of their children. Headings render inline as
//! sections of their owning project's document.

use crate::export::{ExportError, md_file};
use crate::models::{DATE_FORMAT, DATETIME_FORMAT, Item, ItemKind};
use crate::vault::Vault;
use serde::Serialize;

/// Frontmatter delimiter
const FRONTMATTER_DELIMITER: &str = "---";

/// Frontmatter fields; absent source fields are omitted from the output
#[derive(Serialize)]
struct Frontmatter<'a> {
    uuid: &'a str,
    title: &'a str,
    #[serde(rename = "type")]
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    area_title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    heading_title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_date: Option<String>,
}

impl<'a> Frontmatter<'a> {
    fn from_item(item: &'a Item) -> Self {
        Frontmatter {
            uuid: &item.uuid,
            title: &item.title,
            kind: item.kind.to_string(),
            status: item.status.map(|s| s.to_string()),
            area_title: item.area_title.as_deref(),
            project_title: item.project_title.as_deref(),
            heading_title: item.heading_title.as_deref(),
            created: item.created.map(|d| d.format(DATETIME_FORMAT).to_string()),
            modified: item.modified.map(|d| d.format(DATETIME_FORMAT).to_string()),
            deadline: item.deadline.map(|d| d.format(DATE_FORMAT).to_string()),
            start_date: item.start_date.map(|d| d.format(DATETIME_FORMAT).to_string()),
            stop_date: item.stop_date.map(|d| d.format(DATETIME_FORMAT).to_string()),
        }
    }
}

/// Render the Markdown document for an item
pub fn render(id: &str, vault: &Vault) -> Result<String, ExportError> {
    let item = vault
        .item(id)
        .ok_or_else(|| ExportError::UnknownItem(id.to_string()))?;

    let frontmatter = serde_yaml::to_string(&Frontmatter::from_item(item))?;
    let mut out = String::new();
    out.push_str(FRONTMATTER_DELIMITER);
    out.push('\n');
    out.push_str(&frontmatter);
    out.push_str(FRONTMATTER_DELIMITER);
    out.push('\n');

    if let Some(notes) = &item.notes
        && !notes.is_empty()
    {
        out.push('\n');
        out.push_str(notes.trim_end());
        out.push('\n');
    }

    match item.kind {
        ItemKind::ToDo => render_checklist(item, &mut out),
        ItemKind::Area | ItemKind::Project | ItemKind::Inbox => {
            render_child_links(id, vault, &mut out)
        }
        ItemKind::Heading => {}
    }

    Ok(out)
}

/// Lists whose pages order members by `today_index` instead of list order
const TODAY_ORDERED: [&str; 2] = ["Today", "Upcoming"];

/// Frontmatter for a list-view page
#[derive(Serialize)]
struct ListFrontmatter<'a> {
    title: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
}

/// Render the Markdown page for a named source list: a link per member,
/// ordered by `today_index` for the Today and Upcoming views.
pub fn render_list(name: &str, vault: &Vault) -> Result<String, ExportError> {
    let frontmatter = serde_yaml::to_string(&ListFrontmatter {
        title: name,
        kind: "list",
    })?;
    let mut out = String::new();
    out.push_str(FRONTMATTER_DELIMITER);
    out.push('\n');
    out.push_str(&frontmatter);
    out.push_str(FRONTMATTER_DELIMITER);
    out.push('\n');

    let mut members: Vec<&String> = vault.list(name).unwrap_or_default().iter().collect();
    if TODAY_ORDERED.contains(&name) {
        members.sort_by_key(|id| {
            let today_index = vault.item(id).and_then(|i| i.today_index).unwrap_or(0);
            (today_index, (*id).clone())
        });
    }

    if !members.is_empty() {
        out.push('\n');
        for id in members {
            if let Some(item) = vault.item(id)
                && let Some(path) = vault.path(id)
            {
                out.push_str(&format!(
                    "- [{}]({})\n",
                    item.title,
                    md_file(path).display()
                ));
            }
        }
    }

    Ok(out)
}

fn render_checklist(item: &Item, out: &mut String) {
    if item.checklist.is_empty() {
        return;
    }
    out.push('\n');
    for entry in &item.checklist {
        let mark = if entry.is_completed() { 'x' } else { ' ' };
        out.push_str(&format!("- [{}] {}\n", mark, entry.title));
    }
}

/// Bullet links to every child, ordered by index. Heading children become
/// sections; their own children are linked beneath the section title.
fn render_child_links(id: &str, vault: &Vault, out: &mut String) {
    let children = vault.children(id);
    if children.is_empty() {
        return;
    }
    out.push('\n');
    for child_id in children {
        push_child(child_id, vault, out);
    }
}

fn push_child(child_id: &str, vault: &Vault, out: &mut String) {
    let Some(child) = vault.item(child_id) else {
        return;
    };
    if child.kind == ItemKind::Heading {
        out.push_str(&format!("\n### {}\n\n", child.title));
        for grandchild_id in vault.children(child_id) {
            push_child(grandchild_id, vault, out);
        }
    } else if let Some(path) = vault.path(child_id) {
        out.push_str(&format!(
            "- [{}]({})\n",
            child.title,
            md_file(path).display()
        ));
    }
}
