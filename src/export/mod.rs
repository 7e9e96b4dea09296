//! Rendering and writing of the resolved vault

pub mod markdown;
pub mod writer;

pub use markdown::{render, render_list};
pub use writer::{ExportStats, export};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while rendering or writing the output tree
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Output directory already exists: {0}")]
    OutputExists(PathBuf),
    #[error("Unknown item: {0}")]
    UnknownItem(String),
}

/// Append the Markdown extension to a resolved path.
///
/// `Path::with_extension` would clip anything after a dot in the title, so
/// the suffix is appended to the final segment verbatim.
pub fn md_file(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".md");
    PathBuf::from(os)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md_file() {
        assert_eq!(md_file(Path::new("Work/Launch")), Path::new("Work/Launch.md"));
        assert_eq!(
            md_file(Path::new("Inbox/v2.0 release")),
            Path::new("Inbox/v2.0 release.md")
        );
    }
}
