//! Naming and listing of persisted markdown documents.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::model::IssueType;
use crate::ports::FileSystem;

/// Filename prefix shared by every persisted document.
const FILE_PREFIX: &str = "jira_tickets_";

/// One persisted document found by [`list_documents`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    /// File name within the listed directory.
    pub name: String,
    /// Last-modified time.
    pub modified: DateTime<Utc>,
}

/// Builds the timestamped filename for a new document:
/// `jira_tickets_<key>_<type>_<YYYYMMDD_HHMMSS>.md`.
#[must_use]
pub fn document_filename(
    project_key: &str,
    issue_type: IssueType,
    timestamp: DateTime<Utc>,
) -> String {
    format!(
        "{FILE_PREFIX}{project_key}_{issue_type}_{}.md",
        timestamp.format("%Y%m%d_%H%M%S")
    )
}

/// Lists persisted documents in `dir`, newest first.
///
/// A missing directory is an empty listing, not an error.
///
/// # Errors
///
/// Returns an error string when the directory or file metadata cannot be
/// read.
pub fn list_documents(fs: &dyn FileSystem, dir: &Path) -> Result<Vec<DocumentEntry>, String> {
    if !fs.exists(dir) {
        return Ok(Vec::new());
    }
    let names = fs
        .list_dir(dir)
        .map_err(|e| format!("Failed to list {}: {e}", dir.display()))?;

    let mut entries = Vec::new();
    for name in names {
        if !(name.starts_with(FILE_PREFIX) && name.ends_with(".md")) {
            continue;
        }
        let modified = fs
            .modified(&dir.join(&name))
            .map_err(|e| format!("Failed to stat {name}: {e}"))?;
        entries.push(DocumentEntry { name, modified });
    }
    entries.sort_by(|a, b| b.modified.cmp(&a.modified));
    Ok(entries)
}

/// Returns the path of the most recently modified document in `dir`, if any.
///
/// # Errors
///
/// Same conditions as [`list_documents`].
pub fn latest_document(fs: &dyn FileSystem, dir: &Path) -> Result<Option<PathBuf>, String> {
    Ok(list_documents(fs, dir)?.into_iter().next().map(|entry| dir.join(entry.name)))
}
