//! `jiragen list` command: show persisted documents, newest first.

use std::path::Path;

use crate::adapters::live::LiveFileSystem;
use crate::markdown;
use crate::ports::filesystem::FileSystem;

/// Execute the `list` command.
///
/// # Errors
///
/// Returns an error string if the directory cannot be read.
pub fn run(dir: &Path) -> Result<(), String> {
    run_with_fs(&LiveFileSystem, dir)
}

/// Lists documents through the given filesystem.
///
/// # Errors
///
/// Returns an error string if the directory cannot be read.
pub fn run_with_fs(fs: &dyn FileSystem, dir: &Path) -> Result<(), String> {
    let entries = markdown::list_documents(fs, dir)?;
    if entries.is_empty() {
        println!("No ticket documents found in {}", dir.display());
        return Ok(());
    }
    for entry in entries {
        println!("{}  {}", entry.modified.format("%Y-%m-%d %H:%M:%S"), entry.name);
    }
    Ok(())
}
