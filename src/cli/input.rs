//! Input discovery for the load command
//!
//! Paths given on the command line are either sheet files, taken as they
//! are, or directories searched recursively for CSV exports.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expand the given paths into a sorted, de-duplicated list of sheet files
pub fn discover_sheets(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut sheets = Vec::new();

    for path in paths {
        if path.is_file() {
            sheets.push(path.clone());
        } else if path.is_dir() {
            sheets.extend(
                discover_csv_files(path)
                    .with_context(|| format!("Failed to search {}", path.display()))?,
            );
        } else {
            anyhow::bail!("Input path does not exist: {}", path.display());
        }
    }

    sheets.sort();
    sheets.dedup();
    Ok(sheets)
}

/// Find CSV files below a directory
pub fn discover_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.context("Failed to walk directory")?;
        if entry.file_type().is_file() && is_csv(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
