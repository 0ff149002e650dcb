//! Candidate discovery: recursive walk of the root collecting font files.
//!
//! The full list is collected up front so files transferred during the run are
//! never picked up a second time.

use std::path::PathBuf;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::errors::{Result, SortError};
use crate::font::Classification;

/// A file scheduled for sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub classification: Classification,
}

fn is_apple_double(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|n| n.starts_with("._"))
}

/// Walk `cfg.root` (sorted by file name) and return every font file outside
/// the reserved folders. Unreadable directory entries are logged and skipped.
pub fn discover(cfg: &Config) -> Result<Vec<Candidate>> {
    let mut out = Vec::new();
    let walker = WalkDir::new(&cfg.root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && cfg.is_reserved_dir(e.path())));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry during scan");
                continue;
            }
        };
        if !entry.file_type().is_file() || is_apple_double(&entry) {
            continue;
        }
        if let Some(classification) = Classification::from_path(entry.path()) {
            out.push(Candidate {
                path: entry.into_path(),
                classification,
            });
        }
    }

    debug!(root = %cfg.root.display(), found = out.len(), "scan complete");
    if out.is_empty() {
        return Err(SortError::NoFontsFound(cfg.root.clone()));
    }
    Ok(out)
}
