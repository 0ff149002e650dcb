//! Default path helpers.
//! Determines the OS-appropriate config path and where the keyword list is looked up.

use dirs::config_dir;
use std::env;
use std::path::{Path, PathBuf};

use super::{CONFIG_ENV, KEYWORDS_FILE_NAME};
use crate::errors::{Result, SortError};

/// Config path: `$FONT_SORT_CONFIG` if set, else the OS config dir.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(p));
    }
    if let Some(mut base) = config_dir() {
        base.push("font_sort");
        base.push("config.xml");
        Some(base)
    } else {
        env::var("HOME").ok().map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join("font_sort")
                .join("config.xml")
        })
    }
}

/// Default keyword file locations, in search order:
/// next to the executable, the font_sort config dir, the working directory.
pub fn keyword_file_candidates() -> Vec<PathBuf> {
    let mut out = Vec::new();
    if let Some(dir) = env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        out.push(dir.join(KEYWORDS_FILE_NAME));
    }
    if let Some(dir) = config_dir() {
        out.push(dir.join("font_sort").join(KEYWORDS_FILE_NAME));
    }
    out.push(PathBuf::from(KEYWORDS_FILE_NAME));
    out
}

/// Locate the keyword file. An explicit path must exist; otherwise the first
/// existing default candidate wins.
pub fn find_keyword_file(explicit: Option<&Path>) -> Result<PathBuf> {
    let candidates = match explicit {
        Some(p) => vec![p.to_path_buf()],
        None => keyword_file_candidates(),
    };
    match candidates.iter().position(|p| p.is_file()) {
        Some(i) => Ok(candidates[i].clone()),
        None => Err(SortError::KeywordFileNotFound {
            searched: candidates,
        }),
    }
}
