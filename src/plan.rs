//! Destination planning.
//!
//! Pure function of the font's classification, its resolved names and the
//! configuration: the filesystem is never consulted here.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::config::ReservedFolders;
use crate::font::Classification;
use crate::naming::resolver::file_stem_or_unknown;
use crate::naming::{KeywordFilter, NameContext, ResolvedName, sanitize};

/// Subfamilies that do not add anything to a file name.
const REGULAR_EQUIVALENTS: &[&str] = &["regular", "normal", "roman", "plain"];

/// Where a file should go before collisions are considered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationPlan {
    pub folder: PathBuf,
    pub file_name: OsString,
    pub is_reserved_container: bool,
}

impl DestinationPlan {
    pub fn ideal_path(&self) -> PathBuf {
        self.folder.join(&self.file_name)
    }
}

/// Inputs shared by every plan of a run.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    pub root: &'a Path,
    pub reserved: &'a ReservedFolders,
    pub keywords: &'a KeywordFilter,
}

impl Planner<'_> {
    /// Plan the destination of `file`. `name` is only used for regular fonts.
    pub fn plan(
        &self,
        file: &Path,
        classification: Classification,
        name: Option<&ResolvedName>,
        rename: bool,
    ) -> DestinationPlan {
        let original_name = file
            .file_name()
            .map(OsStr::to_os_string)
            .unwrap_or_else(|| OsString::from(file_stem_or_unknown(file)));

        if let Some(folder) = self.reserved.for_classification(classification) {
            return DestinationPlan {
                folder: self.root.join(folder),
                file_name: original_name,
                is_reserved_container: true,
            };
        }

        let stem = file_stem_or_unknown(file);
        let (folder_name, file_name) = match name {
            Some(name) => {
                let file_name = if rename {
                    renamed_file_name(name, file).unwrap_or(original_name)
                } else {
                    original_name
                };
                (self.folder_name(&name.family, &stem), file_name)
            }
            None => (self.folder_name(&stem, &stem), original_name),
        };

        DestinationPlan {
            folder: self.root.join(folder_name),
            file_name,
            is_reserved_container: false,
        }
    }

    /// Keyword-stripped, title-cased family; then the raw family; then the stem.
    pub fn folder_name(&self, family: &str, stem: &str) -> String {
        sanitize(&self.keywords.strip(family), NameContext::Folder)
            .or_else(|| sanitize(family, NameContext::Folder))
            .or_else(|| sanitize(stem, NameContext::Folder))
            .unwrap_or_else(|| "Unknown".to_owned())
    }
}

/// "Family Subfamily.ext", or "Family.ext" when the subfamily adds nothing.
/// `None` when the result does not survive sanitization.
fn renamed_file_name(name: &ResolvedName, file: &Path) -> Option<OsString> {
    let sub = name.subfamily.to_lowercase();
    let base = if REGULAR_EQUIVALENTS.contains(&sub.trim())
        || name.family.to_lowercase().contains(&sub)
    {
        name.family.clone()
    } else {
        format!("{} {}", name.family, name.subfamily)
    };

    let candidate = match file.extension() {
        Some(ext) => format!("{base}.{}", ext.to_string_lossy()),
        None => base,
    };
    sanitize(&candidate, NameContext::File).map(OsString::from)
}
