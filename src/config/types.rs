//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.
//! - TransferMode / DuplicatePolicy are the run-wide sorting choices.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;

use super::{
    AUDIT_LOG_FILE_NAME, BITMAP_FONT_FOLDER_DEFAULT, COLLECTION_FOLDER_DEFAULT,
    QUARANTINE_FOLDER_DEFAULT, WEB_FONT_FOLDER_DEFAULT,
};
use crate::font::Classification;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Whether sorted files are copied or moved out of their source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TransferMode {
    #[default]
    Copy,
    Move,
}

impl FromStr for TransferMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "copy" => Ok(TransferMode::Copy),
            "m" | "move" => Ok(TransferMode::Move),
            other => Err(format!("invalid transfer mode: '{other}'")),
        }
    }
}

/// What to do when a file's intended destination is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DuplicatePolicy {
    /// Divert the file, under its original name, into the quarantine folder.
    #[default]
    Quarantine,
    /// Keep the intended folder and append `_n` to the file name.
    Suffix,
}

impl FromStr for DuplicatePolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quarantine" | "skip" => Ok(DuplicatePolicy::Quarantine),
            "suffix" | "rename" => Ok(DuplicatePolicy::Suffix),
            other => Err(format!("invalid duplicate policy: '{other}'")),
        }
    }
}

/// Folder names (relative to the root) reserved for containers and duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedFolders {
    pub collection: String,
    pub web_font: String,
    pub bitmap_font: String,
    pub quarantine: String,
}

impl Default for ReservedFolders {
    fn default() -> Self {
        Self {
            collection: COLLECTION_FOLDER_DEFAULT.into(),
            web_font: WEB_FONT_FOLDER_DEFAULT.into(),
            bitmap_font: BITMAP_FONT_FOLDER_DEFAULT.into(),
            quarantine: QUARANTINE_FOLDER_DEFAULT.into(),
        }
    }
}

impl ReservedFolders {
    /// Fixed folder for a container kind; `None` for regular fonts.
    pub fn for_classification(&self, class: Classification) -> Option<&str> {
        match class {
            Classification::RegularFont => None,
            Classification::Collection => Some(&self.collection),
            Classification::WebFont => Some(&self.web_font),
            Classification::BitmapFont => Some(&self.bitmap_font),
        }
    }

    /// True when `name` is one of the reserved folder names.
    pub fn contains(&self, name: &str) -> bool {
        [&self.collection, &self.web_font, &self.bitmap_font, &self.quarantine]
            .iter()
            .any(|f| f.as_str() == name)
    }
}

/// Runtime configuration used by the sorter.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the tree to sort; family folders are created directly below it
    pub root: PathBuf,
    /// Copy or move
    pub mode: TransferMode,
    /// Rename files to "Family Subfamily.ext"
    pub rename: bool,
    /// Write a CSV audit log
    pub audit_log: bool,
    /// Explicit audit log location (default: `<root>/FontSortLog.csv`)
    pub audit_log_path: Option<PathBuf>,
    /// Explicit keyword file (default: searched, see `paths::keyword_file_candidates`)
    pub keywords_file: Option<PathBuf>,
    /// Collision strategy
    pub on_duplicate: DuplicatePolicy,
    /// Subfamily used when a font has none
    pub subfamily_default: String,
    /// Reserved folder names
    pub reserved: ReservedFolders,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a diagnostic log file
    pub log_file: Option<PathBuf>,
    /// If true, report actions but do not modify the filesystem
    pub dry_run: bool,
    /// If true, copies keep permissions and timestamps of the source
    pub preserve_metadata: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            mode: TransferMode::Copy,
            rename: false,
            audit_log: false,
            audit_log_path: None,
            keywords_file: None,
            on_duplicate: DuplicatePolicy::Quarantine,
            subfamily_default: "Regular".into(),
            reserved: ReservedFolders::default(),
            log_level: LogLevel::Normal,
            log_file: None,
            dry_run: false,
            preserve_metadata: true,
        }
    }
}

impl Config {
    /// Construct a Config for `root`; other fields use defaults.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Effective audit log path, if audit logging is enabled.
    pub fn effective_audit_log_path(&self) -> Option<PathBuf> {
        if !self.audit_log {
            return None;
        }
        Some(
            self.audit_log_path
                .clone()
                .unwrap_or_else(|| self.root.join(AUDIT_LOG_FILE_NAME)),
        )
    }

    /// Quarantine folder under the root.
    pub fn quarantine_dir(&self) -> PathBuf {
        self.root.join(&self.reserved.quarantine)
    }

    /// Whether `dir` is one of the reserved folders directly below the root.
    pub fn is_reserved_dir(&self, dir: &Path) -> bool {
        dir.parent() == Some(self.root.as_path())
            && dir
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| self.reserved.contains(n))
    }
}
