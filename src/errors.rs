//! Typed error definitions for font_sort.
//! Configuration failures are fatal and abort before any file is touched;
//! font and transfer failures are recovered per file by the sorter.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SortError {
    #[error("Target root does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("Target root is not a directory: {0}")]
    RootNotDirectory(PathBuf),

    #[error("Keyword file not found (searched: {})", display_paths(.searched))]
    KeywordFileNotFound { searched: Vec<PathBuf> },

    #[error("No font files (.ttf, .otf, .ttc, .otc, .woff, .woff2, .fon) found under {0}")]
    NoFontsFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unreadable font {path}: {reason}")]
    UnreadableFont { path: PathBuf, reason: String },

    #[error("{op} '{}': {source}", .path.display())]
    Transfer {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl SortError {
    /// Stable numeric code used in structured logs and as the process exit code.
    pub fn code(&self) -> i32 {
        match self {
            SortError::RootNotFound(_) => 2,
            SortError::RootNotDirectory(_) => 3,
            SortError::KeywordFileNotFound { .. } => 4,
            SortError::NoFontsFound(_) => 5,
            SortError::InvalidConfig(_) => 6,
            SortError::UnreadableFont { .. } => 10,
            SortError::Transfer { .. } => 11,
            SortError::Interrupted => 130,
        }
    }

    /// Fatal errors abort the run; the rest only fail the current file.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            SortError::UnreadableFont { .. } | SortError::Transfer { .. }
        )
    }

    pub(crate) fn transfer(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        SortError::Transfer {
            op,
            path: path.into(),
            source,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "<none>".into();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, SortError>;
