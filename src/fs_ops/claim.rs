//! Destinations reserved during the current run.
//! A path is claimed as soon as it is chosen, before the file is transferred,
//! so two sources can never be planned onto the same target.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone)]
pub struct ClaimedPathSet {
    paths: HashSet<PathBuf>,
}

impl ClaimedPathSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    /// Claim `path`; returns false if it was already claimed.
    pub fn claim(&mut self, path: impl Into<PathBuf>) -> bool {
        self.paths.insert(path.into())
    }
}
