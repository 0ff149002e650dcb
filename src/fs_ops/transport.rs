//! File transport: the copy/move primitives the sorter drives.
//!
//! `FsTransport` performs real transfers; `DryRunTransport` only logs them.

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use super::atomic::try_atomic_move;
use super::copy::safe_copy_and_rename;
use super::helpers::io_error_with_help;
use super::meta::preserve_metadata;
use super::util::is_cross_device;
use crate::config::TransferMode;
use crate::errors::Result;

pub trait FileTransport {
    /// Create `dir` (and parents) if missing.
    fn ensure_dir(&self, dir: &Path) -> Result<()>;
    /// Copy `src` to `dst`; `src` is left untouched.
    fn copy_file(&self, src: &Path, dst: &Path) -> Result<()>;
    /// Move `src` to `dst`; `src` is removed only after `dst` is complete.
    fn move_file(&self, src: &Path, dst: &Path) -> Result<()>;

    fn transfer(&self, mode: TransferMode, src: &Path, dst: &Path) -> Result<()> {
        match mode {
            TransferMode::Copy => self.copy_file(src, dst),
            TransferMode::Move => self.move_file(src, dst),
        }
    }
}

/// Transport on the local filesystem.
#[derive(Debug, Clone, Copy)]
pub struct FsTransport {
    /// Keep timestamps/permissions on copies.
    pub preserve_metadata: bool,
}

impl Default for FsTransport {
    fn default() -> Self {
        Self {
            preserve_metadata: true,
        }
    }
}

impl FileTransport for FsTransport {
    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if !dir.is_dir() {
            debug!(path = %dir.display(), "creating folder");
            fs::create_dir_all(dir).map_err(io_error_with_help("create folder", dir))?;
        }
        Ok(())
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> Result<()> {
        safe_copy_and_rename(src, dst).map_err(io_error_with_help("copy", src))?;
        if self.preserve_metadata
            && let Err(e) = preserve_metadata(src, dst)
        {
            warn!(dst = %dst.display(), error = %e, "could not preserve file metadata");
        }
        info!(src = %src.display(), dst = %dst.display(), "copied");
        Ok(())
    }

    fn move_file(&self, src: &Path, dst: &Path) -> Result<()> {
        match try_atomic_move(src, dst) {
            Ok(()) => {
                info!(src = %src.display(), dst = %dst.display(), "renamed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(io_error_with_help("move", dst)(e))
            }
            Err(e) => {
                let hint = if is_cross_device(&e) {
                    "cross-filesystem; will copy instead"
                } else {
                    "falling back to copy"
                };
                warn!(error = %e, hint, "rename failed, using copy+remove");
                safe_copy_and_rename(src, dst).map_err(io_error_with_help("copy", src))?;
                if let Err(e) = preserve_metadata(src, dst) {
                    debug!(dst = %dst.display(), error = %e, "could not preserve file metadata");
                }
                fs::remove_file(src).map_err(io_error_with_help("remove original file", src))?;
                info!(src = %src.display(), dst = %dst.display(), "copied and removed source");
                Ok(())
            }
        }
    }
}

/// Transport that touches nothing; used for `--dry-run`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunTransport;

impl FileTransport for DryRunTransport {
    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        info!(action = "mkdir -p", path = %dir.display(), "dry-run");
        Ok(())
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> Result<()> {
        info!(src = %src.display(), dst = %dst.display(), "dry-run: would copy");
        Ok(())
    }

    fn move_file(&self, src: &Path, dst: &Path) -> Result<()> {
        info!(src = %src.display(), dst = %dst.display(), "dry-run: would move");
        Ok(())
    }
}
