//! Safe copy-and-rename helper:
//! - Copies to a hidden temp file in the destination directory
//! - Syncs the temp file, then renames it into place
//! - A failed copy never leaves a partial file under the final name

use std::fs::{self, File};
use std::io;
use std::path::Path;

use super::atomic::try_atomic_move;
use super::util;

/// Copy `src` to `dest` through a temp file in `dest`'s directory.
pub(super) fn safe_copy_and_rename(src: &Path, dest: &Path) -> io::Result<()> {
    let dest_dir = dest.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("destination has no parent: {}", dest.display()),
        )
    })?;

    let tmp_path = util::unique_temp_path(dest_dir);
    let result = fs::copy(src, &tmp_path)
        .and_then(|_| File::open(&tmp_path)?.sync_all())
        .and_then(|_| try_atomic_move(&tmp_path, dest));

    if result.is_err() {
        // Best-effort cleanup of the temp file on failure.
        let _ = fs::remove_file(&tmp_path);
    }
    result
}
