//! I/O helper utilities.
//!
//! Enriches io::Error with platform-aware hints and wraps it into
//! [`SortError::Transfer`] so per-file failures carry the operation and path.
//!
//! Usage:
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create folder", dir))?;

use std::io;
use std::path::Path;

use crate::errors::SortError;

/// Short hint for common failure causes, if any.
fn hint(e: &io::Error) -> Option<&'static str> {
    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            let h = match code {
                libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
                libc::EXDEV => Some("cross-filesystem; atomic rename not possible"),
                libc::ENOENT => Some("path not found; verify it exists"),
                libc::EEXIST => Some("already exists"),
                libc::ENOSPC => Some("insufficient space on device"),
                libc::EROFS => Some("read-only filesystem; cannot write here"),
                libc::ENAMETOOLONG => Some("filename or path too long; shorten path segments"),
                libc::EMFILE | libc::ENFILE => Some("too many open files"),
                _ => None,
            };
            if h.is_some() {
                return h;
            }
        }
        #[cfg(windows)]
        {
            let h = match code {
                5 => Some("access denied; check permissions"),
                17 => Some("not same device; cross-filesystem move"),
                32 => Some("sharing violation; file is in use"),
                2 | 3 => Some("path not found; verify it exists"),
                80 => Some("already exists"),
                112 => Some("insufficient disk space"),
                206 => Some("filename or path too long (MAX_PATH exceeded)"),
                _ => None,
            };
            if h.is_some() {
                return h;
            }
        }
        let _ = code;
    }
    match e.kind() {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; verify it exists"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        _ => None,
    }
}

/// io::Error with the hint folded into its message; the ErrorKind is preserved.
pub(crate) fn with_hint(e: io::Error) -> io::Error {
    match hint(&e) {
        Some(h) => io::Error::new(e.kind(), format!("{e} ({h})")),
        None => e,
    }
}

/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> SortError.
pub(crate) fn io_error_with_help<'a>(
    op: &'static str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> SortError + 'a {
    move |e: io::Error| SortError::transfer(op, path, with_hint(e))
}
