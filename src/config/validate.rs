//! Config validation logic.
//! Verifies the root exists, is a readable directory, and canonicalizes it so
//! every planned destination is an absolute path.

use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use super::types::Config;
use crate::errors::{Result, SortError};

/// Validate the root and replace it with its canonical form.
pub fn validate_and_normalize(cfg: &mut Config) -> Result<()> {
    ensure_dir_exists_and_is_dir(&cfg.root)?;
    ensure_readable(&cfg.root)?;

    cfg.root = dunce::canonicalize(&cfg.root).map_err(|e| {
        SortError::InvalidConfig(format!("cannot resolve root '{}': {e}", cfg.root.display()))
    })?;

    if cfg.reserved.contains("") {
        return Err(SortError::InvalidConfig("reserved folder names must not be empty".into()));
    }

    info!(
        root = %cfg.root.display(),
        mode = ?cfg.mode,
        rename = cfg.rename,
        on_duplicate = ?cfg.on_duplicate,
        dry_run = cfg.dry_run,
        "Config validated"
    );
    Ok(())
}

/// Ensure path exists and is a directory; emit clear errors with path context.
fn ensure_dir_exists_and_is_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        error!("root does not exist: {}", path.display());
        return Err(SortError::RootNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        error!("root is not a directory: {}", path.display());
        return Err(SortError::RootNotDirectory(path.to_path_buf()));
    }
    Ok(())
}

/// Ensure directory is readable by attempting to open its entries.
fn ensure_readable(path: &Path) -> Result<()> {
    fs::read_dir(path).map_err(|e| {
        SortError::InvalidConfig(format!("cannot read root '{}': {e}", path.display()))
    })?;
    debug!("root readable: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_root_is_fatal() {
        let td = tempfile::tempdir().unwrap();
        let mut cfg = Config::new(td.path().join("absent"));
        let err = validate_and_normalize(&mut cfg).unwrap_err();
        assert!(matches!(err, SortError::RootNotFound(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn file_root_is_rejected() {
        let td = tempfile::tempdir().unwrap();
        let f = td.path().join("file.ttf");
        fs::write(&f, b"x").unwrap();
        let mut cfg = Config::new(&f);
        assert!(matches!(
            validate_and_normalize(&mut cfg).unwrap_err(),
            SortError::RootNotDirectory(_)
        ));
    }

    #[test]
    fn root_becomes_absolute() {
        let td = tempfile::tempdir().unwrap();
        let nested = td.path().join("a");
        fs::create_dir(&nested).unwrap();
        let mut cfg = Config::new(nested.join("..").join("a"));
        validate_and_normalize(&mut cfg).unwrap();
        assert!(cfg.root.is_absolute());
        assert_eq!(cfg.root, dunce::canonicalize(&nested).unwrap());
    }
}
