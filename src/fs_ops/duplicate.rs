//! Collision resolution for planned destinations.
//!
//! Policy:
//! - Quarantine: an occupied ideal target diverts the file into the quarantine
//!   folder under its original name, disambiguated with `_n` there.
//! - Suffix: an occupied ideal target keeps the planned folder and appends `_n`
//!   to the planned file name.
//!
//! A target counts as occupied when it exists on disk or was already claimed
//! earlier in the run. The source file's own path is never occupied by
//! itself, so a file sorted by an earlier run resolves back to where it is.
//! The chosen path is claimed before returning.

use std::ffi::{OsStr, OsString};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use super::claim::ClaimedPathSet;
use crate::config::DuplicatePolicy;
use crate::plan::DestinationPlan;

/// Existence check used by the resolver (the real disk, or a fake in tests).
pub trait FilesystemProbe {
    fn exists(&self, path: &Path) -> bool;
}

/// Probe backed by the filesystem. Paths whose existence cannot be determined
/// count as occupied so they are never overwritten. A path below a
/// non-directory does not exist.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskProbe;

impl FilesystemProbe for DiskProbe {
    fn exists(&self, path: &Path) -> bool {
        match path.try_exists() {
            Ok(exists) => exists,
            Err(e) => e.kind() != ErrorKind::NotADirectory,
        }
    }
}

/// Final destination for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub path: PathBuf,
    /// True when the file was diverted to quarantine.
    pub is_duplicate_skip: bool,
}

/// Pick a free destination for the file at `source` according to `policy`
/// and claim it.
pub fn resolve_target(
    source: &Path,
    plan: &DestinationPlan,
    original_name: &OsStr,
    policy: DuplicatePolicy,
    quarantine_dir: &Path,
    claimed: &mut ClaimedPathSet,
    probe: &dyn FilesystemProbe,
) -> Target {
    let ideal = plan.ideal_path();
    let occupied =
        |p: &Path, claimed: &ClaimedPathSet| claimed.contains(p) || (p != source && probe.exists(p));

    let target = if !occupied(&ideal, claimed) {
        Target {
            path: ideal,
            is_duplicate_skip: false,
        }
    } else {
        match policy {
            DuplicatePolicy::Quarantine => {
                let path = unique_with_numeric_suffix(quarantine_dir, original_name, |p| {
                    occupied(p, claimed)
                });
                debug!(ideal = %ideal.display(), quarantined = %path.display(), "target occupied; quarantining");
                Target {
                    path,
                    is_duplicate_skip: true,
                }
            }
            DuplicatePolicy::Suffix => {
                let path = unique_with_numeric_suffix(&plan.folder, &plan.file_name, |p| {
                    occupied(p, claimed)
                });
                debug!(ideal = %ideal.display(), renamed = %path.display(), "target occupied; suffixing");
                Target {
                    path,
                    is_duplicate_skip: false,
                }
            }
        }
    };

    claimed.claim(target.path.clone());
    target
}

/// Return `dir/name` if free, else the first free `stem_n.ext` for n = 1, 2, ...
///
/// Examples:
/// - "Roboto.ttf" -> "Roboto_1.ttf", "Roboto_2.ttf", ...
/// - ".hidden" -> ".hidden_1"
/// - "font.v2.otf" -> "font.v2_1.otf"
pub fn unique_with_numeric_suffix(
    dir: &Path,
    name: &OsStr,
    mut occupied: impl FnMut(&Path) -> bool,
) -> PathBuf {
    let base = Path::new(name);
    let stem: OsString = base
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| name.to_os_string());
    let ext: Option<OsString> = base.extension().map(|e| e.to_os_string());

    let first = dir.join(build_name_with_suffix(&stem, ext.as_deref(), ""));
    if !occupied(&first) {
        return first;
    }

    const MAX_TRIES: u64 = 100_000;
    let mut n: u64 = 1;
    loop {
        let candidate = dir.join(build_name_with_suffix(&stem, ext.as_deref(), &format!("_{n}")));
        if !occupied(&candidate) {
            return candidate;
        }
        if n == 3 {
            trace!(name = ?name, dir = %dir.display(), "duplicate: multiple collisions, continuing to search");
        }
        if n >= MAX_TRIES {
            return dir.join(build_name_with_suffix(&stem, ext.as_deref(), "_final"));
        }
        n += 1;
    }
}

// Conservative filename limits (bytes/characters, platform-specific and approximate).
#[cfg(windows)]
const MAX_FILENAME_LEN: usize = 240; // leave headroom for legacy MAX_PATH
#[cfg(not(windows))]
const MAX_FILENAME_LEN: usize = 255; // typical POSIX/EXT limits

#[cfg(unix)]
fn name_len_units(s: &OsStr) -> usize {
    use std::os::unix::ffi::OsStrExt;
    s.as_bytes().len()
}

#[cfg(not(unix))]
fn name_len_units(s: &OsStr) -> usize {
    s.to_string_lossy().len()
}

/// Truncate the stem if needed so `stem + suffix + ["." + ext]` fits within MAX_FILENAME_LEN.
fn build_name_with_suffix(stem: &OsStr, ext: Option<&OsStr>, suffix: &str) -> OsString {
    let mut overhead = suffix.len();
    let mut ext_part = OsString::new();
    if let Some(e) = ext {
        overhead = overhead.saturating_add(1 + name_len_units(e));
        ext_part.push(".");
        ext_part.push(e);
    }

    let mut stem_os = stem.to_os_string();
    if name_len_units(&stem_os) + overhead > MAX_FILENAME_LEN {
        let budget = MAX_FILENAME_LEN.saturating_sub(overhead).max(1);
        let lossy = stem.to_string_lossy();
        let mut acc = String::new();
        for ch in lossy.chars() {
            if acc.len() + ch.len_utf8() > budget {
                break;
            }
            acc.push(ch);
        }
        if acc.is_empty() {
            acc.push('f');
        }
        stem_os = OsString::from(acc);
    }

    let mut new_name = stem_os;
    new_name.push(suffix);
    new_name.push(&ext_part);
    new_name
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct FakeDisk(HashSet<PathBuf>);

    impl FilesystemProbe for FakeDisk {
        fn exists(&self, path: &Path) -> bool {
            self.0.contains(path)
        }
    }

    fn plan(folder: &str, file: &str) -> DestinationPlan {
        DestinationPlan {
            folder: PathBuf::from(folder),
            file_name: OsString::from(file),
            is_reserved_container: false,
        }
    }

    #[test]
    fn free_ideal_path_is_used_and_claimed() {
        let disk = FakeDisk(HashSet::new());
        let mut claimed = ClaimedPathSet::new();
        let t = resolve_target(
            Path::new("/r/incoming/x.ttf"),
            &plan("/r/Roboto", "Roboto Bold.ttf"),
            OsStr::new("Roboto-Bold.ttf"),
            DuplicatePolicy::Quarantine,
            Path::new("/r/00 Skipped"),
            &mut claimed,
            &disk,
        );
        assert_eq!(t.path, PathBuf::from("/r/Roboto/Roboto Bold.ttf"));
        assert!(!t.is_duplicate_skip);
        assert!(claimed.contains(&t.path));
    }

    #[test]
    fn quarantine_keeps_original_name() {
        let disk = FakeDisk(
            [
                PathBuf::from("/r/Roboto/Roboto Bold.ttf"),
                PathBuf::from("/r/00 Skipped/Roboto-Bold.ttf"),
            ]
            .into_iter()
            .collect(),
        );
        let mut claimed = ClaimedPathSet::new();
        let t = resolve_target(
            Path::new("/r/incoming/x.ttf"),
            &plan("/r/Roboto", "Roboto Bold.ttf"),
            OsStr::new("Roboto-Bold.ttf"),
            DuplicatePolicy::Quarantine,
            Path::new("/r/00 Skipped"),
            &mut claimed,
            &disk,
        );
        assert_eq!(t.path, PathBuf::from("/r/00 Skipped/Roboto-Bold_1.ttf"));
        assert!(t.is_duplicate_skip);
    }

    #[test]
    fn suffix_policy_stays_in_family_folder() {
        let disk = FakeDisk([PathBuf::from("/r/Lato/Lato.ttf")].into_iter().collect());
        let mut claimed = ClaimedPathSet::new();
        claimed.claim("/r/Lato/Lato_1.ttf");
        let t = resolve_target(
            Path::new("/r/incoming/x.ttf"),
            &plan("/r/Lato", "Lato.ttf"),
            OsStr::new("lato.ttf"),
            DuplicatePolicy::Suffix,
            Path::new("/r/00 Skipped"),
            &mut claimed,
            &disk,
        );
        assert_eq!(t.path, PathBuf::from("/r/Lato/Lato_2.ttf"));
        assert!(!t.is_duplicate_skip);
    }

    #[test]
    fn source_already_at_a_suffixed_name_resolves_to_itself() {
        let disk = FakeDisk(
            [PathBuf::from("/r/Inter/Inter.otf"), PathBuf::from("/r/Inter/Inter_1.otf")]
                .into_iter()
                .collect(),
        );
        let mut claimed = ClaimedPathSet::new();
        let t = resolve_target(
            Path::new("/r/Inter/Inter_1.otf"),
            &plan("/r/Inter", "Inter.otf"),
            OsStr::new("Inter_1.otf"),
            DuplicatePolicy::Suffix,
            Path::new("/r/00 Skipped"),
            &mut claimed,
            &disk,
        );
        assert_eq!(t.path, PathBuf::from("/r/Inter/Inter_1.otf"));
        assert!(claimed.contains(&t.path));

        // a different source still sees that name as taken
        let t = resolve_target(
            Path::new("/r/incoming/Inter.otf"),
            &plan("/r/Inter", "Inter.otf"),
            OsStr::new("Inter.otf"),
            DuplicatePolicy::Suffix,
            Path::new("/r/00 Skipped"),
            &mut claimed,
            &disk,
        );
        assert_eq!(t.path, PathBuf::from("/r/Inter/Inter_2.otf"));
    }

    #[test]
    fn n_colliding_files_get_distinct_paths() {
        let disk = FakeDisk(HashSet::new());
        for policy in [DuplicatePolicy::Quarantine, DuplicatePolicy::Suffix] {
            let mut claimed = ClaimedPathSet::new();
            let mut seen = HashSet::new();
            let mut in_ideal = 0;
            for _ in 0..5 {
                let t = resolve_target(
                    Path::new("/r/incoming/Inter.otf"),
                    &plan("/r/Inter", "Inter.otf"),
                    OsStr::new("Inter.otf"),
                    policy,
                    Path::new("/r/00 Skipped"),
                    &mut claimed,
                    &disk,
                );
                if t.path == Path::new("/r/Inter/Inter.otf") {
                    in_ideal += 1;
                }
                assert!(seen.insert(t.path), "duplicate final path under {policy:?}");
            }
            assert_eq!(in_ideal, 1);
        }
    }

    #[test]
    fn disk_probe_treats_paths_below_a_file_as_free() {
        let td = tempfile::tempdir().unwrap();
        let file = td.path().join("Roboto");
        std::fs::write(&file, b"x").unwrap();
        assert!(DiskProbe.exists(&file));
        assert!(!DiskProbe.exists(&file.join("Roboto Bold.ttf")));
        assert!(!DiskProbe.exists(&td.path().join("missing.ttf")));
    }

    #[test]
    fn suffix_goes_before_last_extension() {
        let p = unique_with_numeric_suffix(Path::new("/d"), OsStr::new("font.v2.otf"), |p| {
            p == Path::new("/d/font.v2.otf")
        });
        assert_eq!(p, PathBuf::from("/d/font.v2_1.otf"));

        let p = unique_with_numeric_suffix(Path::new("/d"), OsStr::new(".hidden"), |p| {
            p == Path::new("/d/.hidden")
        });
        assert_eq!(p, PathBuf::from("/d/.hidden_1"));
    }

    #[test]
    fn overlong_names_are_trimmed() {
        let long = format!("{}.ttf", "a".repeat(400));
        let p = unique_with_numeric_suffix(Path::new("/d"), OsStr::new(&long), |_| false);
        let name = p.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.len() <= 255);
        assert!(name.ends_with(".ttf"));
    }
}
