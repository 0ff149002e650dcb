//! Family/subfamily resolution from raw naming-table records.
//!
//! Records are ranked into four tiers; the first usable record seen in a tier
//! keeps that tier, and the best non-empty tier wins:
//! 1. Windows (platform 3), language en-US (0x0409)
//! 2. Windows, Unicode BMP encoding (1)
//! 3. Macintosh (platform 1), Roman encoding (0)
//! 4. anything else

use std::path::Path;

/// Windows platform id.
const PLATFORM_WINDOWS: u16 = 3;
/// Macintosh platform id.
const PLATFORM_MAC: u16 = 1;
const LANG_EN_US: u16 = 0x0409;
const ENC_WINDOWS_UNICODE_BMP: u16 = 1;
const ENC_MAC_ROMAN: u16 = 0;

/// Name ids this crate cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    Family = 1,
    Subfamily = 2,
}

/// One entry of a font's naming table.
///
/// `text` is `None` when the record's encoding could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingRecord {
    pub name: NameKind,
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub text: Option<String>,
}

impl NamingRecord {
    pub fn new(
        name: NameKind,
        platform_id: u16,
        encoding_id: u16,
        language_id: u16,
        text: impl Into<String>,
    ) -> Self {
        Self {
            name,
            platform_id,
            encoding_id,
            language_id,
            text: Some(text.into()),
        }
    }

    fn tier(&self) -> usize {
        match (self.platform_id, self.encoding_id, self.language_id) {
            (PLATFORM_WINDOWS, _, LANG_EN_US) => 0,
            (PLATFORM_WINDOWS, ENC_WINDOWS_UNICODE_BMP, _) => 1,
            (PLATFORM_MAC, ENC_MAC_ROMAN, _) => 2,
            _ => 3,
        }
    }
}

/// Family and subfamily of a single font. Family is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub family: String,
    pub subfamily: String,
}

/// Pick the best string for `kind` from `records`, or `None` when nothing usable exists.
pub fn resolve(records: &[NamingRecord], kind: NameKind) -> Option<String> {
    let mut tiers: [Option<&str>; 4] = [None; 4];

    for record in records.iter().filter(|r| r.name == kind) {
        let Some(text) = record.text.as_deref() else {
            continue;
        };
        if text.trim().is_empty() {
            continue;
        }
        let slot = &mut tiers[record.tier()];
        if slot.is_none() {
            *slot = Some(text);
        }
    }

    tiers.into_iter().flatten().next().map(str::to_owned)
}

/// Resolve family and subfamily for the font at `path`.
///
/// Family falls back to the file stem, subfamily to `subfamily_default`.
pub fn resolve_name(records: &[NamingRecord], path: &Path, subfamily_default: &str) -> ResolvedName {
    let family = resolve(records, NameKind::Family).unwrap_or_else(|| file_stem_or_unknown(path));
    let subfamily =
        resolve(records, NameKind::Subfamily).unwrap_or_else(|| subfamily_default.to_owned());
    ResolvedName { family, subfamily }
}

pub(crate) fn file_stem_or_unknown(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "Unknown".to_owned())
}
