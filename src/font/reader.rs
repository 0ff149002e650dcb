//! Naming-table extraction.
//!
//! The sorter only needs family/subfamily records, so readers return those
//! and nothing else. The file is read into memory and closed before parsing,
//! so no handle is open when the file is later moved.

use read_fonts::tables::name::NameId;
use read_fonts::{FontRef, TableProvider};
use std::fs;
use std::path::Path;
use tracing::trace;

use crate::errors::{Result, SortError};
use crate::naming::{NameKind, NamingRecord};

/// Source of naming records for a font file.
pub trait FontMetadataReader {
    /// Fails with [`SortError::UnreadableFont`] on malformed or unsupported files.
    fn read_name_records(&self, path: &Path) -> Result<Vec<NamingRecord>>;
}

/// Reader backed by `read-fonts`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadFontsReader;

impl FontMetadataReader for ReadFontsReader {
    fn read_name_records(&self, path: &Path) -> Result<Vec<NamingRecord>> {
        let unreadable = |reason: String| SortError::UnreadableFont {
            path: path.to_path_buf(),
            reason,
        };

        let data = fs::read(path).map_err(|e| unreadable(format!("read failed: {e}")))?;
        let font = FontRef::new(&data).map_err(|e| unreadable(format!("not an sfnt font: {e}")))?;
        let name_table = font
            .name()
            .map_err(|e| unreadable(format!("missing or malformed name table: {e}")))?;
        let strings = name_table.string_data();

        let records = name_table
            .name_record()
            .iter()
            .filter_map(|record| {
                let kind = name_kind(record.name_id())?;
                let platform_id = record.platform_id();
                let encoding_id = record.encoding_id();
                let text = if is_decodable(platform_id, encoding_id) {
                    record.string(strings).ok().map(|s| s.to_string())
                } else {
                    None
                };
                Some(NamingRecord {
                    name: kind,
                    platform_id,
                    encoding_id,
                    language_id: record.language_id(),
                    text,
                })
            })
            .collect::<Vec<_>>();

        trace!(path = %path.display(), records = records.len(), "read naming records");
        Ok(records)
    }
}

fn name_kind(id: NameId) -> Option<NameKind> {
    if id == NameId::FAMILY_NAME {
        Some(NameKind::Family)
    } else if id == NameId::SUBFAMILY_NAME {
        Some(NameKind::Subfamily)
    } else {
        None
    }
}

/// Encodings we can turn into text: Unicode platform, Windows UCS-2/UCS-4/symbol, Mac Roman.
fn is_decodable(platform_id: u16, encoding_id: u16) -> bool {
    matches!((platform_id, encoding_id), (0, _) | (3, 0) | (3, 1) | (3, 10) | (1, 0))
}
