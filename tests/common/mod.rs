//! Shared fixtures: synthesized fonts and sorting helpers.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use font_sort::{
    Config, DiskProbe, FsTransport, KeywordFilter, ReadFontsReader, RunReport, Sorter, discover,
};

/// One naming record: (platform, encoding, language, name id, text).
pub type Record<'a> = (u16, u16, u16, u16, &'a str);

fn encode(platform: u16, text: &str) -> Vec<u8> {
    match platform {
        // Mac Roman; fixtures stay ASCII
        1 => text.bytes().collect(),
        _ => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
    }
}

/// Minimal TrueType file containing only a format 0 `name` table.
pub fn font_with_records(records: &[Record<'_>]) -> Vec<u8> {
    let mut storage = Vec::new();
    let mut entries = Vec::new();
    for &(platform, encoding, language, name_id, text) in records {
        let bytes = encode(platform, text);
        entries.push((platform, encoding, language, name_id, bytes.len() as u16, storage.len() as u16));
        storage.extend(bytes);
    }

    let mut name = Vec::new();
    name.extend(0u16.to_be_bytes());
    name.extend((entries.len() as u16).to_be_bytes());
    name.extend((6 + 12 * entries.len() as u16).to_be_bytes());
    for (p, e, l, n, len, off) in entries {
        for v in [p, e, l, n, len, off] {
            name.extend(v.to_be_bytes());
        }
    }
    name.extend(storage);

    let table_offset: u32 = 12 + 16;
    let mut font = Vec::new();
    font.extend(0x0001_0000u32.to_be_bytes());
    font.extend(1u16.to_be_bytes()); // numTables
    font.extend(16u16.to_be_bytes()); // searchRange
    font.extend(0u16.to_be_bytes()); // entrySelector
    font.extend(0u16.to_be_bytes()); // rangeShift
    font.extend(*b"name");
    font.extend(0u32.to_be_bytes()); // checksum (unchecked)
    font.extend(table_offset.to_be_bytes());
    font.extend((name.len() as u32).to_be_bytes());
    font.extend(name);
    while font.len() % 4 != 0 {
        font.push(0);
    }
    font
}

/// Font with Windows en-US family and subfamily records.
pub fn simple_font(family: &str, subfamily: &str) -> Vec<u8> {
    font_with_records(&[(3, 1, 0x409, 1, family), (3, 1, 0x409, 2, subfamily)])
}

pub fn write_font(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, bytes).unwrap();
}

pub fn write_keywords(dir: &Path, keywords: &[&str]) -> PathBuf {
    let path = dir.join("keywords.txt");
    let mut body = String::from("# style keywords\n\n");
    for k in keywords {
        body.push_str(k);
        body.push('\n');
    }
    fs::write(&path, body).unwrap();
    path
}

/// Canonical root so planned paths compare equal to discovered ones.
pub fn canonical(dir: &Path) -> PathBuf {
    dunce::canonicalize(dir).unwrap()
}

/// Discover and sort `cfg.root` with the real reader and transport.
pub fn sort_tree(cfg: &Config, keywords: &[&str]) -> RunReport {
    let kw = KeywordFilter::new(keywords).unwrap();
    let candidates = discover(cfg).unwrap();
    let transport = FsTransport {
        preserve_metadata: cfg.preserve_metadata,
    };
    let mut sorter = Sorter::new(cfg, &kw, &ReadFontsReader, &transport, &DiskProbe);
    sorter.run(&candidates, None, |_, _, _| {})
}
