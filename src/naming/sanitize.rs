//! Filesystem-safe names.

/// Where the sanitized name will be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameContext {
    Folder,
    File,
}

const ILLEGAL: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Remove characters illegal on common filesystems.
///
/// File names additionally lose leading/trailing dots and spaces. Returns
/// `None` when nothing usable is left, so the caller can fall back.
pub fn sanitize(name: &str, context: NameContext) -> Option<String> {
    let cleaned: String = name
        .chars()
        .filter(|c| !ILLEGAL.contains(c) && (*c as u32) >= 0x20)
        .collect();
    let mut cleaned = cleaned.trim();
    if context == NameContext::File {
        cleaned = cleaned.trim_matches(|c| c == '.' || c == ' ');
    }

    match cleaned {
        "" | "." | ".." => None,
        s => Some(s.to_owned()),
    }
}
