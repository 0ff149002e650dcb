//! Extension-based classification. Metadata is never consulted here.

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// TrueType/OpenType font sorted by its family name.
    RegularFont,
    /// TrueType/OpenType collection (.ttc, .otc).
    Collection,
    /// WOFF/WOFF2 web font.
    WebFont,
    /// Windows bitmap font (.fon).
    BitmapFont,
}

impl Classification {
    /// Classify by extension (case-insensitive). `None` means "not a font we sort".
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "ttf" | "otf" => Some(Classification::RegularFont),
            "ttc" | "otc" => Some(Classification::Collection),
            "woff" | "woff2" => Some(Classification::WebFont),
            "fon" => Some(Classification::BitmapFont),
            _ => None,
        }
    }

    /// Family label recorded in the audit log for containers.
    pub fn container_label(self) -> Option<&'static str> {
        match self {
            Classification::RegularFont => None,
            Classification::Collection => Some("TTC Collection"),
            Classification::WebFont => Some("WOFF Font"),
            Classification::BitmapFont => Some("FON Font"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_extensions() {
        assert_eq!(Classification::from_path(Path::new("a/Roboto.TTF")), Some(Classification::RegularFont));
        assert_eq!(Classification::from_path(Path::new("b.otf")), Some(Classification::RegularFont));
        assert_eq!(Classification::from_path(Path::new("c.ttc")), Some(Classification::Collection));
        assert_eq!(Classification::from_path(Path::new("d.woff2")), Some(Classification::WebFont));
        assert_eq!(Classification::from_path(Path::new("e.fon")), Some(Classification::BitmapFont));
    }

    #[test]
    fn ignores_everything_else() {
        assert_eq!(Classification::from_path(Path::new("readme.txt")), None);
        assert_eq!(Classification::from_path(Path::new("ttf")), None);
    }

    #[test]
    fn only_containers_carry_a_label() {
        assert_eq!(Classification::RegularFont.container_label(), None);
        assert_eq!(Classification::WebFont.container_label(), Some("WOFF Font"));
        assert_eq!(Classification::BitmapFont.container_label(), Some("FON Font"));
    }
}
