//! Config module.
//! Provides configuration types, default paths, XML loading, keyword-file
//! lookup and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, find_keyword_file, keyword_file_candidates};
pub use types::{Config, DuplicatePolicy, LogLevel, ReservedFolders, TransferMode};
pub use validate::validate_and_normalize;
pub use xml::{load_config_from_xml, load_config_from_xml_path};

/// Environment variable pointing at an explicit config.xml.
pub const CONFIG_ENV: &str = "FONT_SORT_CONFIG";
/// Keyword list file name searched in the default locations.
pub const KEYWORDS_FILE_NAME: &str = "keywords.txt";
/// Audit log file name created at the root of the scanned tree.
pub const AUDIT_LOG_FILE_NAME: &str = "FontSortLog.csv";

pub const COLLECTION_FOLDER_DEFAULT: &str = "00 TrueType Collection Fonts";
pub const WEB_FONT_FOLDER_DEFAULT: &str = "00 woff";
pub const BITMAP_FONT_FOLDER_DEFAULT: &str = "00 fon";
pub const QUARANTINE_FOLDER_DEFAULT: &str = "00 Skipped";
