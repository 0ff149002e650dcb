//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Only fields present in the file override defaults; CLI flags are applied later.
//!
//! Notes:
//! - Unknown XML fields are rejected to surface misconfigurations early.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::default_config_path;
use super::types::{Config, DuplicatePolicy, LogLevel, TransferMode};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    root: Option<String>,
    mode: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    rename: Option<bool>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    audit_log: Option<bool>,
    audit_log_path: Option<String>,
    keywords_file: Option<String>,
    on_duplicate: Option<String>,
    subfamily_default: Option<String>,
    collection_folder: Option<String>,
    web_font_folder: Option<String>,
    bitmap_font_folder: Option<String>,
    quarantine_folder: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    preserve_metadata: Option<bool>,
}

// Custom deserializer that trims surrounding whitespace for optional bools
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }))
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

// Map XmlConfig onto an existing Config (fields absent in XML keep their value)
fn apply_xml(parsed: XmlConfig, cfg: &mut Config) -> Result<()> {
    if let Some(root) = non_empty(parsed.root) {
        cfg.root = PathBuf::from(root);
    }
    if let Some(mode) = non_empty(parsed.mode) {
        cfg.mode = mode.parse::<TransferMode>().map_err(anyhow::Error::msg)?;
    }
    if let Some(rename) = parsed.rename {
        cfg.rename = rename;
    }
    if let Some(audit) = parsed.audit_log {
        cfg.audit_log = audit;
    }
    if let Some(p) = non_empty(parsed.audit_log_path) {
        cfg.audit_log_path = Some(PathBuf::from(p));
    }
    if let Some(p) = non_empty(parsed.keywords_file) {
        cfg.keywords_file = Some(PathBuf::from(p));
    }
    if let Some(policy) = non_empty(parsed.on_duplicate) {
        cfg.on_duplicate = policy.parse::<DuplicatePolicy>().map_err(anyhow::Error::msg)?;
    }
    if let Some(s) = non_empty(parsed.subfamily_default) {
        cfg.subfamily_default = s;
    }
    if let Some(s) = non_empty(parsed.collection_folder) {
        cfg.reserved.collection = s;
    }
    if let Some(s) = non_empty(parsed.web_font_folder) {
        cfg.reserved.web_font = s;
    }
    if let Some(s) = non_empty(parsed.bitmap_font_folder) {
        cfg.reserved.bitmap_font = s;
    }
    if let Some(s) = non_empty(parsed.quarantine_folder) {
        cfg.reserved.quarantine = s;
    }
    if let Some(level) = non_empty(parsed.log_level) {
        cfg.log_level = level.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
    }
    if let Some(p) = non_empty(parsed.log_file) {
        cfg.log_file = Some(PathBuf::from(p));
    }
    if let Some(preserve) = parsed.preserve_metadata {
        cfg.preserve_metadata = preserve;
    }
    Ok(())
}

/// Load a Config from a specific XML file path, starting from defaults.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    let mut cfg = Config::default();
    apply_xml(parsed, &mut cfg)
        .with_context(|| format!("invalid value in config xml '{}'", path.display()))?;
    Ok(cfg)
}

/// Load the config from the default location. `Ok(None)` when no file exists.
pub fn load_config_from_xml() -> Result<Option<Config>> {
    let Some(path) = default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(None);
    }
    let cfg = load_config_from_xml_path(&path)?;
    debug!(path = %path.display(), "loaded config file");
    Ok(Some(cfg))
}
