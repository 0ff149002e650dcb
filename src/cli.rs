//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - CLI flags override values loaded from config.xml.
//! - --debug is a shorthand for --log-level debug.
//! - --audit-log-path implies --audit-log.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, DuplicatePolicy, LogLevel, TransferMode};

/// Sort a folder of fonts into per-family directories.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "font_sort",
    author,
    version,
    about = "Sort fonts into per-family folders using their embedded names"
)]
pub struct Args {
    /// Root folder to sort (defaults to the configured root, else the current directory).
    #[arg(value_name = "ROOT", value_hint = ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Copy (default) or move files into their family folders.
    #[arg(long, value_enum, help = "Transfer mode: copy or move")]
    pub mode: Option<TransferMode>,

    /// Rename files to "Family Subfamily.ext".
    #[arg(long, help = "Rename files to 'Family Subfamily.ext'")]
    pub rename: bool,

    /// Write a CSV audit log (default `<ROOT>/FontSortLog.csv`).
    #[arg(long, help = "Write a CSV audit log of every processed file")]
    pub audit_log: bool,

    /// Audit log location; implies --audit-log.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub audit_log_path: Option<PathBuf>,

    /// Keyword list (one style keyword per line).
    #[arg(long = "keywords", value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub keywords_file: Option<PathBuf>,

    /// What to do when the destination file already exists.
    #[arg(long, value_enum, help = "Duplicate handling: quarantine or suffix")]
    pub on_duplicate: Option<DuplicatePolicy>,

    /// Subfamily used for fonts that do not name one.
    #[arg(long, value_name = "NAME")]
    pub subfamily_default: Option<String>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also write diagnostic logs to this file.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Dry-run: report actions but do not modify the filesystem.
    #[arg(
        long,
        help = "Show what would be done, but do not create folders or transfer files"
    )]
    pub dry_run: bool,

    /// Do not copy timestamps and permissions onto copied files.
    #[arg(long, help = "Do not preserve timestamps and permissions on copies")]
    pub no_preserve_metadata: bool,

    /// Print where font_sort looks for its config file, then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(root) = &self.root {
            cfg.root = root.clone();
        }
        if let Some(mode) = self.mode {
            cfg.mode = mode;
        }
        if self.rename {
            cfg.rename = true;
        }
        if self.audit_log {
            cfg.audit_log = true;
        }
        if let Some(p) = &self.audit_log_path {
            cfg.audit_log = true;
            cfg.audit_log_path = Some(p.clone());
        }
        if let Some(p) = &self.keywords_file {
            cfg.keywords_file = Some(p.clone());
        }
        if let Some(policy) = self.on_duplicate {
            cfg.on_duplicate = policy;
        }
        if let Some(s) = self.subfamily_default.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            cfg.subfamily_default = s.to_owned();
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(p) = &self.log_file {
            cfg.log_file = Some(p.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.no_preserve_metadata {
            cfg.preserve_metadata = false;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
