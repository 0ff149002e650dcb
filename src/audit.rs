//! CSV audit log: one row per processed file.
//!
//! Rows are flushed as they are written so an interrupted run still leaves a
//! complete record of what was done.

use anyhow::{Context, Result};
use chrono::Local;
use csv::{Writer, WriterBuilder};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::sorter::Outcome;

const HEADER: [&str; 9] = [
    "Timestamp",
    "Action",
    "OriginalFile",
    "NewFile",
    "Family",
    "Subfamily",
    "DestinationFolder",
    "FinalPath",
    "Details",
];

/// Sink for outcomes as they are produced.
pub trait OutcomeSink {
    fn record(&mut self, outcome: &Outcome) -> Result<()>;
}

/// Appends outcomes to a CSV file, writing the header when the file is new.
pub struct AuditLog {
    path: PathBuf,
    writer: Writer<File>,
}

impl AuditLog {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create audit log folder '{}'", parent.display()))?;
        }
        let is_new = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open audit log '{}'", path.display()))?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if is_new {
            writer.write_record(HEADER)?;
            writer.flush()?;
        }
        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutcomeSink for AuditLog {
    fn record(&mut self, o: &Outcome) -> Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let file_name = |p: &Path| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        let final_path = o
            .final_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let new_file = o.final_path.as_deref().map(file_name).unwrap_or_default();
        let folder = o
            .destination_folder
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        let original = file_name(&o.original_path);

        self.writer
            .write_record([
                timestamp.as_str(),
                o.action.label(),
                original.as_str(),
                new_file.as_str(),
                o.family.as_deref().unwrap_or(""),
                o.subfamily.as_deref().unwrap_or(""),
                folder.as_str(),
                final_path.as_str(),
                o.detail.as_str(),
            ])
            .with_context(|| format!("write audit log '{}'", self.path.display()))?;
        self.writer.flush()?;
        Ok(())
    }
}
