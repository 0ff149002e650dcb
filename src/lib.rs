//! Core library for `font_sort`.
//!
//! Sorts a tree of font files into per-family folders named after the
//! families recorded in each font's naming table. Collections, web fonts and
//! bitmap fonts go to fixed folders; clashes are quarantined or suffixed.
//!
//! Modules:
//! - naming: name resolution, keyword stripping, sanitization
//! - font: classification and naming-table reader
//! - plan: destination planning
//! - fs_ops: collision resolution and file transport
//! - sorter: per-file pipeline and run summary
//! - config, discovery, audit, output, shutdown, errors

pub mod audit;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod font;
pub mod fs_ops;
pub mod naming;
pub mod output;
pub mod plan;
pub mod shutdown;
pub mod sorter;

pub use audit::{AuditLog, OutcomeSink};
pub use config::{Config, DuplicatePolicy, LogLevel, TransferMode};
pub use discovery::{Candidate, discover};
pub use errors::SortError;
pub use font::{Classification, FontMetadataReader, ReadFontsReader};
pub use fs_ops::{ClaimedPathSet, DiskProbe, DryRunTransport, FileTransport, FsTransport};
pub use naming::{KeywordFilter, NameContext, ResolvedName, sanitize};
pub use plan::{DestinationPlan, Planner};
pub use sorter::{Action, Outcome, RunReport, RunSummary, Sorter};
