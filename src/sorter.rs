//! Sort orchestration: the per-file pipeline and run-wide bookkeeping.
//!
//! For each candidate: classify, read names (regular fonts only), plan,
//! resolve collisions, create the folder, transfer, record an [`Outcome`].
//! A failure at any stage fails only that file.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::audit::OutcomeSink;
use crate::config::{Config, TransferMode};
use crate::discovery::Candidate;
use crate::errors::SortError;
use crate::font::{Classification, FontMetadataReader};
use crate::fs_ops::{ClaimedPathSet, FileTransport, FilesystemProbe, resolve_target};
use crate::naming::{KeywordFilter, ResolvedName, resolve_name};
use crate::plan::Planner;
use crate::shutdown;

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Copied,
    Moved,
    /// Transferred under a different file name.
    Renamed(TransferMode),
    /// Already in place, or diverted to quarantine because its target was taken.
    SkippedDuplicate,
    Failed,
}

impl Action {
    fn transferred(mode: TransferMode, renamed: bool) -> Self {
        match (mode, renamed) {
            (mode, true) => Action::Renamed(mode),
            (TransferMode::Copy, false) => Action::Copied,
            (TransferMode::Move, false) => Action::Moved,
        }
    }

    /// Label used in the audit log and console.
    pub fn label(self) -> &'static str {
        match self {
            Action::Copied => "Copied",
            Action::Moved => "Moved",
            Action::Renamed(TransferMode::Copy) => "Copied & Renamed",
            Action::Renamed(TransferMode::Move) => "Moved & Renamed",
            Action::SkippedDuplicate => "SkippedDuplicate",
            Action::Failed => "Error",
        }
    }
}

/// Record of one processed file. `final_path` is `None` only for failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub action: Action,
    pub original_path: PathBuf,
    pub final_path: Option<PathBuf>,
    pub family: Option<String>,
    pub subfamily: Option<String>,
    pub destination_folder: Option<PathBuf>,
    pub detail: String,
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub scanned: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Set when the run stopped early on Ctrl-C.
    pub interrupted: bool,
}

impl RunSummary {
    fn count(&mut self, action: Action) {
        match action {
            Action::Copied | Action::Moved | Action::Renamed(_) => self.succeeded += 1,
            Action::SkippedDuplicate => self.skipped += 1,
            Action::Failed => self.failed += 1,
        }
    }
}

/// Outcomes in processing order plus the counters.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<Outcome>,
    pub summary: RunSummary,
}

/// Names as they appear in the outcome.
struct Labels {
    family: Option<String>,
    subfamily: Option<String>,
}

pub struct Sorter<'a> {
    cfg: &'a Config,
    keywords: &'a KeywordFilter,
    reader: &'a dyn FontMetadataReader,
    transport: &'a dyn FileTransport,
    probe: &'a dyn FilesystemProbe,
    claimed: ClaimedPathSet,
}

impl<'a> Sorter<'a> {
    pub fn new(
        cfg: &'a Config,
        keywords: &'a KeywordFilter,
        reader: &'a dyn FontMetadataReader,
        transport: &'a dyn FileTransport,
        probe: &'a dyn FilesystemProbe,
    ) -> Self {
        Self {
            cfg,
            keywords,
            reader,
            transport,
            probe,
            claimed: ClaimedPathSet::new(),
        }
    }

    /// Process every candidate in order. `audit` receives each outcome as it is
    /// produced; `progress` is called with (index, total, outcome).
    pub fn run(
        &mut self,
        candidates: &[Candidate],
        mut audit: Option<&mut dyn OutcomeSink>,
        mut progress: impl FnMut(usize, usize, &Outcome),
    ) -> RunReport {
        let mut report = RunReport::default();
        let total = candidates.len();

        for (i, candidate) in candidates.iter().enumerate() {
            if shutdown::is_requested() {
                warn!(processed = i, total, "interrupted; remaining files left untouched");
                report.summary.interrupted = true;
                break;
            }

            let outcome = self.process(candidate);
            report.summary.scanned += 1;
            report.summary.count(outcome.action);

            if let Some(sink) = audit.as_deref_mut()
                && let Err(e) = sink.record(&outcome)
            {
                warn!(error = %e, "failed to write audit log row");
            }
            progress(i + 1, total, &outcome);
            report.outcomes.push(outcome);
        }

        info!(
            scanned = report.summary.scanned,
            succeeded = report.summary.succeeded,
            skipped = report.summary.skipped,
            failed = report.summary.failed,
            "run finished"
        );
        report
    }

    /// Run the pipeline for a single file. Never fails; errors become
    /// [`Action::Failed`] outcomes.
    pub fn process(&mut self, candidate: &Candidate) -> Outcome {
        let path = candidate.path.as_path();
        debug!(path = %path.display(), class = ?candidate.classification, "processing");

        let name = match candidate.classification {
            Classification::RegularFont => match self.reader.read_name_records(path) {
                Ok(records) => Some(resolve_name(&records, path, &self.cfg.subfamily_default)),
                Err(e) => return failed(path, Labels { family: None, subfamily: None }, None, &e),
            },
            _ => None,
        };
        let labels = labels_for(candidate.classification, name.as_ref());

        let planner = Planner {
            root: &self.cfg.root,
            reserved: &self.cfg.reserved,
            keywords: self.keywords,
        };
        let plan = planner.plan(path, candidate.classification, name.as_ref(), self.cfg.rename);
        let ideal = plan.ideal_path();
        debug!(ideal = %ideal.display(), "planned");

        let original_name = path.file_name().unwrap_or(plan.file_name.as_os_str());
        let target = resolve_target(
            path,
            &plan,
            original_name,
            self.cfg.on_duplicate,
            &self.cfg.quarantine_dir(),
            &mut self.claimed,
            self.probe,
        );
        let folder = target
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| plan.folder.clone());

        if target.path == path {
            debug!(path = %path.display(), "already in place");
            return Outcome {
                action: Action::SkippedDuplicate,
                original_path: path.to_path_buf(),
                final_path: Some(target.path),
                family: labels.family,
                subfamily: labels.subfamily,
                destination_folder: Some(folder),
                detail: "already in place".into(),
            };
        }

        if let Err(e) = self
            .transport
            .ensure_dir(&folder)
            .and_then(|()| self.transport.transfer(self.cfg.mode, path, &target.path))
        {
            return failed(path, labels, Some(folder), &e);
        }

        let final_name = target.path.file_name().unwrap_or_default();
        let (action, detail) = if target.is_duplicate_skip {
            (
                Action::SkippedDuplicate,
                format!("target '{}' already exists; quarantined", ideal.display()),
            )
        } else {
            let renamed = final_name != original_name;
            let detail = if target.path != ideal {
                format!("target '{}' already exists; saved as '{}'", ideal.display(), final_name.to_string_lossy())
            } else if renamed {
                format!("renamed from '{}'", original_name.to_string_lossy())
            } else {
                String::new()
            };
            (Action::transferred(self.cfg.mode, renamed), detail)
        };

        Outcome {
            action,
            original_path: path.to_path_buf(),
            final_path: Some(target.path),
            family: labels.family,
            subfamily: labels.subfamily,
            destination_folder: Some(folder),
            detail,
        }
    }
}

fn labels_for(class: Classification, name: Option<&ResolvedName>) -> Labels {
    match (class.container_label(), name) {
        (Some(label), _) => Labels {
            family: Some(label.to_owned()),
            subfamily: None,
        },
        (None, Some(n)) => Labels {
            family: Some(n.family.clone()),
            subfamily: Some(n.subfamily.clone()),
        },
        (None, None) => Labels {
            family: None,
            subfamily: None,
        },
    }
}

fn failed(path: &Path, labels: Labels, folder: Option<PathBuf>, err: &SortError) -> Outcome {
    warn!(path = %path.display(), code = err.code(), error = %err, "file failed; continuing");
    Outcome {
        action: Action::Failed,
        original_path: path.to_path_buf(),
        final_path: None,
        family: labels.family,
        subfamily: labels.subfamily,
        destination_folder: folder,
        detail: err.to_string(),
    }
}
