//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the Ctrl-C handler,
//! validates the root, loads keywords, discovers fonts and runs the sorter.

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use font_sort::audit::{AuditLog, OutcomeSink};
use font_sort::cli::Args;
use font_sort::config::{
    CONFIG_ENV, default_config_path, find_keyword_file, keyword_file_candidates,
    load_config_from_xml, validate_and_normalize,
};
use font_sort::output as out;
use font_sort::{
    Config, DiskProbe, DryRunTransport, FileTransport, FsTransport, KeywordFilter, ReadFontsReader,
    SortError, Sorter, discover, shutdown,
};

use crate::logging::init_tracing;

fn print_config_locations() {
    match std::env::var_os(CONFIG_ENV) {
        Some(p) => out::print_info(&format!(
            "Using {CONFIG_ENV} (explicit):\n  {}",
            std::path::Path::new(&p).display()
        )),
        None => match default_config_path() {
            Some(p) => {
                let state = if p.exists() { "exists" } else { "not created yet" };
                out::print_info(&format!("Config file ({state}):\n  {}", p.display()));
            }
            None => out::print_error("Could not determine a default config path"),
        },
    }
    let candidates = keyword_file_candidates()
        .iter()
        .map(|p| format!("  {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");
    out::print_info(&format!("Keyword file search order:\n{candidates}"));
}

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    if args.print_config {
        print_config_locations();
        return Ok(());
    }

    // XML first, then CLI overrides (CLI wins)
    let mut cfg = load_config_from_xml()?.unwrap_or_default();
    args.apply_overrides(&mut cfg);

    let guard_opt = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    ctrlc::set_handler(|| {
        shutdown::request();
        out::print_warn("Received interrupt; stopping after the current file...");
    })
    .context("install Ctrl-C handler")?;

    debug!("Starting font_sort: {:?}", args);

    let result = sort(&mut cfg);
    if let Err(e) = &result {
        match e.downcast_ref::<SortError>() {
            Some(se) => error!(code = se.code(), error = %se, "font_sort aborted"),
            None => error!(error = ?e, "font_sort aborted"),
        }
    }

    // Ensure logs are flushed before exit
    drop(guard_opt);

    result
}

fn sort(cfg: &mut Config) -> Result<()> {
    validate_and_normalize(cfg)?;

    let keyword_path = find_keyword_file(cfg.keywords_file.as_deref())?;
    let keywords = KeywordFilter::from_file(&keyword_path)?;
    info!(path = %keyword_path.display(), count = keywords.keywords().len(), "keywords loaded");

    let candidates = discover(cfg)?;
    out::print_info(&format!(
        "Found {} font file(s) under {}",
        candidates.len(),
        cfg.root.display()
    ));

    let mut audit = match cfg.effective_audit_log_path() {
        Some(_) if cfg.dry_run => {
            warn!("dry-run: audit log disabled");
            None
        }
        Some(path) => match AuditLog::open(&path) {
            Ok(log) => Some(log),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "audit log unavailable; continuing without it");
                out::print_warn(&format!("Could not create audit log: {e:#}"));
                None
            }
        },
        None => None,
    };

    let fs_transport = FsTransport {
        preserve_metadata: cfg.preserve_metadata,
    };
    let transport: &dyn FileTransport = if cfg.dry_run {
        &DryRunTransport
    } else {
        &fs_transport
    };

    let reader = ReadFontsReader;
    let report = {
        let mut sorter = Sorter::new(cfg, &keywords, &reader, transport, &DiskProbe);
        sorter.run(
            &candidates,
            audit.as_mut().map(|a| a as &mut dyn OutcomeSink),
            out::print_progress,
        )
    };

    out::print_summary(
        &report.summary,
        audit.as_ref().map(AuditLog::path),
        cfg.dry_run,
    );

    if report.summary.interrupted {
        return Err(SortError::Interrupted.into());
    }
    Ok(())
}
