use owo_colors::OwoColorize;
use std::path::Path;

use crate::sorter::{Action, Outcome, RunSummary};

/// Consistent, colored user-facing messages. Colors are enabled only when
/// output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {msg}");
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {msg}");
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {msg}");
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {msg}");
    }
}

fn name_of(p: &Path) -> String {
    p.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| p.display().to_string())
}

/// One progress line per file: `[i/total] Copied: a.ttf → b.ttf in 'Folder'`.
pub fn format_progress(index: usize, total: usize, o: &Outcome) -> String {
    let original = name_of(&o.original_path);
    let folder = o
        .destination_folder
        .as_deref()
        .map(name_of)
        .unwrap_or_default();
    match (o.action, o.final_path.as_deref()) {
        (Action::Failed, _) | (_, None) => {
            format!("[{index}/{total}] Error: {original}: {}", o.detail)
        }
        (Action::SkippedDuplicate, Some(dst)) => format!(
            "[{index}/{total}] Skipped: {original} → {} in '{folder}' ({})",
            name_of(dst),
            o.detail
        ),
        (action, Some(dst)) => format!(
            "[{index}/{total}] {}: {original} → {} in '{folder}'",
            action.label(),
            name_of(dst)
        ),
    }
}

pub fn print_progress(index: usize, total: usize, o: &Outcome) {
    let line = format_progress(index, total, o);
    match o.action {
        Action::Failed => print_warn(&line),
        _ => println!("{line}"),
    }
}

pub fn print_summary(summary: &RunSummary, audit_log: Option<&Path>, dry_run: bool) {
    let prefix = if dry_run { "Dry-run complete" } else { "Sort complete" };
    let msg = format!(
        "{prefix}: {} scanned, {} succeeded, {} skipped, {} failed",
        summary.scanned, summary.succeeded, summary.skipped, summary.failed
    );
    if summary.failed == 0 {
        print_success(&msg);
    } else {
        print_warn(&msg);
    }
    if let Some(p) = audit_log {
        print_info(&format!("Audit log: {}", p.display()));
    }
}
