//! Full pipeline over real files: discovery, reader, planner, collisions, transport.

mod common;

use assert_fs::prelude::*;
use std::collections::HashSet;
use std::fs;

use common::{canonical, simple_font, sort_tree, write_font};
use font_sort::{Action, Config, DuplicatePolicy, TransferMode};

#[test]
fn roboto_bold_lands_in_family_folder_with_new_name() {
    let td = assert_fs::TempDir::new().unwrap();
    let root = canonical(td.path());
    write_font(&root.join("incoming/Roboto-Bold.ttf"), &simple_font("Roboto", "Bold"));

    let mut cfg = Config::new(&root);
    cfg.rename = true;
    let report = sort_tree(&cfg, &["Bold"]);

    assert_eq!(report.outcomes.len(), 1);
    let o = &report.outcomes[0];
    assert_eq!(o.action, Action::Renamed(TransferMode::Copy));
    assert_eq!(o.destination_folder.as_deref(), Some(root.join("Roboto").as_path()));
    assert!(td.child("Roboto/Roboto Bold.ttf").path().is_file());
    assert!(td.child("incoming/Roboto-Bold.ttf").path().is_file(), "copy keeps the source");
}

#[test]
fn second_copy_run_never_overwrites() {
    let td = assert_fs::TempDir::new().unwrap();
    let root = canonical(td.path());
    write_font(&root.join("incoming/Roboto-Bold.ttf"), &simple_font("Roboto", "Bold"));
    write_font(&root.join("incoming/Lato-Regular.ttf"), &simple_font("Lato", "Regular"));

    let mut cfg = Config::new(&root);
    cfg.rename = true;
    let first = sort_tree(&cfg, &["Bold"]);
    assert_eq!(first.summary.succeeded, 2);
    let sorted = root.join("Roboto/Roboto Bold.ttf");
    let before = fs::read(&sorted).unwrap();

    let second = sort_tree(&cfg, &["Bold"]);
    assert_eq!(second.summary.succeeded, 0);
    assert_eq!(second.summary.failed, 0);
    assert_eq!(second.summary.skipped, 4);
    assert!(second.outcomes.iter().all(|o| o.action == Action::SkippedDuplicate));
    assert_eq!(fs::read(&sorted).unwrap(), before);
    assert!(root.join("00 Skipped/Roboto-Bold.ttf").is_file());
    assert!(root.join("00 Skipped/Lato-Regular.ttf").is_file());

    // quarantine is pruned from discovery, so a third run changes nothing new
    let third = sort_tree(&cfg, &["Bold"]);
    assert_eq!(third.summary.scanned, 4);
    assert!(root.join("00 Skipped/Roboto-Bold_1.ttf").is_file());
}

#[test]
fn colliding_files_get_distinct_paths_with_suffix_policy() {
    let td = assert_fs::TempDir::new().unwrap();
    let root = canonical(td.path());
    for dir in ["a", "b", "c", "d"] {
        write_font(&root.join(dir).join("Inter.otf"), &simple_font("Inter", "Regular"));
    }

    let mut cfg = Config::new(&root);
    cfg.mode = TransferMode::Move;
    cfg.on_duplicate = DuplicatePolicy::Suffix;
    let report = sort_tree(&cfg, &[]);

    let finals: HashSet<_> = report
        .outcomes
        .iter()
        .map(|o| o.final_path.clone().unwrap())
        .collect();
    assert_eq!(finals.len(), 4);
    assert!(finals.contains(&root.join("Inter/Inter.otf")));
    for n in 1..=3 {
        assert!(finals.contains(&root.join(format!("Inter/Inter_{n}.otf"))));
    }
    assert!(!root.join("a/Inter.otf").exists());
}

fn file_names(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn suffixed_files_stay_put_on_rerun_when_moving() {
    let td = assert_fs::TempDir::new().unwrap();
    let root = canonical(td.path());
    for dir in ["a", "b"] {
        write_font(&root.join(dir).join("Inter.otf"), &simple_font("Inter", "Regular"));
    }

    let mut cfg = Config::new(&root);
    cfg.mode = TransferMode::Move;
    cfg.rename = true;
    cfg.on_duplicate = DuplicatePolicy::Suffix;
    let first = sort_tree(&cfg, &[]);
    assert_eq!(first.summary.succeeded, 2);
    let sorted = file_names(&root.join("Inter"));
    assert_eq!(sorted.len(), 2);

    for _ in 0..2 {
        let again = sort_tree(&cfg, &[]);
        assert_eq!(again.summary.scanned, 2);
        assert_eq!(again.summary.skipped, 2);
        for o in &again.outcomes {
            assert_eq!(o.action, Action::SkippedDuplicate);
            assert_eq!(o.detail, "already in place");
            assert_eq!(o.final_path.as_deref(), Some(o.original_path.as_path()));
        }
        assert_eq!(file_names(&root.join("Inter")), sorted);
    }
}

#[test]
fn suffixed_copies_are_not_copied_again_on_rerun() {
    let td = assert_fs::TempDir::new().unwrap();
    let root = canonical(td.path());
    for dir in ["a", "b"] {
        write_font(&root.join(dir).join("Inter.otf"), &simple_font("Inter", "Regular"));
    }

    let mut cfg = Config::new(&root);
    cfg.rename = true;
    cfg.on_duplicate = DuplicatePolicy::Suffix;
    sort_tree(&cfg, &[]);
    let family = root.join("Inter");
    let sorted = file_names(&family);
    assert_eq!(sorted.len(), 2);

    let second = sort_tree(&cfg, &[]);
    assert_eq!(second.summary.failed, 0);
    let in_family: Vec<_> = second
        .outcomes
        .iter()
        .filter(|o| o.original_path.starts_with(&family))
        .collect();
    assert_eq!(in_family.len(), 2);
    for o in in_family {
        assert_eq!(o.action, Action::SkippedDuplicate);
        assert_eq!(o.final_path.as_deref(), Some(o.original_path.as_path()));
    }
    // only the two sources are disambiguated again
    let names = file_names(&family);
    assert_eq!(names.len(), 4);
    assert!(sorted.iter().all(|n| names.contains(n)));
}

#[test]
fn bad_font_and_containers_do_not_stop_the_run() {
    let td = assert_fs::TempDir::new().unwrap();
    let root = canonical(td.path());
    td.child("in/broken.ttf").write_binary(b"garbage").unwrap();
    td.child("in/Noto.TTC").write_binary(b"ttc").unwrap();
    td.child("in/icons.woff").write_binary(b"woff").unwrap();
    td.child("in/system.fon").write_binary(b"fon").unwrap();
    write_font(&root.join("in/OpenSans-BoldItalic.otf"), &simple_font("Open Sans", "Bold Italic"));

    let cfg = Config::new(&root);
    let report = sort_tree(&cfg, &["Bold", "Italic"]);

    assert_eq!(report.summary.scanned, 5);
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.summary.succeeded, 4);
    assert!(root.join("00 TrueType Collection Fonts/Noto.TTC").is_file());
    assert!(root.join("00 woff/icons.woff").is_file());
    assert!(root.join("00 fon/system.fon").is_file());
    assert!(root.join("Open Sans/OpenSans-BoldItalic.otf").is_file());

    let failed = report
        .outcomes
        .iter()
        .find(|o| o.action == Action::Failed)
        .unwrap();
    assert!(failed.original_path.ends_with("broken.ttf"));
    assert!(failed.final_path.is_none());
}

#[test]
fn family_made_only_of_keywords_is_kept() {
    let td = assert_fs::TempDir::new().unwrap();
    let root = canonical(td.path());
    write_font(&root.join("x/black.ttf"), &simple_font("BLACK", "Regular"));

    let report = sort_tree(&Config::new(&root), &["Black"]);
    assert_eq!(report.outcomes[0].action, Action::Copied);
    assert!(root.join("Black/black.ttf").is_file());
}
