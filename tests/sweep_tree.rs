//! Build artifact sweep on a real tree, using a staging trash.

mod common;

use assert_fs::TempDir;
use assert_fs::prelude::*;
use std::fs;

use common::FailingTrash;
use renamer::sweep::{drop_nested, find_artifacts};
use renamer::{StagingTrash, SweepOptions, sweep_build_artifacts};

fn tree() -> TempDir {
    let work = TempDir::new().unwrap();
    for f in [
        "app/bin/Debug/app.dll",
        "app/bin/obj/x.o",
        "app/src/main.cs",
        "web/node_modules/left-pad/dist/index.js",
        "lib/obj/lib.o",
        ".git/objects/bin/pack",
        "target2/keep.txt",
    ] {
        work.child(f).write_str("x").unwrap();
    }
    work
}

#[test]
fn only_outermost_matches_are_trashed() {
    let work = tree();
    let bin = TempDir::new().unwrap();

    let report = sweep_build_artifacts(work.path(), &SweepOptions::default(), &StagingTrash::new(bin.path()));

    assert_eq!(report.deleted, 3);
    assert!(report.errors.is_empty());
    assert!(!work.child("app/bin").path().exists());
    assert!(!work.child("web/node_modules").path().exists());
    assert!(!work.child("lib/obj").path().exists());
    assert!(work.child("app/src/main.cs").path().exists());
    assert!(work.child(".git/objects/bin").path().exists());
    assert!(work.child("target2/keep.txt").path().exists());
    assert_eq!(fs::read_dir(bin.path()).unwrap().count(), 3);
    assert_eq!(report.summary(), "Deleted 3 build folders (0 errors)");
}

#[test]
fn found_set_has_no_nested_pairs() {
    let work = tree();
    let found = find_artifacts(work.path(), &SweepOptions::default());
    assert!(found.iter().any(|p| p.ends_with("app/bin/obj")));
    assert!(!found.iter().any(|p| p.starts_with(work.child(".git").path())));

    let kept = drop_nested(found);
    for a in &kept {
        for b in &kept {
            assert!(a == b || !a.starts_with(b));
        }
    }
}

#[test]
fn custom_targets_replace_defaults() {
    let work = tree();
    let bin = TempDir::new().unwrap();
    let opts = SweepOptions {
        targets: vec!["dist".into()],
        ..Default::default()
    };

    let report = sweep_build_artifacts(work.path(), &opts, &StagingTrash::new(bin.path()));

    assert_eq!(report.deleted, 1);
    assert!(!work.child("web/node_modules/left-pad/dist").path().exists());
    assert!(work.child("app/bin").path().exists());
}

#[test]
fn same_named_folders_both_land_in_trash() {
    let work = TempDir::new().unwrap();
    work.child("a/bin/1").write_str("1").unwrap();
    work.child("b/bin/2").write_str("2").unwrap();
    let bin = TempDir::new().unwrap();

    let report = sweep_build_artifacts(work.path(), &SweepOptions::default(), &StagingTrash::new(bin.path()));

    assert_eq!(report.deleted, 2);
    assert!(bin.child("bin").path().is_dir());
    assert!(bin.child("bin (2)").path().is_dir());
}

#[test]
fn failed_folder_does_not_stop_the_sweep() {
    let work = tree();
    let bin = TempDir::new().unwrap();
    let trash = FailingTrash::new(bin.path(), &["node_modules"]);

    let report = sweep_build_artifacts(work.path(), &SweepOptions::default(), &trash);

    assert_eq!(report.deleted, 2);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].item.ends_with("node_modules"));
    assert!(work.child("web/node_modules").path().is_dir());
    assert!(!work.child("app/bin").path().exists());
    assert!(!work.child("lib/obj").path().exists());
    assert_eq!(report.summary(), "Deleted 2 build folders (1 errors)");
}
