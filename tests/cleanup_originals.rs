//! Originals cleanup against a staging trash.

mod common;

use assert_fs::TempDir;
use assert_fs::prelude::*;

use common::FailingTrash;
use renamer::{CleanupOptions, StagingTrash, cleanup_originals};

#[test]
fn trashes_selected_originals_only() {
    let work = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    for f in [
        "IMG_4275.CR2",
        "DSC0001.arw",
        "IMG_4275.JPG",
        "20220806_144753 - IMG_4275.jpg",
        "C0001.MP4",
        "notes.txt",
    ] {
        work.child(f).touch().unwrap();
    }
    let opts = CleanupOptions {
        raw: true,
        unedited_jpg: true,
        video: false,
    };

    let report = cleanup_originals(work.path(), &opts, &StagingTrash::new(bin.path())).unwrap();

    assert_eq!((report.raw, report.unedited_jpg, report.video), (2, 1, 0));
    assert!(report.errors.is_empty());
    assert!(work.child("20220806_144753 - IMG_4275.jpg").path().exists());
    assert!(work.child("C0001.MP4").path().exists());
    assert!(work.child("notes.txt").path().exists());
    assert!(bin.child("IMG_4275.CR2").path().exists());
    assert_eq!(report.summary(), "Cleanup complete: 2 RAW, 1 unedited JPG, 0 video");
}

#[test]
fn nothing_selected_leaves_directory_alone() {
    let work = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    work.child("IMG_4275.CR2").touch().unwrap();

    let report = cleanup_originals(work.path(), &CleanupOptions::default(), &StagingTrash::new(bin.path())).unwrap();

    assert_eq!(report.raw + report.unedited_jpg + report.video, 0);
    assert!(work.child("IMG_4275.CR2").path().exists());
}

#[test]
fn refused_file_is_an_error_and_not_counted() {
    let work = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    work.child("IMG_0001.CR2").touch().unwrap();
    work.child("IMG_0002.CR2").touch().unwrap();
    let trash = FailingTrash::new(bin.path(), &["IMG_0001.CR2"]);
    let opts = CleanupOptions {
        raw: true,
        ..Default::default()
    };

    let report = cleanup_originals(work.path(), &opts, &trash).unwrap();

    assert_eq!(report.raw, 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].item, "IMG_0001.CR2");
    assert!(work.child("IMG_0001.CR2").path().exists());
    assert!(bin.child("IMG_0002.CR2").path().exists());
}
