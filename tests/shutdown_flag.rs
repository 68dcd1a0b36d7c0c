mod common;

use photo_by_date::{OrganizeOptions, Organizer, shutdown};
use serial_test::serial;
use tempfile::tempdir;

#[test]
#[serial]
fn requested_shutdown_stops_before_the_next_file() {
    let td = tempdir().unwrap();
    let src = td.path().join("in");
    let dst = td.path().join("out");
    std::fs::create_dir_all(&src).unwrap();
    std::fs::create_dir_all(&dst).unwrap();
    common::write_bare_jpeg(&src.join("a.jpg"));
    common::write_bare_jpeg(&src.join("b.jpg"));

    // Default organizer watches the process-wide flag.
    shutdown::request();
    assert!(shutdown::is_requested());

    let report = Organizer::new(OrganizeOptions::new(&src, &dst))
        .run_with(|_| {})
        .unwrap();
    assert!(report.interrupted);
    assert!(report.outcomes.is_empty());
    assert!(!dst.join("NoExif").exists());
}
