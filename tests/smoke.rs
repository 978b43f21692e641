//! Integration smoke tests for `room_occupancy`

use room_occupancy::core::report::{ReportContext, ReportFormat, ReportGenerator};
use room_occupancy::core::repository::load_dataset;
use room_occupancy::core::get_all_classrooms_occupancy;
use room_occupancy::get_version;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn version_is_not_empty() {
    assert!(!get_version().trim().is_empty());
}

#[test]
fn sample_dataset_renders_in_every_format() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("samples/campus.toml");
    let store = load_dataset(&path, 15).expect("sample dataset loads");
    let summaries = get_all_classrooms_occupancy(&store, None).expect("occupancy");
    let ctx = ReportContext::new("campus", None, &summaries);
    let out_dir = TempDir::new().expect("Failed to create temp dir");

    for format in [ReportFormat::Text, ReportFormat::Markdown, ReportFormat::Html] {
        let output = out_dir
            .path()
            .join(format!("campus_occupancy.{}", format.extension()));
        format
            .reporter()
            .generate(&ctx, &output)
            .expect("report renders");
        let contents = std::fs::read_to_string(&output).expect("report written");
        assert!(contents.contains("P.1.4"), "{format}");
        assert!(contents.contains("Drawing I"), "{format}");
    }
}
