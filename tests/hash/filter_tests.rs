// Tests for the file filter stage

use std::path::PathBuf;

use crossbeam_channel::unbounded;
use verify_manifest::hash::{filter_stage, should_hash, CancelToken, FileEntry};

fn entry(name: &str, is_directory: bool) -> FileEntry {
    FileEntry {
        relative_name: name.to_string(),
        absolute_path: PathBuf::from("/root").join(name),
        is_directory,
    }
}

fn run_filter(entries: Vec<FileEntry>, manifest_name: Option<&str>, token: &CancelToken) -> Vec<String> {
    let (in_tx, in_rx) = unbounded();
    let (out_tx, out_rx) = unbounded();
    for e in entries {
        in_tx.send(e).unwrap();
    }
    drop(in_tx);

    filter_stage(in_rx, out_tx, manifest_name, token);
    out_rx.iter().map(|e| e.relative_name).collect()
}

#[test]
fn test_should_hash_rules() {
    assert!(should_hash(&entry("a.txt", false), Some("manifest.json")));
    assert!(!should_hash(&entry("sub", true), Some("manifest.json")));
    assert!(!should_hash(&entry("manifest.json", false), Some("manifest.json")));
    assert!(should_hash(&entry("manifest.json", false), None));
}

#[test]
fn test_manifest_name_is_compared_after_cleaning() {
    assert!(!should_hash(&entry("manifest.json", false), Some("./manifest.json")));
}

#[test]
fn test_nested_manifest_name() {
    let nested = format!("bad_manifests{}bad_b.json", std::path::MAIN_SEPARATOR);
    assert!(!should_hash(&entry(&nested, false), Some(&nested)));
    // Only the manifest at that exact relative path is skipped
    assert!(should_hash(&entry(&nested, false), Some("bad_b.json")));
}

#[test]
fn test_filter_stage_keeps_order() {
    let entries = vec![
        entry("a.txt", false),
        entry("manifest.json", false),
        entry("sub", true),
        entry("b.txt", false),
        entry("sub/c.txt", false),
    ];

    let names = run_filter(entries, Some("manifest.json"), &CancelToken::new());

    assert_eq!(names, vec!["a.txt", "b.txt", "sub/c.txt"]);
}

#[test]
fn test_filter_stage_stops_on_cancel() {
    let token = CancelToken::new();
    token.cancel();

    let names = run_filter(vec![entry("a.txt", false), entry("b.txt", false)], None, &token);

    assert!(names.is_empty());
}

#[test]
fn test_filter_stage_empty_input() {
    let names = run_filter(Vec::new(), Some("manifest.json"), &CancelToken::new());
    assert!(names.is_empty());
}
