//! Record and config files on disk through the library entry points.

use std::fs;

use hourglass_cli::{OutputFormat, RenderOptions, load_records, render, resolve_config};
use hourglass_timeline::{RecordId, RootOrder, TimelineConfig};

const TRACE: &str = r#"[
    {"id": 3, "parent": 1, "start": 120, "end": 180, "label": "parse"},
    {"id": 1, "parent": null, "start": 0, "end": 400, "label": "loadPage /home"},
    {"id": 2, "parent": 1, "start": 10, "end": 90, "label": "fetch"},
    {"id": "x", "start": 500, "end": 510, "label": "idle"}
]"#;

#[test]
fn loads_mixed_id_types_with_parent_after_child() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.json");
    fs::write(&path, TRACE).unwrap();

    let records = load_records(&path).unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].parent, Some(RecordId::from(1u64)));

    let options = RenderOptions {
        expand: vec![RecordId::from("1")],
        format: OutputFormat::Json,
        ..Default::default()
    };
    let out = render(records, TimelineConfig::default(), &options).unwrap();
    let frame: serde_json::Value = serde_json::from_str(&out).unwrap();

    let ids: Vec<&str> = frame["blocks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    // Start-time order: fetch (10) before parse (120) under the root
    assert_eq!(ids, ["1", "2", "3", "x"]);
    assert_eq!(frame["page_load_ms"], 400);
}

#[test]
fn explicit_config_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("timeline.ron");
    fs::write(&config_path, "(root_order: Input, block_height: 20.0, vertical_margin: 4.0)").unwrap();

    let config = resolve_config(Some(&config_path)).unwrap();
    assert_eq!(config.root_order, RootOrder::Input);

    let trace_path = dir.path().join("trace.json");
    fs::write(&trace_path, TRACE).unwrap();

    let options = RenderOptions {
        expand_all: true,
        format: OutputFormat::Json,
        ..Default::default()
    };
    let out = render(load_records(&trace_path).unwrap(), config, &options).unwrap();
    let frame: serde_json::Value = serde_json::from_str(&out).unwrap();

    // Input order: parse was listed before fetch
    assert_eq!(frame["blocks"][1]["id"], "3");
    assert_eq!(frame["blocks"][1]["y"], 24.0);
    assert_eq!(frame["content_height"], 4.0 * 24.0 + 20.0);
}

#[test]
fn missing_and_malformed_files_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_records(&dir.path().join("absent.json")).is_err());

    let bad = dir.path().join("bad.json");
    fs::write(&bad, "{not json").unwrap();
    let err = load_records(&bad).unwrap_err();
    assert!(format!("{err:#}").contains("parsing records"));

    let bad_config = dir.path().join("bad.ron");
    fs::write(&bad_config, "(block_height: nope)").unwrap();
    assert!(resolve_config(Some(&bad_config)).is_err());
}
