//! End-to-end tests for `hotkey-editor filter`.

mod fixtures;
use fixtures::*;

fn filter_ids(ws: &Workspace, args: &[&str]) -> Vec<u64> {
    let snapshot = ws.snapshot_arg();
    let mut full = vec!["filter", "--snapshot", snapshot.as_str(), "--json"];
    full.extend_from_slice(args);
    let output = ws.run(&full);

    assert_eq!(
        output.status.code(),
        Some(0),
        "filter should succeed. stderr: {}",
        stderr(&output)
    );
    let json = stdout_json(&output);
    json["matches"]
        .as_array()
        .expect("matches should be an array")
        .iter()
        .map(|m| m["id"].as_u64().expect("id should be a number"))
        .collect()
}

// ============================================================================
// Name Mode Tests
// ============================================================================

#[test]
fn test_filter_by_operator_id() {
    let ws = Workspace::new();
    assert_eq!(filter_ids(&ws, &["select_all"]), vec![21, 30, 40]);
}

#[test]
fn test_filter_by_display_name_case_insensitive() {
    let ws = Workspace::new();
    assert_eq!(filter_ids(&ws, &["LOOP", "CUT"]), vec![32]);
}

#[test]
fn test_filter_ignores_collapse_and_reports_category() {
    let ws = Workspace::new();
    let snapshot = ws.snapshot_arg();
    let output = ws.run(&["filter", "--snapshot", &snapshot, "--json", "extrude"]);

    assert_eq!(output.status.code(), Some(0));
    let json = stdout_json(&output);
    assert_eq!(json["mode"], "name");
    assert_eq!(json["matches"][0]["category"], "Mesh Edit Mode");
    assert_eq!(json["matches"][0]["idname"], "mesh.extrude_region_move");
    assert!(json.get("error").is_none());
}

#[test]
fn test_filter_no_match_is_not_an_error() {
    let ws = Workspace::new();
    let snapshot = ws.snapshot_arg();
    let output = ws.run(&["filter", "--snapshot", &snapshot, "zzz_nothing"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("No bindings match"));
}

// ============================================================================
// Event Mode Tests
// ============================================================================

#[test]
fn test_filter_event_requires_all_modifiers() {
    let ws = Workspace::new();
    assert_eq!(filter_ids(&ws, &["--mode", "event", "ctrl", "shift", "r"]), vec![32]);
    assert!(filter_ids(&ws, &["--mode", "event", "ctrl", "alt", "r"]).is_empty());
}

#[test]
fn test_filter_event_single_text_argument() {
    let ws = Workspace::new();
    assert_eq!(filter_ids(&ws, &["--mode", "event", "ctrl s"]), vec![1]);
}

#[test]
fn test_filter_event_plain_key() {
    let ws = Workspace::new();
    assert_eq!(filter_ids(&ws, &["--mode", "event", "x"]), vec![20, 41, 42]);
}

#[test]
fn test_filter_event_plus_means_numpad_plus() {
    let ws = Workspace::new();
    assert_eq!(filter_ids(&ws, &["--mode", "event", "+"]), vec![12]);
}

#[test]
fn test_filter_event_substring_token() {
    let ws = Workspace::new();
    // "mouse" matches every mouse button code
    assert_eq!(filter_ids(&ws, &["--mode", "event", "mouse"]), vec![10]);
}

#[test]
fn test_filter_event_unknown_key() {
    let ws = Workspace::new();
    let snapshot = ws.snapshot_arg();
    let output = ws.run(&[
        "filter",
        "--snapshot",
        &snapshot,
        "--mode",
        "event",
        "ctrl",
        "nosuchkey",
    ]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = stdout(&output);
    assert!(stdout.contains("No bindings match"));
    assert!(stdout.contains("nosuchkey"));
}

#[test]
fn test_filter_event_unknown_key_json() {
    let ws = Workspace::new();
    let snapshot = ws.snapshot_arg();
    let output = ws.run(&[
        "filter", "--snapshot", &snapshot, "--mode", "event", "--json", "qqq",
    ]);

    assert_eq!(output.status.code(), Some(0));
    let json = stdout_json(&output);
    assert_eq!(json["mode"], "event");
    assert!(json["error"].as_str().unwrap().contains("qqq"));
    assert!(json["matches"].as_array().unwrap().is_empty());
}

#[test]
fn test_filter_default_mode_from_config() {
    let ws = Workspace::new();
    ws.write_config("[filter]\ndefault_mode = \"event\"\n");
    assert_eq!(filter_ids(&ws, &["shift", "d"]), vec![22]);
    assert_eq!(filter_ids(&ws, &["--mode", "name", "shift"]), Vec::<u64>::new());
}

#[test]
fn test_filter_configured_alias() {
    let ws = Workspace::new();
    ws.write_config("[filter]\ndefault_mode = \"event\"\n\n[filter.aliases]\nbar = \"SPACE\"\n");
    assert_eq!(filter_ids(&ws, &["shift", "bar"]), vec![50]);
}

#[test]
fn test_filter_requires_text() {
    let ws = Workspace::new();
    let snapshot = ws.snapshot_arg();
    let output = ws.run(&["filter", "--snapshot", &snapshot]);

    // clap usage error
    assert_eq!(output.status.code(), Some(2));
}
