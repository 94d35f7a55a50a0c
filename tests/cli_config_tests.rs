//! End-to-end tests for `hotkey-editor config` commands.

mod fixtures;
use fixtures::*;

#[test]
fn test_config_path_uses_isolated_dir() {
    let ws = Workspace::new();
    let output = ws.run(&["config", "path"]);

    assert_eq!(output.status.code(), Some(0));
    let expected = ws.config_dir.join("config.toml");
    assert_eq!(stdout(&output).trim(), expected.to_string_lossy());
}

#[test]
fn test_config_show_default() {
    let ws = Workspace::new();
    let output = ws.run(&["config", "show"]);

    assert_eq!(
        output.status.code(),
        Some(0),
        "Show config should succeed. stderr: {}",
        stderr(&output)
    );
    let stdout = stdout(&output);
    assert!(stdout.starts_with("Hotkey Editor configuration"));
    assert!(stdout.contains("using defaults"));
    assert!(stdout.contains("(built-in)"));
    assert!(stdout.contains("Default mode: name"));
}

#[test]
fn test_version_uses_binary_name() {
    let ws = Workspace::new();
    let output = ws.run(&["--version"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).starts_with("hotkey-editor "));
}

#[test]
fn test_config_show_json_schema() {
    let ws = Workspace::new();
    let hierarchy = write_file(ws.dir.path(), "hierarchy.json", r#"["Window"]"#);
    ws.write_config(&format!(
        "[paths]\nhierarchy = {:?}\n\n[filter]\ndefault_mode = \"event\"\n\n[filter.aliases]\nbar = \"SPACE\"\n\n[ui]\nshow_empty = false\n",
        hierarchy.to_string_lossy()
    ));
    let output = ws.run(&["config", "show", "--json"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let json = stdout_json(&output);
    assert_eq!(json["exists"], true);
    assert_eq!(json["paths"]["hierarchy"], hierarchy.to_string_lossy().as_ref());
    assert!(json["paths"]["overrides"].is_null());
    assert_eq!(json["filter"]["default_mode"], "event");
    assert_eq!(json["filter"]["aliases"]["bar"], "SPACE");
    assert_eq!(json["ui"]["show_inactive"], true);
    assert_eq!(json["ui"]["show_empty"], false);
}

#[test]
fn test_config_show_invalid_file() {
    let ws = Workspace::new();
    ws.write_config("[paths]\nhierarchy = \"/definitely/not/here.json\"\n");
    let output = ws.run(&["config", "show"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to load configuration"));
}

#[test]
fn test_configured_hierarchy_is_used() {
    let ws = Workspace::new();
    let hierarchy = write_file(ws.dir.path(), "hierarchy.json", r#"["Mesh Edit Mode"]"#);
    ws.write_config(&format!("[paths]\nhierarchy = {:?}\n", hierarchy.to_string_lossy()));
    let snapshot = ws.snapshot_arg();
    let output = ws.run(&["tree", "--snapshot", &snapshot, "--json"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let json = stdout_json(&output);
    assert_eq!(json["categories"].as_array().unwrap().len(), 1);
    assert_eq!(json["binding_count"], 3);
}
