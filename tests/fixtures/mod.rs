//! Shared test fixtures for E2E CLI and integration tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use hotkey_editor::models::NativeHierarchy;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Host snapshot laid out against the built-in hierarchy.
///
/// - "Window" and "Screen" are leaves, "Window" is absorbed into "Window (Global)"
/// - "3D View" is a branch with three direct bindings
/// - "Curve" holds two conflicting bindings on X (ids 41 and 42)
/// - "Image" has no node in the built-in hierarchy
/// - binding 23 is inactive, binding 24 is unassigned
pub const SNAPSHOT_JSON: &str = r#"{
  "categories": [
    {"name": "Window", "space_type": "EMPTY", "region_type": "WINDOW", "bindings": [
      {"id": 1, "idname": "wm.save_mainfile", "name": "Save", "type": "S", "ctrl": true},
      {"id": 2, "idname": "wm.open_mainfile", "name": "Open", "type": "O", "ctrl": true}
    ]},
    {"name": "Screen", "bindings": [
      {"id": 3, "idname": "screen.screen_full_area", "name": "Toggle Maximize Area", "type": "SPACE", "ctrl": true}
    ]},
    {"name": "3D View", "space_type": "VIEW_3D", "bindings": [
      {"id": 10, "idname": "view3d.select", "name": "Select", "type": "LEFTMOUSE", "value": "CLICK", "map_type": "MOUSE"},
      {"id": 11, "idname": "view3d.view_all", "name": "Frame All", "type": "HOME"},
      {"id": 12, "idname": "view3d.zoom", "name": "Zoom View", "type": "NUMPAD_PLUS"}
    ], "children": [
      {"name": "Object Mode", "bindings": [
        {"id": 20, "idname": "object.delete", "name": "Delete", "type": "X"},
        {"id": 21, "idname": "object.select_all", "name": "(De)select All", "type": "A"},
        {"id": 22, "idname": "object.duplicate_move", "name": "Duplicate Objects", "type": "D", "shift": true},
        {"id": 23, "idname": "object.hide_view_set", "name": "Hide", "type": "H", "active": false},
        {"id": 24, "idname": "object.origin_set", "name": "Set Origin"}
      ]},
      {"name": "Mesh", "bindings": [
        {"id": 30, "idname": "mesh.select_all", "name": "(De)select All", "type": "A"},
        {"id": 31, "idname": "mesh.extrude_region_move", "name": "Extrude Region", "type": "E"},
        {"id": 32, "idname": "mesh.loopcut_slide", "name": "Loop Cut and Slide", "type": "R", "ctrl": true, "shift": true}
      ]},
      {"name": "Curve", "bindings": [
        {"id": 40, "idname": "curve.select_all", "name": "(De)select All", "type": "A"},
        {"id": 41, "idname": "curve.delete", "name": "Delete", "type": "X"},
        {"id": 42, "idname": "curve.dissolve_verts", "name": "Dissolve Vertices", "type": "X"}
      ]},
      {"name": "3D View Generic", "bindings": [
        {"id": 50, "idname": "wm.toolbar", "name": "Toolbar", "type": "SPACE", "shift": true}
      ]}
    ]},
    {"name": "Image", "bindings": [
      {"id": 60, "idname": "image.view_all", "name": "Frame All", "type": "HOME"}
    ]},
    {"name": "Text", "bindings": [
      {"id": 70, "idname": "text.new", "name": "New Text", "type": "N", "alt": true}
    ]},
    {"name": "Knife Tool Modal Map", "bindings": [
      {"id": 80, "idname": "CANCEL", "name": "Cancel", "type": "ESC", "map_type": "KEYBOARD"}
    ]}
  ]
}"#;

/// Number of bindings in [`SNAPSHOT_JSON`].
pub const SNAPSHOT_BINDINGS: usize = 21;

/// Number of index entries [`SNAPSHOT_JSON`] maps to with the built-in overrides.
pub const SNAPSHOT_ENTRIES: usize = 10;

/// Parses [`SNAPSHOT_JSON`].
pub fn sample_native() -> NativeHierarchy {
    serde_json::from_str(SNAPSHOT_JSON).expect("fixture snapshot should parse")
}

/// Writes `content` to `name` inside `dir`.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write fixture file");
    path
}

/// Writes [`SNAPSHOT_JSON`] to `snapshot.json` inside `dir`.
pub fn write_snapshot(dir: &Path) -> PathBuf {
    write_file(dir, "snapshot.json", SNAPSHOT_JSON)
}

/// Temp workspace with a snapshot and an empty config directory.
pub struct Workspace {
    pub dir: TempDir,
    pub snapshot: PathBuf,
    pub config_dir: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let snapshot = write_snapshot(dir.path());
        let config_dir = dir.path().join("config");
        Self {
            dir,
            snapshot,
            config_dir,
        }
    }

    pub fn snapshot_arg(&self) -> String {
        self.snapshot.to_string_lossy().to_string()
    }

    /// Writes a config.toml into the isolated config directory.
    pub fn write_config(&self, content: &str) -> PathBuf {
        fs::create_dir_all(&self.config_dir).expect("Failed to create config dir");
        write_file(&self.config_dir, "config.toml", content)
    }

    /// Runs the binary with the isolated config directory.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(hotkey_editor_bin())
            .env("HOTKEY_EDITOR_CONFIG_DIR", &self.config_dir)
            .env_remove("RUST_LOG")
            .args(args)
            .output()
            .expect("Failed to execute command")
    }
}

/// Path to the hotkey-editor binary.
pub fn hotkey_editor_bin() -> &'static str {
    env!("CARGO_BIN_EXE_hotkey-editor")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Parses stdout as JSON, panicking with stderr on failure.
pub fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout should be JSON ({e}). stdout: {} stderr: {}",
            stdout(output),
            stderr(output)
        )
    })
}
