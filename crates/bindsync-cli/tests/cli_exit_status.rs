//! Integration test: run the `bindsync` binary against throwaway projects
//! and check its exit status and output streams.

use std::path::Path;
use std::process::{Command, Output};

const SCHEMA: &str = r#"
categories:
  - name: Lifecycle
    functions:
      - name: setup
        sketch: true
  - name: Graphics
    functions:
      - name: drawRect
        sketch: true
  - name: Sound
    functions:
      - name: play
        sketch: true
"#;

fn write_project(root: &Path, source: &str) {
    std::fs::create_dir_all(root.join("docs")).unwrap();
    std::fs::create_dir_all(root.join("src")).unwrap();
    std::fs::write(root.join("docs/api-definition.yaml"), SCHEMA).unwrap();
    std::fs::write(root.join("src/tcScriptHost.cpp"), source).unwrap();
}

fn bindsync(root: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bindsync"))
        .arg("--root")
        .arg(root)
        .arg("check")
        .args(extra)
        .output()
        .expect("binary runs")
}

#[test]
fn test_clean_project_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    write_project(
        dir.path(),
        r#"
engine->RegisterGlobalFunction("void drawRect(float, float, float, float)", asFUNCTION(drawRect), asCALL_CDECL);
engine->RegisterObjectMethod("Sound", "void play()", asMETHOD(Sound, play), asCALL_THISCALL);
engine->RegisterObjectMethod("Sound", "Sound& opAssign(const Sound &in)", asMETHOD(Sound, operator=), asCALL_THISCALL);
"#,
    );

    let out = bindsync(dir.path(), &[]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("[OK] All schema bindable functions are bound!"));
    assert!(stdout.contains("Summary: 2 matched, 0 missing, 0 extra"));
}

#[test]
fn test_drift_exits_one_and_extras_do_not() {
    let dir = tempfile::tempdir().unwrap();
    write_project(
        dir.path(),
        r#"
engine->RegisterGlobalFunction("void drawRect(float, float, float, float)", asFUNCTION(drawRect), asCALL_CDECL);
engine->RegisterGlobalFunction("void drawStar(int)", asFUNCTION(drawStar), asCALL_CDECL);
"#,
    );

    let out = bindsync(dir.path(), &[]);
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("  - play (Sound)"));
    assert!(stdout.contains("[EXTRA GLOBAL] 1"));
}

#[test]
fn test_json_format_is_machine_readable() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path(), "");

    let out = bindsync(dir.path(), &["--format", "json"]);
    assert_eq!(out.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("stdout is json");
    assert_eq!(value["summary"]["missing_global"], 1);
    assert_eq!(value["summary"]["missing_method"], 1);
    assert_eq!(value["schema"]["callbacks"], 1);
}

#[test]
fn test_missing_input_exits_two() {
    let dir = tempfile::tempdir().unwrap();

    let out = bindsync(dir.path(), &["--schema", "nowhere.yaml"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("loading API schema"));
}
