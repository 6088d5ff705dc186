//! Integration tests for the svc-blocks CLI binary.
//!
//! These tests exercise the actual compiled binary using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

/// Get a Command for the svc-blocks binary
fn svc_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("svc-blocks"));
    cmd.env_remove("SVC_BLOCKS_CONFIG");
    cmd
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_output() {
    svc_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Service content blocks"));
}

#[test]
fn test_version_output() {
    svc_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("svc-blocks"));
}

#[test]
fn test_no_command_prints_hint() {
    svc_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("svc-blocks --help"));
}

// ============================================================================
// Conversion Tests
// ============================================================================

#[test]
fn test_parse_list_from_stdin() {
    svc_cmd()
        .args(["parse", "--kind", "list"])
        .write_stdin("- Fast\n* Secure\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type": "list-item""#))
        .stdout(predicate::str::contains(r#""content": "Secure""#));
}

#[test]
fn test_parse_faq_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("faq.txt");
    fs::write(&path, "P: ¿Plazo?\nR: Una semana\n").unwrap();

    svc_cmd()
        .args(["parse", "--kind", "faq"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""question": "¿Plazo?""#))
        .stdout(predicate::str::contains(r#""answer": "Una semana""#));
}

#[test]
fn test_render_blocks() {
    let blocks = r#"[
        {"id": "b", "order": 1, "type": "faq-item", "question": "¿Q?", "answer": "A"},
        {"id": "a", "order": 0, "type": "list-item", "content": "Primero"}
    ]"#;

    svc_cmd()
        .arg("render")
        .write_stdin(blocks)
        .assert()
        .success()
        .stdout("- Primero\n\nP: ¿Q?\nR: A\n");
}

#[test]
fn test_render_invalid_json_fails() {
    svc_cmd()
        .arg("render")
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// ============================================================================
// Service Record Tests
// ============================================================================

#[test]
fn test_load_record() {
    svc_cmd()
        .args(["load", "--compact"])
        .write_stdin(r#"{"caracteristicas": "- Fast\n- Secure", "faq": "P: Q\nR: A"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#""caracteristicas":["Fast","Secure"]"#,
        ))
        .stdout(predicate::str::contains(
            r#""faq":[{"pregunta":"Q","respuesta":"A"}]"#,
        ));
}

#[test]
fn test_missing_input_file_fails() {
    let dir = tempdir().unwrap();
    svc_cmd()
        .current_dir(dir.path())
        .args(["load", "absent.json"])
        .assert()
        .failure();
}

#[test]
fn test_inspect_uses_project_settings() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join(".svc-blocks")).unwrap();
    fs::write(
        dir.path().join(".svc-blocks/editor.toml"),
        "[benefits]\ntitle = \"Ventajas\"\nmax_blocks = 4\n",
    )
    .unwrap();

    svc_cmd()
        .current_dir(dir.path())
        .env("NO_COLOR", "1")
        .args(["inspect", "-C", "beneficios"])
        .write_stdin(r#"{"beneficios": ["Ahorro"]}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Ventajas"))
        .stdout(predicate::str::contains("1 block, max 4"))
        .stdout(predicate::str::contains("Preguntas frecuentes").not());
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_config_prints_explicit_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("editor.toml");
    fs::write(&path, "[faq]\nai_prompt = \"Genera FAQ\"\n").unwrap();

    svc_cmd()
        .arg("config")
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[faq]"))
        .stdout(predicate::str::contains("Genera FAQ"));
}

#[test]
fn test_config_rejects_invalid_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("editor.toml");
    fs::write(&path, "[faq]\nmax_blocks = -1\n").unwrap();

    svc_cmd()
        .args(["config", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("editor.toml"));
}

#[test]
fn test_completions_bash() {
    svc_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("svc-blocks"));
}

#[test]
fn test_directory_input_is_rejected() {
    let dir = tempdir().unwrap();
    svc_cmd()
        .arg("render")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("is a directory"));
}
