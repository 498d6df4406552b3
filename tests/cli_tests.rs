//! CLI integration tests using the REAL modelcards binary

mod common;

use assert_cmd::Command;
use common::{TestWorkspace, fixture_path};
use predicates::prelude::*;

#[allow(deprecated)]
fn modelcards_cmd(ws: &TestWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("modelcards").unwrap();
    cmd.current_dir(&ws.path)
        .env_remove("HF_ENDPOINT")
        .env_remove("HF_TOKEN")
        .env_remove("RUST_LOG")
        .env("HF_HOME", ws.path.join(".hf"));
    cmd
}

#[test]
fn test_help_output() {
    let ws = TestWorkspace::new();
    modelcards_cmd(&ws)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hugging Face"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("push"));
}

#[test]
fn test_version_output() {
    let ws = TestWorkspace::new();
    modelcards_cmd(&ws)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(concat!(
            "modelcards ",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_show_summary() {
    let ws = TestWorkspace::new();
    modelcards_cmd(&ws)
        .arg("show")
        .arg(fixture_path("sample_simple_model_index.md"))
        .assert()
        .success()
        .stdout(predicate::str::contains("License:"))
        .stdout(predicate::str::contains("mit"))
        .stdout(predicate::str::contains("my-cool-model"))
        .stdout(predicate::str::contains(
            "image-classification on Beans: acc = 0.9",
        ));
}

#[test]
fn test_show_yaml() {
    let ws = TestWorkspace::new();
    ws.write_file(
        "README.md",
        "---\nlicense: mit\ntags: pytorch\n---\n# Model\n",
    );
    modelcards_cmd(&ws)
        .args(["show", "README.md", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::eq("license: mit\ntags:\n- pytorch\n"));
}

#[test]
fn test_show_json() {
    let ws = TestWorkspace::new();
    let output = modelcards_cmd(&ws)
        .arg("show")
        .arg(fixture_path("sample_simple_model_index.md"))
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["language"][0], "en");
    assert_eq!(json["model-index"][0]["name"], "my-cool-model");
    assert_eq!(
        json["model-index"][0]["results"][0]["metrics"][0]["value"],
        0.9
    );
}

#[test]
fn test_show_no_metadata_warns() {
    let ws = TestWorkspace::new();
    modelcards_cmd(&ws)
        .arg("show")
        .arg(fixture_path("sample_no_metadata.md"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning:"))
        .stderr(predicate::str::contains(
            "Repo card metadata block was not found",
        ));
}

#[test]
fn test_show_invalid_model_index_warns() {
    let ws = TestWorkspace::new();
    modelcards_cmd(&ws)
        .arg("show")
        .arg(fixture_path("sample_invalid_model_index.md"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid model-index"))
        .stdout(predicate::str::contains("Eval results:").not());
}

#[test]
fn test_show_invalid_card_data_fails() {
    let ws = TestWorkspace::new();
    modelcards_cmd(&ws)
        .arg("show")
        .arg(fixture_path("sample_invalid_card_data.md"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Malformed card metadata"));
}

#[test]
fn test_new_from_template() {
    let ws = TestWorkspace::new();
    modelcards_cmd(&ws)
        .arg("new")
        .arg("--template")
        .arg(fixture_path("sample_template.md"))
        .args([
            "--language",
            "en",
            "--license",
            "mit",
            "--var",
            "some_data=asdf",
            "--output",
            "out/README.md",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created model card"));

    assert_eq!(
        ws.read_file("out/README.md"),
        "---\nlanguage:\n- en\nlicense: mit\n---\n\nasdf\n"
    );
}

#[test]
fn test_new_default_template() {
    let ws = TestWorkspace::new();
    modelcards_cmd(&ws)
        .args([
            "new",
            "--license",
            "mit",
            "--tag",
            "pytorch",
            "--var",
            "model_id=my-cool-model",
            "--output",
            "README.md",
        ])
        .assert()
        .success();

    let content = ws.read_file("README.md");
    assert!(content.starts_with("---\nlicense: mit\ntags:\n- pytorch\n---\n"));
    assert!(content.contains("# my-cool-model"));
}

#[test]
fn test_new_dataset_card() {
    let ws = TestWorkspace::new();
    modelcards_cmd(&ws)
        .args([
            "new",
            "--kind",
            "dataset",
            "--var",
            "pretty_name=Beans",
            "--output",
            "README.md",
        ])
        .assert()
        .success();

    assert!(ws.read_file("README.md").contains("# Dataset Card for Beans"));
}

#[test]
fn test_new_missing_template_fails() {
    let ws = TestWorkspace::new();
    modelcards_cmd(&ws)
        .args([
            "new",
            "--template",
            "missing.md",
            "--output",
            "README.md",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("missing.md"));
    assert!(!ws.file_exists("README.md"));
}

#[test]
fn test_new_rejects_malformed_var() {
    let ws = TestWorkspace::new();
    modelcards_cmd(&ws)
        .args(["new", "--var", "novalue", "--output", "README.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn test_push_missing_file_fails() {
    let ws = TestWorkspace::new();
    modelcards_cmd(&ws)
        .args(["push", "missing.md", "user/model"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_show_remote_unreachable_endpoint_fails() {
    let ws = TestWorkspace::new();
    modelcards_cmd(&ws)
        .args(["--endpoint", "http://127.0.0.1:9", "show", "user/model"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
#[ignore = "Requires network access to the Hugging Face Hub"]
fn test_validate_valid_card_remote() {
    let ws = TestWorkspace::new();
    ws.write_file("README.md", "---\nlicense: mit\n---\n# Model\n");
    modelcards_cmd(&ws)
        .args(["validate", "README.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("metadata is valid"));
}

#[test]
#[ignore = "Requires network access to the Hugging Face Hub"]
fn test_validate_invalid_license_remote() {
    let ws = TestWorkspace::new();
    ws.write_file("README.md", "---\nlicense: asdf\n---\n# Model\n");
    modelcards_cmd(&ws)
        .args(["validate", "README.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("license"));
}

#[test]
#[ignore = "Requires network access to the Hugging Face Hub"]
fn test_show_remote_card() {
    let ws = TestWorkspace::new();
    modelcards_cmd(&ws)
        .args(["show", "openai-community/gpt2", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("license"));
}
