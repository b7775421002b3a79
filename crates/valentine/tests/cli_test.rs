//! E2E tests: drive the valentine binary the way a script would, with --json.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn valentine(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_valentine"))
        .arg("--json")
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run valentine")
}

/// Run valentine and return the `data` of its JSON response
fn run_valentine(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let output = valentine(data_dir, args);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !output.status.success() {
        panic!("valentine failed: stdout={} stderr={}", stdout, stderr);
    }

    let response: serde_json::Value = serde_json::from_str(&stdout).unwrap_or_else(|e| {
        panic!("Failed to parse valentine output: {}\nOutput: {}", e, stdout)
    });
    assert_eq!(response["status"], "ok");
    response["data"].clone()
}

#[test]
fn test_link_then_open_round_trip() {
    let dir = TempDir::new().unwrap();
    let draft = dir.path().join("draft.json");
    std::fs::write(
        &draft,
        serde_json::json!({
            "intro": { "collection": [{ "text": "Guess who" }], "delayMs": "1200" },
            "outro": {
                "dialog": { "text": "Knew it", "fanfare": ["confetti"] },
                "noBtnAction": { "click": ["fadeOut", "fadeOut"], "text": "random" },
                "noBtnText": [{ "text": "No" }, { "text": "Nope" }],
            },
        })
        .to_string(),
    )
    .unwrap();

    let link = run_valentine(dir.path(), &["link", draft.to_str().unwrap()]);
    let link = link["link"].as_str().unwrap().to_string();
    assert!(link.starts_with("http://localhost:3000/view?data="));

    let viewed = run_valentine(dir.path(), &["open", "--strict", &link]);
    assert_eq!(viewed["fallback"], false);
    assert_eq!(viewed["message"]["intro"]["delayMs"], 1200);
    assert_eq!(viewed["message"]["outro"]["noBtnAction"]["click"], serde_json::json!(["fadeOut"]));
}

#[test]
fn test_configured_base_url_is_used() {
    let dir = TempDir::new().unwrap();
    run_valentine(
        dir.path(),
        &["config", "set-base-url", "https://example.com/", "--base-path", "love"],
    );

    let config = run_valentine(dir.path(), &["config", "show"]);
    assert_eq!(config["base_url"], "https://example.com");
    assert_eq!(config["base_path"], "/love");

    let link = run_valentine(dir.path(), &["link"]);
    assert!(link["link"]
        .as_str()
        .unwrap()
        .starts_with("https://example.com/love/view?data="));
}

#[test]
fn test_broken_link_falls_back_unless_strict() {
    let dir = TempDir::new().unwrap();
    let broken = "http://localhost:3000/view?data=not%20base64";

    let viewed = run_valentine(dir.path(), &["view", broken]);
    assert_eq!(viewed["fallback"], true);
    assert_eq!(
        viewed["message"]["intro"]["collection"][0]["text"],
        "I love you :3"
    );

    let output = valentine(dir.path(), &["open", "--strict", broken]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("This link looks broken"), "{}", stderr);
}

#[test]
fn test_validate_reports_issue_paths() {
    let dir = TempDir::new().unwrap();
    let draft = dir.path().join("intro.json");
    std::fs::write(&draft, r#"{"collection":[{"text":""}],"delayMs":1.5}"#).unwrap();

    let output = valentine(dir.path(), &["validate", "--part", "intro", draft.to_str().unwrap()]);
    assert!(!output.status.success());

    let response: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("validate prints its result");
    let paths: Vec<&str> = response["data"]["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|issue| issue["path"].as_str().unwrap())
        .collect();
    assert!(paths.contains(&"collection[0].text"));
    assert!(paths.contains(&"delayMs"));
}

#[test]
fn test_default_parts() {
    let dir = TempDir::new().unwrap();
    let outro = run_valentine(dir.path(), &["default", "outro"]);
    assert_eq!(outro["noBtnAction"]["text"], "scrollThenRandom");
    assert!(outro.get("intro").is_none());

    let combined = run_valentine(dir.path(), &["default"]);
    assert!(combined.get("intro").is_some());
}

#[test]
fn test_no_button_simulation_is_seeded() {
    let dir = TempDir::new().unwrap();
    let args = ["no-button", "--clicks", "8", "--seed", "14"];
    let first = run_valentine(dir.path(), &args);
    let second = run_valentine(dir.path(), &args);

    assert_eq!(first, second);
    assert_eq!(first.as_array().unwrap().len(), 8);
    assert_eq!(first[0]["caption"], "No :(");
}
