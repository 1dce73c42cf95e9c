use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

const SCENARIO: &str = r#"[
  {"id": 1, "first_name": "Jane", "last_name": "Doe", "telephone": "555-1234", "email": "jane@x.com"},
  {"id": 2, "first_name": "Jane", "last_name": "Doe", "telephone": "555-1234", "email": "JANE@X.com"},
  {"id": 3, "first_name": "Jon", "last_name": "Doe", "telephone": "", "email": ""}
]"#;

fn write_input(dir: &Path, data: &str) -> String {
    let path = dir.join("contacts.json");
    fs::write(&path, data).expect("write input");
    path.to_str().expect("input path").to_string()
}

fn run(home: &Path, args: &[&str]) -> Output {
    cargo_bin_cmd!("tidybook")
        .env("XDG_CONFIG_HOME", home)
        .env_remove("TIDYBOOK_CHURCHSUITE_API_KEY")
        .env_remove("TIDYBOOK_CHURCHSUITE_ACCOUNT")
        .args(args)
        .output()
        .expect("run command")
}

fn run_ok(home: &Path, args: &[&str]) -> String {
    let output = run(home, args);
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

#[test]
fn analyze_json_reports_scenario_findings() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(temp.path(), SCENARIO);

    let stdout = run_ok(temp.path(), &["--json", "analyze", "--input", &input]);
    let value: Value = serde_json::from_str(&stdout).expect("parse json");
    let report = &value["report"];

    assert_eq!(report["contacts_analyzed"], 3);
    assert_eq!(report["duplicate_phones"][0]["phone"], "555-1234");
    assert_eq!(report["duplicate_phones"][0]["contact_ids"][0], "1");
    assert_eq!(report["duplicate_phones"][0]["contact_ids"][1], "2");
    assert_eq!(report["duplicate_emails"][0]["email"], "jane@x.com");
    assert_eq!(report["duplicate_names"][0]["name"], "Jane Doe");
    assert_eq!(report["missing_phones"][0], "3");
    assert_eq!(report["missing_emails"][0], "3");
    assert_eq!(value["summary"]["duplicate_phone_groups"], 1);
    assert!(value["csv_export"].is_null());
}

#[test]
fn analyze_threshold_flag_changes_similar_names() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(temp.path(), SCENARIO);

    let stdout = run_ok(
        temp.path(),
        &["--json", "analyze", "--input", &input, "--threshold", "0.75"],
    );
    let value: Value = serde_json::from_str(&stdout).expect("parse json");
    let pairs = value["report"]["similar_names"].as_array().expect("array");
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0]["second"]["id"], "3");
}

#[test]
fn analyze_text_output_and_csv_export() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(temp.path(), SCENARIO);
    let csv_path = temp.path().join("out").join("emails.csv");
    let csv_arg = csv_path.to_str().expect("csv path");

    let stdout = run_ok(
        temp.path(),
        &["analyze", "--input", &input, "--export-csv", csv_arg],
    );
    assert!(stdout.contains("Duplicate phone numbers:"));
    assert!(stdout.contains("    Jane Doe (ID: 1)"));
    assert!(stdout.contains("Missing emails:\n  Jon Doe (ID: 3)"));
    assert!(stdout.contains("Exported 2 contacts to"));

    let csv = fs::read_to_string(&csv_path).expect("read csv");
    assert_eq!(
        csv,
        "First Name,Last Name,Email Address\nJane,Doe,jane@x.com\nJane,Doe,JANE@X.com\n"
    );
}

#[test]
fn export_csv_uses_configured_path() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(temp.path(), SCENARIO);
    let csv_path = temp.path().join("configured.csv");
    let config_dir = temp.path().join("tidybook");
    fs::create_dir_all(&config_dir).expect("config dir");
    let config_path = config_dir.join("config.toml");
    fs::write(
        &config_path,
        format!("[export]\ncsv_path = {:?}\n", csv_path.to_str().expect("csv path")),
    )
    .expect("write config");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&config_path).expect("metadata").permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&config_path, perms).expect("chmod");
    }

    let stdout = run_ok(temp.path(), &["--json", "export", "csv", "--input", &input]);
    let value: Value = serde_json::from_str(&stdout).expect("parse json");
    assert_eq!(value["count"], 2);
    assert!(csv_path.exists());
}

#[test]
fn duplicate_ids_are_rejected_as_invalid_input() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(
        temp.path(),
        r#"[{"id": 1, "first_name": "A", "last_name": "B"}, {"id": "1", "first_name": "C", "last_name": "D"}]"#,
    );

    let output = run(temp.path(), &["analyze", "--input", &input]);
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("analyze contacts"));
}

#[test]
fn unreadable_input_is_a_fetch_failure() {
    let temp = TempDir::new().expect("temp dir");
    let missing = temp.path().join("absent.json");

    let output = run(
        temp.path(),
        &["analyze", "--input", missing.to_str().expect("path")],
    );
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn fetch_without_credentials_is_invalid_input() {
    let temp = TempDir::new().expect("temp dir");
    let output = run(temp.path(), &["fetch"]);
    assert_eq!(output.status.code(), Some(3));
}
