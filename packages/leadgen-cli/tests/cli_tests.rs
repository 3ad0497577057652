//! Runs the `leadgen` binary end to end (no network).

use serde_json::{json, Value};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn leadgen(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_leadgen"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .env_remove("LEADGEN_API_URL")
        .output()
        .expect("failed to run leadgen")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn write_acme(dir: &Path) {
    std::fs::write(
        dir.join("acme.csv"),
        "OrganizationName,URL\nAcme,https://acme.test\nAcme,https://acme.test/other\n",
    )
    .unwrap();
}

#[test]
fn import_prints_records() {
    let dir = TempDir::new().unwrap();
    write_acme(dir.path());

    let separate = leadgen(&["import", "acme.csv"], dir.path());
    assert!(separate.status.success());
    assert_eq!(
        stdout_json(&separate),
        json!([
            { "name": "Acme", "links": ["https://acme.test"] },
            { "name": "Acme", "links": ["https://acme.test/other"] }
        ])
    );

    let merged = leadgen(&["import", "acme.csv", "--merge"], dir.path());
    assert!(merged.status.success());
    assert_eq!(
        stdout_json(&merged),
        json!([{ "name": "Acme", "links": ["https://acme.test", "https://acme.test/other"] }])
    );
}

#[test]
fn import_of_unsupported_file_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();

    let output = leadgen(&["import", "notes.txt"], dir.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unsupported file format"));
}

#[test]
fn sample_then_import_round_trips() {
    let dir = TempDir::new().unwrap();

    assert!(leadgen(&["sample"], dir.path()).status.success());
    let output = leadgen(&["import", "organization_sample.csv"], dir.path());
    assert!(output.status.success());

    let records = stdout_json(&output);
    assert_eq!(records.as_array().unwrap().len(), 2);
    assert_eq!(records[0]["name"], "Example University");
}

#[test]
fn submit_dry_run_prints_payload() {
    let dir = TempDir::new().unwrap();
    write_acme(dir.path());

    let output = leadgen(
        &[
            "submit",
            "--email",
            "lead@example.com",
            "acme.csv",
            "--merge",
            "--org",
            "Globex=globex.test",
            "--designation",
            "CEO",
            "--find-address",
            "--dry-run",
        ],
        dir.path(),
    );
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        json!({
            "email": "lead@example.com",
            "data": [{
                "organizationname": "Acme",
                "links": ["https://acme.test", "https://acme.test/other"]
            }],
            "includeGeneric": true,
            "findAddress": true,
            "designations": ["CEO"]
        })
    );
}

#[test]
fn submit_without_organizations_fails_before_network() {
    let dir = TempDir::new().unwrap();

    let output = leadgen(&["submit", "--email", "lead@example.com"], dir.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No organizations to submit"));
}

#[test]
fn submit_with_bad_email_fails() {
    let dir = TempDir::new().unwrap();
    write_acme(dir.path());

    let output = leadgen(&["submit", "--email", "not-an-email", "acme.csv"], dir.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Please enter a valid email"));
}
