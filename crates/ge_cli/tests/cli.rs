//! End-to-end runs of the `ge` binary against the fixture dataset.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn ge() -> Command {
    let mut c = Command::cargo_bin("ge").unwrap();
    c.env_remove("RUST_LOG");
    c
}

#[test]
fn run_writes_result_and_reports() {
    let out = tempfile::tempdir().unwrap();
    ge().arg("--catalog")
        .arg(fixture("catalog.json"))
        .arg("--params")
        .arg(fixture("params.json"))
        .arg("--assignments")
        .arg(fixture("assignments.json"))
        .arg("--out")
        .arg(out.path())
        .args(["--render", "json", "--render", "html", "--district", "potong pasir smc"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""winner":"SPP""#))
        .stderr(predicate::str::contains("run: RES:"));

    let result: Value = serde_json::from_slice(&fs::read(out.path().join("result.json")).unwrap()).unwrap();
    assert!(result["id"].as_str().unwrap().starts_with("RES:"));
    assert_eq!(result["aggregate"]["remaining_seats"], 86);
    let rejected: Vec<u64> = result["rejections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["index"].as_u64().unwrap())
        .collect();
    assert_eq!(rejected, [1, 3]);
    assert_eq!(result["ledger"].as_array().unwrap().len(), 4);

    let report: Value = serde_json::from_slice(&fs::read(out.path().join("report.json")).unwrap()).unwrap();
    assert_eq!(report["parliament"]["seats_won"], 11);
    let html = fs::read_to_string(out.path().join("report.html")).unwrap();
    assert!(html.contains("Total Electors: 320,000"));
}

#[test]
fn same_inputs_same_result_bytes() {
    let run = || {
        let out = tempfile::tempdir().unwrap();
        ge().arg("--catalog")
            .arg(fixture("catalog.json"))
            .arg("--assignments")
            .arg(fixture("assignments.json"))
            .arg("--out")
            .arg(out.path())
            .arg("--quiet")
            .assert()
            .success();
        fs::read(out.path().join("result.json")).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn validate_only_writes_nothing() {
    let out = tempfile::tempdir().unwrap();
    ge().arg("--catalog")
        .arg(fixture("catalog.json"))
        .arg("--out")
        .arg(out.path())
        .arg("--validate-only")
        .assert()
        .success()
        .stderr(predicate::str::contains("inputs OK (3 districts, 11 seats)"));
    assert!(!out.path().join("result.json").exists());
}

#[test]
fn seats_over_parliament_exit_5() {
    let out = tempfile::tempdir().unwrap();
    ge().arg("--catalog")
        .arg(fixture("catalog.json"))
        .args(["--total-seats", "10"])
        .arg("--out")
        .arg(out.path())
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Catalog.SeatsExceedParliament"));
}

#[test]
fn input_problems_exit_2() {
    ge().args(["--catalog", "no/such/catalog.json"]).assert().code(2);
    ge().args(["--catalog", "https://example.org/catalog.json"]).assert().code(2);
    ge().arg("--catalog")
        .arg(fixture("catalog.json"))
        .args(["--walkover-party", "P A P", "--validate-only"])
        .assert()
        .code(2);

    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("catalog.json");
    fs::write(&bad, r#"{ "X SMC": { "type": "XYZ", "number_of_electors": 1, "seats_contested": 1 } }"#).unwrap();
    ge().arg("--catalog")
        .arg(&bad)
        .arg("--validate-only")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("/X SMC/type"));
}

#[test]
fn oversized_parliament_is_rejected_before_rendering() {
    let out = tempfile::tempdir().unwrap();
    ge().arg("--catalog")
        .arg(fixture("catalog.json"))
        .args(["--total-seats", "4294967295", "--render", "json"])
        .arg("--out")
        .arg(out.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("total_parliament_seats"));
    assert!(!out.path().join("report.json").exists());
}

#[test]
fn unknown_panel_district_is_rejected() {
    let out = tempfile::tempdir().unwrap();
    ge().arg("--catalog")
        .arg(fixture("catalog.json"))
        .arg("--out")
        .arg(out.path())
        .args(["--district", "Atlantis SMC"])
        .assert()
        .code(2);
}
