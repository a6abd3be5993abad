//! End-to-end tests that drive the `spt` binary.
//!
//! Each test runs with an isolated HOME so no user config leaks in.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const HISTORY: &str = "Row\tDate\tType\tLocation
1\t2024-12-31\tArrival\tSFO
2\t2024-12-30\tDeparture\tSFO
3\t2024-11-20\tArrival\tJFK
4\t2024-09-15\tArrival\tJFK
5\t2024-03-10\tDeparture\tJFK
6\t2024-01-10\tArrival\tLAX
7\t2023-12-20\tDeparture\tLAX
8\t2023-09-15\tArrival\tLAX
9\t2023-09-10\tDeparture\tSEA
10\t2023-09-10\tArrival\tSEA
11\t2023-06-30\tDeparture\tSEA
12\t2022-08-31\tArrival\tSEA
13\t2022-08-20\tDeparture\tSEA
14\t2021-09-15\tArrival\tSEA
";

fn spt_binary() -> String {
    env!("CARGO_BIN_EXE_spt").to_string()
}

fn spt(home: &Path) -> Command {
    let mut cmd = Command::new(spt_binary());
    cmd.env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("SPT_TAX_YEAR")
        .env_remove("SPT_ACCEPT_IMPORT_WARNINGS")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_manual_counts_pass() {
    let temp = TempDir::new().unwrap();
    let output = spt(temp.path())
        .args(["manual", "--current", "244", "--tax-year", "2024"])
        .output()
        .expect("failed to run spt manual");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.starts_with("You meet the Substantial Presence Test"));
    assert!(out.contains("Total Days: 244.00 days"));
}

#[test]
fn test_manual_counts_out_of_range_fail() {
    let temp = TempDir::new().unwrap();
    let output = spt(temp.path())
        .args(["manual", "--current", "367", "-y", "2024"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("currentYearDays: Days must be between 0 and 366"));
}

#[test]
fn test_ranges_full_leap_year() {
    let temp = TempDir::new().unwrap();
    let output = spt(temp.path())
        .args(["ranges", "-p", "2024-01-01..2024-12-31", "-y", "2024", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["currentYearDays"], 366);
    assert_eq!(value["taxYear"], 2024);
    assert_eq!(value["source"], "dateRanges");
}

#[test]
fn test_ranges_overlap_is_rejected() {
    let temp = TempDir::new().unwrap();
    let output = spt(temp.path())
        .args([
            "ranges",
            "-p",
            "2024-01-01..2024-03-01",
            "-p",
            "2024-02-01..2024-04-01",
            "-y",
            "2024",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Travel periods cannot overlap."));
}

#[test]
fn test_import_requires_confirmation_for_warnings() {
    let temp = TempDir::new().unwrap();
    let log = temp.path().join("i94.tsv");
    std::fs::write(&log, HISTORY).unwrap();

    let output = spt(temp.path())
        .arg("import")
        .arg(&log)
        .args(["-y", "2024", "--as-of", "2025-06-01"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Found two consecutive arrivals without a departure in between"));
    assert!(err.contains("--accept-warnings"));
}

#[test]
fn test_import_accepted_from_stdin() {
    let temp = TempDir::new().unwrap();
    let mut child = spt(temp.path())
        .args([
            "import",
            "--accept-warnings",
            "--json",
            "-y",
            "2024",
            "--as-of",
            "2025-06-01",
        ])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(HISTORY.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["currentYearDays"], 169);
    // 2023-09-10 is listed departure before arrival, so the turnaround
    // arrival stays open until the next arrival on 2023-09-15
    assert_eq!(value["firstPriorYearDays"], 283);
    assert_eq!(value["secondPriorYearDays"], 355);
    assert_eq!(value["passesTest"], true);
    assert_eq!(value["warnings"].as_array().unwrap().len(), 3);
}

#[test]
fn test_import_config_accepts_warnings() {
    let temp = TempDir::new().unwrap();
    let log = temp.path().join("i94.tsv");
    std::fs::write(&log, HISTORY).unwrap();
    let config = temp.path().join("spt.toml");
    std::fs::write(&config, "tax_year = 2024\naccept_import_warnings = true\n").unwrap();

    let output = spt(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("import")
        .arg(&log)
        .args(["--as-of", "2025-06-01"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("for tax purposes for 2024."));
    assert!(out.contains("Current Year (2024): 169 days"));
    assert!(out.contains("Warnings:"));
}

#[test]
fn test_import_without_records_fails() {
    let temp = TempDir::new().unwrap();
    let log = temp.path().join("empty.tsv");
    std::fs::write(&log, "nothing to see here\n").unwrap();

    let output = spt(temp.path()).arg("import").arg(&log).output().unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("No valid travel periods found in the data."));
}

#[test]
fn test_parse_lists_periods() {
    let temp = TempDir::new().unwrap();
    let log = temp.path().join("i94.tsv");
    std::fs::write(&log, HISTORY).unwrap();

    let output = spt(temp.path())
        .arg("parse")
        .arg(&log)
        .arg("--json")
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["periods"].as_array().unwrap().len(), 8);
    assert_eq!(value["periods"][0]["arrivalDate"], "2024-12-31");
    assert!(value["periods"][0]["departureDate"].is_null());
}
