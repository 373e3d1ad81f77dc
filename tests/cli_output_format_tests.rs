// CLI integration tests: text, JSON and CSV output for histograms and heat points

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/ems_sample.csv")
}

fn stdout_json(args: &[&str]) -> serde_json::Value {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("emstat");
    let assert = cmd.args(args).arg(fixture()).assert().success();
    serde_json::from_slice(&assert.get_output().stdout).expect("stdout should be JSON")
}

// ============================================================================
// Text Output Tests
// ============================================================================

#[test]
fn test_text_output_shows_both_tables() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("emstat");
    cmd.arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("Incidents by weekday"))
        .stdout(predicate::str::contains("Fri            3   33.33"))
        .stdout(predicate::str::contains("Tue            0    0.00"))
        .stdout(predicate::str::contains("Incidents by hour"))
        .stdout(predicate::str::contains("01             2   22.22"))
        .stdout(predicate::str::contains("busiest day: Fri"))
        .stdout(predicate::str::contains("busiest hour: 01:00"));
}

#[test]
fn test_text_output_reports_skipped_records() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("emstat");
    cmd.arg(fixture())
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "1 record(s) without a parseable 'Incident Time' were not counted",
        ));
}

#[test]
fn test_by_weekday_omits_hours() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("emstat");
    cmd.arg("--by")
        .arg("weekday")
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("Incidents by weekday"))
        .stdout(predicate::str::contains("Incidents by hour").not());
}

// ============================================================================
// JSON Output Tests
// ============================================================================

#[test]
fn test_json_output_shape() {
    let value = stdout_json(&["--format", "json"]);

    assert_eq!(value["format"], "emstat-json-v1");
    assert_eq!(value["summary"]["records_read"], 10);
    assert_eq!(value["summary"]["records_counted"], 9);
    assert_eq!(value["summary"]["records_skipped"], 1);

    let weekday = value["weekday"].as_array().unwrap();
    let counts: Vec<u64> = weekday.iter().map(|b| b["count"].as_u64().unwrap()).collect();
    assert_eq!(counts, vec![1, 0, 1, 0, 3, 3, 1]);
    assert_eq!(weekday[3]["label"], "Thurs");

    let hour: Vec<u64> = value["hour"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_u64().unwrap())
        .collect();
    assert_eq!(hour.len(), 24);
    assert_eq!(hour.iter().sum::<u64>(), 9);
    assert_eq!(hour[1], 2);
    assert_eq!(hour[23], 2);
    assert_eq!(hour[3], 0);
}

#[test]
fn test_json_by_hour_omits_weekday() {
    let value = stdout_json(&["--format", "json", "--by", "hour"]);
    assert!(value.get("weekday").is_none());
    assert_eq!(value["hour"].as_array().unwrap().len(), 24);
}

// ============================================================================
// CSV Output Tests
// ============================================================================

#[test]
fn test_csv_output_all_buckets() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("emstat");
    let assert = cmd
        .arg("--format")
        .arg("csv")
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("histogram,index,label,incidents\n"))
        .stdout(predicate::str::contains("weekday,4,Fri,3"))
        .stdout(predicate::str::contains("hour,14,14,1"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.lines().count(), 1 + 7 + 24);
}

#[test]
fn test_csv_by_hour() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("emstat");
    cmd.arg("--format")
        .arg("csv")
        .arg("--by")
        .arg("hour")
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("hour,23,23,2"))
        .stdout(predicate::str::contains("weekday,").not());
}

// ============================================================================
// Heatmap Tests
// ============================================================================

#[test]
fn test_heatmap_csv() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("emstat");
    let assert = cmd
        .arg("--heatmap")
        .arg("--format")
        .arg("csv")
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("latitude,longitude,weight\n"))
        .stdout(predicate::str::contains("30.2672,-97.7431,1"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.lines().count(), 1 + 8);
}

#[test]
fn test_heatmap_json() {
    let value = stdout_json(&["--heatmap", "--format", "json"]);
    assert_eq!(value["format"], "emstat-heatmap-v1");
    assert_eq!(value["points"].as_array().unwrap().len(), 8);
    assert_eq!(value["excluded"], 2);
    assert_eq!(value["total_weight"], 11);
}

#[test]
fn test_heatmap_text() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("emstat");
    cmd.arg("--heatmap")
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("8 point(s), total weight 11, 2 record(s)"));
}

// ============================================================================
// Configuration and Error Tests
// ============================================================================

#[test]
fn test_strict_fails_on_unparsable_timestamp() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("emstat");
    cmd.arg("--strict")
        .arg(fixture())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "1 record(s) have a missing or unparsable timestamp",
        ))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_strict_does_not_gate_heatmap() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("emstat");
    cmd.arg("--strict")
        .arg("--heatmap")
        .arg("--format")
        .arg("csv")
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("latitude,longitude,weight\n"))
        .stderr(predicate::str::contains("not counted").not());
}

#[test]
fn test_missing_input_file() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("emstat");
    cmd.arg("/nonexistent/ems.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load incidents"));
}

#[test]
fn test_unknown_time_column() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("emstat");
    cmd.arg("--time-column")
        .arg("Dispatched")
        .arg(fixture())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required column 'Dispatched'"));
}

#[test]
fn test_config_file_renames_columns() {
    let tmp_dir = TempDir::new().unwrap();
    let config_path = tmp_dir.path().join("emstat.toml");
    let csv_path = tmp_dir.path().join("calls.csv");

    fs::write(
        &config_path,
        "[columns]\ntimestamp = \"Dispatched\"\n\n[timestamps]\nformats = [\"%d.%m.%Y %H:%M\"]\n",
    )
    .unwrap();
    fs::write(&csv_path, "Dispatched\n13.03.2015 06:15\n14.03.2015 06:40\n").unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("emstat");
    cmd.arg("--config")
        .arg(&config_path)
        .arg("--format")
        .arg("csv")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("weekday,4,Fri,1"))
        .stdout(predicate::str::contains("weekday,5,Sat,1"))
        .stdout(predicate::str::contains("hour,6,06,2"));
}

#[test]
fn test_invalid_config_file() {
    let tmp_dir = TempDir::new().unwrap();
    let config_path = tmp_dir.path().join("emstat.toml");
    fs::write(&config_path, "[columns\n").unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("emstat");
    cmd.arg("--config")
        .arg(&config_path)
        .arg(fixture())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_header_only_csv_is_all_zero() {
    let tmp_dir = TempDir::new().unwrap();
    let csv_path = tmp_dir.path().join("empty.csv");
    fs::write(&csv_path, "Incident Time,Total Patients\n").unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("emstat");
    let assert = cmd
        .arg("--format")
        .arg("json")
        .arg(&csv_path)
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let weekday = value["weekday"].as_array().unwrap();
    assert_eq!(weekday.len(), 7);
    assert!(weekday.iter().all(|b| b["count"] == 0));
    let hour = value["hour"].as_array().unwrap();
    assert_eq!(hour.len(), 24);
    assert!(hour.iter().all(|c| *c == 0));
}
