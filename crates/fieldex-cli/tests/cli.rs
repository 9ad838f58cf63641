use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PLAN: &str = "\
Policy Number: ABC-123
Policy Number   XYZ-999
Carrier = Blue Shield
Stop-Loss Deductible: $25,000
Effective Date: 01/15/2024
Page 1 of 10
";

/// Command with config lookups pointed at an empty temp dir.
fn fieldex(home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fieldex"));
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"));
    cmd
}

fn write_doc(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn extract_prints_json_report() {
    let home = TempDir::new().unwrap();
    let doc = write_doc(home.path(), "plan.txt", PLAN);

    let output = fieldex(&home)
        .args(["extract", "--doc-type", "stop_loss"])
        .arg(&doc)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["document_type"], "stop_loss");
    assert_eq!(report["summary"]["total_fields"], 4);
    assert_eq!(report["fields"][0]["matched_field"], "stop_loss_deductible");

    let policy = report["fields"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["label"] == "Policy Number")
        .unwrap();
    assert_eq!(policy["value"], "ABC-123");
}

#[test]
fn extract_csv_to_file() {
    let home = TempDir::new().unwrap();
    let doc = write_doc(home.path(), "plan.ocr", PLAN);
    let out = home.path().join("fields.csv");

    fieldex(&home)
        .args(["extract", "-f", "csv", "-o"])
        .arg(&out)
        .arg(&doc)
        .assert()
        .success();

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("label,value,matched_field,confidence,category\n"));
    assert!(csv.contains("Carrier,Blue Shield,carrier,0.80,other"));
}

#[test]
fn extract_min_confidence_hides_low_scores() {
    let home = TempDir::new().unwrap();
    let doc = write_doc(home.path(), "notes.txt", "Carrier: Anthem\nRemarks: see attached");

    fieldex(&home)
        .args(["extract", "-f", "text", "--min-confidence", "0.8"])
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("Carrier: Anthem"))
        .stdout(predicate::str::contains("Remarks").not());
}

#[test]
fn extract_require_reports_missing_fields() {
    let home = TempDir::new().unwrap();
    let doc = write_doc(home.path(), "plan.txt", PLAN);

    fieldex(&home)
        .args(["extract", "--require", "carrier,tpa"])
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Field 'tpa' is required"))
        .stderr(predicate::str::contains("1 required field(s) missing"));
}

#[test]
fn extract_promotes_to_directory() {
    let home = TempDir::new().unwrap();
    let doc = write_doc(home.path(), "plan.txt", PLAN);
    let promoted = home.path().join("promoted");

    fieldex(&home)
        .args(["extract", "--doc-id", "doc-42", "--promote-dir"])
        .arg(&promoted)
        .arg(&doc)
        .assert()
        .success()
        .stderr(predicate::str::contains("[ok] local_file"));

    let batch: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(promoted.join("doc-42.json")).unwrap()).unwrap();
    assert_eq!(batch["doc_id"], "doc-42");
    assert_eq!(batch["filename"], "plan.txt");
    assert_eq!(batch["fields"].as_array().unwrap().len(), 4);
}

#[test]
fn extract_promotes_to_listed_destinations() {
    let home = TempDir::new().unwrap();
    let doc = write_doc(home.path(), "plan.txt", PLAN);
    let promoted = home.path().join("promoted");

    fieldex(&home)
        .args(["extract", "--doc-id", "doc-7", "--destinations", "file,webhook", "--promote-dir"])
        .arg(&promoted)
        .arg(&doc)
        .assert()
        .success()
        .stderr(predicate::str::contains("[ok] local_file"))
        .stderr(predicate::str::contains("[failed] webhook: unknown destination: webhook"));

    assert!(promoted.join("doc-7.json").exists());

    fieldex(&home)
        .args(["extract", "--destinations", "ftp"])
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown destination: ftp"));
}

#[test]
fn extract_uses_custom_mapping() {
    let home = TempDir::new().unwrap();
    let doc = write_doc(home.path(), "plan.txt", "Carrier: Anthem");
    let mapping = write_doc(home.path(), "map.json", r#"{"mappings": {"carrier": "insurer"}}"#);

    fieldex(&home)
        .args(["extract", "--mapping"])
        .arg(&mapping)
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"matched_field\": \"insurer\""));
}

#[test]
fn extract_rejects_unsupported_files() {
    let home = TempDir::new().unwrap();
    let doc = write_doc(home.path(), "scan.png", "binary");

    fieldex(&home)
        .arg("extract")
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported document format: png"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("in");
    fs::create_dir_all(&input).unwrap();
    write_doc(&input, "a.txt", PLAN);
    write_doc(&input, "b.txt", "Carrier: Anthem");
    write_doc(&input, "ignored.png", "x");
    let out = home.path().join("out");

    fieldex(&home)
        .args(["batch", "-j", "2", "--summary", "-o"])
        .arg(&out)
        .arg(format!("{}/*", input.display()))
        .assert()
        .success()
        .stderr(predicate::str::contains("Found 2 files"));

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert_eq!(summary.lines().count(), 3);
    assert!(summary.starts_with("filename,status,document_type,total_fields"));
    assert!(summary.contains("b.txt,success,,1,1,"));
}

#[test]
fn batch_keeps_outputs_with_shared_stems_apart() {
    let home = TempDir::new().unwrap();
    for dir in ["a", "b"] {
        let input = home.path().join("in").join(dir);
        fs::create_dir_all(&input).unwrap();
        write_doc(&input, "plan.txt", "Carrier: Anthem");
    }
    let out = home.path().join("out");

    fieldex(&home)
        .args(["batch", "-o"])
        .arg(&out)
        .arg(format!("{}/in/*/plan.txt", home.path().display()))
        .assert()
        .success();

    assert!(out.join("plan.json").exists());
    assert!(out.join("plan-2.json").exists());
}

#[test]
fn batch_without_matches_fails() {
    let home = TempDir::new().unwrap();

    fieldex(&home)
        .arg("batch")
        .arg(format!("{}/*.txt", home.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn mapping_lookup() {
    let home = TempDir::new().unwrap();

    fieldex(&home)
        .args(["mapping", "lookup", "Third Party Administrator"])
        .assert()
        .success()
        .stdout("tpa\n");

    fieldex(&home)
        .args(["mapping", "lookup", "Rx Tier (Generic)"])
        .assert()
        .success()
        .stdout("rx_tier_generic\n");
}

#[test]
fn mapping_export_round_trips() {
    let home = TempDir::new().unwrap();
    let exported = home.path().join("mapping.json");

    fieldex(&home)
        .args(["mapping", "export", "-o"])
        .arg(&exported)
        .assert()
        .success();

    fieldex(&home)
        .args(["mapping", "--file"])
        .arg(&exported)
        .args(["lookup", "oop max"])
        .assert()
        .success()
        .stdout("out_of_pocket_max\n");
}

#[test]
fn config_init_set_get() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("fieldex.json");

    fieldex(&home)
        .args(["-c"])
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();

    fieldex(&home)
        .args(["-c"])
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    fieldex(&home)
        .args(["-c"])
        .arg(&config)
        .args(["config", "set", "extraction.min_confidence", "0.75"])
        .assert()
        .success();

    fieldex(&home)
        .args(["-c"])
        .arg(&config)
        .args(["config", "get", "extraction.min_confidence"])
        .assert()
        .success()
        .stdout("0.75\n");
}
