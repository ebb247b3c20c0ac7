use assert_cmd::cargo::cargo_bin_cmd;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

#[test]
fn symbols_prints_one_line_per_definition() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("mod.py");
    fs::write(&file, "import os\n\ndef foo():\n    pass\n\nclass Bar:\n    pass\n").unwrap();

    let output = cargo_bin_cmd!("gitgate")
        .env_remove("GITGATE_CONFIG")
        .arg("symbols")
        .arg(&file)
        .output()
        .expect("symbols run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(":3\tfunction\tfoo"), "stdout: {stdout}");
    assert!(stdout.contains(":6\tclass\tBar"), "stdout: {stdout}");

    let output = cargo_bin_cmd!("gitgate")
        .env_remove("GITGATE_CONFIG")
        .args(["symbols", "--imports", "--json"])
        .arg(&file)
        .output()
        .expect("symbols run");
    assert!(output.status.success());
    let resp: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(resp["data"]["imports"][0]["module"], "os");
}

#[test]
fn symbols_language_flag_accepts_aliases() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("snippet.txt");
    fs::write(&file, "pub fn render() {}\n").unwrap();

    let output = cargo_bin_cmd!("gitgate")
        .env_remove("GITGATE_CONFIG")
        .args(["symbols", "--language", "rs"])
        .arg(&file)
        .output()
        .expect("symbols run");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(":1\tfunction\trender"), "stdout: {stdout}");

    let file = temp.path().join("widget.txt");
    fs::write(&file, "function mount() {}\n").unwrap();
    let output = cargo_bin_cmd!("gitgate")
        .env_remove("GITGATE_CONFIG")
        .args(["symbols", "--json", "--language", "TypeScript"])
        .arg(&file)
        .output()
        .expect("symbols run");
    assert!(output.status.success());
    let resp: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(resp["data"]["symbols"][0]["name"], "mount");

    let output = cargo_bin_cmd!("gitgate")
        .env_remove("GITGATE_CONFIG")
        .args(["symbols", "--language", "cobol"])
        .arg(&file)
        .output()
        .expect("symbols run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cobol"), "stderr: {stderr}");
}

#[test]
fn diff_treats_missing_target_as_deleted() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("old.txt");
    fs::write(&source, "one\ntwo").unwrap();

    let output = cargo_bin_cmd!("gitgate")
        .env_remove("GITGATE_CONFIG")
        .arg("diff")
        .arg(&source)
        .arg(temp.path().join("gone.txt"))
        .arg("--json")
        .output()
        .expect("diff run");
    assert!(output.status.success());
    let resp: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(resp["data"]["status"], "target_missing");
    assert_eq!(resp["data"]["removed"], 2);
}

#[test]
fn diff_text_output_marks_changes() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("a.txt");
    let target = temp.path().join("b.txt");
    fs::write(&source, "keep\nold\n").unwrap();
    fs::write(&target, "keep\r\nnew\r\n").unwrap();

    let output = cargo_bin_cmd!("gitgate")
        .env_remove("GITGATE_CONFIG")
        .arg("diff")
        .arg(&source)
        .arg(&target)
        .output()
        .expect("diff run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["-    2 old", "+    2 new"]);
}

#[test]
fn graph_reports_cycles_between_files() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("lib")).unwrap();
    fs::write(root.join("lib/a.js"), "import { b } from './b';\nexport const a = 1;\n").unwrap();
    fs::write(root.join("lib/b.js"), "import { a } from './a';\nexport const b = 2;\n").unwrap();
    fs::write(root.join("lib/main.js"), "import { a } from './a';\n").unwrap();
    fs::write(root.join("notes.md"), "not source").unwrap();

    let output = cargo_bin_cmd!("gitgate")
        .env_remove("GITGATE_CONFIG")
        .arg("graph")
        .arg(root)
        .arg("--json")
        .output()
        .expect("graph run");
    assert!(output.status.success());
    let resp: Value = serde_json::from_slice(&output.stdout).unwrap();
    let data = &resp["data"];
    assert_eq!(data["stats"]["nodes"], 3);
    assert_eq!(data["stats"]["edges"], 3);
    assert_eq!(data["entryPoints"], serde_json::json!(["lib/main.js"]));
    assert_eq!(data["circular"].as_array().unwrap().len(), 1);
}

#[test]
fn graph_filters_apply_before_analysis() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join("vendor")).unwrap();
    fs::write(root.join("src/app.py"), "from . import util\n").unwrap();
    fs::write(root.join("src/util.py"), "").unwrap();
    fs::write(root.join("vendor/dep.py"), "").unwrap();

    let output = cargo_bin_cmd!("gitgate")
        .env_remove("GITGATE_CONFIG")
        .arg("graph")
        .arg(root)
        .args(["--exclude", "vendor"])
        .output()
        .expect("graph run");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("2 files"), "stderr: {stderr}");
}
