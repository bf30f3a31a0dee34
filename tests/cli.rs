use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

const RESPONSE: &str = r#"{
  "groups": [
    {"source": "Main", "is_main": true, "тип_площади": "1к", "количество": 2,
     "общая_площадь": 80, "costs": [5000000, 7000000], "areas": [40, 40]},
    {"source": "Comp", "тип_площади": "1к", "количество": 1,
     "общая_площадь": 40, "costs": [5500000], "areas": [40]}
  ],
  "characteristics": [
    {"Название ЖК": "Main", "is_main": true, "Застройщик": "СтройИнвест"},
    {"Название ЖК": "Comp", "Застройщик": "Другой"}
  ]
}"#;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("aptmix").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("aptmix"));
}

#[test]
fn report_prints_rows_and_saves_csv() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("resp.json");
    let out = dir.path().join("mix.csv");
    fs::write(&input, RESPONSE).unwrap();

    let mut cmd = Command::cargo_bin("aptmix").unwrap();
    cmd.args(["report", "--group-by", "type", "--locale", "en", "-i"])
        .arg(&input)
        .arg("--out")
        .arg(&out);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ВСЕГО"))
        .stdout(predicate::str::contains("Main*"));
    assert!(fs::read_to_string(&out).unwrap().starts_with("group,"));
}

#[test]
fn compare_prints_signed_difference() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("resp.json");
    fs::write(&input, RESPONSE).unwrap();

    let mut cmd = Command::cargo_bin("aptmix").unwrap();
    cmd.args(["compare", "--locale", "en", "-i"]).arg(&input);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Main vs Comp"))
        .stdout(predicate::str::contains("(+9.09%)"));
}

#[test]
fn summary_lists_properties() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("resp.json");
    fs::write(&input, RESPONSE).unwrap();

    let mut cmd = Command::cargo_bin("aptmix").unwrap();
    cmd.args(["summary", "-i"]).arg(&input);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Main (main)"))
        .stdout(predicate::str::contains("Застройщик: СтройИнвест"));
}

#[test]
fn missing_input_fails() {
    let mut cmd = Command::cargo_bin("aptmix").unwrap();
    cmd.args(["report", "-i", "/nonexistent/resp.json"]);
    cmd.assert().failure();
}

#[test]
fn format_without_out_is_rejected() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("resp.json");
    fs::write(&input, RESPONSE).unwrap();

    let mut cmd = Command::cargo_bin("aptmix").unwrap();
    cmd.args(["report", "--format", "json", "-i"]).arg(&input);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--format needs --out"));
}
