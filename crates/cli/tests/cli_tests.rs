//! CLI integration tests
use std::path::Path;

use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("textmetrics")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn write_workbook(path: &Path, rows: &[(&str, &str)]) {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_sheet_mut(&0).unwrap();
    sheet.get_cell_mut((1, 1)).set_value("URL_ID");
    sheet.get_cell_mut((2, 1)).set_value("URL");
    for (i, (id, url)) in rows.iter().enumerate() {
        let row = i as u32 + 2;
        sheet.get_cell_mut((1, row)).set_value(*id);
        sheet.get_cell_mut((2, row)).set_value(*url);
    }
    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

#[test]
fn test_cli_score_text_file() {
    let lexicon = TempDir::new().unwrap();

    cmd()
        .args(["score", &get_fixture_path("article.txt"), "--lexicon-dir"])
        .arg(lexicon.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("POSITIVE SCORE"))
        .stdout(predicate::str::contains("AVG WORD LENGTH"));
}

#[test]
fn test_cli_score_json_values() {
    let lexicon = TempDir::new().unwrap();

    let output = cmd()
        .args(["score", "-f", "json", &get_fixture_path("article.txt"), "--lexicon-dir"])
        .arg(lexicon.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["positive_score"], 7.0);
    assert_eq!(json["negative_score"], 5.0);
    assert_eq!(json["word_count"], 82.0);
    assert_eq!(json["personal_pronouns"], 4.0);
    assert_eq!(json.as_object().unwrap().len(), 13);
}

#[test]
fn test_cli_score_stdin() {
    let lexicon = TempDir::new().unwrap();
    let text = std::fs::read_to_string(get_fixture_path("article.txt")).unwrap();

    cmd()
        .args(["score", "-", "--format", "json", "--lexicon-dir"])
        .arg(lexicon.path())
        .write_stdin(text)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"word_count\": 82.0"));
}

#[test]
fn test_cli_score_html_file() {
    let lexicon = TempDir::new().unwrap();

    let output = cmd()
        .args(["score", "-f", "json", &get_fixture_path("article.html"), "--lexicon-dir"])
        .arg(lexicon.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["word_count"].as_f64().unwrap() > 0.0);
    assert!(json["positive_score"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_cli_score_empty_is_zero() {
    let lexicon = TempDir::new().unwrap();

    let output = cmd()
        .args(["score", "-f", "json", &get_fixture_path("empty.txt"), "--lexicon-dir"])
        .arg(lexicon.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json.as_object().unwrap().values().all(|v| v.as_f64() == Some(0.0)));
}

#[test]
fn test_cli_score_disable_stopwords() {
    let lexicon = TempDir::new().unwrap();

    let output = cmd()
        .args(["score", "-f", "json", "--stopwords", "disabled", &get_fixture_path("article.txt"), "--lexicon-dir"])
        .arg(lexicon.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["word_count"].as_f64().unwrap() > 82.0);
}

#[test]
fn test_cli_score_invalid_file() {
    let lexicon = TempDir::new().unwrap();

    cmd()
        .args(["score", "nonexistent.txt", "--lexicon-dir"])
        .arg(lexicon.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("nonexistent.txt"));
}

#[test]
fn test_cli_invalid_format() {
    cmd()
        .args(["score", "-f", "xml", &get_fixture_path("article.txt")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_cli_invalid_scorer() {
    cmd()
        .args(["score", "--scorer", "vader", &get_fixture_path("article.txt")])
        .assert()
        .failure();
}

#[cfg(not(feature = "model"))]
#[test]
fn test_cli_model_scorer_unavailable() {
    let lexicon = TempDir::new().unwrap();

    cmd()
        .args(["score", "--scorer", "model", &get_fixture_path("article.txt"), "--lexicon-dir"])
        .arg(lexicon.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("model"));
}

#[test]
fn test_cli_init_lexicon() {
    let tmp = TempDir::new().unwrap();

    cmd()
        .arg("init-lexicon")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("positive-words.txt"));

    assert!(tmp.path().join("MasterDictionary").join("positive-words.txt").exists());
    assert!(tmp.path().join("MasterDictionary").join("negative-words.txt").exists());
    assert!(tmp.path().join("StopWords").is_dir());
}

#[test]
fn test_cli_init_lexicon_keeps_existing() {
    let tmp = TempDir::new().unwrap();
    let master = tmp.path().join("MasterDictionary");
    std::fs::create_dir_all(&master).unwrap();
    std::fs::write(master.join("positive-words.txt"), "custom\n").unwrap();

    cmd().arg("init-lexicon").arg(tmp.path()).assert().success();

    assert_eq!(std::fs::read_to_string(master.join("positive-words.txt")).unwrap(), "custom\n");
}

#[test]
fn test_cli_run_missing_workbook() {
    let lexicon = TempDir::new().unwrap();

    cmd()
        .args(["run", "/nonexistent/input.xlsx", "--lexicon-dir"])
        .arg(lexicon.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open workbook"));
}

#[test]
fn test_cli_run_unreachable_urls_get_blank_cells() {
    let tmp = TempDir::new().unwrap();
    let workbook = tmp.path().join("input.xlsx");
    write_workbook(&workbook, &[("id-1", "not a url"), ("id-2", "ftp://example.com/file")]);

    cmd()
        .arg("run")
        .arg(&workbook)
        .arg("--lexicon-dir")
        .arg(tmp.path().join("lexicon"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Scored 0 of 2 records"));

    let book = umya_spreadsheet::reader::xlsx::read(&workbook).unwrap();
    let sheet = book.get_sheet(&0).unwrap();
    assert_eq!(sheet.get_value((3, 1)), "POSITIVE SCORE");
    assert_eq!(sheet.get_value((15, 1)), "AVG WORD LENGTH");
    assert_eq!(sheet.get_value((1, 2)), "id-1");
    for column in 3..=15 {
        assert_eq!(sheet.get_value((column, 2)), "");
        assert_eq!(sheet.get_value((column, 3)), "");
    }
}

#[test]
fn test_cli_run_missing_url_column() {
    let tmp = TempDir::new().unwrap();
    let workbook = tmp.path().join("input.xlsx");
    let mut book = umya_spreadsheet::new_file();
    book.get_sheet_mut(&0).unwrap().get_cell_mut((1, 1)).set_value("URL_ID");
    umya_spreadsheet::writer::xlsx::write(&book, &workbook).unwrap();

    cmd()
        .arg("run")
        .arg(&workbook)
        .arg("--lexicon-dir")
        .arg(tmp.path().join("lexicon"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("URL"));
}

#[test]
fn test_cli_verbose() {
    let lexicon = TempDir::new().unwrap();

    cmd()
        .args(["-v", "score", &get_fixture_path("article.html"), "--lexicon-dir"])
        .arg(lexicon.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("textmetrics"))
        .stderr(predicate::str::contains("Title:"));
}

#[test]
fn test_cli_run_verbose_reports_configuration() {
    let tmp = TempDir::new().unwrap();
    let workbook = tmp.path().join("input.xlsx");
    write_workbook(&workbook, &[("id-1", "not a url")]);

    cmd()
        .args(["-v", "run"])
        .arg(&workbook)
        .args(["--stopwords", "disabled", "--lexicon-dir"])
        .arg(tmp.path().join("lexicon"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Stopwords:"))
        .stderr(predicate::str::contains("Disabled"));
}
