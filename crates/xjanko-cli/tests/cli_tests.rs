//! CLI integration tests.
//!
//! Spawn the `xjanko` binary with `assert_cmd` against record trees built in
//! temporary directories.

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SUDOKU_375: &str = "begin
puzzle sudoku
author Otto Janko
size 4
patternx 2
patterny 2
problem
- - 3 1
- - - -
- - - -
1 4 - -
solution
4 2 3 1
3 1 4 2
2 3 1 4
1 4 2 3
end
";

const LITRO: &str = "begin\nsize 2\nproblem\n1 -\n- -\nareas\na a\nb b\nend\n";

fn xjanko() -> Command {
    cargo_bin_cmd!("xjanko")
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

// ============================================================================
// Help and Catalog
// ============================================================================

#[test]
fn test_help() {
    xjanko()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("x-janko puzzle record extractor"));
}

#[test]
fn test_categories_lists_catalog() {
    xjanko()
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("/Sudoku"))
        .stdout(predicate::str::contains("/Nanro/Litro"));
}

#[test]
fn test_check_reports_unlisted_directory() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("Sudoku/001.txt"), SUDOKU_375);
    write(&tmp.path().join("Unknown-Puzzle/001.txt"), "begin\nend\n");
    fs::create_dir_all(tmp.path().join("Drafts")).unwrap();
    fs::create_dir_all(tmp.path().join("Nikoli/img")).unwrap();

    xjanko()
        .arg("check")
        .arg("--input-dir")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("no catalog entry: /Unknown-Puzzle"))
        .stdout(predicate::str::contains("no files: /Akari"))
        .stdout(predicate::str::contains("no files: /Sudoku\n").not())
        .stdout(predicate::str::contains("unknown empty directory: /Drafts"))
        .stdout(predicate::str::contains("/Nikoli").not());
}

// ============================================================================
// Extract
// ============================================================================

#[test]
fn test_extract_to_stdout() {
    let tmp = TempDir::new().unwrap();
    let page = tmp.path().join("375.htm");
    write(
        &page,
        "<html><body>\r\n<script id=\"data\" type=\"application/x-janko\">\r\n\
         begin\r\nsize 4\r\nend\r\n</script></body></html>",
    );

    xjanko()
        .arg("extract")
        .arg(&page)
        .assert()
        .success()
        .stdout("\nbegin\nsize 4\nend\n");
}

#[test]
fn test_extract_to_file() {
    let tmp = TempDir::new().unwrap();
    let page = tmp.path().join("375.htm");
    let out = tmp.path().join("375.x-janko");
    write(&page, "<SCRIPT ID=data TYPE=application/x-janko>begin\nend</SCRIPT>");

    xjanko().arg("extract").arg(&page).arg("-o").arg(&out).assert().success();

    assert_eq!(fs::read_to_string(&out).unwrap(), "begin\nend\n");
}

#[test]
fn test_extract_without_data_is_skipped() {
    let tmp = TempDir::new().unwrap();
    let page = tmp.path().join("index.htm");
    write(&page, "<html><body><p>Inhalt</p></body></html>");

    xjanko()
        .arg("extract")
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no \"data\" element"));
}

#[test]
fn test_extract_wrong_type_fails() {
    let tmp = TempDir::new().unwrap();
    let page = tmp.path().join("odd.htm");
    write(&page, "<div id=\"data\" type=\"text/plain\">x</div>");

    xjanko()
        .arg("extract")
        .arg(&page)
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected application/x-janko"));
}

#[test]
fn test_extract_tree_mirrors_input() {
    let tmp = TempDir::new().unwrap();
    let www = tmp.path().join("www");
    let out = tmp.path().join("x-janko");
    let page = "<script id=\"data\" type=\"application/x-janko\">\nbegin\nsize 4\nend\n</script>";
    write(&www.join("Sudoku/375.htm"), page);
    write(&www.join("Sudoku/376.html"), page);
    write(&www.join("Sudoku/375.png"), "PNG");
    write(&www.join("Sudoku/style.css"), "p {}");
    write(&www.join("readme.txt"), "notes");
    fs::create_dir_all(www.join("Akari")).unwrap();
    write(&out.join("Sudoku/376.x-janko"), "kept\n");

    xjanko()
        .arg("extract")
        .arg("--input-dir")
        .arg(&www)
        .arg("--out-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote 1 record(s)"))
        .stdout(predicate::str::contains("(1 existing, 0 without data, 1 unsupported)"))
        .stderr(predicate::str::contains("unsupported type"))
        .stderr(predicate::str::contains("style.css").not());

    assert_eq!(
        fs::read_to_string(out.join("Sudoku/375.x-janko")).unwrap(),
        "\nbegin\nsize 4\nend\n"
    );
    assert_eq!(fs::read_to_string(out.join("Sudoku/376.x-janko")).unwrap(), "kept\n");
    assert!(!out.join("Sudoku/style.x-janko").exists());
    assert!(out.join("Akari").is_dir());
}

#[test]
fn test_extract_tree_requires_out_dir() {
    let tmp = TempDir::new().unwrap();

    xjanko()
        .arg("extract")
        .arg("--input-dir")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--out-dir"));
}

// ============================================================================
// Parse
// ============================================================================

#[test]
fn test_parse_json() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("375.txt");
    write(&file, SUDOKU_375);

    xjanko()
        .arg("parse")
        .arg(&file)
        .args(["--category", "/Sudoku", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"patternx\": 2"))
        .stdout(predicate::str::contains("\"author\": \"Otto Janko\""));
}

#[test]
fn test_parse_text_summary() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("375.txt");
    write(&file, SUDOKU_375);

    xjanko()
        .arg("parse")
        .arg(&file)
        .args(["--category", "/Sudoku"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parser: 0 of 3"))
        .stdout(predicate::str::contains("problem: grid 4x4"));
}

#[test]
fn test_parse_unknown_category() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("375.txt");
    write(&file, SUDOKU_375);

    xjanko()
        .arg("parse")
        .arg(&file)
        .args(["--category", "/Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: unknown category: /Nope"));
}

#[test]
fn test_parse_rejected_by_all_candidates() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("bad.txt");
    write(&file, "begin\nwidth 3\nend\n");

    xjanko()
        .arg("parse")
        .arg(&file)
        .args(["--category", "/Sudoku"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("parser 2: unknown property: width"));
}

// ============================================================================
// Batch
// ============================================================================

#[test]
fn test_batch_writes_jsonl_in_name_order() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("in");
    write(&input.join("Sudoku/002.txt"), SUDOKU_375);
    write(&input.join("Sudoku/001.txt"), SUDOKU_375);
    let out = tmp.path().join("out/Sudoku.jsonl");

    xjanko()
        .args(["batch", "/Sudoku", "--input-dir"])
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("failed files (0):"))
        .stdout(predicate::str::contains("(2 objects)"));

    let written = fs::read_to_string(&out).unwrap();
    let lines: Vec<_> = written.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(
        r#"{"file":"/Sudoku/001.txt","data":{"puzzle":"sudoku","author":"Otto Janko","size":4"#
    ));
    assert!(lines[1].starts_with(r#"{"file":"/Sudoku/002.txt""#));
}

#[test]
fn test_batch_failure_still_writes_output() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("Sudoku/001.txt"), SUDOKU_375);
    write(&tmp.path().join("Sudoku/bad.txt"), "begin\nwidth 3\nend\n");
    let out = tmp.path().join("Sudoku.jsonl");

    xjanko()
        .args(["batch", "/Sudoku", "--input-dir"])
        .arg(tmp.path())
        .arg("--out")
        .arg(&out)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("failed files (1):\n/Sudoku/bad.txt"))
        .stderr(predicate::str::contains("1 file(s) failed to parse"));

    assert_eq!(fs::read_to_string(&out).unwrap().lines().count(), 1);
}

#[test]
fn test_batch_unknown_category() {
    let tmp = TempDir::new().unwrap();

    xjanko()
        .args(["batch", "/Nope", "--input-dir"])
        .arg(tmp.path())
        .arg("--out")
        .arg(tmp.path().join("x.jsonl"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category: /Nope"));
}

#[test]
fn test_all_names_outputs_by_category() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("in");
    let out_dir = tmp.path().join("jsonl");
    write(&input.join("Sudoku/001.txt"), SUDOKU_375);
    write(&input.join("Nanro/Litro/001.txt"), LITRO);

    xjanko()
        .arg("all")
        .arg("--input-dir")
        .arg(&input)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("== /Nanro/Litro"));

    let litro = fs::read_to_string(out_dir.join("Nanro_Litro.jsonl")).unwrap();
    assert!(litro.starts_with(r#"{"file":"/Nanro/Litro/001.txt""#));
    assert!(out_dir.join("Sudoku.jsonl").is_file());
    assert!(!out_dir.join("Akari.jsonl").exists());
}
