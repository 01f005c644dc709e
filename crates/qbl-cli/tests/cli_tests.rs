//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

const BANK: &str = "\
% three-question sample bank
#:apple #algebra
What is 2 + 2?
- 3
* 4

#:banana #algebra #easy
What is 1 + 1?
* 2
- 3

#:cherry #geometry
How many sides does a triangle have?
* 3
- 4
";

fn qbl() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("qbl").unwrap()
}

fn write_bank(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("bank.qbl");
    std::fs::write(&path, BANK).unwrap();
    path
}

#[test]
fn default_renders_canonical_to_stdout() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir);

    qbl()
        .arg(&bank)
        .assert()
        .success()
        .stdout(predicate::str::contains("#:apple #algebra\nWhat is 2 + 2?\n- 3\n* 4\n"))
        .stdout(predicate::str::contains("#:cherry #geometry\n"));
}

#[test]
fn format_is_inferred_from_output_extension() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir);
    let out = dir.path().join("quiz.csv");

    qbl().arg(&bank).arg("-o").arg(&out).assert().success();

    let csv = std::fs::read_to_string(&out).unwrap();
    assert!(csv.contains("NewQuestion,MC"));
    assert!(csv.contains("ID,apple"));
}

#[test]
fn explicit_format_flag_beats_extension() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir);
    let out = dir.path().join("quiz.csv");

    qbl()
        .arg(&bank)
        .arg("--latex")
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let body = std::fs::read_to_string(&out).unwrap();
    assert!(body.starts_with("\\documentclass"));
}

#[test]
fn conflicting_format_flags_are_rejected() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir);

    qbl().arg(&bank).arg("--d2l").arg("--latex").assert().failure();
}

#[test]
fn web_output_requires_a_file() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir);

    qbl()
        .arg(&bank)
        .arg("--web")
        .assert()
        .failure()
        .stderr(predicate::str::contains("web output must go to files"));
}

#[test]
fn web_output_writes_three_artifacts() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir);
    let out = dir.path().join("quiz.html");

    qbl().arg(&bank).arg("-o").arg(&out).assert().success();

    assert!(dir.path().join("quiz.html").exists());
    assert!(dir.path().join("quiz.js").exists());
    assert!(dir.path().join("quiz.css").exists());

    let html = std::fs::read_to_string(dir.path().join("quiz.html")).unwrap();
    assert!(html.contains("<link rel=\"stylesheet\" href=\"quiz.css\">"));
    assert!(html.contains("<script src=\"quiz.js\">"));
    assert!(html.contains("name=\"apple\""));

    let js = std::fs::read_to_string(dir.path().join("quiz.js")).unwrap();
    assert!(js.contains("\"apple\": \"4\""));
}

#[test]
fn gradescope_compressed_uses_oneparchoices() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir);

    qbl()
        .arg(&bank)
        .arg("--gradescope")
        .arg("--compressed")
        .assert()
        .success()
        .stdout(predicate::str::contains("\\begin{oneparchoices}"));
}

#[test]
fn title_flag_reaches_latex_output() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir);

    qbl()
        .arg(&bank)
        .arg("--latex")
        .arg("--title")
        .arg("Practice Final")
        .assert()
        .success()
        .stdout(predicate::str::contains("\\title{Practice Final}"));
}

#[test]
fn id_order_sorts_numerically() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("numbered.qbl");
    std::fs::write(
        &path,
        "#:q10\nTenth?\n* yes\n\n#:q2\nSecond?\n* yes\n\n#:q1\nFirst?\n* yes\n",
    )
    .unwrap();

    let output = qbl().arg(&path).arg("-O").arg("id").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let p1 = stdout.find("#:q1\n").unwrap();
    let p2 = stdout.find("#:q2\n").unwrap();
    let p10 = stdout.find("#:q10\n").unwrap();
    assert!(p1 < p2 && p2 < p10);
}

#[test]
fn invalid_order_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir);

    qbl()
        .arg(&bank)
        .arg("-O")
        .arg("sideways")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown order"));
}

#[test]
fn validation_errors_abort_before_rendering() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.qbl");
    std::fs::write(&path, "No correct answer here?\n- a\n- b\n").unwrap();

    qbl()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no option marked correct"))
        .stderr(predicate::str::contains("validation error"));
}

#[test]
fn duplicate_ids_across_files_abort() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.qbl");
    let b = dir.path().join("b.qbl");
    std::fs::write(&a, "#:same\nFirst?\n* yes\n").unwrap();
    std::fs::write(&b, "#:same\nSecond?\n* yes\n").unwrap();

    qbl()
        .arg(&a)
        .arg(&b)
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate question id"));
}

#[test]
fn missing_input_file_names_the_path() {
    qbl()
        .arg("no_such_bank.qbl")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no_such_bank.qbl"));
}

#[test]
fn unsatisfiable_sample_tag_names_the_tag() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir);

    qbl()
        .arg(&bank)
        .arg("-g")
        .arg("1")
        .arg("-s")
        .arg("calculus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("calculus"));
}

#[test]
fn help_output() {
    qbl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question Bank Language quiz generator"));
}

#[test]
fn version_output() {
    qbl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("qbl"));
}
