// End-to-end tests for the sanity-check binary.
// Run with: cargo test --test cli -- --nocapture

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use prediction_sanity::exit_codes::{
    EXIT_INVALID_FORMAT, EXIT_NOT_FOUND, EXIT_PARSE, EXIT_PREDICTION, EXIT_SCHEMA, EXIT_USAGE,
};

fn sanity_check(test: &Path, output: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sanity-check"))
        .arg("--test_filename")
        .arg(test)
        .arg("--output_filename")
        .arg(output)
        .env_remove("SANITY_TEST_FILENAME")
        .env_remove("SANITY_OUTPUT_FILENAME")
        .output()
        .expect("failed to run sanity-check")
}

fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn clean_run_prints_single_success_line() {
    let dir = tempfile::tempdir().unwrap();
    let test = write_csv(&dir, "test.csv", "index,group_id,entity_name\n1,10,width\n2,11,voltage\n");
    let output = write_csv(&dir, "test_out.csv", "index,prediction\n1,10.5 centimetre\n2,\n");

    let out = sanity_check(&test, &output);

    assert!(out.status.success());
    assert_eq!(
        stdout(&out),
        format!("Parsing successful for file: {}\n", output.display())
    );
}

#[test]
fn index_mismatch_is_reported_and_run_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let test = write_csv(&dir, "test.csv", "index\n1\n2\n3\n");
    let output = write_csv(&dir, "out.csv", "index,prediction\n2,1 gram\n3,2 kg\n4,3 volt\n");

    let out = sanity_check(&test, &output);
    let text = stdout(&out);

    assert!(out.status.success());
    assert!(text.contains("Missing index in output file: {1}\n"));
    assert!(text.contains("Extra index in output file: {4}\n"));
    assert_eq!(text.matches("Parsing successful").count(), 1);
}

#[test]
fn bad_prediction_exits_with_prediction_code() {
    let dir = tempfile::tempdir().unwrap();
    let test = write_csv(&dir, "test.csv", "index\n1\n2\n");
    let output = write_csv(&dir, "out.csv", "index,prediction\n1,5 gram\n2,five grams\n");

    let out = sanity_check(&test, &output);
    let text = stdout(&out);

    assert_eq!(out.status.code(), Some(EXIT_PREDICTION as i32));
    assert!(text.starts_with("Error: row 2: Invalid format in five grams"));
    assert!(!text.contains("Parsing successful"));
}

#[test]
fn unknown_unit_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let test = write_csv(&dir, "test.csv", "index\n1\n");
    let output = write_csv(&dir, "out.csv", "index,prediction\n1,5 parsec\n");

    let out = sanity_check(&test, &output);

    assert_eq!(out.status.code(), Some(EXIT_PREDICTION as i32));
    assert!(stdout(&out).contains("Invalid unit [parsec]"));
}

#[test]
fn wrong_extension_exits_with_invalid_format() {
    let dir = tempfile::tempdir().unwrap();
    let test = write_csv(&dir, "test.tsv", "index\n1\n");
    let output = write_csv(&dir, "out.csv", "index,prediction\n1,1 gram\n");

    let out = sanity_check(&test, &output);

    assert_eq!(out.status.code(), Some(EXIT_INVALID_FORMAT as i32));
    assert_eq!(stdout(&out), "Error: Only CSV files are allowed.\n");
}

#[test]
fn missing_file_exits_with_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let test = write_csv(&dir, "test.csv", "index\n1\n");
    let output = dir.path().join("nope.csv");

    let out = sanity_check(&test, &output);

    assert_eq!(out.status.code(), Some(EXIT_NOT_FOUND as i32));
    assert_eq!(
        stdout(&out),
        format!("Error: Filepath: {} is invalid or not found.\n", output.display())
    );
}

#[test]
fn malformed_csv_exits_with_parse_code() {
    let dir = tempfile::tempdir().unwrap();
    let test = write_csv(&dir, "test.csv", "");
    let output = write_csv(&dir, "out.csv", "index,prediction\n1,1 gram\n");

    let out = sanity_check(&test, &output);

    assert_eq!(out.status.code(), Some(EXIT_PARSE as i32));
    assert!(stdout(&out).starts_with("Error: Error reading the CSV files:"));
}

#[test]
fn missing_column_exits_with_schema_code() {
    let dir = tempfile::tempdir().unwrap();
    let test = write_csv(&dir, "test.csv", "index\n1\n");
    let output = write_csv(&dir, "out.csv", "index,value\n1,1 gram\n");

    let out = sanity_check(&test, &output);

    assert_eq!(out.status.code(), Some(EXIT_SCHEMA as i32));
    assert_eq!(
        stdout(&out),
        "Error: Output CSV file must contain 'index' and 'prediction' columns.\n"
    );
}

#[test]
fn missing_flag_is_a_usage_error() {
    let out = Command::new(env!("CARGO_BIN_EXE_sanity-check"))
        .arg("--test_filename")
        .arg("test.csv")
        .env_remove("SANITY_OUTPUT_FILENAME")
        .output()
        .expect("failed to run sanity-check");

    assert_eq!(out.status.code(), Some(EXIT_USAGE as i32));
}

#[test]
fn paths_can_come_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let test = write_csv(&dir, "test.csv", "index\n1\n");
    let output = write_csv(&dir, "out.csv", "index,prediction\n1,1 gram\n");

    let out = Command::new(env!("CARGO_BIN_EXE_sanity-check"))
        .env("SANITY_TEST_FILENAME", &test)
        .env("SANITY_OUTPUT_FILENAME", &output)
        .output()
        .expect("failed to run sanity-check");

    assert!(out.status.success());
}

#[test]
fn generated_sample_passes() {
    let dir = tempfile::tempdir().unwrap();
    let gen = Command::new(env!("CARGO_BIN_EXE_generate_sample"))
        .arg("--dir")
        .arg(dir.path())
        .arg("--rows")
        .arg("50")
        .output()
        .expect("failed to run generate_sample");
    assert!(gen.status.success());

    let out = sanity_check(
        &dir.path().join("sample_test.csv"),
        &dir.path().join("sample_test_out.csv"),
    );

    assert!(out.status.success(), "{}", stdout(&out));
    assert!(!stdout(&out).contains("index in output file"));
}
