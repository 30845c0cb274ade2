//! Runs the `jsonvet` binary over the core crate's fixture documents.

use std::path::PathBuf;
use std::process::Command;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../jsonvet-core/tests/fixtures")
        .join(name)
}

fn run(args: &[&str], inputs: &[PathBuf]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_jsonvet"))
        .args(args)
        .args(inputs)
        .env_remove("JSONVET_LOG")
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .unwrap_or_else(|e| panic!("failed to spawn jsonvet: {e}"));

    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("jsonvet-cli-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn valid_input_exits_zero() {
    let input = fixture("step2/valid2.json");
    let (code, stdout, _) = run(&[], &[input.clone()]);

    assert_eq!(code, 0);
    assert_eq!(stdout, format!("{}: valid\n", input.display()));
}

#[test]
fn invalid_input_exits_non_zero_with_a_diagnostic() {
    let input = fixture("step4/invalid.json");
    let (code, stdout, stderr) = run(&[], &[input.clone()]);

    assert_ne!(code, 0);
    assert_eq!(stdout, format!("{}: invalid\n", input.display()));
    assert!(stderr.contains("unexpected character"), "{stderr}");
    assert!(stderr.contains("line 7, column 13"), "{stderr}");
}

#[test]
fn batch_reports_every_input() {
    let inputs = [
        fixture("step1/valid.json"),
        fixture("step1/invalid.json"),
        fixture("step3/valid.json"),
    ];
    let (code, stdout, _) = run(&[], &inputs);

    assert_ne!(code, 0);
    let verdicts: Vec<_> = stdout.lines().map(|l| l.rsplit(' ').next().unwrap()).collect();
    assert_eq!(verdicts, ["valid", "invalid", "valid"]);
}

#[test]
fn quiet_suppresses_verdicts() {
    let (code, stdout, _) = run(&["--quiet"], &[fixture("step1/valid.json")]);
    assert_eq!(code, 0);
    assert!(stdout.is_empty(), "{stdout}");
}

#[test]
fn duplicate_key_points_at_both_definitions() {
    let input = temp_file("dup.json", br#"{"a": 1, "a": 2}"#);
    let (code, _, stderr) = run(&[], &[input.clone()]);
    std::fs::remove_file(&input).unwrap();

    assert_ne!(code, 0);
    assert!(stderr.contains("first defined here"), "{stderr}");
    assert!(stderr.contains("later redefined here"), "{stderr}");
}

#[test]
fn unreadable_inputs_are_failures() {
    let missing = PathBuf::from("does/not/exist.json");
    let not_utf8 = temp_file("latin1.json", b"{\"a\": \"caf\xe9\"}");

    let (code, stdout, stderr) = run(&[], &[missing, not_utf8.clone()]);
    std::fs::remove_file(&not_utf8).unwrap();

    assert_ne!(code, 0);
    assert_eq!(stdout.matches(": invalid").count(), 2, "{stdout}");
    assert!(stderr.contains("failed to read file"), "{stderr}");
}

#[test]
fn max_depth_flag_overrides_the_default() {
    let input = temp_file("deep.json", br#"{"a": [[1]]}"#);

    let (shallow, _, stderr) = run(&["--max-depth", "2"], &[input.clone()]);
    let (deep, _, _) = run(&["--max-depth", "3"], &[input.clone()]);
    std::fs::remove_file(&input).unwrap();

    assert_ne!(shallow, 0);
    assert!(stderr.contains("nesting deeper than 2 levels"), "{stderr}");
    assert_eq!(deep, 0);
}

#[test]
fn zero_max_depth_is_rejected() {
    let (code, stdout, stderr) = run(&["--max-depth", "0"], &[fixture("step1/valid.json")]);
    assert_ne!(code, 0);
    assert!(stdout.is_empty(), "{stdout}");
    assert!(stderr.contains("--max-depth"), "{stderr}");

    let config = temp_file("zero.toml", b"max_depth = 0\n");
    let (code, stdout, stderr) = run(
        &["--config", config.to_str().unwrap()],
        &[fixture("step1/valid.json")],
    );
    std::fs::remove_file(&config).unwrap();

    assert_ne!(code, 0);
    assert!(stdout.is_empty(), "{stdout}");
    assert!(stderr.contains("at least 1"), "{stderr}");
}

#[test]
fn config_file_sets_max_depth() {
    let config = temp_file("config.toml", b"max_depth = 1\n");
    let (code, _, _) = run(
        &["--config", config.to_str().unwrap()],
        &[fixture("step4/valid2.json")],
    );
    std::fs::remove_file(&config).unwrap();

    // The fixture nests an object and a list inside the top level.
    assert_ne!(code, 0);
}

#[test]
fn missing_config_file_is_an_error() {
    let (code, stdout, stderr) = run(
        &["--config", "nowhere.toml"],
        &[fixture("step1/valid.json")],
    );
    assert_ne!(code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("does not exist"), "{stderr}");
}

#[test]
fn tokens_are_dumped_as_json_lines() {
    let input = fixture("step1/valid.json");
    let (code, stdout, _) = run(&["--tokens", "--quiet"], &[input]);
    assert_eq!(code, 0);

    let records: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["text"], "{");
    assert_eq!(records[0]["line"], 1);
    assert_eq!(records[1]["text"], "}");
}
