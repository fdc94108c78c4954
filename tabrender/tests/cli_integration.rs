//! Integration tests for tabrender CLI

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

const SALES: &str = "region,product,units\n\
north,apples,3\n\
south,pears,12\n\
north,plums,7\n";

fn run_tabrender(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_tabrender"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

fn fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn sales(dir: &TempDir) -> PathBuf {
    fixture(dir, "sales.csv", SALES)
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_tabrender(&["--help"]);

    assert!(success);
    assert!(stdout.contains("tabrender"));
    assert!(stdout.contains("--format"));
    assert!(stdout.contains("--group-by"));
    assert!(stdout.contains("--options"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_tabrender(&["--version"]);

    assert!(success);
    assert!(stdout.contains("tabrender"));
}

#[test]
fn test_text_output() {
    let dir = TempDir::new().unwrap();
    let input = sales(&dir);
    let (stdout, _, success) = run_tabrender(&[arg(&input), "--width", "80"]);

    assert!(success);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "+--------------------------+");
    assert_eq!(lines[1], "| region | product | units |");
    assert_eq!(lines[3], "| north  | apples  | 3     |");
    assert_eq!(lines.len(), 7);
}

#[test]
fn test_projection_and_sort() {
    let dir = TempDir::new().unwrap();
    let input = sales(&dir);
    let (stdout, _, success) = run_tabrender(&[
        arg(&input),
        "-f",
        "csv",
        "-c",
        "product,units",
        "-s",
        "units",
        "--desc",
        "--infer-types",
    ]);

    assert!(success);
    assert_eq!(stdout, "product,units\npears,12\nplums,7\napples,3\n");
}

#[test]
fn test_sort_without_type_inference_is_lexical() {
    let dir = TempDir::new().unwrap();
    let input = sales(&dir);
    let (stdout, _, success) =
        run_tabrender(&[arg(&input), "-f", "csv", "-c", "units", "-s", "units"]);

    assert!(success);
    assert_eq!(stdout, "units\n12\n3\n7\n");
}

#[test]
fn test_json_output() {
    let dir = TempDir::new().unwrap();
    let input = sales(&dir);
    let (stdout, _, success) =
        run_tabrender(&[arg(&input), "-f", "json", "--infer-types", "--title", "Sales"]);

    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(parsed["title"], "Sales");
    assert_eq!(parsed["columns"][2], "units");
    assert_eq!(parsed["rows"][1][2], 12);
}

#[test]
fn test_grouped_csv() {
    let dir = TempDir::new().unwrap();
    let input = sales(&dir);
    let (stdout, _, success) = run_tabrender(&[
        arg(&input),
        "-f",
        "csv",
        "-g",
        "region",
        "--grouping-style",
        "justified",
    ]);

    assert!(success);
    assert_eq!(
        stdout,
        "region,product,units\nnorth,apples,3\n,plums,7\nsouth,pears,12\n"
    );
}

#[test]
fn test_grouped_html() {
    let dir = TempDir::new().unwrap();
    let input = sales(&dir);
    let (stdout, _, success) = run_tabrender(&[arg(&input), "-f", "html", "-g", "region"]);

    assert!(success);
    assert!(stdout.contains("<h2>north</h2>"));
    assert!(stdout.contains("<h2>south</h2>"));
    assert_eq!(stdout.matches("<table>").count(), 2);
}

#[test]
fn test_no_headers_and_delimiter() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "plain.txt", "a;1\nb;2\n");
    let (stdout, _, success) = run_tabrender(&[
        arg(&input),
        "-f",
        "csv",
        "-d",
        ";",
        "--no-input-headers",
        "-c",
        "column_2",
    ]);

    assert!(success);
    assert_eq!(stdout, "column_2\n1\n2\n");

    let (stdout, _, success) = run_tabrender(&[arg(&input), "-d", ";", "--no-headers", "-f", "csv"]);
    assert!(success);
    assert_eq!(stdout, "b,2\n");
}

#[test]
fn test_pdf_to_file() {
    let dir = TempDir::new().unwrap();
    let input = sales(&dir);
    let output = dir.path().join("sales.pdf");
    let (stdout, _, success) = run_tabrender(&[arg(&input), "-f", "pdf", "-o", arg(&output)]);

    assert!(success);
    assert!(stdout.is_empty());
    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_options_file() {
    let dir = TempDir::new().unwrap();
    let input = sales(&dir);
    let options = fixture(
        &dir,
        "options.json",
        r#"{"alignment": "right", "show_table_headers": false, "table_width": 100}"#,
    );
    let (stdout, _, success) =
        run_tabrender(&[arg(&input), "--options", arg(&options), "-c", "units"]);

    assert!(success);
    assert_eq!(stdout, "+-------+\n|     3 |\n|    12 |\n|     7 |\n+-------+\n");
}

#[test]
fn test_missing_input_file() {
    let (_, stderr, success) = run_tabrender(&["/nonexistent/input.csv"]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("/nonexistent/input.csv"));
}

#[test]
fn test_unknown_column() {
    let dir = TempDir::new().unwrap();
    let input = sales(&dir);
    let (_, stderr, success) = run_tabrender(&[arg(&input), "-s", "price"]);

    assert!(!success);
    assert!(stderr.contains("unknown column: price"));
}

#[test]
fn test_ragged_input() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "ragged.csv", "a,b\n1,2\n3\n");
    let (_, stderr, success) = run_tabrender(&[arg(&input)]);

    assert!(!success);
    assert!(stderr.contains("line 3"));
}

#[test]
fn test_unsupported_format_rejected_by_parser() {
    let dir = TempDir::new().unwrap();
    let input = sales(&dir);
    let (_, stderr, success) = run_tabrender(&[arg(&input), "-f", "docx"]);

    assert!(!success);
    assert!(stderr.contains("docx"));
}
