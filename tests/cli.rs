//! Integration tests for the one-shot command line (no terminal UI)

use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use std::process::Command;

struct Cleanup(PathBuf);

impl Drop for Cleanup {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn temp_path(name: &str) -> Cleanup {
    Cleanup(std::env::temp_dir().join(format!(
        "sheetchart_cli_{}_{}",
        std::process::id(),
        name
    )))
}

fn sales_file(name: &str) -> Cleanup {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Sales").unwrap();
    sheet.write_string(0, 0, "City").unwrap();
    sheet.write_string(0, 1, "Sales").unwrap();
    sheet.write_string(1, 0, "Munich").unwrap();
    sheet.write_string(1, 1, "5500").unwrap();
    sheet.write_string(2, 0, "Kochi").unwrap();
    sheet.write_string(2, 1, "n/a").unwrap();
    sheet.write_string(3, 0, "Delhi").unwrap();
    sheet.write_number(3, 1, 1200.0).unwrap();

    let file = temp_path(name);
    workbook.save(&file.0).unwrap();
    file
}

fn run_command(file: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_sheetchart"))
        // Tests must not depend on a user's ~/.config/sheetchart/config.toml.
        .arg("--no-config")
        .arg("--no-tui")
        .args(args)
        .arg(file)
        .env_remove("SHEETCHART_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute sheetchart");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

#[test]
fn test_columns() {
    let file = sales_file("columns.xlsx");
    let (stdout, _, code) = run_command(&file.0, &["--columns"]);
    assert_eq!(stdout, "City\nSales\n");
    assert_eq!(code, 0);
}

#[test]
fn test_preview_markdown() {
    let file = sales_file("preview.xlsx");
    let (stdout, _, code) = run_command(&file.0, &["--preview", "--rows", "2"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("# Sales\n"));
    assert!(stdout.contains("| City | Sales |"));
    assert!(stdout.contains("| Munich | 5500 |"));
    assert!(!stdout.contains("Delhi"));
    assert!(stdout.contains("*1 more rows*"));
}

#[test]
fn test_file_only_prints_preview() {
    let file = sales_file("file_only.xlsx");
    let (stdout, _, code) = run_command(&file.0, &[]);
    assert_eq!(code, 0);
    assert!(stdout.contains("| Delhi | 1200 |"));
}

#[test]
fn test_csv_output_zeroes_text_measures() {
    let file = sales_file("csv.xlsx");
    let (stdout, stderr, code) =
        run_command(&file.0, &["-d", "City", "-m", "Sales", "--format", "csv"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "City,Sales\nMunich,5500\nKochi,0\nDelhi,1200\n");
    assert!(stderr.contains("charted as 0"));
}

#[test]
fn test_json_output() {
    let file = sales_file("json.xlsx");
    let (stdout, _, code) =
        run_command(&file.0, &["-d", "City", "-m", "Sales", "--format", "json"]);
    assert_eq!(code, 0);

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["dimension"], "City");
    assert_eq!(json["measure"], "Sales");
    assert_eq!(json["labels"], serde_json::json!(["Munich", "Kochi", "Delhi"]));
    assert_eq!(json["values"], serde_json::json!([5500.0, 0.0, 1200.0]));
}

#[test]
fn test_chart_output() {
    let file = sales_file("chart.xlsx");
    let (stdout, _, code) = run_command(
        &file.0,
        &["-d", "City", "-m", "Sales", "--chart-type", "table", "--width", "60"],
    );
    assert_eq!(code, 0);
    assert!(stdout.starts_with("Training_Title - Sales by City [table]"));
    assert!(stdout.contains("Munich"));
    assert!(stdout.contains("5500"));
}

#[test]
fn test_csv_to_file() {
    let file = sales_file("out.xlsx");
    let out = temp_path("out.csv");
    let out_arg = out.0.to_string_lossy().to_string();
    let (stdout, _, code) = run_command(
        &file.0,
        &["-d", "City", "-m", "Sales", "--format", "csv", "-o", &out_arg],
    );
    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    let written = std::fs::read_to_string(&out.0).unwrap();
    assert!(written.starts_with("City,Sales\n"));
}

#[test]
fn test_unknown_column_is_lenient_by_default() {
    let file = sales_file("lenient.xlsx");
    let (stdout, _, code) =
        run_command(&file.0, &["-d", "Town", "-m", "Sales", "--format", "csv"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "Town,Sales\n,5500\n,0\n,1200\n");
}

#[test]
fn test_unknown_column_strict_fails() {
    let file = sales_file("strict.xlsx");
    let (stdout, stderr, code) = run_command(
        &file.0,
        &["--strict", "-d", "Town", "-m", "Sales", "--format", "csv"],
    );
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("Town"));
}

#[test]
fn test_malformed_file_fails() {
    let file = temp_path("broken.xlsx");
    std::fs::write(&file.0, b"PK\x03\x04 definitely not a workbook").unwrap();
    let (stdout, stderr, code) = run_command(&file.0, &["--columns"]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("Error: failed to load"));
}

#[test]
fn test_missing_file_fails() {
    let missing = std::env::temp_dir().join("sheetchart_cli_missing.xlsx");
    let (_, stderr, code) = run_command(&missing, &["--columns"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("sheetchart_cli_missing.xlsx"));
}
