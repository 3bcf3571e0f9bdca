use std::fs;

use sqlpilot::audit::{AuditLog, AuditRecord, TurnStatus, AUDIT_HEADER};
use tempfile::TempDir;

fn read_rows(path: &std::path::Path) -> (csv::StringRecord, Vec<csv::StringRecord>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().clone();
    let rows = reader.records().map(|r| r.unwrap()).collect();
    (headers, rows)
}

#[test]
fn test_first_record_writes_header_and_row() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("agent_summary.csv");

    let log = AuditLog::new(&path);
    let record = AuditRecord::new(
        "how much is the gaming mouse",
        TurnStatus::Finished,
        "The Gaming Mouse costs 1500 baht.",
        "SELECT price FROM products WHERE product_name = 'Gaming Mouse'",
    );
    log.record(&record).unwrap();

    let (headers, rows) = read_rows(&path);
    assert_eq!(headers, csv::StringRecord::from(AUDIT_HEADER.to_vec()));
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][1], "how much is the gaming mouse");
    assert_eq!(&rows[0][2], "Finished");
    assert_eq!(&rows[0][3], "The Gaming Mouse costs 1500 baht.");
    assert_eq!(
        &rows[0][4],
        "SELECT price FROM products WHERE product_name = 'Gaming Mouse'"
    );
}

#[test]
fn test_timestamp_format() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("agent_summary.csv");

    let log = AuditLog::new(&path);
    log.record(&AuditRecord::new("q", TurnStatus::Finished, "a", "N/A"))
        .unwrap();

    let (_, rows) = read_rows(&path);
    let parsed = chrono::NaiveDateTime::parse_from_str(&rows[0][0], "%Y-%m-%d %H:%M:%S");
    assert!(parsed.is_ok(), "unexpected timestamp: {}", &rows[0][0]);
}

#[test]
fn test_header_written_once_across_records() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("agent_summary.csv");

    let log = AuditLog::new(&path);
    for i in 0..3 {
        let record = AuditRecord::new(
            format!("query {}", i),
            TurnStatus::Finished,
            format!("answer {}", i),
            "N/A",
        );
        log.record(&record).unwrap();
    }

    let raw = fs::read_to_string(&path).unwrap();
    assert_eq!(raw.matches("DateTime").count(), 1);

    let (_, rows) = read_rows(&path);
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][1], "query 0");
    assert_eq!(&rows[2][1], "query 2");
}

#[test]
fn test_error_status_recorded() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("agent_summary.csv");

    let log = AuditLog::new(&path);
    log.record(&AuditRecord::new("ok", TurnStatus::Finished, "fine", "N/A"))
        .unwrap();
    log.record(&AuditRecord::new("broken", TurnStatus::Error, "fallback", "N/A"))
        .unwrap();

    let (_, rows) = read_rows(&path);
    assert_eq!(&rows[0][2], "Finished");
    assert_eq!(&rows[1][2], "Error");
}

#[test]
fn test_fields_with_commas_quotes_and_newlines_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("agent_summary.csv");

    let response = "Found 2 items: \"Gaming Mouse\", \"Mechanical Keyboard\".\nBoth in stock.";
    let log = AuditLog::new(&path);
    log.record(&AuditRecord::new(
        "list peripherals, cheapest first",
        TurnStatus::Finished,
        response,
        "SELECT product_name FROM products ORDER BY price",
    ))
    .unwrap();

    let (_, rows) = read_rows(&path);
    assert_eq!(&rows[0][1], "list peripherals, cheapest first");
    assert_eq!(&rows[0][3], response);
}

#[test]
fn test_reopened_log_appends_without_second_header() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("agent_summary.csv");

    {
        let log = AuditLog::new(&path);
        log.record(&AuditRecord::new("first", TurnStatus::Finished, "a", "N/A"))
            .unwrap();
    }
    {
        let log = AuditLog::new(&path);
        log.record(&AuditRecord::new("second", TurnStatus::Finished, "b", "N/A"))
            .unwrap();
    }

    let raw = fs::read_to_string(&path).unwrap();
    assert_eq!(raw.matches("DateTime").count(), 1);

    let (_, rows) = read_rows(&path);
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[1][1], "second");
}

#[test]
fn test_record_fails_when_path_is_a_directory() {
    let temp_dir = TempDir::new().unwrap();

    let log = AuditLog::new(temp_dir.path());
    let result = log.record(&AuditRecord::new("q", TurnStatus::Finished, "a", "N/A"));
    assert!(result.is_err());
}

#[test]
fn test_log_reports_its_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("agent_summary.csv");

    let log = AuditLog::new(&path);
    assert_eq!(log.path(), path.as_path());
}
