use crate::error::{Error, Result};
use crate::models::UploadResponse;
use crate::report::{COLUMNS, Report};
use csv::WriterBuilder;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Read an upload-service response from a JSON file.
pub fn load_response<P: AsRef<Path>>(path: P) -> Result<UploadResponse> {
    let f = File::open(path)?;
    let resp = serde_json::from_reader(BufReader::new(f))?;
    Ok(resp)
}

/// Spreadsheet apps evaluate cells starting with these characters as formulas.
fn guard_cell(s: &str) -> String {
    match s.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') if s != crate::format::ABSENT => {
            format!("'{}", s)
        }
        _ => s.to_string(),
    }
}

/// Save report rows as CSV with header; cells hold the rendered display strings.
pub fn save_csv<P: AsRef<Path>>(report: &Report, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    let mut header = vec!["group", "label", "is_main", "is_total", "count", "percentage"];
    header.extend(COLUMNS.iter().map(|c| c.key()));
    wtr.write_record(&header)?;

    for row in &report.rows {
        let mut rec = vec![
            guard_cell(&row.group),
            guard_cell(&row.label),
            row.is_main.to_string(),
            row.is_total.to_string(),
            row.count.to_string(),
            row.percentage.clone(),
        ];
        rec.extend(row.cells.iter().map(|c| c.display.clone()));
        wtr.write_record(&rec)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the report (values, display strings and intensities) as pretty JSON.
pub fn save_json<P: AsRef<Path>>(report: &Report, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(report)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save in the format named by `format`, or inferred from the extension (default CSV).
pub fn save<P: AsRef<Path>>(report: &Report, path: P, format: Option<&str>) -> Result<()> {
    let path = path.as_ref();
    let fmt = format
        .or_else(|| path.extension().and_then(|e| e.to_str()))
        .unwrap_or("csv")
        .to_ascii_lowercase();
    match fmt.as_str() {
        "csv" => save_csv(report, path),
        "json" => save_json(report, path),
        other => Err(Error::UnsupportedFormat(other.to_string())),
    }
}
