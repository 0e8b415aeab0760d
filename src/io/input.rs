use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::models::{Dataset, Record, Value};

/// What to do with a row whose field count differs from the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RaggedRowPolicy {
    /// Fail the parse with the offending record position
    #[default]
    Reject,
    /// Pad missing trailing fields with empty text, drop extra ones
    PadOrTruncate,
}

/// Configuration for delimited-text parsing
#[derive(Debug, Clone, Default)]
pub struct ParseConfig {
    pub ragged_rows: RaggedRowPolicy,
}

/// Read and parse a CSV file into a raw-text Dataset
pub fn parse_csv_file(path: &Path, config: &ParseConfig) -> Result<Dataset> {
    let content = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
    parse_csv_str(&source_name(path), &content, config)
}

/// Read both input files concurrently, then parse them
///
/// Returns `(sleep, performance)`. The reads are independent; parsing starts
/// only once both files are in memory.
pub async fn read_dataset_pair(
    sleep_path: &Path,
    performance_path: &Path,
    config: &ParseConfig,
) -> Result<(Dataset, Dataset)> {
    let (sleep_text, performance_text) =
        tokio::try_join!(read_text(sleep_path), read_text(performance_path))?;

    let sleep = parse_csv_str(&source_name(sleep_path), &sleep_text, config)?;
    let performance = parse_csv_str(&source_name(performance_path), &performance_text, config)?;
    Ok((sleep, performance))
}

async fn read_text(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| PipelineError::io(path, e))
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse CSV text with a header row into a Dataset of raw text fields
///
/// Header names and field values are kept exactly as written; trimming and
/// absence detection belong to the cleaning stage.
pub fn parse_csv_str(name: &str, text: &str, config: &ParseConfig) -> Result<Dataset> {
    if let Some(line) = find_unterminated_quote(text) {
        return Err(PipelineError::parse(
            name,
            format!("unterminated quoted field starting on line {}", line),
        ));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(config.ragged_rows == RaggedRowPolicy::PadOrTruncate)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| PipelineError::parse(name, e.to_string()))?
        .clone();

    if headers.is_empty() {
        return Err(PipelineError::parse(name, "missing header row"));
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| PipelineError::parse(name, e.to_string()))?;
        let record: Record = headers
            .iter()
            .enumerate()
            .map(|(i, column)| (column, Value::text(row.get(i).unwrap_or(""))))
            .collect();
        records.push(record);
    }

    debug!(
        "Parsed {}: {} columns, {} rows",
        name,
        headers.len(),
        records.len()
    );

    Ok(Dataset::new(name, records))
}

/// Line number of a quoted field that never closes, if any
///
/// A quote only opens a quoted field at the start of a field; `""` inside a
/// quoted field is an escaped quote.
fn find_unterminated_quote(text: &str) -> Option<usize> {
    let mut line = 1;
    let mut at_field_start = true;
    let mut open_line: Option<usize> = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if open_line.is_some() {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                }
                '"' => {
                    open_line = None;
                    at_field_start = false;
                }
                '\n' => line += 1,
                _ => {}
            }
            continue;
        }

        match c {
            '"' if at_field_start => open_line = Some(line),
            ',' | '\r' => at_field_start = true,
            '\n' => {
                line += 1;
                at_field_start = true;
            }
            _ => at_field_start = false,
        }
    }

    open_line
}
