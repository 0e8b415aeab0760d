use std::path::Path;

use csv::WriterBuilder;

use crate::error::{PipelineError, Result};
use crate::models::{Dataset, TransformLog};

/// Encode a dataset as CSV text
///
/// The header is the union of all record columns in first-appearance order.
/// Missing and absent values become empty fields. A dataset without records
/// has no known columns and encodes to an empty string.
pub fn encode_csv(dataset: &Dataset) -> Result<String> {
    let columns = dataset.columns();
    if columns.is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record(&columns)
        .map_err(|e| serialize_error(&dataset.name, e))?;

    for record in dataset.iter() {
        writer
            .write_record(columns.iter().map(|c| record.value(c).to_field()))
            .map_err(|e| serialize_error(&dataset.name, e))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| serialize_error(&dataset.name, e.error()))?;
    String::from_utf8(bytes).map_err(|e| serialize_error(&dataset.name, e))
}

/// Encode the transform log as pretty-printed JSON
pub fn encode_log(log: &TransformLog) -> Result<String> {
    serde_json::to_string_pretty(log).map_err(|e| serialize_error("transform log", e))
}

/// Write encoded output to a file
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| PipelineError::io(path, e))
}

fn serialize_error(what: &str, err: impl std::fmt::Display) -> PipelineError {
    PipelineError::Serialize {
        what: what.to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColumnRange, Record, Value};
    use indexmap::IndexMap;

    #[test]
    fn test_encode_csv() {
        let first: Record = [
            ("person_id", Value::Number(7.0)),
            ("Occupation", Value::from("Nurse, ICU")),
            ("Sleep Duration_norm", Value::Absent),
        ]
        .into_iter()
        .collect();
        let second: Record = [
            ("person_id", Value::Number(8.0)),
            ("Occupation", Value::from("Doctor")),
            ("Sleep Duration_norm", Value::Number(0.5)),
        ]
        .into_iter()
        .collect();
        let dataset = Dataset::new("joined", vec![first, second]);

        let csv = encode_csv(&dataset).unwrap();
        assert_eq!(
            csv,
            "person_id,Occupation,Sleep Duration_norm\n7,\"Nurse, ICU\",\n8,Doctor,0.5\n"
        );
    }

    #[test]
    fn test_encode_csv_fills_missing_columns() {
        let first: Record = [("a", Value::from("1"))].into_iter().collect();
        let second: Record = [("b", Value::from("2"))].into_iter().collect();
        let csv = encode_csv(&Dataset::new("t", vec![first, second])).unwrap();
        assert_eq!(csv, "a,b\n1,\n,2\n");
    }

    #[test]
    fn test_encode_empty_dataset() {
        assert_eq!(encode_csv(&Dataset::default()).unwrap(), "");
    }

    #[test]
    fn test_encode_log_pretty() {
        let mut ranges = IndexMap::new();
        ranges.insert("Age".to_string(), ColumnRange::from_values([Some(30.0), Some(41.0)]));
        let json = encode_log(&TransformLog::new(ranges)).unwrap();

        assert!(json.starts_with("{\n  \"steps\": [\n    \"dropUnnamed\","));
        assert!(json.contains("\"Age\": {\n      \"min\": 30,\n      \"max\": 41\n    }"));
    }
}
