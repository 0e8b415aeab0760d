use tracing::{debug, info};

use crate::models::{Dataset, Record, Value};

/// Unified identifier column produced for both datasets
pub const PERSON_ID: &str = "person_id";

/// Per-dataset description of which columns to coerce
#[derive(Debug, Clone)]
pub struct DatasetSchema {
    /// Name used in logs
    pub name: String,
    /// Source column holding the numeric identifier
    pub id_column: String,
    /// Column holding the gender category, if any
    pub gender_column: Option<String>,
    /// Columns coerced to numbers
    pub numeric_columns: Vec<String>,
}

impl DatasetSchema {
    /// Sleep health and lifestyle survey
    pub fn sleep() -> Self {
        Self {
            name: "sleep".to_string(),
            id_column: "Person ID".to_string(),
            gender_column: Some("Gender".to_string()),
            numeric_columns: vec![
                "Age".to_string(),
                "Sleep Duration".to_string(),
                "Quality of Sleep".to_string(),
                "Stress Level".to_string(),
            ],
        }
    }

    /// Employee performance and productivity records
    pub fn performance() -> Self {
        Self {
            name: "performance".to_string(),
            id_column: "Employee_ID".to_string(),
            gender_column: Some("Gender".to_string()),
            numeric_columns: vec!["Age".to_string(), "Performance_Score".to_string()],
        }
    }
}

/// Coerce a value to a finite number, or absent
///
/// Thousands-separator commas are stripped before parsing. Empty text,
/// non-numeric text and infinities all become absent.
pub fn to_number(value: &Value) -> Value {
    match value {
        Value::Number(n) if n.is_finite() => Value::Number(*n),
        Value::Text(s) => {
            let stripped: String = s.chars().filter(|&c| c != ',').collect();
            let stripped = stripped.trim();
            if stripped.is_empty() {
                return Value::Absent;
            }
            match stripped.parse::<f64>() {
                Ok(n) if n.is_finite() => Value::Number(n),
                _ => Value::Absent,
            }
        }
        _ => Value::Absent,
    }
}

/// Map a gender value onto exactly one of "Male", "Female" or "Other"
pub fn standardize_gender(value: &Value) -> Value {
    let lower = value.as_text().unwrap_or("").to_lowercase();
    let category = match lower.as_str() {
        "m" | "male" => "Male",
        "f" | "female" | "fem" => "Female",
        _ => "Other",
    };
    Value::from(category)
}

/// Apply schema coercions to one record
///
/// Source columns keep their positions; `person_id` is appended.
pub fn standardize_record(record: &Record, schema: &DatasetSchema) -> Record {
    let mut out = record.clone();
    out.insert(PERSON_ID, to_number(record.value(&schema.id_column)));
    if let Some(gender_column) = &schema.gender_column {
        out.insert(gender_column.as_str(), standardize_gender(record.value(gender_column)));
    }
    for column in &schema.numeric_columns {
        out.insert(column.as_str(), to_number(record.value(column)));
    }
    out
}

/// Stage 1: per-dataset type coercion and categorical normalization
pub fn standardize(dataset: &Dataset, schema: &DatasetSchema) -> Dataset {
    let records: Vec<Record> = dataset
        .iter()
        .map(|r| standardize_record(r, schema))
        .collect();

    let missing_ids = records
        .iter()
        .filter(|r| r.value(PERSON_ID).is_absent())
        .count();
    if missing_ids > 0 {
        debug!(
            "{}: {} rows without a usable {:?}",
            schema.name, missing_ids, schema.id_column
        );
    }

    info!("Stage 1: {} standardized, {} rows", schema.name, records.len());

    Dataset::new(dataset.name.clone(), records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_number() {
        assert_eq!(to_number(&Value::from("1,234")), Value::Number(1234.0));
        assert_eq!(to_number(&Value::from("6.5")), Value::Number(6.5));
        assert_eq!(to_number(&Value::from("-3")), Value::Number(-3.0));
        assert_eq!(to_number(&Value::Number(2.0)), Value::Number(2.0));
    }

    #[test]
    fn test_to_number_absent_cases() {
        for s in ["abc", "", ",", "Infinity", "inf", "NaN", "1e400", "12abc"] {
            assert_eq!(to_number(&Value::from(s)), Value::Absent, "{:?}", s);
        }
        assert_eq!(to_number(&Value::Absent), Value::Absent);
        assert_eq!(to_number(&Value::Number(f64::INFINITY)), Value::Absent);
    }

    #[test]
    fn test_standardize_gender_buckets() {
        for (input, expected) in [
            ("m", "Male"),
            ("MALE", "Male"),
            ("F", "Female"),
            ("Fem", "Female"),
            ("female", "Female"),
            ("non-binary", "Other"),
            ("man", "Other"),
        ] {
            assert_eq!(standardize_gender(&Value::from(input)), Value::from(expected));
        }
        assert_eq!(standardize_gender(&Value::Absent), Value::from("Other"));
    }

    #[test]
    fn test_standardize_sleep_record() {
        let record: Record = [
            ("Person ID", Value::from("7")),
            ("Gender", Value::from("m")),
            ("Age", Value::from("30")),
            ("Sleep Duration", Value::from("6.5")),
            ("Occupation", Value::from("Nurse")),
        ]
        .into_iter()
        .collect();

        let out = standardize_record(&record, &DatasetSchema::sleep());

        assert_eq!(out.value(PERSON_ID), &Value::Number(7.0));
        assert_eq!(out.value("Person ID"), &Value::from("7"));
        assert_eq!(out.value("Gender"), &Value::from("Male"));
        assert_eq!(out.value("Age"), &Value::Number(30.0));
        assert_eq!(out.value("Sleep Duration"), &Value::Number(6.5));
        assert_eq!(out.value("Occupation"), &Value::from("Nurse"));
        // Missing numeric columns surface as absent
        assert_eq!(out.value("Stress Level"), &Value::Absent);
        assert_eq!(
            out.columns().take(6).collect::<Vec<_>>(),
            vec!["Person ID", "Gender", "Age", "Sleep Duration", "Occupation", "person_id"]
        );
    }

    #[test]
    fn test_standardize_performance_missing_id() {
        let record: Record = [
            ("Employee_ID", Value::Absent),
            ("Performance_Score", Value::from("n/a")),
        ]
        .into_iter()
        .collect();

        let out = standardize_record(&record, &DatasetSchema::performance());

        assert!(out.value(PERSON_ID).is_absent());
        assert!(out.value("Performance_Score").is_absent());
        assert_eq!(out.value("Gender"), &Value::from("Other"));
    }
}
