use tracing::{debug, info};

use crate::models::{Dataset, Record, Value};

/// Values treated as missing, compared case-insensitively after trimming
pub const ABSENCE_SENTINELS: [&str; 6] = ["na", "n/a", "null", "none", "nan", "undefined"];

/// Column-name prefix left behind by spreadsheet exports for unlabeled index columns
pub const ARTIFACT_COLUMN_PREFIX: &str = "unnamed";

/// Trim a value and map blanks and sentinels to absent
pub fn normalize_absence(value: &Value) -> Value {
    match value {
        Value::Text(s) => {
            let trimmed = s.trim();
            let lower = trimmed.to_lowercase();
            if trimmed.is_empty() || ABSENCE_SENTINELS.contains(&lower.as_str()) {
                Value::Absent
            } else {
                Value::Text(trimmed.to_string())
            }
        }
        other => other.clone(),
    }
}

fn is_artifact_column(column: &str) -> bool {
    column
        .get(..ARTIFACT_COLUMN_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(ARTIFACT_COLUMN_PREFIX))
}

/// Remove columns whose name starts with "unnamed" (any case)
///
/// The kept column set is taken from the first record and applied to every
/// record; columns not present in the first record are dropped as well.
pub fn drop_artifact_columns(dataset: &Dataset) -> Dataset {
    let Some(first) = dataset.records.first() else {
        return dataset.clone();
    };

    let (keep, dropped): (Vec<&str>, Vec<&str>) =
        first.columns().partition(|c| !is_artifact_column(c));
    if !dropped.is_empty() {
        debug!("{}: dropping artifact columns {:?}", dataset.name, dropped);
    }

    let records = dataset
        .iter()
        .map(|record| {
            keep.iter()
                .map(|&c| (c, record.value(c).clone()))
                .collect::<Record>()
        })
        .collect();

    Dataset::new(dataset.name.clone(), records)
}

/// Stage 0: trim column names, normalize absence, drop artifact columns
pub fn clean(dataset: &Dataset) -> Dataset {
    let records = dataset
        .iter()
        .map(|record| {
            record
                .iter()
                .map(|(column, value)| (column.trim(), normalize_absence(value)))
                .collect::<Record>()
        })
        .collect();

    let cleaned = drop_artifact_columns(&Dataset::new(dataset.name.clone(), records));

    info!(
        "Stage 0: {} cleaned, {} rows, {} columns",
        cleaned.name,
        cleaned.len(),
        cleaned.records.first().map(Record::len).unwrap_or(0)
    );

    cleaned
}
