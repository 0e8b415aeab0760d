use indexmap::IndexMap;
use tracing::{info, warn};

use super::stage1_standardize::to_number;
use crate::models::{ColumnRange, Dataset, Record, Value};

/// Configuration for Stage 3 min-max normalization
#[derive(Debug, Clone)]
pub struct NormalizeConfig {
    /// Columns to rescale, in the order their ranges are reported
    pub columns: Vec<String>,
    /// Suffix appended to each rescaled column name
    pub suffix: String,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            columns: vec![
                "Sleep Duration".to_string(),
                "Quality of Sleep".to_string(),
                "Stress Level".to_string(),
                "Performance_Score".to_string(),
                "Age".to_string(),
            ],
            suffix: "_norm".to_string(),
        }
    }
}

/// Result of Stage 3 normalization
#[derive(Debug)]
pub struct NormalizeResult {
    /// Joined records with `<column><suffix>` fields appended
    pub normalized: Dataset,
    /// Range per configured column
    pub ranges: IndexMap<String, ColumnRange>,
}

fn numeric(record: &Record, column: &str) -> Option<f64> {
    to_number(record.value(column)).as_number()
}

/// Compute the range of each configured column over the whole dataset
pub fn compute_ranges(dataset: &Dataset, columns: &[String]) -> IndexMap<String, ColumnRange> {
    columns
        .iter()
        .map(|column| {
            let range = ColumnRange::from_values(dataset.iter().map(|r| numeric(r, column)));
            (column.clone(), range)
        })
        .collect()
}

/// Execute Stage 3: append a [0, 1] rescaled column for each configured column
///
/// Original columns are left untouched. Absent source values, empty columns
/// and constant columns all produce absent rescaled values.
pub fn execute_normalize(dataset: &Dataset, config: &NormalizeConfig) -> NormalizeResult {
    let ranges = compute_ranges(dataset, &config.columns);

    for (column, range) in &ranges {
        if range.is_degenerate() {
            warn!(
                "Stage 3: column {:?} has no spread (min={:?}, max={:?}); {}{} left empty",
                column, range.min, range.max, column, config.suffix
            );
        }
    }

    let records = dataset
        .iter()
        .map(|record| {
            let mut out = record.clone();
            for (column, range) in &ranges {
                let scaled = range
                    .scale(numeric(record, column))
                    .map_or(Value::Absent, Value::Number);
                out.insert(format!("{}{}", column, config.suffix), scaled);
            }
            out
        })
        .collect();

    info!(
        "Stage 3: normalized {} columns over {} rows",
        ranges.len(),
        dataset.len()
    );

    NormalizeResult {
        normalized: Dataset::new(dataset.name.clone(), records),
        ranges,
    }
}
