use crate::error::{PipelineError, Result};
use crate::models::Dataset;
use crate::stages::to_number;

/// Data-quality summary for one column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub name: String,
    pub present: usize,
    pub absent: usize,
    /// Every present value coerces to a number
    pub numeric: bool,
}

/// Data-quality summary for a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetProfile {
    pub name: String,
    pub rows: usize,
    pub columns: Vec<ColumnProfile>,
}

pub fn profile_dataset(dataset: &Dataset) -> DatasetProfile {
    let columns = dataset
        .columns()
        .into_iter()
        .map(|name| {
            let mut present = 0;
            let mut numeric = true;
            for record in dataset.iter() {
                let value = record.value(&name);
                if value.is_absent() {
                    continue;
                }
                present += 1;
                numeric &= !to_number(value).is_absent();
            }
            ColumnProfile {
                absent: dataset.len() - present,
                numeric: numeric && present > 0,
                name,
                present,
            }
        })
        .collect();

    DatasetProfile {
        name: dataset.name.clone(),
        rows: dataset.len(),
        columns,
    }
}

/// Numeric values of a column, skipping anything that does not coerce
///
/// A dataset without rows yields no values rather than an unknown-column error,
/// since its column set is not known.
pub fn column_values(dataset: &Dataset, column: &str) -> Result<Vec<f64>> {
    if !dataset.is_empty() && !dataset.iter().any(|r| r.contains(column)) {
        return Err(PipelineError::UnknownColumn {
            column: column.to_string(),
            dataset: dataset.name.clone(),
        });
    }

    Ok(dataset
        .iter()
        .filter_map(|r| to_number(r.value(column)).as_number())
        .collect())
}
