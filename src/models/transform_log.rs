use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use super::record::serialize_number;

/// Stage names recorded in every transform log, in execution order
pub const PIPELINE_STEPS: [&str; 4] = ["dropUnnamed", "standardize", "join", "normalize"];

/// Observed range of one numeric column across the joined dataset
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ColumnRange {
    /// Smallest present value (None if the column had no numeric values)
    #[serde(serialize_with = "serialize_bound")]
    pub min: Option<f64>,
    /// Largest present value (None if the column had no numeric values)
    #[serde(serialize_with = "serialize_bound")]
    pub max: Option<f64>,
}

impl ColumnRange {
    /// Compute the range over the present values, skipping `None`
    pub fn from_values(values: impl IntoIterator<Item = Option<f64>>) -> Self {
        values
            .into_iter()
            .flatten()
            .fold(ColumnRange::default(), |range, v| ColumnRange {
                min: Some(range.min.map_or(v, |m| m.min(v))),
                max: Some(range.max.map_or(v, |m| m.max(v))),
            })
    }

    /// True when no value can be rescaled (empty or constant column)
    pub fn is_degenerate(&self) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => min == max,
            _ => true,
        }
    }

    /// Min-max scale a value into [0, 1]
    ///
    /// Returns None for absent input and for degenerate ranges.
    pub fn scale(&self, value: Option<f64>) -> Option<f64> {
        let (min, max) = (self.min?, self.max?);
        let value = value?;
        if max == min {
            return None;
        }
        let scaled = if (max - min).is_infinite() {
            // spread exceeds f64 range; halve the operands
            (value / 2.0 - min / 2.0) / (max / 2.0 - min / 2.0)
        } else {
            (value - min) / (max - min)
        };
        Some(scaled.clamp(0.0, 1.0))
    }
}

fn serialize_bound<S: Serializer>(bound: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match bound {
        Some(n) => serialize_number(*n, serializer),
        None => serializer.serialize_none(),
    }
}

/// Record of what a pipeline run did, written next to the joined output
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TransformLog {
    /// Ordered stage names
    pub steps: Vec<String>,
    /// Range per normalized column, in configured column order
    pub ranges: IndexMap<String, ColumnRange>,
}

impl TransformLog {
    pub fn new(ranges: IndexMap<String, ColumnRange>) -> Self {
        Self {
            steps: PIPELINE_STEPS.iter().map(|s| s.to_string()).collect(),
            ranges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_from_values() {
        let range = ColumnRange::from_values([Some(3.0), None, Some(1.0), Some(2.0)]);
        assert_eq!(range.min, Some(1.0));
        assert_eq!(range.max, Some(3.0));
        assert!(!range.is_degenerate());
    }

    #[test]
    fn test_scale_endpoints() {
        let range = ColumnRange::from_values([Some(4.0), Some(8.0)]);
        assert_eq!(range.scale(Some(4.0)), Some(0.0));
        assert_eq!(range.scale(Some(8.0)), Some(1.0));
        assert_eq!(range.scale(Some(6.0)), Some(0.5));
        assert_eq!(range.scale(None), None);
    }

    #[test]
    fn test_scale_spread_beyond_f64_range() {
        let range = ColumnRange::from_values([Some(-1e308), Some(1e308), Some(0.0)]);
        assert_eq!(range.scale(Some(-1e308)), Some(0.0));
        assert_eq!(range.scale(Some(1e308)), Some(1.0));
        assert_eq!(range.scale(Some(0.0)), Some(0.5));
    }

    #[test]
    fn test_degenerate_ranges() {
        let empty = ColumnRange::from_values([None, None]);
        assert_eq!(empty, ColumnRange { min: None, max: None });
        assert!(empty.is_degenerate());
        assert_eq!(empty.scale(Some(1.0)), None);

        let constant = ColumnRange::from_values([Some(5.0), Some(5.0)]);
        assert_eq!(constant.min, Some(5.0));
        assert_eq!(constant.max, Some(5.0));
        assert_eq!(constant.scale(Some(5.0)), None);
    }

    #[test]
    fn test_log_json_shape() {
        let mut ranges = IndexMap::new();
        ranges.insert("Stress Level".to_string(), ColumnRange::from_values([Some(3.0), Some(8.5)]));
        ranges.insert("Age".to_string(), ColumnRange::default());
        let log = TransformLog::new(ranges);

        let json = serde_json::to_string(&log).unwrap();
        assert_eq!(
            json,
            r#"{"steps":["dropUnnamed","standardize","join","normalize"],"ranges":{"Stress Level":{"min":3,"max":8.5},"Age":{"min":null,"max":null}}}"#
        );
    }
}
