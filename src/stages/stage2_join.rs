use std::collections::HashMap;

use tracing::{debug, info};

use super::stage1_standardize::PERSON_ID;
use crate::models::{Dataset, Record, Value};

/// Configuration for Stage 2 joining
#[derive(Debug, Clone)]
pub struct JoinConfig {
    /// Numeric key column present in both datasets
    pub key: String,
    /// Columns whose left-side (sleep) values always win
    pub authoritative_columns: Vec<String>,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            key: PERSON_ID.to_string(),
            authoritative_columns: vec!["Gender".to_string(), "Age".to_string()],
        }
    }
}

/// Result of Stage 2 joining
#[derive(Debug)]
pub struct JoinResult {
    pub joined: Dataset,
    /// Left rows with an absent or zero key
    pub missing_key: usize,
    /// Left rows whose key had no right-side match
    pub unmatched: usize,
}

/// Hashable form of a numeric key; numbers compare by value and -0 equals 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct KeyBits(u64);

impl KeyBits {
    fn from_value(value: &Value) -> Option<Self> {
        let n = value.as_number()?;
        let n = if n == 0.0 { 0.0 } else { n };
        Some(Self(n.to_bits()))
    }
}

/// Build the right-side lookup; later records with the same key overwrite earlier ones
fn build_lookup<'a>(right: &'a Dataset, key: &str) -> HashMap<KeyBits, &'a Record> {
    let mut lookup = HashMap::with_capacity(right.len());
    for record in right.iter() {
        if let Some(k) = KeyBits::from_value(record.value(key)) {
            lookup.insert(k, record);
        }
    }
    lookup
}

/// Merge a right record into a copy of the left one, skipping authoritative columns
fn merge(left: &Record, right: &Record, authoritative: &[String]) -> Record {
    let mut out = left.clone();
    for (column, value) in right.iter() {
        if authoritative.iter().any(|c| c == column) {
            continue;
        }
        out.insert(column, value.clone());
    }
    out
}

/// Execute Stage 2: inner join of sleep (left) and performance (right) on the key
///
/// Left rows with an absent or zero key, or with no match, are dropped.
/// Duplicate left keys each produce a row; duplicate right keys resolve to
/// the last one seen. Output order follows the left dataset.
pub fn execute_join(left: &Dataset, right: &Dataset, config: &JoinConfig) -> JoinResult {
    let lookup = build_lookup(right, &config.key);
    if lookup.len() < right.len() {
        debug!(
            "{}: {} rows shadowed by duplicate or missing {}",
            right.name,
            right.len() - lookup.len(),
            config.key
        );
    }

    let mut missing_key = 0;
    let mut unmatched = 0;
    let mut records = Vec::new();

    for record in left.iter() {
        let key = record.value(&config.key);
        let Some(k) = KeyBits::from_value(key).filter(|_| key != &Value::Number(0.0)) else {
            missing_key += 1;
            continue;
        };
        match lookup.get(&k) {
            Some(right_record) => {
                records.push(merge(record, right_record, &config.authoritative_columns))
            }
            None => unmatched += 1,
        }
    }

    info!(
        "Stage 2: joined {} rows ({} without {}, {} unmatched)",
        records.len(),
        missing_key,
        config.key,
        unmatched
    );

    JoinResult {
        joined: Dataset::new("joined", records),
        missing_key,
        unmatched,
    }
}
