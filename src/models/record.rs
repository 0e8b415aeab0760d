use indexmap::{IndexMap, IndexSet};
use serde::{Serialize, Serializer};

static ABSENT: Value = Value::Absent;

/// A single field value after parsing, cleaning or coercion
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Missing, blank or sentinel value (serialized as an empty CSV field / JSON null)
    #[default]
    Absent,
    /// Raw or passed-through text
    Text(String),
    /// Finite number produced by coercion
    Number(f64),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// The numeric payload, if this value has already been coerced
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render the value as a delimited-text field
    pub fn to_field(&self) -> String {
        match self {
            Value::Absent => String::new(),
            Value::Text(s) => s.clone(),
            Value::Number(n) => format_number(*n),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Absent => serializer.serialize_none(),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Number(n) => serialize_number(*n, serializer),
        }
    }
}

/// Shortest round-trip form; integral values carry no fractional part
///
/// Magnitudes of at least 1e21 or below 1e-6 use exponent notation
/// (`1e+21`, `1.5e-7`), as JavaScript number-to-string does.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // covers -0
        return "0".to_string();
    }
    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{:e}", n);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        };
    }
    format!("{}", n)
}

/// Largest integer an f64 represents exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

pub(crate) fn serialize_number<S: Serializer>(n: f64, serializer: S) -> Result<S::Ok, S::Error> {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(n as i64)
    } else {
        serializer.serialize_f64(n)
    }
}

/// A row: column name to value, in insertion order
///
/// Inserting an existing column replaces its value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a column, treating a missing column as absent
    pub fn value(&self, column: &str) -> &Value {
        self.fields.get(column).unwrap_or(&ABSENT)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(column.into(), value)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (column, value) in iter {
            record.insert(column, value);
        }
        record
    }
}

/// An ordered sequence of records loaded from (or derived from) one source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Human-readable source name, used in logs and errors
    pub name: String,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Union of column names across all records, in first-appearance order
    pub fn columns(&self) -> Vec<String> {
        let mut columns: IndexSet<&str> = IndexSet::new();
        for record in &self.records {
            columns.extend(record.columns());
        }
        columns.into_iter().map(str::to_string).collect()
    }
}
