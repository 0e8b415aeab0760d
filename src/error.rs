use std::path::PathBuf;

use thiserror::Error;

/// Structural failures that abort a pipeline run
///
/// Row-level data problems never surface here; they coerce to absent values.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input missing or unreadable, or output not writable
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited text
    #[error("failed to parse {name}: {message}")]
    Parse { name: String, message: String },

    /// Output could not be encoded
    #[error("failed to serialize {what}: {message}")]
    Serialize { what: String, message: String },

    /// A requested column does not exist in the dataset
    #[error("column {column:?} not found in {dataset}")]
    UnknownColumn { column: String, dataset: String },
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(name: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::Parse {
            name: name.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
