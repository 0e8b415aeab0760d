use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{PipelineError, Result};
use crate::io::{encode_csv, encode_log, write_output};
use crate::models::{Dataset, TransformLog};

/// Configuration for Stage 4 rendering
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// File name of the joined CSV inside the output directory
    pub joined_file: String,
    /// File name of the transform log inside the output directory
    pub log_file: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            joined_file: "joined_for_d3.csv".to_string(),
            log_file: "transform_log.json".to_string(),
        }
    }
}

/// Result of Stage 4 rendering
#[derive(Debug)]
pub struct RenderResult {
    pub joined_path: PathBuf,
    pub log_path: PathBuf,
}

/// Execute Stage 4: write the joined CSV and the transform log
///
/// Both outputs are encoded in memory before anything touches the disk, so an
/// encoding failure leaves no partial output behind.
pub fn execute_render(
    dataset: &Dataset,
    log: &TransformLog,
    out_dir: &Path,
    config: &RenderConfig,
) -> Result<RenderResult> {
    let csv = encode_csv(dataset)?;
    let json = encode_log(log)?;

    std::fs::create_dir_all(out_dir).map_err(|e| PipelineError::io(out_dir, e))?;

    let joined_path = out_dir.join(&config.joined_file);
    let log_path = out_dir.join(&config.log_file);

    info!("Writing joined dataset to {:?}", joined_path);
    write_output(&joined_path, &csv)?;
    info!("Writing transform log to {:?}", log_path);
    write_output(&log_path, &json)?;

    Ok(RenderResult {
        joined_path,
        log_path,
    })
}
