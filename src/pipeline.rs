use std::path::PathBuf;

use tracing::info;

use crate::error::Result;
use crate::io::{read_dataset_pair, ParseConfig};
use crate::models::{Dataset, TransformLog};
use crate::stages::{
    clean, execute_join, execute_normalize, execute_render, standardize, DatasetSchema,
    JoinConfig, NormalizeConfig, RenderConfig, RenderResult,
};

/// Transformation settings shared by the pure and file-backed entry points
#[derive(Debug, Clone)]
pub struct TransformConfig {
    pub sleep_schema: DatasetSchema,
    pub performance_schema: DatasetSchema,
    pub join: JoinConfig,
    pub normalize: NormalizeConfig,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            sleep_schema: DatasetSchema::sleep(),
            performance_schema: DatasetSchema::performance(),
            join: JoinConfig::default(),
            normalize: NormalizeConfig::default(),
        }
    }
}

/// Full configuration for a file-to-file run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub sleep_path: PathBuf,
    pub performance_path: PathBuf,
    pub out_dir: PathBuf,
    pub parse: ParseConfig,
    pub transform: TransformConfig,
    pub render: RenderConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sleep_path: PathBuf::from("Sleep_health_and_lifestyle_dataset_adjusted_to_join.csv"),
            performance_path: PathBuf::from(
                "Extended_Employee_Performance_and_Productivity_Data_for_joining_datasets.csv",
            ),
            out_dir: PathBuf::from("out"),
            parse: ParseConfig::default(),
            transform: TransformConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

/// In-memory result of the transformation stages
#[derive(Debug)]
pub struct TransformOutput {
    pub joined: Dataset,
    pub log: TransformLog,
    /// Sleep rows dropped for lack of a usable identifier
    pub missing_key: usize,
    /// Sleep rows dropped for lack of a performance match
    pub unmatched: usize,
}

/// Clean, standardize, join and normalize two raw datasets
///
/// Pure over its inputs; never fails on data quality.
pub fn transform(sleep: &Dataset, performance: &Dataset, config: &TransformConfig) -> TransformOutput {
    let sleep = standardize(&clean(sleep), &config.sleep_schema);
    let performance = standardize(&clean(performance), &config.performance_schema);

    let join = execute_join(&sleep, &performance, &config.join);
    let normalized = execute_normalize(&join.joined, &config.normalize);

    TransformOutput {
        joined: normalized.normalized,
        log: TransformLog::new(normalized.ranges),
        missing_key: join.missing_key,
        unmatched: join.unmatched,
    }
}

/// Summary of a completed run
#[derive(Debug)]
pub struct PipelineResult {
    pub rows_written: usize,
    pub missing_key: usize,
    pub unmatched: usize,
    pub paths: RenderResult,
}

/// Read both inputs, transform them and write both outputs
///
/// Outputs are only written once every in-memory stage has completed.
pub async fn run_pipeline(config: &PipelineConfig) -> Result<PipelineResult> {
    info!(
        "Loading {:?} and {:?}",
        config.sleep_path, config.performance_path
    );
    let (sleep, performance) =
        read_dataset_pair(&config.sleep_path, &config.performance_path, &config.parse).await?;
    info!(
        "Loaded {} sleep rows, {} performance rows",
        sleep.len(),
        performance.len()
    );

    let output = transform(&sleep, &performance, &config.transform);
    let paths = execute_render(&output.joined, &output.log, &config.out_dir, &config.render)?;

    Ok(PipelineResult {
        rows_written: output.joined.len(),
        missing_key: output.missing_key,
        unmatched: output.unmatched,
        paths,
    })
}
