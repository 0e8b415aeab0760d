pub mod analysis;
pub mod error;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod stages;

pub use analysis::{column_values, profile_dataset, DatasetProfile, Histogram};
pub use error::{PipelineError, Result};
pub use io::{parse_csv_file, parse_csv_str, read_dataset_pair, ParseConfig, RaggedRowPolicy};
pub use models::{ColumnRange, Dataset, Record, TransformLog, Value};
pub use pipeline::{
    run_pipeline, transform, PipelineConfig, PipelineResult, TransformConfig, TransformOutput,
};
pub use stages::{
    clean, execute_join, execute_normalize, execute_render, normalize_absence, standardize,
    standardize_gender, to_number, DatasetSchema, JoinConfig, NormalizeConfig, RenderConfig,
};
