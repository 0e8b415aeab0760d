use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use d3join::{
    clean, column_values, parse_csv_file, profile_dataset, run_pipeline, Histogram, ParseConfig,
    PipelineConfig, RaggedRowPolicy,
};

#[derive(Parser)]
#[command(name = "d3join")]
#[command(author, version, about = "Join sleep-health and performance datasets for D3", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean, join and normalize both datasets
    Process {
        /// Sleep health survey CSV
        #[arg(long, default_value = "Sleep_health_and_lifestyle_dataset_adjusted_to_join.csv")]
        sleep: PathBuf,

        /// Employee performance CSV
        #[arg(
            long,
            default_value = "Extended_Employee_Performance_and_Productivity_Data_for_joining_datasets.csv"
        )]
        performance: PathBuf,

        /// Directory for joined_for_d3.csv and transform_log.json
        #[arg(short, long, default_value = "out")]
        out_dir: PathBuf,

        /// Pad or truncate rows whose field count differs from the header
        #[arg(long)]
        lenient: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Profile a CSV and print a histogram of one column
    Analyze {
        /// Input CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Column to plot
        #[arg(short, long, default_value = "Performance_Score")]
        column: String,

        /// Number of histogram bins
        #[arg(long, default_value = "20")]
        bins: usize,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            sleep,
            performance,
            out_dir,
            lenient,
            verbose,
        } => {
            setup_logging(verbose);
            let config = PipelineConfig {
                sleep_path: sleep,
                performance_path: performance,
                out_dir,
                parse: parse_config(lenient),
                ..Default::default()
            };
            process(&config).await
        }
        Commands::Analyze {
            input,
            column,
            bins,
            verbose,
        } => {
            setup_logging(verbose);
            analyze(input, &column, bins)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn parse_config(lenient: bool) -> ParseConfig {
    ParseConfig {
        ragged_rows: if lenient {
            RaggedRowPolicy::PadOrTruncate
        } else {
            RaggedRowPolicy::Reject
        },
    }
}

async fn process(config: &PipelineConfig) -> Result<()> {
    let result = run_pipeline(config)
        .await
        .context("Failed to build joined dataset")?;

    info!("Wrote {:?}", result.paths.joined_path);
    info!("Wrote {:?}", result.paths.log_path);
    info!(
        "Complete: {} joined rows ({} sleep rows without id, {} unmatched)",
        result.rows_written, result.missing_key, result.unmatched
    );

    Ok(())
}

fn analyze(input: PathBuf, column: &str, bins: usize) -> Result<()> {
    info!("Analyzing {:?}", input);
    let raw = parse_csv_file(&input, &ParseConfig::default())
        .with_context(|| format!("Failed to load {:?}", input))?;
    let dataset = clean(&raw);
    let profile = profile_dataset(&dataset);

    println!("Dataset Profile: {}", profile.name);
    println!("================");
    println!("Rows: {}", profile.rows);
    println!("Columns: {}", profile.columns.len());
    println!();
    for col in &profile.columns {
        println!(
            "{:<40} present {:>6}  absent {:>6}  {}",
            col.name,
            col.present,
            col.absent,
            if col.numeric { "numeric" } else { "text" }
        );
    }
    println!();

    let values = column_values(&dataset, column)?;
    let histogram = Histogram::from_values(&values, bins);

    println!("Distribution of {}", column);
    println!("-----------------");
    if histogram.is_empty() {
        println!("(no numeric values)");
    } else {
        print!("{}", histogram.render(50));
    }

    Ok(())
}
