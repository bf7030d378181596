use anyhow::{Context, Result};
use clap::Parser;
use country_etl::api::{DEFAULT_BASE_URL, REGIONS};
use country_etl::{Client, PipelineConfig, pipeline};
use log::{error, info};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "country-etl",
    version,
    about = "Extract, clean, merge, store & summarize African country data"
)]
struct Cli {
    /// Local CSV with at least country, capital and continents columns
    #[arg(short, long)]
    input: PathBuf,
    /// Base URL of the REST Countries API (without /region)
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Region to fetch; repeat to fetch several (defaults to all five)
    #[arg(short, long = "region")]
    regions: Vec<String>,
    /// Where to write the raw API payload
    #[arg(long, default_value = "extracted_data.json")]
    raw_out: PathBuf,
    /// Where to write the merged table
    #[arg(long, default_value = "transformed_data.csv")]
    merged_out: PathBuf,
    /// HTTP request timeout in seconds (default: wait indefinitely)
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Only log warnings and errors.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

impl Cli {
    fn into_config(self) -> PipelineConfig {
        let regions = if self.regions.is_empty() {
            REGIONS.iter().map(|r| r.to_string()).collect()
        } else {
            self.regions
        };
        PipelineConfig {
            input: self.input,
            base_url: self.base_url,
            regions,
            raw_output: self.raw_out,
            merged_output: self.merged_out,
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = cli.into_config();
    let client = Client::new(&config.base_url, config.timeout).context("build http client")?;

    match pipeline::run(&config, &client) {
        Ok(summary) => {
            println!("{}", summary.report);
            info!(
                "done: {} local rows, {} API records, {} skipped, {} regions failed",
                summary.local_rows,
                summary.api_records,
                summary.api_clean.skipped.len(),
                summary.failed_regions.len()
            );
        }
        // Nothing to transform; stop without touching later outputs.
        Err(e) => error!("pipeline aborted: {}", e),
    }
    Ok(())
}
