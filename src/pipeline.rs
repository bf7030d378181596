//! Runs the stages in order: extract, persist raw, transform, persist merged, analyze.
use crate::api::{Client, DEFAULT_BASE_URL, REGIONS};
use crate::clean::{self, ApiCleanOutcome, LocalCleanStats};
use crate::error::PipelineError;
use crate::merge::{self, MergeOutcome};
use crate::stats::{self, Report};
use crate::{source, storage};
use log::{error, info};
use std::path::PathBuf;
use std::time::Duration;

/// Everything a run needs to know about its environment.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub base_url: String,
    pub regions: Vec<String>,
    pub raw_output: PathBuf,
    pub merged_output: PathBuf,
    /// HTTP request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl PipelineConfig {
    /// Defaults for everything except the input file.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            base_url: DEFAULT_BASE_URL.into(),
            regions: REGIONS.iter().map(|r| r.to_string()).collect(),
            raw_output: PathBuf::from("extracted_data.json"),
            merged_output: PathBuf::from("transformed_data.csv"),
            timeout: None,
        }
    }
}

/// What a completed run did.
#[derive(Debug)]
pub struct RunSummary {
    pub local_rows: usize,
    pub api_records: usize,
    pub failed_regions: Vec<(String, String)>,
    pub local_clean: LocalCleanStats,
    pub api_clean: ApiCleanOutcome,
    pub merge: MergeOutcome,
    pub raw_saved: bool,
    pub merged_saved: bool,
    pub report: Report,
}

/// Run the whole pipeline.
///
/// Returns an error only when extraction yields nothing; file-write failures are logged
/// and reflected in [`RunSummary::raw_saved`] / [`RunSummary::merged_saved`].
pub fn run(config: &PipelineConfig, client: &Client) -> Result<RunSummary, PipelineError> {
    info!("reading local data from {}", config.input.display());
    let local = source::load_local(&config.input);
    if local.is_empty() {
        return Err(PipelineError::NoLocalData(config.input.display().to_string()));
    }

    info!("fetching {} regions from {}", config.regions.len(), client.base_url);
    let fetched = client.fetch_regions(&config.regions);
    if fetched.is_empty() {
        return Err(PipelineError::NoApiData {
            requested: config.regions.len(),
            failed: fetched.failed.len(),
        });
    }

    let raw_saved = match storage::save_raw_json(&fetched.countries, &config.raw_output) {
        Ok(()) => {
            info!("saved raw API data to {}", config.raw_output.display());
            true
        }
        Err(e) => {
            error!("failed to save {}: {}", config.raw_output.display(), e);
            false
        }
    };

    let (local_clean, local_clean_stats) = clean::clean_local(&local);
    let api_clean = clean::clean_api(&fetched.countries);
    let merged = merge::merge(&local_clean, &api_clean.countries);

    let merged_saved = match storage::save_merged_csv(&merged.table, &config.merged_output) {
        Ok(()) => {
            info!(
                "saved {} merged rows to {}",
                merged.table.len(),
                config.merged_output.display()
            );
            true
        }
        Err(e) => {
            error!("failed to save {}: {}", config.merged_output.display(), e);
            false
        }
    };

    let report = stats::analyze(&merged.table);

    Ok(RunSummary {
        local_rows: local.len(),
        api_records: fetched.countries.len(),
        failed_regions: fetched.failed,
        local_clean: local_clean_stats,
        api_clean,
        merge: merged,
        raw_saved,
        merged_saved,
        report,
    })
}
