//! country_etl
//!
//! A small extract-transform-load pipeline for African country data. Pairs with the
//! `country-etl` CLI.
//!
//! ### Stages
//! - Read a local CSV of countries ([`source`])
//! - Fetch per-region country metadata from the REST Countries API ([`api`])
//! - Clean both datasets ([`clean`]) and left-join them on country name ([`merge`])
//! - Save the raw API payload as JSON and the merged table as CSV ([`storage`])
//! - Print descriptive statistics ([`stats`])
//!
//! ### Example
//! ```no_run
//! use country_etl::{Client, PipelineConfig};
//!
//! let config = PipelineConfig::new("african_countries.csv");
//! let client = Client::new(&config.base_url, config.timeout)?;
//! let summary = country_etl::pipeline::run(&config, &client)?;
//! println!("{}", summary.report);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod clean;
pub mod error;
pub mod merge;
pub mod models;
pub mod pipeline;
pub mod source;
pub mod stats;
pub mod storage;

pub use api::Client;
pub use models::{ApiCountry, LocalRecord, LocalTable, MergedRecord, MergedTable};
pub use pipeline::PipelineConfig;
