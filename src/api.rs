//! Synchronous client for the **REST Countries API (v3.1)**.
//!
//! Only the `region/{region}` endpoint is used. Each region is requested once; a failing
//! region is logged and left out of the result, so a run can continue with partial data.
//!
//! ### Notes
//! - Responses are kept as raw `serde_json::Value` objects so they can be persisted verbatim
//!   before any cleaning happens.
//! - No request timeout is set unless one is passed to [`Client::new`]; a hung connection
//!   blocks the caller.
//!
//! Typical usage:
//! ```no_run
//! # use country_etl::api::{Client, REGIONS, DEFAULT_BASE_URL};
//! let client = Client::new(DEFAULT_BASE_URL, None)?;
//! let fetched = client.fetch_regions(&REGIONS);
//! println!("{} countries, {} failed regions", fetched.countries.len(), fetched.failed.len());
//! # Ok::<(), anyhow::Error>(())
//! ```
use crate::error::FetchError;
use log::{info, warn};
use reqwest::blocking::Client as HttpClient;
use reqwest::StatusCode;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

/// The five regions requested on every run.
pub const REGIONS: [&str; 5] = ["africa", "americas", "asia", "europe", "oceania"];

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

/// Outcome of fetching several regions.
#[derive(Debug, Default)]
pub struct RegionFetch {
    /// Raw country objects of every region that succeeded, in request order.
    pub countries: Vec<Value>,
    /// Regions that failed, with the error message.
    pub failed: Vec<(String, String)>,
}

impl RegionFetch {
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

impl Client {
    /// Build a client against `base_url` (without trailing `/region`).
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = HttpClient::builder()
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("country_etl/", env!("CARGO_PKG_VERSION")));
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: builder.build()?,
        })
    }

    /// Fetch every country of one region as raw JSON objects.
    ///
    /// ### Errors
    /// - Network/transport error
    /// - Any HTTP status other than 200
    /// - Body that is not a JSON array
    pub fn fetch_region(&self, region: &str) -> Result<Vec<Value>, FetchError> {
        let url = format!("{}/region/{}", self.base_url, region.trim());
        let resp = self
            .http
            .get(&url)
            .send()
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status { url, status });
        }

        let v: Value = resp.json().map_err(|source| FetchError::Decode {
            url: url.clone(),
            source,
        })?;
        match v {
            Value::Array(items) => Ok(items),
            _ => Err(FetchError::UnexpectedShape { url }),
        }
    }

    /// Fetch each region in turn and concatenate the results.
    ///
    /// No retry: a region that fails is logged, recorded in [`RegionFetch::failed`] and skipped.
    pub fn fetch_regions<S: AsRef<str>>(&self, regions: &[S]) -> RegionFetch {
        let mut out = RegionFetch::default();
        for region in regions {
            let region = region.as_ref();
            match self.fetch_region(region) {
                Ok(items) => {
                    info!("fetched {} countries for region {}", items.len(), region);
                    out.countries.extend(items);
                }
                Err(e) => {
                    warn!("skipping region {}: {}", region, e);
                    out.failed.push((region.to_string(), e.to_string()));
                }
            }
        }
        out
    }
}
