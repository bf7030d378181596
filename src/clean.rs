//! Cleaning stages for the local table and the raw API payload.
//!
//! Both stages are pure: they borrow their input and return new values together with
//! counters describing what was removed.
use crate::error::RecordError;
use crate::models::{ApiCountry, LocalRecord, LocalTable};
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Known mis-decoded names in the local file and their correct form.
///
/// Lookup is by whole value. No corrected value appears as a key, so applying the table
/// twice gives the same result as applying it once.
pub const MOJIBAKE_FIXES: &[(&str, &str)] = &[
    ("CÃ´te d'Ivoire", "Côte d'Ivoire"),
    ("SÃ£o TomÃ© and PrÃ\u{AD}ncipe", "São Tomé and Príncipe"),
    ("SÃ£o TomÃ©", "São Tomé"),
    ("YaoundÃ©", "Yaoundé"),
    ("LomÃ©", "Lomé"),
    ("RÃ©union", "Réunion"),
    ("Nâ€™Djamena", "N'Djamena"),
];

/// Look up a value in [`MOJIBAKE_FIXES`].
pub fn fix_mojibake(value: &str) -> Option<&'static str> {
    MOJIBAKE_FIXES
        .iter()
        .find(|(bad, _)| *bad == value)
        .map(|(_, good)| *good)
}

/// Uniqueness key of a local row: the trimmed, repaired, lowercased country name.
///
/// Repairing first makes a mis-decoded spelling collide with its correct form.
fn country_key(r: &LocalRecord) -> Option<String> {
    r.country.as_deref().map(|c| {
        let c = c.trim();
        fix_mojibake(c).unwrap_or(c).to_lowercase()
    })
}

/// What [`clean_local`] removed or changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalCleanStats {
    pub duplicates_removed: usize,
    pub incomplete_dropped: usize,
    pub mojibake_fixed: usize,
}

/// Clean the local table.
///
/// Steps, in order: drop duplicate countries (first kept), drop rows with any missing or
/// blank field, trim `country`/`capital`/`continents`, repair known mojibake in
/// `country` and `capital`.
pub fn clean_local(table: &LocalTable) -> (LocalTable, LocalCleanStats) {
    let mut stats = LocalCleanStats::default();

    let mut seen = HashSet::new();
    let deduped: Vec<&LocalRecord> = table
        .rows
        .iter()
        .filter(|r| seen.insert(country_key(r)))
        .collect();
    stats.duplicates_removed = table.rows.len() - deduped.len();

    let complete: Vec<&LocalRecord> = deduped.into_iter().filter(|r| r.is_complete()).collect();
    stats.incomplete_dropped = table.rows.len() - stats.duplicates_removed - complete.len();

    let rows = complete
        .into_iter()
        .map(|r| {
            let mut fixed = |v: &Option<String>| {
                v.as_deref().map(|s| {
                    let s = s.trim();
                    match fix_mojibake(s) {
                        Some(good) => {
                            stats.mojibake_fixed += 1;
                            good.to_string()
                        }
                        None => s.to_string(),
                    }
                })
            };
            let country = fixed(&r.country);
            let capital = fixed(&r.capital);
            LocalRecord {
                country,
                capital,
                continents: r.continents.as_deref().map(|s| s.trim().to_string()),
                extra: r.extra.clone(),
            }
        })
        .collect();

    info!(
        "local cleaning: {} duplicates removed, {} incomplete rows dropped, {} names repaired",
        stats.duplicates_removed, stats.incomplete_dropped, stats.mojibake_fixed
    );
    (
        LocalTable {
            extra_columns: table.extra_columns.clone(),
            rows,
        },
        stats,
    )
}

/// A raw API record that could not be flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// Position in the raw payload.
    pub index: usize,
    pub reason: RecordError,
}

/// Result of [`clean_api`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiCleanOutcome {
    pub countries: Vec<ApiCountry>,
    pub skipped: Vec<SkippedRecord>,
    pub duplicates_removed: usize,
    pub unnamed_dropped: usize,
}

#[derive(Debug, Deserialize)]
struct RawName {
    common: Option<String>,
    official: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCountry {
    name: Option<RawName>,
    capital: Option<Vec<String>>,
    region: Option<String>,
    subregion: Option<String>,
    population: Option<u64>,
    area: Option<f64>,
    languages: Option<Map<String, Value>>,
    currencies: Option<Map<String, Value>>,
    borders: Option<Vec<String>>,
    timezones: Option<Vec<String>>,
    flag: Option<String>,
}

/// Flatten one raw API country object.
///
/// Missing or `null` fields fall back to empty strings, zero, or empty lists; a record without
/// a `name` object gets an empty common name and is dropped later as unnamed. A record that is
/// not an object or carries a wrongly-typed field is rejected.
pub fn flatten_country(value: &Value) -> Result<ApiCountry, RecordError> {
    if !value.is_object() {
        return Err(RecordError::NotAnObject);
    }
    let raw =
        RawCountry::deserialize(value).map_err(|e| RecordError::InvalidField(e.to_string()))?;
    let name = raw.name.unwrap_or(RawName {
        common: None,
        official: None,
    });

    let area = raw.area.unwrap_or(0.0);
    if !area.is_finite() || area < 0.0 {
        return Err(RecordError::InvalidField(format!("area {area}")));
    }

    let languages = raw
        .languages
        .unwrap_or_default()
        .into_iter()
        .map(|(code, v)| match v {
            Value::String(s) => Ok(s),
            _ => Err(RecordError::InvalidField(format!("language {code}"))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ApiCountry {
        common_name: name.common.unwrap_or_default(),
        official_name: name.official.unwrap_or_default(),
        capital: raw
            .capital
            .and_then(|c| c.into_iter().next())
            .unwrap_or_default(),
        region: raw.region.unwrap_or_default(),
        subregion: raw.subregion.unwrap_or_default(),
        population: raw.population.unwrap_or(0),
        area,
        languages,
        currencies: raw
            .currencies
            .unwrap_or_default()
            .into_iter()
            .map(|(code, _)| code)
            .collect(),
        borders: raw.borders.unwrap_or_default(),
        timezones: raw.timezones.unwrap_or_default(),
        flag: raw.flag.unwrap_or_default(),
    })
}

/// Flatten every raw record, then drop duplicate and unnamed countries.
///
/// Records that fail [`flatten_country`] are logged and collected in
/// [`ApiCleanOutcome::skipped`]; they never abort the rest of the batch.
pub fn clean_api(raw: &[Value]) -> ApiCleanOutcome {
    let mut out = ApiCleanOutcome::default();
    let mut flat = Vec::with_capacity(raw.len());
    for (index, value) in raw.iter().enumerate() {
        match flatten_country(value) {
            Ok(c) => flat.push(c),
            Err(reason) => {
                warn!("skipping API record #{}: {}", index, reason);
                out.skipped.push(SkippedRecord { index, reason });
            }
        }
    }

    let mut seen = HashSet::new();
    for c in flat {
        if !seen.insert(c.common_name.clone()) {
            out.duplicates_removed += 1;
            continue;
        }
        if c.common_name.trim().is_empty() {
            out.unnamed_dropped += 1;
            continue;
        }
        out.countries.push(c);
    }

    debug!(
        "api cleaning kept {:?}",
        out.countries.iter().map(|c| &c.common_name).collect::<Vec<_>>()
    );
    info!(
        "api cleaning: {} kept, {} skipped, {} duplicates removed, {} unnamed dropped",
        out.countries.len(),
        out.skipped.len(),
        out.duplicates_removed,
        out.unnamed_dropped
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mojibake_table_has_no_chained_entries() {
        for (_, good) in MOJIBAKE_FIXES {
            assert!(fix_mojibake(good).is_none(), "{good} is also a key");
        }
    }

    #[test]
    fn languages_keep_source_order() {
        let v = json!({
            "name": {"common": "Rwanda", "official": "Republic of Rwanda"},
            "languages": {"kin": "Kinyarwanda", "eng": "English", "fra": "French"}
        });
        let c = flatten_country(&v).unwrap();
        assert_eq!(c.languages, vec!["Kinyarwanda", "English", "French"]);
    }

    #[test]
    fn null_fields_fall_back_to_defaults() {
        let v = json!({
            "name": {"common": "Nowhere"},
            "capital": null,
            "population": null,
            "area": null
        });
        let c = flatten_country(&v).unwrap();
        assert_eq!(c.capital, "");
        assert_eq!(c.population, 0);
        assert_eq!(c.area, 0.0);
        assert_eq!(c.official_name, "");
    }
}
