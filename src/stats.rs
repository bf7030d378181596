//! Descriptive statistics over the merged table.
//!
//! [`analyze`] is pure; the printed report comes from the [`Report`] `Display` impl.
use crate::models::MergedTable;
use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Columns shown in the preview, when present in the table.
pub const DISPLAY_COLUMNS: [&str; 6] = [
    "country",
    "capital",
    "continents",
    "population",
    "region",
    "languages",
];

/// Number of rows shown in the preview.
pub const PREVIEW_ROWS: usize = 5;

/// Population statistics over matched rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopulationStats {
    /// Arithmetic mean, rounded to the nearest integer.
    pub mean: u64,
    pub median: f64,
    pub highest: (String, u64),
    pub lowest: (String, u64),
}

/// Summary of a merged table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub total: usize,
    pub matched: usize,
    /// Share of rows with an API match, in percent.
    pub match_pct: f64,
    /// Label counts, most frequent first.
    pub continents: Vec<(String, usize)>,
    pub population: Option<PopulationStats>,
    pub regions: Vec<(String, usize)>,
    pub capitals: usize,
    pub preview_columns: Vec<String>,
    pub preview: Vec<Vec<Option<String>>>,
}

/// Count values, most frequent first; ties are ordered by value.
fn value_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }
    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, n)| (k.to_string(), n))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

fn population_stats(table: &MergedTable) -> Option<PopulationStats> {
    let mut pops: Vec<(&str, u64)> = table
        .rows
        .iter()
        .filter_map(|r| {
            let api = r.api.as_ref()?;
            Some((r.local.country.as_deref().unwrap_or_default(), api.population))
        })
        .collect();
    if pops.is_empty() {
        return None;
    }

    let count = pops.len();
    let mean = pops.iter().map(|(_, p)| *p as f64).sum::<f64>() / count as f64;

    let mut vals: Vec<u64> = pops.iter().map(|(_, p)| *p).collect();
    vals.sort_unstable();
    let median = if count % 2 == 1 {
        vals[count / 2] as f64
    } else {
        (vals[count / 2 - 1] as f64 + vals[count / 2] as f64) / 2.0
    };

    // Stable sort keeps the first row on ties.
    pops.sort_by(|a, b| b.1.cmp(&a.1));
    let highest = pops.first()?;
    let lowest_val = pops.last()?.1;
    let lowest = pops.iter().find(|(_, p)| *p == lowest_val)?;

    Some(PopulationStats {
        mean: mean.round() as u64,
        median,
        highest: (highest.0.to_string(), highest.1),
        lowest: (lowest.0.to_string(), lowest.1),
    })
}

/// Compute the report for a merged table.
pub fn analyze(table: &MergedTable) -> Report {
    let total = table.len();
    let matched = table.rows.iter().filter(|r| r.api.is_some()).count();
    let match_pct = if total > 0 {
        matched as f64 * 100.0 / total as f64
    } else {
        0.0
    };

    let continents = value_counts(
        table
            .rows
            .iter()
            .filter_map(|r| r.local.continents.as_deref()),
    );
    let regions = value_counts(
        table
            .rows
            .iter()
            .filter_map(|r| r.api.as_ref().map(|a| a.region.as_str())),
    );
    let capitals = table
        .rows
        .iter()
        .filter(|r| r.local.capital.as_deref().is_some_and(|c| !c.is_empty()))
        .count();

    let header = table.header();
    let (preview_columns, positions): (Vec<String>, Vec<usize>) = DISPLAY_COLUMNS
        .iter()
        .filter_map(|c| {
            let pos = header.iter().position(|h| h.as_str() == *c)?;
            Some((c.to_string(), pos))
        })
        .unzip();
    let preview = table
        .rows
        .iter()
        .take(PREVIEW_ROWS)
        .map(|r| {
            let cells = r.cells();
            positions.iter().map(|&p| cells[p].clone()).collect()
        })
        .collect();

    Report {
        total,
        matched,
        match_pct,
        continents,
        population: population_stats(table),
        regions,
        capitals,
        preview_columns,
        preview,
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = |v: u64| v.to_formatted_string(&Locale::en);

        writeln!(f, "=== Dataset overview ===")?;
        writeln!(f, "Total countries: {}", self.total)?;
        writeln!(
            f,
            "Matched with API data: {} ({:.1}%)",
            self.matched, self.match_pct
        )?;

        writeln!(f, "\n=== Continent distribution ===")?;
        for (label, count) in &self.continents {
            writeln!(f, "{label}: {count}")?;
        }

        if let Some(p) = &self.population {
            writeln!(f, "\n=== Population ===")?;
            writeln!(f, "Mean: {}", n(p.mean))?;
            writeln!(f, "Median: {:.1}", p.median)?;
            writeln!(f, "Highest: {} ({})", p.highest.0, n(p.highest.1))?;
            writeln!(f, "Lowest: {} ({})", p.lowest.0, n(p.lowest.1))?;
        }

        writeln!(f, "\n=== Region distribution ===")?;
        for (label, count) in &self.regions {
            writeln!(f, "{label}: {count}")?;
        }

        writeln!(f, "\nCountries with a capital: {}", self.capitals)?;

        writeln!(f, "\n=== First {} rows ===", self.preview.len())?;
        writeln!(f, "{}", self.preview_columns.join(" | "))?;
        for row in &self.preview {
            let cells: Vec<&str> = row
                .iter()
                .map(|c| c.as_deref().unwrap_or("NA"))
                .collect();
            writeln!(f, "{}", cells.join(" | "))?;
        }
        Ok(())
    }
}
