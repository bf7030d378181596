use serde::{Deserialize, Serialize};

/// One row of the local country file.
///
/// Empty cells are `None`. Columns other than `country`, `capital` and `continents`
/// are kept in `extra`, aligned with [`LocalTable::extra_columns`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalRecord {
    pub country: Option<String>,
    pub capital: Option<String>,
    pub continents: Option<String>,
    pub extra: Vec<Option<String>>,
}

impl LocalRecord {
    /// True when every field holds a non-blank value.
    pub fn is_complete(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.country)
            && filled(&self.capital)
            && filled(&self.continents)
            && self.extra.iter().all(filled)
    }
}

/// The local country file held in memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalTable {
    pub extra_columns: Vec<String>,
    pub rows: Vec<LocalRecord>,
}

impl LocalTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A flattened country record from the REST Countries API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiCountry {
    pub common_name: String,
    pub official_name: String,
    /// First listed capital, empty when the API lists none.
    pub capital: String,
    pub region: String,
    pub subregion: String,
    pub population: u64,
    pub area: f64,
    pub languages: Vec<String>,
    /// Currency codes (the keys of the API `currencies` map).
    pub currencies: Vec<String>,
    pub borders: Vec<String>,
    pub timezones: Vec<String>,
    pub flag: String,
}

/// A local record joined with its API counterpart, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub local: LocalRecord,
    /// The alias-mapped name used as the join key.
    pub standardized_name: String,
    pub api: Option<ApiCountry>,
}

/// API-origin columns of the merged table, in output order.
pub const API_COLUMNS: [&str; 12] = [
    "common_name",
    "official_name",
    "api_capital",
    "region",
    "subregion",
    "population",
    "area",
    "languages",
    "currencies",
    "borders",
    "timezones",
    "flag",
];

const LOCAL_COLUMNS: [&str; 3] = ["country", "capital", "continents"];

/// Separator used when a list field is rendered into a single cell.
pub const LIST_SEPARATOR: &str = "; ";

/// The merged table, one row per local record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergedTable {
    pub extra_columns: Vec<String>,
    pub rows: Vec<MergedRecord>,
}

impl MergedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Output header names.
    ///
    /// Local columns come first, then `standardized_name`, then the API columns.
    /// An extra local column whose name clashes with a fixed column gets a `_local` suffix.
    pub fn header(&self) -> Vec<String> {
        let mut out: Vec<String> = LOCAL_COLUMNS.iter().map(|s| s.to_string()).collect();
        for name in &self.extra_columns {
            let clashes = LOCAL_COLUMNS.contains(&name.as_str())
                || API_COLUMNS.contains(&name.as_str())
                || name == "standardized_name";
            if clashes {
                out.push(format!("{name}_local"));
            } else {
                out.push(name.clone());
            }
        }
        out.push("standardized_name".into());
        out.extend(API_COLUMNS.iter().map(|s| s.to_string()));
        out
    }

    /// Cell of row `index` under header `column`, `None` when null or unknown.
    pub fn cell(&self, index: usize, column: &str) -> Option<String> {
        let pos = self.header().iter().position(|h| h == column)?;
        self.rows.get(index)?.cells().into_iter().nth(pos).flatten()
    }
}

impl MergedRecord {
    /// Render every cell of this row in header order. `None` means null.
    pub fn cells(&self) -> Vec<Option<String>> {
        let mut out = vec![
            self.local.country.clone(),
            self.local.capital.clone(),
            self.local.continents.clone(),
        ];
        out.extend(self.local.extra.iter().cloned());
        out.push(Some(self.standardized_name.clone()));
        match &self.api {
            Some(a) => {
                let list = |v: &[String]| Some(v.join(LIST_SEPARATOR));
                out.extend([
                    Some(a.common_name.clone()),
                    Some(a.official_name.clone()),
                    Some(a.capital.clone()),
                    Some(a.region.clone()),
                    Some(a.subregion.clone()),
                    Some(a.population.to_string()),
                    Some(a.area.to_string()),
                    list(&a.languages),
                    list(&a.currencies),
                    list(&a.borders),
                    list(&a.timezones),
                    Some(a.flag.clone()),
                ]);
            }
            None => out.extend(std::iter::repeat_n(None, API_COLUMNS.len())),
        }
        out
    }
}
