//! Left join of the local table onto the API countries.
use crate::models::{ApiCountry, LocalTable, MergedRecord, MergedTable};
use log::info;
use std::collections::HashMap;

/// Local spellings mapped to the common name used by the API.
///
/// Some entries map a name to itself; the table is kept as-is.
pub const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("Democratic Republic of the Congo", "DR Congo"),
    ("Republic of the Congo", "Republic of the Congo"),
    ("Côte d'Ivoire", "Ivory Coast"),
    ("Cabo Verde", "Cape Verde"),
    ("Swaziland", "Eswatini"),
    ("Eswatini", "Eswatini"),
    ("The Gambia", "Gambia"),
    ("São Tomé and Príncipe", "São Tomé and Príncipe"),
    ("Tanzania", "Tanzania"),
];

/// Alias-mapped name, or the name unchanged when it has no alias.
pub fn standardize_name(name: &str) -> String {
    COUNTRY_ALIASES
        .iter()
        .find(|(local, _)| *local == name)
        .map(|(_, api)| api.to_string())
        .unwrap_or_else(|| name.to_string())
}

/// The merged table plus join provenance counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeOutcome {
    pub table: MergedTable,
    /// Rows found in both tables.
    pub matched: usize,
    /// Rows found only in the local table.
    pub local_only: usize,
}

/// Left-join `local` onto `api` on standardized name = API common name.
///
/// Every local row appears exactly once in the output, in input order. When `api` holds
/// duplicate common names the first one is used.
pub fn merge(local: &LocalTable, api: &[ApiCountry]) -> MergeOutcome {
    let mut by_name: HashMap<&str, &ApiCountry> = HashMap::with_capacity(api.len());
    for c in api {
        by_name.entry(c.common_name.as_str()).or_insert(c);
    }

    let rows: Vec<MergedRecord> = local
        .rows
        .iter()
        .map(|r| {
            let standardized_name = standardize_name(r.country.as_deref().unwrap_or_default());
            let api = by_name.get(standardized_name.as_str()).map(|c| (*c).clone());
            MergedRecord {
                local: r.clone(),
                standardized_name,
                api,
            }
        })
        .collect();

    let matched = rows.iter().filter(|r| r.api.is_some()).count();
    let local_only = rows.len() - matched;
    info!("merge: {} matched, {} local only", matched, local_only);

    MergeOutcome {
        table: MergedTable {
            extra_columns: local.extra_columns.clone(),
            rows,
        },
        matched,
        local_only,
    }
}
