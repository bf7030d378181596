mod common;

use common::{api_country, local};
use country_etl::models::{API_COLUMNS, MergedRecord, MergedTable};

#[test]
fn header_puts_local_columns_first_and_suffixes_clashes() {
    let t = MergedTable {
        extra_columns: vec!["iso2".into(), "population".into(), "region".into()],
        rows: vec![],
    };
    let h = t.header();
    assert_eq!(
        &h[..7],
        &[
            "country",
            "capital",
            "continents",
            "iso2",
            "population_local",
            "region_local",
            "standardized_name"
        ]
    );
    assert_eq!(h.len(), 7 + API_COLUMNS.len());
    assert_eq!(h.last().map(String::as_str), Some("flag"));
}

#[test]
fn cells_line_up_with_header() {
    let mut rec = local("Kenya", "Nairobi", "Africa");
    rec.extra = vec![Some("KE".into())];
    let mut api = api_country("Kenya", "Africa", 53_771_300);
    api.timezones = vec!["UTC+03:00".into()];
    let t = MergedTable {
        extra_columns: vec!["iso2".into()],
        rows: vec![MergedRecord {
            local: rec,
            standardized_name: "Kenya".into(),
            api: Some(api),
        }],
    };
    assert_eq!(t.rows[0].cells().len(), t.header().len());
    assert_eq!(t.cell(0, "iso2").as_deref(), Some("KE"));
    assert_eq!(t.cell(0, "api_capital").as_deref(), Some("Kenya City"));
    assert_eq!(t.cell(0, "timezones").as_deref(), Some("UTC+03:00"));
    assert_eq!(t.cell(0, "no_such_column"), None);
    assert_eq!(t.cell(1, "country"), None);
}
