use country_etl::source::{load_local, read_local};
use std::fs;
use tempfile::tempdir;

#[test]
fn row_count_matches_data_lines() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("africa.csv");
    let text = "country,capital,continents,iso2\n\
                Kenya,Nairobi,Africa,KE\n\
                Ghana,Accra,Africa,GH\n\
                \"Congo, Republic of\",Brazzaville,Africa,CG\n\
                Mali, Bamako ,Africa,ML\n";
    fs::write(&p, text).unwrap();

    let t = read_local(&p).unwrap();
    assert_eq!(t.len(), text.lines().count() - 1);
    assert_eq!(t.extra_columns, vec!["iso2"]);
    assert_eq!(t.rows[2].country.as_deref(), Some("Congo, Republic of"));
    // Values are kept verbatim; trimming is the cleaner's job.
    assert_eq!(t.rows[3].capital.as_deref(), Some(" Bamako "));
}

#[test]
fn empty_cells_are_missing() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("africa.csv");
    fs::write(&p, "country,capital,continents\nChad,,Africa\n").unwrap();
    let t = read_local(&p).unwrap();
    assert_eq!(t.rows[0].capital, None);
    assert_eq!(t.rows[0].continents.as_deref(), Some("Africa"));
}

#[test]
fn nonexistent_path_gives_empty_table() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("does_not_exist.csv");
    assert!(read_local(&p).is_err());
    let t = load_local(&p);
    assert!(t.is_empty());
    assert!(t.extra_columns.is_empty());
}
