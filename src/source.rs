//! Reader for the local country file.
//!
//! The file is comma-delimited with a header row and at least the `country`, `capital` and
//! `continents` columns. Bytes are decoded lossily so a stray mis-encoded byte never aborts the
//! read; known mojibake is repaired later by [`crate::clean`].
use crate::error::SourceError;
use crate::models::{LocalRecord, LocalTable};
use csv::{ByteRecord, ReaderBuilder};
use log::{error, info};
use std::fs::File;
use std::path::Path;

/// Read the local file, surfacing any failure.
pub fn read_local<P: AsRef<Path>>(path: P) -> Result<LocalTable, SourceError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(file);

    let headers: Vec<String> = rdr.byte_headers()?.iter().map(decode).collect();
    let find = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or(SourceError::MissingColumn(name))
    };
    let country_idx = find("country")?;
    let capital_idx = find("capital")?;
    let continents_idx = find("continents")?;
    let fixed = [country_idx, capital_idx, continents_idx];

    let extra_idx: Vec<usize> = (0..headers.len()).filter(|i| !fixed.contains(i)).collect();
    let extra_columns = extra_idx.iter().map(|&i| headers[i].trim().to_string()).collect();

    let mut rows = Vec::new();
    let mut rec = ByteRecord::new();
    while rdr.read_byte_record(&mut rec)? {
        let cell = |i: usize| rec.get(i).map(decode).filter(|s| !s.is_empty());
        rows.push(LocalRecord {
            country: cell(country_idx),
            capital: cell(capital_idx),
            continents: cell(continents_idx),
            extra: extra_idx.iter().map(|&i| cell(i)).collect(),
        });
    }

    Ok(LocalTable {
        extra_columns,
        rows,
    })
}

/// Read the local file, logging failures and returning an empty table instead.
///
/// The pipeline treats an empty table as fatal.
pub fn load_local<P: AsRef<Path>>(path: P) -> LocalTable {
    let path = path.as_ref();
    match read_local(path) {
        Ok(table) => {
            info!("loaded {} local rows from {}", table.len(), path.display());
            table
        }
        Err(e) => {
            error!("failed to read {}: {}", path.display(), e);
            LocalTable::default()
        }
    }
}

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn header_lookup_is_case_insensitive_and_keeps_extras() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("c.csv");
        let mut f = File::create(&p).unwrap();
        writeln!(f, "Country , iso2,Capital,CONTINENTS").unwrap();
        writeln!(f, "Kenya,KE,Nairobi,Africa").unwrap();
        writeln!(f, "Chad,,N'Djamena,Africa").unwrap();
        drop(f);

        let t = read_local(&p).unwrap();
        assert_eq!(t.extra_columns, vec!["iso2".to_string()]);
        assert_eq!(t.rows[0].country.as_deref(), Some("Kenya"));
        assert_eq!(t.rows[0].extra, vec![Some("KE".to_string())]);
        assert_eq!(t.rows[1].extra, vec![None]);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("c.csv");
        std::fs::write(&p, "country,capital\nKenya,Nairobi\n").unwrap();
        let err = read_local(&p).unwrap_err();
        assert!(matches!(err, SourceError::MissingColumn("continents")));
        assert!(load_local(&p).is_empty());
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("c.csv");
        let mut bytes = b"country,capital,continents\nS".to_vec();
        bytes.push(0xE3);
        bytes.extend_from_slice(b"o Tome,Sao Tome,Africa\n");
        std::fs::write(&p, bytes).unwrap();
        let t = read_local(&p).unwrap();
        assert_eq!(t.len(), 1);
        assert!(t.rows[0].country.as_deref().unwrap().contains('\u{FFFD}'));
    }
}
