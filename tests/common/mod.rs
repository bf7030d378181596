//! Shared fixtures for integration tests.
#![allow(dead_code)]

use country_etl::models::{ApiCountry, LocalRecord, LocalTable};
use serde_json::{Value, json};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

/// Start a throwaway HTTP server answering `GET {path}` with the given status and body.
/// Unknown paths get a 404. Returns the base URL.
pub fn serve(routes: Vec<(&'static str, u16, String)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => buf.extend_from_slice(&chunk[..n]),
                }
            }
            let req = String::from_utf8_lossy(&buf);
            let path = req.split_whitespace().nth(1).unwrap_or("/").to_string();
            let (status, body) = routes
                .iter()
                .find(|(p, _, _)| *p == path)
                .map(|(_, s, b)| (*s, b.clone()))
                .unwrap_or((404, r#"{"status":404,"message":"Not Found"}"#.to_string()));
            let resp = format!(
                "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(resp.as_bytes());
        }
    });
    format!("http://{}/v3.1", addr)
}

/// A raw REST Countries object with the fields the cleaner reads.
pub fn raw_country(common: &str, region: &str, population: u64) -> Value {
    json!({
        "name": {"common": common, "official": format!("Republic of {common}")},
        "capital": [format!("{common} City")],
        "region": region,
        "subregion": "Somewhere",
        "population": population,
        "area": 1000.5,
        "languages": {"eng": "English", "fra": "French"},
        "currencies": {"XOF": {"name": "West African CFA franc", "symbol": "Fr"}},
        "borders": ["AAA", "BBB"],
        "timezones": ["UTC+01:00"],
        "flag": "🏳"
    })
}

pub fn api_country(common: &str, region: &str, population: u64) -> ApiCountry {
    ApiCountry {
        common_name: common.into(),
        official_name: format!("Republic of {common}"),
        capital: format!("{common} City"),
        region: region.into(),
        population,
        ..Default::default()
    }
}

pub fn local(country: &str, capital: &str, continent: &str) -> LocalRecord {
    LocalRecord {
        country: Some(country.into()),
        capital: Some(capital.into()),
        continents: Some(continent.into()),
        extra: vec![],
    }
}

pub fn table(rows: Vec<LocalRecord>) -> LocalTable {
    LocalTable {
        extra_columns: vec![],
        rows,
    }
}
