use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SPREADSHEET_ID: Regex = Regex::new(r"/spreadsheets/d/([a-zA-Z0-9\-_]+)").unwrap();
}

/// Pull the spreadsheet identifier out of a sheet URL such as
/// `https://docs.google.com/spreadsheets/d/<id>/edit#gid=0`.
pub fn extract_spreadsheet_id(url: &str) -> Option<&str> {
    SPREADSHEET_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
