//! Read-only access to the spreadsheet REST API: URL parsing, range
//! expressions, and the HTTP client.
pub mod client;
mod identifier;
mod range;

pub use client::{GoogleSheetsClient, SheetsApi};
pub use identifier::extract_spreadsheet_id;
pub use range::task_column_range;

/// Tab used whenever a workbook's tab list is unavailable.
pub const DEFAULT_TAB: &str = "Sheet1";
