use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing;
use urlencoding;

use crate::config::SheetsConfig;
use crate::errors::sheets::{SheetsError, SheetsResult};

/// Cell values returned by the `values` endpoint. Rows without any data are
/// omitted by the API, and so is `values` itself for an empty range.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct ValueRange {
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct SpreadsheetMetadata {
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SheetEntry {
    pub properties: SheetProperties,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SheetProperties {
    pub title: String,
}

impl SpreadsheetMetadata {
    pub fn titles(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.properties.title.clone()).collect()
    }
}

/// The two read-only calls the app makes against the spreadsheet API.
pub trait SheetsApi: Send + Sync {
    fn fetch_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> impl Future<Output = SheetsResult<ValueRange>> + Send;

    fn fetch_metadata(
        &self,
        spreadsheet_id: &str,
    ) -> impl Future<Output = SheetsResult<SpreadsheetMetadata>> + Send;
}

#[derive(Clone)]
pub struct GoogleSheetsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoogleSheetsClient {
    pub fn new(config: &SheetsConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn values_url(&self, spreadsheet_id: &str, range: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}?key={}",
            self.base_url,
            urlencoding::encode(spreadsheet_id),
            urlencoding::encode(range),
            urlencoding::encode(&self.api_key)
        )
    }

    fn metadata_url(&self, spreadsheet_id: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}?key={}",
            self.base_url,
            urlencoding::encode(spreadsheet_id),
            urlencoding::encode(&self.api_key)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> SheetsResult<T> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Sheets API answered {}", status);
            return Err(SheetsError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl SheetsApi for GoogleSheetsClient {
    async fn fetch_values(&self, spreadsheet_id: &str, range: &str) -> SheetsResult<ValueRange> {
        tracing::debug!("Fetching range {} of {}", range, spreadsheet_id);
        self.get_json(&self.values_url(spreadsheet_id, range)).await
    }

    async fn fetch_metadata(&self, spreadsheet_id: &str) -> SheetsResult<SpreadsheetMetadata> {
        tracing::debug!("Fetching metadata of {}", spreadsheet_id);
        self.get_json(&self.metadata_url(spreadsheet_id)).await
    }
}
