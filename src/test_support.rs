//! Fakes shared by the unit tests: an in-memory `SheetsApi` and a stub of the
//! spreadsheet REST API served over HTTP.
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::sync::Notify;

use crate::config::{AuthConfig, Config, ServerConfig, SheetsConfig};
use crate::errors::sheets::{SheetsError, SheetsResult};
use crate::sheets::client::{SheetEntry, SheetProperties, SheetsApi, SpreadsheetMetadata, ValueRange};

pub const STUB_KEY: &str = "test-key";
pub const MASTER_ID: &str = "MASTER";

fn to_rows(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

pub fn stub_config(base_url: &str) -> Config {
    Config {
        server: ServerConfig { host: "127.0.0.1".into(), port: 0 },
        sheets: SheetsConfig {
            master_sheet_id: MASTER_ID.into(),
            api_key: STUB_KEY.into(),
            credentials_range: "Sheet1!B:D".into(),
            base_url: base_url.into(),
        },
        auth: AuthConfig { login_delay_ms: 0, session_idle_secs: 1800 },
    }
}

/// Stub of the spreadsheet REST API. Unknown ranges and spreadsheets answer 404.
#[derive(Default, Clone)]
pub struct StubSheets {
    values: HashMap<(String, String), Vec<Vec<String>>>,
    tabs: HashMap<String, Vec<String>>,
}

impl StubSheets {
    pub fn with_values(mut self, id: &str, range: &str, rows: &[&[&str]]) -> Self {
        self.values.insert((id.into(), range.into()), to_rows(rows));
        self
    }

    pub fn with_tabs(mut self, id: &str, tabs: &[&str]) -> Self {
        self.tabs.insert(id.into(), tabs.iter().map(|t| t.to_string()).collect());
        self
    }
}

fn key_ok(query: &HashMap<String, String>) -> bool {
    query.get("key").map(String::as_str) == Some(STUB_KEY)
}

async fn stub_values(
    State(stub): State<Arc<StubSheets>>,
    Path((id, range)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !key_ok(&query) {
        return StatusCode::FORBIDDEN.into_response();
    }
    match stub.values.get(&(id, range)) {
        Some(rows) => Json(json!({ "values": rows })).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn stub_metadata(
    State(stub): State<Arc<StubSheets>>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !key_ok(&query) {
        return StatusCode::FORBIDDEN.into_response();
    }
    match stub.tabs.get(&id) {
        Some(tabs) => {
            let sheets: Vec<_> = tabs.iter().map(|t| json!({ "properties": { "title": t } })).collect();
            Json(json!({ "spreadsheetId": id, "sheets": sheets })).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Serve `stub` on an ephemeral port and return its base URL.
pub async fn spawn_stub(stub: StubSheets) -> String {
    let app = Router::new()
        .route("/v4/spreadsheets/:id", get(stub_metadata))
        .route("/v4/spreadsheets/:id/values/:range", get(stub_values))
        .with_state(Arc::new(stub));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// In-memory `SheetsApi`. Fetches of a gated range wait until the gate is opened.
#[derive(Default)]
pub struct FakeSheets {
    values: HashMap<(String, String), Vec<Vec<String>>>,
    tabs: HashMap<String, Vec<String>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    pub value_calls: AtomicUsize,
}

impl FakeSheets {
    pub fn with_values(mut self, id: &str, range: &str, rows: &[&[&str]]) -> Self {
        self.values.insert((id.into(), range.into()), to_rows(rows));
        self
    }

    pub fn with_tabs(mut self, id: &str, tabs: &[&str]) -> Self {
        self.tabs.insert(id.into(), tabs.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn gate(&self, range: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(range.into(), gate.clone());
        gate
    }

    pub fn calls(&self) -> usize {
        self.value_calls.load(Ordering::SeqCst)
    }
}

impl SheetsApi for FakeSheets {
    async fn fetch_values(&self, spreadsheet_id: &str, range: &str) -> SheetsResult<ValueRange> {
        self.value_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().unwrap().get(range).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.values
            .get(&(spreadsheet_id.to_string(), range.to_string()))
            .map(|rows| ValueRange { values: rows.clone() })
            .ok_or(SheetsError::Status(404))
    }

    async fn fetch_metadata(&self, spreadsheet_id: &str) -> SheetsResult<SpreadsheetMetadata> {
        self.tabs
            .get(spreadsheet_id)
            .map(|tabs| SpreadsheetMetadata {
                sheets: tabs
                    .iter()
                    .map(|t| SheetEntry { properties: SheetProperties { title: t.clone() } })
                    .collect(),
            })
            .ok_or(SheetsError::Status(500))
    }
}
