use tracing;

use crate::errors::{AppError, AppResult};
use crate::models::{CredentialRecord, CredentialStore};
use crate::sheets::{extract_spreadsheet_id, task_column_range, SheetsApi};

/// Tab titles of a workbook, in the order the API lists them.
pub async fn load_sheet_names<A: SheetsApi>(api: &A, spreadsheet_id: &str) -> AppResult<Vec<String>> {
    let metadata = api
        .fetch_metadata(spreadsheet_id)
        .await
        .map_err(AppError::MetadataFetch)?;

    Ok(metadata.titles())
}

/// Column A of `tab` below the header, non-empty cells joined with newlines.
///
/// Never fails: any error is logged and yields an empty string.
pub async fn load_task_column<A: SheetsApi>(api: &A, spreadsheet_id: &str, tab: &str) -> String {
    let range = task_column_range(tab);

    match api.fetch_values(spreadsheet_id, &range).await {
        Ok(value_range) => value_range
            .values
            .iter()
            .skip(1)
            .filter_map(|row| row.first())
            .filter(|cell| !cell.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n"),
        Err(e) => {
            tracing::error!("{} (sheet {}, tab {})", AppError::TaskFetch(e), spreadsheet_id, tab);
            String::new()
        }
    }
}

/// Like `load_task_column`, starting from the tasks sheet URL.
pub async fn load_tasks_for_url<A: SheetsApi>(api: &A, tasks_sheet_url: &str, tab: &str) -> String {
    if tasks_sheet_url.trim().is_empty() {
        return String::new();
    }

    match extract_spreadsheet_id(tasks_sheet_url) {
        Some(spreadsheet_id) => load_task_column(api, spreadsheet_id, tab).await,
        None => {
            tracing::error!("Invalid tasks sheet URL format: {}", tasks_sheet_url);
            String::new()
        }
    }
}

/// Read the master sheet into a fresh credential snapshot, skipping the header row.
pub async fn load_credentials<A: SheetsApi>(
    api: &A,
    master_sheet_id: &str,
    range: &str,
) -> AppResult<CredentialStore> {
    let value_range = api
        .fetch_values(master_sheet_id, range)
        .await
        .map_err(AppError::CredentialFetch)?;

    let records = value_range
        .values
        .iter()
        .skip(1)
        .map(|row| CredentialRecord::from_row(row))
        .collect::<Vec<_>>();

    tracing::info!("Loaded {} user records", records.len());
    Ok(CredentialStore::new(records))
}
