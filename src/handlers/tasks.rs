use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tower_sessions::Session;
use std::{fs, sync::Arc};
use tracing;
use crate::errors::{AppError, AppResult};
use crate::models::TabQuery;
use crate::navigator::TabSelection;
use crate::render::{escape_html, fill_template, render_panel};
use crate::state::{AppState, SheetsNavigator};
use super::{USER_KEY, VIEW_KEY};

async fn session_value(session: &Session, key: &str) -> AppResult<String> {
    session
        .get::<String>(key)
        .await
        .map_err(|e| AppError::Session(e.to_string()))?
        .ok_or(AppError::ViewExpired)
}

async fn current_view(
    state: &AppState,
    session: &Session,
) -> AppResult<Arc<SheetsNavigator>> {
    let view_id = session_value(session, VIEW_KEY).await?;
    state
        .views
        .get(&view_id)
        .await
        .ok_or(AppError::ViewExpired)
}

pub async fn serve_tasks_page(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Response> {
    let username = session_value(&session, USER_KEY).await?;
    let view = current_view(&state, &session).await?.snapshot().await;

    let tasks_html = fs::read_to_string("templates/tasks.html").map_err(|e| {
        tracing::error!("Failed to read tasks template: {}", e);
        AppError::Template(e)
    })?;

    let username_html = escape_html(&username);
    let panel_html = render_panel(&view.tabs, &view.tasks);
    let tasks_html = fill_template(
        &tasks_html,
        &[("username", username_html.as_str()), ("panel", panel_html.as_str())],
    );

    tracing::debug!("Rendered tasks page for user: {}", username);
    Ok(Html(tasks_html).into_response())
}

/// Tab click. Answers with the refreshed panel, or 204 when a later click
/// has already taken over.
pub async fn select_tab(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<TabQuery>,
) -> AppResult<Response> {
    let navigator = current_view(&state, &session).await?;

    Ok(match navigator.select_tab(&query.name).await {
        TabSelection::Applied(view) => Html(render_panel(&view.tabs, &view.tasks)).into_response(),
        TabSelection::Superseded => StatusCode::NO_CONTENT.into_response(),
        TabSelection::UnknownTab => {
            tracing::warn!("Unknown tab requested: {}", query.name);
            (StatusCode::NOT_FOUND, "Unknown tab").into_response()
        }
    })
}
