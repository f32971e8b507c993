use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Response, Redirect},
};
use tower_sessions::Session;
use tokio::time::{sleep, Duration};
use std::fs;
use uuid::Uuid;
use tracing;
use crate::errors::{AppError, AppResult};
use crate::models::{LoginForm, LoginPageQuery};
use crate::navigator::TabNavigator;
use crate::render::{escape_html, fill_template};
use crate::services::{authenticate, validate_fields};
use crate::state::AppState;
use super::{CONNECTION_ERROR, USER_KEY, VIEW_KEY};

/// Page load: refresh the credential snapshot and show the login form.
pub async fn serve_login_page(
    State(state): State<AppState>,
    Query(query): Query<LoginPageQuery>,
) -> AppResult<Response> {
    let mut error = query.error;

    if let Err(e) = state.reload_credentials().await {
        tracing::error!("Error loading user data: {}", e);
        error = Some(CONNECTION_ERROR.to_string());
    }

    let login_html = fs::read_to_string("templates/login.html").map_err(|e| {
        tracing::error!("Failed to read login template: {}", e);
        AppError::Template(e)
    })?;

    let (error_class, error_text) = match error {
        Some(message) => ("error-message show", escape_html(&message)),
        None => ("error-message", String::new()),
    };

    Ok(Html(fill_template(
        &login_html,
        &[("error_class", error_class), ("error", error_text.as_str())],
    ))
    .into_response())
}

#[axum::debug_handler]
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Form(login_form): Form<LoginForm>,
) -> AppResult<Response> {
    let (username, password) = validate_fields(&login_form.username, &login_form.password)?;
    tracing::info!("Login attempt for user: {}", username);

    let store = state.credentials().await;

    // Fixed latency before answering, the check itself is local
    sleep(Duration::from_millis(state.config.auth.login_delay_ms)).await;

    let record = authenticate(&store, username, password).map_err(|e| {
        tracing::info!("Login rejected for {}: {}", username, e);
        e
    })?;
    tracing::info!("Password verified for user: {}", username);

    let navigator = TabNavigator::open(state.sheets.clone(), &record.tasks_sheet_url).await;
    let view_id = Uuid::new_v4().to_string();

    let previous = session
        .get::<String>(VIEW_KEY)
        .await
        .map_err(|e| AppError::Session(e.to_string()))?;

    state.views.insert(view_id.clone(), navigator, previous).await;

    session
        .insert(USER_KEY, username.to_string())
        .await
        .map_err(|e| AppError::Session(e.to_string()))?;
    session
        .insert(VIEW_KEY, view_id)
        .await
        .map_err(|e| AppError::Session(e.to_string()))?;

    Ok(Redirect::to("/tasks").into_response())
}

#[axum::debug_handler]
pub async fn handle_logout(
    State(state): State<AppState>,
    session: Session,
) -> Response {
    match session.remove::<String>(VIEW_KEY).await {
        Ok(Some(view_id)) => {
            state.views.remove(&view_id).await;
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("Session removal error: {}", e),
    }
    if let Err(e) = session.remove::<String>(USER_KEY).await {
        tracing::warn!("Session removal error: {}", e);
    }
    Redirect::to("/").into_response()
}
