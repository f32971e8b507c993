use axum::{
    routing::{get, post},
    Router,
    middleware::from_fn,
};
use tower_http::services::ServeDir;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tower_sessions::cookie::{time::Duration, SameSite};
use crate::{handlers, middleware, state::AppState};

pub fn build_router(state: AppState) -> Router {
    let idle = Duration::seconds(state.config.auth.session_idle_secs as i64);

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_name("session")
        .with_expiry(Expiry::OnInactivity(idle));

    Router::new()
        // Auth routes
        .route("/", get(handlers::serve_login_page))
        .route("/login", post(handlers::handle_login))
        .route("/logout", get(handlers::handle_logout))

        // Task routes
        .route("/tasks", get(handlers::serve_tasks_page))
        .route("/tasks/tab", get(handlers::select_tab))

        .nest_service("/static", ServeDir::new("static"))

        .layer(from_fn(middleware::require_auth))
        .layer(session_layer)
        .with_state(state)
}
