use axum::{
    response::{IntoResponse, Response, Redirect},
    http::StatusCode,
};
use urlencoding;
use crate::errors::AppError;

/// Redirect back to the login page with `message` shown in the error banner.
pub fn login_redirect(message: &str) -> Response {
    Redirect::to(&format!("/?error={}", urlencoding::encode(message))).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Form and session problems go back to the login page
            AppError::EmptyField
            | AppError::UnknownUser
            | AppError::WrongPassword
            | AppError::Session(_)
            | AppError::ViewExpired => login_redirect(&self.to_string()),

            AppError::CredentialFetch(_) => login_redirect(crate::handlers::CONNECTION_ERROR),

            // Loader failures never reach a handler unrecovered, but map them anyway
            AppError::MetadataFetch(_) | AppError::TaskFetch(_) => (
                StatusCode::BAD_GATEWAY,
                self.to_string(),
            ).into_response(),

            AppError::Template(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Template error: {}", e)
            ).into_response(),
        }
    }
}
