// Application error type plus the result alias used by handlers and loaders.
use thiserror::Error;

pub mod response;
pub mod sheets;

pub use sheets::SheetsError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Please enter both username and password")]
    EmptyField,

    #[error("Username not found")]
    UnknownUser,

    #[error("Incorrect password")]
    WrongPassword,

    #[error("Failed to load user data: {0}")]
    CredentialFetch(#[source] SheetsError),

    #[error("Failed to load sheet metadata: {0}")]
    MetadataFetch(#[source] SheetsError),

    #[error("Failed to load tasks: {0}")]
    TaskFetch(#[source] SheetsError),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Your session has expired, please log in again")]
    ViewExpired,

    #[error("Template error: {0}")]
    Template(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
