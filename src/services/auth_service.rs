use crate::errors::{AppError, AppResult};
use crate::models::{CredentialRecord, CredentialStore};

/// Trim both fields and reject the submission if either ends up empty.
pub fn validate_fields<'a>(username: &'a str, password: &'a str) -> AppResult<(&'a str, &'a str)> {
    let username = username.trim();
    let password = password.trim();

    if username.is_empty() || password.is_empty() {
        return Err(AppError::EmptyField);
    }
    Ok((username, password))
}

/// Check a submitted username/password against a credential snapshot.
///
/// The first record with the given username decides the outcome. Passwords are
/// compared as plaintext strings, exactly as they are stored in the sheet.
pub fn authenticate<'s>(
    store: &'s CredentialStore,
    username: &str,
    password: &str,
) -> AppResult<&'s CredentialRecord> {
    let (username, password) = validate_fields(username, password)?;

    let record = store.find(username).ok_or(AppError::UnknownUser)?;
    if record.password != password {
        return Err(AppError::WrongPassword);
    }
    Ok(record)
}
