mod auth_service;
mod sheets_service;

pub use auth_service::{authenticate, validate_fields};
pub use sheets_service::{load_credentials, load_sheet_names, load_task_column, load_tasks_for_url};
