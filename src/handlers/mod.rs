mod auth;
mod tasks;

pub use auth::{serve_login_page, handle_login, handle_logout};
pub use tasks::{serve_tasks_page, select_tab};

pub const CONNECTION_ERROR: &str = "Failed to connect to Google Sheets. Please check your configuration.";

/// Session key holding the logged-in username.
pub const USER_KEY: &str = "user_session";
pub const VIEW_KEY: &str = "task_view";
