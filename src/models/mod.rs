mod user;
mod forms;
mod task;

pub use user::{CredentialRecord, CredentialStore};
pub use forms::{LoginForm, LoginPageQuery, TabQuery};
pub use task::SheetTab;
