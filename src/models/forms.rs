use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct TabQuery {
    pub name: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct LoginPageQuery {
    pub error: Option<String>,
}
