use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub sheets: SheetsConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SheetsConfig {
    pub master_sheet_id: String,
    pub api_key: String,
    pub credentials_range: String,  // username, password, tasks sheet URL
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub login_delay_ms: u64,  // artificial latency before the credential check
    pub session_idle_secs: u64,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .set_default("sheets.credentials_range", "Sheet1!B:D")?
            .set_default("sheets.base_url", "https://sheets.googleapis.com")?
            .set_default("auth.login_delay_ms", 500)?
            .set_default("auth.session_idle_secs", 1800)?
            .add_source(config::File::with_name("config/default"))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Inactivity window for both the session cookie and its task view.
    pub fn session_idle(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.auth.session_idle_secs)
    }
}
