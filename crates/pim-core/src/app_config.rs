use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Root of the PIM REST backend, e.g. `"https://pim.example.com"`.
    pub api_base_url: String,
    pub env: Environment,
    pub log_level: String,
    /// Acting user, written to `createdBy` and the `user-email` header.
    pub user_email: Option<String>,
    /// Directory holding one JSON file per cleaning workflow.
    pub cache_dir: PathBuf,
    /// Text-classification endpoint. `None` runs categorization offline.
    pub categorizer_url: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_concurrent_rows: usize,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_base_url", &self.api_base_url)
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("user_email", &self.user_email.as_ref().map(|_| "[redacted]"))
            .field("cache_dir", &self.cache_dir)
            .field("categorizer_url", &self.categorizer_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_concurrent_rows", &self.max_concurrent_rows)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .finish()
    }
}
