use std::path::PathBuf;

use rust_decimal::Decimal;

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
    pub api_url: String,
    pub env: Environment,
    pub log_level: String,
    /// Public gateway used to resolve content-identifier image references.
    pub ipfs_gateway: String,
    /// Number of products requested per catalog page.
    pub page_size: u32,
    /// Fraction of the base price added as the market fee.
    pub market_fee_rate: Decimal,
    pub api_timeout_secs: u64,
    pub api_user_agent: String,
    /// Retries for read endpoints only; cart mutations are never retried.
    pub api_max_retries: u32,
    pub api_retry_backoff_base_ms: u64,
    pub api_token: Option<String>,
    pub locale_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_url", &self.api_url)
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("ipfs_gateway", &self.ipfs_gateway)
            .field("page_size", &self.page_size)
            .field("market_fee_rate", &self.market_fee_rate)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("api_user_agent", &self.api_user_agent)
            .field("api_max_retries", &self.api_max_retries)
            .field("api_retry_backoff_base_ms", &self.api_retry_backoff_base_ms)
            .field("api_token", &self.api_token.as_ref().map(|_| "[redacted]"))
            .field("locale_path", &self.locale_path)
            .finish()
    }
}
