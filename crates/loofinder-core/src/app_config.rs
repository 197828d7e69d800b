use std::net::SocketAddr;

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

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Upper bound for every upstream HTTP request, in seconds.
    pub upstream_timeout_secs: u64,
    pub user_agent: String,
    /// HTML page listing the bulk dataset's export links.
    pub bulk_listing_url: String,
    /// How long a successful bulk pull is served before a refresh.
    pub bulk_cache_ttl_secs: u64,
    pub proximity_base_url: String,
    pub proximity_page_size: u32,
    pub proximity_max_pages: u32,
    /// Country preferred when filtering proximity results, e.g. `"US"`.
    pub primary_country: String,
    pub rate_limit_per_minute: usize,
    /// Cron expression for warming the bulk dataset cache. `None` disables
    /// the job.
    pub dataset_warm_schedule: Option<String>,
}
