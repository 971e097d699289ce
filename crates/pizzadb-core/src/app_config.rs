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

/// Process-level settings for the server and CLI.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Six-field cron expression; `None` disables the scheduled run.
    pub scrape_schedule: Option<String>,
    pub trigger_tokens: Vec<String>,
    pub rate_limit_per_min: usize,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("scrape_schedule", &self.scrape_schedule)
            .field("trigger_tokens", &format!("[{} redacted]", self.trigger_tokens.len()))
            .field("rate_limit_per_min", &self.rate_limit_per_min)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}

/// Where promo records come from on a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoSource {
    /// Scrape the coupon listing page.
    Scrape,
    /// Return the built-in static list without any network call.
    Static,
}

/// Per-run settings, validated at invocation time and passed by value into
/// the pipeline. Sub-components never read the environment themselves.
#[derive(Clone)]
pub struct PipelineConfig {
    pub store_url: String,
    pub store_key: String,
    pub geo_api_key: String,
    pub city: String,
    pub geo_search_url: String,
    pub geo_search_lang: String,
    pub geo_search_results: u32,
    pub promo_source: PromoSource,
    pub promo_url: String,
    pub store_table: String,
    /// Whole-request timeout. `None` keeps the transport's own behavior.
    pub http_timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl std::fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("store_url", &self.store_url)
            .field("store_key", &"[redacted]")
            .field("geo_api_key", &"[redacted]")
            .field("city", &self.city)
            .field("geo_search_url", &self.geo_search_url)
            .field("geo_search_lang", &self.geo_search_lang)
            .field("geo_search_results", &self.geo_search_results)
            .field("promo_source", &self.promo_source)
            .field("promo_url", &self.promo_url)
            .field("store_table", &self.store_table)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
