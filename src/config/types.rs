use serde::Deserialize;

/// Default MediaWiki API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

/// Main configuration structure for wikiharvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub application: ApplicationConfig,
    pub store: StoreConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Title generation and API endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationConfig {
    /// Title template; `{count}` is replaced with the seed index
    pub template: String,

    /// First seed index (inclusive)
    pub start: u64,

    /// Last seed index (exclusive)
    pub stop: u64,

    /// Revision API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

/// Keyed store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the store database file
    pub path: String,
}

/// Fetch retry policy configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Maximum attempts for a single title on bad HTTP responses
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between retry attempts (milliseconds)
    #[serde(rename = "retry-delay-ms", default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_max_retries() -> u32 {
    5
}

fn default_retry_delay_ms() -> u64 {
    500
}
