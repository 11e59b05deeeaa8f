use crate::output::ExportFormat;
use serde::Deserialize;

/// Default page budget for a crawl
pub const DEFAULT_MAX_PAGES: u32 = 10;

/// Default politeness delay between requests (seconds)
pub const DEFAULT_DELAY_SECONDS: f64 = 1.0;

/// Default upper bound of the random jitter added to each delay (seconds)
pub const DEFAULT_JITTER_SECONDS: f64 = 0.5;

/// Default request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Client identities rotated across requests
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14.2; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0",
];

/// Crawl behavior configuration
///
/// Immutable once handed to a [`crate::Coordinator`]; the crawl domain is
/// derived from `seed_url` at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlConfig {
    /// Absolute URL the crawl starts from
    pub seed_url: String,

    /// Maximum number of URLs to attempt
    pub max_pages: u32,

    /// Fixed delay between consecutive requests (seconds)
    pub delay_seconds: f64,

    /// Upper bound of the random jitter added to every delay (seconds)
    pub jitter_seconds: f64,
}

impl CrawlConfig {
    /// Creates a crawl configuration with the default jitter
    pub fn new(seed_url: impl Into<String>, max_pages: u32, delay_seconds: f64) -> Self {
        Self {
            seed_url: seed_url.into(),
            max_pages,
            delay_seconds,
            jitter_seconds: DEFAULT_JITTER_SECONDS,
        }
    }

    /// Replaces the jitter bound
    pub fn with_jitter(mut self, jitter_seconds: f64) -> Self {
        self.jitter_seconds = jitter_seconds;
        self
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Total request timeout (seconds)
    pub timeout_seconds: u64,

    /// Pool of `User-Agent` values, one picked at random per request
    pub user_agents: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Settings file layout
///
/// Every key is optional; absent values fall back to command-line flags and
/// then to the defaults above.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub crawler: CrawlerSettings,
    pub client: ClientSettings,
    pub output: OutputSettings,
}

/// `[crawler]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CrawlerSettings {
    #[serde(rename = "seed-url")]
    pub seed_url: Option<String>,

    #[serde(rename = "max-pages")]
    pub max_pages: Option<u32>,

    #[serde(rename = "delay-seconds")]
    pub delay_seconds: Option<f64>,

    #[serde(rename = "jitter-seconds")]
    pub jitter_seconds: Option<f64>,
}

/// `[client]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: Option<u64>,

    #[serde(rename = "user-agents")]
    pub user_agents: Option<Vec<String>>,
}

/// `[output]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: Option<ExportFormat>,

    #[serde(rename = "json-path")]
    pub json_path: Option<String>,

    #[serde(rename = "csv-path")]
    pub csv_path: Option<String>,
}
