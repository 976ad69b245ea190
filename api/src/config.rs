use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default Google News search endpoint queried with `site:{site}`
pub const DEFAULT_SEARCH_BASE: &str = "https://news.google.com/rss/search";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Base URL of the upstream search feed
    pub search_base_url: String,
    /// Upstream locale parameters (`hl`, `gl`, `ceid`)
    pub search_hl: String,
    pub search_gl: String,
    pub search_ceid: String,
    /// Upper bound on link resolutions in flight for one request
    pub max_concurrent_resolutions: usize,
    /// Timeout for a single link resolution fetch
    pub resolve_timeout: Duration,
    /// Timeout for the upstream search feed fetch
    pub feed_timeout: Duration,
    pub connect_timeout: Duration,
    /// Overall deadline for resolving every item of one request
    pub request_deadline: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            search_base_url: DEFAULT_SEARCH_BASE.to_string(),
            search_hl: "en-US".to_string(),
            search_gl: "US".to_string(),
            search_ceid: "US:en".to_string(),
            max_concurrent_resolutions: 8,
            resolve_timeout: Duration::from_secs(10),
            feed_timeout: Duration::from_secs(15),
            connect_timeout: Duration::from_secs(5),
            request_deadline: Duration::from_secs(30),
            user_agent: format!("sitefeed/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            port: parse_or("PORT", defaults.port),
            search_base_url: env::var("UPSTREAM_SEARCH_BASE")
                .unwrap_or(defaults.search_base_url),
            search_hl: env::var("UPSTREAM_HL").unwrap_or(defaults.search_hl),
            search_gl: env::var("UPSTREAM_GL").unwrap_or(defaults.search_gl),
            search_ceid: env::var("UPSTREAM_CEID").unwrap_or(defaults.search_ceid),
            max_concurrent_resolutions: parse_or(
                "MAX_CONCURRENT_RESOLUTIONS",
                defaults.max_concurrent_resolutions,
            )
            .max(1),
            resolve_timeout: secs_or("RESOLVE_TIMEOUT_SECS", defaults.resolve_timeout),
            feed_timeout: secs_or("FEED_TIMEOUT_SECS", defaults.feed_timeout),
            connect_timeout: secs_or("CONNECT_TIMEOUT_SECS", defaults.connect_timeout),
            request_deadline: secs_or("REQUEST_DEADLINE_SECS", defaults.request_deadline),
            user_agent: env::var("USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Ignoring unparsable config value");
            default
        }),
        Err(_) => default,
    }
}

fn secs_or(key: &str, default: Duration) -> Duration {
    Duration::from_secs(parse_or(key, default.as_secs()))
}
