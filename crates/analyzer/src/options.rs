// ABOUTME: Configuration for the metalens client: Options, OutputFormat and the fluent ClientBuilder.
// ABOUTME: Defaults mirror a desktop browser request with a one hour analysis cache.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::client::Client;
use crate::resource::DEFAULT_USER_AGENT;
use crate::store::AnalysisStore;

/// Default age below which a stored analysis is reused instead of refetched.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Report format for rendered analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Text => "text",
        };
        write!(f, "{}", s)
    }
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => OutputFormat::Markdown,
            "text" | "txt" => OutputFormat::Text,
            _ => OutputFormat::Json,
        }
    }
}

/// Configuration options for the metalens client.
#[derive(Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub allow_private_networks: bool,
    /// Extra request headers; they override the browser defaults.
    pub headers: HashMap<String, String>,
    pub http_client: Option<reqwest::Client>,
    pub cache_ttl: Duration,
    /// Where analyses are kept. A fresh in-memory store is used when unset.
    pub store: Option<Arc<dyn AnalysisStore>>,
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("allow_private_networks", &self.allow_private_networks)
            .field("headers", &self.headers)
            .field("http_client", &self.http_client.is_some())
            .field("cache_ttl", &self.cache_ttl)
            .field("store", &self.store.is_some())
            .finish()
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            allow_private_networks: false,
            headers: HashMap::new(),
            http_client: None,
            cache_ttl: DEFAULT_CACHE_TTL,
            store: None,
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Allow or disallow requests to private networks.
    pub fn allow_private_networks(mut self, allow: bool) -> Self {
        self.opts.allow_private_networks = allow;
        self
    }

    /// Add a header to every page request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Use a custom HTTP client. Timeout and user agent are then its concern.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// How long a stored analysis is served before the page is refetched.
    /// Zero disables reuse.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.opts.cache_ttl = ttl;
        self
    }

    pub fn store(mut self, store: Arc<dyn AnalysisStore>) -> Self {
        self.opts.store = Some(store);
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Client {
        Client::new(self.opts)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = Options::default();
        assert_eq!(opts.timeout, Duration::from_secs(30));
        assert_eq!(opts.cache_ttl, Duration::from_secs(3600));
        assert!(!opts.allow_private_networks);
        assert!(opts.user_agent.contains("Chrome/"));
        assert!(opts.store.is_none());
    }

    #[test]
    fn output_format_from_str() {
        assert_eq!(OutputFormat::from("md"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from("Markdown"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from("txt"), OutputFormat::Text);
        assert_eq!(OutputFormat::from("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::from("anything"), OutputFormat::Json);
        assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
    }

    #[test]
    fn builder_sets_fields() {
        let builder = ClientBuilder::new()
            .timeout(Duration::from_secs(5))
            .user_agent("probe/1.0")
            .header("X-Trace", "1")
            .cache_ttl(Duration::ZERO)
            .allow_private_networks(true);
        let opts = &builder.opts;
        assert_eq!(opts.timeout, Duration::from_secs(5));
        assert_eq!(opts.user_agent, "probe/1.0");
        assert_eq!(opts.headers.get("X-Trace").map(String::as_str), Some("1"));
        assert_eq!(opts.cache_ttl, Duration::ZERO);
        assert!(opts.allow_private_networks);
    }
}
