// ABOUTME: The metalens Client: validates URLs, fetches pages, runs the analysis core and stores results.
// ABOUTME: Reuses a stored analysis of the same URL while it is younger than the cache TTL.

use std::net::ToSocketAddrs;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use url::Url;

use crate::audit::analyze;
use crate::error::AnalyzeError;
use crate::options::{ClientBuilder, Options};
use crate::resource::{browser_headers, fetch, is_private_ip, FetchOptions};
use crate::result::AnalysisResult;
use crate::store::{AnalysisStore, MemoryStore, StoredAnalysis};

/// Rejects redirects into private address space.
fn redirect_policy(allow_private: bool) -> reqwest::redirect::Policy {
    reqwest::redirect::Policy::custom(move |attempt| {
        if allow_private {
            return attempt.follow();
        }
        let next = attempt.url().clone();
        let Some(host) = next.host_str() else {
            return attempt.follow();
        };
        let bare = host.trim_start_matches('[').trim_end_matches(']');
        if let Ok(ip) = bare.parse::<std::net::IpAddr>() {
            if is_private_ip(&ip) {
                return attempt.error("redirect to private IP blocked");
            }
            return attempt.follow();
        }
        // The policy callback is synchronous, so resolve with the blocking resolver
        let port = next.port_or_known_default().unwrap_or(80);
        match (bare, port).to_socket_addrs() {
            Ok(mut addrs) => {
                if addrs.any(|sa| is_private_ip(&sa.ip())) {
                    attempt.error("redirect to private IP blocked")
                } else {
                    attempt.follow()
                }
            }
            Err(_) => attempt.error("DNS lookup failed during redirect"),
        }
    })
}

fn build_http_client(opts: &Options) -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(redirect_policy(opts.allow_private_networks))
        .user_agent(&opts.user_agent)
        .timeout(opts.timeout)
        .cookie_store(true)
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "falling back to default HTTP client");
            reqwest::Client::new()
        })
}

/// Only absolute http(s) URLs with a host can be analyzed.
fn validate_url(url: &str) -> Result<(), AnalyzeError> {
    if url.trim().is_empty() {
        return Err(AnalyzeError::invalid_url(
            url,
            "Analyze",
            Some(anyhow::anyhow!("URL is required")),
        ));
    }
    let parsed = Url::parse(url).map_err(|e| {
        AnalyzeError::invalid_url(url, "Analyze", Some(anyhow::anyhow!("Invalid URL: {}", e)))
    })?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(AnalyzeError::invalid_url(
            url,
            "Analyze",
            Some(anyhow::anyhow!("Invalid URL: scheme must be http or https")),
        ));
    }
    Ok(())
}

/// Analyzes pages and keeps their results.
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
    store: Arc<dyn AnalysisStore>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn new(opts: Options) -> Self {
        let http_client = opts
            .http_client
            .clone()
            .unwrap_or_else(|| build_http_client(&opts));
        let store = opts
            .store
            .clone()
            .unwrap_or_else(|| Arc::new(MemoryStore::new()));

        Self {
            opts,
            http_client,
            store,
        }
    }

    /// Returns the stored analysis of `url` if it is still fresh.
    async fn cached(&self, url: &str) -> Result<Option<StoredAnalysis>, AnalyzeError> {
        if self.opts.cache_ttl.is_zero() {
            return Ok(None);
        }
        let Some(stored) = self.store.get_by_url(url).await? else {
            return Ok(None);
        };
        let age = Utc::now().signed_duration_since(stored.result.analyzed_at);
        let fresh = age
            .to_std()
            .map(|age| age < self.opts.cache_ttl)
            // Timestamps in the future count as fresh
            .unwrap_or(true);
        debug!(url, id = stored.id, age_secs = age.num_seconds(), fresh, "store lookup");
        Ok(fresh.then_some(stored))
    }

    /// Fetches and analyzes `url`, or returns a recent stored analysis of it.
    ///
    /// The requested URL, not the post-redirect one, is the base for
    /// resolving relative image URLs and the key the result is stored under.
    pub async fn analyze(&self, url: &str) -> Result<StoredAnalysis, AnalyzeError> {
        validate_url(url)?;

        if let Some(stored) = self.cached(url).await? {
            return Ok(stored);
        }

        let mut headers = browser_headers();
        for (key, value) in &self.opts.headers {
            headers.retain(|k, _| !k.eq_ignore_ascii_case(key));
            headers.insert(key.clone(), value.clone());
        }
        let fetch_opts = FetchOptions {
            headers,
            allow_private_networks: self.opts.allow_private_networks,
        };

        let fetched = fetch(&self.http_client, url, &fetch_opts).await?;
        let html = fetched.text();

        let result = AnalysisResult::new(url, analyze(&html, url), Utc::now());
        let stored = self.store.insert(result).await?;

        info!(
            url,
            id = stored.id,
            overall = stored.result.overall().value,
            issues = stored.result.issues.len(),
            "analysis complete"
        );
        Ok(stored)
    }

    /// Analyzes already-fetched `html` as the page at `url`. Nothing is stored.
    pub fn analyze_html(&self, html: &str, url: &str) -> AnalysisResult {
        AnalysisResult::new(url, analyze(html, url), Utc::now())
    }

    /// The most recent analyses, newest first.
    pub async fn recent(&self, limit: usize) -> Result<Vec<StoredAnalysis>, AnalyzeError> {
        self.store.list_recent(limit).await
    }
}
