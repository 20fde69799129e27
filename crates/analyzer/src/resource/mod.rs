// ABOUTME: Fetches pages over HTTP with browser-like headers, SSRF protection and a body size cap.
// ABOUTME: Decodes response bodies using the declared charset or chardetng detection.

use std::collections::HashMap;
use std::net::IpAddr;

use bytes::Bytes;
use ipnet::IpNet;
use once_cell::sync::Lazy;
use tracing::{debug, warn};
use url::Url;

use crate::error::AnalyzeError;

/// Maximum allowed content length (10 MiB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";
pub const DEFAULT_REFERER: &str = "https://www.google.com/";

const OP: &str = "Fetch";

static PRIVATE_NETS: Lazy<Vec<IpNet>> = Lazy::new(|| {
    [
        // RFC1918
        "10.0.0.0/8",
        "172.16.0.0/12",
        "192.168.0.0/16",
        "127.0.0.0/8",
        "169.254.0.0/16",
        "0.0.0.0/8",
        // Unique local and link-local
        "fc00::/7",
        "fe80::/10",
    ]
    .iter()
    .filter_map(|cidr| cidr.parse().ok())
    .collect()
});

/// Headers sent with every page request unless overridden.
pub fn browser_headers() -> HashMap<String, String> {
    HashMap::from([
        ("Accept".to_string(), DEFAULT_ACCEPT.to_string()),
        (
            "Accept-Language".to_string(),
            DEFAULT_ACCEPT_LANGUAGE.to_string(),
        ),
        ("Referer".to_string(), DEFAULT_REFERER.to_string()),
    ])
}

/// Options for fetching a resource.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub headers: HashMap<String, String>,
    pub allow_private_networks: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            headers: browser_headers(),
            allow_private_networks: false,
        }
    }
}

/// Result of a successful fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Decodes the body, honouring the response charset when declared.
    pub fn text(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// True for loopback, private, link-local and unspecified addresses.
pub fn is_private_ip(addr: &IpAddr) -> bool {
    if addr.is_loopback() || addr.is_unspecified() {
        return true;
    }
    PRIVATE_NETS.iter().any(|net| net.contains(addr))
}

fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(charset) = content_type.and_then(extract_charset) {
        if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
            let (decoded, _, _) = encoding.decode(body);
            return decoded.into_owned();
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    lower.split(';').find_map(|part| {
        part.trim()
            .strip_prefix("charset=")
            .map(|cs| cs.trim_matches('"').trim_matches('\'').to_string())
    })
}

/// Rejects `target` if its host is, or resolves to, a private address.
async fn guard_host(url: &str, target: &Url) -> Result<(), AnalyzeError> {
    let Some(host) = target.host_str() else {
        return Ok(());
    };
    // IPv6 literals keep their brackets in host_str
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    if let Ok(ip) = bare.parse::<IpAddr>() {
        if is_private_ip(&ip) {
            return Err(AnalyzeError::ssrf(
                url,
                OP,
                Some(anyhow::anyhow!("private IP addresses are not allowed")),
            ));
        }
        return Ok(());
    }

    let port = target.port_or_known_default().unwrap_or(80);
    let addrs = tokio::net::lookup_host((bare, port)).await.map_err(|e| {
        AnalyzeError::fetch(url, OP, Some(anyhow::anyhow!("DNS lookup failed: {}", e)))
    })?;
    for socket_addr in addrs {
        if is_private_ip(&socket_addr.ip()) {
            return Err(AnalyzeError::ssrf(
                url,
                OP,
                Some(anyhow::anyhow!("{} resolves to a private address", bare)),
            ));
        }
    }
    Ok(())
}

fn request_error(url: &str, err: reqwest::Error) -> AnalyzeError {
    if err.is_timeout() {
        AnalyzeError::timeout(url, OP, Some(anyhow::anyhow!("request timed out: {}", err)))
    } else {
        AnalyzeError::fetch(url, OP, Some(anyhow::anyhow!("request failed: {}", err)))
    }
}

fn too_large(url: &str) -> AnalyzeError {
    AnalyzeError::fetch(url, OP, Some(anyhow::anyhow!("content too large")))
}

/// Fetches `url`, following redirects. Any status other than 200 is an error.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    opts: &FetchOptions,
) -> Result<FetchResult, AnalyzeError> {
    if url.is_empty() {
        return Err(AnalyzeError::invalid_url(url, OP, None));
    }

    let parsed_url = Url::parse(url).map_err(|e| {
        AnalyzeError::invalid_url(url, OP, Some(anyhow::anyhow!("invalid URL: {}", e)))
    })?;

    let scheme = parsed_url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(AnalyzeError::invalid_url(
            url,
            OP,
            Some(anyhow::anyhow!("scheme must be http or https")),
        ));
    }

    if !opts.allow_private_networks {
        guard_host(url, &parsed_url).await?;
    }

    let mut request = client.get(url);
    for (key, value) in &opts.headers {
        request = request.header(key, value);
    }

    let response = request.send().await.map_err(|e| {
        let err = request_error(url, e);
        warn!(url, error = %err, "page request failed");
        err
    })?;

    // Redirects may land somewhere the initial check never saw
    if !opts.allow_private_networks && response.url().as_str() != url {
        let final_url = response.url().clone();
        guard_host(url, &final_url).await?;
    }

    if let Some(len) = response.content_length() {
        if len as usize > MAX_CONTENT_LENGTH {
            return Err(too_large(url));
        }
    }

    let status = response.status().as_u16();
    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    if status != 200 {
        warn!(url, status, "page returned non-200 status");
        return Err(AnalyzeError::fetch(
            url,
            OP,
            Some(anyhow::anyhow!("Failed to fetch URL: {}", status)),
        ));
    }

    let body = response.bytes().await.map_err(|e| request_error(url, e))?;
    if body.len() > MAX_CONTENT_LENGTH {
        return Err(too_large(url));
    }

    debug!(url, final_url = %final_url, bytes = body.len(), "fetched page");

    Ok(FetchResult {
        status,
        url: url.to_string(),
        final_url,
        content_type,
        body,
    })
}
