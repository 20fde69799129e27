// ABOUTME: Resolves relative image and link URLs against the analyzed page URL.
// ABOUTME: Fails soft: a malformed base returns the candidate unchanged.

use tracing::debug;
use url::Url;

/// Resolves `candidate` against `base`.
///
/// - `None` stays `None`.
/// - `http://` and `https://` URLs are returned unchanged.
/// - A leading `/` is joined to the base origin.
/// - Anything else is joined to the base directory (path up to and including
///   its last `/`).
///
/// If `base` cannot be parsed or has no host, the candidate is returned as-is.
pub fn resolve(base: &str, candidate: Option<&str>) -> Option<String> {
    let candidate = candidate?;

    if candidate.starts_with("http://") || candidate.starts_with("https://") {
        return Some(candidate.to_string());
    }

    let Some(origin) = origin_of(base) else {
        debug!(base, candidate, "unresolvable base URL, keeping candidate as-is");
        return Some(candidate.to_string());
    };

    if candidate.starts_with('/') {
        return Some(format!("{}{}", origin.prefix, candidate));
    }

    Some(format!("{}{}{}", origin.prefix, origin.directory, candidate))
}

struct Origin {
    /// `scheme://host[:port]`
    prefix: String,
    directory: String,
}

fn origin_of(base: &str) -> Option<Origin> {
    let url = Url::parse(base).ok()?;
    let host = url.host_str()?;

    let prefix = match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    };

    let path = url.path();
    let directory = match path.rfind('/') {
        Some(idx) => path[..=idx].to_string(),
        None => String::new(),
    };

    Some(Origin { prefix, directory })
}
