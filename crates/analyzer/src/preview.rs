// ABOUTME: Derives search-result and social-share previews from an analysis result.
// ABOUTME: Applies the display fallbacks a search engine, Facebook or Twitter would use.

use url::Url;

use crate::extractors::NO_TITLE;
use crate::result::AnalysisResult;

pub const NO_DESCRIPTION: &str = "No description found";

/// How the page would appear as a search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPreview {
    pub title: String,
    /// Breadcrumb form of the URL, e.g. `example.com › blog › post`.
    pub display_url: String,
    pub description: String,
}

/// How the page would appear when shared via Open Graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialPreview {
    pub domain: String,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    /// False when the page has no Open Graph title, description or image.
    pub available: bool,
}

/// How the page would appear as a Twitter card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwitterPreview {
    pub card: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Host of `url`, or `url` itself when it does not parse.
pub fn domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}

/// Formats `url` as `host › seg › seg`, dropping leading and trailing slashes.
pub fn display_path(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let Some(host) = parsed.host_str() else {
        return url.to_string();
    };
    let path = parsed.path().trim_start_matches('/').trim_end_matches('/');
    if path.is_empty() {
        host.to_string()
    } else {
        format!("{} › {}", host, path.replace('/', " › "))
    }
}

pub fn search_preview(result: &AnalysisResult) -> SearchPreview {
    SearchPreview {
        title: result.title.clone().unwrap_or_else(|| NO_TITLE.to_string()),
        display_url: display_path(&result.url),
        description: result
            .description
            .clone()
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
    }
}

pub fn social_preview(result: &AnalysisResult) -> SocialPreview {
    SocialPreview {
        domain: domain_of(&result.url),
        title: result
            .og_title
            .clone()
            .or_else(|| result.title.clone())
            .unwrap_or_else(|| NO_TITLE.to_string()),
        description: result
            .og_description
            .clone()
            .or_else(|| result.description.clone())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        image: result.og_image.clone(),
        available: result.og_title.is_some()
            || result.og_description.is_some()
            || result.og_image.is_some(),
    }
}

pub fn twitter_preview(result: &AnalysisResult) -> TwitterPreview {
    TwitterPreview {
        card: result.twitter_card.clone(),
        title: result
            .twitter_title
            .clone()
            .or_else(|| result.og_title.clone())
            .or_else(|| result.title.clone()),
        description: result
            .twitter_description
            .clone()
            .or_else(|| result.og_description.clone())
            .or_else(|| result.description.clone()),
        image: result
            .twitter_image
            .clone()
            .or_else(|| result.og_image.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::analyze;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn result_for(html: &str, url: &str) -> AnalysisResult {
        let analyzed_at = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        AnalysisResult::new(url, analyze(html, url), analyzed_at)
    }

    #[test]
    fn test_display_path() {
        assert_eq!(display_path("https://site.com/blog/post/"), "site.com › blog › post");
        assert_eq!(display_path("https://site.com/"), "site.com");
        assert_eq!(display_path("https://site.com"), "site.com");
        assert_eq!(display_path("not a url"), "not a url");
    }

    #[test]
    fn test_domain_of() {
        assert_eq!(domain_of("https://www.site.com/a"), "www.site.com");
        assert_eq!(domain_of("garbage"), "garbage");
    }

    #[test]
    fn test_search_preview_fallbacks() {
        let result = result_for("<h1>Heading Only</h1>", "https://site.com/blog/post");
        assert_eq!(
            search_preview(&result),
            SearchPreview {
                title: "Heading Only".to_string(),
                display_url: "site.com › blog › post".to_string(),
                description: NO_DESCRIPTION.to_string(),
            }
        );
    }

    #[test]
    fn test_social_preview_without_open_graph() {
        let result = result_for(
            r#"<title>Plain</title><meta name="description" content="Plain description">"#,
            "https://site.com/",
        );
        let preview = social_preview(&result);
        assert!(!preview.available);
        assert_eq!(preview.title, "Plain");
        assert_eq!(preview.description, "Plain description");
        assert_eq!(preview.image, None);
        assert_eq!(preview.domain, "site.com");
    }

    #[test]
    fn test_twitter_preview_inherits_open_graph() {
        let html = r#"
            <title>Doc</title>
            <meta property="og:title" content="OG">
            <meta property="og:image" content="/og.png">
            <meta name="twitter:card" content="summary">
        "#;
        let preview = twitter_preview(&result_for(html, "https://site.com/x"));
        assert_eq!(preview.card.as_deref(), Some("summary"));
        assert_eq!(preview.title.as_deref(), Some("OG"));
        assert_eq!(preview.description, None);
        assert_eq!(preview.image.as_deref(), Some("https://site.com/og.png"));
    }
}
