// ABOUTME: Builds a MetadataRecord (title, description, canonical, Open Graph, Twitter, other tags) from HTML.
// ABOUTME: Applies the field fallback chains and resolves every image against the page URL.

use crate::dom::{element_attr, Page};
use crate::extractors::fields::{
    first_of, CANONICAL_CHAIN, DESCRIPTION_CHAIN, PAGE_IMAGE_CHAIN, TITLE_CHAIN,
    TWITTER_IMAGE_CHAIN,
};
use crate::model::{CanonicalTag, MetaTag, MetadataRecord, OpenGraph, TextTag, TwitterCard};
use crate::resolve::resolve;

/// Title used when neither `<title>` nor `<h1>` yields text.
pub const NO_TITLE: &str = "No title found";

/// Extracts SEO metadata from `html`, resolving image URLs against `page_url`.
///
/// Never fails: every field independently falls back to absent. All `score`
/// fields are left at `missing`; see [`crate::audit::score`].
pub fn extract(html: &str, page_url: &str) -> MetadataRecord {
    let page = Page::parse(html);
    let resolve_image = |raw: Option<String>| resolve(page_url, raw.as_deref());

    let title = first_of(&page, TITLE_CHAIN).unwrap_or_else(|| NO_TITLE.to_string());
    let description = first_of(&page, DESCRIPTION_CHAIN);
    let canonical = first_of(&page, CANONICAL_CHAIN);

    let mut open_graph = OpenGraph {
        title: page.meta_by_property("og:title"),
        description: page.meta_by_property("og:description"),
        image: resolve_image(page.meta_by_property("og:image")),
        url: page.meta_by_property("og:url"),
        kind: page.meta_by_property("og:type"),
        site_name: page.meta_by_property("og:site_name"),
        ..Default::default()
    };

    let mut twitter = TwitterCard {
        card: page.meta_by_name("twitter:card"),
        title: page.meta_by_name("twitter:title"),
        description: page.meta_by_name("twitter:description"),
        image: resolve_image(first_of(&page, TWITTER_IMAGE_CHAIN)),
        ..Default::default()
    };

    let page_image = resolve_image(first_of(&page, PAGE_IMAGE_CHAIN));
    if open_graph.image.is_none() {
        open_graph.image = page_image.clone();
    }
    if twitter.image.is_none() {
        twitter.image = open_graph.image.clone().or(page_image);
    }

    MetadataRecord {
        title: TextTag::new(Some(title)),
        description: TextTag::new(description),
        canonical: CanonicalTag {
            content: canonical,
            ..Default::default()
        },
        open_graph,
        twitter,
        other: other_meta_tags(&page),
    }
}

/// True for names that have a dedicated field or carry no SEO signal.
fn is_captured_elsewhere(name: &str) -> bool {
    name.starts_with("og:")
        || name.starts_with("twitter:")
        || name == "description"
        || name == "viewport"
}

/// Collects remaining `<meta>` tags in document order without deduplication.
fn other_meta_tags(page: &Page) -> Vec<MetaTag> {
    page.select("meta")
        .iter()
        .filter_map(|el| {
            let name = element_attr(el, "name").or_else(|| element_attr(el, "property"))?;
            let content = element_attr(el, "content")?;
            if is_captured_elsewhere(&name) {
                return None;
            }
            Some(MetaTag { name, content })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScoreCategory;
    use pretty_assertions::assert_eq;

    const PAGE_URL: &str = "https://site.com/blog/post";

    #[test]
    fn test_extract_full_head() {
        let html = r#"
            <!DOCTYPE html>
            <html>
            <head>
                <title>A Complete Guide to Metadata</title>
                <meta name="description" content="Everything about meta tags.">
                <link rel="canonical" href="https://site.com/blog/post">
                <meta property="og:title" content="OG Title">
                <meta property="og:description" content="OG Description">
                <meta property="og:image" content="/img/og.jpg">
                <meta property="og:url" content="https://site.com/blog/post">
                <meta property="og:type" content="article">
                <meta property="og:site_name" content="Site">
                <meta name="twitter:card" content="summary_large_image">
                <meta name="twitter:title" content="TW Title">
                <meta name="twitter:description" content="TW Description">
                <meta name="twitter:image" content="tw.jpg">
            </head>
            <body></body>
            </html>
        "#;

        let meta = extract(html, PAGE_URL);

        assert_eq!(meta.title.content.as_deref(), Some("A Complete Guide to Metadata"));
        assert_eq!(meta.title.length, 28);
        assert_eq!(meta.description.content.as_deref(), Some("Everything about meta tags."));
        assert_eq!(meta.canonical.content.as_deref(), Some("https://site.com/blog/post"));
        assert_eq!(
            meta.open_graph,
            OpenGraph {
                title: Some("OG Title".to_string()),
                description: Some("OG Description".to_string()),
                image: Some("https://site.com/img/og.jpg".to_string()),
                url: Some("https://site.com/blog/post".to_string()),
                kind: Some("article".to_string()),
                site_name: Some("Site".to_string()),
                score: ScoreCategory::Missing,
            }
        );
        assert_eq!(
            meta.twitter,
            TwitterCard {
                card: Some("summary_large_image".to_string()),
                title: Some("TW Title".to_string()),
                description: Some("TW Description".to_string()),
                image: Some("https://site.com/blog/tw.jpg".to_string()),
                score: ScoreCategory::Missing,
            }
        );
        assert!(meta.other.is_empty());
    }

    #[test]
    fn test_scores_start_missing() {
        let meta = extract("<title>Whatever</title>", PAGE_URL);
        assert_eq!(meta.title.score, ScoreCategory::Missing);
        assert_eq!(meta.description.score, ScoreCategory::Missing);
        assert_eq!(meta.canonical.score, ScoreCategory::Missing);
        assert_eq!(meta.open_graph.score, ScoreCategory::Missing);
        assert_eq!(meta.twitter.score, ScoreCategory::Missing);
    }

    #[test]
    fn test_empty_document_defaults() {
        let meta = extract("", PAGE_URL);
        assert_eq!(meta.title.content.as_deref(), Some(NO_TITLE));
        assert_eq!(meta.title.length, NO_TITLE.len());
        assert_eq!(meta.description, TextTag::new(None));
        assert_eq!(meta.canonical.content, None);
        assert_eq!(meta.open_graph, OpenGraph::default());
        assert_eq!(meta.twitter, TwitterCard::default());
        assert!(meta.other.is_empty());
    }

    #[test]
    fn test_og_image_falls_back_to_page_image() {
        let html = r#"<body><article><img src="/img/lead.jpg"></article></body>"#;
        let meta = extract(html, PAGE_URL);
        assert_eq!(
            meta.open_graph.image.as_deref(),
            Some("https://site.com/img/lead.jpg")
        );
        assert_eq!(
            meta.twitter.image.as_deref(),
            Some("https://site.com/img/lead.jpg")
        );
    }

    #[test]
    fn test_og_image_url_only_fills_og_image() {
        let html = r#"<meta property="og:image:url" content="https://cdn.site.com/og.png">"#;
        let meta = extract(html, PAGE_URL);
        assert_eq!(meta.open_graph.image.as_deref(), Some("https://cdn.site.com/og.png"));
    }

    #[test]
    fn test_og_image_borrows_twitter_image() {
        let html = r#"<meta name="twitter:image" content="/tw.png">"#;
        let meta = extract(html, PAGE_URL);
        assert_eq!(meta.open_graph.image.as_deref(), Some("https://site.com/tw.png"));
        assert_eq!(meta.twitter.image.as_deref(), Some("https://site.com/tw.png"));
    }

    #[test]
    fn test_twitter_image_inherits_og_image() {
        let html = r#"<meta property="og:image" content="og.png"><img src="/other.png">"#;
        let meta = extract(html, PAGE_URL);
        assert_eq!(meta.twitter.image.as_deref(), Some("https://site.com/blog/og.png"));
    }

    #[test]
    fn test_own_twitter_image_is_kept() {
        let html = r#"
            <meta property="og:image" content="/og.png">
            <meta name="twitter:image:src" content="/tw.png">
        "#;
        let meta = extract(html, PAGE_URL);
        assert_eq!(meta.open_graph.image.as_deref(), Some("https://site.com/og.png"));
        assert_eq!(meta.twitter.image.as_deref(), Some("https://site.com/tw.png"));
    }

    #[test]
    fn test_og_fields_do_not_cross_fill() {
        let html = r#"
            <title>Page Title</title>
            <meta name="description" content="Plain description">
        "#;
        let meta = extract(html, PAGE_URL);
        assert_eq!(meta.open_graph.title, None);
        assert_eq!(meta.open_graph.description, None);
        assert_eq!(meta.twitter.title, None);
    }

    #[test]
    fn test_twitter_fields_read_by_name_only() {
        let html = r#"<meta property="twitter:card" content="summary">"#;
        let meta = extract(html, PAGE_URL);
        assert_eq!(meta.twitter.card, None);
    }

    #[test]
    fn test_other_tags_order_duplicates_and_exclusions() {
        let html = r##"
            <head>
                <meta charset="utf-8">
                <meta name="viewport" content="width=device-width">
                <meta name="robots" content="index,follow">
                <meta name="description" content="desc">
                <meta property="og:title" content="og">
                <meta name="twitter:card" content="summary">
                <meta property="article:author" content="Jane">
                <meta name="robots" content="noarchive">
                <meta name="generator">
                <meta name="theme-color" content="#fff">
            </head>
        "##;
        let meta = extract(html, PAGE_URL);
        let pairs: Vec<(&str, &str)> = meta
            .other
            .iter()
            .map(|t| (t.name.as_str(), t.content.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("robots", "index,follow"),
                ("article:author", "Jane"),
                ("robots", "noarchive"),
                ("theme-color", "#fff"),
            ]
        );
    }

    #[test]
    fn test_malformed_base_keeps_relative_images() {
        let html = r#"<meta property="og:image" content="/img/a.jpg">"#;
        let meta = extract(html, "not a url");
        assert_eq!(meta.open_graph.image.as_deref(), Some("/img/a.jpg"));
    }

    #[test]
    fn test_length_matches_content_chars() {
        let html = r#"<title>Café – ünïcödé</title><meta name="description" content="naïve">"#;
        let meta = extract(html, PAGE_URL);
        assert_eq!(meta.title.length, meta.title.content.as_ref().unwrap().chars().count());
        assert_eq!(meta.description.length, 5);
    }
}
