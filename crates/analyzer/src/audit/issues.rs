// ABOUTME: Detects discrete metadata problems and reports them with a severity and documentation link.
// ABOUTME: Issues are emitted in a fixed order: title, description, canonical, Open Graph, Twitter.

use crate::model::{Issue, MetadataRecord, Severity};

pub const TITLE_DOCS: &str = "https://moz.com/learn/seo/title-tag";
pub const DESCRIPTION_DOCS: &str = "https://moz.com/learn/seo/meta-description";
pub const CANONICAL_DOCS: &str = "https://moz.com/learn/seo/canonicalization";
pub const OPEN_GRAPH_DOCS: &str = "https://ogp.me/";
pub const TWITTER_DOCS: &str =
    "https://developer.twitter.com/en/docs/twitter-for-websites/cards/overview/abouts-cards";

fn issue(severity: Severity, title: &str, description: String, docs: &str) -> Issue {
    Issue {
        severity,
        title: title.to_string(),
        description,
        fix_link: Some(docs.to_string()),
    }
}

fn title_issues(metadata: &MetadataRecord, out: &mut Vec<Issue>) {
    let title = &metadata.title;
    if !title.is_present() {
        out.push(issue(
            Severity::Error,
            "Missing title tag",
            "Your page is missing a title tag, which is critical for SEO and usability."
                .to_string(),
            TITLE_DOCS,
        ));
    } else if title.length < 30 {
        out.push(issue(
            Severity::Warning,
            "Title tag too short",
            format!(
                "Your title tag is only {} characters. For best SEO results, use between 30-60 characters.",
                title.length
            ),
            TITLE_DOCS,
        ));
    } else if title.length > 60 {
        out.push(issue(
            Severity::Info,
            "Title tag may be truncated in search results",
            format!(
                "Your title tag is {} characters, which may get truncated in some search results. Consider keeping it under 60 characters.",
                title.length
            ),
            TITLE_DOCS,
        ));
    }
}

fn description_issues(metadata: &MetadataRecord, out: &mut Vec<Issue>) {
    let description = &metadata.description;
    if !description.is_present() {
        out.push(issue(
            Severity::Error,
            "Missing meta description",
            "Your page is missing a meta description, which helps improve click-through rates from search results."
                .to_string(),
            DESCRIPTION_DOCS,
        ));
    } else if description.length < 120 {
        out.push(issue(
            Severity::Warning,
            "Meta description too short",
            format!(
                "Your meta description is only {} characters. For best results, use between 120-160 characters.",
                description.length
            ),
            DESCRIPTION_DOCS,
        ));
    } else if description.length > 160 {
        out.push(issue(
            Severity::Info,
            "Meta description may be truncated",
            format!(
                "Your meta description is {} characters, which may get truncated in search results. Consider keeping it under 160 characters.",
                description.length
            ),
            DESCRIPTION_DOCS,
        ));
    }
}

fn canonical_issues(metadata: &MetadataRecord, out: &mut Vec<Issue>) {
    if metadata.canonical.content.is_none() {
        out.push(issue(
            Severity::Warning,
            "Missing canonical tag",
            "Your page is missing a canonical tag, which helps prevent duplicate content issues."
                .to_string(),
            CANONICAL_DOCS,
        ));
    }
}

fn open_graph_issues(metadata: &MetadataRecord, out: &mut Vec<Issue>) {
    let og = &metadata.open_graph;
    if !og.has_any_core() {
        out.push(issue(
            Severity::Error,
            "Missing Open Graph meta tags",
            "Open Graph meta tags are missing from your page. These tags help optimize how your content appears when shared on social media platforms like Facebook."
                .to_string(),
            OPEN_GRAPH_DOCS,
        ));
        return;
    }

    let fields = [
        (og.title.is_none(), "og:title", "defines the title of your content when shared on social media"),
        (og.description.is_none(), "og:description", "defines the description of your content when shared on social media"),
        (og.image.is_none(), "og:image", "defines the image displayed when your content is shared on social media"),
    ];
    for (missing, property, purpose) in fields {
        if missing {
            out.push(issue(
                Severity::Warning,
                &format!("Missing {}", property),
                format!("The {} tag is missing. This tag {}.", property, purpose),
                OPEN_GRAPH_DOCS,
            ));
        }
    }
}

fn twitter_issues(metadata: &MetadataRecord, out: &mut Vec<Issue>) {
    let twitter = &metadata.twitter;
    if !twitter.has_any() {
        out.push(issue(
            Severity::Error,
            "Missing Twitter Card meta tags",
            "Twitter Card meta tags are missing from your page. These tags help optimize how your content appears when shared on Twitter."
                .to_string(),
            TWITTER_DOCS,
        ));
    } else if twitter.card.is_none() {
        out.push(issue(
            Severity::Warning,
            "Missing twitter:card",
            "The twitter:card tag is missing. This tag defines the type of card to be displayed when your content is shared on Twitter."
                .to_string(),
            TWITTER_DOCS,
        ));
    }
}

/// Lists the problems found in `metadata`, in category order.
pub fn detect_issues(metadata: &MetadataRecord) -> Vec<Issue> {
    let mut issues = Vec::new();
    title_issues(metadata, &mut issues);
    description_issues(metadata, &mut issues);
    canonical_issues(metadata, &mut issues);
    open_graph_issues(metadata, &mut issues);
    twitter_issues(metadata, &mut issues);
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CanonicalTag, OpenGraph, TextTag, TwitterCard};

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    fn titles(issues: &[Issue]) -> Vec<&str> {
        issues.iter().map(|i| i.title.as_str()).collect()
    }

    /// A record with every category present and in range.
    fn healthy() -> MetadataRecord {
        MetadataRecord {
            title: TextTag::new(Some("t".repeat(45))),
            description: TextTag::new(Some("d".repeat(140))),
            canonical: CanonicalTag {
                content: some("https://a.com/"),
                ..Default::default()
            },
            open_graph: OpenGraph {
                title: some("T"),
                description: some("D"),
                image: some("https://a.com/i.png"),
                ..Default::default()
            },
            twitter: TwitterCard {
                card: some("summary"),
                ..Default::default()
            },
            other: Vec::new(),
        }
    }

    #[test]
    fn healthy_record_has_no_issues() {
        assert!(detect_issues(&healthy()).is_empty());
    }

    #[test]
    fn missing_title_is_single_error() {
        let metadata = MetadataRecord {
            title: TextTag::new(None),
            ..healthy()
        };
        let issues = detect_issues(&metadata);
        let title_issues: Vec<_> = issues
            .iter()
            .filter(|i| i.title == "Missing title tag")
            .collect();
        assert_eq!(title_issues.len(), 1);
        assert_eq!(title_issues[0].severity, Severity::Error);
        assert_eq!(title_issues[0].fix_link.as_deref(), Some(TITLE_DOCS));
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn short_title_message_embeds_length() {
        let metadata = MetadataRecord {
            title: TextTag::new(Some("Short".to_string())),
            ..healthy()
        };
        let issues = detect_issues(&metadata);
        assert_eq!(issues[0].title, "Title tag too short");
        assert_eq!(issues[0].severity, Severity::Warning);
        assert!(issues[0].description.contains("only 5 characters"));
    }

    #[test]
    fn long_title_is_info() {
        let metadata = MetadataRecord {
            title: TextTag::new(Some("t".repeat(61))),
            ..healthy()
        };
        let issues = detect_issues(&metadata);
        assert_eq!(titles(&issues), vec!["Title tag may be truncated in search results"]);
        assert_eq!(issues[0].severity, Severity::Info);
        assert!(issues[0].description.contains("61 characters"));
    }

    #[test]
    fn description_checks() {
        let missing = MetadataRecord {
            description: TextTag::new(None),
            ..healthy()
        };
        assert_eq!(titles(&detect_issues(&missing)), vec!["Missing meta description"]);

        let short = MetadataRecord {
            description: TextTag::new(Some("d".repeat(100))),
            ..healthy()
        };
        let issues = detect_issues(&short);
        assert_eq!(titles(&issues), vec!["Meta description too short"]);
        assert!(issues[0].description.contains("only 100 characters"));

        let long = MetadataRecord {
            description: TextTag::new(Some("d".repeat(200))),
            ..healthy()
        };
        let issues = detect_issues(&long);
        assert_eq!(titles(&issues), vec!["Meta description may be truncated"]);
        assert_eq!(issues[0].severity, Severity::Info);
    }

    #[test]
    fn missing_canonical_is_warning() {
        let metadata = MetadataRecord {
            canonical: CanonicalTag::default(),
            ..healthy()
        };
        let issues = detect_issues(&metadata);
        assert_eq!(titles(&issues), vec!["Missing canonical tag"]);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].fix_link.as_deref(), Some(CANONICAL_DOCS));
    }

    #[test]
    fn open_graph_absent_is_single_error() {
        let metadata = MetadataRecord {
            open_graph: OpenGraph {
                url: some("https://a.com/"),
                ..Default::default()
            },
            ..healthy()
        };
        let issues = detect_issues(&metadata);
        assert_eq!(titles(&issues), vec!["Missing Open Graph meta tags"]);
        assert_eq!(issues[0].severity, Severity::Error);
    }

    #[test]
    fn open_graph_partial_flags_each_field() {
        let metadata = MetadataRecord {
            open_graph: OpenGraph {
                title: some("T"),
                ..Default::default()
            },
            ..healthy()
        };
        let issues = detect_issues(&metadata);
        assert_eq!(titles(&issues), vec!["Missing og:description", "Missing og:image"]);
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
        assert_eq!(
            issues[1].description,
            "The og:image tag is missing. This tag defines the image displayed when your content is shared on social media."
        );
    }

    #[test]
    fn twitter_absent_is_single_error() {
        let metadata = MetadataRecord {
            twitter: TwitterCard::default(),
            ..healthy()
        };
        let issues = detect_issues(&metadata);
        assert_eq!(titles(&issues), vec!["Missing Twitter Card meta tags"]);
        assert_eq!(issues[0].fix_link.as_deref(), Some(TWITTER_DOCS));
    }

    #[test]
    fn twitter_only_card_is_flagged() {
        let metadata = MetadataRecord {
            twitter: TwitterCard {
                title: some("T"),
                description: some("D"),
                ..Default::default()
            },
            ..healthy()
        };
        assert_eq!(titles(&detect_issues(&metadata)), vec!["Missing twitter:card"]);
    }

    #[test]
    fn issue_order_is_fixed() {
        let issues = detect_issues(&MetadataRecord::default());
        assert_eq!(
            titles(&issues),
            vec![
                "Missing title tag",
                "Missing meta description",
                "Missing canonical tag",
                "Missing Open Graph meta tags",
                "Missing Twitter Card meta tags",
            ]
        );
    }
}
