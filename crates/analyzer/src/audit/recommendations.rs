// ABOUTME: Generates prioritized, actionable recommendations with example markup from scored metadata.
// ABOUTME: High-priority suggestions come first, then medium, each block in detection order.

use crate::model::{MetadataRecord, Priority, Recommendation, ScoreCategory};

const TWITTER_EXAMPLE: &str = r#"<meta name="twitter:card" content="summary_large_image">
<meta name="twitter:title" content="Your Title Here">
<meta name="twitter:description" content="Your description here">
<meta name="twitter:image" content="https://example.com/image.jpg">"#;

const OPEN_GRAPH_EXAMPLE: &str = r#"<meta property="og:title" content="Your Title Here">
<meta property="og:description" content="Your description here">
<meta property="og:image" content="https://example.com/image.jpg">
<meta property="og:url" content="https://example.com/page">
<meta property="og:type" content="website">
<meta property="og:site_name" content="Your Site Name">"#;

const DESCRIPTION_EXAMPLE: &str = r#"<meta name="description" content="Your description here - make it compelling and relevant to the page content.">"#;

const CANONICAL_EXAMPLE: &str = r#"<link rel="canonical" href="https://example.com/your-page">"#;

const STRUCTURED_DATA_EXAMPLE: &str = r#"<script type="application/ld+json">
{
  "@context": "https://schema.org",
  "@type": "WebPage",
  "name": "Page Title",
  "description": "Page description",
  "url": "https://example.com/page"
}
</script>"#;

/// Example markup for each Open Graph property checked when completing a card.
const OPEN_GRAPH_PROPERTY_EXAMPLES: [(&str, &str); 5] = [
    ("og:title", r#"<meta property="og:title" content="Your Title Here">"#),
    ("og:description", r#"<meta property="og:description" content="Your description here">"#),
    ("og:image", r#"<meta property="og:image" content="https://example.com/image.jpg">"#),
    ("og:url", r#"<meta property="og:url" content="https://example.com/page">"#),
    ("og:type", r#"<meta property="og:type" content="website">"#),
];

fn recommendation(
    priority: Priority,
    title: &str,
    description: String,
    code: Option<String>,
) -> Recommendation {
    Recommendation {
        priority,
        title: title.to_string(),
        description,
        code,
    }
}

/// Builds the "complete your card" suggestion from the absent properties,
/// or `None` if nothing is missing.
fn complete_open_graph(metadata: &MetadataRecord) -> Option<Recommendation> {
    let og = &metadata.open_graph;
    let present = [
        og.title.is_some(),
        og.description.is_some(),
        og.image.is_some(),
        og.url.is_some(),
        og.kind.is_some(),
    ];

    let missing: Vec<(&str, &str)> = OPEN_GRAPH_PROPERTY_EXAMPLES
        .iter()
        .zip(present)
        .filter(|(_, is_present)| !is_present)
        .map(|(example, _)| *example)
        .collect();
    if missing.is_empty() {
        return None;
    }

    let names: Vec<&str> = missing.iter().map(|(name, _)| *name).collect();
    let mut code = String::from("<!-- Add these missing Open Graph tags -->\n");
    for (_, markup) in &missing {
        code.push_str(markup);
        code.push('\n');
    }

    Some(recommendation(
        Priority::High,
        "Complete Open Graph Implementation",
        format!(
            "Add missing Open Graph properties ({}) to improve how your content appears on social media.",
            names.join(", ")
        ),
        Some(code),
    ))
}

fn high_priority(metadata: &MetadataRecord) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if metadata.twitter.score == ScoreCategory::Missing {
        out.push(recommendation(
            Priority::High,
            "Add Twitter Card Meta Tags",
            "Implement Twitter Card meta tags to control how your content appears when shared on Twitter."
                .to_string(),
            Some(TWITTER_EXAMPLE.to_string()),
        ));
    }

    match metadata.open_graph.score {
        ScoreCategory::Missing => out.push(recommendation(
            Priority::High,
            "Add Open Graph Meta Tags",
            "Implement Open Graph meta tags to control how your content appears when shared on social media platforms like Facebook."
                .to_string(),
            Some(OPEN_GRAPH_EXAMPLE.to_string()),
        )),
        ScoreCategory::NeedsWork => out.extend(complete_open_graph(metadata)),
        _ => {}
    }

    if metadata.description.score == ScoreCategory::Missing {
        out.push(recommendation(
            Priority::High,
            "Add Meta Description",
            "Add a meta description tag to improve click-through rates from search results. Keep it between 120-160 characters."
                .to_string(),
            Some(DESCRIPTION_EXAMPLE.to_string()),
        ));
    }

    out
}

fn medium_priority(metadata: &MetadataRecord) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if metadata.canonical.content.is_none() {
        out.push(recommendation(
            Priority::Medium,
            "Add Canonical Tag",
            "Add a canonical tag to prevent duplicate content issues and consolidate link signals."
                .to_string(),
            Some(CANONICAL_EXAMPLE.to_string()),
        ));
    }

    out.push(recommendation(
        Priority::Medium,
        "Add Structured Data",
        "Implement JSON-LD structured data to provide more context about your page content to search engines."
            .to_string(),
        Some(STRUCTURED_DATA_EXAMPLE.to_string()),
    ));

    if metadata.open_graph.image.is_some() || metadata.twitter.image.is_some() {
        out.push(recommendation(
            Priority::Medium,
            "Optimize Open Graph Image",
            "Resize your Open Graph image to 1200x630 pixels for optimal display across social platforms."
                .to_string(),
            None,
        ));
    }

    out
}

/// Suggests improvements for a scored record: every high-priority item, then
/// every medium-priority item.
pub fn recommend(metadata: &MetadataRecord) -> Vec<Recommendation> {
    let mut recommendations = high_priority(metadata);
    recommendations.extend(medium_priority(metadata));
    recommendations
}
