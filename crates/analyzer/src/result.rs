// ABOUTME: AnalysisResult, the external-facing record combining metadata, scores, issues and recommendations.
// ABOUTME: Includes markdown and plain-text report rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::Analysis;
use crate::model::{
    CategoryScores, Issue, MetadataRecord, OverallScore, Recommendation, ScoreCategory,
};
use crate::preview::{search_preview, social_preview, twitter_preview};

/// One completed analysis of a URL.
///
/// The commonly used tag values are flattened to the top level; the full
/// extracted record is kept under `meta_tags`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub canonical: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub og_url: Option<String>,
    pub og_type: Option<String>,
    pub og_site_name: Option<String>,
    pub twitter_card: Option<String>,
    pub twitter_title: Option<String>,
    pub twitter_description: Option<String>,
    pub twitter_image: Option<String>,
    pub meta_tags: MetadataRecord,
    pub score_title: ScoreCategory,
    pub score_description: ScoreCategory,
    pub score_open_graph: ScoreCategory,
    pub score_twitter: ScoreCategory,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<Recommendation>,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn new(url: impl Into<String>, analysis: Analysis, analyzed_at: DateTime<Utc>) -> Self {
        let Analysis {
            metadata,
            scores,
            issues,
            recommendations,
        } = analysis;
        let og = metadata.open_graph.clone();
        let twitter = metadata.twitter.clone();

        Self {
            url: url.into(),
            title: metadata.title.content.clone(),
            description: metadata.description.content.clone(),
            canonical: metadata.canonical.content.clone(),
            og_title: og.title,
            og_description: og.description,
            og_image: og.image,
            og_url: og.url,
            og_type: og.kind,
            og_site_name: og.site_name,
            twitter_card: twitter.card,
            twitter_title: twitter.title,
            twitter_description: twitter.description,
            twitter_image: twitter.image,
            meta_tags: metadata,
            score_title: scores.title,
            score_description: scores.description,
            score_open_graph: scores.open_graph,
            score_twitter: scores.twitter,
            issues,
            recommendations,
            analyzed_at,
        }
    }

    pub fn scores(&self) -> CategoryScores {
        CategoryScores {
            title: self.score_title,
            description: self.score_description,
            open_graph: self.score_open_graph,
            twitter: self.score_twitter,
        }
    }

    pub fn overall(&self) -> OverallScore {
        self.scores().overall()
    }

    fn score_rows(&self) -> [(&'static str, ScoreCategory); 4] {
        [
            ("Title", self.score_title),
            ("Description", self.score_description),
            ("Open Graph", self.score_open_graph),
            ("Twitter", self.score_twitter),
        ]
    }

    /// Format the analysis as a markdown report.
    pub fn format_markdown(&self) -> String {
        let mut parts = Vec::new();

        parts.push(format!("# SEO Analysis: {}", self.url));
        parts.push(format!(
            "Analyzed {}",
            self.analyzed_at.format("%Y-%m-%d %H:%M UTC")
        ));

        let overall = self.overall();
        let mut scores = vec![
            "## Scores".to_string(),
            String::new(),
            "| Category | Score |".to_string(),
            "| --- | --- |".to_string(),
        ];
        for (name, category) in self.score_rows() {
            scores.push(format!("| {} | {} |", name, category.label()));
        }
        scores.push(format!(
            "| **Overall** | **{}** ({}) |",
            overall.category.label(),
            overall.value
        ));
        parts.push(scores.join("\n"));

        let search = search_preview(self);
        parts.push(format!(
            "## Search Preview\n\n**{}**  \n{}  \n{}",
            search.title, search.display_url, search.description
        ));

        let social = social_preview(self);
        if social.available {
            let mut block = format!(
                "## Social Preview\n\n{}  \n**{}**  \n{}",
                social.domain, social.title, social.description
            );
            if let Some(ref img) = social.image {
                block.push_str(&format!("\n\n![Share image]({})", img));
            }
            parts.push(block);
        }

        let other = &self.meta_tags.other;
        if !other.is_empty() {
            let mut block = vec![
                "## Other Meta Tags".to_string(),
                String::new(),
                "| Name | Content |".to_string(),
                "| --- | --- |".to_string(),
            ];
            for tag in other {
                block.push(format!(
                    "| {} | {} |",
                    escape_cell(&tag.name),
                    escape_cell(&tag.content)
                ));
            }
            parts.push(block.join("\n"));
        }

        if self.issues.is_empty() {
            parts.push("## Issues\n\nNo issues found.".to_string());
        } else {
            let mut block = vec![format!("## Issues ({})", self.issues.len()), String::new()];
            for issue in &self.issues {
                let mut line = format!(
                    "- **{}** [{}]: {}",
                    issue.title, issue.severity, issue.description
                );
                if let Some(ref link) = issue.fix_link {
                    line.push_str(&format!(" ([learn more]({}))", link));
                }
                block.push(line);
            }
            parts.push(block.join("\n"));
        }

        if !self.recommendations.is_empty() {
            let mut block = vec!["## Recommendations".to_string()];
            for rec in &self.recommendations {
                block.push(format!(
                    "### {} ({} priority)\n\n{}",
                    rec.title, rec.priority, rec.description
                ));
                if let Some(ref code) = rec.code {
                    block.push(format!("```html\n{}\n```", code.trim_end()));
                }
            }
            parts.push(block.join("\n\n"));
        }

        parts.join("\n\n")
    }

    /// Format the analysis as a plain-text report.
    pub fn format_text(&self) -> String {
        let mut lines = vec![
            format!("SEO analysis for {}", self.url),
            format!("Analyzed: {}", self.analyzed_at.to_rfc3339()),
            String::new(),
        ];

        for (name, category) in self.score_rows() {
            lines.push(format!("{:<12} {}", format!("{}:", name), category.label()));
        }
        let overall = self.overall();
        lines.push(format!(
            "{:<12} {} ({})",
            "Overall:",
            overall.category.label(),
            overall.value
        ));

        let search = search_preview(self);
        lines.push(String::new());
        lines.push("Search preview:".to_string());
        lines.push(format!("  {}", search.title));
        lines.push(format!("  {}", search.display_url));
        lines.push(format!("  {}", search.description));

        let twitter = twitter_preview(self);
        if let Some(ref card) = twitter.card {
            lines.push(String::new());
            lines.push(format!("Twitter card: {}", card));
        }

        let other = &self.meta_tags.other;
        if !other.is_empty() {
            lines.push(String::new());
            lines.push(format!("Other meta tags ({}):", other.len()));
            for tag in other {
                lines.push(format!("  {}: {}", tag.name, tag.content));
            }
        }

        lines.push(String::new());
        lines.push(format!("Issues ({}):", self.issues.len()));
        for issue in &self.issues {
            lines.push(format!("  [{}] {}", issue.severity, issue.title));
            lines.push(format!("      {}", issue.description));
        }

        lines.push(String::new());
        lines.push(format!("Recommendations ({}):", self.recommendations.len()));
        for rec in &self.recommendations {
            lines.push(format!("  [{}] {}", rec.priority, rec.title));
            lines.push(format!("      {}", rec.description));
        }

        lines.join("\n")
    }

    /// Returns true if at least one error-severity issue was found.
    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.severity == crate::model::Severity::Error)
    }
}

// Pipes would split a markdown table cell
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}
