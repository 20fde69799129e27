// ABOUTME: Data model for a page's SEO metadata, category scores, issues and recommendations.
// ABOUTME: Every optional tag is an explicit Option so "absent" never hides behind an empty string.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Quality bucket assigned to a metadata category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreCategory {
    Excellent,
    Good,
    NeedsWork,
    #[default]
    Missing,
}

impl ScoreCategory {
    /// Numeric weight used only for the aggregate score.
    pub fn numeric(self) -> u32 {
        match self {
            ScoreCategory::Excellent => 100,
            ScoreCategory::Good => 75,
            ScoreCategory::NeedsWork => 40,
            ScoreCategory::Missing => 10,
        }
    }

    /// Buckets an aggregate value back into a category.
    pub fn from_numeric(value: u32) -> Self {
        if value >= 90 {
            ScoreCategory::Excellent
        } else if value >= 70 {
            ScoreCategory::Good
        } else if value >= 30 {
            ScoreCategory::NeedsWork
        } else {
            ScoreCategory::Missing
        }
    }

    /// Wire form, e.g. `needs-work`.
    pub fn as_str(self) -> &'static str {
        match self {
            ScoreCategory::Excellent => "excellent",
            ScoreCategory::Good => "good",
            ScoreCategory::NeedsWork => "needs-work",
            ScoreCategory::Missing => "missing",
        }
    }

    /// Human-readable form, e.g. `Needs Work`.
    pub fn label(self) -> &'static str {
        match self {
            ScoreCategory::Excellent => "Excellent",
            ScoreCategory::Good => "Good",
            ScoreCategory::NeedsWork => "Needs Work",
            ScoreCategory::Missing => "Missing",
        }
    }
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A text tag whose length matters for search display (title, description).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextTag {
    pub content: Option<String>,
    /// Character count of `content`, 0 when absent.
    pub length: usize,
    pub score: ScoreCategory,
}

impl TextTag {
    pub fn new(content: Option<String>) -> Self {
        let length = content.as_deref().map_or(0, |c| c.chars().count());
        Self {
            content,
            length,
            score: ScoreCategory::Missing,
        }
    }

    pub fn is_present(&self) -> bool {
        self.content.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CanonicalTag {
    pub content: Option<String>,
    pub score: ScoreCategory,
}

/// Open Graph (`og:*`) properties.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Absolute URL after resolution and image fallback.
    pub image: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub site_name: Option<String>,
    pub score: ScoreCategory,
}

impl OpenGraph {
    /// True if any of the fields that make up a share card is present.
    pub fn has_any_core(&self) -> bool {
        self.title.is_some() || self.description.is_some() || self.image.is_some()
    }
}

/// Twitter Card (`twitter:*`) properties.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TwitterCard {
    pub card: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Absolute URL after resolution and image fallback.
    pub image: Option<String>,
    pub score: ScoreCategory,
}

impl TwitterCard {
    pub fn has_any(&self) -> bool {
        self.card.is_some()
            || self.title.is_some()
            || self.description.is_some()
            || self.image.is_some()
    }
}

/// A `<meta>` tag not covered by the dedicated fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTag {
    pub name: String,
    pub content: String,
}

/// Everything extracted from a page's markup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    pub title: TextTag,
    pub description: TextTag,
    pub canonical: CanonicalTag,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    /// Remaining meta tags in document order, duplicates kept.
    pub other: Vec<MetaTag>,
}

/// The four independently scored categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub title: ScoreCategory,
    pub description: ScoreCategory,
    pub open_graph: ScoreCategory,
    pub twitter: ScoreCategory,
}

/// Aggregate of the four category scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallScore {
    /// Rounded mean of the numeric category weights (10..=100).
    pub value: u32,
    pub category: ScoreCategory,
}

impl CategoryScores {
    pub fn overall(&self) -> OverallScore {
        let sum = self.title.numeric()
            + self.description.numeric()
            + self.open_graph.numeric()
            + self.twitter.numeric();
        // Round half up
        let value = (sum * 2 + 4) / 8;
        OverallScore {
            value,
            category: ScoreCategory::from_numeric(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        write!(f, "{}", s)
    }
}

/// A discrete problem found on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub severity: Severity,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix_link: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    /// Reserved; no current rule emits it.
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        write!(f, "{}", s)
    }
}

/// An actionable suggestion, optionally with example markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
