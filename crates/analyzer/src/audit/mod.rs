// ABOUTME: The pure analysis core: extract, score, detect issues and recommend for one HTML page.
// ABOUTME: Synchronous and deterministic; no I/O, no shared state.

//! Metadata audit.
//!
//! [`analyze`] runs the whole pipeline over an already-fetched page:
//!
//! ```
//! use metalens_analyzer::audit::analyze;
//! use metalens_analyzer::ScoreCategory;
//!
//! let analysis = analyze(
//!     "<title>Understanding Open Graph tags for sharing</title>",
//!     "https://example.com/post",
//! );
//! assert_eq!(analysis.scores.title, ScoreCategory::Excellent);
//! assert_eq!(analysis.issues[0].title, "Missing meta description");
//! ```

pub mod issues;
pub mod recommendations;
pub mod scoring;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extractors::extract;
use crate::model::{CategoryScores, Issue, MetadataRecord, Recommendation};

pub use issues::detect_issues;
pub use recommendations::recommend;
pub use scoring::score;

/// Output of the analysis core for a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Extracted metadata with every category score populated.
    pub metadata: MetadataRecord,
    pub scores: CategoryScores,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<Recommendation>,
}

/// Analyzes `html` as the page at `page_url`.
pub fn analyze(html: &str, page_url: &str) -> Analysis {
    let extracted = extract(html, page_url);
    let (metadata, scores) = score(&extracted);
    let issues = detect_issues(&metadata);
    let recommendations = recommend(&metadata);

    debug!(
        page_url,
        issues = issues.len(),
        recommendations = recommendations.len(),
        other_tags = metadata.other.len(),
        "analyzed page metadata"
    );

    Analysis {
        metadata,
        scores,
        issues,
        recommendations,
    }
}
