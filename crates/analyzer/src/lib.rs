// ABOUTME: Main library entry point for the metalens SEO metadata analyzer.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, analyze, AnalysisResult, stores and model types.

//! Metalens - extracts and audits the SEO metadata of a web page.
//!
//! The [`audit::analyze`] function is a pure, synchronous core that turns
//! HTML plus its URL into scores, issues and recommendations. [`Client`]
//! wraps it with fetching and a store of past analyses.
//!
//! # Example
//!
//! ```no_run
//! use metalens_analyzer::{AnalyzeError, Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AnalyzeError> {
//!     let client = Client::builder().build();
//!     let stored = client.analyze("https://example.com/").await?;
//!     println!("{}", stored.result.format_markdown());
//!     Ok(())
//! }
//! ```

pub mod audit;
pub mod client;
pub mod dom;
pub mod error;
pub mod extractors;
pub mod model;
pub mod options;
pub mod preview;
pub mod resolve;
pub mod resource;
pub mod result;
pub mod store;

pub use crate::audit::{analyze, Analysis};
pub use crate::client::Client;
pub use crate::error::{AnalyzeError, ErrorCode};
pub use crate::extractors::extract;
pub use crate::model::{
    CanonicalTag, CategoryScores, Issue, MetaTag, MetadataRecord, OpenGraph, OverallScore,
    Priority, Recommendation, ScoreCategory, Severity, TextTag, TwitterCard,
};
pub use crate::options::{ClientBuilder, Options, OutputFormat};
pub use crate::resolve::resolve;
pub use crate::result::AnalysisResult;
pub use crate::store::{AnalysisStore, MemoryStore, StoredAnalysis, DEFAULT_RECENT_LIMIT};
