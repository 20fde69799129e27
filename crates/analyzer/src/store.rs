// ABOUTME: Persistence seam for completed analyses plus an in-memory implementation.
// ABOUTME: Stores hand out monotonically increasing ids and list newest analyses first.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::AnalyzeError;
use crate::result::AnalysisResult;

/// Number of analyses returned by `list_recent` when no limit is given.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// An analysis as held by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAnalysis {
    pub id: u64,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Most recent analysis recorded for exactly `url`.
    async fn get_by_url(&self, url: &str) -> Result<Option<StoredAnalysis>, AnalyzeError>;

    /// Records `result` and returns it with its assigned id.
    async fn insert(&self, result: AnalysisResult) -> Result<StoredAnalysis, AnalyzeError>;

    /// Up to `limit` analyses, newest `analyzed_at` first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<StoredAnalysis>, AnalyzeError>;
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    rows: Vec<StoredAnalysis>,
}

/// Process-local store; contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AnalysisStore for MemoryStore {
    async fn get_by_url(&self, url: &str) -> Result<Option<StoredAnalysis>, AnalyzeError> {
        let inner = self.inner.read().await;
        // Ties on analyzed_at go to the later insert
        let latest = inner
            .rows
            .iter()
            .filter(|row| row.result.url == url)
            .max_by(|a, b| {
                a.result
                    .analyzed_at
                    .cmp(&b.result.analyzed_at)
                    .then(a.id.cmp(&b.id))
            });
        Ok(latest.cloned())
    }

    async fn insert(&self, result: AnalysisResult) -> Result<StoredAnalysis, AnalyzeError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let stored = StoredAnalysis {
            id: inner.next_id,
            result,
        };
        inner.rows.push(stored.clone());
        Ok(stored)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<StoredAnalysis>, AnalyzeError> {
        let inner = self.inner.read().await;
        let mut rows: Vec<StoredAnalysis> = inner.rows.clone();
        rows.sort_by(|a, b| {
            b.result
                .analyzed_at
                .cmp(&a.result.analyzed_at)
                .then(b.id.cmp(&a.id))
        });
        rows.truncate(limit);
        Ok(rows)
    }
}
