//! Match data provider abstraction layer.

mod file;

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use matchlens_types::{
    details::MatchDetails, timeline::MatchTimeline, DocumentKind, ProviderError,
};
use tracing::info;

pub use file::FileProvider;

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Read-only source of the two match documents.
#[async_trait]
pub trait MatchDataProvider: Send + Sync {
    async fn fetch_match_details(&self, match_id: &str) -> ProviderResult<MatchDetails>;
    async fn fetch_match_timeline(&self, match_id: &str) -> ProviderResult<MatchTimeline>;
}

#[async_trait]
impl<P: MatchDataProvider + ?Sized> MatchDataProvider for Arc<P> {
    async fn fetch_match_details(&self, match_id: &str) -> ProviderResult<MatchDetails> {
        (**self).fetch_match_details(match_id).await
    }

    async fn fetch_match_timeline(&self, match_id: &str) -> ProviderResult<MatchTimeline> {
        (**self).fetch_match_timeline(match_id).await
    }
}

/// Aggregated fetch counters.
#[derive(Debug, Default, Clone)]
pub struct ProviderMetrics {
    pub details_fetches: u64,
    pub timeline_fetches: u64,
    pub failed_fetches: u64,
}

/// Provider serving documents registered up front.
#[derive(Default)]
pub struct InMemoryProvider {
    details: HashMap<String, MatchDetails>,
    timelines: HashMap<String, MatchTimeline>,
    metrics: Arc<Mutex<ProviderMetrics>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_match(
        mut self,
        match_id: impl Into<String>,
        details: MatchDetails,
        timeline: MatchTimeline,
    ) -> Self {
        let match_id = match_id.into();
        self.details.insert(match_id.clone(), details);
        self.timelines.insert(match_id, timeline);
        self
    }

    pub fn insert_details(&mut self, match_id: impl Into<String>, details: MatchDetails) {
        self.details.insert(match_id.into(), details);
    }

    pub fn insert_timeline(&mut self, match_id: impl Into<String>, timeline: MatchTimeline) {
        self.timelines.insert(match_id.into(), timeline);
    }

    pub fn metrics(&self) -> ProviderMetrics {
        self.metrics.lock().map(|m| m.clone()).unwrap_or_default()
    }

    fn record(&self, document: DocumentKind, found: bool) {
        if let Ok(mut guard) = self.metrics.lock() {
            match document {
                DocumentKind::MatchDetails => guard.details_fetches += 1,
                DocumentKind::MatchTimeline => guard.timeline_fetches += 1,
            }
            if !found {
                guard.failed_fetches += 1;
            }
        }
    }
}

#[async_trait]
impl MatchDataProvider for InMemoryProvider {
    async fn fetch_match_details(&self, match_id: &str) -> ProviderResult<MatchDetails> {
        info!("Serving match details for {match_id} from memory");
        let found = self.details.get(match_id).cloned();
        self.record(DocumentKind::MatchDetails, found.is_some());
        found.ok_or_else(|| not_found(match_id, DocumentKind::MatchDetails))
    }

    async fn fetch_match_timeline(&self, match_id: &str) -> ProviderResult<MatchTimeline> {
        info!("Serving match timeline for {match_id} from memory");
        let found = self.timelines.get(match_id).cloned();
        self.record(DocumentKind::MatchTimeline, found.is_some());
        found.ok_or_else(|| not_found(match_id, DocumentKind::MatchTimeline))
    }
}

/// Generate a not-found error for one document of a match.
pub fn not_found(match_id: &str, document: DocumentKind) -> ProviderError {
    ProviderError::NotFound {
        match_id: match_id.to_string(),
        document,
    }
}
