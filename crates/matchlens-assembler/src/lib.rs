//! Builds player summaries from a match data provider.

use std::{future::Future, time::Duration};

use matchlens_extract::{StatsExtractor, TimelineExtractor};
use matchlens_provider::{MatchDataProvider, ProviderResult};
use matchlens_types::{
    config::MatchlensConfig, policy::ExtractionPolicy, summary::PlayerSummary, DocumentKind,
    ProviderError, Result,
};
use tracing::{debug, info, warn};

pub struct SummaryAssembler<P>
where
    P: MatchDataProvider,
{
    provider: P,
    stats: StatsExtractor,
    timeline: TimelineExtractor,
    fetch_timeout: Option<Duration>,
}

impl<P> SummaryAssembler<P>
where
    P: MatchDataProvider,
{
    pub fn new(provider: P, policy: &ExtractionPolicy) -> Self {
        Self {
            provider,
            stats: StatsExtractor::new(policy),
            timeline: TimelineExtractor::new(policy),
            fetch_timeout: None,
        }
    }

    pub fn from_config(provider: P, config: &MatchlensConfig) -> Self {
        Self::new(provider, &config.policy).with_fetch_timeout(config.provider.fetch_timeout())
    }

    /// Bounds each document fetch; an elapsed fetch fails the whole summary.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetches both documents concurrently and condenses them for `player_id`.
    ///
    /// A player absent from the match details yields
    /// [`PlayerSummary::not_found`]; provider failures are returned as errors.
    pub async fn build_player_summary(
        &self,
        player_id: &str,
        match_id: &str,
    ) -> Result<PlayerSummary> {
        info!("Building summary for player {player_id} in match {match_id}");
        let (details, timeline) = futures::try_join!(
            self.bounded(
                DocumentKind::MatchDetails,
                self.provider.fetch_match_details(match_id)
            ),
            self.bounded(
                DocumentKind::MatchTimeline,
                self.provider.fetch_match_timeline(match_id)
            ),
        )?;
        match details.match_id() {
            Some(recorded) if recorded != match_id => {
                warn!("Match details requested as {match_id} identify themselves as {recorded}");
            }
            recorded => debug!(?recorded, "match documents fetched"),
        }

        let Some(stats) = self.stats.extract(&details, player_id) else {
            info!("Player {player_id} did not take part in match {match_id}");
            return Ok(PlayerSummary::not_found());
        };

        let frames = self.timeline.extract(&timeline, player_id);
        debug!(
            frames = frames.len(),
            events = frames.iter().map(|frame| frame.events.len()).sum::<usize>(),
            "timeline condensed"
        );
        Ok(PlayerSummary {
            stats: Some(stats),
            timeline: Some(frames),
        })
    }

    async fn bounded<T, F>(&self, document: DocumentKind, fetch: F) -> ProviderResult<T>
    where
        F: Future<Output = ProviderResult<T>>,
    {
        let Some(limit) = self.fetch_timeout else {
            return fetch.await;
        };
        tokio::time::timeout(limit, fetch)
            .await
            .map_err(|_| ProviderError::Timeout {
                document,
                elapsed: limit,
            })?
    }
}
