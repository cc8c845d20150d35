use std::collections::BTreeSet;

use matchlens_types::{
    policy::ExtractionPolicy,
    summary::{FrameSummary, TrimmedParticipantFrame},
    timeline::{Frame, MatchTimeline, ParticipantFrame, Slot},
};
use tracing::{debug, warn};

use crate::{events::EventFilter, locator::resolve_slot};

/// Reduces a match timeline to the frames in which the player was involved.
#[derive(Debug, Clone)]
pub struct TimelineExtractor {
    events: EventFilter,
    frame_strip: BTreeSet<String>,
    champion_stats_strip: BTreeSet<String>,
}

impl TimelineExtractor {
    pub fn new(policy: &ExtractionPolicy) -> Self {
        Self {
            events: EventFilter::new(policy.event_strip.clone()),
            frame_strip: policy.frame_strip.clone(),
            champion_stats_strip: policy.champion_stats_strip.clone(),
        }
    }

    /// Missing `info` and an unresolvable player both yield no frames.
    pub fn extract(&self, timeline: &MatchTimeline, player_id: &str) -> Vec<FrameSummary> {
        let Some(info) = timeline.info.as_ref() else {
            warn!("match timeline has no info block; returning empty timeline");
            return Vec::new();
        };
        let Some(slot) = resolve_slot(&info.participants, player_id) else {
            warn!("player {player_id} has no slot in the match timeline");
            return Vec::new();
        };
        debug!(slot, frames = info.frames.len(), "walking timeline frames");

        info.frames
            .iter()
            .filter_map(|frame| self.summarize_frame(frame, slot))
            .collect()
    }

    /// `None` when no event in the frame survives filtering.
    pub fn summarize_frame(&self, frame: &Frame, slot: Slot) -> Option<FrameSummary> {
        let events: Vec<_> = frame
            .events
            .iter()
            .filter_map(|event| self.events.filter(event, slot))
            .collect();
        if events.is_empty() {
            return None;
        }

        let participant_frame = frame.participant_frame(slot).map(|state| self.trim(state));
        if participant_frame.is_none() {
            warn!(
                slot,
                timestamp = frame.timestamp,
                "frame has events but no participant state for slot"
            );
        }

        Some(FrameSummary {
            timestamp_minutes: frame.minute(),
            events,
            participant_frame,
        })
    }

    /// Applies `frame_strip` to typed and untyped fields alike; `championStats`
    /// that survives is narrowed by `champion_stats_strip`.
    fn trim(&self, state: &ParticipantFrame) -> TrimmedParticipantFrame {
        let keeps = |key: &str| !self.frame_strip.contains(key);
        let mut stats = state.stats.clone();
        stats.retain(|key, _| keeps(key));
        let champion_stats = state
            .champion_stats
            .as_ref()
            .filter(|_| keeps("championStats"))
            .map(|champion_stats| {
                let mut champion_stats = champion_stats.clone();
                champion_stats.retain(|key, _| !self.champion_stats_strip.contains(key));
                champion_stats
            });

        TrimmedParticipantFrame {
            participant_id: state.participant_id.filter(|_| keeps("participantId")),
            level: state.level.filter(|_| keeps("level")),
            current_gold: state.current_gold.filter(|_| keeps("currentGold")),
            position: state.position.filter(|_| keeps("position")),
            champion_stats,
            stats,
        }
    }
}

impl Default for TimelineExtractor {
    fn default() -> Self {
        Self::new(&ExtractionPolicy::default())
    }
}
