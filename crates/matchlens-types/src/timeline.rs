use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{serde_as, DefaultOnError, MapSkipError, VecSkipError};

use crate::details::MatchMetadata;

/// Position of a participant inside one match timeline (1..=10).
pub type Slot = u32;

/// Milliseconds in one timeline minute bucket.
pub const MILLIS_PER_MINUTE: u64 = 60_000;

/// Time-sliced match document as published by the game-data provider.
///
/// Malformed frames, events, identities and participant states are dropped
/// individually; the rest of the document still decodes.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchTimeline {
    #[serde_as(as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MatchMetadata>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<TimelineInfo>,
}

impl MatchTimeline {
    pub fn new(participants: Vec<ParticipantIdentity>, frames: Vec<Frame>) -> Self {
        Self {
            metadata: None,
            info: Some(TimelineInfo {
                participants,
                frames,
            }),
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineInfo {
    #[serde_as(as = "DefaultOnError<VecSkipError<_>>")]
    pub participants: Vec<ParticipantIdentity>,
    #[serde_as(as = "DefaultOnError<VecSkipError<_>>")]
    pub frames: Vec<Frame>,
}

/// Maps a player identifier to its slot in this timeline.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantIdentity {
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub puuid: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub participant_id: Option<Slot>,
}

impl ParticipantIdentity {
    pub fn new(puuid: impl Into<String>, slot: Slot) -> Self {
        Self {
            puuid: Some(puuid.into()),
            participant_id: Some(slot),
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Frame {
    #[serde_as(as = "DefaultOnError")]
    pub timestamp: u64,
    /// Keyed by slot rendered as a string, the way the provider publishes it.
    #[serde_as(as = "DefaultOnError<MapSkipError<_, _>>")]
    pub participant_frames: BTreeMap<String, ParticipantFrame>,
    #[serde_as(as = "DefaultOnError<VecSkipError<_>>")]
    pub events: Vec<TimelineEvent>,
}

impl Frame {
    pub fn participant_frame(&self, slot: Slot) -> Option<&ParticipantFrame> {
        self.participant_frames.get(&slot.to_string())
    }

    /// Whole minutes since match start, floored.
    pub fn minute(&self) -> u64 {
        self.timestamp / MILLIS_PER_MINUTE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

/// Instantaneous state of one participant at a frame boundary.
///
/// Only the fields read by the pipeline are typed; the remaining bulk
/// counters (`damageStats`, `xp`, `totalGold`, ...) stay in `stats`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantFrame {
    #[serde_as(as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<Slot>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_gold: Option<i64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub champion_stats: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub stats: Map<String, Value>,
}

/// Event kinds the pipeline knows how to judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    ChampionKill,
    EliteMonsterKill,
    BuildingKill,
    TurretPlateDestroyed,
    FeatUpdate,
}

/// Timeline event discriminated by its `type` field. Kinds the pipeline
/// never retains (item purchases, ward placements, ...) collapse into `Other`;
/// records without a `type` or with a mistyped payload are skipped by [`Frame`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimelineEvent {
    ChampionKill(ChampionKill),
    EliteMonsterKill(EliteMonsterKill),
    BuildingKill(BuildingKill),
    TurretPlateDestroyed(TurretPlateDestroyed),
    FeatUpdate(FeatUpdate),
    #[serde(other)]
    Other,
}

impl TimelineEvent {
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            TimelineEvent::ChampionKill(_) => Some(EventKind::ChampionKill),
            TimelineEvent::EliteMonsterKill(_) => Some(EventKind::EliteMonsterKill),
            TimelineEvent::BuildingKill(_) => Some(EventKind::BuildingKill),
            TimelineEvent::TurretPlateDestroyed(_) => Some(EventKind::TurretPlateDestroyed),
            TimelineEvent::FeatUpdate(_) => Some(EventKind::FeatUpdate),
            TimelineEvent::Other => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionKill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub killer_id: Option<Slot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub victim_id: Option<Slot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assisting_participant_ids: Option<Vec<Slot>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChampionKill {
    /// True when `slot` killed, died, or assisted.
    pub fn involves(&self, slot: Slot) -> bool {
        self.killer_id == Some(slot)
            || self.victim_id == Some(slot)
            || self
                .assisting_participant_ids
                .as_ref()
                .is_some_and(|ids| ids.contains(&slot))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EliteMonsterKill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub killer_id: Option<Slot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub killer_team_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monster_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monster_sub_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingKill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub killer_id: Option<Slot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lane_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurretPlateDestroyed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub killer_id: Option<Slot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lane_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feat_type: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feat_value: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
