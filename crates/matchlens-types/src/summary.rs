use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::timeline::{EventKind, Position, Slot};

/// Player-centric digest of one match. `stats` is `None` only when the
/// player does not appear in the match details, and then `timeline` is
/// `None` as well.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub stats: Option<PlayerStats>,
    pub timeline: Option<Vec<FrameSummary>>,
}

impl PlayerSummary {
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn is_not_found(&self) -> bool {
        self.stats.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub champion: String,
    pub role: String,
    pub champ_level: u32,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub total_gold: u64,
    pub total_damage: u64,
    pub vision_score: u32,
    pub wards_placed: u32,
    pub detector_wards_placed: u32,
    pub cs: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runes: Option<Value>,
    pub challenge: Map<String, Value>,
    pub win: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSummary {
    pub timestamp_minutes: u64,
    pub events: Vec<FilteredEvent>,
    pub participant_frame: Option<TrimmedParticipantFrame>,
}

/// A retained event with its size-reduction fields removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl FilteredEvent {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrimmedParticipantFrame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<Slot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_gold: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub champion_stats: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub stats: Map<String, Value>,
}
