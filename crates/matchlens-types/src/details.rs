use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{serde_as, DefaultOnError, VecSkipError};

/// Per-participant end-of-match document as published by the game-data provider.
///
/// Decoding is lenient: a block of the wrong shape reads as absent and
/// participants that are not records are skipped.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchDetails {
    #[serde_as(as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MatchMetadata>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<MatchInfo>,
}

impl MatchDetails {
    pub fn new(participants: Vec<ParticipantEntry>) -> Self {
        Self {
            metadata: None,
            info: Some(MatchInfo { participants }),
        }
    }

    /// Participants of the match; a document without `info` has none.
    pub fn participants(&self) -> &[ParticipantEntry] {
        self.info
            .as_ref()
            .map(|info| info.participants.as_slice())
            .unwrap_or_default()
    }

    /// Match id recorded in the document's own metadata, if any.
    pub fn match_id(&self) -> Option<&str> {
        self.metadata.as_ref()?.match_id.as_deref()
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchMetadata {
    #[serde_as(as = "DefaultOnError")]
    pub data_version: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub match_id: Option<String>,
    #[serde_as(as = "DefaultOnError<VecSkipError<_>>")]
    pub participants: Vec<String>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    #[serde_as(as = "DefaultOnError<VecSkipError<_>>")]
    #[serde(default)]
    pub participants: Vec<ParticipantEntry>,
}

/// One player's end-of-match record. Missing, null or mistyped fields read
/// as zero, empty or absent.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantEntry {
    #[serde_as(as = "DefaultOnError")]
    pub puuid: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub champion_name: String,
    #[serde_as(as = "DefaultOnError")]
    pub team_position: String,
    #[serde_as(as = "DefaultOnError")]
    pub champ_level: u32,
    #[serde_as(as = "DefaultOnError")]
    pub kills: u32,
    #[serde_as(as = "DefaultOnError")]
    pub deaths: u32,
    #[serde_as(as = "DefaultOnError")]
    pub assists: u32,
    #[serde_as(as = "DefaultOnError")]
    pub gold_earned: u64,
    #[serde_as(as = "DefaultOnError")]
    pub total_damage_dealt_to_champions: u64,
    #[serde_as(as = "DefaultOnError")]
    pub vision_score: u32,
    #[serde_as(as = "DefaultOnError")]
    pub wards_placed: u32,
    #[serde_as(as = "DefaultOnError")]
    pub detector_wards_placed: u32,
    #[serde_as(as = "DefaultOnError")]
    pub total_minions_killed: u32,
    #[serde_as(as = "DefaultOnError")]
    pub neutral_minions_killed: u32,
    #[serde_as(as = "DefaultOnError")]
    pub win: bool,
    pub perks: Option<Value>,
    #[serde_as(as = "DefaultOnError")]
    pub challenges: Option<Map<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_participants_still_decode() {
        let doc = json!({
            "info": {
                "participants": [
                    { "puuid": "a", "championName": "Ahri", "kills": 5, "challenges": { "kda": 7.5 } },
                    { "puuid": "b", "championName": "Lux", "teamPosition": "UTILITY" }
                ]
            }
        });
        let details: MatchDetails = serde_json::from_value(doc).expect("decode details");
        let participants = details.participants();
        assert_eq!(participants.len(), 2);
        assert_eq!(participants[0].kills, 5);
        assert_eq!(participants[1].kills, 0);
        assert!(participants[1].challenges.is_none());
        assert_eq!(participants[1].puuid.as_deref(), Some("b"));
    }

    #[test]
    fn missing_info_means_no_participants() {
        let details: MatchDetails =
            serde_json::from_value(json!({ "info": null })).expect("decode details");
        assert!(details.participants().is_empty());
    }

    #[test]
    fn null_and_mistyped_fields_fall_back_to_defaults() {
        let details: MatchDetails = serde_json::from_value(json!({
            "metadata": { "matchId": "NA1_1", "participants": ["p", 7] },
            "info": {
                "participants": [{
                    "puuid": "p",
                    "championName": null,
                    "teamPosition": null,
                    "kills": 5,
                    "deaths": "two",
                    "win": "yes",
                    "challenges": [1, 2]
                }]
            }
        }))
        .expect("decode details");
        let entry = &details.participants()[0];
        assert_eq!(entry.kills, 5);
        assert_eq!(entry.team_position, "");
        assert_eq!(entry.champion_name, "");
        assert_eq!(entry.deaths, 0);
        assert!(!entry.win);
        assert!(entry.challenges.is_none());
        assert_eq!(details.match_id(), Some("NA1_1"));
        assert_eq!(details.metadata.expect("metadata").participants, vec!["p"]);
    }

    #[test]
    fn non_record_participants_are_skipped() {
        let details: MatchDetails = serde_json::from_value(json!({
            "info": { "participants": [42, { "puuid": "p", "kills": 1 }, null] }
        }))
        .expect("decode details");
        assert_eq!(details.participants().len(), 1);
        assert_eq!(details.participants()[0].puuid.as_deref(), Some("p"));
    }

    #[test]
    fn malformed_info_reads_as_absent() {
        let details: MatchDetails =
            serde_json::from_value(json!({ "info": "oops" })).expect("decode details");
        assert!(details.info.is_none());
        assert!(details.participants().is_empty());
    }
}
