use matchlens_types::{
    details::{MatchDetails, ParticipantEntry},
    policy::ExtractionPolicy,
    summary::PlayerStats,
};
use tracing::debug;

use crate::{challenges::ChallengeFilter, locator::locate};

/// Projects a participant entry onto the fixed `PlayerStats` shape.
#[derive(Debug, Clone, Default)]
pub struct StatsExtractor {
    challenges: ChallengeFilter,
}

impl StatsExtractor {
    pub fn new(policy: &ExtractionPolicy) -> Self {
        Self {
            challenges: ChallengeFilter::from_policy(policy),
        }
    }

    /// `None` when the player is not a participant of this match.
    pub fn extract(&self, details: &MatchDetails, player_id: &str) -> Option<PlayerStats> {
        let participants = details.participants();
        let Some(entry) = locate(participants, player_id) else {
            debug!(
                participants = participants.len(),
                "player {player_id} not present in match details"
            );
            return None;
        };
        Some(self.project(entry))
    }

    pub fn project(&self, entry: &ParticipantEntry) -> PlayerStats {
        PlayerStats {
            champion: entry.champion_name.clone(),
            role: entry.team_position.clone(),
            champ_level: entry.champ_level,
            kills: entry.kills,
            deaths: entry.deaths,
            assists: entry.assists,
            total_gold: entry.gold_earned,
            total_damage: entry.total_damage_dealt_to_champions,
            vision_score: entry.vision_score,
            wards_placed: entry.wards_placed,
            detector_wards_placed: entry.detector_wards_placed,
            cs: entry
                .total_minions_killed
                .saturating_add(entry.neutral_minions_killed),
            runes: entry.perks.clone(),
            challenge: self.challenges.apply(entry.challenges.as_ref()),
            win: entry.win,
        }
    }
}
