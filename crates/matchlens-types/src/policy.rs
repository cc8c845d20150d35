//! Allow-lists and strip tables that shape a summary.
//!
//! The tables are plain data handed to the extractors when they are built,
//! so alternate policies can be loaded from configuration or constructed in
//! tests without touching anything global.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::timeline::EventKind;

/// Field every retained event loses; it duplicates the frame timestamp.
pub const EVENT_TIMESTAMP_FIELD: &str = "timestamp";

pub const DEFAULT_CHALLENGE_KEYS: &[&str] = &[
    // performance
    "kda",
    "damagePerMinute",
    "teamDamagePercentage",
    "killParticipation",
    "goldPerMinute",
    "visionScorePerMinute",
    // objectives
    "baronTakedowns",
    "dragonTakedowns",
    "riftHeraldTakedowns",
    "turretTakedowns",
    "voidMonsterKill",
    // fighting
    "soloKills",
    "killsNearEnemyTurret",
    "killsUnderOwnTurret",
    "outnumberedKills",
    "immobilizeAndKillWithAlly",
    "enemyChampionImmobilizations",
    // laning
    "laneMinionsFirst10Minutes",
    "maxCsAdvantageOnLaneOpponent",
    "maxLevelLeadLaneOpponent",
    // survivability
    "damageTakenOnTeamPercentage",
    "survivedSingleDigitHpCount",
    "survivedThreeImmobilizesInFight",
    // vision
    "controlWardsPlaced",
    "stealthWardsPlaced",
    "wardTakedowns",
    "visionScoreAdvantageLaneOpponent",
];

pub const DEFAULT_FRAME_STRIP: &[&str] = &[
    "damageStats",
    "goldPerSecond",
    "minionsKilled",
    "jungleMinionsKilled",
    "totalGold",
    "xp",
    "timeEnemySpentControlled",
];

pub const DEFAULT_CHAMPION_STATS_STRIP: &[&str] = &[
    "armorPen",
    "armorPenPercent",
    "bonusArmorPenPercent",
    "magicPen",
    "magicPenPercent",
    "bonusMagicPenPercent",
    "lifesteal",
    "omnivamp",
    "physicalVamp",
    "spellVamp",
    "healthMax",
    "healthRegen",
    "powerMax",
    "powerRegen",
    "ccReduction",
    "cooldownReduction",
];

fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

/// Complete shaping policy for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionPolicy {
    /// Challenge metrics kept in `PlayerStats::challenge`.
    pub challenge_keys: BTreeSet<String>,
    /// Untyped participant-frame counters removed from emitted frames.
    pub frame_strip: BTreeSet<String>,
    /// `championStats` entries removed from emitted frames.
    pub champion_stats_strip: BTreeSet<String>,
    pub event_strip: EventStripPolicy,
}

impl Default for ExtractionPolicy {
    fn default() -> Self {
        Self {
            challenge_keys: names(DEFAULT_CHALLENGE_KEYS),
            frame_strip: names(DEFAULT_FRAME_STRIP),
            champion_stats_strip: names(DEFAULT_CHAMPION_STATS_STRIP),
            event_strip: EventStripPolicy::default(),
        }
    }
}

/// Per-kind fields removed from retained events, on top of
/// [`EVENT_TIMESTAMP_FIELD`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventStripPolicy {
    pub champion_kill: BTreeSet<String>,
    pub elite_monster_kill: BTreeSet<String>,
    pub building_kill: BTreeSet<String>,
    pub turret_plate_destroyed: BTreeSet<String>,
    pub feat_update: BTreeSet<String>,
}

impl Default for EventStripPolicy {
    fn default() -> Self {
        Self {
            champion_kill: names(&[
                "killStreakLength",
                "victimDamageDealt",
                "victimDamageReceived",
            ]),
            elite_monster_kill: names(&["position", "monsterSubType"]),
            building_kill: names(&["position"]),
            turret_plate_destroyed: names(&["position"]),
            feat_update: BTreeSet::new(),
        }
    }
}

impl EventStripPolicy {
    pub fn fields_for(&self, kind: EventKind) -> &BTreeSet<String> {
        match kind {
            EventKind::ChampionKill => &self.champion_kill,
            EventKind::EliteMonsterKill => &self.elite_monster_kill,
            EventKind::BuildingKill => &self.building_kill,
            EventKind::TurretPlateDestroyed => &self.turret_plate_destroyed,
            EventKind::FeatUpdate => &self.feat_update,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_are_populated() {
        let policy = ExtractionPolicy::default();
        assert_eq!(policy.challenge_keys.len(), DEFAULT_CHALLENGE_KEYS.len());
        assert!(policy.challenge_keys.contains("killParticipation"));
        assert!(policy.frame_strip.contains("damageStats"));
        assert!(policy.champion_stats_strip.contains("omnivamp"));
        assert!(!policy.champion_stats_strip.contains("health"));
    }

    #[test]
    fn elite_monster_kills_lose_position_and_subtype() {
        let strip = EventStripPolicy::default();
        let fields = strip.fields_for(EventKind::EliteMonsterKill);
        assert!(fields.contains("position"));
        assert!(fields.contains("monsterSubType"));
        assert!(strip.fields_for(EventKind::FeatUpdate).is_empty());
    }

    #[test]
    fn partial_policy_tables_fall_back_to_defaults() {
        let policy: ExtractionPolicy = toml::from_str(
            r#"
            challenge_keys = ["kda"]

            [event_strip]
            elite_monster_kill = []
            "#,
        )
        .expect("parse policy");
        assert_eq!(policy.challenge_keys.len(), 1);
        assert_eq!(policy.frame_strip, ExtractionPolicy::default().frame_strip);
        assert!(policy.event_strip.elite_monster_kill.is_empty());
        assert_eq!(
            policy.event_strip.champion_kill,
            EventStripPolicy::default().champion_kill
        );
    }
}
