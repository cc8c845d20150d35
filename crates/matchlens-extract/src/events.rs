//! Per-event retention and field stripping.
//!
//! | kind                     | retained when                          |
//! |--------------------------|----------------------------------------|
//! | `CHAMPION_KILL`          | slot is killer, victim, or an assister |
//! | `ELITE_MONSTER_KILL`     | always                                 |
//! | `FEAT_UPDATE`            | always                                 |
//! | `BUILDING_KILL`          | slot is the killer                     |
//! | `TURRET_PLATE_DESTROYED` | slot is the killer                     |
//! | anything else            | never                                  |
//!
//! Retained events drop `timestamp` plus the per-kind fields listed in
//! [`EventStripPolicy`].

use matchlens_types::{
    policy::{EventStripPolicy, EVENT_TIMESTAMP_FIELD},
    summary::FilteredEvent,
    timeline::{Slot, TimelineEvent},
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    strip: EventStripPolicy,
}

impl EventFilter {
    pub fn new(strip: EventStripPolicy) -> Self {
        Self { strip }
    }

    /// Returns the stripped event when it is relevant to `slot`.
    pub fn filter(&self, event: &TimelineEvent, slot: Slot) -> Option<FilteredEvent> {
        let kind = event.kind()?;
        if !retains(event, slot) {
            return None;
        }
        let mut fields = match event {
            TimelineEvent::ChampionKill(payload) => payload_fields(payload),
            TimelineEvent::EliteMonsterKill(payload) => payload_fields(payload),
            TimelineEvent::BuildingKill(payload) => payload_fields(payload),
            TimelineEvent::TurretPlateDestroyed(payload) => payload_fields(payload),
            TimelineEvent::FeatUpdate(payload) => payload_fields(payload),
            TimelineEvent::Other => None,
        }?;
        fields.remove(EVENT_TIMESTAMP_FIELD);
        for field in self.strip.fields_for(kind) {
            fields.remove(field);
        }
        Some(FilteredEvent { kind, fields })
    }
}

/// Retention rule, independent of stripping.
pub fn retains(event: &TimelineEvent, slot: Slot) -> bool {
    match event {
        TimelineEvent::ChampionKill(kill) => kill.involves(slot),
        TimelineEvent::EliteMonsterKill(_) | TimelineEvent::FeatUpdate(_) => true,
        TimelineEvent::BuildingKill(kill) => kill.killer_id == Some(slot),
        TimelineEvent::TurretPlateDestroyed(plate) => plate.killer_id == Some(slot),
        TimelineEvent::Other => false,
    }
}

fn payload_fields<T: Serialize>(payload: &T) -> Option<Map<String, Value>> {
    match serde_json::to_value(payload) {
        Ok(Value::Object(fields)) => Some(fields),
        Ok(other) => {
            warn!("event payload serialized to non-object {other}; dropping");
            None
        }
        Err(err) => {
            warn!("failed to serialize event payload: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchlens_types::timeline::EventKind;
    use serde_json::json;

    const PLAYER: Slot = 3;

    fn event(value: Value) -> TimelineEvent {
        serde_json::from_value(value).expect("decode event")
    }

    fn champion_kill(killer: Slot, victim: Slot, assists: &[Slot]) -> TimelineEvent {
        event(json!({
            "type": "CHAMPION_KILL",
            "timestamp": 754321,
            "killerId": killer,
            "victimId": victim,
            "assistingParticipantIds": assists,
            "killStreakLength": 1,
            "victimDamageDealt": [{ "basic": true }],
            "victimDamageReceived": [{ "basic": false }],
            "bounty": 300,
            "position": { "x": 5000, "y": 6000 }
        }))
    }

    #[test]
    fn champion_kill_retained_for_each_role() {
        let filter = EventFilter::default();
        assert!(filter.filter(&champion_kill(PLAYER, 7, &[]), PLAYER).is_some());
        assert!(filter.filter(&champion_kill(7, PLAYER, &[8]), PLAYER).is_some());
        assert!(filter.filter(&champion_kill(7, 2, &[1, PLAYER]), PLAYER).is_some());
    }

    #[test]
    fn champion_kill_bystander_dropped() {
        let filter = EventFilter::default();
        assert!(filter.filter(&champion_kill(7, 2, &[1, 4]), PLAYER).is_none());
        let no_assists = event(json!({ "type": "CHAMPION_KILL", "killerId": 7, "victimId": 2 }));
        assert!(filter.filter(&no_assists, PLAYER).is_none());
    }

    #[test]
    fn champion_kill_strips_bulky_fields() {
        let filtered = EventFilter::default()
            .filter(&champion_kill(PLAYER, 7, &[2]), PLAYER)
            .expect("retained");
        assert_eq!(filtered.kind, EventKind::ChampionKill);
        for stripped in [
            "timestamp",
            "killStreakLength",
            "victimDamageDealt",
            "victimDamageReceived",
        ] {
            assert!(filtered.get(stripped).is_none(), "{stripped} kept");
        }
        assert_eq!(filtered.get("killerId"), Some(&json!(PLAYER)));
        assert_eq!(filtered.get("assistingParticipantIds"), Some(&json!([2])));
        assert_eq!(filtered.get("bounty"), Some(&json!(300)));
        assert!(filtered.get("position").is_some());
    }

    #[test]
    fn elite_monster_kill_always_retained_and_trimmed() {
        let kill = event(json!({
            "type": "ELITE_MONSTER_KILL",
            "timestamp": 45000,
            "killerId": 9,
            "killerTeamId": 200,
            "monsterType": "DRAGON",
            "monsterSubType": "FIRE_DRAGON",
            "position": { "x": 9866, "y": 4414 }
        }));
        let filtered = EventFilter::default().filter(&kill, PLAYER).expect("retained");
        assert_eq!(filtered.get("monsterType"), Some(&json!("DRAGON")));
        assert_eq!(filtered.get("killerTeamId"), Some(&json!(200)));
        assert!(filtered.get("monsterSubType").is_none());
        assert!(filtered.get("position").is_none());
        assert!(filtered.get("timestamp").is_none());
    }

    #[test]
    fn feat_update_always_retained() {
        let feat = event(json!({ "type": "FEAT_UPDATE", "timestamp": 1, "featType": 0, "featValue": 1, "teamId": 100 }));
        let filtered = EventFilter::default().filter(&feat, PLAYER).expect("retained");
        assert_eq!(filtered.get("featValue"), Some(&json!(1)));
        assert!(filtered.get("timestamp").is_none());
    }

    #[test]
    fn structures_require_player_as_killer() {
        let filter = EventFilter::default();
        let building = |killer: Slot| {
            event(json!({
                "type": "BUILDING_KILL",
                "timestamp": 900000,
                "killerId": killer,
                "assistingParticipantIds": [PLAYER],
                "buildingType": "TOWER_BUILDING",
                "position": { "x": 1, "y": 2 }
            }))
        };
        let plate = |killer: Slot| {
            event(json!({
                "type": "TURRET_PLATE_DESTROYED",
                "killerId": killer,
                "laneType": "MID_LANE",
                "position": { "x": 1, "y": 2 }
            }))
        };

        let own = filter.filter(&building(PLAYER), PLAYER).expect("retained");
        assert_eq!(own.get("buildingType"), Some(&json!("TOWER_BUILDING")));
        assert!(own.get("position").is_none());
        assert!(filter.filter(&building(5), PLAYER).is_none());

        let own_plate = filter.filter(&plate(PLAYER), PLAYER).expect("retained");
        assert_eq!(own_plate.kind, EventKind::TurretPlateDestroyed);
        assert!(own_plate.get("position").is_none());
        assert!(filter.filter(&plate(5), PLAYER).is_none());
    }

    #[test]
    fn unlisted_kinds_rejected() {
        let purchase = event(json!({ "type": "ITEM_PURCHASED", "participantId": PLAYER, "itemId": 3078 }));
        let ward = event(json!({ "type": "WARD_PLACED", "creatorId": PLAYER }));
        let filter = EventFilter::default();
        assert!(filter.filter(&purchase, PLAYER).is_none());
        assert!(filter.filter(&ward, PLAYER).is_none());
    }

    #[test]
    fn timestamp_removed_even_with_empty_policy() {
        let strip = EventStripPolicy {
            champion_kill: Default::default(),
            elite_monster_kill: Default::default(),
            building_kill: Default::default(),
            turret_plate_destroyed: Default::default(),
            feat_update: Default::default(),
        };
        let filtered = EventFilter::new(strip)
            .filter(&champion_kill(PLAYER, 7, &[]), PLAYER)
            .expect("retained");
        assert!(filtered.get("timestamp").is_none());
        assert!(filtered.get("killStreakLength").is_some());
    }
}
