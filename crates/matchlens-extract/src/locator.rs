//! Player lookup inside unordered participant lists.

use matchlens_types::{
    details::ParticipantEntry,
    timeline::{ParticipantIdentity, Slot},
};

/// Records that carry a player identifier.
pub trait PlayerKeyed {
    fn player_id(&self) -> Option<&str>;
}

impl PlayerKeyed for ParticipantEntry {
    fn player_id(&self) -> Option<&str> {
        self.puuid.as_deref()
    }
}

impl PlayerKeyed for ParticipantIdentity {
    fn player_id(&self) -> Option<&str> {
        self.puuid.as_deref()
    }
}

/// First record whose identifier equals `player_id` exactly.
pub fn locate<'a, T: PlayerKeyed>(records: &'a [T], player_id: &str) -> Option<&'a T> {
    records
        .iter()
        .find(|record| record.player_id() == Some(player_id))
}

/// Timeline slot assigned to `player_id`, if the identity list names one.
pub fn resolve_slot(identities: &[ParticipantIdentity], player_id: &str) -> Option<Slot> {
    locate(identities, player_id).and_then(|identity| identity.participant_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(puuid: &str, champion: &str) -> ParticipantEntry {
        ParticipantEntry {
            puuid: Some(puuid.into()),
            champion_name: champion.into(),
            ..Default::default()
        }
    }

    #[test]
    fn finds_exact_match_only() {
        let entries = vec![entry("abc-1", "Ahri"), entry("abc", "Lux")];
        assert_eq!(locate(&entries, "abc").map(|e| e.champion_name.as_str()), Some("Lux"));
        assert!(locate(&entries, "ABC").is_none());
        assert!(locate(&entries, "ab").is_none());
    }

    #[test]
    fn entries_without_identifier_never_match() {
        let entries = vec![ParticipantEntry::default(), entry("p", "Jinx")];
        assert_eq!(locate(&entries, "p").map(|e| e.champion_name.as_str()), Some("Jinx"));
        assert!(locate(&entries, "").is_none());
    }

    #[test]
    fn resolves_slot_from_identities() {
        let identities = vec![
            ParticipantIdentity::new("first", 1),
            ParticipantIdentity::new("second", 2),
        ];
        assert_eq!(resolve_slot(&identities, "second"), Some(2));
        assert_eq!(resolve_slot(&identities, "missing"), None);
        assert_eq!(resolve_slot(&[], "first"), None);
    }
}
