use std::collections::BTreeSet;

use matchlens_types::policy::ExtractionPolicy;
use serde_json::{Map, Value};

/// Keeps only allow-listed challenge metrics.
#[derive(Debug, Clone)]
pub struct ChallengeFilter {
    keys: BTreeSet<String>,
}

impl ChallengeFilter {
    pub fn new(keys: BTreeSet<String>) -> Self {
        Self { keys }
    }

    pub fn from_policy(policy: &ExtractionPolicy) -> Self {
        Self::new(policy.challenge_keys.clone())
    }

    pub fn keys(&self) -> &BTreeSet<String> {
        &self.keys
    }

    /// An absent map filters to an empty one. Allow-listed keys missing from
    /// the input stay missing.
    pub fn apply(&self, challenges: Option<&Map<String, Value>>) -> Map<String, Value> {
        let Some(challenges) = challenges else {
            return Map::new();
        };
        challenges
            .iter()
            .filter(|(key, _)| self.keys.contains(key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl Default for ChallengeFilter {
    fn default() -> Self {
        Self::from_policy(&ExtractionPolicy::default())
    }
}
