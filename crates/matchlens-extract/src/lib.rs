//! Extraction pipeline: pulls one player's view out of the match details and
//! match timeline documents.

pub mod challenges;
pub mod events;
pub mod locator;
pub mod stats;
pub mod timeline;

pub use challenges::ChallengeFilter;
pub use events::EventFilter;
pub use locator::{locate, resolve_slot, PlayerKeyed};
pub use stats::StatsExtractor;
pub use timeline::TimelineExtractor;
