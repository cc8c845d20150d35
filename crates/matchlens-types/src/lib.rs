//! Shared domain types for the Matchlens project.

pub mod config;
pub mod details;
pub mod policy;
pub mod summary;
pub mod timeline;

mod errors;

pub use errors::{DocumentKind, MatchlensError, ProviderError, Result};
