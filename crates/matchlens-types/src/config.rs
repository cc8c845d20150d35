use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{policy::ExtractionPolicy, MatchlensError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Directory holding `<match_id>.json` and `<match_id>_timeline.json`.
    pub data_dir: String,
    pub fetch_timeout_ms: u64,
}

impl ProviderConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpsConfig {
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchlensConfig {
    pub provider: ProviderConfig,
    pub ops: OpsConfig,
    #[serde(default)]
    pub policy: ExtractionPolicy,
}

impl MatchlensConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref).map_err(|err| {
            MatchlensError::Configuration(format!(
                "unable to read config file {}: {err}",
                path_ref.display()
            ))
        })?;
        toml::from_str(&contents).map_err(|err| {
            MatchlensError::Configuration(format!(
                "failed to parse config file {}: {err}",
                path_ref.display()
            ))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.provider.data_dir.trim().is_empty() {
            return Err(MatchlensError::Configuration(
                "provider.data_dir must not be empty".into(),
            ));
        }
        if self.provider.fetch_timeout_ms == 0 {
            return Err(MatchlensError::Configuration(
                "provider.fetch_timeout_ms must be greater than zero".into(),
            ));
        }
        if self.ops.log_level.trim().is_empty() {
            return Err(MatchlensError::Configuration(
                "ops.log_level must not be empty".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchlensConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig {
                data_dir: "data/matches".into(),
                fetch_timeout_ms: 10_000,
            },
            ops: OpsConfig {
                log_level: "info".into(),
            },
            policy: ExtractionPolicy::default(),
        }
    }
}
