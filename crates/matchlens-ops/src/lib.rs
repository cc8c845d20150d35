//! Operational helpers: logging setup and summary output.

use std::path::{Path, PathBuf};

use matchlens_types::{config::OpsConfig, summary::PlayerSummary, MatchlensError, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub fn init_tracing(config: &OpsConfig) -> Result<()> {
    let filter = EnvFilter::try_new(config.log_level.clone())
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|err| MatchlensError::Ops(format!("failed to create log filter: {err}")))?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| MatchlensError::Ops(format!("tracing init error: {err}")))?;
    Ok(())
}

/// Serialises a summary as JSON.
pub fn render_summary(summary: &PlayerSummary, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(summary)
    } else {
        serde_json::to_string(summary)
    };
    rendered.map_err(|err| MatchlensError::Ops(format!("failed to serialize summary: {err}")))
}

pub fn write_summary(path: &Path, summary: &PlayerSummary, pretty: bool) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|err| {
            MatchlensError::Ops(format!(
                "failed to create output dir {}: {err}",
                parent.display()
            ))
        })?;
    }
    let rendered = render_summary(summary, pretty)?;
    std::fs::write(path, rendered).map_err(|err| {
        MatchlensError::Ops(format!("failed to write {}: {err}", path.display()))
    })?;
    info!("Summary written to {:?}", path);
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchlens_types::summary::PlayerStats;

    #[test]
    fn render_not_found_summary() {
        let rendered = render_summary(&PlayerSummary::not_found(), false).expect("render");
        assert_eq!(rendered, r#"{"stats":null,"timeline":null}"#);
    }

    #[test]
    fn write_summary_creates_parent_dirs() {
        let dir = std::env::temp_dir().join("matchlens-ops-test");
        let path = dir.join("nested").join("summary.json");
        let summary = PlayerSummary {
            stats: Some(PlayerStats {
                champion: "Ahri".into(),
                kills: 5,
                win: true,
                ..Default::default()
            }),
            timeline: Some(Vec::new()),
        };

        let written = write_summary(&path, &summary, true).expect("write summary");
        let contents = std::fs::read_to_string(&written).expect("read back");
        let parsed: PlayerSummary = serde_json::from_str(&contents).expect("parse back");
        assert_eq!(parsed, summary);
        std::fs::remove_dir_all(&dir).expect("cleanup");
    }
}
