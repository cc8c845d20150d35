use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use matchlens_types::{
    config::ProviderConfig, details::MatchDetails, timeline::MatchTimeline, DocumentKind,
    ProviderError,
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{not_found, MatchDataProvider, ProviderResult};

const TIMELINE_SUFFIX: &str = "_timeline";

/// Provider reading documents previously saved from the game-data API.
///
/// Layout: `<data_dir>/<match_id>.json` and `<data_dir>/<match_id>_timeline.json`.
pub struct FileProvider {
    data_dir: PathBuf,
}

impl FileProvider {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(&config.data_dir)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn document_path(&self, match_id: &str, document: DocumentKind) -> PathBuf {
        let file_name = match document {
            DocumentKind::MatchDetails => format!("{match_id}.json"),
            DocumentKind::MatchTimeline => format!("{match_id}{TIMELINE_SUFFIX}.json"),
        };
        self.data_dir.join(file_name)
    }

    async fn read_document<T: DeserializeOwned>(
        &self,
        match_id: &str,
        document: DocumentKind,
    ) -> ProviderResult<T> {
        let unusable_id =
            match_id.is_empty() || match_id.contains(&['/', '\\'][..]) || match_id.starts_with('.');
        if unusable_id {
            return Err(ProviderError::upstream(format!(
                "refusing to read {document} for match id {match_id:?}"
            )));
        }

        let path = self.document_path(match_id, document);
        debug!("Reading {document} from {}", path.display());
        let raw = tokio::fs::read(&path).await.map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                not_found(match_id, document)
            } else {
                warn!("Failed to read {}: {err}", path.display());
                ProviderError::upstream(format!("failed to read {}: {err}", path.display()))
            }
        })?;

        serde_json::from_slice(&raw).map_err(|err| {
            warn!("Failed to decode {}: {err}", path.display());
            ProviderError::upstream(format!("failed to decode {}: {err}", path.display()))
        })
    }
}

#[async_trait]
impl MatchDataProvider for FileProvider {
    async fn fetch_match_details(&self, match_id: &str) -> ProviderResult<MatchDetails> {
        self.read_document(match_id, DocumentKind::MatchDetails).await
    }

    async fn fetch_match_timeline(&self, match_id: &str) -> ProviderResult<MatchTimeline> {
        self.read_document(match_id, DocumentKind::MatchTimeline).await
    }
}
