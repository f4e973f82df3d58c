use reqwest::Client;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

use crate::error::BotError;
use crate::timetable::catalog::GroupCatalog;
use crate::timetable::model::{TimetableDocument, WeekParity};

#[derive(Debug, Deserialize)]
struct WeekStatus {
    week: i64,
}

/// Fetches timetables from the remote provider and keeps one JSON artifact
/// per group on disk, named by the group's canonical (uppercased) name.
pub struct TimetableCache {
    http: Client,
    base_url: String,
    cache_dir: PathBuf,
    tmp_seq: AtomicU64,
}

impl TimetableCache {
    pub fn new(base_url: impl Into<String>, cache_dir: impl Into<PathBuf>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            cache_dir: cache_dir.into(),
            tmp_seq: AtomicU64::new(0),
        }
    }

    fn cache_path(&self, group: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", group.trim().to_uppercase()))
    }

    /// True iff a cache artifact for `group` currently exists, regardless of
    /// age. Callers wanting freshness run [`Self::ensure_fresh`] first and
    /// fall back to the existing artifact when the fetch fails.
    pub fn has_cache(&self, group: &str) -> bool {
        self.cache_path(group).is_file()
    }

    /// Fetches the timetable for `group` and atomically replaces its cache
    /// artifact. The previous artifact is left untouched on any failure.
    pub async fn ensure_fresh(
        &self,
        catalog: &GroupCatalog,
        group: &str,
    ) -> Result<(), BotError> {
        let provider_id = catalog
            .resolve(group)
            .ok_or_else(|| BotError::UnknownGroup(group.to_string()))?;

        let url = format!("{}/timetable/{provider_id}?format=json", self.base_url);
        let response = self.http.get(&url).send().await.map_err(fetch_failed)?;
        let response = response.error_for_status().map_err(fetch_failed)?;
        let body = response.bytes().await.map_err(fetch_failed)?;

        let document = parse_timetable(&body)?;
        self.store(group, &document).await?;
        info!("refreshed timetable cache for {}", group.to_uppercase());
        Ok(())
    }

    /// Deserializes the cached artifact for `group`.
    pub fn load(&self, group: &str) -> Result<TimetableDocument, BotError> {
        let path = self.cache_path(group);
        let bytes = std::fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BotError::NoCacheYet(group.trim().to_uppercase())
            } else {
                BotError::FetchFailed(format!("cannot read {}: {e}", path.display()))
            }
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            BotError::FetchFailed(format!("cached artifact {} is malformed: {e}", path.display()))
        })
    }

    /// Asks the provider which week is running. `week == 1` means odd.
    pub async fn current_week_parity(&self) -> Result<WeekParity, BotError> {
        let url = format!("{}/CurrentWeek/?format=json", self.base_url);
        let response = self.http.get(&url).send().await.map_err(fetch_failed)?;
        let response = response.error_for_status().map_err(fetch_failed)?;
        let status: WeekStatus = response.json().await.map_err(fetch_failed)?;

        let parity = if status.week == 1 {
            WeekParity::Odd
        } else {
            WeekParity::Even
        };
        debug!("provider week counter {} -> {:?}", status.week, parity);
        Ok(parity)
    }

    /// Write-to-temp then rename, so readers of the same group's artifact
    /// never observe a half-written document. Each write gets its own temp
    /// name; with a shared name, two concurrent refreshes of one group
    /// could interleave writes and rename a truncated file into place.
    async fn store(&self, group: &str, document: &TimetableDocument) -> Result<(), BotError> {
        tokio::fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(fetch_failed)?;

        let path = self.cache_path(group);
        let seq = self.tmp_seq.fetch_add(1, Ordering::Relaxed);
        let tmp = self
            .cache_dir
            .join(format!("{}.{seq}.tmp", group.trim().to_uppercase()));
        let bytes = serde_json::to_vec(document).map_err(fetch_failed)?;

        tokio::fs::write(&tmp, &bytes).await.map_err(fetch_failed)?;
        tokio::fs::rename(&tmp, &path).await.map_err(fetch_failed)?;
        Ok(())
    }
}

/// The provider wraps the document in a single-element array.
fn parse_timetable(body: &[u8]) -> Result<TimetableDocument, BotError> {
    let documents: Vec<TimetableDocument> = serde_json::from_slice(body)
        .map_err(|e| BotError::FetchFailed(format!("malformed timetable payload: {e}")))?;
    documents
        .into_iter()
        .next()
        .ok_or_else(|| BotError::FetchFailed("empty timetable payload".to_string()))
}

fn fetch_failed(e: impl std::fmt::Display) -> BotError {
    BotError::FetchFailed(e.to_string())
}
