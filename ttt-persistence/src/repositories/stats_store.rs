use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::StorageError;
use ttt_types::{Outcome, StatsRecord, UserId};

/// Whole stats document. Ordered so that saving is deterministic.
pub type StatsMap = BTreeMap<UserId, StatsRecord>;

pub struct StatsStore {
    path: PathBuf,
    // Held across every load-modify-store cycle so concurrent results
    // for the same user are never lost.
    write_lock: Mutex<()>,
}

impl StatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the full mapping. A missing file means no games were played yet.
    pub async fn load(&self) -> Result<StatsMap, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StatsMap::new()),
            Err(source) => {
                return Err(StorageError::Unavailable {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Replaces the file with `stats`, going through a temp file so a
    /// failed write never leaves a truncated document behind.
    pub async fn save(&self, stats: &StatsMap) -> Result<(), StorageError> {
        let bytes = encode(stats).map_err(|source| StorageError::Encode {
            path: self.path.clone(),
            source,
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        let unavailable = |source| StorageError::Unavailable {
            path: self.path.clone(),
            source,
        };
        tokio::fs::write(&tmp_path, &bytes).await.map_err(unavailable)?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(unavailable)?;
        Ok(())
    }

    /// Counts one finished game for `user_id` and persists immediately.
    pub async fn record_outcome(
        &self,
        user_id: &str,
        outcome: Outcome,
    ) -> Result<StatsRecord, StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut stats = self.load().await?;
        let record = stats.entry(user_id.to_string()).or_default();
        record.apply(outcome);
        let updated = *record;

        self.save(&stats).await?;
        debug!("Recorded {:?} for user {}: {:?}", outcome, user_id, updated);
        Ok(updated)
    }

    /// Looks up a single user. Unreadable storage is treated as empty.
    pub async fn get_record(&self, user_id: &str) -> Option<StatsRecord> {
        match self.load().await {
            Ok(stats) => stats.get(user_id).copied(),
            Err(e) => {
                warn!("Reading stats for {} failed, treating as empty: {}", user_id, e);
                None
            }
        }
    }
}

/// Pretty JSON with a four-space indent, keys in map order.
fn encode(stats: &StatsMap) -> Result<Vec<u8>, serde_json::Error> {
    let mut bytes = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut bytes, PrettyFormatter::with_indent(b"    "));
    stats.serialize(&mut serializer)?;
    Ok(bytes)
}
