//! Fact snapshot persistence.
//!
//! Snapshots are what the persistence layer hands over: an ordered fact list
//! with relationship arrays already populated. They are stored as JSON, either
//! as a versioned [`FactSnapshot`] object or as a bare array of facts.

use crate::corpus::{Fact, FactContext, FactStore};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid snapshot format: expected an object or an array of facts")]
    InvalidFormat,

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Current snapshot file version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A saved fact list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactSnapshot {
    /// Snapshot format version for compatibility checking.
    pub version: u32,

    /// When the snapshot was created (seconds since the Unix epoch).
    pub saved_at: String,

    /// Summary information readable without loading every fact.
    pub metadata: SnapshotMetadata,

    /// Facts in display order.
    pub facts: Vec<Fact>,
}

/// Metadata about a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// Name of the corpus the facts belong to.
    #[serde(default)]
    pub corpus_name: String,

    /// Total number of facts.
    pub fact_count: usize,

    /// Facts per context: global, builder, knowledge.
    #[serde(default)]
    pub context_counts: [usize; 3],

    /// When the snapshot was created (duplicated from parent for peek access).
    #[serde(default)]
    pub saved_at: String,
}

impl SnapshotMetadata {
    /// Number of facts in a context.
    pub fn count(&self, context: FactContext) -> usize {
        self.context_counts[context_index(context)]
    }
}

impl FactSnapshot {
    /// Create a snapshot of the given facts.
    pub fn new(corpus_name: impl Into<String>, facts: Vec<Fact>) -> Self {
        let saved_at = unix_timestamp();
        let mut context_counts = [0; 3];
        for fact in &facts {
            context_counts[context_index(fact.context)] += 1;
        }

        let metadata = SnapshotMetadata {
            corpus_name: corpus_name.into(),
            fact_count: facts.len(),
            context_counts,
            saved_at: saved_at.clone(),
        };

        Self {
            version: SNAPSHOT_VERSION,
            saved_at,
            metadata,
            facts,
        }
    }

    /// Create a snapshot of everything in a store.
    pub fn from_store(corpus_name: impl Into<String>, store: &FactStore) -> Self {
        Self::new(corpus_name, store.facts().to_vec())
    }

    /// Load the snapshot's facts into a store.
    pub fn into_store(self) -> FactStore {
        FactStore::from_facts(self.facts)
    }

    /// Parse a snapshot from JSON.
    ///
    /// A bare array of facts is accepted and wrapped in an unnamed snapshot.
    pub fn from_json_str(content: &str) -> Result<Self, PersistError> {
        let value: serde_json::Value = serde_json::from_str(content)?;

        match value {
            serde_json::Value::Array(_) => {
                let facts: Vec<Fact> = serde_json::from_value(value)?;
                Ok(Self::new("", facts))
            }
            serde_json::Value::Object(_) => {
                let snapshot: Self = serde_json::from_value(value)?;
                if snapshot.version != SNAPSHOT_VERSION {
                    return Err(PersistError::VersionMismatch {
                        expected: SNAPSHOT_VERSION,
                        found: snapshot.version,
                    });
                }
                Ok(snapshot)
            }
            _ => Err(PersistError::InvalidFormat),
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save to a JSON file.
    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let content = self.to_json_string()?;
        fs::write(path.as_ref(), content).await?;
        tracing::info!(
            path = %path.as_ref().display(),
            facts = self.facts.len(),
            "saved fact snapshot"
        );
        Ok(())
    }

    /// Load from a JSON file.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let content = fs::read_to_string(path.as_ref()).await?;
        let snapshot = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.as_ref().display(),
            facts = snapshot.facts.len(),
            "loaded fact snapshot"
        );
        Ok(snapshot)
    }

    /// Read a snapshot's metadata without keeping its facts.
    pub async fn peek_metadata(path: impl AsRef<Path>) -> Result<SnapshotMetadata, PersistError> {
        let content = fs::read_to_string(path).await?;

        // Parse just enough to get metadata
        #[derive(Deserialize)]
        struct Partial {
            version: u32,
            metadata: SnapshotMetadata,
        }

        let partial: Partial = serde_json::from_str(&content)?;

        if partial.version != SNAPSHOT_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: SNAPSHOT_VERSION,
                found: partial.version,
            });
        }

        Ok(partial.metadata)
    }
}

/// Load the facts from a snapshot file or a bare fact array.
pub async fn load_facts(path: impl AsRef<Path>) -> Result<Vec<Fact>, PersistError> {
    Ok(FactSnapshot::load_json(path).await?.facts)
}

/// List all snapshot files in a directory, sorted by path.
pub async fn list_snapshots(dir: impl AsRef<Path>) -> Result<Vec<SnapshotInfo>, PersistError> {
    let mut snapshots = Vec::new();
    let mut entries = fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            match FactSnapshot::peek_metadata(&path).await {
                Ok(metadata) => snapshots.push(SnapshotInfo { path, metadata }),
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "skipping file");
                }
            }
        }
    }

    snapshots.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(snapshots)
}

/// Information about a snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotInfo {
    /// Path to the snapshot file.
    pub path: PathBuf,

    /// Snapshot metadata.
    pub metadata: SnapshotMetadata,
}

/// Create a snapshot file name for a corpus.
pub fn snapshot_path(base_dir: impl AsRef<Path>, corpus_name: &str) -> PathBuf {
    let sanitized = corpus_name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>();
    base_dir.as_ref().join(format!("{sanitized}_facts.json"))
}

fn context_index(context: FactContext) -> usize {
    match context {
        FactContext::Global => 0,
        FactContext::Builder => 1,
        FactContext::Knowledge => 2,
    }
}

/// Current time as seconds since the Unix epoch.
fn unix_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();

    format!("{}", now.as_secs())
}
