//! Snapshot-backed platform reader.
//!
//! Serves platform lookups from a JSON snapshot of buckets, labels and label
//! mappings, for offline dry runs and tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

use crate::error::{PlatformError, Result};

use super::reader::PlatformReader;
use super::types::{LabelMapping, PlatformBucket, PlatformId, PlatformLabel, ResourceType};

/// Serialized form of a platform snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformSnapshot {
    /// Buckets on the platform.
    #[serde(default)]
    pub buckets: Vec<PlatformBucket>,
    /// Labels on the platform.
    #[serde(default)]
    pub labels: Vec<PlatformLabel>,
    /// Label mappings on the platform.
    #[serde(default)]
    pub mappings: Vec<LabelMapping>,
}

/// In-memory platform reader.
#[derive(Debug, Default)]
pub struct SnapshotPlatform {
    /// The snapshot being served.
    snapshot: PlatformSnapshot,
}

impl SnapshotPlatform {
    /// Creates a reader over an already-built snapshot.
    #[must_use]
    pub const fn new(snapshot: PlatformSnapshot) -> Self {
        Self { snapshot }
    }

    /// Loads a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading platform snapshot from: {}", path.display());

        let content = fs::read_to_string(path).await.map_err(|e| PlatformError::SnapshotLoad {
            path: path.to_path_buf(),
            message: format!("Failed to read file: {e}"),
        })?;

        let snapshot: PlatformSnapshot =
            serde_json::from_str(&content).map_err(|e| PlatformError::SnapshotLoad {
                path: path.to_path_buf(),
                message: format!("JSON parse error: {e}"),
            })?;

        debug!(
            "Snapshot holds {} buckets, {} labels, {} mappings",
            snapshot.buckets.len(),
            snapshot.labels.len(),
            snapshot.mappings.len()
        );
        Ok(Self::new(snapshot))
    }

    /// Returns the snapshot being served.
    #[must_use]
    pub const fn snapshot(&self) -> &PlatformSnapshot {
        &self.snapshot
    }
}

#[async_trait]
impl PlatformReader for SnapshotPlatform {
    async fn find_bucket(&self, org_id: PlatformId, name: &str) -> Result<Option<PlatformBucket>> {
        Ok(self
            .snapshot
            .buckets
            .iter()
            .find(|b| b.org_id == org_id && b.name == name)
            .cloned())
    }

    async fn find_label(&self, org_id: PlatformId, name: &str) -> Result<Option<PlatformLabel>> {
        Ok(self
            .snapshot
            .labels
            .iter()
            .find(|l| l.org_id == org_id && l.name == name)
            .cloned())
    }

    async fn find_resource_labels(
        &self,
        resource_type: ResourceType,
        resource_id: PlatformId,
    ) -> Result<Vec<PlatformLabel>> {
        let labels = self
            .snapshot
            .mappings
            .iter()
            .filter(|m| m.resource_type == resource_type && m.resource_id == resource_id)
            .filter_map(|m| self.snapshot.labels.iter().find(|l| l.id == m.label_id))
            .cloned()
            .collect();
        Ok(labels)
    }

    fn backend_type(&self) -> &'static str {
        "snapshot"
    }
}
