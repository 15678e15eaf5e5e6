//! Where ledger state comes from.

use anyhow::{Context, Result};
use async_trait::async_trait;
use clmm_positions_engine::prelude::LedgerSnapshot;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supplies a fresh ledger snapshot for every command.
#[async_trait]
pub trait SnapshotLoader {
    async fn load(&self) -> Result<LedgerSnapshot>;
}

/// Reads a snapshot serialized as JSON from a file.
#[derive(Debug, Clone)]
pub struct JsonSnapshotLoader {
    path: PathBuf,
}

impl JsonSnapshotLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotLoader for JsonSnapshotLoader {
    async fn load(&self) -> Result<LedgerSnapshot> {
        debug!(path = %self.path.display(), "Reading snapshot");
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read snapshot {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse snapshot {}", self.path.display()))
    }
}
