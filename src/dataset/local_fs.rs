//! Local filesystem implementation of the dataset sink.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use super::DatasetSink;

/// Stores datasets as pretty-printed JSON files under a root directory.
pub struct LocalFsDatasetSink {
    root: PathBuf,
}

impl LocalFsDatasetSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

#[async_trait]
impl DatasetSink for LocalFsDatasetSink {
    async fn write(&self, folder: &str, name: &str, payload: &serde_json::Value) -> Result<()> {
        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create dataset directory {:?}", dir))?;

        let path = dir.join(format!("{}.json", name));
        let bytes =
            serde_json::to_vec_pretty(payload).context("Failed to serialize dataset payload")?;

        let mut file = tokio::fs::File::create(&path)
            .await
            .with_context(|| format!("Failed to create dataset file {:?}", path))?;
        file.write_all(&bytes)
            .await
            .with_context(|| format!("Failed to write dataset file {:?}", path))?;
        file.flush()
            .await
            .with_context(|| format!("Failed to flush dataset file {:?}", path))?;

        Ok(())
    }
}
