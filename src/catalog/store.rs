//! JSON-file-backed record collection.
//!
//! Each collection lives in one pretty-printed JSON array file. Reads never
//! fail: a missing, unreadable or malformed file is logged and read as an
//! empty list. Writes replace the whole file.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

pub const MODULES_FILE: &str = "modules.json";
pub const INSTRUCTIONS_FILE: &str = "instructions.json";

pub struct JsonFileStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Opens the store at `path`, creating parent directories and an empty
    /// `[]` file when none exists yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("creating data dir {}", parent.display()))?;
            }
        }

        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tokio::fs::write(&path, "[]")
                .await
                .with_context(|| format!("creating {}", path.display()))?;
            tracing::info!("Created empty data file {}", path.display());
        }

        Ok(Self {
            path,
            _marker: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Vec<T> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("Failed to read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        if raw.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::error!("Failed to parse {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    pub async fn save(&self, items: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(items)?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("writing {}", self.path.display()))?;

        tracing::debug!("Wrote {} records to {}", items.len(), self.path.display());
        Ok(())
    }
}
