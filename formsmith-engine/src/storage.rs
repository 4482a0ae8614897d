//! Persistence port for the form collection.
//!
//! The collection persists as one document: the store reads it whole
//! at open and writes it whole after every mutation. Backends only
//! move bytes; a missing or corrupt collection degrades to empty
//! instead of failing the open.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use ulid::Ulid;

use crate::error::Result;
use crate::types::FormDefinition;

/// Storage backend for the form collection.
#[async_trait]
pub trait FormStorage: Send + Sync {
    /// Load every persisted form, in stored order.
    async fn load(&self) -> Result<Vec<FormDefinition>>;

    /// Replace the persisted collection.
    async fn save(&self, forms: &[FormDefinition]) -> Result<()>;
}

/// In-memory backend for tests and embedding.
///
/// Saves can be switched to fail so callers can exercise the store's
/// absorb-and-log path for persistence errors.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    forms: Mutex<Vec<FormDefinition>>,
    fail_saves: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent save fail with an IO error.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of what has been persisted so far.
    pub async fn saved(&self) -> Vec<FormDefinition> {
        self.forms.lock().await.clone()
    }

    /// Seed persisted state directly, as if a previous run wrote it.
    pub async fn seed(&self, forms: Vec<FormDefinition>) {
        *self.forms.lock().await = forms;
    }
}

#[async_trait]
impl FormStorage for MemoryStorage {
    async fn load(&self) -> Result<Vec<FormDefinition>> {
        Ok(self.forms.lock().await.clone())
    }

    async fn save(&self, forms: &[FormDefinition]) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(std::io::Error::other("simulated storage failure").into());
        }
        *self.forms.lock().await = forms.to_vec();
        Ok(())
    }
}

/// Single-file JSON backend. The whole collection lives in one file;
/// writes go to a temp sibling and rename into place.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FormStorage for JsonFileStorage {
    async fn load(&self) -> Result<Vec<FormDefinition>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = ?self.path, "no persisted forms, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&content) {
            Ok(forms) => Ok(forms),
            Err(e) => {
                tracing::warn!(path = ?self.path, %e, "corrupt form collection, starting empty");
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, forms: &[FormDefinition]) -> Result<()> {
        let json = serde_json::to_string_pretty(forms)?;
        atomic_write(&self.path, json.as_bytes()).await
    }
}

/// Write to a temp file then rename for atomic persistence.
async fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "no parent dir"))?;
    fs::create_dir_all(dir).await?;
    let tmp = dir.join(format!(".tmp_{}", Ulid::new()));
    fs::write(&tmp, data).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}
