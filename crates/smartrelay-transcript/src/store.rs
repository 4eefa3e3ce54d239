use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use smartrelay_schema::{ConversationLog, ConversationStore};
use tokio::fs;
use tokio::sync::Mutex;

/// Single JSON document holding every [`ConversationLog`].
///
/// `append` is a read-modify-write of the whole file. Appends made through
/// one `TranscriptStore` are serialized; writers in other processes (or other
/// `TranscriptStore` values on the same path) are not, and can lose updates.
pub struct TranscriptStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TranscriptStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Read the whole store. A missing file is an empty store, and so is a
    /// file that no longer parses. See [`TranscriptStore::append`] for what
    /// happens to an unreadable file.
    pub async fn load(&self) -> Result<ConversationStore> {
        Ok(self.read().await?.0)
    }

    /// Append one log and rewrite the store. Returns the new total.
    ///
    /// An unreadable store is copied to `<name>.corrupt` before it is
    /// replaced by a store holding only this log.
    pub async fn append(&self, log: ConversationLog) -> Result<usize> {
        let _guard = self.write_lock.lock().await;

        let (mut store, unreadable) = self.read().await?;
        if unreadable {
            self.back_up_unreadable().await?;
        }
        store.conversations.push(log);
        self.write(&store).await?;

        let total = store.conversations.len();
        tracing::info!("conversation saved, total conversations: {total}");
        Ok(total)
    }

    async fn read(&self) -> Result<(ConversationStore, bool)> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok((ConversationStore::default(), false))
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to read transcript store: {}", self.path.display())
                })
            }
        };

        match serde_json::from_str(&content) {
            Ok(store) => Ok((store, false)),
            Err(err) => {
                tracing::warn!(
                    "transcript store {} is unreadable ({err}), treating it as empty",
                    self.path.display()
                );
                Ok((ConversationStore::default(), true))
            }
        }
    }

    fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    async fn back_up_unreadable(&self) -> Result<()> {
        let backup = self.backup_path();
        fs::copy(&self.path, &backup).await.with_context(|| {
            format!("failed to back up transcript store to {}", backup.display())
        })?;
        tracing::warn!(
            "unreadable transcript store {} copied to {}",
            self.path.display(),
            backup.display()
        );
        Ok(())
    }

    async fn write(&self, store: &ConversationStore) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("failed to create transcript dir: {}", parent.display())
            })?;
        }

        let body = serde_json::to_string_pretty(store)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body)
            .await
            .with_context(|| format!("failed to write transcript store: {}", tmp.display()))?;
        fs::rename(&tmp, &self.path).await.with_context(|| {
            format!("failed to replace transcript store: {}", self.path.display())
        })?;
        Ok(())
    }
}
