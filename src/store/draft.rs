//! File-backed draft persistence.
//!
//! One JSON file holds every user's in-progress wizard draft, keyed by user
//! id. The file is read once at startup and rewritten in full on each save
//! or clear (last-write-wins, no conflict detection). A corrupt file is
//! tolerated: the store starts empty and logs a warning.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::draft::RecordDraft;

#[derive(Clone)]
pub struct DraftStore {
    path: PathBuf,
    drafts: Arc<RwLock<HashMap<Uuid, RecordDraft>>>,
}

impl DraftStore {
    /// Loads the draft file, if any. Called once at process start.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let drafts = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<Uuid, RecordDraft>>(&raw) {
                Ok(drafts) => drafts,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Corrupt draft file, starting empty");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Could not read draft file, starting empty");
                HashMap::new()
            }
        };
        Self {
            path,
            drafts: Arc::new(RwLock::new(drafts)),
        }
    }

    pub async fn get(&self, user_id: Uuid) -> Option<RecordDraft> {
        self.drafts.read().await.get(&user_id).cloned()
    }

    pub async fn save(&self, user_id: Uuid, draft: RecordDraft) -> AppResult<()> {
        let mut drafts = self.drafts.write().await;
        drafts.insert(user_id, draft);
        self.persist(&drafts).await
    }

    pub async fn clear(&self, user_id: Uuid) -> AppResult<()> {
        let mut drafts = self.drafts.write().await;
        if drafts.remove(&user_id).is_some() {
            self.persist(&drafts).await?;
        }
        Ok(())
    }

    async fn persist(&self, drafts: &HashMap<Uuid, RecordDraft>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let raw = serde_json::to_string_pretty(drafts)
            .map_err(|e| anyhow::anyhow!("Failed to serialize drafts: {}", e))?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}
