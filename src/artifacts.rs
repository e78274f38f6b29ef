use std::collections::HashMap;

use axum::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Registry for uploaded artifacts. Keys are opaque references stored inside
/// a profile; the registry itself does not know which profile holds a key,
/// and entries are never deleted.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Register an uploaded document and return its key. Only the original
    /// file name is retained.
    async fn register_document(&self, user_id: Uuid, file_name: &str) -> anyhow::Result<String>;

    /// Register a profile picture data URL and return its key.
    async fn register_picture(&self, user_id: Uuid, data_url: &str) -> anyhow::Result<String>;

    async fn document_name(&self, key: &str) -> anyhow::Result<Option<String>>;

    async fn picture_url(&self, key: &str) -> anyhow::Result<Option<String>>;
}

#[derive(Default)]
pub struct InMemoryArtifacts {
    uploads: RwLock<HashMap<String, String>>,
}

// Key layout: "<kind>-<user id>-<random uuid>".
fn artifact_key(kind: &str, user_id: Uuid) -> String {
    format!("{}-{}-{}", kind, user_id, Uuid::new_v4())
}

#[async_trait]
impl ArtifactStore for InMemoryArtifacts {
    async fn register_document(&self, user_id: Uuid, file_name: &str) -> anyhow::Result<String> {
        let key = artifact_key("document", user_id);
        self.uploads
            .write()
            .await
            .insert(key.clone(), file_name.to_string());
        Ok(key)
    }

    async fn register_picture(&self, user_id: Uuid, data_url: &str) -> anyhow::Result<String> {
        let key = artifact_key("profile", user_id);
        self.uploads
            .write()
            .await
            .insert(key.clone(), data_url.to_string());
        Ok(key)
    }

    async fn document_name(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.uploads.read().await.get(key).cloned())
    }

    async fn picture_url(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.uploads.read().await.get(key).cloned())
    }
}
