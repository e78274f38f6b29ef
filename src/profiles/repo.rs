use std::collections::HashMap;

use axum::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A fan's preference profile, one per user. The upload fields hold opaque
/// artifact keys, resolved through the artifact store on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FanProfile {
    pub user_id: Uuid,
    pub name: String,
    pub favorite_games: Vec<String>,
    pub favorite_players: Vec<String>,
    pub favorite_streamers: Vec<String>,
    pub gender: Option<String>,
    pub social_links: Vec<String>,
    pub document_uploaded: Option<String>,
    pub profile_picture: Option<String>,
    pub updated_at: OffsetDateTime,
}

/// Keyed storage of one profile per user. `save` overwrites the whole record
/// at `user_id`; field validation happens before the store is reached.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn save(&self, profile: FanProfile) -> anyhow::Result<()>;

    async fn get(&self, user_id: Uuid) -> anyhow::Result<Option<FanProfile>>;

    async fn list(&self) -> anyhow::Result<Vec<FanProfile>>;
}

#[derive(Default)]
pub struct InMemoryProfiles {
    profiles: RwLock<HashMap<Uuid, FanProfile>>,
}

#[async_trait]
impl ProfileStore for InMemoryProfiles {
    async fn save(&self, profile: FanProfile) -> anyhow::Result<()> {
        self.profiles.write().await.insert(profile.user_id, profile);
        Ok(())
    }

    async fn get(&self, user_id: Uuid) -> anyhow::Result<Option<FanProfile>> {
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }

    async fn list(&self) -> anyhow::Result<Vec<FanProfile>> {
        Ok(self.profiles.read().await.values().cloned().collect())
    }
}

#[cfg(test)]
mod store_tests {
    use super::*;

    fn profile(user_id: Uuid, name: &str) -> FanProfile {
        FanProfile {
            user_id,
            name: name.into(),
            favorite_games: vec!["CS2".into()],
            favorite_players: vec!["FalleN".into()],
            favorite_streamers: vec![],
            gender: None,
            social_links: vec![],
            document_uploaded: None,
            profile_picture: None,
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[tokio::test]
    async fn save_then_get_roundtrip() {
        let store = InMemoryProfiles::default();
        let user_id = Uuid::new_v4();
        let saved = profile(user_id, "Ana");
        store.save(saved.clone()).await.unwrap();

        let fetched = store.get(user_id).await.unwrap();
        assert_eq!(fetched, Some(saved));
    }

    #[tokio::test]
    async fn save_overwrites_previous_record() {
        let store = InMemoryProfiles::default();
        let user_id = Uuid::new_v4();
        store.save(profile(user_id, "Ana")).await.unwrap();
        store.save(profile(user_id, "Bia")).await.unwrap();

        let fetched = store.get(user_id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Bia");
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn get_unknown_user_is_none() {
        let store = InMemoryProfiles::default();
        assert_eq!(store.get(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_returns_every_profile() {
        let store = InMemoryProfiles::default();
        store.save(profile(Uuid::new_v4(), "Ana")).await.unwrap();
        store.save(profile(Uuid::new_v4(), "Bia")).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 2);
    }
}
