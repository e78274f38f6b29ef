use std::collections::HashMap;

use axum::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

/// User account record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub created_at: OffsetDateTime,
}

/// Account storage. Emails are stored trimmed and lowercased by the
/// handlers, so lookups are exact matches.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;

    async fn create(&self, email: &str, password_hash: &str) -> anyhow::Result<User>;
}

#[derive(Default)]
pub struct InMemoryUsers {
    users: RwLock<HashMap<Uuid, User>>,
}

#[async_trait]
impl UserRepo for InMemoryUsers {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn create(&self, email: &str, password_hash: &str) -> anyhow::Result<User> {
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.users.write().await.insert(user.id, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod repo_tests {
    use super::*;

    #[tokio::test]
    async fn create_and_find() {
        let repo = InMemoryUsers::default();
        let user = repo.create("fan@example.com", "hash").await.unwrap();
        assert!(!user.id.is_nil());

        let by_email = repo.find_by_email("fan@example.com").await.unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(user.id));

        let by_id = repo.find_by_id(user.id).await.unwrap();
        assert_eq!(by_id.map(|u| u.email), Some("fan@example.com".to_string()));
    }

    #[tokio::test]
    async fn find_unknown_returns_none() {
        let repo = InMemoryUsers::default();
        assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
        assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_emails_create_distinct_accounts() {
        // The repo itself does not enforce uniqueness; the register handler does.
        let repo = InMemoryUsers::default();
        let first = repo.create("fan@example.com", "h1").await.unwrap();
        let second = repo.create("fan@example.com", "h2").await.unwrap();
        assert_ne!(first.id, second.id);
    }
}
