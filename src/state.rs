use std::sync::Arc;

use crate::artifacts::{ArtifactStore, InMemoryArtifacts};
use crate::auth::repo::{InMemoryUsers, UserRepo};
use crate::auth::sessions::SessionStore;
use crate::config::AppConfig;
use crate::profiles::repo::{InMemoryProfiles, ProfileStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepo>,
    pub sessions: SessionStore,
    pub profiles: Arc<dyn ProfileStore>,
    pub artifacts: Arc<dyn ArtifactStore>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        Ok(Self::from_parts(config))
    }

    /// Wire the in-memory stores. All state lives for the process lifetime;
    /// a durable deployment swaps these for database-backed implementations.
    pub fn from_parts(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            users: Arc::new(InMemoryUsers::default()),
            sessions: SessionStore::default(),
            profiles: Arc::new(InMemoryProfiles::default()),
            artifacts: Arc::new(InMemoryArtifacts::default()),
        }
    }

    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            jwt: crate::config::JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
                refresh_ttl_minutes: 60,
            },
        });
        Self::from_parts(config)
    }
}
