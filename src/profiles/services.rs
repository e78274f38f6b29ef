use base64ct::{Base64, Encoding};
use bytes::Bytes;
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::profiles::dto::SaveProfileRequest;
use crate::profiles::repo::FanProfile;
use crate::state::AppState;

/// Games a fan can mark as favorites. Anything outside this catalog is
/// rejected before the profile reaches the store.
pub const GAME_CATALOG: &[&str] = &[
    "CS2",
    "PUBG Mobile",
    "LoL",
    "R6",
    "Rocket League",
    "Valorant",
    "Apex",
    "Automobilismo",
];

/// Shown when a profile references a document key the registry does not know.
pub const DOCUMENT_NOT_FOUND: &str = "document not found";

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Name is required")]
    NameRequired,
    #[error("Unknown game: {0}")]
    UnknownGame(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Append `value` unless an equal entry is already present. Returns whether
/// the list changed.
pub fn push_unique(tags: &mut Vec<String>, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || tags.iter().any(|t| t == value) {
        return false;
    }
    tags.push(value.to_string());
    true
}

fn dedup_tags(values: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(values.len());
    for value in values {
        push_unique(&mut out, &value);
    }
    out
}

/// Normalize and persist the profile for `user_id`, replacing any previous
/// record wholesale. Upload fields must already hold artifact keys; there is
/// no transaction spanning upload and save, so a key the client never saves
/// stays orphaned in the registry.
pub async fn save_profile(
    st: &AppState,
    user_id: Uuid,
    req: SaveProfileRequest,
) -> Result<FanProfile, ProfileError> {
    if req.name.trim().is_empty() {
        return Err(ProfileError::NameRequired);
    }

    let favorite_games = dedup_tags(req.favorite_games);
    if let Some(game) = favorite_games
        .iter()
        .find(|g| !GAME_CATALOG.contains(&g.as_str()))
    {
        return Err(ProfileError::UnknownGame(game.clone()));
    }

    let profile = FanProfile {
        user_id,
        name: req.name.trim().to_string(),
        favorite_games,
        favorite_players: dedup_tags(req.favorite_players),
        favorite_streamers: dedup_tags(req.favorite_streamers),
        gender: req.gender.filter(|g| !g.trim().is_empty()),
        social_links: req
            .social_links
            .into_iter()
            .map(|link| link.trim().to_string())
            .filter(|link| !link.is_empty())
            .collect(),
        document_uploaded: req.document_uploaded,
        profile_picture: req.profile_picture,
        updated_at: OffsetDateTime::now_utc(),
    };

    st.profiles.save(profile.clone()).await?;
    debug!(user_id = %user_id, "profile saved");
    Ok(profile)
}

pub async fn fetch_profile(st: &AppState, user_id: Uuid) -> anyhow::Result<Option<FanProfile>> {
    st.profiles.get(user_id).await
}

pub async fn all_profiles(st: &AppState) -> anyhow::Result<Vec<FanProfile>> {
    st.profiles.list().await
}

/// Register an uploaded document. The content is read only to complete the
/// upload; the registry keeps just the original file name.
pub async fn upload_document(
    st: &AppState,
    user_id: Uuid,
    file_name: &str,
    body: Bytes,
) -> anyhow::Result<String> {
    let size = body.len();
    let key = st.artifacts.register_document(user_id, file_name).await?;
    debug!(user_id = %user_id, key = %key, size, "document registered");
    Ok(key)
}

/// Register a profile picture: the bytes are kept in full, encoded as a
/// base64 data URL.
pub async fn upload_picture(
    st: &AppState,
    user_id: Uuid,
    content_type: &str,
    body: Bytes,
) -> anyhow::Result<String> {
    let data_url = to_data_url(content_type, &body);
    let key = st.artifacts.register_picture(user_id, &data_url).await?;
    debug!(user_id = %user_id, key = %key, "profile picture registered");
    Ok(key)
}

fn to_data_url(content_type: &str, body: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, Base64::encode_string(body))
}

pub async fn document_display_name(st: &AppState, key: &str) -> anyhow::Result<String> {
    Ok(st
        .artifacts
        .document_name(key)
        .await?
        .unwrap_or_else(|| DOCUMENT_NOT_FOUND.to_string()))
}

pub async fn picture_display_url(st: &AppState, key: &str) -> anyhow::Result<String> {
    Ok(st.artifacts.picture_url(key).await?.unwrap_or_default())
}
