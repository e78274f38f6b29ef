use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::auth::services::AuthUser;
use crate::profiles::dto::{ProfileResponse, SaveProfileRequest, UploadResponse};
use crate::profiles::repo::FanProfile;
use crate::profiles::services::{self, ProfileError};
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/profiles", get(list_profiles))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", put(put_profile))
        .route("/profile/document", post(upload_document))
        .route("/profile/picture", post(upload_picture))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let profile = services::fetch_profile(&state, auth.user_id)
        .await
        .map_err(internal)?;
    let Some(profile) = profile else {
        return Err((StatusCode::NOT_FOUND, "Profile not found".into()));
    };

    let document_name = match &profile.document_uploaded {
        Some(key) => Some(
            services::document_display_name(&state, key)
                .await
                .map_err(internal)?,
        ),
        None => None,
    };
    let profile_picture_url = match &profile.profile_picture {
        Some(key) => Some(
            services::picture_display_url(&state, key)
                .await
                .map_err(internal)?,
        ),
        None => None,
    };

    Ok(Json(ProfileResponse {
        profile,
        document_name,
        profile_picture_url,
    }))
}

#[instrument(skip(state))]
pub async fn list_profiles(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<FanProfile>>, (StatusCode, String)> {
    let profiles = services::all_profiles(&state).await.map_err(internal)?;
    Ok(Json(profiles))
}

#[instrument(skip(state, payload))]
pub async fn put_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<SaveProfileRequest>,
) -> Result<Json<FanProfile>, (StatusCode, String)> {
    match services::save_profile(&state, auth.user_id, payload).await {
        Ok(saved) => {
            info!(user_id = %auth.user_id, "profile saved");
            Ok(Json(saved))
        }
        Err(e @ (ProfileError::NameRequired | ProfileError::UnknownGame(_))) => {
            warn!(user_id = %auth.user_id, error = %e, "profile rejected");
            Err((StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(ProfileError::Internal(e)) => {
            error!(error = %e, user_id = %auth.user_id, "save_profile failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

/// POST /profile/document (multipart, field `file`)
#[instrument(skip(state, mp))]
pub async fn upload_document(
    State(state): State<AppState>,
    auth: AuthUser,
    mut mp: Multipart,
) -> Result<Json<UploadResponse>, (StatusCode, String)> {
    while let Ok(Some(field)) = mp.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "document".into());
        let data = field.bytes().await.map_err(bad_request)?;

        let key = services::upload_document(&state, auth.user_id, &file_name, data)
            .await
            .map_err(internal)?;
        return Ok(Json(UploadResponse { key }));
    }

    Err((StatusCode::BAD_REQUEST, "file is required".into()))
}

/// POST /profile/picture (multipart, field `file`)
#[instrument(skip(state, mp))]
pub async fn upload_picture(
    State(state): State<AppState>,
    auth: AuthUser,
    mut mp: Multipart,
) -> Result<Json<UploadResponse>, (StatusCode, String)> {
    while let Ok(Some(field)) = mp.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".into());
        let data = field.bytes().await.map_err(bad_request)?;

        let key = services::upload_picture(&state, auth.user_id, &content_type, data)
            .await
            .map_err(internal)?;
        return Ok(Json(UploadResponse { key }));
    }

    Err((StatusCode::BAD_REQUEST, "file is required".into()))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

fn bad_request<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, e.to_string())
}

#[cfg(test)]
mod handler_tests {
    use super::*;
    use bytes::Bytes;
    use uuid::Uuid;

    fn fan(user_id: Uuid) -> AuthUser {
        AuthUser {
            user_id,
            session_id: Uuid::new_v4(),
        }
    }

    fn save_request() -> SaveProfileRequest {
        SaveProfileRequest {
            name: "Ana".into(),
            favorite_games: vec!["CS2".into()],
            favorite_players: vec!["FalleN".into()],
            favorite_streamers: vec![],
            gender: Some("feminino".into()),
            social_links: vec!["https://twitter.com/fan".into(), "".into()],
            document_uploaded: None,
            profile_picture: None,
        }
    }

    #[tokio::test]
    async fn get_before_save_is_not_found() {
        let state = AppState::fake();
        let err = get_profile(State(state), fan(Uuid::new_v4())).await.unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn put_then_get_resolves_artifacts() {
        let state = AppState::fake();
        let user_id = Uuid::new_v4();

        let doc_key =
            services::upload_document(&state, user_id, "rg.pdf", Bytes::from_static(b"%PDF"))
                .await
                .unwrap();
        let pic_key =
            services::upload_picture(&state, user_id, "image/png", Bytes::from_static(b"png"))
                .await
                .unwrap();

        let mut payload = save_request();
        payload.document_uploaded = Some(doc_key);
        payload.profile_picture = Some(pic_key);
        put_profile(State(state.clone()), fan(user_id), Json(payload))
            .await
            .expect("save should succeed");

        let res = get_profile(State(state), fan(user_id))
            .await
            .expect("profile should exist");
        assert_eq!(res.0.profile.name, "Ana");
        assert_eq!(res.0.profile.social_links.len(), 1);
        assert_eq!(res.0.document_name.as_deref(), Some("rg.pdf"));
        assert_eq!(
            res.0.profile_picture_url.as_deref(),
            Some("data:image/png;base64,cG5n")
        );
    }

    #[tokio::test]
    async fn put_rejects_game_outside_catalog() {
        let state = AppState::fake();
        let mut payload = save_request();
        payload.favorite_games.push("Chess".into());
        let err = put_profile(State(state), fan(Uuid::new_v4()), Json(payload))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_profiles_sees_saves_from_all_users() {
        let state = AppState::fake();
        put_profile(State(state.clone()), fan(Uuid::new_v4()), Json(save_request()))
            .await
            .unwrap();
        put_profile(State(state.clone()), fan(Uuid::new_v4()), Json(save_request()))
            .await
            .unwrap();

        let res = list_profiles(State(state), fan(Uuid::new_v4())).await.unwrap();
        assert_eq!(res.0.len(), 2);
    }
}
