use serde::{Deserialize, Serialize};

use crate::profiles::repo::FanProfile;

/// PUT /profile body. The user id always comes from the access token, never
/// from the client. Upload fields carry keys returned by the upload routes.
#[derive(Debug, Deserialize)]
pub struct SaveProfileRequest {
    pub name: String,
    #[serde(default)]
    pub favorite_games: Vec<String>,
    #[serde(default)]
    pub favorite_players: Vec<String>,
    #[serde(default)]
    pub favorite_streamers: Vec<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub social_links: Vec<String>,
    #[serde(default)]
    pub document_uploaded: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

/// GET /profile response: the stored record plus the resolved artifact
/// values the dashboard renders.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: FanProfile,
    pub document_name: Option<String>,
    pub profile_picture_url: Option<String>,
}

/// Response for the document/picture upload routes: the artifact key the
/// client stores back into its profile.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub key: String,
}
