use crate::domain::model::{AuthUser, Profile, ProfileUpdate};
use crate::domain::ports::ProfileBackend;
use crate::utils::error::{Result, StudyBuddyError};
use chrono::Utc;
use std::sync::Arc;

pub const PHOTO_BUCKET: &str = "profilePhotos";

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str> {
    header
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| StudyBuddyError::unauthorized("Not Authorized"))
}

/// Profile operations on behalf of the holder of an access token.
#[derive(Clone)]
pub struct ProfileService {
    backend: Arc<dyn ProfileBackend>,
}

impl ProfileService {
    pub fn new(backend: Arc<dyn ProfileBackend>) -> Self {
        Self { backend }
    }

    async fn user(&self, access_token: &str) -> Result<AuthUser> {
        let user = self.backend.authenticate(access_token).await?;
        tracing::debug!(user_id = %user.id, "Access token verified");
        Ok(user)
    }

    pub async fn save(&self, access_token: &str, update: ProfileUpdate) -> Result<Profile> {
        let user = self.user(access_token).await?;
        let profile = Profile::from_update(&user.id, update, Utc::now());
        let saved = self.backend.upsert_profile(access_token, &profile).await?;
        tracing::info!(user_id = %user.id, "Profile saved");
        Ok(saved)
    }

    pub async fn load(&self, access_token: &str) -> Result<Profile> {
        let user = self.user(access_token).await?;
        self.backend.get_profile(access_token, &user.id).await
    }

    pub async fn photo_url(&self, access_token: &str) -> Result<String> {
        let user = self.user(access_token).await?;
        let path = self
            .backend
            .photo_path(access_token, &user.id)
            .await?
            .ok_or_else(|| StudyBuddyError::not_found("No profile photo uploaded"))?;
        Ok(self.backend.public_url(PHOTO_BUCKET, &path))
    }
}
