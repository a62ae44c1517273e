use crate::adapters::error_message;
use crate::domain::model::{AuthUser, Profile};
use crate::domain::ports::{ConfigProvider, ProfileBackend};
use crate::utils::error::{Result, StudyBuddyError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const PROFILE_TABLE: &str = "profile";
const PROFILE_COLUMNS: &str = "name,target,class,strengths,weakness";
/// PostgREST returns a bare object instead of a one-element array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Talks to the auth, REST and storage APIs of a Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

#[derive(Deserialize)]
struct PhotoRow {
    #[serde(rename = "pfpUrl")]
    pfp_url: Option<String>,
}

impl SupabaseClient {
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.supabase_url(),
            config.supabase_anon_key(),
            Duration::from_secs(config.supabase_timeout_seconds()),
        )
    }

    fn request(&self, builder: RequestBuilder, access_token: &str) -> RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, PROFILE_TABLE)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| status.to_string());
        tracing::warn!(status = status.as_u16(), %message, "Supabase request failed");
        Err(StudyBuddyError::BackendError {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ProfileBackend for SupabaseClient {
    async fn authenticate(&self, access_token: &str) -> Result<AuthUser> {
        let url = format!("{}/auth/v1/user", self.base_url);
        let response = self
            .request(self.client.get(url), access_token)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(StudyBuddyError::unauthorized("Not Authorized"))
            }
            _ => Self::read_json(response).await,
        }
    }

    async fn upsert_profile(&self, access_token: &str, profile: &Profile) -> Result<Profile> {
        tracing::debug!(user_id = ?profile.user_id, "Upserting profile");
        let response = self
            .request(self.client.post(self.table_url()), access_token)
            .query(&[("on_conflict", "user_id")])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .header("Accept", SINGLE_OBJECT)
            .json(profile)
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn get_profile(&self, access_token: &str, user_id: &str) -> Result<Profile> {
        let user_filter = format!("eq.{}", user_id);
        let response = self
            .request(self.client.get(self.table_url()), access_token)
            .query(&[("select", PROFILE_COLUMNS), ("user_id", user_filter.as_str())])
            .header("Accept", SINGLE_OBJECT)
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn photo_path(&self, access_token: &str, user_id: &str) -> Result<Option<String>> {
        let user_filter = format!("eq.{}", user_id);
        let response = self
            .request(self.client.get(self.table_url()), access_token)
            .query(&[("select", "pfpUrl"), ("user_id", user_filter.as_str())])
            .header("Accept", SINGLE_OBJECT)
            .send()
            .await?;

        let row: PhotoRow = Self::read_json(response).await?;
        Ok(row.pfp_url.filter(|path| !path.is_empty()))
    }

    /// Each path segment is percent-encoded; `/` keeps separating folders.
    fn public_url(&self, bucket: &str, path: &str) -> String {
        let segments = ["storage", "v1", "object", "public", bucket]
            .into_iter()
            .chain(path.split('/').filter(|segment| !segment.is_empty()));

        let Ok(mut url) = Url::parse(&self.base_url) else {
            return format!(
                "{}/storage/v1/object/public/{}/{}",
                self.base_url,
                bucket,
                path.trim_start_matches('/')
            );
        };
        if let Ok(mut path_segments) = url.path_segments_mut() {
            path_segments.pop_if_empty().extend(segments);
        }
        url.to_string()
    }
}
