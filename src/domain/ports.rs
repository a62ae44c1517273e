use crate::domain::model::{AuthUser, Profile};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Sampling parameters forwarded to the completion API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 2000,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

impl GenerationOptions {
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
            ..Self::default()
        }
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String>;
}

/// Auth, table and storage operations of the hosted backend. Calls carry the
/// caller's access token so row-level security applies on the backend side.
#[async_trait]
pub trait ProfileBackend: Send + Sync {
    async fn authenticate(&self, access_token: &str) -> Result<AuthUser>;

    async fn upsert_profile(&self, access_token: &str, profile: &Profile) -> Result<Profile>;

    async fn get_profile(&self, access_token: &str, user_id: &str) -> Result<Profile>;

    /// Storage path of the user's profile photo, if one was recorded.
    async fn photo_path(&self, access_token: &str, user_id: &str) -> Result<Option<String>>;

    fn public_url(&self, bucket: &str, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn groq_api_key(&self) -> &str;
    fn groq_base_url(&self) -> &str;
    fn groq_model(&self) -> &str;
    fn groq_timeout_seconds(&self) -> u64;
    fn supabase_url(&self) -> &str;
    fn supabase_anon_key(&self) -> &str;
    fn supabase_timeout_seconds(&self) -> u64;
}
