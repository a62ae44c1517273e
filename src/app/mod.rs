//! HTTP surface: shared state, routes and the JSON error mapping.

pub mod error;
pub mod handlers;

use crate::core::{NotificationStore, ProfileService, QuizStore, StudyAssistant};
use crate::domain::ports::{LlmClient, ProfileBackend};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiJson;

#[derive(Clone)]
pub struct AppState {
    pub assistant: StudyAssistant,
    pub profiles: ProfileService,
    pub quizzes: QuizStore,
    pub notifications: NotificationStore,
}

impl AppState {
    pub fn new(llm: Arc<dyn LlmClient>, backend: Arc<dyn ProfileBackend>) -> Self {
        Self {
            assistant: StudyAssistant::new(llm),
            profiles: ProfileService::new(backend),
            quizzes: QuizStore::new(),
            notifications: NotificationStore::new(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        // LLM-backed
        .route("/api/generate-study-plan", post(handlers::generate_study_plan))
        .route("/api/solve-doubt", post(handlers::solve_doubt))
        .route("/api/summarize-notes", post(handlers::summarize_notes))
        .route("/api/extract-key-concepts", post(handlers::extract_key_concepts))
        .route("/api/generate-quiz", post(handlers::generate_quiz))
        // In-memory stores
        .route("/api/quiz", post(handlers::quiz_action))
        .route(
            "/api/send-notification",
            post(handlers::send_notification)
                .get(handlers::list_notifications)
                .put(handlers::update_notification),
        )
        .route("/api/contact", post(handlers::contact))
        // Supabase
        .route(
            "/api/profile-info",
            get(handlers::get_profile).post(handlers::save_profile),
        )
        .route("/api/profile-photo", get(handlers::profile_photo))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
