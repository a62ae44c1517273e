use crate::app::{ApiJson, AppState};
use crate::core::contact::{self, ACKNOWLEDGEMENT};
use crate::core::profile::bearer_token;
use crate::domain::model::{
    ContactRequest, DoubtRequest, GenerateQuizRequest, GeneratedQuiz, NotesRequest,
    NotificationKind, NotificationRequest, NotificationUpdate, ProfileUpdate, QuizActionRequest,
    StudyPlanRequest,
};
use crate::utils::error::{Result, StudyBuddyError};
use crate::utils::validation::{require_field, require_text};
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

fn authorization(headers: &HeaderMap) -> Result<&str> {
    bearer_token(headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn generate_study_plan(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<StudyPlanRequest>,
) -> Result<Json<Value>> {
    let generated = state.assistant.study_plan(&request).await?;
    Ok(Json(json!({
        "success": true,
        "plan": generated.markdown,
        "generalInfo": generated.plan.general_info,
        "dailyRoutines": generated.plan.daily_routines,
    })))
}

pub async fn solve_doubt(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<DoubtRequest>,
) -> Result<Json<Value>> {
    let answer = state.assistant.solve_doubt(&request).await?;
    Ok(Json(json!({ "success": true, "answer": answer })))
}

pub async fn summarize_notes(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<NotesRequest>,
) -> Result<Json<Value>> {
    let summary = state.assistant.summarize_notes(&request).await?;
    Ok(Json(json!({ "success": true, "summary": summary })))
}

pub async fn extract_key_concepts(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<NotesRequest>,
) -> Result<Json<Value>> {
    let concepts = state.assistant.extract_key_concepts(&request).await?;
    Ok(Json(json!({ "success": true, "concepts": concepts })))
}

pub async fn generate_quiz(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GenerateQuizRequest>,
) -> Result<Json<GeneratedQuiz>> {
    Ok(Json(state.assistant.generate_quiz(&request).await?))
}

/// Single endpoint for the quiz lifecycle, dispatched on `action`.
pub async fn quiz_action(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<QuizActionRequest>,
) -> Result<Response> {
    let action = request.action.as_deref().map(str::trim).unwrap_or_default();
    if !matches!(action, "create" | "submit" | "get" | "list") {
        return Err(StudyBuddyError::validation("Invalid action"));
    }
    let user_id = require_text("User id", &request.user_id)?;

    let response = match action {
        "create" => {
            let day = *require_field("Day", &request.day)?;
            let questions = request.questions.clone().unwrap_or_default();
            let quiz = state.quizzes.create(user_id, day, questions).await;
            (StatusCode::CREATED, Json(json!({ "success": true, "quiz": quiz }))).into_response()
        }
        "submit" => {
            let quiz_id = require_text("Quiz id", &request.quiz_id)?;
            let answers = request.answers.as_deref().unwrap_or(&[]);
            let quiz = state.quizzes.submit(quiz_id, user_id, answers).await?;
            Json(json!({ "success": true, "score": quiz.score, "quiz": quiz })).into_response()
        }
        "get" => {
            let quiz_id = require_text("Quiz id", &request.quiz_id)?;
            let quiz = state.quizzes.get(quiz_id, user_id).await?;
            Json(json!({ "success": true, "quiz": quiz })).into_response()
        }
        _ => {
            let quizzes = state.quizzes.list(user_id).await;
            Json(json!({ "success": true, "quizzes": quizzes })).into_response()
        }
    };
    Ok(response)
}

pub async fn send_notification(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<NotificationRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let kind = require_text("Type", &request.kind)?;
    let kind = NotificationKind::parse(kind)
        .ok_or_else(|| StudyBuddyError::validation("Invalid notification type"))?;
    let title = require_text("Title", &request.title)?;
    let message = require_text("Message", &request.message)?;

    let notification = state
        .notifications
        .push(kind, title, message, request.user_id.as_deref())
        .await;
    tracing::info!(id = %notification.id, ?kind, "Notification stored");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "notification": notification })),
    ))
}

pub async fn list_notifications(State(state): State<AppState>) -> Json<Value> {
    let (notifications, unread_count) = state.notifications.list().await;
    Json(json!({
        "success": true,
        "notifications": notifications,
        "unreadCount": unread_count,
    }))
}

pub async fn update_notification(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<NotificationUpdate>,
) -> Result<Json<Value>> {
    let id = require_text("Notification id", &request.notification_id)?;
    if !state.notifications.set_read(id, request.read).await {
        tracing::debug!(id, "Ignoring update for unknown notification");
    }
    Ok(Json(json!({ "success": true })))
}

pub async fn contact(ApiJson(request): ApiJson<ContactRequest>) -> Result<Json<Value>> {
    contact::accept_message(&request)?;
    Ok(Json(json!({ "success": true, "message": ACKNOWLEDGEMENT })))
}

pub async fn get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>> {
    let token = authorization(&headers)?;
    let profile = state.profiles.load(token).await?;
    Ok(Json(json!({ "success": true, "data": profile })))
}

pub async fn save_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(update): ApiJson<ProfileUpdate>,
) -> Result<Json<Value>> {
    let token = authorization(&headers)?;
    let profile = state.profiles.save(token, update).await?;
    Ok(Json(json!({ "success": true, "data": profile })))
}

pub async fn profile_photo(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>> {
    let token = authorization(&headers)?;
    let public_url = state.profiles.photo_url(token).await?;
    Ok(Json(json!({ "success": true, "publicUrl": public_url })))
}
