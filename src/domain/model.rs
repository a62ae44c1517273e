use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Accepts a JSON number or a numeric string. Anything else reads as absent,
/// so the handler reports the field as missing instead of failing to decode.
fn lenient_u32<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Study plan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlanRequest {
    pub subject: Option<String>,
    pub exam: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub num_days: Option<u32>,
    /// Daily commitment in hours, free text ("2", "3-4").
    pub difficulty: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub topics_length: Option<u32>,
    pub topics: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRoutine {
    pub day: u32,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub general_info: String,
    pub daily_routines: Vec<DailyRoutine>,
}

// ---------------------------------------------------------------------------
// Doubts and notes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoubtRequest {
    pub question: Option<String>,
    pub subject: Option<String>,
    pub answer_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerLength {
    Short,
    Medium,
    Long,
    Detailed,
    /// Unrecognised label; behaves like `Medium` without the extra notes.
    Unspecified,
}

impl AnswerLength {
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            None => Self::Medium,
            Some("Short") => Self::Short,
            Some("Medium") => Self::Medium,
            Some("Long") => Self::Long,
            Some("Detailed") => Self::Detailed,
            Some(_) => Self::Unspecified,
        }
    }

    pub fn word_limit(self) -> &'static str {
        match self {
            Self::Short => "100-200",
            Self::Medium | Self::Unspecified => "200-500",
            Self::Long => "500-1000",
            Self::Detailed => "1000+",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesRequest {
    pub notes: Option<String>,
    pub subject: Option<String>,
    pub exam_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Quiz generation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: u32,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer_text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    pub topic: Option<String>,
    pub subject: Option<String>,
    pub difficulty: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizSource {
    Bank,
    Llm,
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuiz {
    pub success: bool,
    pub questions: Vec<QuizQuestion>,
    pub count: usize,
    pub topic: String,
    pub subject: String,
    pub source: QuizSource,
}

// ---------------------------------------------------------------------------
// Quiz attempts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptQuestion {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(default)]
    pub user_answer: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub user_id: String,
    pub day: u32,
    pub subject: String,
    pub questions: Vec<AttemptQuestion>,
    pub score: Option<u32>,
    pub completed: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizActionRequest {
    pub action: Option<String>,
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub day: Option<u32>,
    pub questions: Option<Vec<AttemptQuestion>>,
    pub quiz_id: Option<String>,
    pub answers: Option<Vec<Option<i64>>>,
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Quiz,
    Achievement,
    Reminder,
    Info,
}

impl NotificationKind {
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "quiz" => Some(Self::Quiz),
            "achievement" => Some(Self::Achievement),
            "reminder" => Some(Self::Reminder),
            "info" => Some(Self::Info),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationUpdate {
    pub notification_id: Option<String>,
    #[serde(default)]
    pub read: bool,
}

// ---------------------------------------------------------------------------
// Contact form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub subject: Option<String>,
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of `POST /api/profile-info`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub target_exam: Option<String>,
    pub current_class: Option<String>,
    pub strengths: Option<String>,
    pub weaknesses: Option<String>,
}

/// Row shape of the `profile` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    // absent columns are left out so an upsert keeps their stored values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strengths: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weakness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn from_update(user_id: &str, update: ProfileUpdate, now: DateTime<Utc>) -> Self {
        Self {
            user_id: Some(user_id.to_string()),
            name: update.full_name,
            target: update.target_exam,
            class: update.current_class,
            strengths: update.strengths,
            weakness: update.weaknesses,
            updated_at: Some(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_study_plan_request_accepts_form_strings() {
        let req: StudyPlanRequest = serde_json::from_value(json!({
            "subject": "Physics",
            "exam": "JEE Advanced",
            "numDays": "30",
            "topicsLength": 5,
            "difficulty": "3"
        }))
        .unwrap();

        assert_eq!(req.num_days, Some(30));
        assert_eq!(req.topics_length, Some(5));
        assert_eq!(req.difficulty.as_deref(), Some("3"));
    }

    #[test]
    fn test_study_plan_request_unparseable_days_reads_as_absent() {
        let req: StudyPlanRequest =
            serde_json::from_value(json!({"numDays": "thirty"})).unwrap();
        assert_eq!(req.num_days, None);

        let req: StudyPlanRequest = serde_json::from_value(json!({"numDays": -4})).unwrap();
        assert_eq!(req.num_days, None);
    }

    #[test]
    fn test_answer_length_labels() {
        assert_eq!(AnswerLength::from_label(None), AnswerLength::Medium);
        assert_eq!(AnswerLength::from_label(Some("Short")).word_limit(), "100-200");
        assert_eq!(AnswerLength::from_label(Some("Detailed")).word_limit(), "1000+");
        assert_eq!(
            AnswerLength::from_label(Some("short")),
            AnswerLength::Unspecified
        );
    }

    #[test]
    fn test_attempt_question_numeric_id() {
        let q: AttemptQuestion = serde_json::from_value(json!({
            "id": 3,
            "text": "2 + 2?",
            "options": ["3", "4"],
            "correctAnswer": 1
        }))
        .unwrap();
        assert_eq!(q.id, "3");
        assert_eq!(q.user_answer, None);
    }

    #[test]
    fn test_partial_profile_update_omits_missing_columns() {
        let update = ProfileUpdate {
            full_name: Some("Asha".to_string()),
            ..ProfileUpdate::default()
        };
        let profile = Profile::from_update("user-1", update, Utc::now());
        let value = serde_json::to_value(&profile).unwrap();

        assert_eq!(value["name"], "Asha");
        assert_eq!(value["user_id"], "user-1");
        for column in ["target", "class", "strengths", "weakness"] {
            assert!(value.get(column).is_none(), "{column} should be omitted");
        }
    }

    #[test]
    fn test_notification_serializes_type_field() {
        let n = Notification {
            id: "n1".to_string(),
            kind: NotificationKind::Reminder,
            title: "Revise".to_string(),
            message: "Day 3 revision".to_string(),
            user_id: None,
            timestamp: Utc::now(),
            read: false,
        };
        let value = serde_json::to_value(&n).unwrap();
        assert_eq!(value["type"], "reminder");
        assert!(value.get("userId").is_none());
    }
}
