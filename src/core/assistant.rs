use crate::core::prompts::{self, StudyPlanPrompt};
use crate::core::quiz::{self, DifficultyFilter};
use crate::core::study_plan::parse_study_plan;
use crate::domain::model::{
    AnswerLength, DoubtRequest, GenerateQuizRequest, GeneratedQuiz, NotesRequest, QuizQuestion,
    QuizSource, StudyPlan, StudyPlanRequest,
};
use crate::domain::ports::LlmClient;
use crate::utils::error::{Result, StudyBuddyError};
use crate::utils::validation::{require_text, text_or};
use std::sync::Arc;

pub const MAX_PLAN_DAYS: u32 = 365;
const DEFAULT_TOPIC_COUNT: u32 = 5;

/// Raw markdown as returned by the model together with its split form.
#[derive(Debug, Clone)]
pub struct GeneratedPlan {
    pub markdown: String,
    pub plan: StudyPlan,
}

/// Turns validated requests into prompts, runs them through the model and
/// shapes the replies.
#[derive(Clone)]
pub struct StudyAssistant {
    llm: Arc<dyn LlmClient>,
}

impl StudyAssistant {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub async fn study_plan(&self, request: &StudyPlanRequest) -> Result<GeneratedPlan> {
        let subject = require_text("Subject", &request.subject)?;
        let exam = require_text("Exam", &request.exam)?;
        let days = request
            .num_days
            .ok_or_else(|| StudyBuddyError::missing_field("Number of days"))?;
        if !(1..=MAX_PLAN_DAYS).contains(&days) {
            return Err(StudyBuddyError::validation(format!(
                "Number of days must be between 1 and {}",
                MAX_PLAN_DAYS
            )));
        }

        let topic_count = request
            .topics_length
            .unwrap_or(DEFAULT_TOPIC_COUNT)
            .to_string();
        let prompt = prompts::study_plan(&StudyPlanPrompt {
            subject,
            exam,
            days,
            hours_per_day: text_or(&request.difficulty, "2"),
            topics: text_or(&request.topics, &topic_count),
        });

        tracing::info!(subject, exam, days, "Generating study plan");
        let markdown = self.llm.generate(&prompt, &prompts::STUDY_PLAN_OPTIONS).await?;
        let plan = parse_study_plan(&markdown)?;
        tracing::info!(days = plan.daily_routines.len(), "Study plan generated");

        Ok(GeneratedPlan { markdown, plan })
    }

    pub async fn solve_doubt(&self, request: &DoubtRequest) -> Result<String> {
        let question = require_text("Question", &request.question)?;
        let subject = text_or(&request.subject, "General");
        let length = AnswerLength::from_label(request.answer_type.as_deref().map(str::trim));

        tracing::info!(subject, ?length, "Solving doubt");
        let prompt = prompts::doubt(question, subject, length);
        self.llm.generate(&prompt, &prompts::DOUBT_OPTIONS).await
    }

    pub async fn summarize_notes(&self, request: &NotesRequest) -> Result<String> {
        let notes = require_text("Notes content", &request.notes)?;
        let subject = text_or(&request.subject, "your subject");
        let exam_type = text_or(&request.exam_type, "upcoming");

        tracing::info!(notes_chars = notes.len(), "Summarizing notes");
        let prompt = prompts::summarize_notes(notes, subject, exam_type);
        self.llm.generate(&prompt, &prompts::SUMMARY_OPTIONS).await
    }

    pub async fn extract_key_concepts(&self, request: &NotesRequest) -> Result<String> {
        let notes = require_text("Notes content", &request.notes)?;

        tracing::info!(notes_chars = notes.len(), "Extracting key concepts");
        let prompt = prompts::key_concepts(notes);
        self.llm.generate(&prompt, &prompts::KEY_CONCEPTS_OPTIONS).await
    }

    /// Bank questions when the topic is known, otherwise model-written ones,
    /// otherwise the generic fallback. Model failures are logged, not returned.
    pub async fn generate_quiz(&self, request: &GenerateQuizRequest) -> Result<GeneratedQuiz> {
        let topic = require_text("Topic", &request.topic)?;
        let subject = text_or(&request.subject, "physics");
        let filter = DifficultyFilter::parse(request.difficulty.as_deref());

        let (questions, source) = match quiz::bank_questions(subject, topic) {
            Some(questions) => (questions, QuizSource::Bank),
            None => self.model_or_fallback_questions(topic, subject, filter).await,
        };

        let mut rng = rand::rng();
        let questions: Vec<QuizQuestion> = quiz::select_by_difficulty(questions, filter)
            .into_iter()
            .map(|q| quiz::shuffle_options(q, &mut rng))
            .collect();

        tracing::info!(topic, subject, ?source, count = questions.len(), "Quiz generated");
        Ok(GeneratedQuiz {
            success: true,
            count: questions.len(),
            questions,
            topic: topic.to_string(),
            subject: subject.to_string(),
            source,
        })
    }

    async fn model_or_fallback_questions(
        &self,
        topic: &str,
        subject: &str,
        filter: DifficultyFilter,
    ) -> (Vec<QuizQuestion>, QuizSource) {
        let difficulty = match filter {
            DifficultyFilter::All => "mixed".to_string(),
            DifficultyFilter::Only(d) => d.to_string(),
        };
        let prompt = prompts::quiz(topic, subject, &difficulty, quiz::QUIZ_LENGTH);

        match self.llm.generate(&prompt, &prompts::QUIZ_OPTIONS).await {
            Ok(reply) => {
                let questions = quiz::parse_generated_questions(&reply);
                if !questions.is_empty() {
                    return (questions, QuizSource::Llm);
                }
                tracing::warn!(topic, "Model reply had no usable questions, using fallback quiz");
            }
            Err(e) => {
                tracing::warn!(topic, error = %e, "Quiz generation failed, using fallback quiz");
            }
        }
        (quiz::fallback_quiz(topic, subject), QuizSource::Fallback)
    }
}
