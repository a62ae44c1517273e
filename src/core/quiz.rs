use crate::domain::model::{Difficulty, QuizQuestion};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::sync::LazyLock;

/// Minimum number of questions a generated quiz should carry.
pub const QUIZ_LENGTH: usize = 5;

#[derive(Debug, Deserialize)]
struct QuestionBank {
    subjects: Vec<BankSubject>,
}

#[derive(Debug, Deserialize)]
struct BankSubject {
    name: String,
    topics: Vec<BankTopic>,
}

#[derive(Debug, Deserialize)]
struct BankTopic {
    name: String,
    questions: Vec<QuizQuestion>,
}

static QUESTION_BANK: LazyLock<QuestionBank> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../../data/quiz_bank.json"))
        .expect("bundled quiz bank is valid JSON")
});

/// Questions from the bundled bank. Subject and topic match case-insensitively.
pub fn bank_questions(subject: &str, topic: &str) -> Option<Vec<QuizQuestion>> {
    let subject = subject.trim().to_lowercase();
    let topic = topic.trim().to_lowercase();

    QUESTION_BANK
        .subjects
        .iter()
        .find(|s| s.name == subject)?
        .topics
        .iter()
        .find(|t| t.name == topic)
        .map(|t| t.questions.clone())
        .filter(|questions| !questions.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyFilter {
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    /// Missing means `medium`; unrecognised labels select everything.
    pub fn parse(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            None | Some("") => Self::Only(Difficulty::Medium),
            Some(label) if label.eq_ignore_ascii_case("all") => Self::All,
            Some(label) => Difficulty::parse(label).map_or(Self::All, Self::Only),
        }
    }
}

/// Keeps the questions of the requested difficulty, topped up with the
/// remaining ones (in bank order) until the quiz reaches `QUIZ_LENGTH`.
pub fn select_by_difficulty(
    questions: Vec<QuizQuestion>,
    filter: DifficultyFilter,
) -> Vec<QuizQuestion> {
    let DifficultyFilter::Only(difficulty) = filter else {
        return questions;
    };

    let (mut selected, rest): (Vec<_>, Vec<_>) = questions
        .into_iter()
        .partition(|q| q.difficulty == difficulty);

    if selected.len() < QUIZ_LENGTH {
        let missing = QUIZ_LENGTH - selected.len();
        selected.extend(rest.into_iter().take(missing));
    }
    selected
}

/// Shuffles the options and records the correct answer both as text and as
/// its new index.
pub fn shuffle_options<R: Rng + ?Sized>(mut question: QuizQuestion, rng: &mut R) -> QuizQuestion {
    let mut order: Vec<usize> = (0..question.options.len()).collect();
    order.shuffle(rng);

    question.correct_answer_text = question.options.get(question.correct_answer).cloned();
    if let Some(new_index) = order.iter().position(|&i| i == question.correct_answer) {
        question.correct_answer = new_index;
    }
    question.options = order.iter().map(|&i| question.options[i].clone()).collect();
    question
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedQuestion {
    text: String,
    options: Vec<String>,
    #[serde(alias = "correct_answer")]
    correct_answer: usize,
    #[serde(default)]
    difficulty: Option<String>,
}

/// Reads the JSON array of questions out of a model reply. Prose or code
/// fences around the array are ignored; malformed entries are skipped.
pub fn parse_generated_questions(reply: &str) -> Vec<QuizQuestion> {
    let (Some(start), Some(end)) = (reply.find('['), reply.rfind(']')) else {
        return Vec::new();
    };
    if end <= start {
        return Vec::new();
    }

    let items: Vec<GeneratedQuestion> = match serde_json::from_str(&reply[start..=end]) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(error = %e, "Model reply is not a question array");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .filter(|q| {
            !q.text.trim().is_empty() && q.options.len() >= 2 && q.correct_answer < q.options.len()
        })
        .enumerate()
        .map(|(i, q)| QuizQuestion {
            id: (i + 1) as u32,
            text: q.text.trim().to_string(),
            options: q.options,
            correct_answer: q.correct_answer,
            difficulty: q
                .difficulty
                .as_deref()
                .and_then(Difficulty::parse)
                .unwrap_or(Difficulty::Medium),
            correct_answer_text: None,
        })
        .collect()
}

fn templated(
    id: u32,
    text: String,
    options: [&str; 4],
    correct_answer: usize,
    difficulty: Difficulty,
) -> QuizQuestion {
    QuizQuestion {
        id,
        text,
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer,
        difficulty,
        correct_answer_text: None,
    }
}

/// Generic questions used when neither the bank nor the model can supply any.
pub fn fallback_quiz(topic: &str, subject: &str) -> Vec<QuizQuestion> {
    let fundamentals = format!("Understanding fundamental concepts of {}", topic);
    vec![
        QuizQuestion {
            id: 1,
            text: format!("What is the primary focus of {}?", topic),
            options: vec![
                fundamentals,
                "Memorizing definitions".to_string(),
                "Solving complex problems".to_string(),
                "Advanced applications".to_string(),
            ],
            correct_answer: 0,
            difficulty: Difficulty::Easy,
            correct_answer_text: None,
        },
        templated(
            2,
            format!("Which of the following is an important aspect of {}?", topic),
            [
                "Basic principles",
                "Practical applications",
                "Historical development",
                "All of the above",
            ],
            3,
            Difficulty::Medium,
        ),
        templated(
            3,
            format!("How is {} connected to {}?", topic, subject),
            [
                "No connection",
                "Fundamental relationship",
                "Related through applications",
                "Completely independent",
            ],
            1,
            Difficulty::Medium,
        ),
        templated(
            4,
            format!("What is a key challenge in learning {}?", topic),
            [
                "Understanding core concepts",
                "Applying knowledge to real problems",
                "Memorization",
                "Calculation skills",
            ],
            0,
            Difficulty::Medium,
        ),
        templated(
            5,
            format!("Which skill is most important for mastering {}?", topic),
            [
                "Critical thinking",
                "Problem-solving",
                "Conceptual understanding",
                "All of the above",
            ],
            3,
            Difficulty::Hard,
        ),
    ]
}
