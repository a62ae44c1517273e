use crate::domain::model::{AttemptQuestion, Quiz};
use crate::utils::error::{Result, StudyBuddyError};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local quiz attempts. Not persisted; writers are serialized by the lock.
#[derive(Debug, Clone, Default)]
pub struct QuizStore {
    quizzes: Arc<RwLock<Vec<Quiz>>>,
}

fn quiz_not_found() -> StudyBuddyError {
    StudyBuddyError::not_found("Quiz not found")
}

/// Percentage of correct answers, rounded. A quiz without questions scores 0.
pub fn score(questions: &[AttemptQuestion], answers: &[Option<i64>]) -> u32 {
    if questions.is_empty() {
        return 0;
    }
    let correct = questions
        .iter()
        .zip(answers)
        .filter(|(q, answer)| **answer == Some(q.correct_answer as i64))
        .count();
    ((correct as f64 / questions.len() as f64) * 100.0).round() as u32
}

impl QuizStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, user_id: &str, day: u32, questions: Vec<AttemptQuestion>) -> Quiz {
        let quiz = Quiz {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            day,
            subject: format!("Day {} Quiz", day),
            questions,
            score: None,
            completed: false,
            started_at: Some(Utc::now()),
            completed_at: None,
        };

        self.quizzes.write().await.push(quiz.clone());
        tracing::debug!(quiz_id = %quiz.id, user_id, day, "Quiz created");
        quiz
    }

    /// Grades the attempt and marks the quiz completed. Resubmitting regrades.
    pub async fn submit(
        &self,
        quiz_id: &str,
        user_id: &str,
        answers: &[Option<i64>],
    ) -> Result<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        let quiz = quizzes
            .iter_mut()
            .find(|q| q.id == quiz_id && q.user_id == user_id)
            .ok_or_else(quiz_not_found)?;

        let result = score(&quiz.questions, answers);
        for (question, answer) in quiz.questions.iter_mut().zip(answers) {
            question.user_answer = answer.and_then(|a| usize::try_from(a).ok());
        }
        quiz.score = Some(result);
        quiz.completed = true;
        quiz.completed_at = Some(Utc::now());

        tracing::debug!(quiz_id, user_id, score = result, "Quiz submitted");
        Ok(quiz.clone())
    }

    pub async fn get(&self, quiz_id: &str, user_id: &str) -> Result<Quiz> {
        self.quizzes
            .read()
            .await
            .iter()
            .find(|q| q.id == quiz_id && q.user_id == user_id)
            .cloned()
            .ok_or_else(quiz_not_found)
    }

    pub async fn list(&self, user_id: &str) -> Vec<Quiz> {
        self.quizzes
            .read()
            .await
            .iter()
            .filter(|q| q.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, correct: usize) -> AttemptQuestion {
        AttemptQuestion {
            id: id.to_string(),
            text: format!("Question {}", id),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer: correct,
            user_answer: None,
        }
    }

    #[test]
    fn test_score_rounds_percentage() {
        let questions = vec![question("1", 0), question("2", 1), question("3", 2)];
        assert_eq!(score(&questions, &[Some(0), Some(1), Some(3)]), 67);
        assert_eq!(score(&questions, &[Some(0)]), 33);
        assert_eq!(score(&questions, &[None, Some(-1), Some(2)]), 33);
        assert_eq!(score(&[], &[Some(0)]), 0);
    }

    #[tokio::test]
    async fn test_create_and_submit() {
        let store = QuizStore::new();
        let quiz = store
            .create("user-1", 3, vec![question("1", 1), question("2", 0)])
            .await;

        assert_eq!(quiz.subject, "Day 3 Quiz");
        assert!(!quiz.completed);
        assert!(quiz.started_at.is_some());

        let graded = store
            .submit(&quiz.id, "user-1", &[Some(1), Some(2)])
            .await
            .unwrap();
        assert_eq!(graded.score, Some(50));
        assert!(graded.completed);
        assert!(graded.completed_at.is_some());
        assert_eq!(graded.questions[0].user_answer, Some(1));
        assert_eq!(graded.questions[1].user_answer, Some(2));

        let fetched = store.get(&quiz.id, "user-1").await.unwrap();
        assert_eq!(fetched.score, Some(50));
    }

    #[tokio::test]
    async fn test_quizzes_are_scoped_to_their_owner() {
        let store = QuizStore::new();
        let quiz = store.create("user-1", 1, vec![question("1", 0)]).await;
        store.create("user-2", 1, vec![]).await;
        store.create("user-1", 2, vec![]).await;

        assert!(matches!(
            store.get(&quiz.id, "user-2").await,
            Err(StudyBuddyError::NotFound { .. })
        ));
        assert!(store.submit(&quiz.id, "user-2", &[Some(0)]).await.is_err());

        let days: Vec<u32> = store.list("user-1").await.iter().map(|q| q.day).collect();
        assert_eq!(days, vec![1, 2]);
        assert!(store.list("user-3").await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_creates_are_all_kept() {
        let store = QuizStore::new();
        let handles: Vec<_> = (0..32)
            .map(|day| {
                let store = store.clone();
                tokio::spawn(async move { store.create("user-1", day, vec![]).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.list("user-1").await.len(), 32);
    }
}
