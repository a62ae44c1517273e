//! Prompt templates sent to the completion API, with the sampling options
//! each one is tuned for.

use crate::core::study_plan::{DAILY_ROUTINE_MARKER, RESOURCES_MARKER};
use crate::domain::model::AnswerLength;
use crate::domain::ports::GenerationOptions;

pub const STUDY_PLAN_OPTIONS: GenerationOptions = GenerationOptions {
    temperature: 0.8,
    max_tokens: 8000,
    top_p: 1.0,
    frequency_penalty: 0.0,
    presence_penalty: 0.0,
};

pub const DOUBT_OPTIONS: GenerationOptions = GenerationOptions {
    temperature: 0.8,
    max_tokens: 2500,
    top_p: 1.0,
    frequency_penalty: 0.0,
    presence_penalty: 0.0,
};

pub const SUMMARY_OPTIONS: GenerationOptions = GenerationOptions {
    temperature: 0.7,
    max_tokens: 2000,
    top_p: 1.0,
    frequency_penalty: 0.0,
    presence_penalty: 0.0,
};

pub const KEY_CONCEPTS_OPTIONS: GenerationOptions = GenerationOptions {
    temperature: 0.6,
    max_tokens: 1500,
    top_p: 1.0,
    frequency_penalty: 0.0,
    presence_penalty: 0.0,
};

pub const QUIZ_OPTIONS: GenerationOptions = GenerationOptions {
    temperature: 0.5,
    max_tokens: 2000,
    top_p: 1.0,
    frequency_penalty: 0.0,
    presence_penalty: 0.0,
};

pub struct StudyPlanPrompt<'a> {
    pub subject: &'a str,
    pub exam: &'a str,
    pub days: u32,
    pub hours_per_day: &'a str,
    /// Either an explicit topic list or a topic count.
    pub topics: &'a str,
}

pub fn study_plan(p: &StudyPlanPrompt<'_>) -> String {
    format!(
        r#"You are an academic success coach. Build a detailed study plan and timetable.

STUDENT PROFILE:
- Subject: {subject}
- Exam: {exam}
- Topics to cover: {topics}
- Duration: {days} days
- Daily commitment: {hours} hours per day

OUTPUT FORMAT (the response is parsed by software, follow it exactly):
## 1. OVERVIEW
Summary of the method and the expected outcomes.

## 2. TOPIC-WISE STUDY APPROACH
For each topic: importance in the exam, strategy for theory and numericals, learning objectives.

{routine}
One entry per day for all {days} days, each under its own header:
### Day <number>: <topic of the day>
- **Time Management & Break Schedule**: slot-by-slot use of the {hours} hours with Pomodoro breaks.
- **Tasks**: concrete work and the number of practice problems.
- **Success Metric**: what must be mastered by the end of the day.
Never merge several days into one entry and never repeat a routine. If the requested
topics run out, continue with related topics from the {exam} syllabus.

{resources}
- **Study Resources Required**: textbooks, channels and databases for {subject}.
- **Mock Test Schedule**: when to take full-length and sectional tests.
- **Final Revision Strategy**: the last 48 hours.

Use only ## and ### markdown headers as shown. Generate the plan now:"#,
        subject = p.subject,
        exam = p.exam,
        topics = p.topics,
        days = p.days,
        hours = p.hours_per_day,
        routine = DAILY_ROUTINE_MARKER,
        resources = RESOURCES_MARKER,
    )
}

fn doubt_notes(length: AnswerLength) -> &'static str {
    match length {
        AnswerLength::Short | AnswerLength::Unspecified => "",
        AnswerLength::Medium => {
            "Weigh the sections by relevance; not every section needs equal depth."
        }
        AnswerLength::Long => {
            "Weigh the sections by relevance; not every section needs equal depth. \
             No part of the topic should feel under-explained."
        }
        AnswerLength::Detailed => {
            "Weigh the sections by relevance; not every section needs equal depth. \
             No part of the topic should feel under-explained. Each section must stand on its own \
             or clearly reference an earlier one. Do not repeat points without reason, and say so \
             plainly if your knowledge is limited or outdated. Rename sections if it helps the explanation."
        }
    }
}

pub fn doubt(question: &str, subject: &str, length: AnswerLength) -> String {
    format!(
        r#"Answer the question below thoroughly, covering the nuances that matter.
Keep the answer within {limit} words (100 words of flexibility).

Structure the answer in 8 markdown sections:
1. Concept explanation, defining the important terms
2. Why the concept matters and where it is applied
3. Step-by-step solution, or a deeper explanation when no steps apply
4. 2-3 practical examples
5. Common pitfalls and misconceptions
6. Short concise answer
7. Practice questions
8. Related topics to study

{notes}

Answer with respect to {subject}.
Question: "{question}""#,
        limit = length.word_limit(),
        notes = doubt_notes(length),
        subject = subject,
        question = question,
    )
}

pub fn summarize_notes(notes: &str, subject: &str, exam_type: &str) -> String {
    format!(
        r#"Summarize the study notes below for a student preparing for the {exam_type} exam in {subject}.

Notes:
{notes}

Include:
1. Key concepts and definitions
2. The most important points
3. Relationships between concepts
4. Real-world applications
5. Exam tips
6. Common mistakes to avoid
7. A quick revision checklist

Format as structured markdown with sections and bullet points."#
    )
}

pub fn key_concepts(notes: &str) -> String {
    format!(
        r#"Extract every key concept, definition and important term from the study notes below,
as a markdown list grouped by topic.

Notes:
{notes}

Cover:
1. Main concepts and definitions
2. Important formulas or theorems
3. Key relationships between concepts
4. Examples and applications"#
    )
}

pub fn quiz(topic: &str, subject: &str, difficulty: &str, count: usize) -> String {
    format!(
        r#"Write {count} multiple-choice questions on "{topic}" ({subject}), difficulty: {difficulty}.

Reply with a JSON array only, no prose, where each element is:
{{"text": "<question>", "options": ["<a>", "<b>", "<c>", "<d>"], "correctAnswer": <index of the correct option, 0-3>, "difficulty": "easy" | "medium" | "hard"}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_study_plan_prompt_carries_parser_markers() {
        let prompt = study_plan(&StudyPlanPrompt {
            subject: "Physics",
            exam: "JEE Advanced",
            days: 30,
            hours_per_day: "4",
            topics: "5",
        });

        assert!(prompt.contains(DAILY_ROUTINE_MARKER));
        assert!(prompt.contains(RESOURCES_MARKER));
        assert!(prompt.contains("### Day <number>:"));
        assert!(prompt.contains("Duration: 30 days"));
        assert!(prompt.contains("Subject: Physics"));
    }

    #[test]
    fn test_doubt_prompt_word_limits() {
        let short = doubt("What is torque?", "Physics", AnswerLength::Short);
        assert!(short.contains("within 100-200 words"));
        assert!(short.contains(r#"Question: "What is torque?""#));

        let detailed = doubt("What is torque?", "Physics", AnswerLength::Detailed);
        assert!(detailed.contains("1000+"));
        assert!(detailed.contains("outdated"));

        let unknown = doubt("What is torque?", "Physics", AnswerLength::Unspecified);
        assert!(unknown.contains("200-500"));
        assert!(!unknown.contains("Weigh the sections"));
    }

    #[test]
    fn test_summary_prompt_embeds_notes() {
        let prompt = summarize_notes("Ohm's law: V = IR", "Physics", "Board");
        assert!(prompt.contains("Ohm's law: V = IR"));
        assert!(prompt.contains("Board exam in Physics"));
    }

    #[test]
    fn test_quiz_prompt_requests_json() {
        let prompt = quiz("Thermodynamics", "Physics", "hard", 5);
        assert!(prompt.contains("Write 5 multiple-choice questions"));
        assert!(prompt.contains(r#""correctAnswer""#));
    }
}
