//! Splits a generated study plan into its general information and the
//! per-day routines.
//!
//! The plan is expected to use the section headers requested by the prompt:
//!
//! ```text
//! ## 1. OVERVIEW
//! ## 2. TOPIC-WISE STUDY APPROACH
//! ## 3. DAILY ROUTINE
//! ### Day 1: ...
//! ### Day 2: ...
//! ## 4. RESOURCES AND MOCK TESTS
//! ```
//!
//! Everything outside the daily-routine section becomes `general_info`.
//! Text between the routine header and the first day header is dropped.

use crate::domain::model::{DailyRoutine, StudyPlan};
use crate::utils::error::{Result, StudyBuddyError};
use regex::Regex;
use std::sync::LazyLock;

pub const DAILY_ROUTINE_MARKER: &str = "## 3. DAILY ROUTINE";
pub const RESOURCES_MARKER: &str = "## 4. RESOURCES AND MOCK TESTS";

static ROUTINE_RE: LazyLock<Regex> = LazyLock::new(|| header_pattern(DAILY_ROUTINE_MARKER));
static RESOURCES_RE: LazyLock<Regex> = LazyLock::new(|| header_pattern(RESOURCES_MARKER));
static DAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^###[ \t]+Day[ \t]+(\d+)\b[ \t]*[:\-–]?[ \t]*(.*)$")
        .expect("day header pattern is valid")
});

/// Matches `marker` at the start of a line, allowing trailing text such as
/// "## 3. DAILY ROUTINE (30 days)".
fn header_pattern(marker: &str) -> Regex {
    Regex::new(&format!(r"(?m)^{}[^\n]*$", regex::escape(marker)))
        .expect("header pattern is valid")
}

fn parse_error(message: impl Into<String>) -> StudyBuddyError {
    StudyBuddyError::ParseError {
        message: message.into(),
    }
}

pub fn parse_study_plan(markdown: &str) -> Result<StudyPlan> {
    let text = markdown.replace("\r\n", "\n");

    let routine_header = ROUTINE_RE
        .find(&text)
        .ok_or_else(|| parse_error(format!("missing '{}' section", DAILY_ROUTINE_MARKER)))?;

    let overview = &text[..routine_header.start()];
    let (routine_end, resources) = match RESOURCES_RE.find_at(&text, routine_header.end()) {
        Some(m) => (m.start(), &text[m.start()..]),
        None => (text.len(), ""),
    };
    let routine_body = &text[routine_header.end()..routine_end];

    let headers: Vec<_> = DAY_RE.captures_iter(routine_body).collect();
    if headers.is_empty() {
        return Err(parse_error(format!(
            "'{}' section contains no '### Day N:' entries",
            DAILY_ROUTINE_MARKER
        )));
    }

    let mut daily_routines = Vec::with_capacity(headers.len());
    for (i, caps) in headers.iter().enumerate() {
        let whole = caps.get(0).expect("group 0 always matches");
        let day = caps[1]
            .parse::<u32>()
            .map_err(|_| parse_error(format!("day number '{}' is out of range", &caps[1])))?;
        let content_end = headers
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(routine_body.len(), |m| m.start());

        daily_routines.push(DailyRoutine {
            day,
            title: caps[2].trim().to_string(),
            content: routine_body[whole.end()..content_end].trim().to_string(),
        });
    }

    let general_info = [overview.trim(), resources.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    Ok(StudyPlan {
        general_info,
        daily_routines,
    })
}
