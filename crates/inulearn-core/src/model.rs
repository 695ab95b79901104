//! Core data model types for inulearn.
//!
//! These are the types that flow through selection and grading: catalog
//! question records, selection criteria and results, and graded
//! submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    ShortAnswer,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "multiple_choice"),
            QuestionType::ShortAnswer => write!(f, "short_answer"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiple_choice" => Ok(QuestionType::MultipleChoice),
            "short_answer" => Ok(QuestionType::ShortAnswer),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// Question difficulty.
///
/// Parsing is exact: only the lowercase names are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A single question owned by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Identifier, unique across the whole catalog.
    pub id: String,
    /// Question text shown to the learner.
    pub content: String,
    /// How the question is answered.
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Answer choices, only for multiple choice questions.
    #[serde(default)]
    pub options: Option<Vec<String>>,
    /// Canonical answer used for grading.
    pub correct_answer: String,
    /// Worked explanation returned after grading.
    #[serde(default)]
    pub explanation: String,
    pub difficulty: Difficulty,
    pub subject: String,
    pub topic: String,
}

/// Filter parameters for question selection.
///
/// `difficulty` and `desired_count` stay unvalidated here; the selector
/// checks subject, difficulty and count in that order so the first failure
/// is the one reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionCriteria {
    pub subject: String,
    /// Learner grade. Informational only.
    #[serde(default)]
    pub grade: Option<u8>,
    pub difficulty: String,
    #[serde(alias = "question_count")]
    pub desired_count: i64,
    /// Topics to draw from. Empty means every topic of the subject.
    #[serde(default, alias = "focus_areas")]
    pub focus_topics: Vec<String>,
}

/// A question handed out in a practice session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedQuestion {
    /// Catalog identifier, suffixed with `_<n>` for padded entries.
    pub question_id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    pub difficulty: Difficulty,
    pub topic: String,
}

impl SelectedQuestion {
    pub(crate) fn from_record(record: &QuestionRecord, question_id: String) -> Self {
        Self {
            question_id,
            content: record.content.clone(),
            question_type: record.question_type,
            options: record.options.clone(),
            difficulty: record.difficulty,
            topic: record.topic.clone(),
        }
    }
}

/// The questions chosen for one practice session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionResult {
    /// Correlation token for the session. Fresh on every call.
    pub session_id: Uuid,
    pub questions: Vec<SelectedQuestion>,
}

/// A learner's answer to a single question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub session_id: String,
    pub question_id: String,
    pub user_answer: String,
    /// Seconds spent on the question, if the client measured it.
    #[serde(default, alias = "time_spent")]
    pub time_spent_secs: Option<u32>,
}

/// The graded outcome of an `AnswerSubmission`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub submission_id: Uuid,
    pub session_id: String,
    pub question_id: String,
    pub user_answer: String,
    pub is_correct: bool,
    pub correct_answer: String,
    pub explanation: String,
    /// Always exactly 0 or 100.
    pub score: u8,
    pub feedback: String,
    #[serde(default)]
    pub time_spent_secs: Option<u32>,
    pub submitted_at: DateTime<Utc>,
}

/// A synthetic practice question related to a source question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarQuestionStub {
    pub question_id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub difficulty: Difficulty,
    pub similarity_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_display_and_parse() {
        assert_eq!(Difficulty::Medium.to_string(), "medium");
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("Medium".parse::<Difficulty>().is_err());
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn question_type_uses_snake_case() {
        assert_eq!(QuestionType::MultipleChoice.to_string(), "multiple_choice");
        assert_eq!(
            "short_answer".parse::<QuestionType>().unwrap(),
            QuestionType::ShortAnswer
        );
        let json = serde_json::to_string(&QuestionType::MultipleChoice).unwrap();
        assert_eq!(json, "\"multiple_choice\"");
    }

    #[test]
    fn criteria_accepts_request_field_names() {
        let json = r#"{
            "subject": "mathematics",
            "grade": 7,
            "difficulty": "medium",
            "question_count": 5,
            "focus_areas": ["algebra"]
        }"#;
        let criteria: SelectionCriteria = serde_json::from_str(json).unwrap();
        assert_eq!(criteria.desired_count, 5);
        assert_eq!(criteria.focus_topics, vec!["algebra"]);
        assert_eq!(criteria.grade, Some(7));
    }

    #[test]
    fn selected_question_serializes_type_field() {
        let question = SelectedQuestion {
            question_id: "math_001".into(),
            content: "Solve 2x + 3 = 7".into(),
            question_type: QuestionType::MultipleChoice,
            options: Some(vec!["x=1".into(), "x=2".into()]),
            difficulty: Difficulty::Medium,
            topic: "algebra".into(),
        };
        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(value["type"], "multiple_choice");
        assert_eq!(value["difficulty"], "medium");
    }
}
