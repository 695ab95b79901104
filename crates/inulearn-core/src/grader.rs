//! Answer grading.
//!
//! An answer is correct when, after trimming surrounding whitespace from
//! the learner's answer and lowercasing both sides, it equals the stored
//! correct answer. There is no partial credit: the score is 100 or 0.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::catalog::QuestionCatalog;
use crate::error::LearningError;
use crate::model::{AnswerSubmission, SubmissionRecord};

/// Score awarded for a correct answer.
pub const FULL_SCORE: u8 = 100;

/// Feedback returned for a correct answer.
pub const CORRECT_FEEDBACK: &str = "Correct! Great work.";

/// The outcome of grading one answer against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Grade {
    pub is_correct: bool,
    pub score: u8,
    pub feedback: String,
    pub correct_answer: String,
    pub explanation: String,
}

/// Grades answers against the canonical answers held in the catalog.
#[derive(Debug, Clone)]
pub struct AnswerGrader {
    catalog: Arc<QuestionCatalog>,
}

impl AnswerGrader {
    pub fn new(catalog: Arc<QuestionCatalog>) -> Self {
        Self { catalog }
    }

    /// Grade a raw answer for `question_id`.
    ///
    /// A question without a canonical answer cannot be graded and is
    /// reported as not found.
    pub fn grade(&self, question_id: &str, user_answer: &str) -> Result<Grade, LearningError> {
        let question = self
            .catalog
            .find_by_id(question_id)
            .filter(|q| !q.correct_answer.is_empty())
            .ok_or_else(|| LearningError::QuestionNotFound(question_id.to_string()))?;

        let is_correct = answers_match(user_answer, &question.correct_answer);

        Ok(Grade {
            is_correct,
            score: if is_correct { FULL_SCORE } else { 0 },
            feedback: feedback_for(is_correct, &question.correct_answer),
            correct_answer: question.correct_answer.clone(),
            explanation: question.explanation.clone(),
        })
    }

    /// Grade a submission and build the record handed back to the learner.
    pub fn grade_submission(
        &self,
        submission: &AnswerSubmission,
    ) -> Result<SubmissionRecord, LearningError> {
        let grade = self.grade(&submission.question_id, &submission.user_answer)?;

        tracing::info!(
            session_id = %submission.session_id,
            question_id = %submission.question_id,
            is_correct = grade.is_correct,
            "graded answer"
        );

        Ok(SubmissionRecord {
            submission_id: Uuid::new_v4(),
            session_id: submission.session_id.clone(),
            question_id: submission.question_id.clone(),
            user_answer: submission.user_answer.clone(),
            is_correct: grade.is_correct,
            correct_answer: grade.correct_answer,
            explanation: grade.explanation,
            score: grade.score,
            feedback: grade.feedback,
            time_spent_secs: submission.time_spent_secs,
            submitted_at: Utc::now(),
        })
    }
}

/// Normalized answer comparison. Only the learner's answer is trimmed.
pub fn answers_match(user_answer: &str, correct_answer: &str) -> bool {
    user_answer.trim().to_lowercase() == correct_answer.to_lowercase()
}

fn feedback_for(is_correct: bool, correct_answer: &str) -> String {
    if is_correct {
        CORRECT_FEEDBACK.to_string()
    } else {
        format!(
            "Incorrect. The correct answer is {correct_answer}. Review the related concepts and try again."
        )
    }
}
