//! Similar-question stubs.
//!
//! This is a placeholder policy, not a similarity search: the stubs do not
//! depend on the source question's content, and their scores decay
//! linearly from 0.85 by 0.05 per position.

use crate::error::LearningError;
use crate::model::{Difficulty, QuestionType, SimilarQuestionStub};

/// Smallest accepted stub count.
pub const MIN_SIMILAR_COUNT: i64 = 1;
/// Largest accepted stub count.
pub const MAX_SIMILAR_COUNT: i64 = 20;
/// Default stub count when the caller gives none.
pub const DEFAULT_SIMILAR_COUNT: i64 = 5;

const BASE_SIMILARITY: f64 = 0.85;
const SIMILARITY_STEP: f64 = 0.05;

/// Generate `count` stubs related to `question_id`.
pub fn similar_questions(
    question_id: &str,
    count: i64,
) -> Result<Vec<SimilarQuestionStub>, LearningError> {
    if !(MIN_SIMILAR_COUNT..=MAX_SIMILAR_COUNT).contains(&count) {
        return Err(LearningError::InvalidCount {
            value: count,
            min: MIN_SIMILAR_COUNT,
            max: MAX_SIMILAR_COUNT,
        });
    }

    Ok((0..count as u32).map(|i| stub(question_id, i)).collect())
}

fn stub(question_id: &str, index: u32) -> SimilarQuestionStub {
    let position = index + 1;
    SimilarQuestionStub {
        question_id: format!("similar_{question_id}_{position}"),
        content: format!(
            "Similar question {position}: solve {}x + {} = {}",
            index + 2,
            index + 3,
            index + 7
        ),
        question_type: QuestionType::MultipleChoice,
        difficulty: Difficulty::Medium,
        similarity_score: similarity_score(index),
    }
}

/// Score for the stub at `index`, clamped at zero.
///
/// Raw linear decay reaches zero at index 17, which is still inside the
/// accepted count range.
pub fn similarity_score(index: u32) -> f64 {
    (BASE_SIMILARITY - f64::from(index) * SIMILARITY_STEP).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_stubs_with_decreasing_scores() {
        let stubs = similar_questions("math_001", 5).unwrap();
        assert_eq!(stubs.len(), 5);

        let expected = [0.85, 0.80, 0.75, 0.70, 0.65];
        for (stub, want) in stubs.iter().zip(expected) {
            assert!(
                (stub.similarity_score - want).abs() < 1e-9,
                "expected {want}, got {}",
                stub.similarity_score
            );
        }
        assert!(stubs
            .windows(2)
            .all(|w| w[0].similarity_score > w[1].similarity_score));
    }

    #[test]
    fn stub_identity_and_template() {
        let stubs = similar_questions("math_001", 2).unwrap();
        assert_eq!(stubs[0].question_id, "similar_math_001_1");
        assert_eq!(stubs[0].content, "Similar question 1: solve 2x + 3 = 7");
        assert_eq!(stubs[1].question_id, "similar_math_001_2");
        assert_eq!(stubs[1].content, "Similar question 2: solve 3x + 4 = 8");
        assert!(stubs
            .iter()
            .all(|s| s.question_type == QuestionType::MultipleChoice
                && s.difficulty == Difficulty::Medium));
    }

    #[test]
    fn source_question_need_not_exist() {
        let stubs = similar_questions("no_such_question", 1).unwrap();
        assert_eq!(stubs[0].question_id, "similar_no_such_question_1");
    }

    #[test]
    fn rejects_out_of_range_counts() {
        for count in [0, 21, -1] {
            let err = similar_questions("math_001", count).unwrap_err();
            assert_eq!(
                err,
                LearningError::InvalidCount {
                    value: count,
                    min: 1,
                    max: 20
                }
            );
        }
    }

    #[test]
    fn scores_never_go_negative() {
        let stubs = similar_questions("math_001", MAX_SIMILAR_COUNT).unwrap();
        assert_eq!(stubs.len(), 20);
        assert!(stubs
            .iter()
            .all(|s| (0.0..=1.0).contains(&s.similarity_score)));
        assert_eq!(stubs[19].similarity_score, 0.0);
        assert!(stubs.windows(2).all(|w| w[0].similarity_score >= w[1].similarity_score));
    }
}
