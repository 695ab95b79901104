//! Question selection.
//!
//! Picks up to `desired_count` questions for a subject: first every
//! question of the requested difficulty in catalog order, then padding
//! passes over the same topics until the count is reached. Padded entries
//! get their identifier rewritten to `<id>_<n>`, where `n` is the number of
//! questions already collected.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{QuestionCatalog, TopicQuestions};
use crate::error::LearningError;
use crate::model::{Difficulty, QuestionRecord, SelectedQuestion, SelectionCriteria, SelectionResult};

/// Smallest accepted `desired_count`.
pub const MIN_QUESTION_COUNT: i64 = 1;
/// Largest accepted `desired_count`.
pub const MAX_QUESTION_COUNT: i64 = 50;

/// Which questions a padding pass may re-add.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaddingPolicy {
    /// Every question of every eligible topic, whatever its difficulty.
    #[default]
    AnyDifficulty,
    /// Only questions of the requested difficulty.
    MatchDifficulty,
}

/// Deterministic filter-and-pad question selector.
#[derive(Debug, Clone)]
pub struct QuestionSelector {
    catalog: Arc<QuestionCatalog>,
    padding: PaddingPolicy,
}

impl QuestionSelector {
    pub fn new(catalog: Arc<QuestionCatalog>) -> Self {
        Self {
            catalog,
            padding: PaddingPolicy::default(),
        }
    }

    pub fn with_padding(mut self, padding: PaddingPolicy) -> Self {
        self.padding = padding;
        self
    }

    /// Select questions for a new practice session.
    ///
    /// Validation runs before any traversal, in this order: subject,
    /// difficulty, count. Two calls with the same criteria return the same
    /// questions and differ only in `session_id`.
    pub fn select(&self, criteria: &SelectionCriteria) -> Result<SelectionResult, LearningError> {
        let topics = self
            .catalog
            .lookup_by_subject_topic(&criteria.subject)
            .ok_or_else(|| LearningError::InvalidSubject(criteria.subject.clone()))?;

        let difficulty: Difficulty = criteria
            .difficulty
            .parse()
            .map_err(|_| LearningError::InvalidDifficulty(criteria.difficulty.clone()))?;

        if !(MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT).contains(&criteria.desired_count) {
            return Err(LearningError::InvalidCount {
                value: criteria.desired_count,
                min: MIN_QUESTION_COUNT,
                max: MAX_QUESTION_COUNT,
            });
        }
        let wanted = criteria.desired_count as usize;

        let session_id = Uuid::new_v4();

        let eligible: Vec<&TopicQuestions> = topics
            .iter()
            .filter(|t| criteria.focus_topics.is_empty() || criteria.focus_topics.contains(&t.topic))
            .collect();

        let mut questions = Vec::with_capacity(wanted);

        'matching: for topic in &eligible {
            for q in &topic.questions {
                if questions.len() >= wanted {
                    break 'matching;
                }
                if q.difficulty == difficulty {
                    questions.push(SelectedQuestion::from_record(q, q.id.clone()));
                }
            }
        }

        let pads = |q: &QuestionRecord| match self.padding {
            PaddingPolicy::AnyDifficulty => true,
            PaddingPolicy::MatchDifficulty => q.difficulty == difficulty,
        };

        while questions.len() < wanted {
            let before = questions.len();

            'pass: for topic in &eligible {
                for q in topic.questions.iter().filter(|q| pads(*q)) {
                    if questions.len() >= wanted {
                        break 'pass;
                    }
                    let padded_id = format!("{}_{}", q.id, questions.len());
                    questions.push(SelectedQuestion::from_record(q, padded_id));
                }
            }

            if questions.len() == before {
                tracing::debug!(
                    subject = %criteria.subject,
                    collected = questions.len(),
                    wanted,
                    "no questions left to pad with"
                );
                break;
            }
        }

        questions.truncate(wanted);

        tracing::info!(
            %session_id,
            subject = %criteria.subject,
            %difficulty,
            count = questions.len(),
            "selected practice questions"
        );

        Ok(SelectionResult {
            session_id,
            questions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionType;

    fn record(id: &str, topic: &str, difficulty: Difficulty) -> QuestionRecord {
        QuestionRecord {
            id: id.into(),
            content: format!("content of {id}"),
            question_type: QuestionType::ShortAnswer,
            options: None,
            correct_answer: "1".into(),
            explanation: String::new(),
            difficulty,
            subject: "mathematics".into(),
            topic: topic.into(),
        }
    }

    fn criteria(difficulty: &str, count: i64, focus: &[&str]) -> SelectionCriteria {
        SelectionCriteria {
            subject: "mathematics".into(),
            grade: Some(7),
            difficulty: difficulty.into(),
            desired_count: count,
            focus_topics: focus.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn ids(result: &SelectionResult) -> Vec<&str> {
        result
            .questions
            .iter()
            .map(|q| q.question_id.as_str())
            .collect()
    }

    fn sample_selector() -> QuestionSelector {
        QuestionSelector::new(Arc::new(QuestionCatalog::sample()))
    }

    #[test]
    fn takes_first_matching_questions_in_catalog_order() {
        let mut catalog = QuestionCatalog::new();
        for (id, topic, d) in [
            ("a1", "algebra", Difficulty::Hard),
            ("a2", "algebra", Difficulty::Easy),
            ("a3", "algebra", Difficulty::Hard),
            ("g1", "geometry", Difficulty::Hard),
            ("g2", "geometry", Difficulty::Hard),
        ] {
            catalog.insert(record(id, topic, d)).unwrap();
        }
        let selector = QuestionSelector::new(Arc::new(catalog));

        let result = selector.select(&criteria("hard", 3, &[])).unwrap();
        assert_eq!(ids(&result), vec!["a1", "a3", "g1"]);
    }

    #[test]
    fn pads_sample_catalog_ignoring_difficulty() {
        let result = sample_selector()
            .select(&criteria("medium", 5, &[]))
            .unwrap();
        assert_eq!(
            ids(&result),
            vec!["math_001", "math_003", "math_001_2", "math_002_3", "math_003_4"]
        );
        assert_eq!(result.questions[3].difficulty, Difficulty::Easy);
        assert_eq!(result.questions[4].topic, "geometry");
    }

    #[test]
    fn pads_focused_topic_by_retraversal() {
        let mut catalog = QuestionCatalog::new();
        catalog.insert(record("a1", "algebra", Difficulty::Medium)).unwrap();
        catalog.insert(record("a2", "algebra", Difficulty::Medium)).unwrap();
        catalog.insert(record("g1", "geometry", Difficulty::Medium)).unwrap();
        let selector = QuestionSelector::new(Arc::new(catalog));

        let result = selector
            .select(&criteria("medium", 5, &["algebra"]))
            .unwrap();
        assert_eq!(ids(&result), vec!["a1", "a2", "a1_2", "a2_3", "a1_4"]);
        assert!(result.questions.iter().all(|q| q.topic == "algebra"));
    }

    #[test]
    fn match_difficulty_padding_skips_other_levels() {
        let result = sample_selector()
            .with_padding(PaddingPolicy::MatchDifficulty)
            .select(&criteria("medium", 4, &[]))
            .unwrap();
        assert_eq!(
            ids(&result),
            vec!["math_001", "math_003", "math_001_2", "math_003_3"]
        );
    }

    #[test]
    fn unmatched_focus_yields_empty_result() {
        let result = sample_selector()
            .select(&criteria("medium", 5, &["calculus"]))
            .unwrap();
        assert!(result.questions.is_empty());
    }

    #[test]
    fn match_difficulty_without_matches_stops() {
        let result = sample_selector()
            .with_padding(PaddingPolicy::MatchDifficulty)
            .select(&criteria("hard", 3, &[]))
            .unwrap();
        assert!(result.questions.is_empty());
    }

    #[test]
    fn never_exceeds_desired_count() {
        let selector = sample_selector();
        for count in MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT {
            for difficulty in ["easy", "medium", "hard"] {
                let result = selector.select(&criteria(difficulty, count, &[])).unwrap();
                assert_eq!(result.questions.len(), count as usize);
            }
        }
    }

    #[test]
    fn identical_calls_differ_only_in_session() {
        let selector = sample_selector();
        let first = selector.select(&criteria("easy", 7, &[])).unwrap();
        let second = selector.select(&criteria("easy", 7, &[])).unwrap();
        assert_eq!(first.questions, second.questions);
        assert_ne!(first.session_id, second.session_id);
    }

    #[test]
    fn rejects_unknown_subject_first() {
        let mut c = criteria("extreme", 0, &[]);
        c.subject = "history".into();
        let err = sample_selector().select(&c).unwrap_err();
        assert_eq!(err, LearningError::InvalidSubject("history".into()));
    }

    #[test]
    fn rejects_difficulty_before_count() {
        let err = sample_selector()
            .select(&criteria("extreme", 0, &[]))
            .unwrap_err();
        assert_eq!(err, LearningError::InvalidDifficulty("extreme".into()));
    }

    #[test]
    fn rejects_out_of_range_counts() {
        let selector = sample_selector();
        for count in [-3, 0, 51, 1000] {
            let err = selector.select(&criteria("medium", count, &[])).unwrap_err();
            assert!(
                matches!(err, LearningError::InvalidCount { value, .. } if value == count),
                "count {count} gave {err:?}"
            );
        }
    }
}
