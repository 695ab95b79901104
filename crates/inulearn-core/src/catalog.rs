//! In-memory question catalog.
//!
//! Questions are grouped by subject, then topic, and every level keeps the
//! order in which it was first inserted. Selection walks that order, so it
//! is part of the catalog's contract. The catalog is built once at startup
//! and shared read-only (usually behind an `Arc`).

use anyhow::Result;

use crate::model::{Difficulty, QuestionRecord, QuestionType};

/// The questions of one topic, in stored order.
#[derive(Debug, Clone)]
pub struct TopicQuestions {
    pub topic: String,
    pub questions: Vec<QuestionRecord>,
}

#[derive(Debug, Clone)]
struct SubjectEntry {
    subject: String,
    topics: Vec<TopicQuestions>,
}

/// Read-only mapping of subject → topic → ordered question records.
#[derive(Debug, Clone, Default)]
pub struct QuestionCatalog {
    subjects: Vec<SubjectEntry>,
}

impl QuestionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a question under its own subject and topic.
    ///
    /// Fails if another question already uses the same identifier.
    pub fn insert(&mut self, record: QuestionRecord) -> Result<()> {
        if self.find_by_id(&record.id).is_some() {
            anyhow::bail!("duplicate question ID: {}", record.id);
        }

        let subject_idx = match self
            .subjects
            .iter()
            .position(|s| s.subject == record.subject)
        {
            Some(idx) => idx,
            None => {
                self.subjects.push(SubjectEntry {
                    subject: record.subject.clone(),
                    topics: Vec::new(),
                });
                self.subjects.len() - 1
            }
        };

        let topics = &mut self.subjects[subject_idx].topics;
        match topics.iter_mut().find(|t| t.topic == record.topic) {
            Some(topic) => topic.questions.push(record),
            None => topics.push(TopicQuestions {
                topic: record.topic.clone(),
                questions: vec![record],
            }),
        }

        Ok(())
    }

    /// Merge every question of `other` into this catalog.
    pub fn extend(&mut self, other: QuestionCatalog) -> Result<()> {
        for record in other.into_records() {
            self.insert(record)?;
        }
        Ok(())
    }

    /// Topics of `subject` in catalog order, or `None` for an unknown subject.
    pub fn lookup_by_subject_topic(&self, subject: &str) -> Option<&[TopicQuestions]> {
        self.subjects
            .iter()
            .find(|s| s.subject == subject)
            .map(|s| s.topics.as_slice())
    }

    /// Scan the whole catalog for a question identifier.
    pub fn find_by_id(&self, question_id: &str) -> Option<&QuestionRecord> {
        self.records().find(|q| q.id == question_id)
    }

    pub fn contains_subject(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s.subject == subject)
    }

    /// Subject names in catalog order.
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.subjects.iter().map(|s| s.subject.as_str())
    }

    /// Every question in catalog order.
    pub fn records(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.subjects
            .iter()
            .flat_map(|s| s.topics.iter())
            .flat_map(|t| t.questions.iter())
    }

    fn into_records(self) -> impl Iterator<Item = QuestionRecord> {
        self.subjects
            .into_iter()
            .flat_map(|s| s.topics.into_iter())
            .flat_map(|t| t.questions.into_iter())
    }

    pub fn len(&self) -> usize {
        self.records().count()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// The built-in sample bank: one mathematics subject with algebra and
    /// geometry topics.
    pub fn sample() -> Self {
        let algebra = vec![
            sample_record(
                "math_001",
                "Solve the equation 2x + 3 = 7",
                QuestionType::MultipleChoice,
                Some(&["x=1", "x=2", "x=3", "x=4"]),
                "x=2",
                "Move 3 to the right-hand side to get 2x = 4, then divide by 2 to get x = 2",
                Difficulty::Medium,
                "algebra",
            ),
            sample_record(
                "math_002",
                "Simplify 3x + 2x - x",
                QuestionType::ShortAnswer,
                None,
                "4x",
                "Combine like terms: 3x + 2x - x = (3 + 2 - 1)x = 4x",
                Difficulty::Easy,
                "algebra",
            ),
        ];
        let geometry = vec![sample_record(
            "math_003",
            "Compute the area of a circle with radius 5",
            QuestionType::ShortAnswer,
            None,
            "25π",
            "The area of a circle is A = πr², so A = π × 5² = 25π",
            Difficulty::Medium,
            "geometry",
        )];

        Self {
            subjects: vec![SubjectEntry {
                subject: "mathematics".into(),
                topics: vec![
                    TopicQuestions {
                        topic: "algebra".into(),
                        questions: algebra,
                    },
                    TopicQuestions {
                        topic: "geometry".into(),
                        questions: geometry,
                    },
                ],
            }],
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn sample_record(
    id: &str,
    content: &str,
    question_type: QuestionType,
    options: Option<&[&str]>,
    correct_answer: &str,
    explanation: &str,
    difficulty: Difficulty,
    topic: &str,
) -> QuestionRecord {
    QuestionRecord {
        id: id.into(),
        content: content.into(),
        question_type,
        options: options.map(|o| o.iter().map(|s| s.to_string()).collect()),
        correct_answer: correct_answer.into(),
        explanation: explanation.into(),
        difficulty,
        subject: "mathematics".into(),
        topic: topic.into(),
    }
}
