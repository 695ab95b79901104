//! Learning progress reports.
//!
//! The reporter does not compute mastery. It shapes aggregate counters
//! supplied by a persistence collaborator (or the built-in sample data)
//! into a snapshot, optionally narrowed to one subject.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Overall counters across every subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallProgress {
    pub total_questions: u32,
    pub correct_answers: u32,
    /// `correct_answers / total_questions`, or 0 when nothing was answered.
    pub accuracy_rate: f64,
    pub study_time_minutes: u32,
}

impl OverallProgress {
    pub fn from_counts(total_questions: u32, correct_answers: u32, study_time_minutes: u32) -> Self {
        let accuracy_rate = if total_questions == 0 {
            0.0
        } else {
            (f64::from(correct_answers) / f64::from(total_questions)).min(1.0)
        };

        Self {
            total_questions,
            correct_answers,
            accuracy_rate,
            study_time_minutes,
        }
    }
}

/// Mastery of a single topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicProgress {
    pub topic: String,
    /// Proficiency in [0, 1].
    pub mastery_level: f64,
    #[serde(default)]
    pub last_practiced: Option<DateTime<Utc>>,
}

/// Mastery of a subject and its topics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectProgress {
    pub subject: String,
    /// Proficiency in [0, 1].
    pub mastery_level: f64,
    #[serde(default)]
    pub topics: Vec<TopicProgress>,
}

/// A learner's progress report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub overall_progress: OverallProgress,
    pub subject_progress: Vec<SubjectProgress>,
}

/// Aggregate inputs the report is built from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressData {
    pub total_questions: u32,
    pub correct_answers: u32,
    pub study_time_minutes: u32,
    #[serde(default)]
    pub subjects: Vec<SubjectProgress>,
}

impl ProgressData {
    /// Fixed demonstration figures used until a persistence layer is wired in.
    pub fn sample() -> Self {
        let now = Utc::now();
        Self {
            total_questions: 150,
            correct_answers: 120,
            study_time_minutes: 1200,
            subjects: vec![SubjectProgress {
                subject: "mathematics".into(),
                mastery_level: 0.75,
                topics: vec![
                    TopicProgress {
                        topic: "algebra".into(),
                        mastery_level: 0.85,
                        last_practiced: Some(now),
                    },
                    TopicProgress {
                        topic: "geometry".into(),
                        mastery_level: 0.65,
                        last_practiced: Some(now),
                    },
                ],
            }],
        }
    }
}

/// Filters for a progress report.
///
/// The date range is accepted for API compatibility but is not applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressQuery {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Builds progress snapshots from aggregate data.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    data: ProgressData,
}

impl ProgressReporter {
    pub fn new(data: ProgressData) -> Self {
        Self { data }
    }

    pub fn report(&self, query: &ProgressQuery) -> ProgressSnapshot {
        if query.start_date.is_some() || query.end_date.is_some() {
            tracing::debug!(
                start_date = ?query.start_date,
                end_date = ?query.end_date,
                "date range accepted but not applied to progress"
            );
        }

        let subject_progress = self
            .data
            .subjects
            .iter()
            .filter(|s| query.subject.as_ref().is_none_or(|wanted| &s.subject == wanted))
            .map(clamp_mastery)
            .collect();

        ProgressSnapshot {
            overall_progress: OverallProgress::from_counts(
                self.data.total_questions,
                self.data.correct_answers,
                self.data.study_time_minutes,
            ),
            subject_progress,
        }
    }
}

fn clamp_mastery(subject: &SubjectProgress) -> SubjectProgress {
    SubjectProgress {
        subject: subject.subject.clone(),
        mastery_level: subject.mastery_level.clamp(0.0, 1.0),
        topics: subject
            .topics
            .iter()
            .map(|t| TopicProgress {
                topic: t.topic.clone(),
                mastery_level: t.mastery_level.clamp(0.0, 1.0),
                last_practiced: t.last_practiced,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reporter() -> ProgressReporter {
        ProgressReporter::new(ProgressData::sample())
    }

    #[test]
    fn sample_overall_counters() {
        let snapshot = reporter().report(&ProgressQuery::default());
        let overall = &snapshot.overall_progress;
        assert_eq!(overall.total_questions, 150);
        assert_eq!(overall.correct_answers, 120);
        assert!((overall.accuracy_rate - 0.8).abs() < f64::EPSILON);
        assert_eq!(overall.study_time_minutes, 1200);
        assert_eq!(snapshot.subject_progress.len(), 1);
        assert_eq!(snapshot.subject_progress[0].topics.len(), 2);
    }

    #[test]
    fn filters_by_exact_subject() {
        let query = ProgressQuery {
            subject: Some("mathematics".into()),
            ..Default::default()
        };
        let snapshot = reporter().report(&query);
        assert_eq!(snapshot.subject_progress[0].subject, "mathematics");

        let query = ProgressQuery {
            subject: Some("Mathematics".into()),
            ..Default::default()
        };
        assert!(reporter().report(&query).subject_progress.is_empty());
    }

    #[test]
    fn unknown_subject_yields_empty_list() {
        let query = ProgressQuery {
            subject: Some("physics".into()),
            ..Default::default()
        };
        let snapshot = reporter().report(&query);
        assert!(snapshot.subject_progress.is_empty());
        assert_eq!(snapshot.overall_progress.total_questions, 150);
    }

    #[test]
    fn date_range_is_passed_through() {
        let query = ProgressQuery {
            subject: None,
            start_date: Some("not-a-date".into()),
            end_date: Some("2020-01-01".into()),
        };
        let snapshot = reporter().report(&query);
        assert_eq!(snapshot.subject_progress.len(), 1);
    }

    #[test]
    fn accuracy_is_zero_without_answers() {
        let overall = OverallProgress::from_counts(0, 0, 30);
        assert_eq!(overall.accuracy_rate, 0.0);
    }

    #[test]
    fn accuracy_stays_in_unit_interval() {
        assert_eq!(OverallProgress::from_counts(10, 12, 0).accuracy_rate, 1.0);
        assert!((OverallProgress::from_counts(4, 1, 0).accuracy_rate - 0.25).abs() < 1e-12);
    }

    #[test]
    fn mastery_levels_are_clamped() {
        let data = ProgressData {
            subjects: vec![SubjectProgress {
                subject: "physics".into(),
                mastery_level: 1.4,
                topics: vec![TopicProgress {
                    topic: "optics".into(),
                    mastery_level: -0.2,
                    last_practiced: None,
                }],
            }],
            ..Default::default()
        };
        let snapshot = ProgressReporter::new(data).report(&ProgressQuery::default());
        assert_eq!(snapshot.subject_progress[0].mastery_level, 1.0);
        assert_eq!(snapshot.subject_progress[0].topics[0].mastery_level, 0.0);
    }
}
