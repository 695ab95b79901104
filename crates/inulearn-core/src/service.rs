//! Learning service facade.
//!
//! Owns the selector, grader and progress reporter (all sharing one
//! read-only catalog) plus the injected collaborators, and dispatches each
//! inbound request to exactly one of them.

use std::sync::Arc;
use std::time::Duration;

use tracing::instrument;

use crate::catalog::QuestionCatalog;
use crate::error::{LearningError, StoreError};
use crate::grader::AnswerGrader;
use crate::model::{
    AnswerSubmission, SelectionCriteria, SelectionResult, SimilarQuestionStub, SubmissionRecord,
};
use crate::progress::{ProgressData, ProgressQuery, ProgressReporter, ProgressSnapshot};
use crate::selector::{PaddingPolicy, QuestionSelector};
use crate::similar::similar_questions;
use crate::traits::{Claims, SubmissionStore, TokenService};

const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Configuration for the learning service.
#[derive(Debug, Clone)]
pub struct LearningServiceConfig {
    /// Which questions padding passes may re-add.
    pub padding: PaddingPolicy,
    /// Timeout for a single store call.
    pub store_timeout: Duration,
    /// Retries on transient store errors.
    pub max_store_retries: u32,
    /// Delay before the first retry; doubles on each further retry.
    pub retry_delay: Duration,
}

impl Default for LearningServiceConfig {
    fn default() -> Self {
        Self {
            padding: PaddingPolicy::AnyDifficulty,
            store_timeout: Duration::from_secs(2),
            max_store_retries: 2,
            retry_delay: Duration::from_millis(200),
        }
    }
}

/// The learning service.
pub struct LearningService {
    selector: QuestionSelector,
    grader: AnswerGrader,
    progress: ProgressReporter,
    store: Arc<dyn SubmissionStore>,
    tokens: Option<Arc<dyn TokenService>>,
    config: LearningServiceConfig,
}

impl LearningService {
    pub fn new(
        catalog: Arc<QuestionCatalog>,
        progress: ProgressData,
        store: Arc<dyn SubmissionStore>,
        config: LearningServiceConfig,
    ) -> Self {
        Self {
            selector: QuestionSelector::new(Arc::clone(&catalog)).with_padding(config.padding),
            grader: AnswerGrader::new(catalog),
            progress: ProgressReporter::new(progress),
            store,
            tokens: None,
            config,
        }
    }

    pub fn with_token_service(mut self, tokens: Arc<dyn TokenService>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Verify a bearer token. Without a token service every token is rejected.
    pub fn authorize(&self, token: &str) -> Result<Claims, LearningError> {
        match &self.tokens {
            Some(tokens) => tokens.verify(token),
            None => Err(LearningError::InvalidToken(
                "no token service configured".into(),
            )),
        }
    }

    /// Select a fresh set of practice questions.
    pub fn generate_questions(
        &self,
        criteria: &SelectionCriteria,
    ) -> Result<SelectionResult, LearningError> {
        self.selector.select(criteria)
    }

    /// Grade an answer and hand the record to the submission store.
    ///
    /// A store failure is logged; the graded record is returned either way.
    #[instrument(skip(self, submission), fields(question_id = %submission.question_id))]
    pub async fn submit_answer(
        &self,
        submission: &AnswerSubmission,
    ) -> Result<SubmissionRecord, LearningError> {
        let record = self.grader.grade_submission(submission)?;

        if let Err(e) = self.persist(&record).await {
            tracing::error!(
                store = self.store.name(),
                submission_id = %record.submission_id,
                "submission not persisted: {e}"
            );
        }

        Ok(record)
    }

    /// Report progress, optionally for one subject.
    pub fn get_progress(&self, query: &ProgressQuery) -> ProgressSnapshot {
        self.progress.report(query)
    }

    /// Placeholder similar questions for `question_id`.
    pub fn get_similar_questions(
        &self,
        question_id: &str,
        count: i64,
    ) -> Result<Vec<SimilarQuestionStub>, LearningError> {
        similar_questions(question_id, count)
    }

    async fn persist(&self, record: &SubmissionRecord) -> Result<(), StoreError> {
        let timeout_ms = self.config.store_timeout.as_millis() as u64;
        let mut retry_delay = self.config.retry_delay.min(MAX_RETRY_DELAY);
        let mut last_error = None;

        for attempt in 0..=self.config.max_store_retries {
            if attempt > 0 {
                tokio::time::sleep(retry_delay).await;
                retry_delay = (retry_delay * 2).min(MAX_RETRY_DELAY);
            }

            let outcome =
                match tokio::time::timeout(self.config.store_timeout, self.store.record(record))
                    .await
                {
                    Ok(result) => result,
                    Err(_) => Err(StoreError::Timeout(timeout_ms)),
                };

            match outcome {
                Ok(()) => return Ok(()),
                Err(e) if e.is_permanent() => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        store = self.store.name(),
                        attempt,
                        "store attempt failed: {e}"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| StoreError::Unavailable("no attempt made".into())))
    }
}
