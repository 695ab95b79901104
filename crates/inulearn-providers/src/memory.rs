//! In-memory submission store.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use inulearn_core::model::SubmissionRecord;
use inulearn_core::traits::SubmissionStore;
use inulearn_core::StoreError;

/// Keeps graded submissions in process memory.
///
/// Useful for tests and for one-shot CLI runs where nothing needs to
/// outlive the process.
#[derive(Default)]
pub struct InMemorySubmissionStore {
    records: Mutex<Vec<SubmissionRecord>>,
    call_count: AtomicU32,
}

impl InMemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of record calls made to this store.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Snapshot of every stored submission, oldest first.
    pub fn records(&self) -> Vec<SubmissionRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Stored submissions for one session.
    pub fn session_records(&self, session_id: &str) -> Vec<SubmissionRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.session_id == session_id)
            .collect()
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn record(&self, submission: &SubmissionRecord) -> Result<(), StoreError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))?
            .push(submission.clone());
        Ok(())
    }
}
