//! JSON-lines file submission store.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use inulearn_core::model::SubmissionRecord;
use inulearn_core::traits::SubmissionStore;
use inulearn_core::StoreError;

/// Appends each graded submission as one JSON object per line.
///
/// Each append runs on the blocking pool and finishes even when the
/// calling future is dropped, so a timed-out call never leaves a partial
/// line. A retried call may append the same submission again; `load`
/// returns it once.
pub struct JsonlSubmissionStore {
    path: PathBuf,
}

impl JsonlSubmissionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every submission back from the file, first copy wins.
    pub async fn load(&self) -> anyhow::Result<Vec<SubmissionRecord>> {
        use anyhow::{Context, Result};

        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read {}", self.path.display()))
            }
        };

        let mut records = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(i, line)| {
                serde_json::from_str::<SubmissionRecord>(line).with_context(|| {
                    format!("invalid record on line {} of {}", i + 1, self.path.display())
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut seen = HashSet::new();
        records.retain(|r| seen.insert(r.submission_id));
        Ok(records)
    }
}

#[async_trait]
impl SubmissionStore for JsonlSubmissionStore {
    fn name(&self) -> &str {
        "jsonl"
    }

    async fn record(&self, submission: &SubmissionRecord) -> Result<(), StoreError> {
        let mut line =
            serde_json::to_vec(submission).map_err(|e| StoreError::Rejected(e.to_string()))?;
        line.push(b'\n');

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || append_line(&path, &line))
            .await
            .map_err(|e| StoreError::Unavailable(format!("append task failed: {e}")))??;

        tracing::debug!(path = %self.path.display(), "appended submission");
        Ok(())
    }
}

fn append_line(path: &Path, line: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::Unavailable(e.to_string()))?;
    }

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| StoreError::Unavailable(format!("{}: {e}", path.display())))?;

    file.write_all(line)
        .map_err(|e| StoreError::Unavailable(e.to_string()))
}
