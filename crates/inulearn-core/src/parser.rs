//! TOML question catalog parser.
//!
//! Loads catalogs from TOML files and directories, and validates them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::QuestionCatalog;
use crate::model::{Difficulty, QuestionRecord, QuestionType};

/// Intermediate TOML structure for parsing catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    catalog: TomlCatalogHeader,
    #[serde(default)]
    topics: Vec<TomlTopic>,
}

#[derive(Debug, Deserialize)]
struct TomlCatalogHeader {
    subject: String,
}

#[derive(Debug, Deserialize)]
struct TomlTopic {
    name: String,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    content: String,
    #[serde(rename = "type")]
    question_type: String,
    #[serde(default)]
    options: Option<Vec<String>>,
    correct_answer: String,
    #[serde(default)]
    explanation: String,
    difficulty: String,
}

/// Parse a single TOML file into a `QuestionCatalog`.
pub fn parse_catalog(path: &Path) -> Result<QuestionCatalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a `QuestionCatalog` (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<QuestionCatalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let subject = parsed.catalog.subject;
    let mut catalog = QuestionCatalog::new();

    for topic in parsed.topics {
        for q in topic.questions {
            let question_type: QuestionType = q
                .question_type
                .parse()
                .map_err(|e: String| anyhow::anyhow!("question {}: {}", q.id, e))?;
            let difficulty: Difficulty = q
                .difficulty
                .parse()
                .map_err(|e: String| anyhow::anyhow!("question {}: {}", q.id, e))?;

            catalog
                .insert(QuestionRecord {
                    id: q.id,
                    content: q.content,
                    question_type,
                    options: q.options,
                    correct_answer: q.correct_answer,
                    explanation: q.explanation,
                    difficulty,
                    subject: subject.clone(),
                    topic: topic.name.clone(),
                })
                .with_context(|| format!("invalid catalog: {}", source_path.display()))?;
        }
    }

    Ok(catalog)
}

/// Recursively load and merge all `.toml` catalog files from a directory.
///
/// Files are visited in name order so the merged topic order is stable.
pub fn load_catalog_directory(dir: &Path) -> Result<QuestionCatalog> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    let mut catalog = QuestionCatalog::new();
    for path in paths {
        if path.is_dir() {
            catalog.extend(load_catalog_directory(&path)?)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_catalog(&path) {
                Ok(part) => catalog
                    .extend(part)
                    .with_context(|| format!("failed to merge {}", path.display()))?,
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(catalog)
}

/// Load a catalog from either a single file or a directory of files.
pub fn load_catalog(path: &Path) -> Result<QuestionCatalog> {
    if path.is_dir() {
        load_catalog_directory(path)
    } else {
        parse_catalog(path)
    }
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question the warning is about.
    pub question_id: String,
    /// Warning message.
    pub message: String,
}

/// Validate a catalog for common authoring mistakes.
pub fn validate_catalog(catalog: &QuestionCatalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for q in catalog.records() {
        let mut warn = |message: String| {
            warnings.push(ValidationWarning {
                question_id: q.id.clone(),
                message,
            })
        };

        if q.content.trim().is_empty() {
            warn("content is empty".into());
        }
        if q.correct_answer.trim().is_empty() {
            warn("correct_answer is empty".into());
        }

        match (q.question_type, &q.options) {
            (QuestionType::MultipleChoice, None) => {
                warn("multiple_choice question has no options".into());
            }
            (QuestionType::MultipleChoice, Some(options)) => {
                let answer = q.correct_answer.to_lowercase();
                if !options.iter().any(|o| o.to_lowercase() == answer) {
                    warn(format!(
                        "correct_answer '{}' is not among the options",
                        q.correct_answer
                    ));
                }
            }
            (QuestionType::ShortAnswer, Some(_)) => {
                warn("short_answer question has options that will be ignored".into());
            }
            (QuestionType::ShortAnswer, None) => {}
        }
    }

    warnings
}
