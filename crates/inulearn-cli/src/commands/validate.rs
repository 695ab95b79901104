//! The `inulearn validate` command.

use anyhow::Result;

use inulearn_core::parser::validate_catalog;

use super::{load_configured_catalog, Settings};

pub fn execute(settings: &Settings) -> Result<()> {
    let config = settings.load()?;
    if config.catalog_path.is_none() {
        println!("No catalog configured, validating the built-in sample.");
    }
    let catalog = load_configured_catalog(&config)?;

    for subject in catalog.subjects() {
        let topics = catalog.lookup_by_subject_topic(subject).unwrap_or_default();
        let questions: usize = topics.iter().map(|t| t.questions.len()).sum();
        println!(
            "Subject: {subject} ({} topics, {questions} questions)",
            topics.len()
        );
    }

    let warnings = validate_catalog(&catalog);
    for w in &warnings {
        println!("  [{}] WARNING: {}", w.question_id, w.message);
    }

    if catalog.is_empty() {
        println!("Catalog is empty.");
    } else if warnings.is_empty() {
        println!("All questions valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
