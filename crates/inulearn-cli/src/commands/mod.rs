//! Subcommand implementations and the wiring they share.

pub mod generate;
pub mod init;
pub mod progress;
pub mod similar;
pub mod submit;
pub mod token;
pub mod validate;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use inulearn_core::parser::load_catalog;
use inulearn_core::progress::ProgressData;
use inulearn_core::{LearningService, QuestionCatalog};
use inulearn_providers::config::load_config_from;
use inulearn_providers::{create_submission_store, create_token_service, InulearnConfig};

/// Global flags every subcommand sees.
pub struct Settings {
    pub config: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
}

impl Settings {
    /// Load the config file and apply the `--catalog` override.
    pub fn load(&self) -> Result<InulearnConfig> {
        let mut config = load_config_from(self.config.as_deref())?;
        if let Some(catalog) = &self.catalog {
            config.catalog_path = Some(catalog.clone());
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Load the configured catalog, or the built-in sample when none is set.
pub fn load_configured_catalog(config: &InulearnConfig) -> Result<QuestionCatalog> {
    match &config.catalog_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("catalog not found: {}", path.display());
            }
            let catalog = load_catalog(path)
                .with_context(|| format!("failed to load catalog: {}", path.display()))?;
            tracing::debug!(path = %path.display(), questions = catalog.len(), "loaded catalog");
            Ok(catalog)
        }
        None => Ok(QuestionCatalog::sample()),
    }
}

/// Build the learning service from config.
///
/// The token service is only constructed when a command needs one, so the
/// default-secret warning stays off unrelated commands.
pub fn build_service(config: &InulearnConfig, with_tokens: bool) -> Result<LearningService> {
    let catalog = Arc::new(load_configured_catalog(config)?);
    let store = create_submission_store(&config.store)?;

    let service = LearningService::new(
        catalog,
        ProgressData::sample(),
        store,
        config.service_config(),
    );

    if with_tokens {
        Ok(service.with_token_service(create_token_service(&config.auth)?))
    } else {
        Ok(service)
    }
}

/// Verify `token` when one was given.
pub fn authorize(service: &LearningService, token: Option<&str>) -> Result<()> {
    if let Some(token) = token {
        let claims = service.authorize(token)?;
        tracing::info!(user = %claims.sub, role = %claims.role, "authorized");
    }
    Ok(())
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
