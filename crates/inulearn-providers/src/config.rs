//! Service configuration and collaborator factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use inulearn_core::selector::PaddingPolicy;
use inulearn_core::traits::{SubmissionStore, TokenService};
use inulearn_core::LearningServiceConfig;

use crate::jsonl::JsonlSubmissionStore;
use crate::jwt::JwtTokenService;
use crate::memory::InMemorySubmissionStore;

/// Secret used when none is configured. Only fit for local use.
pub const DEFAULT_SECRET: &str = "change-me";

/// Token signing settings.
///
/// Note: Custom Debug impl masks the secret to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_secret")]
    pub secret: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: u64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"***")
            .field("algorithm", &self.algorithm)
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            algorithm: default_algorithm(),
            expiration_hours: default_expiration_hours(),
        }
    }
}

fn default_secret() -> String {
    DEFAULT_SECRET.to_string()
}
fn default_algorithm() -> String {
    "HS256".to_string()
}
fn default_expiration_hours() -> u64 {
    24
}

/// Where graded submissions go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Memory,
    Jsonl,
}

/// Submission store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub kind: StoreKind,
    /// File for the `jsonl` store.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Timeout for a single store call in milliseconds.
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
    /// Retries on transient store errors.
    #[serde(default = "default_retries")]
    pub max_retries: u32,
    /// Delay before the first retry in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::Memory,
            path: None,
            timeout_ms: default_timeout(),
            max_retries: default_retries(),
            retry_delay_ms: default_retry_delay(),
        }
    }
}

fn default_timeout() -> u64 {
    2000
}
fn default_retries() -> u32 {
    2
}
fn default_retry_delay() -> u64 {
    200
}

/// Question selection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default)]
    pub padding: PaddingPolicy,
}

/// Top-level inulearn configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InulearnConfig {
    /// Catalog file or directory. `None` means the built-in sample catalog.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
}

impl InulearnConfig {
    /// Settings the learning service itself needs.
    pub fn service_config(&self) -> LearningServiceConfig {
        LearningServiceConfig {
            padding: self.selection.padding,
            store_timeout: Duration::from_millis(self.store.timeout_ms),
            max_store_retries: self.store.max_retries,
            retry_delay: Duration::from_millis(self.store.retry_delay_ms),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied verbatim and never scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `inulearn.toml` in the current directory
/// 2. `~/.config/inulearn/config.toml`
///
/// Environment variable overrides: `INULEARN_JWT_SECRET`,
/// `INULEARN_JWT_ALGORITHM`, `INULEARN_JWT_EXPIRATION_HOURS`, `INULEARN_CATALOG`.
pub fn load_config() -> Result<InulearnConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<InulearnConfig> {
    load_config_with(path, |key| std::env::var(key).ok())
}

fn load_config_with(
    path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<InulearnConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("inulearn.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let mut config = toml::from_str::<InulearnConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            resolve_file_values(&mut config, path.parent());
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => InulearnConfig::default(),
    };

    // Override values are taken literally.
    apply_env_overrides(&mut config, lookup)?;

    Ok(config)
}

/// Expand `${VAR}` references in values read from a config file, and make
/// relative paths relative to that file.
fn resolve_file_values(config: &mut InulearnConfig, dir: Option<&Path>) {
    let dir = dir.filter(|d| !d.as_os_str().is_empty());
    let locate = |path: PathBuf| {
        let path = resolve_path(&path);
        match dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path,
        }
    };

    config.auth.secret = resolve_env_vars(&config.auth.secret);
    config.auth.algorithm = resolve_env_vars(&config.auth.algorithm);
    config.catalog_path = config.catalog_path.take().map(&locate);
    config.store.path = config.store.path.take().map(&locate);
}

fn apply_env_overrides(
    config: &mut InulearnConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(secret) = lookup("INULEARN_JWT_SECRET") {
        config.auth.secret = secret;
    }
    if let Some(algorithm) = lookup("INULEARN_JWT_ALGORITHM") {
        config.auth.algorithm = algorithm;
    }
    if let Some(hours) = lookup("INULEARN_JWT_EXPIRATION_HOURS") {
        config.auth.expiration_hours = hours
            .trim()
            .parse()
            .with_context(|| format!("INULEARN_JWT_EXPIRATION_HOURS is not a number: {hours}"))?;
    }
    if let Some(catalog) = lookup("INULEARN_CATALOG") {
        config.catalog_path = Some(PathBuf::from(catalog));
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("inulearn"))
}

/// Create the token service described by the auth config.
pub fn create_token_service(config: &AuthConfig) -> Result<Arc<dyn TokenService>> {
    if config.secret == DEFAULT_SECRET {
        tracing::warn!("using the default token secret; set INULEARN_JWT_SECRET");
    }
    if config.secret.is_empty() {
        anyhow::bail!("token secret is empty");
    }

    let service = JwtTokenService::new(&config.secret, &config.algorithm, config.expiration_hours)
        .context("invalid auth configuration")?;
    Ok(Arc::new(service))
}

/// Create the submission store described by the store config.
pub fn create_submission_store(config: &StoreConfig) -> Result<Arc<dyn SubmissionStore>> {
    match config.kind {
        StoreKind::Memory => Ok(Arc::new(InMemorySubmissionStore::new())),
        StoreKind::Jsonl => {
            let path = config
                .path
                .as_ref()
                .context("store kind \"jsonl\" requires store.path")?;
            Ok(Arc::new(JsonlSubmissionStore::new(path)))
        }
    }
}
