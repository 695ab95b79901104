//! inulearn-providers — Collaborator integrations.
//!
//! Implements the `TokenService` and `SubmissionStore` traits from
//! `inulearn-core`, and loads the configuration that decides which ones a
//! deployment uses.

pub mod config;
pub mod error;
pub mod jsonl;
pub mod jwt;
pub mod memory;
pub mod mock;

pub use config::{create_submission_store, create_token_service, load_config, InulearnConfig};
pub use error::AuthError;
