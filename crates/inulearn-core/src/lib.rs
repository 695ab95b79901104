//! inulearn-core — Question selection, answer grading and progress reporting.
//!
//! This crate defines the data model, the read-only question catalog, the
//! selection/grading engine and the collaborator traits that the rest of
//! the inulearn system builds on.

pub mod catalog;
pub mod error;
pub mod grader;
pub mod model;
pub mod parser;
pub mod progress;
pub mod selector;
pub mod service;
pub mod similar;
pub mod traits;

pub use catalog::QuestionCatalog;
pub use error::{LearningError, StoreError};
pub use service::{LearningService, LearningServiceConfig};
