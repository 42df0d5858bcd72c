//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - The error taxonomy returned by the user service and its HTTP mapping
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt, RepositoryError, RepositoryResult};
