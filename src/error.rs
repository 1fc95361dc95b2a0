//! Error types for the contact manager server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ContactId;
use thiserror::Error;

/// Errors produced by the save, delete, and query workflows.
///
/// Every failure is a distinct variant so callers can branch on kind:
/// `NotFound` is a caller-input error, `Validation` is raised before any
/// repository interaction, and `Persistence` means the commit did not apply.
#[derive(Error, Debug)]
pub enum ContactError {
    /// Caller referenced a contact id that does not exist
    #[error("contact not found: {0}")]
    NotFound(ContactId),

    /// Submitted payload failed required-field or structural checks
    #[error("invalid contact payload: {0}")]
    Validation(String),

    /// The repository load or commit failed; no partial state was left behind
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// The call exceeded its deadline. The commit may or may not have
    /// applied; the repository is the source of truth and callers should
    /// re-query.
    #[error("request timed out after {0} seconds")]
    Timeout(u64),
}

/// Errors surfaced by a repository implementation.
///
/// A failed write is never silently dropped; conflicts stay distinguishable
/// from missing-record errors at the service layer.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// A staged add collided with an existing contact id
    #[error("contact id already stored: {0}")]
    DuplicateId(ContactId),

    /// A staged update or removal referenced a contact that is gone
    #[error("staged contact no longer stored: {0}")]
    StaleId(ContactId),

    /// The underlying store failed
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Failed to load .env file
    #[error("Failed to load .env file: {0}")]
    DotenvError(String),

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Convenience type alias for Results with ContactError
pub type ContactResult<T> = Result<T, ContactError>;

/// Convenience type alias for Results with PersistenceError
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
