//! Domain Errors - Business rule violations
//!
//! Contains ONLY fast-fail domain errors. Business-rule violations on
//! entities are collected in a [`Notification`] and never raised from here,
//! except when a repository refuses to persist an invalid entity.

use crate::validation::Notification;
use thiserror::Error;

/// Domain-specific errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Wrong primitive type supplied while reconstructing an entity
    #[error("Field '{field}' expected {expected}, found {found}")]
    StructuralType {
        field: String,
        expected: &'static str,
        found: String,
    },

    /// Identifier token is not a well-formed UUID
    #[error("Invalid identifier format: {0}")]
    InvalidIdentifierFormat(String),

    /// Unknown task category
    #[error("Invalid tasks type: {0}")]
    InvalidTasksType(String),

    /// Malformed pagination, sort or filter request
    #[error("Invalid search params: {0}")]
    InvalidSearchParams(String),

    /// Entity refused by a persistence operation because it has validation errors
    #[error("{entity} failed validation: {errors}")]
    EntityValidation {
        entity: &'static str,
        errors: Notification,
    },

    #[error("{entity} not found with ID: {id}")]
    EntityNotFound { entity: &'static str, id: String },

    #[error("{entity} already exists with ID: {id}")]
    EntityAlreadyExists { entity: &'static str, id: String },

    /// Storage collaborator failure
    #[error("Persistence failure during {operation}: {message}")]
    Persistence { operation: String, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn structural(field: impl Into<String>, expected: &'static str, found: impl Into<String>) -> Self {
        Self::StructuralType {
            field: field.into(),
            expected,
            found: found.into(),
        }
    }

    pub fn persistence(operation: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self::Persistence {
            operation: operation.into(),
            message: error.to_string(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::EntityNotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Check if error is caused by caller input
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            DomainError::StructuralType { .. }
                | DomainError::InvalidIdentifierFormat(_)
                | DomainError::InvalidTasksType(_)
                | DomainError::InvalidSearchParams(_)
                | DomainError::EntityValidation { .. }
        )
    }

    pub fn is_not_found_error(&self) -> bool {
        matches!(self, DomainError::EntityNotFound { .. })
    }

    /// Get error category for the transport layer
    pub fn category(&self) -> ErrorCategory {
        match self {
            e if e.is_validation_error() => ErrorCategory::Validation,
            DomainError::EntityNotFound { .. } => ErrorCategory::NotFound,
            DomainError::EntityAlreadyExists { .. } => ErrorCategory::Conflict,
            _ => ErrorCategory::Infrastructure,
        }
    }
}

/// Categories of domain errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller supplied malformed or invalid data
    Validation,
    /// Resource not found
    NotFound,
    /// Resource already exists
    Conflict,
    /// Storage or configuration failure
    Infrastructure,
}
