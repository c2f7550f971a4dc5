//! Application Layer Errors
//!
//! Wraps domain failures and adds the input-boundary and lookup failures
//! that only use cases can detect.

use domain::errors::{DomainError, ErrorCategory};
use domain::Notification;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain layer errors
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Input or entity validation failed; `errors` maps field -> messages
    #[error("Validation failed: {errors}")]
    Validation { errors: Notification },

    #[error("Resource not found: {resource_type} with ID '{id}'")]
    NotFound { resource_type: String, id: String },

    /// Storage or wiring failure outside the domain
    #[error("Infrastructure error: {message}")]
    Infrastructure { message: String },
}

impl ApplicationError {
    pub fn validation(errors: Notification) -> Self {
        Self::Validation { errors }
    }

    /// Single-field validation failure
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Notification::new();
        errors.add_error(field, message);
        Self::Validation { errors }
    }

    pub fn not_found<R: Into<String>, I: ToString>(resource_type: R, id: I) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.to_string(),
        }
    }

    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
        }
    }

    /// Field -> messages, for validation failures of either layer
    pub fn validation_errors(&self) -> Option<&Notification> {
        match self {
            Self::Validation { errors } => Some(errors),
            Self::Domain(DomainError::EntityValidation { errors, .. }) => Some(errors),
            _ => None,
        }
    }

    /// Get error category for logs and transport mapping
    pub fn category(&self) -> &'static str {
        match self {
            Self::Domain(e) => match e.category() {
                ErrorCategory::Validation => "validation",
                ErrorCategory::NotFound => "not_found",
                ErrorCategory::Conflict => "conflict",
                ErrorCategory::Infrastructure => "infrastructure",
            },
            Self::Validation { .. } => "validation",
            Self::NotFound { .. } => "not_found",
            Self::Infrastructure { .. } => "infrastructure",
        }
    }

    /// Caused by the caller rather than by the system
    pub fn is_client_error(&self) -> bool {
        !matches!(self.category(), "infrastructure")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(ApplicationError::not_found("Schedule", "abc").category(), "not_found");
        assert_eq!(ApplicationError::invalid_field("accountId", "is required").category(), "validation");
        assert_eq!(ApplicationError::infrastructure("pool closed").category(), "infrastructure");

        let conflict: ApplicationError = DomainError::EntityAlreadyExists {
            entity: "Tasks",
            id: "abc".to_string(),
        }
        .into();
        assert_eq!(conflict.category(), "conflict");
        assert!(conflict.is_client_error());

        let storage: ApplicationError = DomainError::persistence("insert", "disk full").into();
        assert!(!storage.is_client_error());
    }

    #[test]
    fn test_validation_errors_from_both_layers() {
        let error = ApplicationError::invalid_field("scheduleId", "must be a valid UUID");
        let errors = error.validation_errors().unwrap();
        assert_eq!(errors.errors_for("scheduleId"), ["must be a valid UUID"]);

        let mut notification = Notification::new();
        notification.add_error("endTime", "endTime must not be before startTime");
        let error: ApplicationError = DomainError::EntityValidation {
            entity: "Schedule",
            errors: notification,
        }
        .into();
        assert!(error.validation_errors().is_some());
        assert!(error.is_client_error());
    }
}
