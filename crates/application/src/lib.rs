//! # Application Layer
//!
//! Use cases for schedules and tasks on top of the domain contracts:
//! - DTOs validated at the input boundary
//! - create/get/update/delete/list use cases over repository ports
//! - output mappers and collection presenters
//!
//! ## Dependency Direction
//!
//! ```text
//! Application Layer -> Domain Layer (entities, search, repositories)
//! Infrastructure -> Domain Layer (implements repositories)
//! ```

pub mod dtos;
pub mod errors;
pub mod use_cases;

pub use errors::ApplicationError;

/// Application layer result type
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Request context recorded on every use case span
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: uuid::Uuid,
    pub correlation_id: String,
}

impl RequestContext {
    pub fn new() -> Self {
        let request_id = uuid::Uuid::new_v4();
        Self {
            request_id,
            correlation_id: request_id.to_string(),
        }
    }

    /// Tie this request to a caller-supplied trace
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = correlation_id.into();
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
