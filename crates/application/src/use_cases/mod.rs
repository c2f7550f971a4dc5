//! Use Cases
//!
//! One struct per operation. Each holds the repository ports it needs and
//! exposes `execute` through the [`UseCase`] trait.

pub mod schedule_use_cases;
pub mod tasks_use_cases;

pub use schedule_use_cases::*;
pub use tasks_use_cases::*;

use async_trait::async_trait;

use crate::{ApplicationResult, RequestContext};

#[async_trait]
pub trait UseCase: Send + Sync {
    type Input: Send + 'static;
    type Output: Send;

    async fn execute(&self, input: Self::Input, context: RequestContext) -> ApplicationResult<Self::Output>;
}
