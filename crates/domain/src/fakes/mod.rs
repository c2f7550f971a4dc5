//! Fake-data builders for tests and fixtures
//!
//! Builders are immutable values: every `with_*` returns a new builder, so a
//! base builder can be cloned and shared across tests. All randomized
//! defaults come from a seedable [`StdRng`]; the same seed always yields the
//! same fixtures.

mod schedule_fake_builder;
mod tasks_fake_builder;

pub use schedule_fake_builder::ScheduleFakeBuilder;
pub use tasks_fake_builder::TasksFakeBuilder;

use chrono::Duration;
use fake::uuid::UUIDv4;
use fake::Fake;
use rand::rngs::StdRng;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::time::{self, Timestamp};
use crate::validation::Notification;
use crate::value_objects::Identifier;

/// 2024-01-01T00:00:00Z; random timestamps fall in the 30 days before it
pub const FIXTURE_ANCHOR_MILLIS: i64 = 1_704_067_200_000;

const THIRTY_DAYS_MILLIS: i64 = 30 * 24 * 60 * 60 * 1000;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FixtureError {
    #[error("Property {field} has no value or factory, use the with_ methods")]
    MissingFactory { field: &'static str },

    #[error("Fixture #{index} is invalid: {errors}")]
    InvalidFixtureData { index: usize, errors: Notification },

    #[error("Cannot build an empty batch of fixtures")]
    EmptyBatch,
}

pub type FixtureResult<T> = Result<T, FixtureError>;

/// Builds exactly one entity
#[derive(Debug, Clone, Copy)]
pub struct One;

/// Builds a batch of entities
#[derive(Debug, Clone, Copy)]
pub struct Many;

/// A fixed value, or a function of the build index
pub enum PropOrFactory<T> {
    Value(T),
    Factory(Arc<dyn Fn(usize) -> T + Send + Sync>),
}

impl<T: Clone> PropOrFactory<T> {
    pub fn factory(f: impl Fn(usize) -> T + Send + Sync + 'static) -> Self {
        PropOrFactory::Factory(Arc::new(f))
    }

    pub fn resolve(&self, index: usize) -> T {
        match self {
            PropOrFactory::Value(value) => value.clone(),
            PropOrFactory::Factory(factory) => factory(index),
        }
    }
}

impl<T> From<T> for PropOrFactory<T> {
    fn from(value: T) -> Self {
        PropOrFactory::Value(value)
    }
}

impl<T: Clone> Clone for PropOrFactory<T> {
    fn clone(&self) -> Self {
        match self {
            PropOrFactory::Value(value) => PropOrFactory::Value(value.clone()),
            PropOrFactory::Factory(factory) => PropOrFactory::Factory(Arc::clone(factory)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PropOrFactory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropOrFactory::Value(value) => f.debug_tuple("Value").field(value).finish(),
            PropOrFactory::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

pub(crate) fn anchor() -> Timestamp {
    time::from_millis(FIXTURE_ANCHOR_MILLIS).unwrap_or_default()
}

pub(crate) fn random_identifier(rng: &mut StdRng) -> Identifier {
    Identifier::from(UUIDv4.fake_with_rng::<Uuid, _>(rng))
}

/// Somewhere in the 30 days before the anchor
pub(crate) fn random_past_time(rng: &mut StdRng) -> Timestamp {
    anchor() - Duration::milliseconds((0..THIRTY_DAYS_MILLIS).fake_with_rng::<i64, _>(rng))
}

/// Validate each entity, reporting the first failure with its build index
pub(crate) fn ensure_fixtures_valid<E: crate::entities::Entity>(entities: &[E]) -> FixtureResult<()> {
    for (index, entity) in entities.iter().enumerate() {
        let errors = entity.check_invariants();
        if errors.has_errors() {
            return Err(FixtureError::InvalidFixtureData { index, errors });
        }
    }
    Ok(())
}
