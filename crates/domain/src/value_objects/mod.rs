//! Domain Value Objects - Immutable domain concepts
//!
//! Value objects represent business concepts without identity.
//! Immutable by definition, compared structurally.

pub mod identifier;
pub mod tasks_type;
pub mod time_range;
mod value_object;

pub use identifier::Identifier;
pub use tasks_type::TasksType;
pub use time_range::TimeRange;
pub use value_object::ValueObject;
