//! ValueObject - structural equality capability
//!
//! A value object has no identity of its own: two instances are the same
//! value when they have the same concrete type and equal fields.

use std::any::Any;
use std::fmt;

/// Capability of immutable domain values compared by their fields.
///
/// Structural equality comes from the derived `PartialEq`; `equals` adds the
/// dynamic form used at untyped boundaries, where the other side may be
/// absent or of a different type.
pub trait ValueObject: PartialEq + fmt::Debug + Any {
    /// True iff `other` is present, of the same concrete type and equal.
    fn equals(&self, other: Option<&dyn Any>) -> bool
    where
        Self: Sized,
    {
        other
            .and_then(|value| value.downcast_ref::<Self>())
            .is_some_and(|value| self == value)
    }
}
