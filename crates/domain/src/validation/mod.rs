//! Validation engine
//!
//! Business rules are declared per entity as a static [`RuleTable`] and
//! evaluated into a [`Notification`]; nothing here fails fast.

mod notification;
mod rules;

pub use notification::Notification;
pub use rules::{FieldRules, Rule, RuleTable};
