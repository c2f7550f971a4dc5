//! Entity - identity-bearing, self-validating domain object

use serde_json::Value;
use std::fmt;

use crate::errors::{DomainError, DomainResult};
use crate::time::Timestamp;
use crate::validation::{Notification, RuleTable};
use crate::value_objects::Identifier;

/// Capability shared by every aggregate root.
///
/// Equality of entities is identity-based: implementors compare the primary
/// key only. Business-rule violations are recorded in the entity's
/// notification rather than raised.
pub trait Entity: Clone + fmt::Debug + Send + Sync + 'static {
    /// Entity name used in errors and logs
    const NAME: &'static str;

    fn entity_id(&self) -> Identifier;

    fn created_at(&self) -> Timestamp;

    fn notification(&self) -> &Notification;

    fn notification_mut(&mut self) -> &mut Notification;

    fn rule_table() -> &'static RuleTable<Self>;

    /// Plain representation with camelCase keys
    fn to_json(&self) -> Value;

    /// Rebuild from the plain representation; wrong primitive types fail fast
    fn from_json(value: &Value) -> DomainResult<Self>;

    /// Evaluate the rule table without touching the notification
    fn check_invariants(&self) -> Notification {
        Self::rule_table().check(self)
    }

    /// Clear and repopulate the notification. Returns true when valid.
    fn validate(&mut self) -> bool {
        let errors = self.check_invariants();
        let notification = self.notification_mut();
        notification.clear();
        notification.copy_errors(&errors);
        !errors.has_errors()
    }

    /// Outcome of the last validation or mutation. After a rejected change the
    /// state is rolled back but the errors stay, so this is false while
    /// `ensure_valid` still passes.
    fn is_valid(&self) -> bool {
        !self.notification().has_errors()
    }

    /// Gate used by repositories before persisting
    fn ensure_valid(&self) -> DomainResult<()> {
        let errors = self.check_invariants();
        if errors.has_errors() {
            return Err(DomainError::EntityValidation {
                entity: Self::NAME,
                errors,
            });
        }
        Ok(())
    }
}

/// Apply `change`, then re-run validation. A change that breaks a rule is
/// rolled back; the notification keeps the errors that caused the rejection.
pub(crate) fn apply_change<E: Entity>(entity: &mut E, change: impl FnOnce(&mut E)) -> bool {
    let previous = entity.clone();
    change(entity);

    let errors = entity.check_invariants();
    if errors.has_errors() {
        tracing::debug!(entity = E::NAME, id = %entity.entity_id(), %errors, "change rejected");
        *entity = previous;
        let notification = entity.notification_mut();
        notification.clear();
        notification.copy_errors(&errors);
        return false;
    }

    entity.notification_mut().clear();
    true
}
