//! Rule tables - explicit, inspectable validation declarations
//!
//! Every entity declares a static table mapping a field name to an ordered
//! list of predicate + message pairs. One generic evaluator walks the table.

use super::Notification;

/// Single validation rule: the predicate must hold for the target
pub struct Rule<T> {
    passes: fn(&T) -> bool,
    message: &'static str,
}

impl<T> Rule<T> {
    pub const fn new(passes: fn(&T) -> bool, message: &'static str) -> Self {
        Self { passes, message }
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    pub fn holds_for(&self, target: &T) -> bool {
        (self.passes)(target)
    }
}

/// Ordered rules attached to one field
pub struct FieldRules<T: 'static> {
    pub field: &'static str,
    pub rules: &'static [Rule<T>],
}

/// Rule table of an entity
pub struct RuleTable<T: 'static> {
    entity: &'static str,
    fields: &'static [FieldRules<T>],
}

impl<T> RuleTable<T> {
    pub const fn new(entity: &'static str, fields: &'static [FieldRules<T>]) -> Self {
        Self { entity, fields }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Field names covered by this table, in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.field)
    }

    /// Evaluate every rule and return the collected errors
    pub fn check(&self, target: &T) -> Notification {
        let mut notification = Notification::new();
        self.check_into(target, &mut notification);
        notification
    }

    /// Evaluate every rule, appending failures to `notification`
    pub fn check_into(&self, target: &T, notification: &mut Notification) {
        for field_rules in self.fields {
            for rule in field_rules.rules {
                if !rule.holds_for(target) {
                    notification.add_error(field_rules.field, rule.message);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Window {
        start: i32,
        end: i32,
    }

    const START_RULES: &[Rule<Window>] = &[Rule::new(|w| w.start >= 0, "start must not be negative")];

    const END_RULES: &[Rule<Window>] = &[
        Rule::new(|w| w.end >= w.start, "end must not be before start"),
        Rule::new(|w| w.end < 100, "end must be below 100"),
    ];

    const WINDOW_FIELDS: &[FieldRules<Window>] = &[
        FieldRules { field: "start", rules: START_RULES },
        FieldRules { field: "end", rules: END_RULES },
    ];

    static WINDOW_RULES: RuleTable<Window> = RuleTable::new("Window", WINDOW_FIELDS);

    #[test]
    fn test_valid_target_has_no_errors() {
        let notification = WINDOW_RULES.check(&Window { start: 1, end: 5 });
        assert!(!notification.has_errors());
    }

    #[test]
    fn test_all_failing_rules_are_reported_in_order() {
        let notification = WINDOW_RULES.check(&Window { start: -1, end: 200 });
        assert_eq!(notification.errors_for("start").len(), 1);
        assert_eq!(notification.errors_for("end"), ["end must be below 100".to_string()]);

        let notification = WINDOW_RULES.check(&Window { start: 150, end: 120 });
        assert_eq!(
            notification.errors_for("end"),
            [
                "end must not be before start".to_string(),
                "end must be below 100".to_string()
            ]
        );
    }

    #[test]
    fn test_table_is_inspectable() {
        assert_eq!(WINDOW_RULES.entity(), "Window");
        assert_eq!(WINDOW_RULES.fields().collect::<Vec<_>>(), vec!["start", "end"]);
    }
}
