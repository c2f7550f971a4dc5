//! Tasks - a unit of work attached to a schedule
//!
//! `scheduleId` must reference an existing schedule. The entity does not
//! check it; the create use case and the storage foreign key do.

mod search;

use serde_json::{json, Value};

pub use search::{TasksFilter, TasksSortField};

use super::entity::{apply_change, Entity};
use super::json;
use crate::errors::DomainResult;
use crate::time::{self, Timestamp};
use crate::validation::{FieldRules, Notification, Rule, RuleTable};
use crate::value_objects::{Identifier, TasksType};

/// Longest task, in minutes
pub const MAX_DURATION_MINUTES: i32 = 24 * 60;

#[derive(Debug, Clone, PartialEq)]
pub struct TasksProps {
    pub tasks_id: Option<Identifier>,
    pub account_id: Identifier,
    pub schedule_id: Identifier,
    pub tasks_type: TasksType,
    pub start_time: Option<Timestamp>,
    pub duration: Option<i32>,
    pub created_at: Option<Timestamp>,
}

impl TasksProps {
    pub fn new(account_id: Identifier, schedule_id: Identifier, tasks_type: TasksType) -> Self {
        Self {
            tasks_id: None,
            account_id,
            schedule_id,
            tasks_type,
            start_time: None,
            duration: None,
            created_at: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tasks {
    tasks_id: Identifier,
    account_id: Identifier,
    schedule_id: Identifier,
    tasks_type: TasksType,
    start_time: Option<Timestamp>,
    /// Minutes
    duration: Option<i32>,
    created_at: Timestamp,
    notification: Notification,
}

const DURATION_RULES: &[Rule<Tasks>] = &[
    Rule::new(
        |tasks: &Tasks| tasks.duration.map_or(true, |d| d >= 0),
        "duration must not be negative",
    ),
    Rule::new(
        |tasks: &Tasks| tasks.duration.map_or(true, |d| d <= MAX_DURATION_MINUTES),
        "duration must not exceed 1440 minutes",
    ),
];

const TASKS_FIELDS: &[FieldRules<Tasks>] = &[FieldRules {
    field: "duration",
    rules: DURATION_RULES,
}];

static TASKS_RULES: RuleTable<Tasks> = RuleTable::new("Tasks", TASKS_FIELDS);

impl Tasks {
    pub fn new(props: TasksProps) -> Self {
        let mut tasks = Self {
            tasks_id: props.tasks_id.unwrap_or_default(),
            account_id: props.account_id,
            schedule_id: props.schedule_id,
            tasks_type: props.tasks_type,
            start_time: props.start_time.map(time::normalize),
            duration: props.duration,
            created_at: props.created_at.map_or_else(time::now, time::normalize),
            notification: Notification::new(),
        };
        tasks.validate();
        tasks
    }

    pub fn tasks_id(&self) -> Identifier {
        self.tasks_id
    }

    pub fn account_id(&self) -> Identifier {
        self.account_id
    }

    pub fn schedule_id(&self) -> Identifier {
        self.schedule_id
    }

    pub fn tasks_type(&self) -> TasksType {
        self.tasks_type
    }

    pub fn start_time(&self) -> Option<Timestamp> {
        self.start_time
    }

    pub fn duration(&self) -> Option<i32> {
        self.duration
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn change_type(&mut self, tasks_type: TasksType) -> bool {
        apply_change(self, |t| t.tasks_type = tasks_type)
    }

    pub fn change_start_time(&mut self, start_time: Option<Timestamp>) -> bool {
        apply_change(self, |t| t.start_time = start_time.map(time::normalize))
    }

    pub fn change_duration(&mut self, duration: Option<i32>) -> bool {
        apply_change(self, |t| t.duration = duration)
    }
}

impl Entity for Tasks {
    const NAME: &'static str = "Tasks";

    fn entity_id(&self) -> Identifier {
        self.tasks_id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn notification(&self) -> &Notification {
        &self.notification
    }

    fn notification_mut(&mut self) -> &mut Notification {
        &mut self.notification
    }

    fn rule_table() -> &'static RuleTable<Self> {
        &TASKS_RULES
    }

    fn to_json(&self) -> Value {
        json!({
            "tasksId": self.tasks_id.as_string(),
            "accountId": self.account_id.as_string(),
            "scheduleId": self.schedule_id.as_string(),
            "type": self.tasks_type.as_str(),
            "startTime": json::timestamp_value(self.start_time.as_ref()),
            "duration": self.duration,
            "createdAt": time::format(&self.created_at),
        })
    }

    fn from_json(value: &Value) -> DomainResult<Self> {
        let fields = json::object(Self::NAME, value)?;
        Ok(Self::new(TasksProps {
            tasks_id: json::optional_identifier(fields, "tasksId")?,
            account_id: json::required_identifier(fields, "accountId")?,
            schedule_id: json::required_identifier(fields, "scheduleId")?,
            tasks_type: json::required_str(fields, "type")?.parse()?,
            start_time: json::optional_timestamp(fields, "startTime")?,
            duration: json::optional_i32(fields, "duration")?,
            created_at: json::optional_timestamp(fields, "createdAt")?,
        }))
    }
}

impl PartialEq for Tasks {
    fn eq(&self, other: &Self) -> bool {
        self.tasks_id == other.tasks_id
    }
}

impl Eq for Tasks {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainError;
    use crate::fakes::TasksFakeBuilder;
    use rstest::rstest;

    fn props() -> TasksProps {
        TasksProps::new(Identifier::new(), Identifier::new(), TasksType::Call)
    }

    #[rstest]
    #[case(None, 0)]
    #[case(Some(0), 0)]
    #[case(Some(1440), 0)]
    #[case(Some(-1), 1)]
    #[case(Some(1441), 1)]
    fn test_duration_rules(#[case] duration: Option<i32>, #[case] expected_errors: usize) {
        let tasks = Tasks::new(TasksProps { duration, ..props() });
        assert_eq!(tasks.notification().errors_for("duration").len(), expected_errors);
        assert_eq!(tasks.ensure_valid().is_ok(), expected_errors == 0);
    }

    #[test]
    fn test_rejected_duration_keeps_previous_value() {
        let mut tasks = Tasks::new(TasksProps {
            duration: Some(30),
            ..props()
        });

        assert!(!tasks.change_duration(Some(-5)));
        assert_eq!(tasks.duration(), Some(30));
        assert_eq!(
            tasks.notification().errors_for("duration"),
            ["duration must not be negative"]
        );

        assert!(tasks.change_duration(Some(45)));
        assert_eq!(tasks.duration(), Some(45));
        assert!(tasks.is_valid());
    }

    #[test]
    fn test_change_type_and_start() {
        let mut tasks = TasksFakeBuilder::a_tasks().with_seed(5).build().unwrap();
        let start = time::now();

        assert!(tasks.change_type(TasksType::Visit));
        assert!(tasks.change_start_time(Some(start)));
        assert_eq!(tasks.tasks_type(), TasksType::Visit);
        assert_eq!(tasks.start_time(), Some(start));
    }

    #[test]
    fn test_json_keys_and_round_trip() {
        let tasks = TasksFakeBuilder::a_tasks().with_seed(9).build().unwrap();
        let json = tasks.to_json();

        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            ["accountId", "createdAt", "duration", "scheduleId", "startTime", "tasksId", "type"]
        );

        let back = Tasks::from_json(&json).unwrap();
        assert_eq!(back, tasks);
        assert_eq!(back.to_json(), json);
    }

    #[test]
    fn test_from_json_errors() {
        let base = json!({
            "accountId": Identifier::new().as_string(),
            "scheduleId": Identifier::new().as_string(),
            "type": "lunch",
        });
        assert_eq!(
            Tasks::from_json(&base).unwrap_err(),
            DomainError::InvalidTasksType("lunch".to_string())
        );

        let mut wrong_duration = base.clone();
        wrong_duration["type"] = json!("call");
        wrong_duration["duration"] = json!("long");
        assert_eq!(
            Tasks::from_json(&wrong_duration).unwrap_err(),
            DomainError::structural("duration", "integer", "string")
        );

        let mut missing_schedule = base;
        missing_schedule["type"] = json!("call");
        missing_schedule.as_object_mut().unwrap().remove("scheduleId");
        assert_eq!(
            Tasks::from_json(&missing_schedule).unwrap_err(),
            DomainError::structural("scheduleId", "string", "null")
        );
    }
}
