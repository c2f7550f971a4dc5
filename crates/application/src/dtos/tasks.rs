use domain::search::RawSearchParams;
use domain::time;
use domain::Tasks;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{validate_identifier, validate_tasks_type, validate_timestamp};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTasksInput {
    #[validate(required(message = "accountId is required"), custom = "validate_identifier")]
    pub account_id: Option<String>,

    #[validate(required(message = "scheduleId is required"), custom = "validate_identifier")]
    pub schedule_id: Option<String>,

    #[serde(rename = "type")]
    #[validate(required(message = "type is required"), custom = "validate_tasks_type")]
    pub tasks_type: Option<String>,

    #[validate(custom = "validate_timestamp")]
    pub start_time: Option<String>,

    /// Minutes; range rules are enforced by the entity
    pub duration: Option<i32>,
}

/// Only the provided fields are changed
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTasksInput {
    #[validate(required(message = "tasksId is required"), custom = "validate_identifier")]
    pub tasks_id: Option<String>,

    #[serde(rename = "type")]
    #[validate(custom = "validate_tasks_type")]
    pub tasks_type: Option<String>,

    #[validate(custom = "validate_timestamp")]
    pub start_time: Option<String>,

    pub duration: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksInput {
    #[serde(flatten)]
    pub params: RawSearchParams,

    #[validate(custom = "validate_identifier")]
    pub account_id: Option<String>,

    #[validate(custom = "validate_identifier")]
    pub schedule_id: Option<String>,

    #[serde(rename = "type")]
    #[validate(custom = "validate_tasks_type")]
    pub tasks_type: Option<String>,

    /// Case-insensitive fragment of the type name
    pub type_contains: Option<String>,

    #[validate(custom = "validate_timestamp")]
    pub started_from: Option<String>,

    #[validate(custom = "validate_timestamp")]
    pub started_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksOutput {
    pub tasks_id: String,
    pub account_id: String,
    pub schedule_id: String,
    #[serde(rename = "type")]
    pub tasks_type: String,
    pub start_time: Option<String>,
    pub duration: Option<i32>,
    pub created_at: String,
}

impl From<&Tasks> for TasksOutput {
    fn from(tasks: &Tasks) -> Self {
        Self {
            tasks_id: tasks.tasks_id().as_string(),
            account_id: tasks.account_id().as_string(),
            schedule_id: tasks.schedule_id().as_string(),
            tasks_type: tasks.tasks_type().as_str().to_string(),
            start_time: tasks.start_time().as_ref().map(time::format),
            duration: tasks.duration(),
            created_at: time::format(&tasks.created_at()),
        }
    }
}

impl From<Tasks> for TasksOutput {
    fn from(tasks: Tasks) -> Self {
        Self::from(&tasks)
    }
}
