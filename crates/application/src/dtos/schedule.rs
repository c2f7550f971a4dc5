use domain::search::RawSearchParams;
use domain::time;
use domain::Schedule;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{validate_identifier, validate_timestamp};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleInput {
    #[validate(required(message = "accountId is required"), custom = "validate_identifier")]
    pub account_id: Option<String>,

    #[validate(custom = "validate_identifier")]
    pub agent_id: Option<String>,

    #[validate(custom = "validate_timestamp")]
    pub start_time: Option<String>,

    #[validate(custom = "validate_timestamp")]
    pub end_time: Option<String>,
}

/// Only the provided fields are changed
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleInput {
    #[validate(required(message = "scheduleId is required"), custom = "validate_identifier")]
    pub schedule_id: Option<String>,

    #[validate(custom = "validate_identifier")]
    pub agent_id: Option<String>,

    #[validate(custom = "validate_timestamp")]
    pub start_time: Option<String>,

    #[validate(custom = "validate_timestamp")]
    pub end_time: Option<String>,
}

/// Paging plus filter criteria for listing schedules
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListSchedulesInput {
    #[serde(flatten)]
    pub params: RawSearchParams,

    #[validate(custom = "validate_identifier")]
    pub account_id: Option<String>,

    #[validate(custom = "validate_identifier")]
    pub agent_id: Option<String>,

    /// Window start; schedules must start at or after it
    #[validate(custom = "validate_timestamp")]
    pub from: Option<String>,

    /// Window end; schedules must end at or before it
    #[validate(custom = "validate_timestamp")]
    pub to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOutput {
    pub schedule_id: String,
    pub account_id: String,
    pub agent_id: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub created_at: String,
}

impl From<&Schedule> for ScheduleOutput {
    fn from(schedule: &Schedule) -> Self {
        Self {
            schedule_id: schedule.schedule_id().as_string(),
            account_id: schedule.account_id().as_string(),
            agent_id: schedule.agent_id().map(|id| id.as_string()),
            start_time: schedule.start_time().as_ref().map(time::format),
            end_time: schedule.end_time().as_ref().map(time::format),
            created_at: time::format(&schedule.created_at()),
        }
    }
}

impl From<Schedule> for ScheduleOutput {
    fn from(schedule: Schedule) -> Self {
        Self::from(&schedule)
    }
}
