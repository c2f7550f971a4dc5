//! Schedule - a booked time window for an agent under an account

mod search;

use serde_json::{json, Value};

pub use search::{ScheduleFilter, ScheduleSortField};

use super::entity::{apply_change, Entity};
use super::json;
use crate::errors::DomainResult;
use crate::time::{self, Timestamp};
use crate::validation::{FieldRules, Notification, Rule, RuleTable};
use crate::value_objects::Identifier;

/// Input for [`Schedule::new`]; unset fields take their defaults
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleProps {
    pub schedule_id: Option<Identifier>,
    pub account_id: Identifier,
    pub agent_id: Option<Identifier>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub created_at: Option<Timestamp>,
}

impl ScheduleProps {
    pub fn for_account(account_id: Identifier) -> Self {
        Self {
            schedule_id: None,
            account_id,
            agent_id: None,
            start_time: None,
            end_time: None,
            created_at: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Schedule {
    schedule_id: Identifier,
    account_id: Identifier,
    agent_id: Option<Identifier>,
    start_time: Option<Timestamp>,
    end_time: Option<Timestamp>,
    created_at: Timestamp,
    notification: Notification,
}

fn end_not_before_start(schedule: &Schedule) -> bool {
    match (schedule.start_time, schedule.end_time) {
        (Some(start), Some(end)) => end >= start,
        _ => true,
    }
}

const END_TIME_RULES: &[Rule<Schedule>] = &[Rule::new(
    end_not_before_start,
    "endTime must not be before startTime",
)];

const SCHEDULE_FIELDS: &[FieldRules<Schedule>] = &[FieldRules {
    field: "endTime",
    rules: END_TIME_RULES,
}];

static SCHEDULE_RULES: RuleTable<Schedule> = RuleTable::new("Schedule", SCHEDULE_FIELDS);

impl Schedule {
    /// Build and validate. Rule violations end up in the notification.
    pub fn new(props: ScheduleProps) -> Self {
        let mut schedule = Self {
            schedule_id: props.schedule_id.unwrap_or_default(),
            account_id: props.account_id,
            agent_id: props.agent_id,
            start_time: props.start_time.map(time::normalize),
            end_time: props.end_time.map(time::normalize),
            created_at: props.created_at.map_or_else(time::now, time::normalize),
            notification: Notification::new(),
        };
        schedule.validate();
        schedule
    }

    pub fn schedule_id(&self) -> Identifier {
        self.schedule_id
    }

    pub fn account_id(&self) -> Identifier {
        self.account_id
    }

    pub fn agent_id(&self) -> Option<Identifier> {
        self.agent_id
    }

    pub fn start_time(&self) -> Option<Timestamp> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<Timestamp> {
        self.end_time
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    // Mutators: rejected changes leave the previous state in place

    pub fn change_agent(&mut self, agent_id: Option<Identifier>) -> bool {
        apply_change(self, |s| s.agent_id = agent_id)
    }

    pub fn change_start_time(&mut self, start_time: Option<Timestamp>) -> bool {
        apply_change(self, |s| s.start_time = start_time.map(time::normalize))
    }

    pub fn change_end_time(&mut self, end_time: Option<Timestamp>) -> bool {
        apply_change(self, |s| s.end_time = end_time.map(time::normalize))
    }

    /// Move both bounds at once, so a window can shift past its old end
    pub fn change_time_window(
        &mut self,
        start_time: Option<Timestamp>,
        end_time: Option<Timestamp>,
    ) -> bool {
        apply_change(self, |s| {
            s.start_time = start_time.map(time::normalize);
            s.end_time = end_time.map(time::normalize);
        })
    }
}

impl Entity for Schedule {
    const NAME: &'static str = "Schedule";

    fn entity_id(&self) -> Identifier {
        self.schedule_id
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
        &SCHEDULE_RULES
    }

    fn to_json(&self) -> Value {
        json!({
            "scheduleId": self.schedule_id.as_string(),
            "accountId": self.account_id.as_string(),
            "agentId": json::identifier_value(self.agent_id.as_ref()),
            "startTime": json::timestamp_value(self.start_time.as_ref()),
            "endTime": json::timestamp_value(self.end_time.as_ref()),
            "createdAt": time::format(&self.created_at),
        })
    }

    fn from_json(value: &Value) -> DomainResult<Self> {
        let fields = json::object(Self::NAME, value)?;
        Ok(Self::new(ScheduleProps {
            schedule_id: json::optional_identifier(fields, "scheduleId")?,
            account_id: json::required_identifier(fields, "accountId")?,
            agent_id: json::optional_identifier(fields, "agentId")?,
            start_time: json::optional_timestamp(fields, "startTime")?,
            end_time: json::optional_timestamp(fields, "endTime")?,
            created_at: json::optional_timestamp(fields, "createdAt")?,
        }))
    }
}

impl PartialEq for Schedule {
    fn eq(&self, other: &Self) -> bool {
        self.schedule_id == other.schedule_id
    }
}

impl Eq for Schedule {}
