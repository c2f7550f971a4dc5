//! TasksType - category of a unit of work

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValueObject;
use crate::errors::DomainError;

/// Enumerated task categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TasksType {
    Call,
    Email,
    Meeting,
    FollowUp,
    Visit,
}

impl TasksType {
    pub const ALL: [TasksType; 5] = [
        TasksType::Call,
        TasksType::Email,
        TasksType::Meeting,
        TasksType::FollowUp,
        TasksType::Visit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TasksType::Call => "call",
            TasksType::Email => "email",
            TasksType::Meeting => "meeting",
            TasksType::FollowUp => "follow_up",
            TasksType::Visit => "visit",
        }
    }
}

impl ValueObject for TasksType {}

impl fmt::Display for TasksType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TasksType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TasksType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidTasksType(s.to_string()))
    }
}
