use std::cmp::Ordering;

use super::Tasks;
use crate::search::{Searchable, SortField};
use crate::value_objects::{Identifier, TasksType, TimeRange};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TasksFilter {
    pub account_id: Option<Identifier>,
    pub schedule_id: Option<Identifier>,
    pub tasks_type: Option<TasksType>,
    /// Case-insensitive substring of the type name
    pub type_contains: Option<String>,
    /// Tasks starting inside this range; tasks without a start never match
    pub started: Option<TimeRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TasksSortField {
    CreatedAt,
    StartTime,
    Duration,
    Type,
}

impl SortField for TasksSortField {
    const ALLOWED: &'static [Self] = &[
        TasksSortField::CreatedAt,
        TasksSortField::StartTime,
        TasksSortField::Duration,
        TasksSortField::Type,
    ];

    fn name(&self) -> &'static str {
        match self {
            TasksSortField::CreatedAt => "createdAt",
            TasksSortField::StartTime => "startTime",
            TasksSortField::Duration => "duration",
            TasksSortField::Type => "type",
        }
    }
}

impl Searchable for Tasks {
    type Filter = TasksFilter;
    type Sort = TasksSortField;

    fn matches(&self, filter: &TasksFilter) -> bool {
        filter.account_id.map_or(true, |id| id == self.account_id)
            && filter.schedule_id.map_or(true, |id| id == self.schedule_id)
            && filter.tasks_type.map_or(true, |t| t == self.tasks_type)
            && filter.type_contains.as_deref().map_or(true, |needle| {
                self.tasks_type
                    .as_str()
                    .contains(needle.trim().to_ascii_lowercase().as_str())
            })
            && filter.started.as_ref().map_or(true, |range| {
                self.start_time.as_ref().is_some_and(|start| range.contains(start))
            })
    }

    fn compare_by(&self, other: &Self, field: TasksSortField) -> Ordering {
        match field {
            TasksSortField::CreatedAt => self.created_at.cmp(&other.created_at),
            TasksSortField::StartTime => self.start_time.cmp(&other.start_time),
            TasksSortField::Duration => self.duration.cmp(&other.duration),
            TasksSortField::Type => self.tasks_type.as_str().cmp(other.tasks_type.as_str()),
        }
    }
}
