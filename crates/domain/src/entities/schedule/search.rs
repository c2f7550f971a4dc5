use std::cmp::Ordering;

use super::Schedule;
use crate::search::{Searchable, SortField};
use crate::value_objects::{Identifier, TimeRange};

/// Criteria a schedule must satisfy; every unset criterion matches
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleFilter {
    pub account_id: Option<Identifier>,
    pub agent_id: Option<Identifier>,
    /// Schedules whose window lies inside this range
    pub window: Option<TimeRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleSortField {
    CreatedAt,
    StartTime,
    EndTime,
}

impl SortField for ScheduleSortField {
    const ALLOWED: &'static [Self] = &[
        ScheduleSortField::CreatedAt,
        ScheduleSortField::StartTime,
        ScheduleSortField::EndTime,
    ];

    fn name(&self) -> &'static str {
        match self {
            ScheduleSortField::CreatedAt => "createdAt",
            ScheduleSortField::StartTime => "startTime",
            ScheduleSortField::EndTime => "endTime",
        }
    }
}

impl Searchable for Schedule {
    type Filter = ScheduleFilter;
    type Sort = ScheduleSortField;

    fn matches(&self, filter: &ScheduleFilter) -> bool {
        filter.account_id.map_or(true, |id| id == self.account_id)
            && filter.agent_id.map_or(true, |id| Some(id) == self.agent_id)
            && filter.window.as_ref().map_or(true, |window| {
                window.contains_window(self.start_time.as_ref(), self.end_time.as_ref())
            })
    }

    // Absent times order before present ones
    fn compare_by(&self, other: &Self, field: ScheduleSortField) -> Ordering {
        match field {
            ScheduleSortField::CreatedAt => self.created_at.cmp(&other.created_at),
            ScheduleSortField::StartTime => self.start_time.cmp(&other.start_time),
            ScheduleSortField::EndTime => self.end_time.cmp(&other.end_time),
        }
    }
}
