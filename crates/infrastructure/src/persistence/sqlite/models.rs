//! Row models - column layout of each table and entity mapping

use domain::search::Searchable;
use domain::time::{self, Timestamp};
use domain::{
    DomainError, DomainResult, Identifier, Schedule, ScheduleFilter, ScheduleProps, ScheduleSortField, Tasks,
    TasksFilter, TasksProps, TasksSortField, TasksType, TimeRange,
};
use rusqlite::types::Value;
use rusqlite::Row;

use super::query::SqlFilter;

/// Mapping between an entity and its table
///
/// `COLUMNS[0]` is the primary key, and `values()` follows `COLUMNS` order.
pub trait RowModel: Sized + Send + Sync + 'static {
    type Entity: Searchable;

    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn from_entity(entity: &Self::Entity) -> Self;

    /// Fails with `Persistence` when stored data no longer maps to an entity
    fn to_entity(&self) -> DomainResult<Self::Entity>;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    fn values(&self) -> Vec<Value>;

    fn sort_column(field: <Self::Entity as Searchable>::Sort) -> &'static str;

    fn compile_filter(filter: &<Self::Entity as Searchable>::Filter) -> SqlFilter;

    fn primary_key() -> &'static str {
        Self::COLUMNS[0]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRow {
    pub schedule_id: String,
    pub account_id: String,
    pub agent_id: Option<String>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub created_at: i64,
}

impl RowModel for ScheduleRow {
    type Entity = Schedule;

    const TABLE: &'static str = "schedules";
    const COLUMNS: &'static [&'static str] = &[
        "schedule_id",
        "account_id",
        "agent_id",
        "start_time",
        "end_time",
        "created_at",
    ];

    fn from_entity(schedule: &Schedule) -> Self {
        Self {
            schedule_id: schedule.schedule_id().as_string(),
            account_id: schedule.account_id().as_string(),
            agent_id: schedule.agent_id().map(|id| id.as_string()),
            start_time: schedule.start_time().as_ref().map(time::to_millis),
            end_time: schedule.end_time().as_ref().map(time::to_millis),
            created_at: time::to_millis(&schedule.created_at()),
        }
    }

    fn to_entity(&self) -> DomainResult<Schedule> {
        Ok(Schedule::new(ScheduleProps {
            schedule_id: Some(identifier("schedule_id", &self.schedule_id)?),
            account_id: identifier("account_id", &self.account_id)?,
            agent_id: self
                .agent_id
                .as_deref()
                .map(|id| identifier("agent_id", id))
                .transpose()?,
            start_time: self.start_time.map(|ms| timestamp("start_time", ms)).transpose()?,
            end_time: self.end_time.map(|ms| timestamp("end_time", ms)).transpose()?,
            created_at: Some(timestamp("created_at", self.created_at)?),
        }))
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            schedule_id: row.get(0)?,
            account_id: row.get(1)?,
            agent_id: row.get(2)?,
            start_time: row.get(3)?,
            end_time: row.get(4)?,
            created_at: row.get(5)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.schedule_id.clone()),
            Value::Text(self.account_id.clone()),
            optional_text(&self.agent_id),
            optional_integer(self.start_time),
            optional_integer(self.end_time),
            Value::Integer(self.created_at),
        ]
    }

    fn sort_column(field: ScheduleSortField) -> &'static str {
        match field {
            ScheduleSortField::CreatedAt => "created_at",
            ScheduleSortField::StartTime => "start_time",
            ScheduleSortField::EndTime => "end_time",
        }
    }

    fn compile_filter(filter: &ScheduleFilter) -> SqlFilter {
        let mut sql = SqlFilter::new();
        if let Some(account_id) = filter.account_id {
            sql.push("account_id = ?", [Value::Text(account_id.as_string())]);
        }
        if let Some(agent_id) = filter.agent_id {
            sql.push("agent_id = ?", [Value::Text(agent_id.as_string())]);
        }
        if let Some(window) = &filter.window {
            push_window(&mut sql, window);
        }
        sql
    }
}

/// Same containment rules as `TimeRange::contains_window`
fn push_window(sql: &mut SqlFilter, window: &TimeRange) {
    let from = window.from().as_ref().map(time::to_millis);
    let to = window.to().as_ref().map(time::to_millis);

    match (from, to) {
        (Some(from), Some(to)) => {
            sql.push(
                "start_time IS NOT NULL AND start_time >= ? AND start_time <= ?",
                [Value::Integer(from), Value::Integer(to)],
            );
            sql.push(
                "end_time IS NOT NULL AND end_time >= ? AND end_time <= ?",
                [Value::Integer(from), Value::Integer(to)],
            );
        }
        (Some(from), None) => {
            sql.push("start_time IS NOT NULL AND start_time >= ?", [Value::Integer(from)]);
            sql.push("(end_time IS NULL OR end_time >= ?)", [Value::Integer(from)]);
        }
        (None, Some(to)) => {
            sql.push("(start_time IS NULL OR start_time <= ?)", [Value::Integer(to)]);
            sql.push("end_time IS NOT NULL AND end_time <= ?", [Value::Integer(to)]);
        }
        (None, None) => {}
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TasksRow {
    pub tasks_id: String,
    pub account_id: String,
    pub schedule_id: String,
    pub tasks_type: String,
    pub start_time: Option<i64>,
    pub duration: Option<i32>,
    pub created_at: i64,
}

impl RowModel for TasksRow {
    type Entity = Tasks;

    const TABLE: &'static str = "tasks";
    const COLUMNS: &'static [&'static str] = &[
        "tasks_id",
        "account_id",
        "schedule_id",
        "type",
        "start_time",
        "duration",
        "created_at",
    ];

    fn from_entity(tasks: &Tasks) -> Self {
        Self {
            tasks_id: tasks.tasks_id().as_string(),
            account_id: tasks.account_id().as_string(),
            schedule_id: tasks.schedule_id().as_string(),
            tasks_type: tasks.tasks_type().as_str().to_string(),
            start_time: tasks.start_time().as_ref().map(time::to_millis),
            duration: tasks.duration(),
            created_at: time::to_millis(&tasks.created_at()),
        }
    }

    fn to_entity(&self) -> DomainResult<Tasks> {
        let tasks_type: TasksType = self
            .tasks_type
            .parse()
            .map_err(|e| DomainError::persistence("map tasks row", e))?;

        Ok(Tasks::new(TasksProps {
            tasks_id: Some(identifier("tasks_id", &self.tasks_id)?),
            account_id: identifier("account_id", &self.account_id)?,
            schedule_id: identifier("schedule_id", &self.schedule_id)?,
            tasks_type,
            start_time: self.start_time.map(|ms| timestamp("start_time", ms)).transpose()?,
            duration: self.duration,
            created_at: Some(timestamp("created_at", self.created_at)?),
        }))
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            tasks_id: row.get(0)?,
            account_id: row.get(1)?,
            schedule_id: row.get(2)?,
            tasks_type: row.get(3)?,
            start_time: row.get(4)?,
            duration: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.tasks_id.clone()),
            Value::Text(self.account_id.clone()),
            Value::Text(self.schedule_id.clone()),
            Value::Text(self.tasks_type.clone()),
            optional_integer(self.start_time),
            optional_integer(self.duration.map(i64::from)),
            Value::Integer(self.created_at),
        ]
    }

    fn sort_column(field: TasksSortField) -> &'static str {
        match field {
            TasksSortField::CreatedAt => "created_at",
            TasksSortField::StartTime => "start_time",
            TasksSortField::Duration => "duration",
            TasksSortField::Type => "type",
        }
    }

    fn compile_filter(filter: &TasksFilter) -> SqlFilter {
        let mut sql = SqlFilter::new();
        if let Some(account_id) = filter.account_id {
            sql.push("account_id = ?", [Value::Text(account_id.as_string())]);
        }
        if let Some(schedule_id) = filter.schedule_id {
            sql.push("schedule_id = ?", [Value::Text(schedule_id.as_string())]);
        }
        if let Some(tasks_type) = filter.tasks_type {
            sql.push("type = ?", [Value::Text(tasks_type.as_str().to_string())]);
        }
        if let Some(needle) = &filter.type_contains {
            // instr() matches literally, unlike LIKE and its wildcards
            sql.push("instr(type, ?) > 0", [Value::Text(needle.trim().to_ascii_lowercase())]);
        }
        if let Some(started) = &filter.started {
            sql.push("start_time IS NOT NULL", []);
            if let Some(from) = started.from() {
                sql.push("start_time >= ?", [Value::Integer(time::to_millis(&from))]);
            }
            if let Some(to) = started.to() {
                sql.push("start_time <= ?", [Value::Integer(time::to_millis(&to))]);
            }
        }
        sql
    }
}

fn identifier(column: &str, raw: &str) -> DomainResult<Identifier> {
    Identifier::parse(raw).map_err(|e| DomainError::persistence(format!("map column {column}"), e))
}

fn timestamp(column: &str, millis: i64) -> DomainResult<Timestamp> {
    time::from_millis(millis).ok_or_else(|| {
        DomainError::persistence(
            format!("map column {column}"),
            format!("{millis} is not a valid epoch-millisecond timestamp"),
        )
    })
}

fn optional_text(value: &Option<String>) -> Value {
    value.clone().map_or(Value::Null, Value::Text)
}

fn optional_integer(value: Option<i64>) -> Value {
    value.map_or(Value::Null, Value::Integer)
}
