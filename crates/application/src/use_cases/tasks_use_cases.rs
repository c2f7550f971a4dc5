use async_trait::async_trait;
use common::OperationTimer;
use domain::config::SearchConfig;
use domain::{
    Entity, Identifier, Schedule, ScheduleRepository, Tasks, TasksFilter, TasksProps, TasksRepository,
    TasksSearchParams, TasksType, TimeRange,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::schedule_use_cases::rejected;
use super::UseCase;
use crate::dtos::{
    optional_identifier, optional_timestamp, required_identifier, validate_input, CreateTasksInput, ListTasksInput,
    PaginationOutput, TasksOutput, UpdateTasksInput,
};
use crate::{ApplicationError, ApplicationResult, RequestContext};

fn tasks_type(value: &str) -> ApplicationResult<TasksType> {
    value
        .parse()
        .map_err(|_| ApplicationError::invalid_field("type", "must be one of call, email, meeting, follow_up, visit"))
}

async fn load_tasks(tasks: &dyn TasksRepository, id: &Identifier) -> ApplicationResult<Tasks> {
    tasks
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApplicationError::not_found(Tasks::NAME, id))
}

/// Use Case: create tasks under an existing schedule
pub struct CreateTasksUseCase {
    tasks: Arc<dyn TasksRepository>,
    schedules: Arc<dyn ScheduleRepository>,
}

impl CreateTasksUseCase {
    pub fn new(tasks: Arc<dyn TasksRepository>, schedules: Arc<dyn ScheduleRepository>) -> Self {
        Self { tasks, schedules }
    }
}

#[async_trait]
impl UseCase for CreateTasksUseCase {
    type Input = CreateTasksInput;
    type Output = TasksOutput;

    #[instrument(skip(self, input, context), fields(request_id = %context.request_id, correlation_id = %context.correlation_id))]
    async fn execute(&self, input: CreateTasksInput, context: RequestContext) -> ApplicationResult<TasksOutput> {
        validate_input(&input)?;

        let account_id = required_identifier("accountId", input.account_id.as_deref())?;
        let schedule_id = required_identifier("scheduleId", input.schedule_id.as_deref())?;
        let tasks_type = match input.tasks_type.as_deref() {
            Some(value) => tasks_type(value)?,
            None => return Err(ApplicationError::invalid_field("type", "type is required")),
        };

        if !self.schedules.exists(&schedule_id).await? {
            return Err(ApplicationError::not_found(Schedule::NAME, schedule_id));
        }

        let tasks = Tasks::new(TasksProps {
            start_time: optional_timestamp("startTime", input.start_time.as_deref())?,
            duration: input.duration,
            ..TasksProps::new(account_id, schedule_id, tasks_type)
        });
        if !tasks.is_valid() {
            return Err(rejected(&tasks));
        }

        self.tasks.insert(&tasks).await?;
        info!(tasks_id = %tasks.tasks_id(), schedule_id = %schedule_id, "Tasks created");

        Ok(TasksOutput::from(&tasks))
    }
}

/// Use Case: fetch one tasks record by id
pub struct GetTasksUseCase {
    tasks: Arc<dyn TasksRepository>,
}

impl GetTasksUseCase {
    pub fn new(tasks: Arc<dyn TasksRepository>) -> Self {
        Self { tasks }
    }
}

#[async_trait]
impl UseCase for GetTasksUseCase {
    type Input = String;
    type Output = TasksOutput;

    #[instrument(skip(self, context), fields(request_id = %context.request_id, correlation_id = %context.correlation_id))]
    async fn execute(&self, tasks_id: String, context: RequestContext) -> ApplicationResult<TasksOutput> {
        let id = Identifier::parse(&tasks_id)?;
        Ok(TasksOutput::from(load_tasks(self.tasks.as_ref(), &id).await?))
    }
}

pub struct UpdateTasksUseCase {
    tasks: Arc<dyn TasksRepository>,
}

impl UpdateTasksUseCase {
    pub fn new(tasks: Arc<dyn TasksRepository>) -> Self {
        Self { tasks }
    }
}

#[async_trait]
impl UseCase for UpdateTasksUseCase {
    type Input = UpdateTasksInput;
    type Output = TasksOutput;

    #[instrument(skip(self, input, context), fields(request_id = %context.request_id, correlation_id = %context.correlation_id))]
    async fn execute(&self, input: UpdateTasksInput, context: RequestContext) -> ApplicationResult<TasksOutput> {
        validate_input(&input)?;

        let id = required_identifier("tasksId", input.tasks_id.as_deref())?;
        let new_type = input.tasks_type.as_deref().map(tasks_type).transpose()?;
        let start_time = optional_timestamp("startTime", input.start_time.as_deref())?;

        let mut tasks = load_tasks(self.tasks.as_ref(), &id).await?;

        let accepted = new_type.map_or(true, |t| tasks.change_type(t))
            && start_time.map_or(true, |start| tasks.change_start_time(Some(start)))
            && input.duration.map_or(true, |duration| tasks.change_duration(Some(duration)));
        if !accepted {
            return Err(rejected(&tasks));
        }

        self.tasks.update(&tasks).await?;
        info!(tasks_id = %id, "Tasks updated");

        Ok(TasksOutput::from(tasks))
    }
}

pub struct DeleteTasksUseCase {
    tasks: Arc<dyn TasksRepository>,
}

impl DeleteTasksUseCase {
    pub fn new(tasks: Arc<dyn TasksRepository>) -> Self {
        Self { tasks }
    }
}

#[async_trait]
impl UseCase for DeleteTasksUseCase {
    type Input = String;
    type Output = ();

    #[instrument(skip(self, context), fields(request_id = %context.request_id, correlation_id = %context.correlation_id))]
    async fn execute(&self, tasks_id: String, context: RequestContext) -> ApplicationResult<()> {
        let id = Identifier::parse(&tasks_id)?;
        self.tasks.delete(&id).await.map_err(|e| {
            if e.is_not_found_error() {
                ApplicationError::not_found(Tasks::NAME, id)
            } else {
                e.into()
            }
        })?;

        info!(tasks_id = %id, "Tasks deleted");
        Ok(())
    }
}

/// Use Case: filtered, sorted and paginated tasks listing
pub struct ListTasksUseCase {
    tasks: Arc<dyn TasksRepository>,
    search: SearchConfig,
}

impl ListTasksUseCase {
    pub fn new(tasks: Arc<dyn TasksRepository>, search: SearchConfig) -> Self {
        Self { tasks, search }
    }
}

#[async_trait]
impl UseCase for ListTasksUseCase {
    type Input = ListTasksInput;
    type Output = PaginationOutput<TasksOutput>;

    #[instrument(skip(self, input, context), fields(request_id = %context.request_id, correlation_id = %context.correlation_id))]
    async fn execute(&self, input: ListTasksInput, context: RequestContext) -> ApplicationResult<PaginationOutput<TasksOutput>> {
        validate_input(&input)?;

        let from = optional_timestamp("startedFrom", input.started_from.as_deref())?;
        let to = optional_timestamp("startedTo", input.started_to.as_deref())?;
        let started = if from.is_some() || to.is_some() {
            Some(TimeRange::new(from, to)?)
        } else {
            None
        };
        let filter = TasksFilter {
            account_id: optional_identifier("accountId", input.account_id.as_deref())?,
            schedule_id: optional_identifier("scheduleId", input.schedule_id.as_deref())?,
            tasks_type: input.tasks_type.as_deref().map(tasks_type).transpose()?,
            type_contains: input.type_contains.filter(|needle| !needle.trim().is_empty()),
            started,
        };
        let params = TasksSearchParams::from_input(&input.params, filter, &self.search)?;

        let mut timer = OperationTimer::new("list_tasks");
        timer.add_field("page", params.page());
        timer.add_field("per_page", params.per_page());
        let result = timer.finish_with_result(self.tasks.search(&params).await)?;

        Ok(PaginationOutput::from_search(result, TasksOutput::from))
    }
}
