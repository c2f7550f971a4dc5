use async_trait::async_trait;
use common::OperationTimer;
use domain::config::SearchConfig;
use domain::{
    Entity, Identifier, Schedule, ScheduleFilter, ScheduleProps, ScheduleRepository, ScheduleSearchParams,
    TasksRepository, TimeRange,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::UseCase;
use crate::dtos::{
    optional_identifier, optional_timestamp, required_identifier, validate_input, CreateScheduleInput,
    ListSchedulesInput, PaginationOutput, ScheduleOutput, UpdateScheduleInput,
};
use crate::{ApplicationError, ApplicationResult, RequestContext};

pub(crate) fn rejected<E: Entity>(entity: &E) -> ApplicationError {
    ApplicationError::validation(entity.notification().clone())
}

async fn load_schedule(schedules: &dyn ScheduleRepository, id: &Identifier) -> ApplicationResult<Schedule> {
    schedules
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApplicationError::not_found(Schedule::NAME, id))
}

/// Use Case: create a schedule
pub struct CreateScheduleUseCase {
    schedules: Arc<dyn ScheduleRepository>,
}

impl CreateScheduleUseCase {
    pub fn new(schedules: Arc<dyn ScheduleRepository>) -> Self {
        Self { schedules }
    }
}

#[async_trait]
impl UseCase for CreateScheduleUseCase {
    type Input = CreateScheduleInput;
    type Output = ScheduleOutput;

    #[instrument(skip(self, input, context), fields(request_id = %context.request_id, correlation_id = %context.correlation_id))]
    async fn execute(&self, input: CreateScheduleInput, context: RequestContext) -> ApplicationResult<ScheduleOutput> {
        validate_input(&input)?;

        let schedule = Schedule::new(ScheduleProps {
            agent_id: optional_identifier("agentId", input.agent_id.as_deref())?,
            start_time: optional_timestamp("startTime", input.start_time.as_deref())?,
            end_time: optional_timestamp("endTime", input.end_time.as_deref())?,
            ..ScheduleProps::for_account(required_identifier("accountId", input.account_id.as_deref())?)
        });
        if !schedule.is_valid() {
            return Err(rejected(&schedule));
        }

        self.schedules.insert(&schedule).await?;
        info!(schedule_id = %schedule.schedule_id(), "Schedule created");

        Ok(ScheduleOutput::from(&schedule))
    }
}

/// Use Case: fetch one schedule by id
pub struct GetScheduleUseCase {
    schedules: Arc<dyn ScheduleRepository>,
}

impl GetScheduleUseCase {
    pub fn new(schedules: Arc<dyn ScheduleRepository>) -> Self {
        Self { schedules }
    }
}

#[async_trait]
impl UseCase for GetScheduleUseCase {
    type Input = String;
    type Output = ScheduleOutput;

    #[instrument(skip(self, context), fields(request_id = %context.request_id, correlation_id = %context.correlation_id))]
    async fn execute(&self, schedule_id: String, context: RequestContext) -> ApplicationResult<ScheduleOutput> {
        let id = Identifier::parse(&schedule_id)?;
        let schedule = load_schedule(self.schedules.as_ref(), &id).await?;
        Ok(ScheduleOutput::from(schedule))
    }
}

/// Use Case: change the provided fields of a schedule
pub struct UpdateScheduleUseCase {
    schedules: Arc<dyn ScheduleRepository>,
}

impl UpdateScheduleUseCase {
    pub fn new(schedules: Arc<dyn ScheduleRepository>) -> Self {
        Self { schedules }
    }
}

#[async_trait]
impl UseCase for UpdateScheduleUseCase {
    type Input = UpdateScheduleInput;
    type Output = ScheduleOutput;

    #[instrument(skip(self, input, context), fields(request_id = %context.request_id, correlation_id = %context.correlation_id))]
    async fn execute(&self, input: UpdateScheduleInput, context: RequestContext) -> ApplicationResult<ScheduleOutput> {
        validate_input(&input)?;

        let id = required_identifier("scheduleId", input.schedule_id.as_deref())?;
        let agent_id = optional_identifier("agentId", input.agent_id.as_deref())?;
        let start_time = optional_timestamp("startTime", input.start_time.as_deref())?;
        let end_time = optional_timestamp("endTime", input.end_time.as_deref())?;

        let mut schedule = load_schedule(self.schedules.as_ref(), &id).await?;

        if let Some(agent_id) = agent_id {
            if !schedule.change_agent(Some(agent_id)) {
                return Err(rejected(&schedule));
            }
        }

        let accepted = match (start_time, end_time) {
            (Some(start), Some(end)) => schedule.change_time_window(Some(start), Some(end)),
            (Some(start), None) => schedule.change_start_time(Some(start)),
            (None, Some(end)) => schedule.change_end_time(Some(end)),
            (None, None) => true,
        };
        if !accepted {
            debug!(schedule_id = %id, "Schedule change rejected");
            return Err(rejected(&schedule));
        }

        self.schedules.update(&schedule).await?;
        info!(schedule_id = %id, "Schedule updated");

        Ok(ScheduleOutput::from(schedule))
    }
}

/// Use Case: delete a schedule together with its tasks
pub struct DeleteScheduleUseCase {
    schedules: Arc<dyn ScheduleRepository>,
    tasks: Arc<dyn TasksRepository>,
}

impl DeleteScheduleUseCase {
    pub fn new(schedules: Arc<dyn ScheduleRepository>, tasks: Arc<dyn TasksRepository>) -> Self {
        Self { schedules, tasks }
    }
}

#[async_trait]
impl UseCase for DeleteScheduleUseCase {
    type Input = String;
    type Output = ();

    #[instrument(skip(self, context), fields(request_id = %context.request_id, correlation_id = %context.correlation_id))]
    async fn execute(&self, schedule_id: String, context: RequestContext) -> ApplicationResult<()> {
        let id = Identifier::parse(&schedule_id)?;
        if !self.schedules.exists(&id).await? {
            return Err(ApplicationError::not_found(Schedule::NAME, id));
        }

        let dependents = self.tasks.find_by_schedule_id(&id).await?;
        for tasks in &dependents {
            self.tasks.delete(&tasks.tasks_id()).await?;
        }
        self.schedules.delete(&id).await?;

        info!(schedule_id = %id, removed_tasks = dependents.len(), "Schedule deleted");
        Ok(())
    }
}

/// Use Case: filtered, sorted and paginated schedule listing
pub struct ListSchedulesUseCase {
    schedules: Arc<dyn ScheduleRepository>,
    search: SearchConfig,
}

impl ListSchedulesUseCase {
    pub fn new(schedules: Arc<dyn ScheduleRepository>, search: SearchConfig) -> Self {
        Self { schedules, search }
    }
}

#[async_trait]
impl UseCase for ListSchedulesUseCase {
    type Input = ListSchedulesInput;
    type Output = PaginationOutput<ScheduleOutput>;

    #[instrument(skip(self, input, context), fields(request_id = %context.request_id, correlation_id = %context.correlation_id))]
    async fn execute(
        &self,
        input: ListSchedulesInput,
        context: RequestContext,
    ) -> ApplicationResult<PaginationOutput<ScheduleOutput>> {
        validate_input(&input)?;

        let from = optional_timestamp("from", input.from.as_deref())?;
        let to = optional_timestamp("to", input.to.as_deref())?;
        let window = if from.is_some() || to.is_some() {
            Some(TimeRange::new(from, to)?)
        } else {
            None
        };
        let filter = ScheduleFilter {
            account_id: optional_identifier("accountId", input.account_id.as_deref())?,
            agent_id: optional_identifier("agentId", input.agent_id.as_deref())?,
            window,
        };
        let params = ScheduleSearchParams::from_input(&input.params, filter, &self.search)?;

        let mut timer = OperationTimer::new("list_schedules");
        timer.add_field("page", params.page());
        timer.add_field("per_page", params.per_page());
        let result = timer.finish_with_result(self.schedules.search(&params).await)?;

        Ok(PaginationOutput::from_search(result, ScheduleOutput::from))
    }
}
