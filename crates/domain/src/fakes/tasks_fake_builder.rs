use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::marker::PhantomData;

use super::{
    ensure_fixtures_valid, random_identifier, random_past_time, FixtureError, FixtureResult, Many, One,
    PropOrFactory,
};
use crate::entities::{Tasks, TasksProps};
use crate::time::Timestamp;
use crate::value_objects::{Identifier, TasksType};

/// Fixture builder for [`Tasks`]
#[derive(Debug, Clone)]
pub struct TasksFakeBuilder<M = One> {
    count: usize,
    seed: u64,
    tasks_id: Option<PropOrFactory<Identifier>>,
    account_id: Option<PropOrFactory<Identifier>>,
    schedule_id: Option<PropOrFactory<Identifier>>,
    tasks_type: Option<PropOrFactory<TasksType>>,
    start_time: Option<PropOrFactory<Option<Timestamp>>>,
    duration: Option<PropOrFactory<Option<i32>>>,
    created_at: Option<PropOrFactory<Timestamp>>,
    mode: PhantomData<M>,
}

impl TasksFakeBuilder<One> {
    pub fn a_tasks() -> Self {
        Self::with_count(1)
    }

    pub fn build(&self) -> FixtureResult<Tasks> {
        let tasks = self.generate();
        ensure_fixtures_valid(&tasks)?;
        tasks.into_iter().next().ok_or(FixtureError::EmptyBatch)
    }

    pub fn build_unvalidated(&self) -> FixtureResult<Tasks> {
        self.generate().into_iter().next().ok_or(FixtureError::EmptyBatch)
    }
}

impl TasksFakeBuilder<Many> {
    pub fn the_tasks(count: usize) -> Self {
        Self::with_count(count)
    }

    pub fn build(&self) -> FixtureResult<Vec<Tasks>> {
        if self.count == 0 {
            return Err(FixtureError::EmptyBatch);
        }
        let tasks = self.generate();
        ensure_fixtures_valid(&tasks)?;
        Ok(tasks)
    }

    pub fn build_unvalidated(&self) -> Vec<Tasks> {
        self.generate()
    }
}

impl<M> TasksFakeBuilder<M> {
    fn with_count(count: usize) -> Self {
        Self {
            count,
            seed: rand::random(),
            tasks_id: None,
            account_id: None,
            schedule_id: None,
            tasks_type: None,
            start_time: None,
            duration: None,
            created_at: None,
            mode: PhantomData,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_tasks_id(mut self, value: impl Into<PropOrFactory<Identifier>>) -> Self {
        self.tasks_id = Some(value.into());
        self
    }

    pub fn with_account_id(mut self, value: impl Into<PropOrFactory<Identifier>>) -> Self {
        self.account_id = Some(value.into());
        self
    }

    pub fn with_schedule_id(mut self, value: impl Into<PropOrFactory<Identifier>>) -> Self {
        self.schedule_id = Some(value.into());
        self
    }

    pub fn with_tasks_type(mut self, value: impl Into<PropOrFactory<TasksType>>) -> Self {
        self.tasks_type = Some(value.into());
        self
    }

    pub fn with_start_time(mut self, value: impl Into<PropOrFactory<Option<Timestamp>>>) -> Self {
        self.start_time = Some(value.into());
        self
    }

    pub fn with_duration(mut self, value: impl Into<PropOrFactory<Option<i32>>>) -> Self {
        self.duration = Some(value.into());
        self
    }

    pub fn with_created_at(mut self, value: impl Into<PropOrFactory<Timestamp>>) -> Self {
        self.created_at = Some(value.into());
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn tasks_id(&self) -> FixtureResult<Identifier> {
        self.tasks_id
            .as_ref()
            .map(|p| p.resolve(0))
            .ok_or(FixtureError::MissingFactory { field: "tasksId" })
    }

    pub fn created_at(&self) -> FixtureResult<Timestamp> {
        self.created_at
            .as_ref()
            .map(|p| p.resolve(0))
            .ok_or(FixtureError::MissingFactory { field: "createdAt" })
    }

    pub fn account_id(&self) -> Identifier {
        self.first_props().account_id
    }

    pub fn schedule_id(&self) -> Identifier {
        self.first_props().schedule_id
    }

    pub fn tasks_type(&self) -> TasksType {
        self.first_props().tasks_type
    }

    pub fn start_time(&self) -> Option<Timestamp> {
        self.first_props().start_time
    }

    pub fn duration(&self) -> Option<i32> {
        self.first_props().duration
    }

    fn first_props(&self) -> TasksProps {
        self.props_at(&mut StdRng::seed_from_u64(self.seed), 0)
    }

    fn generate(&self) -> Vec<Tasks> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..self.count)
            .map(|index| Tasks::new(self.props_at(&mut rng, index)))
            .collect()
    }

    fn props_at(&self, rng: &mut StdRng, index: usize) -> TasksProps {
        let random_tasks_id = random_identifier(rng);
        let random_account_id = random_identifier(rng);
        let random_schedule_id = random_identifier(rng);
        let random_type = TasksType::ALL[rng.gen_range(0..TasksType::ALL.len())];
        let random_start = random_past_time(rng);
        let random_duration = (5..=480).fake_with_rng::<i32, _>(rng);
        let random_created_at = random_past_time(rng);

        TasksProps {
            tasks_id: Some(self.tasks_id.as_ref().map_or(random_tasks_id, |p| p.resolve(index))),
            account_id: self.account_id.as_ref().map_or(random_account_id, |p| p.resolve(index)),
            schedule_id: self.schedule_id.as_ref().map_or(random_schedule_id, |p| p.resolve(index)),
            tasks_type: self.tasks_type.as_ref().map_or(random_type, |p| p.resolve(index)),
            start_time: self.start_time.as_ref().map_or(Some(random_start), |p| p.resolve(index)),
            duration: self.duration.as_ref().map_or(Some(random_duration), |p| p.resolve(index)),
            created_at: Some(self.created_at.as_ref().map_or(random_created_at, |p| p.resolve(index))),
        }
    }
}
