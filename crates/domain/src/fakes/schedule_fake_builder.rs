use chrono::Duration;
use fake::Fake;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::marker::PhantomData;

use super::{
    ensure_fixtures_valid, random_identifier, random_past_time, FixtureError, FixtureResult, Many, One,
    PropOrFactory,
};
use crate::entities::{Schedule, ScheduleProps};
use crate::time::Timestamp;
use crate::value_objects::Identifier;

/// Fixture builder for [`Schedule`]
///
/// Unset fields get random, mutually consistent values: the window lasts
/// 15 to 240 minutes and starts within the 30 days before the fixture anchor.
#[derive(Debug, Clone)]
pub struct ScheduleFakeBuilder<M = One> {
    count: usize,
    seed: u64,
    schedule_id: Option<PropOrFactory<Identifier>>,
    account_id: Option<PropOrFactory<Identifier>>,
    agent_id: Option<PropOrFactory<Option<Identifier>>>,
    start_time: Option<PropOrFactory<Option<Timestamp>>>,
    end_time: Option<PropOrFactory<Option<Timestamp>>>,
    created_at: Option<PropOrFactory<Timestamp>>,
    mode: PhantomData<M>,
}

impl ScheduleFakeBuilder<One> {
    pub fn a_schedule() -> Self {
        Self::with_count(1)
    }

    pub fn build(&self) -> FixtureResult<Schedule> {
        let schedules = self.generate();
        ensure_fixtures_valid(&schedules)?;
        schedules.into_iter().next().ok_or(FixtureError::EmptyBatch)
    }

    /// Skip the validity check, for tests about invalid schedules
    pub fn build_unvalidated(&self) -> FixtureResult<Schedule> {
        self.generate().into_iter().next().ok_or(FixtureError::EmptyBatch)
    }
}

impl ScheduleFakeBuilder<Many> {
    pub fn the_schedules(count: usize) -> Self {
        Self::with_count(count)
    }

    pub fn build(&self) -> FixtureResult<Vec<Schedule>> {
        if self.count == 0 {
            return Err(FixtureError::EmptyBatch);
        }
        let schedules = self.generate();
        ensure_fixtures_valid(&schedules)?;
        Ok(schedules)
    }

    pub fn build_unvalidated(&self) -> Vec<Schedule> {
        self.generate()
    }
}

impl<M> ScheduleFakeBuilder<M> {
    fn with_count(count: usize) -> Self {
        Self {
            count,
            seed: rand::random(),
            schedule_id: None,
            account_id: None,
            agent_id: None,
            start_time: None,
            end_time: None,
            created_at: None,
            mode: PhantomData,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_schedule_id(mut self, value: impl Into<PropOrFactory<Identifier>>) -> Self {
        self.schedule_id = Some(value.into());
        self
    }

    pub fn with_account_id(mut self, value: impl Into<PropOrFactory<Identifier>>) -> Self {
        self.account_id = Some(value.into());
        self
    }

    pub fn with_agent_id(mut self, value: impl Into<PropOrFactory<Option<Identifier>>>) -> Self {
        self.agent_id = Some(value.into());
        self
    }

    pub fn with_start_time(mut self, value: impl Into<PropOrFactory<Option<Timestamp>>>) -> Self {
        self.start_time = Some(value.into());
        self
    }

    pub fn with_end_time(mut self, value: impl Into<PropOrFactory<Option<Timestamp>>>) -> Self {
        self.end_time = Some(value.into());
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

    pub fn schedule_id(&self) -> FixtureResult<Identifier> {
        self.schedule_id
            .as_ref()
            .map(|p| p.resolve(0))
            .ok_or(FixtureError::MissingFactory { field: "scheduleId" })
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

    pub fn agent_id(&self) -> Option<Identifier> {
        self.first_props().agent_id
    }

    pub fn start_time(&self) -> Option<Timestamp> {
        self.first_props().start_time
    }

    pub fn end_time(&self) -> Option<Timestamp> {
        self.first_props().end_time
    }

    fn first_props(&self) -> ScheduleProps {
        self.props_at(&mut StdRng::seed_from_u64(self.seed), 0)
    }

    fn generate(&self) -> Vec<Schedule> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..self.count)
            .map(|index| Schedule::new(self.props_at(&mut rng, index)))
            .collect()
    }

    // Draws every random default, overridden or not, so index N always sees
    // the same sequence for a given seed
    fn props_at(&self, rng: &mut StdRng, index: usize) -> ScheduleProps {
        let random_schedule_id = random_identifier(rng);
        let random_account_id = random_identifier(rng);
        let random_agent_id = random_identifier(rng);
        let random_start = random_past_time(rng);
        let gap = Duration::minutes((15..=240).fake_with_rng::<i64, _>(rng));
        let random_created_at = random_past_time(rng);

        let explicit_end = self.end_time.as_ref().map(|p| p.resolve(index));
        let start_time = match (&self.start_time, explicit_end) {
            (Some(start), _) => start.resolve(index),
            (None, Some(Some(end))) => Some(end - gap),
            (None, _) => Some(random_start),
        };
        let end_time = match explicit_end {
            Some(end) => end,
            None => start_time.map(|start| start + gap),
        };

        ScheduleProps {
            schedule_id: Some(self.schedule_id.as_ref().map_or(random_schedule_id, |p| p.resolve(index))),
            account_id: self.account_id.as_ref().map_or(random_account_id, |p| p.resolve(index)),
            agent_id: self.agent_id.as_ref().map_or(Some(random_agent_id), |p| p.resolve(index)),
            start_time,
            end_time,
            created_at: Some(self.created_at.as_ref().map_or(random_created_at, |p| p.resolve(index))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Entity;
    use crate::time;
    use proptest::prelude::*;

    #[test]
    fn test_defaults_build_valid_schedule() {
        let schedule = ScheduleFakeBuilder::a_schedule().build().unwrap();
        assert!(schedule.is_valid());
        assert!(schedule.agent_id().is_some());
        let minutes = (schedule.end_time().unwrap() - schedule.start_time().unwrap()).num_minutes();
        assert!((15..=240).contains(&minutes));
    }

    #[test]
    fn test_same_seed_same_fixtures() {
        let first = ScheduleFakeBuilder::the_schedules(5).with_seed(99).build().unwrap();
        let second = ScheduleFakeBuilder::the_schedules(5).with_seed(99).build().unwrap();
        let first: Vec<_> = first.iter().map(Entity::to_json).collect();
        let second: Vec<_> = second.iter().map(Entity::to_json).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_with_returns_new_builder() {
        let base = ScheduleFakeBuilder::a_schedule().with_seed(4);
        let account_id = Identifier::new();
        let derived = base.clone().with_account_id(account_id);

        assert_eq!(derived.account_id(), account_id);
        assert_ne!(base.account_id(), account_id);
        assert_eq!(base.build().unwrap().account_id(), base.account_id());
    }

    #[test]
    fn test_factories_receive_build_index() {
        let ids: Vec<Identifier> = (0..3).map(|_| Identifier::new()).collect();
        let lookup = ids.clone();
        let schedules = ScheduleFakeBuilder::the_schedules(3)
            .with_schedule_id(PropOrFactory::factory(move |i| lookup[i]))
            .build()
            .unwrap();
        let built: Vec<_> = schedules.iter().map(Schedule::schedule_id).collect();
        assert_eq!(built, ids);
    }

    #[test]
    fn test_getters_without_factory() {
        let builder = ScheduleFakeBuilder::a_schedule();
        assert_eq!(
            builder.schedule_id(),
            Err(FixtureError::MissingFactory { field: "scheduleId" })
        );
        assert_eq!(
            builder.created_at(),
            Err(FixtureError::MissingFactory { field: "createdAt" })
        );

        let created_at = time::now();
        let builder = builder.with_created_at(created_at);
        assert_eq!(builder.created_at(), Ok(created_at));
    }

    #[test]
    fn test_end_override_pulls_default_start_before_it() {
        let end = time::now();
        let schedule = ScheduleFakeBuilder::a_schedule().with_end_time(Some(end)).build().unwrap();
        assert!(schedule.start_time().unwrap() < end);
    }

    #[test]
    fn test_invalid_override_is_reported_with_index() {
        let start = time::now();
        let builder = ScheduleFakeBuilder::the_schedules(3).with_start_time(Some(start)).with_end_time(
            PropOrFactory::factory(move |i| {
                Some(if i == 2 { start - Duration::minutes(5) } else { start })
            }),
        );

        match builder.build() {
            Err(FixtureError::InvalidFixtureData { index, errors }) => {
                assert_eq!(index, 2);
                assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["endTime"]);
            }
            other => panic!("expected invalid fixture, got {other:?}"),
        }

        let unvalidated = builder.build_unvalidated();
        assert!(!unvalidated[2].is_valid());
    }

    #[test]
    fn test_empty_batch() {
        assert_eq!(
            ScheduleFakeBuilder::the_schedules(0).build(),
            Err(FixtureError::EmptyBatch)
        );
    }

    #[test]
    fn test_builder_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>(_: &T) {}
        let builder = ScheduleFakeBuilder::the_schedules(2).with_created_at(PropOrFactory::factory(|_| time::now()));
        assert_send_sync(&builder);

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let builder = builder.clone();
                std::thread::spawn(move || builder.build().map(|s| s.len()))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(2));
        }
    }

    proptest! {
        #[test]
        fn prop_defaults_are_always_valid(seed in any::<u64>(), count in 1usize..25) {
            let schedules = ScheduleFakeBuilder::the_schedules(count).with_seed(seed).build();
            prop_assert!(schedules.is_ok());
            prop_assert_eq!(schedules.unwrap().len(), count);
        }
    }
}
