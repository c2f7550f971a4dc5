//! In-memory repositories
//!
//! A `Vec` in insertion order behind a `parking_lot::RwLock`. Search runs the
//! domain engine over the stored items.

use async_trait::async_trait;
use domain::search::{search, SearchParams, SearchResult, Searchable};
use domain::{
    DomainError, DomainResult, Entity, Identifier, Repository, Schedule, ScheduleRepository, Tasks,
    TasksRepository,
};
use parking_lot::RwLock;
use std::collections::HashSet;
use tracing::{debug, instrument};

pub type InMemoryScheduleRepository = InMemoryRepository<Schedule>;
pub type InMemoryTasksRepository = InMemoryRepository<Tasks>;

pub struct InMemoryRepository<E> {
    items: RwLock<Vec<E>>,
}

impl<E: Searchable> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    fn position(items: &[E], id: &Identifier) -> Option<usize> {
        items.iter().position(|item| item.entity_id() == *id)
    }

    fn already_exists(id: Identifier) -> DomainError {
        DomainError::EntityAlreadyExists {
            entity: E::NAME,
            id: id.as_string(),
        }
    }
}

impl<E: Searchable> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Searchable> Repository<E> for InMemoryRepository<E> {
    #[instrument(skip(self, entity), fields(entity = E::NAME, id = %entity.entity_id()))]
    async fn insert(&self, entity: &E) -> DomainResult<()> {
        entity.ensure_valid()?;

        let mut items = self.items.write();
        if Self::position(&items, &entity.entity_id()).is_some() {
            return Err(Self::already_exists(entity.entity_id()));
        }
        items.push(entity.clone());
        Ok(())
    }

    #[instrument(skip(self, entities), fields(entity = E::NAME, count = entities.len()))]
    async fn bulk_insert(&self, entities: &[E]) -> DomainResult<()> {
        for entity in entities {
            entity.ensure_valid()?;
        }

        let mut items = self.items.write();
        let mut seen: HashSet<Identifier> = items.iter().map(Entity::entity_id).collect();
        for entity in entities {
            if !seen.insert(entity.entity_id()) {
                return Err(Self::already_exists(entity.entity_id()));
            }
        }
        items.extend(entities.iter().cloned());
        debug!(total = items.len(), "bulk insert applied");
        Ok(())
    }

    #[instrument(skip(self, entity), fields(entity = E::NAME, id = %entity.entity_id()))]
    async fn update(&self, entity: &E) -> DomainResult<()> {
        entity.ensure_valid()?;

        let mut items = self.items.write();
        let index = Self::position(&items, &entity.entity_id())
            .ok_or_else(|| DomainError::not_found(E::NAME, entity.entity_id()))?;
        items[index] = entity.clone();
        Ok(())
    }

    #[instrument(skip(self), fields(entity = E::NAME))]
    async fn delete(&self, id: &Identifier) -> DomainResult<()> {
        let mut items = self.items.write();
        let index = Self::position(&items, id).ok_or_else(|| DomainError::not_found(E::NAME, id))?;
        items.remove(index);
        Ok(())
    }

    async fn find_by_id(&self, id: &Identifier) -> DomainResult<Option<E>> {
        let items = self.items.read();
        Ok(Self::position(&items, id).map(|index| items[index].clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<E>> {
        Ok(self.items.read().clone())
    }

    async fn search(&self, params: &SearchParams<E::Filter, E::Sort>) -> DomainResult<SearchResult<E>> {
        let items = self.items.read();
        Ok(search(&items, params))
    }
}

impl ScheduleRepository for InMemoryRepository<Schedule> {}

#[async_trait]
impl TasksRepository for InMemoryRepository<Tasks> {
    async fn find_by_schedule_id(&self, schedule_id: &Identifier) -> DomainResult<Vec<Tasks>> {
        Ok(self
            .items
            .read()
            .iter()
            .filter(|tasks| tasks.schedule_id() == *schedule_id)
            .cloned()
            .collect())
    }
}
