use async_trait::async_trait;

use crate::entities::{Schedule, Tasks};
use crate::errors::DomainResult;
use crate::search::{SearchParams, SearchResult, Searchable};
use crate::value_objects::Identifier;

/// Persistence contract shared by every aggregate
///
/// Implementations must:
/// - refuse invalid entities on insert/update with `EntityValidation`
/// - report an unknown id on update/delete with `EntityNotFound`
/// - report a duplicate primary key on insert with `EntityAlreadyExists`
/// - order search results exactly like [`crate::search::search`]
#[async_trait]
pub trait Repository<E: Searchable>: Send + Sync {
    async fn insert(&self, entity: &E) -> DomainResult<()>;

    /// All-or-nothing insert of several entities
    async fn bulk_insert(&self, entities: &[E]) -> DomainResult<()>;

    async fn update(&self, entity: &E) -> DomainResult<()>;

    async fn delete(&self, id: &Identifier) -> DomainResult<()>;

    async fn find_by_id(&self, id: &Identifier) -> DomainResult<Option<E>>;

    /// Every stored entity in insertion order
    async fn find_all(&self) -> DomainResult<Vec<E>>;

    async fn exists(&self, id: &Identifier) -> DomainResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    async fn search(&self, params: &SearchParams<E::Filter, E::Sort>) -> DomainResult<SearchResult<E>>;
}

pub trait ScheduleRepository: Repository<Schedule> {}

#[async_trait]
pub trait TasksRepository: Repository<Tasks> {
    async fn find_by_schedule_id(&self, schedule_id: &Identifier) -> DomainResult<Vec<Tasks>>;
}
