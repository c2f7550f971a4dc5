use async_trait::async_trait;
use domain::search::{SearchParams, SearchResult, Searchable};
use domain::{
    DomainError, DomainResult, Entity, Identifier, Repository, ScheduleRepository, Tasks, TasksRepository,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;
use std::marker::PhantomData;
use tracing::{debug, instrument};

use super::models::{RowModel, ScheduleRow, TasksRow};
use super::query::{order_sql, placeholders};
use super::{connection_error, write_error, SqlitePool};

pub type SqliteScheduleRepository = SqliteRepository<ScheduleRow>;
pub type SqliteTasksRepository = SqliteRepository<TasksRow>;

/// Repository over one table, described by its [`RowModel`]
pub struct SqliteRepository<M> {
    pool: SqlitePool,
    _model: PhantomData<fn() -> M>,
}

impl<M: RowModel> SqliteRepository<M> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _model: PhantomData,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn connection(&self) -> DomainResult<PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(connection_error)
    }

    fn select_sql() -> String {
        format!("SELECT {} FROM {}", M::COLUMNS.join(", "), M::TABLE)
    }

    fn insert_sql() -> String {
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            M::TABLE,
            M::COLUMNS.join(", "),
            placeholders(M::COLUMNS.len())
        )
    }

    fn update_sql() -> String {
        let assignments: Vec<String> = M::COLUMNS[1..].iter().map(|column| format!("{column} = ?")).collect();
        format!(
            "UPDATE {} SET {} WHERE {} = ?",
            M::TABLE,
            assignments.join(", "),
            M::primary_key()
        )
    }

    fn insert_row(conn: &Connection, entity: &M::Entity) -> DomainResult<()> {
        let row = M::from_entity(entity);
        conn.execute(&Self::insert_sql(), params_from_iter(row.values()))
            .map_err(|e| write_error("insert", M::Entity::NAME, &entity.entity_id().as_string(), e))?;
        Ok(())
    }

    fn query_entities(
        conn: &Connection,
        sql: &str,
        values: impl IntoIterator<Item = Value>,
    ) -> DomainResult<Vec<M::Entity>> {
        let read_error = |e: rusqlite::Error| DomainError::persistence(format!("read {}", M::TABLE), e);

        let mut stmt = conn.prepare(sql).map_err(read_error)?;
        let rows = stmt
            .query_map(params_from_iter(values), |row| M::from_row(row))
            .map_err(read_error)?
            .collect::<Result<Vec<M>, _>>()
            .map_err(read_error)?;

        rows.iter().map(M::to_entity).collect()
    }
}

#[async_trait]
impl<M: RowModel> Repository<M::Entity> for SqliteRepository<M> {
    #[instrument(skip(self, entity), fields(entity = M::Entity::NAME, id = %entity.entity_id()))]
    async fn insert(&self, entity: &M::Entity) -> DomainResult<()> {
        entity.ensure_valid()?;
        let conn = self.connection()?;
        Self::insert_row(&conn, entity)
    }

    #[instrument(skip(self, entities), fields(entity = M::Entity::NAME, count = entities.len()))]
    async fn bulk_insert(&self, entities: &[M::Entity]) -> DomainResult<()> {
        for entity in entities {
            entity.ensure_valid()?;
        }

        let mut conn = self.connection()?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::persistence("begin bulk insert", e))?;
        for entity in entities {
            // Dropping `tx` on error rolls the batch back
            Self::insert_row(&tx, entity)?;
        }
        tx.commit()
            .map_err(|e| DomainError::persistence("commit bulk insert", e))?;

        debug!(inserted = entities.len(), "bulk insert committed");
        Ok(())
    }

    #[instrument(skip(self, entity), fields(entity = M::Entity::NAME, id = %entity.entity_id()))]
    async fn update(&self, entity: &M::Entity) -> DomainResult<()> {
        entity.ensure_valid()?;

        let mut values = M::from_entity(entity).values();
        let id = values.remove(0);
        values.push(id);

        let conn = self.connection()?;
        let affected = conn
            .execute(&Self::update_sql(), params_from_iter(values))
            .map_err(|e| write_error("update", M::Entity::NAME, &entity.entity_id().as_string(), e))?;
        if affected == 0 {
            return Err(DomainError::not_found(M::Entity::NAME, entity.entity_id()));
        }
        Ok(())
    }

    #[instrument(skip(self), fields(entity = M::Entity::NAME))]
    async fn delete(&self, id: &Identifier) -> DomainResult<()> {
        let conn = self.connection()?;
        let sql = format!("DELETE FROM {} WHERE {} = ?", M::TABLE, M::primary_key());
        let affected = conn
            .execute(&sql, params![id.as_string()])
            .map_err(|e| DomainError::persistence("delete", e))?;
        if affected == 0 {
            return Err(DomainError::not_found(M::Entity::NAME, id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &Identifier) -> DomainResult<Option<M::Entity>> {
        let conn = self.connection()?;
        let sql = format!("{} WHERE {} = ?", Self::select_sql(), M::primary_key());
        let row = conn
            .query_row(&sql, params![id.as_string()], |row| M::from_row(row))
            .optional()
            .map_err(|e| DomainError::persistence("find by id", e))?;
        row.as_ref().map(M::to_entity).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<M::Entity>> {
        let conn = self.connection()?;
        let sql = format!("{} ORDER BY rowid ASC", Self::select_sql());
        Self::query_entities(&conn, &sql, Vec::<Value>::new())
    }

    #[instrument(skip(self, params), fields(entity = M::Entity::NAME, page = params.page(), per_page = params.per_page()))]
    async fn search(
        &self,
        params: &SearchParams<<M::Entity as Searchable>::Filter, <M::Entity as Searchable>::Sort>,
    ) -> DomainResult<SearchResult<M::Entity>> {
        let filter = M::compile_filter(params.filter());
        let where_sql = filter.where_sql();

        let conn = self.connection()?;
        let count_sql = format!("SELECT COUNT(*) FROM {}{}", M::TABLE, where_sql);
        let total: i64 = conn
            .query_row(&count_sql, params_from_iter(filter.values().iter()), |row| row.get(0))
            .map_err(|e| DomainError::persistence("count search results", e))?;

        let total = usize::try_from(total).map_err(|e| DomainError::persistence("count search results", e))?;

        // SQLite reads a negative OFFSET as 0, so pages past the end never reach the query
        let offset = match i64::try_from(params.offset()) {
            Ok(offset) if params.offset() < total => offset,
            _ => {
                debug!(total, offset = params.offset(), "page beyond last page");
                return Ok(SearchResult::new(Vec::new(), total, params.page(), params.per_page()));
            }
        };
        let limit = i64::try_from(params.per_page()).unwrap_or(i64::MAX);

        let order = match params.sort() {
            Some(field) => order_sql(M::sort_column(field), params.sort_dir()),
            None => " ORDER BY created_at DESC, rowid ASC".to_string(),
        };
        let page_sql = format!("{}{}{} LIMIT ? OFFSET ?", Self::select_sql(), where_sql, order);

        let mut values = filter.values().to_vec();
        values.push(Value::Integer(limit));
        values.push(Value::Integer(offset));
        let items = Self::query_entities(&conn, &page_sql, values)?;

        debug!(total, returned = items.len(), "search evaluated");
        Ok(SearchResult::new(items, total, params.page(), params.per_page()))
    }
}

impl ScheduleRepository for SqliteRepository<ScheduleRow> {}

#[async_trait]
impl TasksRepository for SqliteRepository<TasksRow> {
    async fn find_by_schedule_id(&self, schedule_id: &Identifier) -> DomainResult<Vec<Tasks>> {
        let conn = self.connection()?;
        let sql = format!("{} WHERE schedule_id = ? ORDER BY rowid ASC", Self::select_sql());
        Self::query_entities(&conn, &sql, [Value::Text(schedule_id.as_string())])
    }
}
