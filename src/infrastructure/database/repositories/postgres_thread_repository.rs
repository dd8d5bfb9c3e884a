use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Thread;
use crate::domain::repositories::{RepositoryError, ThreadRepository};
use crate::infrastructure::database::models::{NewThreadModel, ThreadModel};
use crate::infrastructure::database::schema::threads::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresThreadRepository {
    pool: DbPool,
}

impl PostgresThreadRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ThreadRepository for PostgresThreadRepository {
    async fn save(&self, thread: &Thread) -> Result<(), RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let new_thread = NewThreadModel::from(thread);

        diesel::insert_into(threads)
            .values(&new_thread)
            .execute(&mut conn)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_remote_id(&self, remote: &str) -> Result<Option<Thread>, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let result = threads
            .filter(remote_id.eq(remote))
            .first::<ThreadModel>(&mut conn)
            .optional()
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(Thread::from))
    }

    async fn find_by_owner(&self, owner: Uuid) -> Result<Vec<Thread>, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let models = threads
            .filter(user_id.eq(owner))
            .order(updated_at.desc())
            .load::<ThreadModel>(&mut conn)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(Thread::from).collect())
    }

    async fn find_by_vector_store(&self, store_id: Uuid) -> Result<Vec<Thread>, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let models = threads
            .filter(vector_store_id.eq(store_id))
            .load::<ThreadModel>(&mut conn)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(Thread::from).collect())
    }

    async fn find_by_assistant(
        &self,
        owner: Uuid,
        assistant_remote: &str,
    ) -> Result<Vec<Thread>, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let models = threads
            .filter(user_id.eq(owner))
            .filter(assistant_remote_id.eq(assistant_remote))
            .load::<ThreadModel>(&mut conn)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(Thread::from).collect())
    }

    async fn delete(&self, local_id: Uuid) -> Result<bool, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let deleted_count = diesel::delete(threads.find(local_id))
            .execute(&mut conn)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(deleted_count > 0)
    }

    async fn touch(&self, local_id: Uuid, ts: DateTime<Utc>) -> Result<(), RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let updated_count = diesel::update(threads.find(local_id))
            .set(updated_at.eq(ts))
            .execute(&mut conn)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if updated_count == 0 {
            return Err(RepositoryError::NotFound(format!("thread {}", local_id)));
        }
        Ok(())
    }
}
