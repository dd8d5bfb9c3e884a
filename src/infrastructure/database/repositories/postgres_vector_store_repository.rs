use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::VectorStore;
use crate::domain::repositories::{RepositoryError, VectorStoreRepository};
use crate::infrastructure::database::models::{NewVectorStoreModel, VectorStoreModel};
use crate::infrastructure::database::schema::vector_stores::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresVectorStoreRepository {
    pool: DbPool,
}

impl PostgresVectorStoreRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VectorStoreRepository for PostgresVectorStoreRepository {
    async fn save(&self, store: &VectorStore) -> Result<(), RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let new_store = NewVectorStoreModel::from(store);

        diesel::insert_into(vector_stores)
            .values(&new_store)
            .execute(&mut conn)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_remote_id(
        &self,
        remote: &str,
    ) -> Result<Option<VectorStore>, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let result = vector_stores
            .filter(remote_id.eq(remote))
            .first::<VectorStoreModel>(&mut conn)
            .optional()
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(VectorStore::from))
    }

    async fn find_by_owner(&self, owner: Uuid) -> Result<Vec<VectorStore>, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let models = vector_stores
            .filter(user_id.eq(owner))
            .order(created_at.desc())
            .load::<VectorStoreModel>(&mut conn)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(VectorStore::from).collect())
    }

    async fn delete(&self, local_id: Uuid) -> Result<bool, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let deleted_count = diesel::delete(vector_stores.find(local_id))
            .execute(&mut conn)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(deleted_count > 0)
    }

    async fn touch(&self, local_id: Uuid, ts: DateTime<Utc>) -> Result<(), RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let updated_count = diesel::update(vector_stores.find(local_id))
            .set(updated_at.eq(ts))
            .execute(&mut conn)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if updated_count == 0 {
            return Err(RepositoryError::NotFound(format!(
                "vector store {}",
                local_id
            )));
        }
        Ok(())
    }
}
