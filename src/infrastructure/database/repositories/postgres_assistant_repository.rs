use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Assistant;
use crate::domain::repositories::{AssistantRepository, RepositoryError};
use crate::infrastructure::database::models::{AssistantModel, NewAssistantModel};
use crate::infrastructure::database::schema::assistants::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresAssistantRepository {
    pool: DbPool,
}

impl PostgresAssistantRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssistantRepository for PostgresAssistantRepository {
    async fn save(&self, assistant: &Assistant) -> Result<(), RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let new_assistant = NewAssistantModel::from(assistant);

        diesel::insert_into(assistants)
            .values(&new_assistant)
            .execute(&mut conn)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_remote_id(&self, remote: &str) -> Result<Option<Assistant>, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let result = assistants
            .filter(remote_id.eq(remote))
            .first::<AssistantModel>(&mut conn)
            .optional()
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(Assistant::from))
    }

    async fn find_by_owner(&self, owner: Uuid) -> Result<Vec<Assistant>, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let models = assistants
            .filter(user_id.eq(owner))
            .order(created_at.desc())
            .load::<AssistantModel>(&mut conn)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(Assistant::from).collect())
    }

    async fn find_by_vector_store(
        &self,
        owner: Uuid,
        store_id: Uuid,
    ) -> Result<Vec<Assistant>, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let models = assistants
            .filter(user_id.eq(owner))
            .filter(vector_store_id.eq(store_id))
            .order(created_at.asc())
            .load::<AssistantModel>(&mut conn)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(Assistant::from).collect())
    }

    async fn delete(&self, local_id: Uuid) -> Result<bool, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let deleted_count = diesel::delete(assistants.find(local_id))
            .execute(&mut conn)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(deleted_count > 0)
    }
}
