use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Message;
use crate::domain::repositories::{MessageRepository, RepositoryError};
use crate::infrastructure::database::models::{MessageModel, NewMessageModel};
use crate::infrastructure::database::schema::messages::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresMessageRepository {
    pool: DbPool,
}

impl PostgresMessageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn save(&self, message: &Message) -> Result<(), RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let new_message = NewMessageModel::from(message);

        diesel::insert_into(messages)
            .values(&new_message)
            .execute(&mut conn)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_thread(&self, thread: Uuid) -> Result<Vec<Message>, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let models = messages
            .filter(thread_id.eq(thread))
            .order(created_at.asc())
            .load::<MessageModel>(&mut conn)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let mut domain_messages = Vec::new();
        for model in models {
            let message =
                Message::try_from(model).map_err(RepositoryError::DatabaseError)?;
            domain_messages.push(message);
        }

        Ok(domain_messages)
    }

    async fn delete_by_thread(&self, thread: Uuid) -> Result<usize, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let deleted_count = diesel::delete(messages.filter(thread_id.eq(thread)))
            .execute(&mut conn)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(deleted_count)
    }
}
