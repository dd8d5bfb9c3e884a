use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Assistant;
use crate::domain::repositories::RepositoryError;

#[async_trait]
pub trait AssistantRepository: Send + Sync {
    async fn save(&self, assistant: &Assistant) -> Result<(), RepositoryError>;
    async fn find_by_remote_id(
        &self,
        remote_id: &str,
    ) -> Result<Option<Assistant>, RepositoryError>;
    async fn find_by_owner(&self, user_id: Uuid) -> Result<Vec<Assistant>, RepositoryError>;
    /// Assistants serving a given (owner, vector store) pair. The soft dedup
    /// policy on creation consults this before any remote call.
    async fn find_by_vector_store(
        &self,
        user_id: Uuid,
        vector_store_id: Uuid,
    ) -> Result<Vec<Assistant>, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
