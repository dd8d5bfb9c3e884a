use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::VectorStore;
use crate::domain::repositories::RepositoryError;

#[async_trait]
pub trait VectorStoreRepository: Send + Sync {
    async fn save(&self, vector_store: &VectorStore) -> Result<(), RepositoryError>;
    async fn find_by_remote_id(
        &self,
        remote_id: &str,
    ) -> Result<Option<VectorStore>, RepositoryError>;
    async fn find_by_owner(&self, user_id: Uuid) -> Result<Vec<VectorStore>, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
    async fn touch(&self, id: Uuid, updated_at: DateTime<Utc>) -> Result<(), RepositoryError>;
}
