use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::Thread;
use crate::domain::repositories::RepositoryError;

#[async_trait]
pub trait ThreadRepository: Send + Sync {
    async fn save(&self, thread: &Thread) -> Result<(), RepositoryError>;
    async fn find_by_remote_id(&self, remote_id: &str) -> Result<Option<Thread>, RepositoryError>;
    /// All threads for a user, most recently updated first.
    async fn find_by_owner(&self, user_id: Uuid) -> Result<Vec<Thread>, RepositoryError>;
    async fn find_by_vector_store(
        &self,
        vector_store_id: Uuid,
    ) -> Result<Vec<Thread>, RepositoryError>;
    /// Threads whose assistant reference matches the given remote id. This
    /// is a string match on an opaque identifier, not a join.
    async fn find_by_assistant(
        &self,
        user_id: Uuid,
        assistant_remote_id: &str,
    ) -> Result<Vec<Thread>, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
    async fn touch(&self, id: Uuid, updated_at: DateTime<Utc>) -> Result<(), RepositoryError>;
}
