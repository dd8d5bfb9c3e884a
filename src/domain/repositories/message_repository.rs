use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Message;
use crate::domain::repositories::RepositoryError;

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn save(&self, message: &Message) -> Result<(), RepositoryError>;
    /// Messages of a thread in creation order, oldest first.
    async fn find_by_thread(&self, thread_id: Uuid) -> Result<Vec<Message>, RepositoryError>;
    /// Removes every message of the thread, returning how many were deleted.
    async fn delete_by_thread(&self, thread_id: Uuid) -> Result<usize, RepositoryError>;
}
