use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::File;
use crate::domain::repositories::RepositoryError;

#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn save(&self, file: &File) -> Result<(), RepositoryError>;
    async fn find_by_remote_id(&self, remote_id: &str) -> Result<Option<File>, RepositoryError>;
    async fn find_by_owner(&self, user_id: Uuid) -> Result<Vec<File>, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
