use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Assistant, File, Thread, VectorStore};
use crate::domain::repositories::{
    AssistantRepository, FileRepository, RepositoryError, ThreadRepository, VectorStoreRepository,
};

#[derive(Debug)]
pub enum ListUserResourcesError {
    RepositoryError(String),
}

impl std::fmt::Display for ListUserResourcesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListUserResourcesError::RepositoryError(msg) => {
                write!(f, "Repository error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ListUserResourcesError {}

impl From<RepositoryError> for ListUserResourcesError {
    fn from(error: RepositoryError) -> Self {
        ListUserResourcesError::RepositoryError(error.to_string())
    }
}

/// Read side for the resource pickers: everything a user owns, straight
/// from the mirror. Remote membership is deliberately not consulted here.
pub struct ListUserResourcesUseCase {
    file_repository: Arc<dyn FileRepository>,
    vector_store_repository: Arc<dyn VectorStoreRepository>,
    assistant_repository: Arc<dyn AssistantRepository>,
    thread_repository: Arc<dyn ThreadRepository>,
}

impl ListUserResourcesUseCase {
    pub fn new(
        file_repository: Arc<dyn FileRepository>,
        vector_store_repository: Arc<dyn VectorStoreRepository>,
        assistant_repository: Arc<dyn AssistantRepository>,
        thread_repository: Arc<dyn ThreadRepository>,
    ) -> Self {
        Self {
            file_repository,
            vector_store_repository,
            assistant_repository,
            thread_repository,
        }
    }

    pub async fn files(&self, user_id: Uuid) -> Result<Vec<File>, ListUserResourcesError> {
        Ok(self.file_repository.find_by_owner(user_id).await?)
    }

    pub async fn vector_stores(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<VectorStore>, ListUserResourcesError> {
        Ok(self.vector_store_repository.find_by_owner(user_id).await?)
    }

    pub async fn assistants(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Assistant>, ListUserResourcesError> {
        Ok(self.assistant_repository.find_by_owner(user_id).await?)
    }

    /// Threads most recently updated first, mirroring the session picker.
    pub async fn threads(&self, user_id: Uuid) -> Result<Vec<Thread>, ListUserResourcesError> {
        Ok(self.thread_repository.find_by_owner(user_id).await?)
    }
}
