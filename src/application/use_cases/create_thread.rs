use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::AssistantProvider;
use crate::application::ports::assistant_provider::ProviderError;
use crate::domain::entities::Thread;
use crate::domain::repositories::{RepositoryError, ThreadRepository, VectorStoreRepository};

#[derive(Debug)]
pub enum CreateThreadError {
    ValidationError(String),
    VectorStoreNotFound(String),
    ProviderError(String),
    RepositoryError(String),
}

impl std::fmt::Display for CreateThreadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateThreadError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            CreateThreadError::VectorStoreNotFound(id) => {
                write!(f, "Vector store not found: {}", id)
            }
            CreateThreadError::ProviderError(msg) => write!(f, "Provider error: {}", msg),
            CreateThreadError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for CreateThreadError {}

impl From<RepositoryError> for CreateThreadError {
    fn from(error: RepositoryError) -> Self {
        CreateThreadError::RepositoryError(error.to_string())
    }
}

impl From<ProviderError> for CreateThreadError {
    fn from(error: ProviderError) -> Self {
        CreateThreadError::ProviderError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CreateThreadRequest {
    pub title: String,
    /// Stored as an opaque remote identifier; never validated against the
    /// local assistant mirror.
    pub assistant_id: String,
    pub vector_store_id: Option<String>,
    pub user_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct CreateThreadResponse {
    pub thread: Thread,
}

/// Starts a new conversation. Threads are never deduplicated: each chat
/// session is unique by design.
pub struct CreateThreadUseCase {
    provider: Arc<dyn AssistantProvider>,
    thread_repository: Arc<dyn ThreadRepository>,
    vector_store_repository: Arc<dyn VectorStoreRepository>,
}

impl CreateThreadUseCase {
    pub fn new(
        provider: Arc<dyn AssistantProvider>,
        thread_repository: Arc<dyn ThreadRepository>,
        vector_store_repository: Arc<dyn VectorStoreRepository>,
    ) -> Self {
        Self {
            provider,
            thread_repository,
            vector_store_repository,
        }
    }

    pub async fn execute(
        &self,
        request: CreateThreadRequest,
    ) -> Result<CreateThreadResponse, CreateThreadError> {
        if request.title.trim().is_empty() {
            return Err(CreateThreadError::ValidationError(
                "Thread title cannot be empty".to_string(),
            ));
        }
        if request.assistant_id.trim().is_empty() {
            return Err(CreateThreadError::ValidationError(
                "An assistant is required to start a chat".to_string(),
            ));
        }

        let vector_store_ref = match &request.vector_store_id {
            Some(remote_id) => {
                let store = self
                    .vector_store_repository
                    .find_by_remote_id(remote_id)
                    .await?
                    .filter(|s| s.is_owned_by(request.user_id))
                    .ok_or_else(|| CreateThreadError::VectorStoreNotFound(remote_id.clone()))?;
                Some(store.id())
            }
            None => None,
        };

        // Remote first: if this fails there must be no local record.
        let remote_id = self.provider.create_thread().await.map_err(|e| {
            tracing::error!("Failed to create remote thread: {}", e);
            CreateThreadError::from(e)
        })?;
        tracing::info!("Created thread {} ('{}')", remote_id, request.title);

        let thread = Thread::new(
            remote_id,
            vector_store_ref,
            request.assistant_id,
            request.title,
            request.user_id,
        );
        self.thread_repository.save(&thread).await?;

        Ok(CreateThreadResponse { thread })
    }
}
