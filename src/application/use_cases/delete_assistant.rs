use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::AssistantProvider;
use crate::application::use_cases::cascade::CascadeReport;
use crate::application::use_cases::delete_thread::{DeleteThreadRequest, DeleteThreadUseCase};
use crate::domain::repositories::{AssistantRepository, RepositoryError, ThreadRepository};

#[derive(Debug)]
pub enum DeleteAssistantError {
    NotFound(String),
    RemoteNotDeleted(String),
    ProviderError(String),
    RepositoryError(String),
}

impl std::fmt::Display for DeleteAssistantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteAssistantError::NotFound(id) => write!(f, "Assistant not found: {}", id),
            DeleteAssistantError::RemoteNotDeleted(id) => {
                write!(f, "Provider did not delete assistant {}", id)
            }
            DeleteAssistantError::ProviderError(msg) => write!(f, "Provider error: {}", msg),
            DeleteAssistantError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for DeleteAssistantError {}

impl From<RepositoryError> for DeleteAssistantError {
    fn from(error: RepositoryError) -> Self {
        DeleteAssistantError::RepositoryError(error.to_string())
    }
}

impl DeleteAssistantError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DeleteAssistantError::NotFound(_))
    }
}

#[derive(Debug, Clone)]
pub struct DeleteAssistantRequest {
    pub assistant_id: String,
    pub user_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct DeleteAssistantResponse {
    pub report: CascadeReport,
}

/// Deletes an assistant and every thread that references it. Threads match
/// on the opaque assistant id string, not a foreign key.
pub struct DeleteAssistantUseCase {
    provider: Arc<dyn AssistantProvider>,
    assistant_repository: Arc<dyn AssistantRepository>,
    thread_repository: Arc<dyn ThreadRepository>,
    delete_thread: Arc<DeleteThreadUseCase>,
}

impl DeleteAssistantUseCase {
    pub fn new(
        provider: Arc<dyn AssistantProvider>,
        assistant_repository: Arc<dyn AssistantRepository>,
        thread_repository: Arc<dyn ThreadRepository>,
        delete_thread: Arc<DeleteThreadUseCase>,
    ) -> Self {
        Self {
            provider,
            assistant_repository,
            thread_repository,
            delete_thread,
        }
    }

    pub async fn execute(
        &self,
        request: DeleteAssistantRequest,
    ) -> Result<DeleteAssistantResponse, DeleteAssistantError> {
        let assistant = self
            .assistant_repository
            .find_by_remote_id(&request.assistant_id)
            .await?
            .filter(|a| a.is_owned_by(request.user_id))
            .ok_or_else(|| DeleteAssistantError::NotFound(request.assistant_id.clone()))?;

        let mut report = CascadeReport::new();

        let threads = self
            .thread_repository
            .find_by_assistant(request.user_id, assistant.remote_id())
            .await?;
        for thread in threads {
            let result = self
                .delete_thread
                .execute(DeleteThreadRequest {
                    thread_id: thread.remote_id().to_string(),
                })
                .await;
            match result {
                Ok(_) => {}
                Err(e) if e.is_not_found() => {}
                Err(e) => {
                    tracing::error!("Cascade failed for thread {}: {}", thread.remote_id(), e);
                    report.record_failure(format!(
                        "delete thread {}: {}",
                        thread.remote_id(),
                        e
                    ));
                }
            }
        }

        match self.provider.delete_assistant(assistant.remote_id()).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::error!(
                    "Provider reported assistant {} as not deleted",
                    assistant.remote_id()
                );
                return Err(DeleteAssistantError::RemoteNotDeleted(
                    assistant.remote_id().to_string(),
                ));
            }
            Err(e) if e.is_not_found() => {
                tracing::warn!(
                    "Assistant {} was already absent remotely",
                    assistant.remote_id()
                );
            }
            Err(e) => {
                tracing::error!(
                    "Failed to delete assistant {}: {}",
                    assistant.remote_id(),
                    e
                );
                return Err(DeleteAssistantError::ProviderError(e.to_string()));
            }
        }

        self.assistant_repository.delete(assistant.id()).await?;
        tracing::info!("Deleted assistant {}", assistant.remote_id());

        Ok(DeleteAssistantResponse { report })
    }
}
