use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::AssistantProvider;
use crate::application::use_cases::cascade::CascadeReport;
use crate::application::use_cases::delete_assistant::{
    DeleteAssistantRequest, DeleteAssistantUseCase,
};
use crate::application::use_cases::delete_thread::{DeleteThreadRequest, DeleteThreadUseCase};
use crate::domain::repositories::{
    AssistantRepository, RepositoryError, ThreadRepository, VectorStoreRepository,
};

#[derive(Debug)]
pub enum DeleteVectorStoreError {
    NotFound(String),
    RemoteNotDeleted(String),
    ProviderError(String),
    RepositoryError(String),
}

impl std::fmt::Display for DeleteVectorStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteVectorStoreError::NotFound(id) => write!(f, "Vector store not found: {}", id),
            DeleteVectorStoreError::RemoteNotDeleted(id) => {
                write!(f, "Provider did not delete vector store {}", id)
            }
            DeleteVectorStoreError::ProviderError(msg) => write!(f, "Provider error: {}", msg),
            DeleteVectorStoreError::RepositoryError(msg) => {
                write!(f, "Repository error: {}", msg)
            }
        }
    }
}

impl std::error::Error for DeleteVectorStoreError {}

impl From<RepositoryError> for DeleteVectorStoreError {
    fn from(error: RepositoryError) -> Self {
        DeleteVectorStoreError::RepositoryError(error.to_string())
    }
}

impl DeleteVectorStoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DeleteVectorStoreError::NotFound(_))
    }
}

#[derive(Debug, Clone)]
pub struct DeleteVectorStoreRequest {
    pub vector_store_id: String,
    pub user_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct DeleteVectorStoreResponse {
    pub report: CascadeReport,
}

/// Deletes a vector store with its dependents: assistants bound to it (each
/// cascading to its threads), threads referencing it directly, then the
/// remote store, then the local record.
///
/// A thread can be reached through both the assistant path and the direct
/// reference; the second attempt sees "not found" and is treated as an
/// idempotent success.
pub struct DeleteVectorStoreUseCase {
    provider: Arc<dyn AssistantProvider>,
    vector_store_repository: Arc<dyn VectorStoreRepository>,
    assistant_repository: Arc<dyn AssistantRepository>,
    thread_repository: Arc<dyn ThreadRepository>,
    delete_assistant: Arc<DeleteAssistantUseCase>,
    delete_thread: Arc<DeleteThreadUseCase>,
}

impl DeleteVectorStoreUseCase {
    pub fn new(
        provider: Arc<dyn AssistantProvider>,
        vector_store_repository: Arc<dyn VectorStoreRepository>,
        assistant_repository: Arc<dyn AssistantRepository>,
        thread_repository: Arc<dyn ThreadRepository>,
        delete_assistant: Arc<DeleteAssistantUseCase>,
        delete_thread: Arc<DeleteThreadUseCase>,
    ) -> Self {
        Self {
            provider,
            vector_store_repository,
            assistant_repository,
            thread_repository,
            delete_assistant,
            delete_thread,
        }
    }

    pub async fn execute(
        &self,
        request: DeleteVectorStoreRequest,
    ) -> Result<DeleteVectorStoreResponse, DeleteVectorStoreError> {
        let store = self
            .vector_store_repository
            .find_by_remote_id(&request.vector_store_id)
            .await?
            .filter(|s| s.is_owned_by(request.user_id))
            .ok_or_else(|| DeleteVectorStoreError::NotFound(request.vector_store_id.clone()))?;

        let mut report = CascadeReport::new();

        let assistants = self
            .assistant_repository
            .find_by_vector_store(request.user_id, store.id())
            .await?;
        for assistant in assistants {
            let result = self
                .delete_assistant
                .execute(DeleteAssistantRequest {
                    assistant_id: assistant.remote_id().to_string(),
                    user_id: request.user_id,
                })
                .await;
            match result {
                Ok(response) => report.absorb(response.report),
                Err(e) if e.is_not_found() => {}
                Err(e) => {
                    tracing::error!(
                        "Cascade failed for assistant {}: {}",
                        assistant.remote_id(),
                        e
                    );
                    report.record_failure(format!(
                        "delete assistant {}: {}",
                        assistant.remote_id(),
                        e
                    ));
                }
            }
        }

        // Threads referencing the store directly; most are already gone via
        // their assistant, which is fine.
        let threads = self.thread_repository.find_by_vector_store(store.id()).await?;
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

        match self.provider.delete_vector_store(store.remote_id()).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::error!(
                    "Provider reported vector store {} as not deleted",
                    store.remote_id()
                );
                return Err(DeleteVectorStoreError::RemoteNotDeleted(
                    store.remote_id().to_string(),
                ));
            }
            Err(e) if e.is_not_found() => {
                tracing::warn!(
                    "Vector store {} was already absent remotely",
                    store.remote_id()
                );
            }
            Err(e) => {
                tracing::error!(
                    "Failed to delete vector store {}: {}",
                    store.remote_id(),
                    e
                );
                return Err(DeleteVectorStoreError::ProviderError(e.to_string()));
            }
        }

        self.vector_store_repository.delete(store.id()).await?;
        tracing::info!("Deleted vector store {}", store.remote_id());

        Ok(DeleteVectorStoreResponse { report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{
        FakeProvider, InMemoryMirror, seed_assistant, seed_thread, seed_vector_store,
    };

    fn use_case(
        provider: &Arc<FakeProvider>,
        mirror: &InMemoryMirror,
    ) -> DeleteVectorStoreUseCase {
        let delete_thread = Arc::new(DeleteThreadUseCase::new(
            provider.clone(),
            mirror.threads(),
            mirror.messages(),
        ));
        let delete_assistant = Arc::new(DeleteAssistantUseCase::new(
            provider.clone(),
            mirror.assistants(),
            mirror.threads(),
            delete_thread.clone(),
        ));
        DeleteVectorStoreUseCase::new(
            provider.clone(),
            mirror.vector_stores(),
            mirror.assistants(),
            mirror.threads(),
            delete_assistant,
            delete_thread,
        )
    }

    #[tokio::test]
    async fn test_cascade_removes_every_dependent() {
        let provider = Arc::new(FakeProvider::new());
        let mirror = InMemoryMirror::new();
        let user_id = Uuid::new_v4();
        let vs = seed_vector_store(&provider, &mirror, user_id, "Notes").await;
        let local_vs = mirror
            .vector_stores()
            .find_by_remote_id(&vs)
            .await
            .unwrap()
            .unwrap();
        let assistant = seed_assistant(&provider, &mirror, user_id, &vs, "Tutor").await;
        // One thread reachable via the assistant AND the direct reference,
        // one reachable only via the direct reference.
        seed_thread(&provider, &mirror, user_id, Some(local_vs.id()), &assistant).await;
        seed_thread(&provider, &mirror, user_id, Some(local_vs.id()), "asst-gone").await;

        let response = use_case(&provider, &mirror)
            .execute(DeleteVectorStoreRequest {
                vector_store_id: vs.clone(),
                user_id,
            })
            .await
            .unwrap();

        assert!(response.report.is_clean());
        assert!(
            mirror
                .vector_stores()
                .find_by_remote_id(&vs)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            mirror
                .assistants()
                .find_by_owner(user_id)
                .await
                .unwrap()
                .is_empty()
        );
        assert!(
            mirror
                .threads()
                .find_by_owner(user_id)
                .await
                .unwrap()
                .is_empty()
        );
        assert!(!provider.vector_store_exists(&vs));
    }

    #[tokio::test]
    async fn test_remote_refusal_keeps_the_local_record() {
        let provider = Arc::new(FakeProvider::new());
        let mirror = InMemoryMirror::new();
        let user_id = Uuid::new_v4();
        let vs = seed_vector_store(&provider, &mirror, user_id, "Notes").await;
        provider.refuse_vector_store_deletion(&vs);

        let result = use_case(&provider, &mirror)
            .execute(DeleteVectorStoreRequest {
                vector_store_id: vs.clone(),
                user_id,
            })
            .await;

        assert!(matches!(
            result,
            Err(DeleteVectorStoreError::RemoteNotDeleted(_))
        ));
        assert!(
            mirror
                .vector_stores()
                .find_by_remote_id(&vs)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_thread_cascade_failure_is_aggregated_not_fatal() {
        let provider = Arc::new(FakeProvider::new());
        let mirror = InMemoryMirror::new();
        let user_id = Uuid::new_v4();
        let vs = seed_vector_store(&provider, &mirror, user_id, "Notes").await;
        let local_vs = mirror
            .vector_stores()
            .find_by_remote_id(&vs)
            .await
            .unwrap()
            .unwrap();
        let stubborn =
            seed_thread(&provider, &mirror, user_id, Some(local_vs.id()), "asst-x").await;
        provider.refuse_thread_deletion(stubborn.remote_id());

        let response = use_case(&provider, &mirror)
            .execute(DeleteVectorStoreRequest {
                vector_store_id: vs.clone(),
                user_id,
            })
            .await
            .unwrap();

        // The store is gone but the overall result reports the sub-failure.
        assert!(!response.report.is_clean());
        assert!(
            mirror
                .vector_stores()
                .find_by_remote_id(&vs)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            mirror
                .threads()
                .find_by_remote_id(stubborn.remote_id())
                .await
                .unwrap()
                .is_some()
        );
    }
}
