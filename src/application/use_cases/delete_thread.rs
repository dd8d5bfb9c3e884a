use std::sync::Arc;

use crate::application::ports::AssistantProvider;
use crate::domain::repositories::{MessageRepository, RepositoryError, ThreadRepository};

#[derive(Debug)]
pub enum DeleteThreadError {
    NotFound(String),
    /// The provider acknowledged the call but reported the thread as not
    /// deleted. Local messages and the thread record are left untouched.
    RemoteNotDeleted(String),
    ProviderError(String),
    RepositoryError(String),
}

impl std::fmt::Display for DeleteThreadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteThreadError::NotFound(id) => write!(f, "Thread not found: {}", id),
            DeleteThreadError::RemoteNotDeleted(id) => {
                write!(f, "Provider did not delete thread {}", id)
            }
            DeleteThreadError::ProviderError(msg) => write!(f, "Provider error: {}", msg),
            DeleteThreadError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for DeleteThreadError {}

impl From<RepositoryError> for DeleteThreadError {
    fn from(error: RepositoryError) -> Self {
        DeleteThreadError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct DeleteThreadRequest {
    pub thread_id: String,
}

#[derive(Debug, Clone)]
pub struct DeleteThreadResponse {
    pub messages_deleted: usize,
}

/// Deletes a conversation: remote thread first, then local messages, then
/// the local thread record. Authorization happens in the caller; this layer
/// takes no owner parameter.
pub struct DeleteThreadUseCase {
    provider: Arc<dyn AssistantProvider>,
    thread_repository: Arc<dyn ThreadRepository>,
    message_repository: Arc<dyn MessageRepository>,
}

impl DeleteThreadUseCase {
    pub fn new(
        provider: Arc<dyn AssistantProvider>,
        thread_repository: Arc<dyn ThreadRepository>,
        message_repository: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            provider,
            thread_repository,
            message_repository,
        }
    }

    pub async fn execute(
        &self,
        request: DeleteThreadRequest,
    ) -> Result<DeleteThreadResponse, DeleteThreadError> {
        let thread = self
            .thread_repository
            .find_by_remote_id(&request.thread_id)
            .await?
            .ok_or_else(|| DeleteThreadError::NotFound(request.thread_id.clone()))?;

        // Remote success must be verified before any local record goes away.
        match self.provider.delete_thread(thread.remote_id()).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::error!(
                    "Provider reported thread {} as not deleted",
                    thread.remote_id()
                );
                return Err(DeleteThreadError::RemoteNotDeleted(
                    thread.remote_id().to_string(),
                ));
            }
            Err(e) if e.is_not_found() => {
                // Already gone remotely; still clean up the mirror.
                tracing::warn!("Thread {} was already absent remotely", thread.remote_id());
            }
            Err(e) => {
                tracing::error!("Failed to delete thread {}: {}", thread.remote_id(), e);
                return Err(DeleteThreadError::ProviderError(e.to_string()));
            }
        }

        let messages_deleted = self.message_repository.delete_by_thread(thread.id()).await?;
        self.thread_repository.delete(thread.id()).await?;
        tracing::info!(
            "Deleted thread {} and {} message(s)",
            thread.remote_id(),
            messages_deleted
        );

        Ok(DeleteThreadResponse { messages_deleted })
    }
}

impl DeleteThreadError {
    /// Within a cascade an already-absent thread is an idempotent success,
    /// not a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DeleteThreadError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{FakeProvider, InMemoryMirror, seed_thread};
    use crate::domain::entities::Message;
    use crate::domain::value_objects::MessageRole;

    fn use_case(provider: &Arc<FakeProvider>, mirror: &InMemoryMirror) -> DeleteThreadUseCase {
        DeleteThreadUseCase::new(provider.clone(), mirror.threads(), mirror.messages())
    }

    #[tokio::test]
    async fn test_deletes_messages_and_thread_after_remote_success() {
        let provider = Arc::new(FakeProvider::new());
        let mirror = InMemoryMirror::new();
        let user_id = uuid::Uuid::new_v4();
        let thread = seed_thread(&provider, &mirror, user_id, None, "asst-1").await;
        for content in ["hi", "hello"] {
            mirror
                .messages()
                .save(&Message::new(
                    thread.id(),
                    MessageRole::User,
                    content.to_string(),
                ))
                .await
                .unwrap();
        }

        let response = use_case(&provider, &mirror)
            .execute(DeleteThreadRequest {
                thread_id: thread.remote_id().to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.messages_deleted, 2);
        assert!(
            mirror
                .threads()
                .find_by_remote_id(thread.remote_id())
                .await
                .unwrap()
                .is_none()
        );
        assert!(!provider.thread_exists(thread.remote_id()));
    }

    #[tokio::test]
    async fn test_remote_refusal_leaves_local_state_unchanged() {
        let provider = Arc::new(FakeProvider::new());
        let mirror = InMemoryMirror::new();
        let user_id = uuid::Uuid::new_v4();
        let thread = seed_thread(&provider, &mirror, user_id, None, "asst-1").await;
        mirror
            .messages()
            .save(&Message::new(
                thread.id(),
                MessageRole::User,
                "keep me".to_string(),
            ))
            .await
            .unwrap();
        provider.refuse_thread_deletion(thread.remote_id());

        let result = use_case(&provider, &mirror)
            .execute(DeleteThreadRequest {
                thread_id: thread.remote_id().to_string(),
            })
            .await;

        assert!(matches!(result, Err(DeleteThreadError::RemoteNotDeleted(_))));
        assert!(
            mirror
                .threads()
                .find_by_remote_id(thread.remote_id())
                .await
                .unwrap()
                .is_some()
        );
        assert_eq!(
            mirror.messages().find_by_thread(thread.id()).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_remotely_absent_thread_still_cleans_the_mirror() {
        let provider = Arc::new(FakeProvider::new());
        let mirror = InMemoryMirror::new();
        let user_id = uuid::Uuid::new_v4();
        let thread = seed_thread(&provider, &mirror, user_id, None, "asst-1").await;
        provider.forget_thread(thread.remote_id());

        use_case(&provider, &mirror)
            .execute(DeleteThreadRequest {
                thread_id: thread.remote_id().to_string(),
            })
            .await
            .unwrap();

        assert!(
            mirror
                .threads()
                .find_by_remote_id(thread.remote_id())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_unknown_thread_is_reported() {
        let provider = Arc::new(FakeProvider::new());
        let mirror = InMemoryMirror::new();

        let result = use_case(&provider, &mirror)
            .execute(DeleteThreadRequest {
                thread_id: "thread-missing".to_string(),
            })
            .await;

        assert!(matches!(result, Err(DeleteThreadError::NotFound(_))));
    }
}
