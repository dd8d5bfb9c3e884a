use std::sync::Arc;

use crate::domain::entities::{Message, Thread};
use crate::domain::repositories::{MessageRepository, RepositoryError, ThreadRepository};

#[derive(Debug)]
pub enum GetThreadMessagesError {
    ThreadNotFound(String),
    RepositoryError(String),
}

impl std::fmt::Display for GetThreadMessagesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetThreadMessagesError::ThreadNotFound(id) => {
                write!(f, "Thread not found: {}", id)
            }
            GetThreadMessagesError::RepositoryError(msg) => {
                write!(f, "Repository error: {}", msg)
            }
        }
    }
}

impl std::error::Error for GetThreadMessagesError {}

impl From<RepositoryError> for GetThreadMessagesError {
    fn from(error: RepositoryError) -> Self {
        GetThreadMessagesError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct GetThreadMessagesRequest {
    pub thread_id: String,
}

#[derive(Debug, Clone)]
pub struct GetThreadMessagesResponse {
    pub thread: Thread,
    /// Oldest first: display order.
    pub messages: Vec<Message>,
}

pub struct GetThreadMessagesUseCase {
    thread_repository: Arc<dyn ThreadRepository>,
    message_repository: Arc<dyn MessageRepository>,
}

impl GetThreadMessagesUseCase {
    pub fn new(
        thread_repository: Arc<dyn ThreadRepository>,
        message_repository: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            thread_repository,
            message_repository,
        }
    }

    pub async fn execute(
        &self,
        request: GetThreadMessagesRequest,
    ) -> Result<GetThreadMessagesResponse, GetThreadMessagesError> {
        let thread = self
            .thread_repository
            .find_by_remote_id(&request.thread_id)
            .await?
            .ok_or_else(|| GetThreadMessagesError::ThreadNotFound(request.thread_id.clone()))?;

        let messages = self.message_repository.find_by_thread(thread.id()).await?;

        Ok(GetThreadMessagesResponse { thread, messages })
    }
}
