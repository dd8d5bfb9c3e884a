use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Message, Thread};

#[derive(Debug, Deserialize)]
pub struct CreateThreadRequestDto {
    pub title: String,
    pub assistant_id: String,
    pub vector_store_id: Option<String>,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ThreadResponseDto {
    pub thread_id: String,
    pub title: String,
    pub assistant_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Thread> for ThreadResponseDto {
    fn from(thread: Thread) -> Self {
        Self {
            thread_id: thread.remote_id().to_string(),
            title: thread.title().to_string(),
            assistant_id: thread.assistant_remote_id().to_string(),
            created_at: thread.created_at().to_rfc3339(),
            updated_at: thread.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ThreadListResponseDto {
    pub threads: Vec<ThreadResponseDto>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponseDto {
    pub role: String,
    pub content: String,
    pub created_at: String,
}

impl From<Message> for MessageResponseDto {
    fn from(message: Message) -> Self {
        Self {
            role: message.role().as_str().to_string(),
            content: message.content().to_string(),
            created_at: message.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ThreadMessagesResponseDto {
    pub thread: ThreadResponseDto,
    pub messages: Vec<MessageResponseDto>,
}
