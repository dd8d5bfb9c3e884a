use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::create_assistant::CreateAssistantResponse;
use crate::domain::entities::Assistant;

#[derive(Debug, Deserialize)]
pub struct CreateAssistantRequestDto {
    pub name: Option<String>,
    pub vector_store_id: String,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct AssistantResponseDto {
    pub assistant_id: String,
    pub name: Option<String>,
    pub created_at: String,
}

impl From<Assistant> for AssistantResponseDto {
    fn from(assistant: Assistant) -> Self {
        Self {
            assistant_id: assistant.remote_id().to_string(),
            name: assistant.name().map(str::to_string),
            created_at: assistant.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateAssistantResponseDto {
    pub assistant_id: String,
    pub reused: bool,
}

impl From<CreateAssistantResponse> for CreateAssistantResponseDto {
    fn from(response: CreateAssistantResponse) -> Self {
        Self {
            assistant_id: response.assistant_id,
            reused: response.reused,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AssistantListResponseDto {
    pub assistants: Vec<AssistantResponseDto>,
}
