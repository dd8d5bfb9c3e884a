use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatRequestDto {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponseDto {
    pub reply: String,
}
