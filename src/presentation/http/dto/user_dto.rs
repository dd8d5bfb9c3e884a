use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::register_user::RegisterUserResponse;

#[derive(Debug, Deserialize)]
pub struct LoginRequestDto {
    pub username: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponseDto {
    pub user_id: Uuid,
    pub username: String,
    pub name: String,
    pub email: String,
    pub created: bool,
}

impl From<RegisterUserResponse> for UserResponseDto {
    fn from(response: RegisterUserResponse) -> Self {
        Self {
            user_id: response.user.id(),
            username: response.user.username().to_string(),
            name: response.user.name().to_string(),
            email: response.user.email().to_string(),
            created: response.created,
        }
    }
}
