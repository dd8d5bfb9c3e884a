use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::{RepositoryError, UserRepository};

#[derive(Debug)]
pub enum RegisterUserError {
    ValidationError(String),
    RepositoryError(String),
}

impl std::fmt::Display for RegisterUserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegisterUserError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            RegisterUserError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for RegisterUserError {}

impl From<RepositoryError> for RegisterUserError {
    fn from(error: RepositoryError) -> Self {
        RegisterUserError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub username: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct RegisterUserResponse {
    pub user: User,
    pub created: bool,
}

/// Get-or-create on login: an existing user is returned unchanged, a new
/// identity is persisted on first sight.
pub struct RegisterUserUseCase {
    user_repository: Arc<dyn UserRepository>,
}

impl RegisterUserUseCase {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    pub async fn execute(
        &self,
        request: RegisterUserRequest,
    ) -> Result<RegisterUserResponse, RegisterUserError> {
        if request.username.trim().is_empty() {
            return Err(RegisterUserError::ValidationError(
                "Username cannot be empty".to_string(),
            ));
        }
        if request.email.trim().is_empty() {
            return Err(RegisterUserError::ValidationError(
                "Email cannot be empty".to_string(),
            ));
        }

        if let Some(existing) = self
            .user_repository
            .find_by_username(&request.username)
            .await?
        {
            tracing::debug!("User {} already registered", existing.username());
            return Ok(RegisterUserResponse {
                user: existing,
                created: false,
            });
        }

        let user = User::new(request.username, request.name, request.email);
        self.user_repository.save(&user).await?;
        tracing::info!("Registered user {}", user.username());

        Ok(RegisterUserResponse {
            user,
            created: true,
        })
    }
}
