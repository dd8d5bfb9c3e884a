use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::application::use_cases::RegisterUserUseCase;
use crate::application::use_cases::register_user::{RegisterUserError, RegisterUserRequest};
use crate::presentation::http::dto::{ApiResponse, LoginRequestDto, UserResponseDto};

pub struct UserHandler {
    register_user_use_case: Arc<RegisterUserUseCase>,
}

impl UserHandler {
    pub fn new(register_user_use_case: Arc<RegisterUserUseCase>) -> Self {
        Self {
            register_user_use_case,
        }
    }

    pub async fn login(
        State(handler): State<Arc<UserHandler>>,
        Json(payload): Json<LoginRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = RegisterUserRequest {
            username: payload.username,
            name: payload.name,
            email: payload.email,
        };

        match handler.register_user_use_case.execute(request).await {
            Ok(response) => {
                let status = if response.created {
                    StatusCode::CREATED
                } else {
                    StatusCode::OK
                };
                Ok((
                    status,
                    Json(ApiResponse::success(UserResponseDto::from(response))),
                ))
            }
            Err(e @ RegisterUserError::ValidationError(_)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<UserResponseDto>::error(
                    "INVALID_LOGIN".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserResponseDto>::error(
                    "LOGIN_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }
}
