use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::create_assistant::{
    CreateAssistantError, CreateAssistantRequest,
};
use crate::application::use_cases::delete_assistant::{
    DeleteAssistantError, DeleteAssistantRequest,
};
use crate::application::use_cases::{
    CreateAssistantUseCase, DeleteAssistantUseCase, ListUserResourcesUseCase,
};
use crate::presentation::http::dto::{
    ApiResponse, AssistantListResponseDto, AssistantResponseDto, CascadeReportDto,
    CreateAssistantRequestDto, CreateAssistantResponseDto, OwnerQueryDto,
};

pub struct AssistantHandler {
    create_assistant_use_case: Arc<CreateAssistantUseCase>,
    delete_assistant_use_case: Arc<DeleteAssistantUseCase>,
    list_resources_use_case: Arc<ListUserResourcesUseCase>,
}

impl AssistantHandler {
    pub fn new(
        create_assistant_use_case: Arc<CreateAssistantUseCase>,
        delete_assistant_use_case: Arc<DeleteAssistantUseCase>,
        list_resources_use_case: Arc<ListUserResourcesUseCase>,
    ) -> Self {
        Self {
            create_assistant_use_case,
            delete_assistant_use_case,
            list_resources_use_case,
        }
    }

    pub async fn create_assistant(
        State(handler): State<Arc<AssistantHandler>>,
        Json(payload): Json<CreateAssistantRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = CreateAssistantRequest {
            name: payload.name,
            vector_store_id: payload.vector_store_id,
            user_id: payload.user_id,
        };

        match handler.create_assistant_use_case.execute(request).await {
            Ok(response) => {
                let status = if response.reused {
                    StatusCode::OK
                } else {
                    StatusCode::CREATED
                };
                Ok((
                    status,
                    Json(ApiResponse::success(CreateAssistantResponseDto::from(
                        response,
                    ))),
                ))
            }
            Err(e @ CreateAssistantError::VectorStoreNotFound(_)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<CreateAssistantResponseDto>::error(
                    "VECTOR_STORE_NOT_FOUND".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
            Err(e) => Ok((
                StatusCode::BAD_GATEWAY,
                Json(ApiResponse::<CreateAssistantResponseDto>::error(
                    "CREATE_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn list_assistants(
        State(handler): State<Arc<AssistantHandler>>,
        Query(owner): Query<OwnerQueryDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler
            .list_resources_use_case
            .assistants(owner.user_id)
            .await
        {
            Ok(assistants) => {
                let dto = AssistantListResponseDto {
                    assistants: assistants
                        .into_iter()
                        .map(AssistantResponseDto::from)
                        .collect(),
                };
                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AssistantListResponseDto>::error(
                    "LIST_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn delete_assistant(
        State(handler): State<Arc<AssistantHandler>>,
        Path(assistant_id): Path<String>,
        Query(owner): Query<OwnerQueryDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = DeleteAssistantRequest {
            assistant_id,
            user_id: owner.user_id,
        };

        match handler.delete_assistant_use_case.execute(request).await {
            Ok(response) => {
                let report = CascadeReportDto::from(response.report);
                let status = if report.completed {
                    StatusCode::OK
                } else {
                    StatusCode::BAD_GATEWAY
                };
                Ok((status, Json(ApiResponse::success(report))))
            }
            Err(e @ DeleteAssistantError::NotFound(_)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<CascadeReportDto>::error(
                    "ASSISTANT_NOT_FOUND".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
            Err(e) => Ok((
                StatusCode::BAD_GATEWAY,
                Json(ApiResponse::<CascadeReportDto>::error(
                    "DELETE_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }
}
