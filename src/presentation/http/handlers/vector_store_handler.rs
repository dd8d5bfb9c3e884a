use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::create_vector_store::{
    CreateVectorStoreError, CreateVectorStoreRequest,
};
use crate::application::use_cases::delete_vector_store::{
    DeleteVectorStoreError, DeleteVectorStoreRequest,
};
use crate::application::use_cases::{
    CreateVectorStoreUseCase, DeleteVectorStoreUseCase, ListUserResourcesUseCase,
};
use crate::presentation::http::dto::{
    ApiResponse, CascadeReportDto, CreateVectorStoreRequestDto, CreateVectorStoreResponseDto,
    OwnerQueryDto, VectorStoreListResponseDto, VectorStoreResponseDto,
};

pub struct VectorStoreHandler {
    create_vector_store_use_case: Arc<CreateVectorStoreUseCase>,
    delete_vector_store_use_case: Arc<DeleteVectorStoreUseCase>,
    list_resources_use_case: Arc<ListUserResourcesUseCase>,
}

impl VectorStoreHandler {
    pub fn new(
        create_vector_store_use_case: Arc<CreateVectorStoreUseCase>,
        delete_vector_store_use_case: Arc<DeleteVectorStoreUseCase>,
        list_resources_use_case: Arc<ListUserResourcesUseCase>,
    ) -> Self {
        Self {
            create_vector_store_use_case,
            delete_vector_store_use_case,
            list_resources_use_case,
        }
    }

    pub async fn create_vector_store(
        State(handler): State<Arc<VectorStoreHandler>>,
        Json(payload): Json<CreateVectorStoreRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = CreateVectorStoreRequest {
            name: payload.name,
            file_ids: payload.file_ids,
            user_id: payload.user_id,
        };

        match handler.create_vector_store_use_case.execute(request).await {
            Ok(response) => {
                let status = if response.reused {
                    StatusCode::OK
                } else {
                    StatusCode::CREATED
                };
                Ok((
                    status,
                    Json(ApiResponse::success(CreateVectorStoreResponseDto::from(
                        response,
                    ))),
                ))
            }
            Err(e @ CreateVectorStoreError::ValidationError(_)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<CreateVectorStoreResponseDto>::error(
                    "INVALID_VECTOR_STORE".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
            Err(CreateVectorStoreError::PartialAttachment {
                vector_store_id,
                failed,
            }) => {
                let details = failed
                    .iter()
                    .map(|(file_id, reason)| format!("{}: {}", file_id, reason))
                    .collect::<Vec<_>>()
                    .join("; ");
                Ok((
                    StatusCode::BAD_GATEWAY,
                    Json(ApiResponse::<CreateVectorStoreResponseDto>::error(
                        "PARTIAL_ATTACHMENT".to_string(),
                        format!(
                            "Vector store {} was created but some files failed to attach",
                            vector_store_id
                        ),
                        Some(details),
                    )),
                ))
            }
            Err(e) => Ok((
                StatusCode::BAD_GATEWAY,
                Json(ApiResponse::<CreateVectorStoreResponseDto>::error(
                    "CREATE_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn list_vector_stores(
        State(handler): State<Arc<VectorStoreHandler>>,
        Query(owner): Query<OwnerQueryDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler
            .list_resources_use_case
            .vector_stores(owner.user_id)
            .await
        {
            Ok(stores) => {
                let dto = VectorStoreListResponseDto {
                    vector_stores: stores
                        .into_iter()
                        .map(VectorStoreResponseDto::from)
                        .collect(),
                };
                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<VectorStoreListResponseDto>::error(
                    "LIST_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn delete_vector_store(
        State(handler): State<Arc<VectorStoreHandler>>,
        Path(vector_store_id): Path<String>,
        Query(owner): Query<OwnerQueryDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = DeleteVectorStoreRequest {
            vector_store_id,
            user_id: owner.user_id,
        };

        match handler.delete_vector_store_use_case.execute(request).await {
            Ok(response) => {
                let report = CascadeReportDto::from(response.report);
                let status = if report.completed {
                    StatusCode::OK
                } else {
                    StatusCode::BAD_GATEWAY
                };
                Ok((status, Json(ApiResponse::success(report))))
            }
            Err(e @ DeleteVectorStoreError::NotFound(_)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<CascadeReportDto>::error(
                    "VECTOR_STORE_NOT_FOUND".to_string(),
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
