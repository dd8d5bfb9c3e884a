use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::delete_file::{DeleteFileError, DeleteFileRequest};
use crate::application::use_cases::upload_file::{UploadFileError, UploadFileRequest};
use crate::application::use_cases::{
    DeleteFileUseCase, ListUserResourcesUseCase, UploadFileUseCase,
};
use crate::presentation::http::dto::{
    ApiResponse, CascadeReportDto, FileListResponseDto, FileResponseDto, OwnerQueryDto,
    UploadResponseDto,
};

pub struct FileHandler {
    upload_file_use_case: Arc<UploadFileUseCase>,
    delete_file_use_case: Arc<DeleteFileUseCase>,
    list_resources_use_case: Arc<ListUserResourcesUseCase>,
}

impl FileHandler {
    pub fn new(
        upload_file_use_case: Arc<UploadFileUseCase>,
        delete_file_use_case: Arc<DeleteFileUseCase>,
        list_resources_use_case: Arc<ListUserResourcesUseCase>,
    ) -> Self {
        Self {
            upload_file_use_case,
            delete_file_use_case,
            list_resources_use_case,
        }
    }

    pub async fn upload_file(
        State(handler): State<Arc<FileHandler>>,
        mut multipart: Multipart,
    ) -> Result<impl IntoResponse, StatusCode> {
        let mut file_name = None;
        let mut data = None;
        let mut user_id = None;
        let mut vector_store_id = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?
        {
            let field_name = field.name().map(str::to_string);
            match field_name.as_deref() {
                Some("file") => {
                    file_name = field.file_name().map(str::to_string);
                    data = Some(
                        field
                            .bytes()
                            .await
                            .map_err(|_| StatusCode::BAD_REQUEST)?
                            .to_vec(),
                    );
                }
                Some("user_id") => {
                    let raw = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?;
                    user_id =
                        Some(Uuid::parse_str(&raw).map_err(|_| StatusCode::BAD_REQUEST)?);
                }
                Some("vector_store_id") => {
                    let raw = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?;
                    if !raw.is_empty() {
                        vector_store_id = Some(raw);
                    }
                }
                _ => {}
            }
        }

        let (Some(file_name), Some(data), Some(user_id)) = (file_name, data, user_id) else {
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<UploadResponseDto>::error(
                    "MISSING_FIELDS".to_string(),
                    "Multipart upload requires 'file' and 'user_id' fields".to_string(),
                    None,
                )),
            ));
        };

        let request = UploadFileRequest {
            file_name,
            data,
            user_id,
            vector_store_id,
        };

        match handler.upload_file_use_case.execute(request).await {
            Ok(response) => Ok((
                StatusCode::CREATED,
                Json(ApiResponse::success(UploadResponseDto::from(response))),
            )),
            Err(e @ UploadFileError::ValidationError(_)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<UploadResponseDto>::error(
                    "INVALID_UPLOAD".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
            Err(e) => Ok((
                StatusCode::BAD_GATEWAY,
                Json(ApiResponse::<UploadResponseDto>::error(
                    "UPLOAD_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn list_files(
        State(handler): State<Arc<FileHandler>>,
        Query(owner): Query<OwnerQueryDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.list_resources_use_case.files(owner.user_id).await {
            Ok(files) => {
                let dto = FileListResponseDto {
                    files: files.into_iter().map(FileResponseDto::from).collect(),
                };
                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<FileListResponseDto>::error(
                    "LIST_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn delete_file(
        State(handler): State<Arc<FileHandler>>,
        Path(file_id): Path<String>,
        Query(owner): Query<OwnerQueryDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = DeleteFileRequest {
            file_id,
            user_id: owner.user_id,
        };

        match handler.delete_file_use_case.execute(request).await {
            Ok(response) => {
                let report = CascadeReportDto::from(response.report);
                let status = if report.completed {
                    StatusCode::OK
                } else {
                    StatusCode::BAD_GATEWAY
                };
                Ok((status, Json(ApiResponse::success(report))))
            }
            Err(e @ DeleteFileError::NotFound(_)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<CascadeReportDto>::error(
                    "FILE_NOT_FOUND".to_string(),
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
