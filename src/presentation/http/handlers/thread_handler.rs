use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::create_thread::{CreateThreadError, CreateThreadRequest};
use crate::application::use_cases::delete_thread::{DeleteThreadError, DeleteThreadRequest};
use crate::application::use_cases::get_thread_messages::{
    GetThreadMessagesError, GetThreadMessagesRequest,
};
use crate::application::use_cases::{
    CreateThreadUseCase, DeleteThreadUseCase, GetThreadMessagesUseCase, ListUserResourcesUseCase,
};
use crate::presentation::http::dto::{
    ApiResponse, CreateThreadRequestDto, MessageResponseDto, OwnerQueryDto,
    ThreadListResponseDto, ThreadMessagesResponseDto, ThreadResponseDto,
};

pub struct ThreadHandler {
    create_thread_use_case: Arc<CreateThreadUseCase>,
    delete_thread_use_case: Arc<DeleteThreadUseCase>,
    get_thread_messages_use_case: Arc<GetThreadMessagesUseCase>,
    list_resources_use_case: Arc<ListUserResourcesUseCase>,
}

impl ThreadHandler {
    pub fn new(
        create_thread_use_case: Arc<CreateThreadUseCase>,
        delete_thread_use_case: Arc<DeleteThreadUseCase>,
        get_thread_messages_use_case: Arc<GetThreadMessagesUseCase>,
        list_resources_use_case: Arc<ListUserResourcesUseCase>,
    ) -> Self {
        Self {
            create_thread_use_case,
            delete_thread_use_case,
            get_thread_messages_use_case,
            list_resources_use_case,
        }
    }

    pub async fn create_thread(
        State(handler): State<Arc<ThreadHandler>>,
        Json(payload): Json<CreateThreadRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = CreateThreadRequest {
            title: payload.title,
            assistant_id: payload.assistant_id,
            vector_store_id: payload.vector_store_id,
            user_id: payload.user_id,
        };

        match handler.create_thread_use_case.execute(request).await {
            Ok(response) => Ok((
                StatusCode::CREATED,
                Json(ApiResponse::success(ThreadResponseDto::from(
                    response.thread,
                ))),
            )),
            Err(e @ CreateThreadError::ValidationError(_)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<ThreadResponseDto>::error(
                    "INVALID_THREAD".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
            Err(e @ CreateThreadError::VectorStoreNotFound(_)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<ThreadResponseDto>::error(
                    "VECTOR_STORE_NOT_FOUND".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
            Err(e) => Ok((
                StatusCode::BAD_GATEWAY,
                Json(ApiResponse::<ThreadResponseDto>::error(
                    "CREATE_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn list_threads(
        State(handler): State<Arc<ThreadHandler>>,
        Query(owner): Query<OwnerQueryDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.list_resources_use_case.threads(owner.user_id).await {
            Ok(threads) => {
                let dto = ThreadListResponseDto {
                    threads: threads.into_iter().map(ThreadResponseDto::from).collect(),
                };
                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ThreadListResponseDto>::error(
                    "LIST_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn get_thread_messages(
        State(handler): State<Arc<ThreadHandler>>,
        Path(thread_id): Path<String>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = GetThreadMessagesRequest { thread_id };

        match handler.get_thread_messages_use_case.execute(request).await {
            Ok(response) => {
                let dto = ThreadMessagesResponseDto {
                    thread: ThreadResponseDto::from(response.thread),
                    messages: response
                        .messages
                        .into_iter()
                        .map(MessageResponseDto::from)
                        .collect(),
                };
                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
            Err(e @ GetThreadMessagesError::ThreadNotFound(_)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<ThreadMessagesResponseDto>::error(
                    "THREAD_NOT_FOUND".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ThreadMessagesResponseDto>::error(
                    "FETCH_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn delete_thread(
        State(handler): State<Arc<ThreadHandler>>,
        Path(thread_id): Path<String>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = DeleteThreadRequest { thread_id };

        match handler.delete_thread_use_case.execute(request).await {
            Ok(_) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success("Thread deleted".to_string())),
            )),
            Err(e @ DeleteThreadError::NotFound(_)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<String>::error(
                    "THREAD_NOT_FOUND".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
            Err(e) => Ok((
                StatusCode::BAD_GATEWAY,
                Json(ApiResponse::<String>::error(
                    "DELETE_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }
}
