use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response, Sse},
};
use futures::StreamExt;
use futures::stream::Stream;
use std::{convert::Infallible, sync::Arc, time::Duration};

use crate::application::use_cases::SendMessageUseCase;
use crate::application::use_cases::send_message::{
    ChatStreamEvent, SendMessageError, SendMessageRequest,
};
use crate::presentation::http::dto::{ApiResponse, ChatRequestDto, ChatResponseDto};

pub struct ChatHandler {
    send_message_use_case: Arc<SendMessageUseCase>,
}

impl ChatHandler {
    pub fn new(send_message_use_case: Arc<SendMessageUseCase>) -> Self {
        Self {
            send_message_use_case,
        }
    }

    /// Blocking chat turn: the response carries the footnoted reply once the
    /// run has completed.
    pub async fn send_message(
        State(handler): State<Arc<ChatHandler>>,
        Path(thread_id): Path<String>,
        Json(payload): Json<ChatRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = SendMessageRequest {
            thread_id,
            content: payload.content,
        };

        match handler.send_message_use_case.execute(request).await {
            Ok(response) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(ChatResponseDto {
                    reply: response.reply,
                })),
            )),
            Err(e) => {
                let (status, code) = classify_chat_error(&e);
                Ok((
                    status,
                    Json(ApiResponse::<ChatResponseDto>::error(
                        code.to_string(),
                        e.to_string(),
                        None,
                    )),
                ))
            }
        }
    }

    /// Streaming chat turn over SSE: `delta` events while the reply grows,
    /// one `completed` event with the persisted text, `error` on failure.
    pub async fn stream_message(
        State(handler): State<Arc<ChatHandler>>,
        Path(thread_id): Path<String>,
        Json(payload): Json<ChatRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = SendMessageRequest {
            thread_id,
            content: payload.content,
        };

        match handler.send_message_use_case.execute_streaming(request).await {
            Ok(events) => {
                let stream = events.map(|event| {
                    let sse_event = match event {
                        ChatStreamEvent::Delta(text) => {
                            axum::response::sse::Event::default().event("delta").data(text)
                        }
                        ChatStreamEvent::Completed(reply) => axum::response::sse::Event::default()
                            .event("completed")
                            .data(reply),
                        ChatStreamEvent::Error(message) => axum::response::sse::Event::default()
                            .event("error")
                            .data(message),
                    };
                    Ok::<_, Infallible>(sse_event)
                });
                Ok(create_sse_response(stream))
            }
            Err(e) => {
                let (status, code) = classify_chat_error(&e);
                Ok((
                    status,
                    Json(ApiResponse::<ChatResponseDto>::error(
                        code.to_string(),
                        e.to_string(),
                        None,
                    )),
                )
                    .into_response())
            }
        }
    }
}

fn classify_chat_error(error: &SendMessageError) -> (StatusCode, &'static str) {
    match error {
        SendMessageError::ValidationError(_) => (StatusCode::BAD_REQUEST, "INVALID_MESSAGE"),
        SendMessageError::ThreadNotFound(_) => (StatusCode::NOT_FOUND, "THREAD_NOT_FOUND"),
        SendMessageError::ForwardFailed(_) => (StatusCode::BAD_GATEWAY, "FORWARD_FAILED"),
        SendMessageError::ProviderError(_) => (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR"),
        SendMessageError::RunFailed(_) => (StatusCode::BAD_GATEWAY, "RUN_FAILED"),
        SendMessageError::Timeout => (StatusCode::GATEWAY_TIMEOUT, "RUN_TIMEOUT"),
        SendMessageError::NoResponse => (StatusCode::BAD_GATEWAY, "NO_RESPONSE"),
        SendMessageError::RepositoryError(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "REPOSITORY_ERROR")
        }
    }
}

fn create_sse_response<S>(stream: S) -> Response
where
    S: Stream<Item = Result<axum::response::sse::Event, Infallible>> + Send + 'static,
{
    Sse::new(stream)
        .keep_alive(
            axum::response::sse::KeepAlive::new()
                .interval(Duration::from_secs(30))
                .text("keep-alive"),
        )
        .into_response()
}
