use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::ChatHandler;

pub fn chat_routes(chat_handler: Arc<ChatHandler>) -> Router {
    Router::new()
        .route("/threads/{thread_id}/chat", post(ChatHandler::send_message))
        .route(
            "/threads/{thread_id}/chat/stream",
            post(ChatHandler::stream_message),
        )
        .with_state(chat_handler)
}
