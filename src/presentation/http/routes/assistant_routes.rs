use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::AssistantHandler;

pub fn assistant_routes(assistant_handler: Arc<AssistantHandler>) -> Router {
    Router::new()
        .route("/assistants", post(AssistantHandler::create_assistant))
        .route("/assistants", get(AssistantHandler::list_assistants))
        .route(
            "/assistants/{assistant_id}",
            delete(AssistantHandler::delete_assistant),
        )
        .with_state(assistant_handler)
}
