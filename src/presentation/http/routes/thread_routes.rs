use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::ThreadHandler;

pub fn thread_routes(thread_handler: Arc<ThreadHandler>) -> Router {
    Router::new()
        .route("/threads", post(ThreadHandler::create_thread))
        .route("/threads", get(ThreadHandler::list_threads))
        .route(
            "/threads/{thread_id}/messages",
            get(ThreadHandler::get_thread_messages),
        )
        .route("/threads/{thread_id}", delete(ThreadHandler::delete_thread))
        .with_state(thread_handler)
}
