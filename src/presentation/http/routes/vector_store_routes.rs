use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::VectorStoreHandler;

pub fn vector_store_routes(vector_store_handler: Arc<VectorStoreHandler>) -> Router {
    Router::new()
        .route(
            "/vector-stores",
            post(VectorStoreHandler::create_vector_store),
        )
        .route("/vector-stores", get(VectorStoreHandler::list_vector_stores))
        .route(
            "/vector-stores/{vector_store_id}",
            delete(VectorStoreHandler::delete_vector_store),
        )
        .with_state(vector_store_handler)
}
