use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::FileHandler;

pub fn file_routes(file_handler: Arc<FileHandler>) -> Router {
    Router::new()
        .route("/upload", post(FileHandler::upload_file))
        .route("/files", get(FileHandler::list_files))
        .route("/files/{file_id}", delete(FileHandler::delete_file))
        .with_state(file_handler)
}
