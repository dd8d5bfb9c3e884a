use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::UserHandler;

pub fn user_routes(user_handler: Arc<UserHandler>) -> Router {
    Router::new()
        .route("/users/login", post(UserHandler::login))
        .with_state(user_handler)
}
