use axum::{Json, Router, http::StatusCode, routing::get};

use crate::presentation::http::dto::{ApiResponse, HealthResponseDto};

pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_check))
}

async fn health_check() -> (StatusCode, Json<ApiResponse<HealthResponseDto>>) {
    let dto = HealthResponseDto {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    (StatusCode::OK, Json(ApiResponse::success(dto)))
}
