use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::presentation::http::{
    handlers::{
        AssistantHandler, ChatHandler, FileHandler, ThreadHandler, UserHandler,
        VectorStoreHandler,
    },
    routes::{
        assistant_routes, chat_routes, file_routes, health_routes, thread_routes, user_routes,
        vector_store_routes,
    },
};

pub struct HttpServer {
    user_handler: Arc<UserHandler>,
    file_handler: Arc<FileHandler>,
    vector_store_handler: Arc<VectorStoreHandler>,
    assistant_handler: Arc<AssistantHandler>,
    thread_handler: Arc<ThreadHandler>,
    chat_handler: Arc<ChatHandler>,
    port: u16,
}

impl HttpServer {
    pub fn new(
        user_handler: Arc<UserHandler>,
        file_handler: Arc<FileHandler>,
        vector_store_handler: Arc<VectorStoreHandler>,
        assistant_handler: Arc<AssistantHandler>,
        thread_handler: Arc<ThreadHandler>,
        chat_handler: Arc<ChatHandler>,
        port: Option<u16>,
    ) -> Self {
        Self {
            user_handler,
            file_handler,
            vector_store_handler,
            assistant_handler,
            thread_handler,
            chat_handler,
            port: port.unwrap_or(3000),
        }
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = Router::new()
            .merge(health_routes())
            .merge(user_routes(self.user_handler))
            .merge(file_routes(self.file_handler))
            .merge(vector_store_routes(self.vector_store_handler))
            .merge(assistant_routes(self.assistant_handler))
            .merge(thread_routes(self.thread_handler))
            .merge(chat_routes(self.chat_handler))
            .layer(cors)
            .layer(RequestBodyLimitLayer::new(50 * 1024 * 1024)) // 50MB cap for uploads
            .layer(
                TraceLayer::new_for_http()
                    .on_request(
                        |request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                            tracing::info!(
                                "Received request: {} {}",
                                request.method(),
                                request.uri()
                            );
                        },
                    )
                    .on_response(
                        |response: &axum::http::Response<axum::body::Body>,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::info!(
                                "Response: {} (took {} ms)",
                                response.status(),
                                latency.as_millis()
                            );
                        },
                    )
                    .on_failure(
                        |error: ServerErrorsFailureClass,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::error!(
                                "Request failed: {:?} (took {} ms)",
                                error,
                                latency.as_millis()
                            );
                        },
                    ),
            );

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));

        tracing::info!("Listening on {}", addr);
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
