mod application;
mod domain;
mod infrastructure;
mod presentation;

use infrastructure::AppContainer;
use presentation::http::server::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let container = AppContainer::new().await?;

    let port = std::env::var("PORT").ok().and_then(|p| p.parse().ok());

    let server = HttpServer::new(
        container.user_handler.clone(),
        container.file_handler.clone(),
        container.vector_store_handler.clone(),
        container.assistant_handler.clone(),
        container.thread_handler.clone(),
        container.chat_handler.clone(),
        port,
    );

    server.run().await
}
