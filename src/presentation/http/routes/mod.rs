pub mod assistant_routes;
pub mod chat_routes;
pub mod file_routes;
pub mod health_routes;
pub mod thread_routes;
pub mod user_routes;
pub mod vector_store_routes;

pub use assistant_routes::*;
pub use chat_routes::*;
pub use file_routes::*;
pub use health_routes::*;
pub use thread_routes::*;
pub use user_routes::*;
pub use vector_store_routes::*;
