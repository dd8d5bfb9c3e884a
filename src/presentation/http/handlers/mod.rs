pub mod assistant_handler;
pub mod chat_handler;
pub mod file_handler;
pub mod thread_handler;
pub mod user_handler;
pub mod vector_store_handler;

pub use assistant_handler::AssistantHandler;
pub use chat_handler::ChatHandler;
pub use file_handler::FileHandler;
pub use thread_handler::ThreadHandler;
pub use user_handler::UserHandler;
pub use vector_store_handler::VectorStoreHandler;
