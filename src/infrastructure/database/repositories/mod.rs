pub mod postgres_assistant_repository;
pub mod postgres_file_repository;
pub mod postgres_message_repository;
pub mod postgres_thread_repository;
pub mod postgres_user_repository;
pub mod postgres_vector_store_repository;

pub use postgres_assistant_repository::PostgresAssistantRepository;
pub use postgres_file_repository::PostgresFileRepository;
pub use postgres_message_repository::PostgresMessageRepository;
pub use postgres_thread_repository::PostgresThreadRepository;
pub use postgres_user_repository::PostgresUserRepository;
pub use postgres_vector_store_repository::PostgresVectorStoreRepository;
