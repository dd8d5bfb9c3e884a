pub mod assistant_repository;
pub mod file_repository;
pub mod message_repository;
pub mod thread_repository;
pub mod user_repository;
pub mod vector_store_repository;

pub use assistant_repository::AssistantRepository;
pub use file_repository::FileRepository;
pub use message_repository::MessageRepository;
pub use thread_repository::ThreadRepository;
pub use user_repository::UserRepository;
pub use vector_store_repository::VectorStoreRepository;

/// Failure surface shared by every mirror store repository.
#[derive(Debug)]
pub enum RepositoryError {
    NotFound(String),
    DatabaseError(String),
    Conflict(String),
}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryError::NotFound(what) => write!(f, "Record not found: {}", what),
            RepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            RepositoryError::Conflict(msg) => write!(f, "Conflict: {}", msg),
        }
    }
}

impl std::error::Error for RepositoryError {}
