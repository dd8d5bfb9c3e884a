pub mod cascade;
pub mod create_assistant;
pub mod create_thread;
pub mod create_vector_store;
pub mod delete_assistant;
pub mod delete_file;
pub mod delete_thread;
pub mod delete_vector_store;
pub mod get_thread_messages;
pub mod list_user_resources;
pub mod register_user;
pub mod send_message;
pub mod upload_file;

pub use cascade::CascadeReport;
pub use create_assistant::CreateAssistantUseCase;
pub use create_thread::CreateThreadUseCase;
pub use create_vector_store::CreateVectorStoreUseCase;
pub use delete_assistant::DeleteAssistantUseCase;
pub use delete_file::DeleteFileUseCase;
pub use delete_thread::DeleteThreadUseCase;
pub use delete_vector_store::DeleteVectorStoreUseCase;
pub use get_thread_messages::GetThreadMessagesUseCase;
pub use list_user_resources::ListUserResourcesUseCase;
pub use register_user::RegisterUserUseCase;
pub use send_message::SendMessageUseCase;
pub use upload_file::UploadFileUseCase;
