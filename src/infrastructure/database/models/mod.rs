pub mod assistant_model;
pub mod file_model;
pub mod message_model;
pub mod thread_model;
pub mod user_model;
pub mod vector_store_model;

pub use assistant_model::{AssistantModel, NewAssistantModel};
pub use file_model::{FileModel, NewFileModel};
pub use message_model::{MessageModel, NewMessageModel};
pub use thread_model::{NewThreadModel, ThreadModel};
pub use user_model::{NewUserModel, UserModel};
pub use vector_store_model::{NewVectorStoreModel, VectorStoreModel};
