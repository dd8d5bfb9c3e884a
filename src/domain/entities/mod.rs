pub mod assistant;
pub mod file;
pub mod message;
pub mod thread;
pub mod user;
pub mod vector_store;

pub use assistant::Assistant;
pub use file::File;
pub use message::Message;
pub use thread::Thread;
pub use user::User;
pub use vector_store::VectorStore;
