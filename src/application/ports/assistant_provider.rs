use async_trait::async_trait;
use futures::stream::BoxStream;

/// Failure surface of the remote assistant provider.
#[derive(Debug)]
pub enum ProviderError {
    NetworkError(String),
    ApiError(String),
    NotFound(String),
    RateLimited,
    Unavailable,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            ProviderError::ApiError(msg) => write!(f, "Provider API error: {}", msg),
            ProviderError::NotFound(what) => write!(f, "Remote resource not found: {}", what),
            ProviderError::RateLimited => write!(f, "Provider rate limit exceeded"),
            ProviderError::Unavailable => write!(f, "Provider unavailable"),
        }
    }
}

impl std::error::Error for ProviderError {}

impl ProviderError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound(_))
    }
}

/// Status of one run of an assistant against a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
    Cancelled,
    Expired,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Completed | RunStatus::Failed | RunStatus::Cancelled | RunStatus::Expired
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Expired => "expired",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "queued" => Ok(RunStatus::Queued),
            "in_progress" => Ok(RunStatus::InProgress),
            "completed" => Ok(RunStatus::Completed),
            "failed" => Ok(RunStatus::Failed),
            "cancelled" => Ok(RunStatus::Cancelled),
            "expired" => Ok(RunStatus::Expired),
            _ => Err(format!("Unknown run status: {}", s)),
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Run {
    pub id: String,
    pub status: RunStatus,
}

/// A citation marker inside a generated response. `source_text` is the exact
/// span the provider placed in the message body; the footnote pass replaces
/// it with a sequential marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageAnnotation {
    pub source_text: String,
}

/// A message as the remote thread holds it.
#[derive(Debug, Clone)]
pub struct RemoteMessage {
    pub id: String,
    pub role: String,
    pub text: String,
    pub annotations: Vec<MessageAnnotation>,
    pub run_id: Option<String>,
}

/// One event of a streamed run, consumed via exhaustive matching.
#[derive(Debug, Clone, PartialEq)]
pub enum RunStreamEvent {
    TextDelta(String),
    Done,
    Error(String),
}

pub type RunEventStream = BoxStream<'static, RunStreamEvent>;

/// The remote resource client boundary: files, vector stores, assistants,
/// threads, and runs, all managed by the hosted AI provider.
///
/// Deletion calls return the provider's acknowledgement: `Ok(true)` means
/// deleted, `Ok(false)` means the provider reported the resource as not
/// deleted, and `Err(NotFound)` means it does not exist remotely.
#[async_trait]
pub trait AssistantProvider: Send + Sync {
    // Files
    async fn upload_file(&self, file_name: &str, data: Vec<u8>) -> Result<String, ProviderError>;
    async fn delete_file(&self, file_id: &str) -> Result<bool, ProviderError>;

    // Vector stores. The remote membership is the source of truth; callers
    // must list it rather than trust any local record.
    async fn create_vector_store(&self, name: &str) -> Result<String, ProviderError>;
    async fn list_vector_store_files(
        &self,
        vector_store_id: &str,
    ) -> Result<Vec<String>, ProviderError>;
    async fn attach_file(
        &self,
        vector_store_id: &str,
        file_id: &str,
    ) -> Result<(), ProviderError>;
    async fn detach_file(
        &self,
        vector_store_id: &str,
        file_id: &str,
    ) -> Result<(), ProviderError>;
    async fn delete_vector_store(&self, vector_store_id: &str) -> Result<bool, ProviderError>;

    // Assistants, each bound to exactly one vector store.
    async fn create_assistant(
        &self,
        name: &str,
        instructions: &str,
        model: &str,
        vector_store_id: &str,
    ) -> Result<String, ProviderError>;
    async fn delete_assistant(&self, assistant_id: &str) -> Result<bool, ProviderError>;

    // Threads and their messages.
    async fn create_thread(&self) -> Result<String, ProviderError>;
    async fn delete_thread(&self, thread_id: &str) -> Result<bool, ProviderError>;
    async fn create_message(
        &self,
        thread_id: &str,
        role: &str,
        content: &str,
    ) -> Result<String, ProviderError>;
    /// Messages of the remote thread, newest first.
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<RemoteMessage>, ProviderError>;

    // Runs
    async fn create_run(&self, thread_id: &str, assistant_id: &str)
    -> Result<Run, ProviderError>;
    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run, ProviderError>;
    async fn stream_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> Result<RunEventStream, ProviderError>;
}
