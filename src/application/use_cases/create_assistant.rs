use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::AssistantProvider;
use crate::application::ports::assistant_provider::ProviderError;
use crate::domain::entities::Assistant;
use crate::domain::repositories::{AssistantRepository, RepositoryError, VectorStoreRepository};

/// Tutor persona given to every newly created assistant, carried over from
/// the original Study Buddy prompt. Overridable per deployment via config.
pub const DEFAULT_INSTRUCTIONS: &str = "You are an AI study assistant called 'Study Buddy'. \
Your role is to help students learn and understand various concepts in their field of study.\n\n\
When a student asks a question, provide clear and concise explanations of the relevant topics. \
Break down complex concepts into easily understandable parts. Share helpful resources, such as \
academic papers, tutorials, or online courses, that can further enhance their understanding.\n\n\
Engage in meaningful discussions with the student to deepen their understanding of the subject \
matter. Encourage them to think critically and ask questions. Help them develop problem-solving \
skills and provide guidance on practical applications of the concepts they are learning.\n\n\
Be friendly, supportive, and patient in your interactions. Motivate the student to stay curious \
and persistent in their learning journey. Foster a positive and encouraging learning \
environment.\n\n\
Tailor your responses to the student's level of understanding and learning style. Adapt your \
explanations and examples to make the content more relatable and accessible.\n\n\
Remember, your goal is to empower the student to grasp the material effectively and develop a \
strong foundation in their chosen field of study.";

#[derive(Debug)]
pub enum CreateAssistantError {
    VectorStoreNotFound(String),
    ProviderError(String),
    RepositoryError(String),
    /// The provider accepted the call but returned no identifier. Fatal for
    /// this operation, never silently swallowed.
    MissingIdentifier,
}

impl std::fmt::Display for CreateAssistantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateAssistantError::VectorStoreNotFound(id) => {
                write!(f, "Vector store not found: {}", id)
            }
            CreateAssistantError::ProviderError(msg) => write!(f, "Provider error: {}", msg),
            CreateAssistantError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            CreateAssistantError::MissingIdentifier => {
                write!(f, "Assistant creation returned no identifier")
            }
        }
    }
}

impl std::error::Error for CreateAssistantError {}

impl From<RepositoryError> for CreateAssistantError {
    fn from(error: RepositoryError) -> Self {
        CreateAssistantError::RepositoryError(error.to_string())
    }
}

impl From<ProviderError> for CreateAssistantError {
    fn from(error: ProviderError) -> Self {
        CreateAssistantError::ProviderError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CreateAssistantRequest {
    pub name: Option<String>,
    pub vector_store_id: String,
    pub user_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct CreateAssistantResponse {
    pub assistant_id: String,
    /// True when an assistant already served this (user, vector store) pair
    /// and was returned unchanged.
    pub reused: bool,
}

/// Creates a remote assistant bound to exactly one vector store, reusing an
/// existing assistant for the same (user, store) pair.
pub struct CreateAssistantUseCase {
    provider: Arc<dyn AssistantProvider>,
    assistant_repository: Arc<dyn AssistantRepository>,
    vector_store_repository: Arc<dyn VectorStoreRepository>,
    instructions: String,
    model: String,
}

impl CreateAssistantUseCase {
    pub fn new(
        provider: Arc<dyn AssistantProvider>,
        assistant_repository: Arc<dyn AssistantRepository>,
        vector_store_repository: Arc<dyn VectorStoreRepository>,
        instructions: String,
        model: String,
    ) -> Self {
        Self {
            provider,
            assistant_repository,
            vector_store_repository,
            instructions,
            model,
        }
    }

    pub async fn execute(
        &self,
        request: CreateAssistantRequest,
    ) -> Result<CreateAssistantResponse, CreateAssistantError> {
        let store = self
            .vector_store_repository
            .find_by_remote_id(&request.vector_store_id)
            .await?
            .filter(|s| s.is_owned_by(request.user_id))
            .ok_or_else(|| {
                CreateAssistantError::VectorStoreNotFound(request.vector_store_id.clone())
            })?;

        // One assistant per (user, store) pair: the existing one is returned
        // as-is, with no name update and no remote call.
        let existing = self
            .assistant_repository
            .find_by_vector_store(request.user_id, store.id())
            .await?;
        if let Some(assistant) = existing.first() {
            tracing::debug!(
                "Reusing assistant {} for vector store {}",
                assistant.remote_id(),
                store.remote_id()
            );
            return Ok(CreateAssistantResponse {
                assistant_id: assistant.remote_id().to_string(),
                reused: true,
            });
        }

        let name = request
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("Assistant for {}", store.name()));

        let remote_id = self
            .provider
            .create_assistant(&name, &self.instructions, &self.model, store.remote_id())
            .await?;
        if remote_id.is_empty() {
            tracing::error!("Assistant creation returned without an identifier");
            return Err(CreateAssistantError::MissingIdentifier);
        }
        tracing::info!("Created assistant {} ('{}')", remote_id, name);

        let assistant = Assistant::new(
            remote_id.clone(),
            Some(name),
            store.id(),
            request.user_id,
        );
        self.assistant_repository.save(&assistant).await?;

        Ok(CreateAssistantResponse {
            assistant_id: remote_id,
            reused: false,
        })
    }
}
