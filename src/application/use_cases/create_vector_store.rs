use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::AssistantProvider;
use crate::application::ports::assistant_provider::ProviderError;
use crate::domain::entities::VectorStore;
use crate::domain::repositories::{FileRepository, RepositoryError, VectorStoreRepository};
use crate::domain::value_objects::FileIdSet;

#[derive(Debug)]
pub enum CreateVectorStoreError {
    ValidationError(String),
    ProviderError(String),
    RepositoryError(String),
    /// The remote store was created and mirrored, but one or more files
    /// could not be attached. Prior state is left in place.
    PartialAttachment {
        vector_store_id: String,
        failed: Vec<(String, String)>,
    },
}

impl std::fmt::Display for CreateVectorStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateVectorStoreError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
            CreateVectorStoreError::ProviderError(msg) => write!(f, "Provider error: {}", msg),
            CreateVectorStoreError::RepositoryError(msg) => {
                write!(f, "Repository error: {}", msg)
            }
            CreateVectorStoreError::PartialAttachment {
                vector_store_id,
                failed,
            } => write!(
                f,
                "Vector store {} created but {} file(s) failed to attach",
                vector_store_id,
                failed.len()
            ),
        }
    }
}

impl std::error::Error for CreateVectorStoreError {}

impl From<RepositoryError> for CreateVectorStoreError {
    fn from(error: RepositoryError) -> Self {
        CreateVectorStoreError::RepositoryError(error.to_string())
    }
}

impl From<ProviderError> for CreateVectorStoreError {
    fn from(error: ProviderError) -> Self {
        CreateVectorStoreError::ProviderError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CreateVectorStoreRequest {
    pub name: String,
    pub file_ids: Vec<String>,
    pub user_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct CreateVectorStoreResponse {
    pub vector_store_id: String,
    /// True when an existing store with identical remote membership was
    /// returned instead of creating a new one.
    pub reused: bool,
}

/// Creates a vector store from a set of the user's files, reusing an
/// existing store whose *remote* membership equals the requested set.
pub struct CreateVectorStoreUseCase {
    provider: Arc<dyn AssistantProvider>,
    file_repository: Arc<dyn FileRepository>,
    vector_store_repository: Arc<dyn VectorStoreRepository>,
}

impl CreateVectorStoreUseCase {
    pub fn new(
        provider: Arc<dyn AssistantProvider>,
        file_repository: Arc<dyn FileRepository>,
        vector_store_repository: Arc<dyn VectorStoreRepository>,
    ) -> Self {
        Self {
            provider,
            file_repository,
            vector_store_repository,
        }
    }

    pub async fn execute(
        &self,
        request: CreateVectorStoreRequest,
    ) -> Result<CreateVectorStoreResponse, CreateVectorStoreError> {
        if request.name.trim().is_empty() {
            return Err(CreateVectorStoreError::ValidationError(
                "Vector store name cannot be empty".to_string(),
            ));
        }

        let requested = FileIdSet::new(request.file_ids.iter().cloned());
        if requested.is_empty() {
            return Err(CreateVectorStoreError::ValidationError(
                "At least one file is required".to_string(),
            ));
        }

        // Ownership must hold locally before anything is submitted; the
        // provider does not enforce it.
        let owned = self.file_repository.find_by_owner(request.user_id).await?;
        let owned_ids = FileIdSet::new(owned.iter().map(|f| f.remote_id().to_string()));
        for file_id in requested.iter() {
            if !owned_ids.contains(file_id) {
                return Err(CreateVectorStoreError::ValidationError(format!(
                    "File {} does not belong to the requesting user",
                    file_id
                )));
            }
        }

        if let Some(existing) = self.find_equivalent_store(request.user_id, &requested).await? {
            tracing::info!(
                "Reusing vector store {} for an identical file set",
                existing
            );
            return Ok(CreateVectorStoreResponse {
                vector_store_id: existing,
                reused: true,
            });
        }

        let remote_id = self.provider.create_vector_store(&request.name).await?;
        tracing::info!("Created vector store {} ('{}')", remote_id, request.name);

        let store = VectorStore::new(remote_id.clone(), request.name, request.user_id);
        self.vector_store_repository.save(&store).await?;

        // The link step is not transactional: each failure is recorded and
        // the rest of the set is still attached.
        let mut failed = Vec::new();
        for file_id in requested.iter() {
            if let Err(e) = self.provider.attach_file(&remote_id, file_id).await {
                tracing::error!(
                    "Failed to attach {} to vector store {}: {}",
                    file_id,
                    remote_id,
                    e
                );
                failed.push((file_id.to_string(), e.to_string()));
            }
        }

        if !failed.is_empty() {
            return Err(CreateVectorStoreError::PartialAttachment {
                vector_store_id: remote_id,
                failed,
            });
        }

        Ok(CreateVectorStoreResponse {
            vector_store_id: remote_id,
            reused: false,
        })
    }

    /// Scans the user's stores for one whose current remote membership is
    /// exactly the requested set. O(n) remote listings; favoring reuse over
    /// proliferation is worth that at this scale.
    async fn find_equivalent_store(
        &self,
        user_id: Uuid,
        requested: &FileIdSet,
    ) -> Result<Option<String>, CreateVectorStoreError> {
        let stores = self.vector_store_repository.find_by_owner(user_id).await?;

        for store in stores {
            let members = match self.provider.list_vector_store_files(store.remote_id()).await {
                Ok(members) => members,
                Err(e) => {
                    // A store we cannot list is skipped rather than blocking
                    // creation; the mirror may be ahead of the remote here.
                    tracing::warn!(
                        "Could not list vector store {}: {}",
                        store.remote_id(),
                        e
                    );
                    continue;
                }
            };

            if &FileIdSet::new(members) == requested {
                return Ok(Some(store.remote_id().to_string()));
            }
        }

        Ok(None)
    }
}
