use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::AssistantProvider;
use crate::application::ports::assistant_provider::ProviderError;
use crate::domain::entities::File;
use crate::domain::repositories::{FileRepository, RepositoryError};

#[derive(Debug)]
pub enum UploadFileError {
    ValidationError(String),
    ProviderError(String),
    RepositoryError(String),
    /// The document was uploaded and mirrored, but attaching it to the
    /// requested vector store failed. The upload is not rolled back.
    AttachFailed { file_id: String, reason: String },
}

impl std::fmt::Display for UploadFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadFileError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            UploadFileError::ProviderError(msg) => write!(f, "Provider error: {}", msg),
            UploadFileError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            UploadFileError::AttachFailed { file_id, reason } => {
                write!(f, "File {} uploaded but not attached: {}", file_id, reason)
            }
        }
    }
}

impl std::error::Error for UploadFileError {}

impl From<RepositoryError> for UploadFileError {
    fn from(error: RepositoryError) -> Self {
        UploadFileError::RepositoryError(error.to_string())
    }
}

impl From<ProviderError> for UploadFileError {
    fn from(error: ProviderError) -> Self {
        UploadFileError::ProviderError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct UploadFileRequest {
    pub file_name: String,
    pub data: Vec<u8>,
    pub user_id: Uuid,
    /// When given, the uploaded file is attached to this store and a
    /// same-named file already present in it short-circuits the upload.
    pub vector_store_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UploadFileResponse {
    pub file_id: String,
    pub file_name: String,
    pub already_attached: bool,
}

/// Uploads a document to the provider and mirrors it locally, optionally
/// attaching it to an existing vector store.
pub struct UploadFileUseCase {
    provider: Arc<dyn AssistantProvider>,
    file_repository: Arc<dyn FileRepository>,
}

impl UploadFileUseCase {
    pub fn new(
        provider: Arc<dyn AssistantProvider>,
        file_repository: Arc<dyn FileRepository>,
    ) -> Self {
        Self {
            provider,
            file_repository,
        }
    }

    pub async fn execute(
        &self,
        request: UploadFileRequest,
    ) -> Result<UploadFileResponse, UploadFileError> {
        if request.file_name.trim().is_empty() {
            return Err(UploadFileError::ValidationError(
                "File name cannot be empty".to_string(),
            ));
        }
        if request.data.is_empty() {
            return Err(UploadFileError::ValidationError(
                "File data cannot be empty".to_string(),
            ));
        }

        // Name dedup within the target store: the remote membership decides,
        // not the local mirror.
        if let Some(vector_store_id) = &request.vector_store_id {
            let members = self
                .provider
                .list_vector_store_files(vector_store_id)
                .await?;
            let owned = self.file_repository.find_by_owner(request.user_id).await?;

            if let Some(existing) = owned.iter().find(|f| {
                f.file_name() == request.file_name && members.contains(&f.remote_id().to_string())
            }) {
                tracing::debug!(
                    "File '{}' already attached to vector store {}",
                    request.file_name,
                    vector_store_id
                );
                return Ok(UploadFileResponse {
                    file_id: existing.remote_id().to_string(),
                    file_name: existing.file_name().to_string(),
                    already_attached: true,
                });
            }
        }

        let remote_id = self
            .provider
            .upload_file(&request.file_name, request.data)
            .await?;
        tracing::info!("Uploaded '{}' as {}", request.file_name, remote_id);

        let file = File::new(remote_id.clone(), request.file_name.clone(), request.user_id);
        self.file_repository.save(&file).await?;

        if let Some(vector_store_id) = &request.vector_store_id {
            if let Err(e) = self.provider.attach_file(vector_store_id, &remote_id).await {
                tracing::error!(
                    "Failed to attach {} to vector store {}: {}",
                    remote_id,
                    vector_store_id,
                    e
                );
                return Err(UploadFileError::AttachFailed {
                    file_id: remote_id,
                    reason: e.to_string(),
                });
            }
        }

        Ok(UploadFileResponse {
            file_id: remote_id,
            file_name: request.file_name,
            already_attached: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{FakeProvider, InMemoryMirror};

    fn request(user_id: Uuid, name: &str, store: Option<&str>) -> UploadFileRequest {
        UploadFileRequest {
            file_name: name.to_string(),
            data: b"lecture notes".to_vec(),
            user_id,
            vector_store_id: store.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_upload_mirrors_file_locally() {
        let provider = Arc::new(FakeProvider::new());
        let mirror = InMemoryMirror::new();
        let user_id = Uuid::new_v4();

        let use_case = UploadFileUseCase::new(provider.clone(), mirror.files());
        let response = use_case
            .execute(request(user_id, "notes.pdf", None))
            .await
            .unwrap();

        assert!(!response.already_attached);
        assert!(provider.file_exists(&response.file_id));
        let mirrored = mirror
            .files()
            .find_by_remote_id(&response.file_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(mirrored.file_name(), "notes.pdf");
    }

    #[tokio::test]
    async fn test_same_named_file_in_store_short_circuits() {
        let provider = Arc::new(FakeProvider::new());
        let mirror = InMemoryMirror::new();
        let user_id = Uuid::new_v4();
        let vs = provider.seed_vector_store("study set");

        let use_case = UploadFileUseCase::new(provider.clone(), mirror.files());
        let first = use_case
            .execute(request(user_id, "notes.pdf", Some(&vs)))
            .await
            .unwrap();
        let second = use_case
            .execute(request(user_id, "notes.pdf", Some(&vs)))
            .await
            .unwrap();

        assert!(second.already_attached);
        assert_eq!(first.file_id, second.file_id);
        assert_eq!(provider.uploaded_file_count(), 1);
    }

    #[tokio::test]
    async fn test_attach_failure_keeps_the_upload() {
        let provider = Arc::new(FakeProvider::new());
        let mirror = InMemoryMirror::new();
        let user_id = Uuid::new_v4();
        let vs = provider.seed_vector_store("study set");
        provider.fail_next_attach("attach refused");

        let use_case = UploadFileUseCase::new(provider.clone(), mirror.files());
        let result = use_case
            .execute(request(user_id, "notes.pdf", Some(&vs)))
            .await;

        let Err(UploadFileError::AttachFailed { file_id, .. }) = result else {
            panic!("expected AttachFailed");
        };
        assert!(provider.file_exists(&file_id));
        assert!(
            mirror
                .files()
                .find_by_remote_id(&file_id)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_empty_file_is_rejected_before_any_call() {
        let provider = Arc::new(FakeProvider::new());
        let mirror = InMemoryMirror::new();
        let use_case = UploadFileUseCase::new(provider.clone(), mirror.files());

        let result = use_case
            .execute(UploadFileRequest {
                file_name: "notes.pdf".to_string(),
                data: Vec::new(),
                user_id: Uuid::new_v4(),
                vector_store_id: None,
            })
            .await;

        assert!(matches!(result, Err(UploadFileError::ValidationError(_))));
        assert_eq!(provider.uploaded_file_count(), 0);
    }
}
