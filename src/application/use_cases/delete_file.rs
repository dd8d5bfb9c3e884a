use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::AssistantProvider;
use crate::application::use_cases::cascade::CascadeReport;
use crate::application::use_cases::delete_vector_store::{
    DeleteVectorStoreRequest, DeleteVectorStoreUseCase,
};
use crate::domain::repositories::{FileRepository, RepositoryError, VectorStoreRepository};

#[derive(Debug)]
pub enum DeleteFileError {
    NotFound(String),
    RemoteNotDeleted(String),
    ProviderError(String),
    RepositoryError(String),
}

impl std::fmt::Display for DeleteFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteFileError::NotFound(id) => write!(f, "File not found: {}", id),
            DeleteFileError::RemoteNotDeleted(id) => {
                write!(f, "Provider did not delete file {}", id)
            }
            DeleteFileError::ProviderError(msg) => write!(f, "Provider error: {}", msg),
            DeleteFileError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for DeleteFileError {}

impl From<RepositoryError> for DeleteFileError {
    fn from(error: RepositoryError) -> Self {
        DeleteFileError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct DeleteFileRequest {
    pub file_id: String,
    pub user_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct DeleteFileResponse {
    pub report: CascadeReport,
}

/// Deletes a document and untangles it from every vector store that still
/// holds it remotely: a store whose only member it is goes away entirely
/// (with its own cascade), any other store gets a detach. The remote file
/// deletion is verified before the local record is removed.
pub struct DeleteFileUseCase {
    provider: Arc<dyn AssistantProvider>,
    file_repository: Arc<dyn FileRepository>,
    vector_store_repository: Arc<dyn VectorStoreRepository>,
    delete_vector_store: Arc<DeleteVectorStoreUseCase>,
}

impl DeleteFileUseCase {
    pub fn new(
        provider: Arc<dyn AssistantProvider>,
        file_repository: Arc<dyn FileRepository>,
        vector_store_repository: Arc<dyn VectorStoreRepository>,
        delete_vector_store: Arc<DeleteVectorStoreUseCase>,
    ) -> Self {
        Self {
            provider,
            file_repository,
            vector_store_repository,
            delete_vector_store,
        }
    }

    pub async fn execute(
        &self,
        request: DeleteFileRequest,
    ) -> Result<DeleteFileResponse, DeleteFileError> {
        let file = self
            .file_repository
            .find_by_remote_id(&request.file_id)
            .await?
            .filter(|f| f.is_owned_by(request.user_id))
            .ok_or_else(|| DeleteFileError::NotFound(request.file_id.clone()))?;

        let mut report = CascadeReport::new();

        // Remote membership decides which stores are affected, not anything
        // the mirror remembers about past attachments.
        let stores = self
            .vector_store_repository
            .find_by_owner(request.user_id)
            .await?;
        for store in stores {
            let members = match self.provider.list_vector_store_files(store.remote_id()).await
            {
                Ok(members) => members,
                Err(e) => {
                    tracing::error!(
                        "Could not list vector store {}: {}",
                        store.remote_id(),
                        e
                    );
                    report.record_failure(format!(
                        "list vector store {}: {}",
                        store.remote_id(),
                        e
                    ));
                    continue;
                }
            };

            if !members.iter().any(|m| m == file.remote_id()) {
                continue;
            }

            if members.len() == 1 {
                // Sole member: the store has no reason to exist afterwards.
                let result = self
                    .delete_vector_store
                    .execute(DeleteVectorStoreRequest {
                        vector_store_id: store.remote_id().to_string(),
                        user_id: request.user_id,
                    })
                    .await;
                match result {
                    Ok(response) => report.absorb(response.report),
                    Err(e) if e.is_not_found() => {}
                    Err(e) => {
                        tracing::error!(
                            "Cascade failed for vector store {}: {}",
                            store.remote_id(),
                            e
                        );
                        report.record_failure(format!(
                            "delete vector store {}: {}",
                            store.remote_id(),
                            e
                        ));
                    }
                }
            } else if let Err(e) = self
                .provider
                .detach_file(store.remote_id(), file.remote_id())
                .await
            {
                tracing::error!(
                    "Failed to detach {} from vector store {}: {}",
                    file.remote_id(),
                    store.remote_id(),
                    e
                );
                report.record_failure(format!(
                    "detach {} from {}: {}",
                    file.remote_id(),
                    store.remote_id(),
                    e
                ));
            }
        }

        match self.provider.delete_file(file.remote_id()).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::error!(
                    "Provider reported file {} as not deleted",
                    file.remote_id()
                );
                return Err(DeleteFileError::RemoteNotDeleted(
                    file.remote_id().to_string(),
                ));
            }
            Err(e) if e.is_not_found() => {
                tracing::warn!("File {} was already absent remotely", file.remote_id());
            }
            Err(e) => {
                tracing::error!("Failed to delete file {}: {}", file.remote_id(), e);
                return Err(DeleteFileError::ProviderError(e.to_string()));
            }
        }

        self.file_repository.delete(file.id()).await?;
        tracing::info!("Deleted file {}", file.remote_id());

        Ok(DeleteFileResponse { report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{
        FakeProvider, InMemoryMirror, seed_assistant, seed_file, seed_thread,
        seed_vector_store_with_files,
    };
    use crate::application::use_cases::delete_assistant::DeleteAssistantUseCase;
    use crate::application::use_cases::delete_thread::DeleteThreadUseCase;

    fn use_case(provider: &Arc<FakeProvider>, mirror: &InMemoryMirror) -> DeleteFileUseCase {
        let delete_thread = Arc::new(DeleteThreadUseCase::new(
            provider.clone(),
            mirror.threads(),
            mirror.messages(),
        ));
        let delete_assistant = Arc::new(DeleteAssistantUseCase::new(
            provider.clone(),
            mirror.assistants(),
            mirror.threads(),
            delete_thread.clone(),
        ));
        let delete_vector_store = Arc::new(DeleteVectorStoreUseCase::new(
            provider.clone(),
            mirror.vector_stores(),
            mirror.assistants(),
            mirror.threads(),
            delete_assistant,
            delete_thread,
        ));
        DeleteFileUseCase::new(
            provider.clone(),
            mirror.files(),
            mirror.vector_stores(),
            delete_vector_store,
        )
    }

    #[tokio::test]
    async fn test_sole_member_store_is_fully_cascaded() {
        let provider = Arc::new(FakeProvider::new());
        let mirror = InMemoryMirror::new();
        let user_id = Uuid::new_v4();
        seed_file(&provider, &mirror, user_id, "file-1", "a.pdf").await;
        let vs =
            seed_vector_store_with_files(&provider, &mirror, user_id, "Solo", &["file-1"]).await;
        let assistant = seed_assistant(&provider, &mirror, user_id, &vs, "Tutor").await;
        let thread = seed_thread(&provider, &mirror, user_id, None, &assistant).await;

        let response = use_case(&provider, &mirror)
            .execute(DeleteFileRequest {
                file_id: "file-1".to_string(),
                user_id,
            })
            .await
            .unwrap();

        assert!(response.report.is_clean());
        assert!(!provider.file_exists("file-1"));
        assert!(!provider.vector_store_exists(&vs));
        assert!(!provider.assistant_exists(&assistant));
        assert!(
            mirror
                .files()
                .find_by_remote_id("file-1")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            mirror
                .vector_stores()
                .find_by_remote_id(&vs)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            mirror
                .threads()
                .find_by_remote_id(thread.remote_id())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_shared_store_only_detaches() {
        let provider = Arc::new(FakeProvider::new());
        let mirror = InMemoryMirror::new();
        let user_id = Uuid::new_v4();
        seed_file(&provider, &mirror, user_id, "file-1", "a.pdf").await;
        seed_file(&provider, &mirror, user_id, "file-2", "b.pdf").await;
        let vs = seed_vector_store_with_files(
            &provider,
            &mirror,
            user_id,
            "Shared",
            &["file-1", "file-2"],
        )
        .await;

        let response = use_case(&provider, &mirror)
            .execute(DeleteFileRequest {
                file_id: "file-1".to_string(),
                user_id,
            })
            .await
            .unwrap();

        assert!(response.report.is_clean());
        assert!(provider.vector_store_exists(&vs));
        assert_eq!(provider.vector_store_members(&vs), vec!["file-2"]);
        assert!(!provider.file_exists("file-1"));
    }

    #[tokio::test]
    async fn test_remote_refusal_keeps_the_local_record() {
        let provider = Arc::new(FakeProvider::new());
        let mirror = InMemoryMirror::new();
        let user_id = Uuid::new_v4();
        seed_file(&provider, &mirror, user_id, "file-1", "a.pdf").await;
        provider.refuse_file_deletion("file-1");

        let result = use_case(&provider, &mirror)
            .execute(DeleteFileRequest {
                file_id: "file-1".to_string(),
                user_id,
            })
            .await;

        assert!(matches!(result, Err(DeleteFileError::RemoteNotDeleted(_))));
        assert!(
            mirror
                .files()
                .find_by_remote_id("file-1")
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_detach_failure_is_aggregated() {
        let provider = Arc::new(FakeProvider::new());
        let mirror = InMemoryMirror::new();
        let user_id = Uuid::new_v4();
        seed_file(&provider, &mirror, user_id, "file-1", "a.pdf").await;
        seed_file(&provider, &mirror, user_id, "file-2", "b.pdf").await;
        let vs = seed_vector_store_with_files(
            &provider,
            &mirror,
            user_id,
            "Shared",
            &["file-1", "file-2"],
        )
        .await;
        provider.fail_detach_for(&vs, "file-1", "detach refused");

        let response = use_case(&provider, &mirror)
            .execute(DeleteFileRequest {
                file_id: "file-1".to_string(),
                user_id,
            })
            .await
            .unwrap();

        // The file itself is gone, but the cascade is not clean.
        assert!(!response.report.is_clean());
        assert!(!provider.file_exists("file-1"));
    }

    #[tokio::test]
    async fn test_foreign_file_is_not_found() {
        let provider = Arc::new(FakeProvider::new());
        let mirror = InMemoryMirror::new();
        let owner = Uuid::new_v4();
        seed_file(&provider, &mirror, owner, "file-1", "a.pdf").await;

        let result = use_case(&provider, &mirror)
            .execute(DeleteFileRequest {
                file_id: "file-1".to_string(),
                user_id: Uuid::new_v4(),
            })
            .await;

        assert!(matches!(result, Err(DeleteFileError::NotFound(_))));
        assert!(provider.file_exists("file-1"));
    }
}
