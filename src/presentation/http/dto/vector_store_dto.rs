use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::create_vector_store::CreateVectorStoreResponse;
use crate::domain::entities::VectorStore;

#[derive(Debug, Deserialize)]
pub struct CreateVectorStoreRequestDto {
    pub name: String,
    pub file_ids: Vec<String>,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct VectorStoreResponseDto {
    pub vector_store_id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<VectorStore> for VectorStoreResponseDto {
    fn from(store: VectorStore) -> Self {
        Self {
            vector_store_id: store.remote_id().to_string(),
            name: store.name().to_string(),
            created_at: store.created_at().to_rfc3339(),
            updated_at: store.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateVectorStoreResponseDto {
    pub vector_store_id: String,
    pub reused: bool,
}

impl From<CreateVectorStoreResponse> for CreateVectorStoreResponseDto {
    fn from(response: CreateVectorStoreResponse) -> Self {
        Self {
            vector_store_id: response.vector_store_id,
            reused: response.reused,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VectorStoreListResponseDto {
    pub vector_stores: Vec<VectorStoreResponseDto>,
}
