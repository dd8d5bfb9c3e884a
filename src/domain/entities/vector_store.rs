use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Local mirror of a remote retrieval collection.
///
/// The remote provider is the source of truth for which files belong to the
/// store; the local record only names and owns it. Membership questions are
/// always answered by listing the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorStore {
    id: Uuid,
    remote_id: String,
    name: String,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl VectorStore {
    pub fn new(remote_id: String, name: String, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            remote_id,
            name,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a vector store record from persisted state.
    pub fn from_parts(
        id: Uuid,
        remote_id: String,
        name: String,
        user_id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            remote_id,
            name,
            user_id,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn remote_id(&self) -> &str {
        &self.remote_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
