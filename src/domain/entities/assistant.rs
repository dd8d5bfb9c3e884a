use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Local mirror of a remote conversational agent bound to exactly one
/// vector store. At most one assistant serves a (user, vector store) pair;
/// lookup-before-create enforces that as a soft policy, not a constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assistant {
    id: Uuid,
    remote_id: String,
    name: Option<String>,
    vector_store_id: Uuid,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl Assistant {
    pub fn new(
        remote_id: String,
        name: Option<String>,
        vector_store_id: Uuid,
        user_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            remote_id,
            name,
            vector_store_id,
            user_id,
            created_at: Utc::now(),
        }
    }

    /// Rebuild an assistant record from persisted state.
    pub fn from_parts(
        id: Uuid,
        remote_id: String,
        name: Option<String>,
        vector_store_id: Uuid,
        user_id: Uuid,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            remote_id,
            name,
            vector_store_id,
            user_id,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn remote_id(&self) -> &str {
        &self.remote_id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn vector_store_id(&self) -> Uuid {
        self.vector_store_id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
