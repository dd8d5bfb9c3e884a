use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One conversation session.
///
/// The assistant reference is an opaque remote identifier, kept as a plain
/// string: a thread tolerates assistant ids that no longer resolve to a
/// local record. The vector store reference is optional and local.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    id: Uuid,
    remote_id: String,
    vector_store_id: Option<Uuid>,
    assistant_remote_id: String,
    title: String,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Thread {
    pub fn new(
        remote_id: String,
        vector_store_id: Option<Uuid>,
        assistant_remote_id: String,
        title: String,
        user_id: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            remote_id,
            vector_store_id,
            assistant_remote_id,
            title,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a thread record from persisted state.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: Uuid,
        remote_id: String,
        vector_store_id: Option<Uuid>,
        assistant_remote_id: String,
        title: String,
        user_id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            remote_id,
            vector_store_id,
            assistant_remote_id,
            title,
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

    pub fn vector_store_id(&self) -> Option<Uuid> {
        self.vector_store_id
    }

    pub fn assistant_remote_id(&self) -> &str {
        &self.assistant_remote_id
    }

    pub fn title(&self) -> &str {
        &self.title
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

    pub fn references_vector_store(&self, vector_store_id: Uuid) -> bool {
        self.vector_store_id == Some(vector_store_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_vector_store_reference() {
        let user = Uuid::new_v4();
        let store = Uuid::new_v4();

        let with_store = Thread::new(
            "thread-1".to_string(),
            Some(store),
            "asst-1".to_string(),
            "Algorithms revision".to_string(),
            user,
        );
        let without_store = Thread::new(
            "thread-2".to_string(),
            None,
            "asst-1".to_string(),
            "Free chat".to_string(),
            user,
        );

        assert!(with_store.references_vector_store(store));
        assert!(!without_store.references_vector_store(store));
    }
}
