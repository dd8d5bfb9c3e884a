use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::MessageRole;

/// One turn within a thread, role-tagged and ordered by creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: Uuid,
    thread_id: Uuid,
    role: MessageRole,
    content: String,
    created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(thread_id: Uuid, role: MessageRole, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            thread_id,
            role,
            content,
            created_at: Utc::now(),
        }
    }

    /// Rebuild a message from persisted state.
    pub fn from_parts(
        id: Uuid,
        thread_id: Uuid,
        role: MessageRole,
        content: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            thread_id,
            role,
            content,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn thread_id(&self) -> Uuid {
        self.thread_id
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
