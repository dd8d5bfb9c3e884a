use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user. Created on first login; every mirrored resource is
/// owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: Uuid,
    username: String,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, name: String, email: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            name,
            email,
            created_at: Utc::now(),
        }
    }

    /// Rebuild a user from persisted state.
    pub fn from_parts(
        id: Uuid,
        username: String,
        name: String,
        email: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            name,
            email,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
