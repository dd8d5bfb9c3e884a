use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Local mirror of a document uploaded to the remote provider.
///
/// The `remote_id` is the provider's file identifier and is unique across
/// the mirror. The local record carries only naming and ownership; the
/// document bytes live remotely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    id: Uuid,
    remote_id: String,
    file_name: String,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl File {
    pub fn new(remote_id: String, file_name: String, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            remote_id,
            file_name,
            user_id,
            created_at: Utc::now(),
        }
    }

    /// Rebuild a file record from persisted state.
    pub fn from_parts(
        id: Uuid,
        remote_id: String,
        file_name: String,
        user_id: Uuid,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            remote_id,
            file_name,
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

    pub fn file_name(&self) -> &str {
        &self.file_name
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ownership() {
        let owner = Uuid::new_v4();
        let file = File::new("file-abc".to_string(), "notes.pdf".to_string(), owner);

        assert!(file.is_owned_by(owner));
        assert!(!file.is_owned_by(Uuid::new_v4()));
        assert_eq!(file.remote_id(), "file-abc");
    }
}
