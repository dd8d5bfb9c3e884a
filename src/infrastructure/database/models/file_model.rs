use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::File as DomainFile;
use crate::infrastructure::database::schema::files;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = files)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FileModel {
    pub id: Uuid,
    pub remote_id: String,
    pub file_name: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = files)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewFileModel {
    pub id: Uuid,
    pub remote_id: String,
    pub file_name: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<&DomainFile> for NewFileModel {
    fn from(file: &DomainFile) -> Self {
        Self {
            id: file.id(),
            remote_id: file.remote_id().to_string(),
            file_name: file.file_name().to_string(),
            user_id: file.user_id(),
            created_at: file.created_at(),
        }
    }
}

impl From<FileModel> for DomainFile {
    fn from(model: FileModel) -> Self {
        DomainFile::from_parts(
            model.id,
            model.remote_id,
            model.file_name,
            model.user_id,
            model.created_at,
        )
    }
}
