use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::Thread as DomainThread;
use crate::infrastructure::database::schema::threads;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = threads)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ThreadModel {
    pub id: Uuid,
    pub remote_id: String,
    pub vector_store_id: Option<Uuid>,
    pub assistant_remote_id: String,
    pub title: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = threads)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewThreadModel {
    pub id: Uuid,
    pub remote_id: String,
    pub vector_store_id: Option<Uuid>,
    pub assistant_remote_id: String,
    pub title: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&DomainThread> for NewThreadModel {
    fn from(thread: &DomainThread) -> Self {
        Self {
            id: thread.id(),
            remote_id: thread.remote_id().to_string(),
            vector_store_id: thread.vector_store_id(),
            assistant_remote_id: thread.assistant_remote_id().to_string(),
            title: thread.title().to_string(),
            user_id: thread.user_id(),
            created_at: thread.created_at(),
            updated_at: thread.updated_at(),
        }
    }
}

impl From<ThreadModel> for DomainThread {
    fn from(model: ThreadModel) -> Self {
        DomainThread::from_parts(
            model.id,
            model.remote_id,
            model.vector_store_id,
            model.assistant_remote_id,
            model.title,
            model.user_id,
            model.created_at,
            model.updated_at,
        )
    }
}
