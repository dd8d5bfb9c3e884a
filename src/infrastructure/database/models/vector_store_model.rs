use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::VectorStore as DomainVectorStore;
use crate::infrastructure::database::schema::vector_stores;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = vector_stores)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VectorStoreModel {
    pub id: Uuid,
    pub remote_id: String,
    pub name: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = vector_stores)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewVectorStoreModel {
    pub id: Uuid,
    pub remote_id: String,
    pub name: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&DomainVectorStore> for NewVectorStoreModel {
    fn from(store: &DomainVectorStore) -> Self {
        Self {
            id: store.id(),
            remote_id: store.remote_id().to_string(),
            name: store.name().to_string(),
            user_id: store.user_id(),
            created_at: store.created_at(),
            updated_at: store.updated_at(),
        }
    }
}

impl From<VectorStoreModel> for DomainVectorStore {
    fn from(model: VectorStoreModel) -> Self {
        DomainVectorStore::from_parts(
            model.id,
            model.remote_id,
            model.name,
            model.user_id,
            model.created_at,
            model.updated_at,
        )
    }
}
