use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::Assistant as DomainAssistant;
use crate::infrastructure::database::schema::assistants;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = assistants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AssistantModel {
    pub id: Uuid,
    pub remote_id: String,
    pub name: Option<String>,
    pub vector_store_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = assistants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAssistantModel {
    pub id: Uuid,
    pub remote_id: String,
    pub name: Option<String>,
    pub vector_store_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<&DomainAssistant> for NewAssistantModel {
    fn from(assistant: &DomainAssistant) -> Self {
        Self {
            id: assistant.id(),
            remote_id: assistant.remote_id().to_string(),
            name: assistant.name().map(str::to_string),
            vector_store_id: assistant.vector_store_id(),
            user_id: assistant.user_id(),
            created_at: assistant.created_at(),
        }
    }
}

impl From<AssistantModel> for DomainAssistant {
    fn from(model: AssistantModel) -> Self {
        DomainAssistant::from_parts(
            model.id,
            model.remote_id,
            model.name,
            model.vector_store_id,
            model.user_id,
            model.created_at,
        )
    }
}
