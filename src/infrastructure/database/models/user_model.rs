use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::User as DomainUser;
use crate::infrastructure::database::schema::users;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserModel {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUserModel {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&DomainUser> for NewUserModel {
    fn from(user: &DomainUser) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            created_at: user.created_at(),
        }
    }
}

impl From<UserModel> for DomainUser {
    fn from(model: UserModel) -> Self {
        DomainUser::from_parts(
            model.id,
            model.username,
            model.name,
            model.email,
            model.created_at,
        )
    }
}
