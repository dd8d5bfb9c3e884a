use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::domain::repositories::{RepositoryError, UserRepository};
use crate::infrastructure::database::models::{NewUserModel, UserModel};
use crate::infrastructure::database::schema::users::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresUserRepository {
    pool: DbPool,
}

impl PostgresUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> Result<(), RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let new_user = NewUserModel::from(user);

        diesel::insert_into(users)
            .values(&new_user)
            .execute(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    info,
                ) => RepositoryError::Conflict(info.message().to_string()),
                other => RepositoryError::DatabaseError(other.to_string()),
            })?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let result = users
            .find(user_id)
            .first::<UserModel>(&mut conn)
            .optional()
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, login: &str) -> Result<Option<User>, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let result = users
            .filter(username.eq(login))
            .first::<UserModel>(&mut conn)
            .optional()
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(User::from))
    }
}
