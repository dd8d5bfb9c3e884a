use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::File;
use crate::domain::repositories::{FileRepository, RepositoryError};
use crate::infrastructure::database::models::{FileModel, NewFileModel};
use crate::infrastructure::database::schema::files::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresFileRepository {
    pool: DbPool,
}

impl PostgresFileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for PostgresFileRepository {
    async fn save(&self, file: &File) -> Result<(), RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let new_file = NewFileModel::from(file);

        diesel::insert_into(files)
            .values(&new_file)
            .execute(&mut conn)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_remote_id(&self, remote: &str) -> Result<Option<File>, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let result = files
            .filter(remote_id.eq(remote))
            .first::<FileModel>(&mut conn)
            .optional()
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(File::from))
    }

    async fn find_by_owner(&self, owner: Uuid) -> Result<Vec<File>, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let models = files
            .filter(user_id.eq(owner))
            .order(created_at.desc())
            .load::<FileModel>(&mut conn)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(File::from).collect())
    }

    async fn delete(&self, local_id: Uuid) -> Result<bool, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let deleted_count = diesel::delete(files.find(local_id))
            .execute(&mut conn)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(deleted_count > 0)
    }
}
