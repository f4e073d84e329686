use crate::{SqliteFileRef, map_sqlx_err};
use async_trait::async_trait;
use sqlx::SqlitePool;
use warden_core::{
    AccountId, Error, FileId, FileRef, NewFileRef, repositories::FileRepository,
};

pub struct SqliteFileRepository {
    pool: SqlitePool,
}

impl SqliteFileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for SqliteFileRepository {
    async fn create(&self, file: NewFileRef) -> Result<FileRef, Error> {
        let now = chrono::Utc::now().timestamp();

        let sqlite_file = sqlx::query_as::<_, SqliteFileRef>(
            r#"
            INSERT INTO files (id, account_id, path, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, account_id, path, created_at
            "#,
        )
        .bind(file.id.as_str())
        .bind(file.account_id.as_str())
        .bind(&file.path)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Ok(sqlite_file.into())
    }

    async fn find_by_id(&self, id: &FileId) -> Result<Option<FileRef>, Error> {
        let sqlite_file = sqlx::query_as::<_, SqliteFileRef>(
            "SELECT id, account_id, path, created_at FROM files WHERE id = ?1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Ok(sqlite_file.map(|f| f.into()))
    }

    async fn find_by_owner(&self, owner: &AccountId) -> Result<Vec<FileRef>, Error> {
        // rowid order is insertion order, which the cascading delete relies
        // on for deterministic processing.
        let sqlite_files = sqlx::query_as::<_, SqliteFileRef>(
            "SELECT id, account_id, path, created_at FROM files WHERE account_id = ?1 ORDER BY rowid",
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Ok(sqlite_files.into_iter().map(|f| f.into()).collect())
    }

    async fn delete(&self, id: &FileId) -> Result<(), Error> {
        sqlx::query("DELETE FROM files WHERE id = ?1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        Ok(())
    }
}
