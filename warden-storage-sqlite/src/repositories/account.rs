use crate::{SqliteAccount, map_sqlx_err};
use async_trait::async_trait;
use sqlx::SqlitePool;
use warden_core::{
    Account, AccountId, Error, NewAccount, error::StorageError, repositories::AccountRepository,
};

pub struct SqliteAccountRepository {
    pool: SqlitePool,
}

impl SqliteAccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for SqliteAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, Error> {
        let now = chrono::Utc::now().timestamp();

        let sqlite_account = sqlx::query_as::<_, SqliteAccount>(
            r#"
            INSERT INTO accounts (id, username, email, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, username, email, created_at, updated_at
            "#,
        )
        .bind(account.id.as_str())
        .bind(&account.username)
        .bind(&account.email)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Ok(sqlite_account.into())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, Error> {
        let sqlite_account = sqlx::query_as::<_, SqliteAccount>(
            "SELECT id, username, email, created_at, updated_at FROM accounts WHERE id = ?1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Ok(sqlite_account.map(|a| a.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, Error> {
        let sqlite_account = sqlx::query_as::<_, SqliteAccount>(
            "SELECT id, username, email, created_at, updated_at FROM accounts WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Ok(sqlite_account.map(|a| a.into()))
    }

    async fn update(&self, account: &Account) -> Result<Account, Error> {
        let now = chrono::Utc::now().timestamp();

        let sqlite_account = sqlx::query_as::<_, SqliteAccount>(
            r#"
            UPDATE accounts
            SET username = ?2, email = ?3, updated_at = ?4
            WHERE id = ?1
            RETURNING id, username, email, created_at, updated_at
            "#,
        )
        .bind(account.id.as_str())
        .bind(&account.username)
        .bind(&account.email)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?
        .ok_or(Error::Storage(StorageError::NotFound))?;

        Ok(sqlite_account.into())
    }

    async fn delete(&self, id: &AccountId) -> Result<(), Error> {
        // The account row and every owned file-reference row go in one
        // transaction, so a failure leaves the record set intact.
        let mut tx = self.pool.begin().await.map_err(map_sqlx_err)?;

        sqlx::query("DELETE FROM files WHERE account_id = ?1")
            .bind(id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_err)?;

        sqlx::query("DELETE FROM accounts WHERE id = ?1")
            .bind(id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_err)?;

        tx.commit().await.map_err(map_sqlx_err)?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Account>, Error> {
        let sqlite_accounts = sqlx::query_as::<_, SqliteAccount>(
            "SELECT id, username, email, created_at, updated_at FROM accounts ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Ok(sqlite_accounts.into_iter().map(|a| a.into()).collect())
    }
}
