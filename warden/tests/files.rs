use std::sync::Arc;

use warden::{Error, Warden, WardenConfig};
use warden_core::error::{AuthError, FileError};

#[cfg(feature = "sqlite")]
use warden::SqliteRepositoryProvider;

const TEST_HS256_SECRET: &[u8] = b"this_is_a_test_secret_key_for_hs256_session_tokens_not_for_prod";

#[cfg(feature = "sqlite")]
async fn setup() -> Warden<SqliteRepositoryProvider> {
    let _ = tracing_subscriber::fmt().try_init();

    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create pool");

    let warden = Warden::new(
        Arc::new(SqliteRepositoryProvider::new(pool)),
        WardenConfig::new(TEST_HS256_SECRET.to_vec()),
    )
    .expect("Failed to create warden");
    warden.migrate().await.expect("Failed to run migrations");
    warden
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_attach_and_list_files() {
    let warden = setup().await;

    let (account, _) = warden
        .signup("alice", "alice@example.com", "password123")
        .await
        .unwrap();

    warden.attach_file(&account.id, "/tmp/a.txt").await.unwrap();
    warden.attach_file(&account.id, "/tmp/b.txt").await.unwrap();

    let files = warden.list_files(&account.id).await.unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].path, "/tmp/a.txt");
    assert_eq!(files[1].path, "/tmp/b.txt");
    assert!(files.iter().all(|f| f.account_id == account.id));
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_delete_file_unlinks_from_disk() {
    let warden = setup().await;

    let (account, _) = warden
        .signup("alice", "alice@example.com", "password123")
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.txt");
    std::fs::write(&path, b"data").unwrap();

    let file = warden
        .attach_file(&account.id, &path.to_string_lossy())
        .await
        .unwrap();

    warden.delete_file(&file.id).await.unwrap();

    assert!(!path.exists());
    assert!(warden.list_files(&account.id).await.unwrap().is_empty());
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_delete_account_removes_owned_files() {
    let warden = setup().await;

    let (account, _) = warden
        .signup("alice", "alice@example.com", "password123")
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let mut paths = Vec::new();
    for name in ["a.txt", "b.txt"] {
        let path = dir.path().join(name);
        std::fs::write(&path, b"data").unwrap();
        warden
            .attach_file(&account.id, &path.to_string_lossy())
            .await
            .unwrap();
        paths.push(path);
    }

    let deleted = warden.delete_account(&account.id).await.unwrap();
    assert_eq!(deleted.id, account.id);

    // Files are gone from disk, the records are gone from the store.
    for path in &paths {
        assert!(!path.exists());
    }
    assert!(warden.get_account(&account.id).await.unwrap().is_none());
    assert!(warden.list_files(&account.id).await.unwrap().is_empty());

    // And the account can no longer log in.
    let result = warden.login("alice@example.com", "password123").await;
    assert!(matches!(result, Err(Error::Auth(AuthError::NotFound))));
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_delete_account_aborts_when_a_file_removal_fails() {
    let warden = setup().await;

    let (account, _) = warden
        .signup("alice", "alice@example.com", "password123")
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();

    // The first attached file is missing from disk, so its removal fails
    // before the second one is touched.
    let missing = dir.path().join("missing.txt");
    warden
        .attach_file(&account.id, &missing.to_string_lossy())
        .await
        .unwrap();

    let kept = dir.path().join("kept.txt");
    std::fs::write(&kept, b"data").unwrap();
    warden
        .attach_file(&account.id, &kept.to_string_lossy())
        .await
        .unwrap();

    let result = warden.delete_account(&account.id).await;
    assert!(matches!(
        result,
        Err(Error::File(FileError::PartialFailure(_)))
    ));

    // Nothing was deleted: the account, both references, and the surviving
    // file are all still there.
    assert!(warden.get_account(&account.id).await.unwrap().is_some());
    assert_eq!(warden.list_files(&account.id).await.unwrap().len(), 2);
    assert!(kept.exists());

    // The account still works.
    assert!(warden.login("alice@example.com", "password123").await.is_ok());
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_delete_missing_account() {
    let warden = setup().await;

    let result = warden
        .delete_account(&warden_core::AccountId::new_random())
        .await;
    assert!(matches!(result, Err(Error::Auth(AuthError::NotFound))));
}
