//! Unit tests for the file-backed token store.

use crate::{
    credentials::{ACCESS_TOKEN_KEY, CredentialPair, REFRESH_TOKEN_KEY},
    store::{FileTokenStore, StorageError, TokenStore, file_token_store::PendingWrite},
};

use std::path::PathBuf;

use googletest::assert_that;
use googletest::prelude::{anything, ok};
use tempfile::TempDir;

fn store_in(temp: &TempDir) -> FileTokenStore {
    FileTokenStore::new(temp.path().join("tokens.json"))
}

// =============================================================================
// Happy Path
// =============================================================================

#[test]
fn given_no_file_when_get_then_none() {
    // Given
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);

    // When
    let result = store.get(ACCESS_TOKEN_KEY);

    // Then
    assert_eq!(result.unwrap(), None);
}

#[test]
fn given_pair_saved_when_new_store_reads_then_tokens_survive() {
    // Given
    let temp = TempDir::new().unwrap();
    store_in(&temp)
        .set_pair(&CredentialPair::new("A", "R"))
        .unwrap();

    // When
    let reopened = store_in(&temp);

    // Then
    assert_eq!(reopened.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("A"));
    assert_eq!(reopened.get(REFRESH_TOKEN_KEY).unwrap().as_deref(), Some("R"));
}

#[test]
fn given_missing_parent_dir_when_set_then_dir_created() {
    // Given
    let temp = TempDir::new().unwrap();
    let store = FileTokenStore::new(temp.path().join("a/b/tokens.json"));

    // When
    let result = store.set(ACCESS_TOKEN_KEY, "A");

    // Then
    assert_that!(result, ok(anything()));
    assert!(temp.path().join("a/b/tokens.json").exists());
}

#[test]
fn given_tokens_when_clear_then_file_removed() {
    // Given
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    store.set_pair(&CredentialPair::new("A", "R")).unwrap();

    // When
    store.clear().unwrap();

    // Then
    assert!(!store.path().exists());
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
}

#[test]
fn given_no_file_when_clear_then_ok() {
    // Given
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);

    // When / Then
    assert_that!(store.clear(), ok(anything()));
    assert_that!(store.clear(), ok(anything()));
}

#[test]
fn given_one_key_removed_when_get_other_then_still_present() {
    // Given
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    store.set_pair(&CredentialPair::new("A", "R")).unwrap();

    // When
    store.remove(ACCESS_TOKEN_KEY).unwrap();

    // Then
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
    assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap().as_deref(), Some("R"));
}

#[test]
fn given_saved_tokens_then_no_temp_file_left_behind() {
    // Given
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);

    // When
    store.set_pair(&CredentialPair::new("A", "R")).unwrap();

    // Then
    let leftovers: Vec<_> = std::fs::read_dir(temp.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp."))
        .collect();
    assert!(leftovers.is_empty());
}

#[cfg(unix)]
#[test]
fn given_saved_tokens_then_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    // Given
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);

    // When
    store.set_pair(&CredentialPair::new("A", "R")).unwrap();

    // Then
    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

// =============================================================================
// Corruption
// =============================================================================

#[test]
fn given_corrupted_file_when_get_then_none_and_backup_created() {
    // Given
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    std::fs::write(store.path(), "not json {{{").unwrap();

    // When
    let result = store.get(ACCESS_TOKEN_KEY);

    // Then
    assert_eq!(result.unwrap(), None);
    assert!(!store.path().exists());
    let backups: Vec<_> = std::fs::read_dir(temp.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .starts_with("tokens.json.corrupted.")
        })
        .collect();
    assert_eq!(backups.len(), 1);
}

#[test]
fn given_corrupted_file_when_set_then_recovers_with_new_contents() {
    // Given
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    std::fs::write(store.path(), "[1,2,3]").unwrap();

    // When
    store.set(ACCESS_TOKEN_KEY, "fresh").unwrap();

    // Then
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("fresh"));
}

// =============================================================================
// Temp file cleanup
// =============================================================================

#[test]
fn given_abandoned_write_when_dropped_then_temp_file_removed() {
    // Given
    let temp = TempDir::new().unwrap();
    let temp_path = temp.path().join("tokens.json.tmp.1");
    let pending = PendingWrite::new(temp_path.clone());
    std::fs::write(pending.path(), b"{\"access_token\":\"half").unwrap();

    // When
    drop(pending);

    // Then
    assert!(!temp_path.exists());
}

#[test]
fn given_failed_replace_when_committing_then_temp_file_removed() {
    // Given
    let temp = TempDir::new().unwrap();
    let temp_path = temp.path().join("tokens.json.tmp.1");
    let pending = PendingWrite::new(temp_path.clone());
    std::fs::write(pending.path(), b"{}").unwrap();
    let missing_dir_target = temp.path().join("missing").join("tokens.json");

    // When
    let result = pending.commit(&missing_dir_target);

    // Then
    assert!(matches!(result, Err(StorageError::Replace { .. })));
    assert!(!temp_path.exists());
}

#[test]
fn given_successful_write_then_no_temp_file_left() {
    // Given
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);

    // When
    store.set_pair(&CredentialPair::new("A", "R")).unwrap();

    // Then
    let leftovers: Vec<_> = std::fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp."))
        .collect();
    assert!(leftovers.is_empty());
}

// =============================================================================
// StorageError
// =============================================================================

#[test]
fn given_file_error_when_displayed_then_names_failed_step() {
    let err = StorageError::file_remove(PathBuf::from("/test/tokens.json"), std::io::Error::other("busy"));
    let msg = err.to_string();

    assert!(msg.starts_with("cannot remove /test/tokens.json: busy"), "{msg}");
}

#[test]
fn given_any_error_when_recovery_hint_then_non_empty() {
    let errors = vec![
        StorageError::dir_creation(PathBuf::from("/test"), std::io::Error::other("x")),
        StorageError::file_read(PathBuf::from("/test"), std::io::Error::other("x")),
        StorageError::file_write(PathBuf::from("/test"), std::io::Error::other("x")),
        StorageError::file_remove(PathBuf::from("/test"), std::io::Error::other("x")),
        StorageError::replace_failed(
            PathBuf::from("/a"),
            PathBuf::from("/b"),
            std::io::Error::other("x"),
        ),
        StorageError::backup_failed(PathBuf::from("/test"), std::io::Error::other("x")),
        StorageError::poisoned(),
    ];

    for err in errors {
        assert!(!err.recovery_hint().is_empty(), "empty hint for {err:?}");
    }
}
