/*!
 * Tests for API key storage
 */

use easyread::credentials::CredentialStore;

use crate::common::create_temp_dir;

/// Test that a fresh store has no key
#[test]
fn test_load_freshStore_shouldReturnNone() {
    let dir = create_temp_dir().unwrap();
    let store = CredentialStore::at(dir.path().join("api_key"));

    assert!(store.load().unwrap().is_none());
}

/// Test saving and reloading a key
#[test]
fn test_saveAndLoad_shouldReturnStoredKey() {
    let dir = create_temp_dir().unwrap();
    let store = CredentialStore::at(dir.path().join("easyread").join("api_key"));

    store.save("sk-test-456").unwrap();

    assert_eq!(store.load().unwrap(), Some("sk-test-456".to_string()));
}

/// Test that surrounding whitespace never survives a round trip
#[test]
fn test_save_withWhitespace_shouldStoreTrimmed() {
    let dir = create_temp_dir().unwrap();
    let store = CredentialStore::at(dir.path().join("api_key"));

    store.save("\n  sk-padded  \n").unwrap();

    assert_eq!(store.load().unwrap(), Some("sk-padded".to_string()));
}

/// Test overwriting a stored key
#[test]
fn test_save_twice_shouldKeepLatestKey() {
    let dir = create_temp_dir().unwrap();
    let store = CredentialStore::at(dir.path().join("api_key"));

    store.save("sk-old").unwrap();
    store.save("sk-new").unwrap();

    assert_eq!(store.load().unwrap(), Some("sk-new".to_string()));
}
