use super::*;

fn sample_user() -> UserProfile {
    UserProfile {
        id: 7,
        name: "Jane".to_owned(),
        email: Some("jane@company.com".to_owned()),
        phone: None,
        position: Some("Engineer".to_owned()),
        department: None,
        avatar_url: None,
    }
}

// =============================================================
// MemoryBackend
// =============================================================

#[test]
fn memory_backend_round_trips_values() {
    let backend = MemoryBackend::default();
    assert_eq!(backend.read("k"), None);
    backend.write("k", "v");
    assert_eq!(backend.read("k"), Some("v".to_owned()));
    backend.remove("k");
    assert_eq!(backend.read("k"), None);
}

// =============================================================
// TokenStore
// =============================================================

#[test]
fn token_round_trips() {
    let store = TokenStore::in_memory();
    assert_eq!(store.token(), None);
    store.set_token("abc123");
    assert_eq!(store.token(), Some("abc123".to_owned()));
}

#[test]
fn user_round_trips() {
    let store = TokenStore::in_memory();
    assert_eq!(store.user(), None);
    store.set_user(&sample_user());
    assert_eq!(store.user(), Some(sample_user()));
}

#[test]
fn corrupted_user_reads_as_absent() {
    let backend = std::sync::Arc::new(MemoryBackend::default());
    let store = TokenStore::new(backend.clone());
    backend.write(USER_KEY, "{not valid json");
    assert_eq!(store.user(), None);
}

#[test]
fn clear_removes_token_and_user() {
    let store = TokenStore::in_memory();
    store.set_token("abc123");
    store.set_user(&sample_user());
    store.clear();
    assert_eq!(store.token(), None);
    assert_eq!(store.user(), None);
}

#[test]
fn clear_when_empty_is_harmless() {
    let store = TokenStore::in_memory();
    store.clear();
    assert_eq!(store.token(), None);
}
