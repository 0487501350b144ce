use super::*;

#[test]
fn memory_store_round_trips_values() {
    let store = MemoryStore::new();
    assert_eq!(store.get("k"), Ok(None));
    store.set("k", "v").unwrap();
    assert_eq!(store.get("k"), Ok(Some("v".to_owned())));
}

#[test]
fn memory_store_last_writer_wins() {
    let store = MemoryStore::new();
    let other_tab = store.clone();
    store.set("k", "first").unwrap();
    other_tab.set("k", "second").unwrap();
    assert_eq!(store.get("k"), Ok(Some("second".to_owned())));
}

#[test]
fn memory_store_remove_is_idempotent() {
    let store = MemoryStore::new();
    store.set("k", "v").unwrap();
    store.remove("k").unwrap();
    store.remove("k").unwrap();
    assert_eq!(store.get("k"), Ok(None));
}

#[test]
fn noop_store_discards_writes() {
    let store = NoopStore;
    store.set("k", "v").unwrap();
    assert_eq!(store.get("k"), Ok(None));
    assert_eq!(store.remove("k"), Ok(()));
}
