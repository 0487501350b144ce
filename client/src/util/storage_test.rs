use super::*;

#[cfg(not(feature = "hydrate"))]
#[test]
fn server_side_store_reads_empty() {
    let store = BrowserStore;
    store.set("mockUserEmail", "hr@hrportal.com").expect("set");
    assert_eq!(store.get("mockUserEmail").expect("get"), None);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn server_side_remove_is_harmless() {
    assert!(BrowserStore.remove("mockUserEmail").is_ok());
    assert!(BrowserStore.remove("mockUserEmail").is_ok());
}
