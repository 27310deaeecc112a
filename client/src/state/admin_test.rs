use super::*;

#[test]
fn load_without_browser_storage_is_inactive() {
    assert!(!AdminSession::load().is_active());
}

#[test]
fn store_then_clear() {
    let mut session = AdminSession::default();
    session.store("tok-1".to_owned());
    assert!(session.is_active());
    assert_eq!(session.token.as_deref(), Some("tok-1"));

    session.clear();
    assert!(!session.is_active());
}
