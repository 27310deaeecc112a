use super::*;

#[test]
fn provider_error_reports_decoded_reason() {
    assert_eq!(provider_error(Some("access denied")), Some("access denied".to_owned()));
}

#[test]
fn provider_error_ignores_success_callbacks() {
    assert_eq!(provider_error(None), None);
}

#[test]
fn provider_error_ignores_blank_reason() {
    assert_eq!(provider_error(Some("")), None);
    assert_eq!(provider_error(Some("  ")), None);
}
