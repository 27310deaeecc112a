use super::*;

#[test]
fn parse_record_id_accepts_positive_integers() {
    assert_eq!(parse_record_id(Some("42")), Some(42));
    assert_eq!(parse_record_id(Some(" 7 ")), Some(7));
}

#[test]
fn parse_record_id_rejects_missing_zero_and_garbage() {
    assert_eq!(parse_record_id(None), None);
    assert_eq!(parse_record_id(Some("0")), None);
    assert_eq!(parse_record_id(Some("-3")), None);
    assert_eq!(parse_record_id(Some("abc")), None);
}
