use super::*;

#[test]
fn required_trims_and_rejects_blank() {
    let values = values_from([("name", "  Ada  "), ("blank", "   ")]);
    assert_eq!(required(&values, "name"), Ok("Ada".to_owned()));
    assert_eq!(required(&values, "blank"), Err(FormError::new("blank", "is required")));
    assert_eq!(required(&values, "absent"), Err(FormError::new("absent", "is required")));
}

#[test]
fn optional_maps_blank_to_none() {
    let values = values_from([("bio", " "), ("phone", " 555 ")]);
    assert_eq!(optional(&values, "bio"), None);
    assert_eq!(optional(&values, "phone"), Some("555".to_owned()));
}

#[test]
fn email_accepts_plain_addresses() {
    assert!(is_valid_email("ada@example.com"));
    assert!(is_valid_email("a.b+c@mail.example.org"));
}

#[test]
fn email_rejects_malformed_addresses() {
    for bad in ["ada", "@example.com", "ada@example", "ada@.com", "ada@example.", "a@b@c.com", "a da@x.com"] {
        assert!(!is_valid_email(bad), "expected {bad:?} to be rejected");
    }
}

#[test]
fn email_field_reports_field_name() {
    let values = values_from([("email", "nope")]);
    let err = email(&values, "email").unwrap_err();
    assert_eq!(err.field, "email");
    assert_eq!(err.to_string(), "email: must be a valid email address");
}

#[test]
fn count_parses_whole_numbers() {
    let values = values_from([("capacity", "25"), ("neg", "-1"), ("frac", "2.5")]);
    assert_eq!(count(&values, "capacity"), Ok(25));
    assert!(count(&values, "neg").is_err());
    assert!(count(&values, "frac").is_err());
}

#[test]
fn ids_must_be_positive() {
    let values = values_from([("cohort_id", "0"), ("mentor_id", ""), ("other", "12")]);
    assert!(id(&values, "cohort_id").is_err());
    assert_eq!(optional_id(&values, "mentor_id"), Ok(None));
    assert_eq!(optional_id(&values, "other"), Ok(Some(12)));
}

#[test]
fn dates_parse_and_format_canonically() {
    let values = values_from([("start", "2026-02-01"), ("bad", "2026-02-30")]);
    let parsed = date(&values, "start").unwrap();
    assert_eq!(format_date(parsed), "2026-02-01");
    assert_eq!(
        date(&values, "bad"),
        Err(FormError::new("bad", "must be a date (YYYY-MM-DD)"))
    );
}

#[test]
fn password_enforces_minimum_length() {
    let values = values_from([("short", "abc12"), ("ok", "abc123")]);
    assert!(password(&values, "short").is_err());
    assert_eq!(password(&values, "ok"), Ok("abc123".to_owned()));
}

#[test]
fn field_kind_maps_to_input_type() {
    assert_eq!(FieldKind::Email.input_type(), "email");
    assert_eq!(FieldKind::Date.input_type(), "date");
    assert_eq!(FieldKind::TextArea.input_type(), "text");
}

#[test]
fn formatted_dates_keep_zero_padding() {
    let parsed = parse_date("0999-01-05").unwrap();
    assert_eq!(format_date(parsed), "0999-01-05");
}
