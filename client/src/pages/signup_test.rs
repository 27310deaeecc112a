use super::*;

fn filled() -> FormValues {
    forms::values_from([
        ("display_name", " Ada Lovelace "),
        ("email", "ada@example.com"),
        ("password", "engine42"),
        ("confirm", "engine42"),
    ])
}

#[test]
fn account_from_form_accepts_valid_input() {
    assert_eq!(
        account_from_form(&filled()),
        Ok(AccountInput {
            display_name: "Ada Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            password: "engine42".to_owned(),
        })
    );
}

#[test]
fn account_from_form_requires_name_first() {
    let mut values = filled();
    values.insert("display_name".to_owned(), "  ".to_owned());
    values.insert("email".to_owned(), "bad".to_owned());
    assert_eq!(account_from_form(&values).unwrap_err().field, "display_name");
}

#[test]
fn account_from_form_rejects_short_password() {
    let mut values = filled();
    values.insert("password".to_owned(), "abc".to_owned());
    values.insert("confirm".to_owned(), "abc".to_owned());
    assert_eq!(account_from_form(&values).unwrap_err().field, "password");
}

#[test]
fn account_from_form_rejects_mismatched_confirmation() {
    let mut values = filled();
    values.insert("confirm".to_owned(), "engine43".to_owned());
    let err = account_from_form(&values).unwrap_err();
    assert_eq!(err.field, "confirm");
    assert_eq!(err.to_string(), "confirm: does not match the password");
}
