use super::*;

fn filled() -> FormValues {
    forms::values_from([
        ("display_name", "Grace Hopper"),
        ("email", "grace@example.com"),
        ("password", "cobol1959"),
        ("confirm", "cobol1959"),
        ("phone", " "),
        ("bio", "Compilers and naval computing"),
    ])
}

#[test]
fn student_registration_builds_completed_profile() {
    let registration = registration_from_form(&filled(), Role::Student).unwrap();
    assert_eq!(registration.account.email, "grace@example.com");
    assert_eq!(registration.profile.role, Role::Student);
    assert!(registration.profile.completed);
    assert_eq!(registration.profile.display_name, "Grace Hopper");
    assert_eq!(registration.profile.phone, None);
}

#[test]
fn student_bio_is_optional() {
    let mut values = filled();
    values.remove("bio");
    assert_eq!(registration_from_form(&values, Role::Student).unwrap().profile.bio, None);
}

#[test]
fn mentor_requires_bio() {
    let mut values = filled();
    values.insert("bio".to_owned(), "   ".to_owned());
    assert_eq!(registration_from_form(&values, Role::Mentor).unwrap_err().field, "bio");
}

#[test]
fn account_errors_come_before_profile_errors() {
    let mut values = filled();
    values.insert("email".to_owned(), "nope".to_owned());
    values.remove("bio");
    assert_eq!(registration_from_form(&values, Role::Mentor).unwrap_err().field, "email");
}

#[test]
fn headings_differ_per_role() {
    assert_ne!(heading(Role::Student), heading(Role::Mentor));
}
