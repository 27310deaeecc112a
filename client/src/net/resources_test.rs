use super::*;
use crate::util::forms::values_from;

#[test]
fn routes_follow_collection_names() {
    assert_eq!(list_route::<Student>(), "/admin/students");
    assert_eq!(new_route::<Cohort>(), "/admin/cohorts/new");
    assert_eq!(edit_route::<Assignment>(9), "/admin/assignments/9/edit");
}

#[test]
fn columns_match_row_width() {
    let student = Student { id: 1, fields: StudentDraft::default() };
    let mentor = Mentor { id: 1, fields: MentorDraft::default() };
    let cohort = Cohort { id: 1, fields: CohortDraft::default() };
    let assignment = Assignment { id: 1, fields: AssignmentDraft::default() };
    assert_eq!(student.row().len(), Student::COLUMNS.len());
    assert_eq!(mentor.row().len(), Mentor::COLUMNS.len());
    assert_eq!(cohort.row().len(), Cohort::COLUMNS.len());
    assert_eq!(assignment.row().len(), Assignment::COLUMNS.len());
}

#[test]
fn every_field_spec_has_a_form_value() {
    fn check<R: Resource>() {
        let form = R::draft_to_form(&R::Draft::default());
        for field in R::FIELDS {
            assert!(form.contains_key(field.key), "{} missing {}", R::SINGULAR, field.key);
        }
    }
    check::<Student>();
    check::<Mentor>();
    check::<Cohort>();
    check::<Assignment>();
}

#[test]
fn student_form_parses_optional_links() {
    let values = values_from([
        ("first_name", " Grace "),
        ("last_name", "Hopper"),
        ("email", "grace@example.com"),
        ("cohort_id", "3"),
        ("mentor_id", ""),
    ]);
    let draft = Student::draft_from_form(&values).unwrap();
    assert_eq!(draft.first_name, "Grace");
    assert_eq!(draft.cohort_id, Some(3));
    assert_eq!(draft.mentor_id, None);
}

#[test]
fn student_form_rejects_bad_email() {
    let values = values_from([("first_name", "G"), ("last_name", "H"), ("email", "grace")]);
    assert_eq!(Student::draft_from_form(&values).unwrap_err().field, "email");
}

#[test]
fn mentor_form_requires_capacity_for_mentees() {
    let values = values_from([
        ("first_name", "Alan"),
        ("last_name", "Turing"),
        ("email", "alan@example.com"),
        ("max_mentees", "0"),
    ]);
    assert_eq!(Mentor::draft_from_form(&values).unwrap_err().field, "max_mentees");
}

#[test]
fn cohort_form_rejects_end_before_start() {
    let values = values_from([
        ("name", "Spring"),
        ("start_date", "2026-03-01"),
        ("end_date", "2026-02-01"),
        ("capacity", "20"),
    ]);
    let err = Cohort::draft_from_form(&values).unwrap_err();
    assert_eq!(err.field, "end_date");
}

#[test]
fn cohort_form_accepts_single_day_cohort() {
    let values = values_from([
        ("name", "Bootcamp"),
        ("start_date", "2026-03-01"),
        ("end_date", "2026-03-01"),
        ("capacity", "10"),
    ]);
    let draft = Cohort::draft_from_form(&values).unwrap();
    assert_eq!(draft.start_date, draft.end_date);
    assert_eq!(draft.capacity, 10);
}

#[test]
fn assignment_round_trips_through_form() {
    let draft = AssignmentDraft {
        title: "Portfolio review".to_owned(),
        cohort_id: 4,
        mentor_id: Some(2),
        due_date: "2026-05-15".to_owned(),
        description: "Bring two projects.".to_owned(),
    };
    let parsed = Assignment::draft_from_form(&Assignment::draft_to_form(&draft)).unwrap();
    assert_eq!(parsed, draft);
}

#[test]
fn blank_assignment_form_shows_empty_cohort() {
    let form = Assignment::draft_to_form(&AssignmentDraft::default());
    assert_eq!(form.get("cohort_id").map(String::as_str), Some(""));
}
