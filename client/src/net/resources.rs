//! Admin-managed backend records and their form mappings.
//!
//! DESIGN
//! ======
//! Every admin screen (list, create, edit) is generic over `Resource`, so
//! adding a record type means describing its endpoint, columns, and fields
//! here rather than writing new pages.

#[cfg(test)]
#[path = "resources_test.rs"]
mod resources_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{
    Assignment, AssignmentDraft, Cohort, CohortDraft, Mentor, MentorDraft, Student, StudentDraft,
};
use crate::util::forms::{self, FieldKind, FieldSpec, FormError, FormValues};

/// A backend record managed through the admin CRUD screens.
pub trait Resource: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Draft: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Path segment under `/api/` and `/admin/`.
    const COLLECTION: &'static str;
    const SINGULAR: &'static str;
    const PLURAL: &'static str;
    /// Table headers matching [`Resource::row`].
    const COLUMNS: &'static [&'static str];
    const FIELDS: &'static [FieldSpec];

    fn id(&self) -> u64;
    fn draft(&self) -> &Self::Draft;
    fn row(&self) -> Vec<String>;
    fn draft_to_form(draft: &Self::Draft) -> FormValues;

    /// Validate raw form input into a draft.
    ///
    /// # Errors
    ///
    /// Returns the first field that fails validation.
    fn draft_from_form(values: &FormValues) -> Result<Self::Draft, FormError>;
}

/// Client route for the list screen of `R`.
pub fn list_route<R: Resource>() -> String {
    format!("/admin/{}", R::COLLECTION)
}

/// Client route for the create screen of `R`.
pub fn new_route<R: Resource>() -> String {
    format!("/admin/{}/new", R::COLLECTION)
}

/// Client route for the edit screen of record `id`.
pub fn edit_route<R: Resource>(id: u64) -> String {
    format!("/admin/{}/{id}/edit", R::COLLECTION)
}

fn opt_id(id: Option<u64>) -> String {
    id.map(|v| v.to_string()).unwrap_or_default()
}

fn opt_display(id: Option<u64>) -> String {
    id.map_or_else(|| "—".to_owned(), |v| format!("#{v}"))
}

const STUDENT_FIELDS: &[FieldSpec] = &[
    FieldSpec { key: "first_name", label: "First name", kind: FieldKind::Text, required: true },
    FieldSpec { key: "last_name", label: "Last name", kind: FieldKind::Text, required: true },
    FieldSpec { key: "email", label: "Email", kind: FieldKind::Email, required: true },
    FieldSpec { key: "cohort_id", label: "Cohort ID", kind: FieldKind::Number, required: false },
    FieldSpec { key: "mentor_id", label: "Mentor ID", kind: FieldKind::Number, required: false },
];

impl Resource for Student {
    type Draft = StudentDraft;

    const COLLECTION: &'static str = "students";
    const SINGULAR: &'static str = "Student";
    const PLURAL: &'static str = "Students";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Email", "Cohort", "Mentor"];
    const FIELDS: &'static [FieldSpec] = STUDENT_FIELDS;

    fn id(&self) -> u64 {
        self.id
    }

    fn draft(&self) -> &StudentDraft {
        &self.fields
    }

    fn row(&self) -> Vec<String> {
        let f = &self.fields;
        vec![
            self.id.to_string(),
            format!("{} {}", f.first_name, f.last_name),
            f.email.clone(),
            opt_display(f.cohort_id),
            opt_display(f.mentor_id),
        ]
    }

    fn draft_to_form(draft: &StudentDraft) -> FormValues {
        forms::values_from([
            ("first_name", draft.first_name.clone()),
            ("last_name", draft.last_name.clone()),
            ("email", draft.email.clone()),
            ("cohort_id", opt_id(draft.cohort_id)),
            ("mentor_id", opt_id(draft.mentor_id)),
        ])
    }

    fn draft_from_form(values: &FormValues) -> Result<StudentDraft, FormError> {
        Ok(StudentDraft {
            first_name: forms::required(values, "first_name")?,
            last_name: forms::required(values, "last_name")?,
            email: forms::email(values, "email")?,
            cohort_id: forms::optional_id(values, "cohort_id")?,
            mentor_id: forms::optional_id(values, "mentor_id")?,
        })
    }
}

const MENTOR_FIELDS: &[FieldSpec] = &[
    FieldSpec { key: "first_name", label: "First name", kind: FieldKind::Text, required: true },
    FieldSpec { key: "last_name", label: "Last name", kind: FieldKind::Text, required: true },
    FieldSpec { key: "email", label: "Email", kind: FieldKind::Email, required: true },
    FieldSpec { key: "expertise", label: "Expertise", kind: FieldKind::Text, required: false },
    FieldSpec { key: "max_mentees", label: "Max mentees", kind: FieldKind::Number, required: true },
];

impl Resource for Mentor {
    type Draft = MentorDraft;

    const COLLECTION: &'static str = "mentors";
    const SINGULAR: &'static str = "Mentor";
    const PLURAL: &'static str = "Mentors";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Email", "Expertise", "Max mentees"];
    const FIELDS: &'static [FieldSpec] = MENTOR_FIELDS;

    fn id(&self) -> u64 {
        self.id
    }

    fn draft(&self) -> &MentorDraft {
        &self.fields
    }

    fn row(&self) -> Vec<String> {
        let f = &self.fields;
        vec![
            self.id.to_string(),
            format!("{} {}", f.first_name, f.last_name),
            f.email.clone(),
            f.expertise.clone(),
            f.max_mentees.to_string(),
        ]
    }

    fn draft_to_form(draft: &MentorDraft) -> FormValues {
        forms::values_from([
            ("first_name", draft.first_name.clone()),
            ("last_name", draft.last_name.clone()),
            ("email", draft.email.clone()),
            ("expertise", draft.expertise.clone()),
            ("max_mentees", draft.max_mentees.to_string()),
        ])
    }

    fn draft_from_form(values: &FormValues) -> Result<MentorDraft, FormError> {
        let draft = MentorDraft {
            first_name: forms::required(values, "first_name")?,
            last_name: forms::required(values, "last_name")?,
            email: forms::email(values, "email")?,
            expertise: forms::optional(values, "expertise").unwrap_or_default(),
            max_mentees: forms::count(values, "max_mentees")?,
        };
        if draft.max_mentees == 0 {
            return Err(FormError::new("max_mentees", "must be at least 1"));
        }
        Ok(draft)
    }
}

const COHORT_FIELDS: &[FieldSpec] = &[
    FieldSpec { key: "name", label: "Name", kind: FieldKind::Text, required: true },
    FieldSpec { key: "start_date", label: "Start date", kind: FieldKind::Date, required: true },
    FieldSpec { key: "end_date", label: "End date", kind: FieldKind::Date, required: true },
    FieldSpec { key: "capacity", label: "Capacity", kind: FieldKind::Number, required: true },
];

impl Resource for Cohort {
    type Draft = CohortDraft;

    const COLLECTION: &'static str = "cohorts";
    const SINGULAR: &'static str = "Cohort";
    const PLURAL: &'static str = "Cohorts";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Starts", "Ends", "Capacity"];
    const FIELDS: &'static [FieldSpec] = COHORT_FIELDS;

    fn id(&self) -> u64 {
        self.id
    }

    fn draft(&self) -> &CohortDraft {
        &self.fields
    }

    fn row(&self) -> Vec<String> {
        let f = &self.fields;
        vec![
            self.id.to_string(),
            f.name.clone(),
            f.start_date.clone(),
            f.end_date.clone(),
            f.capacity.to_string(),
        ]
    }

    fn draft_to_form(draft: &CohortDraft) -> FormValues {
        forms::values_from([
            ("name", draft.name.clone()),
            ("start_date", draft.start_date.clone()),
            ("end_date", draft.end_date.clone()),
            ("capacity", draft.capacity.to_string()),
        ])
    }

    fn draft_from_form(values: &FormValues) -> Result<CohortDraft, FormError> {
        let name = forms::required(values, "name")?;
        let start = forms::date(values, "start_date")?;
        let end = forms::date(values, "end_date")?;
        if end < start {
            return Err(FormError::new("end_date", "must not be before the start date"));
        }
        Ok(CohortDraft {
            name,
            start_date: forms::format_date(start),
            end_date: forms::format_date(end),
            capacity: forms::count(values, "capacity")?,
        })
    }
}

const ASSIGNMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec { key: "title", label: "Title", kind: FieldKind::Text, required: true },
    FieldSpec { key: "cohort_id", label: "Cohort ID", kind: FieldKind::Number, required: true },
    FieldSpec { key: "mentor_id", label: "Mentor ID", kind: FieldKind::Number, required: false },
    FieldSpec { key: "due_date", label: "Due date", kind: FieldKind::Date, required: true },
    FieldSpec { key: "description", label: "Description", kind: FieldKind::TextArea, required: false },
];

impl Resource for Assignment {
    type Draft = AssignmentDraft;

    const COLLECTION: &'static str = "assignments";
    const SINGULAR: &'static str = "Assignment";
    const PLURAL: &'static str = "Assignments";
    const COLUMNS: &'static [&'static str] = &["ID", "Title", "Cohort", "Mentor", "Due"];
    const FIELDS: &'static [FieldSpec] = ASSIGNMENT_FIELDS;

    fn id(&self) -> u64 {
        self.id
    }

    fn draft(&self) -> &AssignmentDraft {
        &self.fields
    }

    fn row(&self) -> Vec<String> {
        let f = &self.fields;
        vec![
            self.id.to_string(),
            f.title.clone(),
            format!("#{}", f.cohort_id),
            opt_display(f.mentor_id),
            f.due_date.clone(),
        ]
    }

    fn draft_to_form(draft: &AssignmentDraft) -> FormValues {
        let cohort = if draft.cohort_id == 0 { String::new() } else { draft.cohort_id.to_string() };
        forms::values_from([
            ("title", draft.title.clone()),
            ("cohort_id", cohort),
            ("mentor_id", opt_id(draft.mentor_id)),
            ("due_date", draft.due_date.clone()),
            ("description", draft.description.clone()),
        ])
    }

    fn draft_from_form(values: &FormValues) -> Result<AssignmentDraft, FormError> {
        Ok(AssignmentDraft {
            title: forms::required(values, "title")?,
            cohort_id: forms::id(values, "cohort_id")?,
            mentor_id: forms::optional_id(values, "mentor_id")?,
            due_date: forms::format_date(forms::date(values, "due_date")?),
            description: forms::optional(values, "description").unwrap_or_default(),
        })
    }
}
