//! Form-field parsing and validation shared by auth and admin forms.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages validate input before calling the identity provider or backend so
//! obvious mistakes never cost a network round trip. Errors name the field
//! they belong to so forms can render them inline.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use std::collections::BTreeMap;

use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Raw form input keyed by field name.
pub type FormValues = BTreeMap<String, String>;

/// Shortest password the identity provider accepts.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A validation failure tied to one field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FormError {
    pub field: &'static str,
    pub message: String,
}

impl FormError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

/// Input widget kind for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Number,
    Date,
    TextArea,
}

impl FieldKind {
    /// HTML `type` attribute for `<input>`; text areas render separately.
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Text | Self::TextArea => "text",
            Self::Email => "email",
            Self::Number => "number",
            Self::Date => "date",
        }
    }
}

/// Static description of one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

fn raw<'a>(values: &'a FormValues, key: &str) -> &'a str {
    values.get(key).map_or("", |v| v.trim())
}

/// Trimmed non-empty value.
///
/// # Errors
///
/// Returns a `FormError` when the field is blank.
pub fn required(values: &FormValues, key: &'static str) -> Result<String, FormError> {
    let value = raw(values, key);
    if value.is_empty() {
        return Err(FormError::new(key, "is required"));
    }
    Ok(value.to_owned())
}

/// Trimmed value, `None` when blank.
pub fn optional(values: &FormValues, key: &str) -> Option<String> {
    let value = raw(values, key);
    (!value.is_empty()).then(|| value.to_owned())
}

/// Validate a plausible email address (one `@`, dotted domain).
///
/// # Errors
///
/// Returns a `FormError` when blank or malformed.
pub fn email(values: &FormValues, key: &'static str) -> Result<String, FormError> {
    let value = required(values, key)?;
    if !is_valid_email(&value) {
        return Err(FormError::new(key, "must be a valid email address"));
    }
    Ok(value)
}

pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.contains(char::is_whitespace)
}

/// Required non-negative integer.
///
/// # Errors
///
/// Returns a `FormError` when blank or not a whole number.
pub fn count(values: &FormValues, key: &'static str) -> Result<u32, FormError> {
    required(values, key)?
        .parse::<u32>()
        .map_err(|_| FormError::new(key, "must be a whole number"))
}

/// Required numeric record identifier.
///
/// # Errors
///
/// Returns a `FormError` when blank or not a positive integer.
pub fn id(values: &FormValues, key: &'static str) -> Result<u64, FormError> {
    parse_id(key, &required(values, key)?)
}

/// Optional numeric record identifier.
///
/// # Errors
///
/// Returns a `FormError` when present but not a positive integer.
pub fn optional_id(values: &FormValues, key: &'static str) -> Result<Option<u64>, FormError> {
    optional(values, key).map(|v| parse_id(key, &v)).transpose()
}

fn parse_id(key: &'static str, value: &str) -> Result<u64, FormError> {
    match value.parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(FormError::new(key, "must be a positive record id")),
    }
}

/// Required ISO `YYYY-MM-DD` date, returned in canonical form.
///
/// # Errors
///
/// Returns a `FormError` when blank or not a calendar date.
pub fn date(values: &FormValues, key: &'static str) -> Result<Date, FormError> {
    let value = required(values, key)?;
    parse_date(&value).ok_or_else(|| FormError::new(key, "must be a date (YYYY-MM-DD)"))
}

pub fn parse_date(value: &str) -> Option<Date> {
    Date::parse(value, ISO_DATE).ok()
}

pub fn format_date(date: Date) -> String {
    date.format(ISO_DATE).unwrap_or_else(|_| date.to_string())
}

/// Check a new password against the provider's minimum.
///
/// # Errors
///
/// Returns a `FormError` when shorter than [`MIN_PASSWORD_LEN`].
pub fn password(values: &FormValues, key: &'static str) -> Result<String, FormError> {
    let value = values.get(key).cloned().unwrap_or_default();
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(FormError::new(
            key,
            format!("must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    Ok(value)
}

/// Build a `FormValues` map from literal pairs.
pub fn values_from<I, K, V>(pairs: I) -> FormValues
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
