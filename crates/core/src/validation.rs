//! Row validator: pure logic, no database access.
//!
//! Takes one [`RawRow`] and either produces a normalized [`NewUser`] or a
//! [`FieldErrors`] map listing every violation found. Checks do not short
//! circuit, so a row with a bad email and a bad age reports both.
//!
//! Presence and integer parsing are handled here; length, range and email
//! syntax are declared on [`UserCandidate`] and run through `validator`.
//! Email uniqueness is not a validator concern, it is decided by the store.

use std::collections::BTreeMap;

use serde::Serialize;
use validator::Validate;

use crate::rows::RawRow;
use crate::user::NewUser;

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_INVALID_EMAIL: &str = "Enter a valid email address.";
pub const MSG_INVALID_INTEGER: &str = "A valid integer is required.";

/// Field name to the list of messages raised against it.
///
/// Serializes as a plain JSON object, e.g. `{"email": ["..."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// An error map holding one message for one field.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

/// Outcome of validating a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowValidation {
    Valid(NewUser),
    Invalid(FieldErrors),
}

/// Trimmed, type-converted fields awaiting declarative checks.
///
/// `None` means the field was already rejected as absent, blank or
/// unparseable, so `validator` skips it.
#[derive(Debug, Validate)]
struct UserCandidate {
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    name: Option<String>,

    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Ensure this field has no more than 254 characters.")
    )]
    email: Option<String>,

    #[validate(range(min = 0, max = 120, message = "Ensure this value is between 0 and 120."))]
    age: Option<i32>,
}

/// Validate one CSV row.
pub fn validate_row(row: &RawRow) -> RowValidation {
    let mut errors = FieldErrors::default();

    let name = required_text(row, "name", &mut errors);
    let email = required_text(row, "email", &mut errors);
    let age = required_text(row, "age", &mut errors).and_then(|raw| match raw.parse::<i32>() {
        Ok(age) => Some(age),
        Err(_) => {
            errors.add("age", MSG_INVALID_INTEGER);
            None
        }
    });

    let candidate = UserCandidate { name, email, age };

    if let Err(failures) = candidate.validate() {
        for (field, field_failures) in failures.field_errors() {
            for failure in field_failures.iter() {
                let message = failure
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| failure.code.to_string());
                errors.add(field.to_string(), message);
            }
        }
    }

    // `validator` accepts dotless hosts such as `user@localhost`.
    if let Some(email) = candidate.email.as_deref() {
        if !errors.contains("email") && !has_dotted_domain(email) {
            errors.add("email", MSG_INVALID_EMAIL);
        }
    }

    match candidate {
        UserCandidate {
            name: Some(name),
            email: Some(email),
            age: Some(age),
        } if errors.is_empty() => RowValidation::Valid(NewUser { name, email, age }),
        _ => RowValidation::Invalid(errors),
    }
}

/// Fetch a trimmed, non-empty field or record why it is missing.
fn required_text(row: &RawRow, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match row.get(field).map(|v| v.trim()) {
        None => {
            errors.add(field, MSG_REQUIRED);
            None
        }
        Some("") => {
            errors.add(field, MSG_BLANK);
            None
        }
        Some(value) => Some(value.to_string()),
    }
}

fn has_dotted_domain(email: &str) -> bool {
    email
        .rsplit_once('@')
        .is_some_and(|(_, domain)| domain.contains('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::{MAX_AGE, MIN_AGE};
    use assert_matches::assert_matches;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid_row() -> RawRow {
        row(&[("name", "John Doe"), ("email", "john@example.com"), ("age", "30")])
    }

    fn errors_for(r: &RawRow) -> FieldErrors {
        match validate_row(r) {
            RowValidation::Invalid(errors) => errors,
            RowValidation::Valid(user) => panic!("expected invalid row, got {user:?}"),
        }
    }

    #[test]
    fn valid_row_is_normalized() {
        let result = validate_row(&valid_row());
        assert_eq!(
            result,
            RowValidation::Valid(NewUser {
                name: "John Doe".to_string(),
                email: "john@example.com".to_string(),
                age: 30,
            })
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let r = row(&[("name", "  Jane "), ("email", " jane@example.com "), ("age", " 25 ")]);
        assert_matches!(validate_row(&r), RowValidation::Valid(user) => {
            assert_eq!(user.name, "Jane");
            assert_eq!(user.email, "jane@example.com");
            assert_eq!(user.age, 25);
        });
    }

    #[test]
    fn unknown_columns_are_ignored() {
        let mut r = valid_row();
        r.insert("nickname".to_string(), "JD".to_string());
        assert_matches!(validate_row(&r), RowValidation::Valid(_));
    }

    // -- name --

    #[test]
    fn missing_name_is_required() {
        let mut r = valid_row();
        r.remove("name");
        let errors = errors_for(&r);
        assert_eq!(errors.get("name"), Some(&[MSG_REQUIRED.to_string()][..]));
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut r = valid_row();
        r.insert("name".to_string(), "   ".to_string());
        let errors = errors_for(&r);
        assert_eq!(errors.get("name"), Some(&[MSG_BLANK.to_string()][..]));
    }

    #[test]
    fn overlong_name_is_rejected() {
        let mut r = valid_row();
        r.insert("name".to_string(), "x".repeat(256));
        assert!(errors_for(&r).contains("name"));
    }

    #[test]
    fn name_at_length_limit_is_accepted() {
        let mut r = valid_row();
        r.insert("name".to_string(), "x".repeat(255));
        assert_matches!(validate_row(&r), RowValidation::Valid(_));
    }

    // -- email --

    #[test]
    fn email_without_at_sign_is_rejected() {
        let mut r = valid_row();
        r.insert("email".to_string(), "not-an-email".to_string());
        let errors = errors_for(&r);
        assert_eq!(errors.get("email"), Some(&[MSG_INVALID_EMAIL.to_string()][..]));
    }

    #[test]
    fn email_without_domain_dot_is_rejected() {
        let mut r = valid_row();
        r.insert("email".to_string(), "john@localhost".to_string());
        let errors = errors_for(&r);
        assert_eq!(errors.get("email"), Some(&[MSG_INVALID_EMAIL.to_string()][..]));
    }

    #[test]
    fn email_with_embedded_space_is_rejected() {
        let mut r = valid_row();
        r.insert("email".to_string(), "john doe@example.com".to_string());
        assert!(errors_for(&r).contains("email"));
    }

    #[test]
    fn missing_email_is_required() {
        let mut r = valid_row();
        r.remove("email");
        let errors = errors_for(&r);
        assert_eq!(errors.get("email"), Some(&[MSG_REQUIRED.to_string()][..]));
    }

    // -- age --

    #[test]
    fn non_numeric_age_is_rejected() {
        let mut r = valid_row();
        r.insert("age".to_string(), "thirty".to_string());
        let errors = errors_for(&r);
        assert_eq!(errors.get("age"), Some(&[MSG_INVALID_INTEGER.to_string()][..]));
    }

    #[test]
    fn fractional_age_is_rejected() {
        let mut r = valid_row();
        r.insert("age".to_string(), "30.5".to_string());
        assert!(errors_for(&r).contains("age"));
    }

    #[test]
    fn age_above_range_is_rejected() {
        let mut r = valid_row();
        r.insert("age".to_string(), "150".to_string());
        assert!(errors_for(&r).contains("age"));
    }

    #[test]
    fn negative_age_is_rejected() {
        let mut r = valid_row();
        r.insert("age".to_string(), "-1".to_string());
        assert!(errors_for(&r).contains("age"));
    }

    #[test]
    fn age_bounds_are_inclusive() {
        for age in [MIN_AGE, MAX_AGE] {
            let mut r = valid_row();
            r.insert("age".to_string(), age.to_string());
            assert_matches!(validate_row(&r), RowValidation::Valid(user) => {
                assert_eq!(user.age, age);
            });
        }
        for age in [MIN_AGE - 1, MAX_AGE + 1] {
            let mut r = valid_row();
            r.insert("age".to_string(), age.to_string());
            assert!(errors_for(&r).contains("age"), "age {age} should be rejected");
        }
    }

    // -- collection --

    #[test]
    fn all_violations_are_collected() {
        let r = row(&[("name", ""), ("email", "bad"), ("age", "999")]);
        let errors = errors_for(&r);
        assert!(errors.contains("name"));
        assert!(errors.contains("email"));
        assert!(errors.contains("age"));
    }

    #[test]
    fn empty_row_reports_every_required_field() {
        let errors = errors_for(&RawRow::new());
        for field in ["name", "email", "age"] {
            assert_eq!(errors.get(field), Some(&[MSG_REQUIRED.to_string()][..]));
        }
    }

    #[test]
    fn field_errors_serialize_as_plain_object() {
        let errors = FieldErrors::single("email", "Email address already exists");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"email": ["Email address already exists"]}));
    }
}
