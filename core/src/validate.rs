//! Form validation. Pure functions, no side effects.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Field, ValidationError};
use crate::types::{FormFields, StudentInput};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$") {
    Ok(re) => re,
    Err(_) => unreachable!("static regex pattern"),
});

/// Check that `email` has the shape `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Trim every field, require all three, then check the email shape.
///
/// Emptiness is reported before email shape, and fields are checked in form
/// order so the first missing one is named.
pub fn validate_student_input(fields: &FormFields) -> Result<StudentInput, ValidationError> {
    let name = fields.name.trim();
    let email = fields.email.trim();
    let course = fields.course.trim();

    for (field, value) in [(Field::Name, name), (Field::Email, email), (Field::Course, course)] {
        if value.is_empty() {
            return Err(ValidationError::MissingField(field));
        }
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(StudentInput {
        name: name.to_string(),
        email: email.to_string(),
        course: course.to_string(),
    })
}
