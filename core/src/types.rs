//! Domain DTOs for the students API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! The backend assigns identifiers; the client never invents one and treats
//! them as opaque, so `StudentId` keeps whatever JSON shape the server used.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned student identifier.
///
/// Accepts either a JSON number or a JSON string and serializes back to the
/// same shape. Only ever compared for equality and formatted into paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StudentId {
    Number(i64),
    Text(String),
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudentId::Number(n) => write!(f, "{n}"),
            StudentId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for StudentId {
    fn from(value: i64) -> Self {
        StudentId::Number(value)
    }
}

impl From<&str> for StudentId {
    fn from(value: &str) -> Self {
        StudentId::Text(value.to_string())
    }
}

/// A single student record returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    pub course: String,
}

/// Request payload for creating or replacing a student.
///
/// Only produced by the validator, so every value held here is trimmed,
/// non-empty and carries a well-formed email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentInput {
    pub name: String,
    pub email: String,
    pub course: String,
}

/// Raw form contents as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub course: String,
}

impl FormFields {
    pub fn new(name: impl Into<String>, email: impl Into<String>, course: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            course: course.into(),
        }
    }
}

impl From<&Student> for FormFields {
    fn from(student: &Student) -> Self {
        Self::new(&student.name, &student.email, &student.course)
    }
}
