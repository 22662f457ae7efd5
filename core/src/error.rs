//! Error types for the students client.
//!
//! # Design
//! Three families, matching where a failure originates: `ValidationError`
//! never leaves the process, `ApiError` covers everything between building a
//! request and decoding its response, and `SyncError` is what controller
//! operations hand back after the user has already been notified.

use std::fmt;

use thiserror::Error;

/// A form field checked by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Course,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Course => "course",
        })
    }
}

/// Local input problems; these never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(Field),

    #[error("email address is not of the form local@domain.tld")]
    InvalidEmail,
}

/// Errors produced while talking to the students API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status outside 200..=299.
    #[error("HTTP {status}: {body}")]
    RequestFailed { status: u16, body: String },

    /// The request never produced a response (unreachable host, timeout).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Status code of a rejected request, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Terminal failure of one controller operation.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
