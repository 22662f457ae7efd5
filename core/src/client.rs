//! Stateless HTTP request builder and response parser for the students API.
//!
//! # Design
//! `StudentClient` holds only a `base_url` and carries no mutable state
//! between calls. Each CRUD operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Whoever sits between the two executes the round-trip, so
//! this module stays deterministic and free of I/O.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Student, StudentId, StudentInput};

/// Synchronous, stateless client for the students collection.
#[derive(Debug, Clone)]
pub struct StudentClient {
    base_url: String,
}

impl StudentClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection(&self) -> String {
        format!("{}/students", self.base_url)
    }

    fn member(&self, id: &StudentId) -> String {
        format!("{}/students/{id}", self.base_url)
    }

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create(&self, input: &StudentInput) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection(),
            headers: json_headers(),
            body: Some(to_json(input)?),
        })
    }

    pub fn build_update(&self, id: &StudentId, input: &StudentInput) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.member(id),
            headers: json_headers(),
            body: Some(to_json(input)?),
        })
    }

    pub fn build_delete(&self, id: &StudentId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.member(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Student>, ApiError> {
        from_json(check_status(response)?)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Student, ApiError> {
        from_json(check_status(response)?)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Student, ApiError> {
        from_json(check_status(response)?)
    }

    /// Delete answers with free-form text; it is returned as-is.
    pub fn parse_delete(&self, response: HttpResponse) -> Result<String, ApiError> {
        Ok(check_status(response)?.body)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn to_json(input: &StudentInput) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn from_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Any 2xx passes; everything else becomes `RequestFailed`.
fn check_status(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    Err(ApiError::RequestFailed {
        status: response.status,
        body: response.body,
    })
}
