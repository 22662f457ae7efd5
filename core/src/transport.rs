//! The injected HTTP seam and the four REST operations built on it.
//!
//! # Design
//! `Transport` is the only place where I/O happens. The trait is declared
//! `?Send` because the controller runs on a single-threaded executor and
//! shares its state through `Rc`. `StudentApi` pairs a transport with a
//! `StudentClient` so callers get typed `list/create/update/delete`.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::client::StudentClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Student, StudentId, StudentInput};

/// Executes one HTTP round-trip.
///
/// Implementations return non-2xx responses as `Ok` data and use
/// `ApiError::Transport` only when no response was obtained.
#[async_trait(?Send)]
pub trait Transport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Typed access to the students collection. No retries: every failure is
/// returned to the caller as soon as it happens.
#[derive(Debug, Clone)]
pub struct StudentApi<T> {
    client: StudentClient,
    transport: T,
}

impl<T: Transport> StudentApi<T> {
    pub fn new(client: StudentClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn list(&self) -> Result<Vec<Student>, ApiError> {
        let response = self.send(self.client.build_list()).await?;
        self.client.parse_list(response)
    }

    pub async fn create(&self, input: &StudentInput) -> Result<Student, ApiError> {
        let response = self.send(self.client.build_create(input)?).await?;
        self.client.parse_create(response)
    }

    pub async fn update(&self, id: &StudentId, input: &StudentInput) -> Result<Student, ApiError> {
        let response = self.send(self.client.build_update(id, input)?).await?;
        self.client.parse_update(response)
    }

    pub async fn delete(&self, id: &StudentId) -> Result<String, ApiError> {
        let response = self.send(self.client.build_delete(id)).await?;
        self.client.parse_delete(response)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method.as_str();
        let path = request.path.clone();
        debug!(method, %path, "sending request");
        match self.transport.execute(request).await {
            Ok(response) => {
                if !response.is_success() {
                    warn!(method, %path, status = response.status, "request rejected");
                }
                Ok(response)
            }
            Err(err) => {
                warn!(method, %path, error = %err, "request failed");
                Err(err)
            }
        }
    }
}
