//! Remote Data Gateway
//!
//! The only component that talks to the notes service. Every call is a
//! single attempt bounded by the configured request timeout.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};

use crate::config::ClientConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::model::{NewNote, Note, NoteId, NotesEnvelope};
use crate::timer::with_timeout;

/// Handle to an accepted write. The response body is never read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteReceipt {
    pub status: u16,
}

/// Read and write operations against the notes service
#[async_trait(?Send)]
pub trait NotesGateway {
    /// Notes that are not archived
    async fn list_active(&self) -> GatewayResult<Vec<Note>>;

    /// Archived notes
    async fn list_archived(&self) -> GatewayResult<Vec<Note>>;

    async fn create(&self, note: &NewNote) -> GatewayResult<WriteReceipt>;

    async fn archive(&self, id: &NoteId) -> GatewayResult<WriteReceipt>;

    async fn unarchive(&self, id: &NoteId) -> GatewayResult<WriteReceipt>;

    async fn delete(&self, id: &NoteId) -> GatewayResult<WriteReceipt>;
}

/// Gateway over HTTP/JSON
pub struct HttpGateway {
    client: Client,
    config: ClientConfig,
}

impl HttpGateway {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn timeout(&self) -> Duration {
        self.config.request_timeout()
    }

    /// Run one exchange under the request bound
    async fn bounded<T>(
        &self,
        operation: &'static str,
        exchange: impl Future<Output = GatewayResult<T>>,
    ) -> GatewayResult<T> {
        let after = self.timeout();
        match with_timeout(exchange, after).await {
            Ok(result) => {
                if let Err(e) = &result {
                    log::warn!("[Gateway] {}", e);
                }
                result
            }
            Err(_) => {
                let err = GatewayError::Timeout { operation, after };
                log::warn!("[Gateway] {}", err);
                Err(err)
            }
        }
    }

    /// Send and check the status against the acceptance window
    async fn send(&self, operation: &'static str, request: RequestBuilder) -> GatewayResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::failed(operation, e.to_string()))?;
        let status = response.status();
        log::debug!("[Gateway] {} -> {}", operation, status);
        if !self.config.status_window.accepts(status.as_u16()) {
            return Err(GatewayError::failed(operation, format!("unexpected status {}", status)));
        }
        Ok(response)
    }

    async fn read(&self, operation: &'static str, path: &str) -> GatewayResult<Vec<Note>> {
        let url = self.config.endpoint(path);
        log::debug!("[Gateway] {} GET {}", operation, url);
        self.bounded(operation, async {
            let response = self.send(operation, self.client.get(&url)).await?;
            let envelope: NotesEnvelope = response
                .json()
                .await
                .map_err(|e| GatewayError::failed(operation, format!("malformed body: {}", e)))?;
            Ok(envelope.data)
        })
        .await
    }

    async fn write(&self, operation: &'static str, request: RequestBuilder) -> GatewayResult<WriteReceipt> {
        self.bounded(operation, async {
            let response = self.send(operation, request).await?;
            Ok(WriteReceipt {
                status: response.status().as_u16(),
            })
        })
        .await
    }
}

#[async_trait(?Send)]
impl NotesGateway for HttpGateway {
    async fn list_active(&self) -> GatewayResult<Vec<Note>> {
        self.read("list active notes", "/notes").await
    }

    async fn list_archived(&self) -> GatewayResult<Vec<Note>> {
        self.read("list archived notes", "/notes/archived").await
    }

    async fn create(&self, note: &NewNote) -> GatewayResult<WriteReceipt> {
        let url = self.config.endpoint("/notes");
        log::debug!("[Gateway] create POST {}", url);
        self.write("create note", self.client.post(url).json(note)).await
    }

    async fn archive(&self, id: &NoteId) -> GatewayResult<WriteReceipt> {
        let url = self.config.endpoint(&format!("/notes/{}/archive", id.path_segment()));
        log::debug!("[Gateway] archive POST {}", url);
        self.write("archive note", self.client.post(url)).await
    }

    async fn unarchive(&self, id: &NoteId) -> GatewayResult<WriteReceipt> {
        let url = self.config.endpoint(&format!("/notes/{}/unarchive", id.path_segment()));
        log::debug!("[Gateway] unarchive POST {}", url);
        self.write("unarchive note", self.client.post(url)).await
    }

    async fn delete(&self, id: &NoteId) -> GatewayResult<WriteReceipt> {
        let url = self.config.endpoint(&format!("/notes/{}", id.path_segment()));
        log::debug!("[Gateway] delete DELETE {}", url);
        self.write("delete note", self.client.delete(url)).await
    }
}
