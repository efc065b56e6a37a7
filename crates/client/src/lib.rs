pub mod error;
pub mod upload;

pub use error::{ClientError, Endpoint};
pub use upload::{dataset_kind, DatasetKind, ACCEPTED_EXTENSIONS};

use reqwest::multipart;
use schema::{AreasResponse, ErrorEnvelope, QueryRequest, QueryResponse, UploadResponse};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api";

/// Thin wrapper over the analytics backend's HTTP endpoints.
#[derive(Clone)]
pub struct DashboardClient {
    base_url: String,
    client: reqwest::Client,
}

impl DashboardClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ClientError::Transport {
                endpoint: Endpoint::Query,
                source,
            })?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    /// Submit a natural-language query.
    pub async fn query(&self, text: &str) -> Result<QueryResponse, ClientError> {
        let endpoint = Endpoint::Query;
        let started = Instant::now();
        debug!(query = text, "submitting query");

        let request = self
            .client
            .post(self.url(endpoint))
            .json(&QueryRequest::new(text));
        let body = self.send(endpoint, request, started).await?;

        QueryResponse::from_slice(&body).map_err(|source| ClientError::Decode { endpoint, source })
    }

    /// Upload a dataset file. Files outside the accept filter never reach the network.
    pub async fn upload(&self, path: &Path) -> Result<String, ClientError> {
        let endpoint = Endpoint::Upload;
        let kind = dataset_kind(path)?;

        let bytes = tokio::fs::read(path).await.map_err(|source| ClientError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string());

        let started = Instant::now();
        info!(file = %file_name, bytes = bytes.len(), "uploading dataset");

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(kind.mime())
            .map_err(|source| ClientError::Transport { endpoint, source })?;
        let form = multipart::Form::new().part("file", part);

        let request = self.client.post(self.url(endpoint)).multipart(form);
        let body = self.send(endpoint, request, started).await?;

        let response: UploadResponse = serde_json::from_slice(&body)
            .map_err(|source| ClientError::Decode { endpoint, source })?;
        Ok(response.message)
    }

    /// Area names known to the loaded dataset, sorted.
    pub async fn list_areas(&self) -> Result<Vec<String>, ClientError> {
        let endpoint = Endpoint::Areas;
        let started = Instant::now();

        let request = self.client.get(self.url(endpoint));
        let body = self.send(endpoint, request, started).await?;

        let response: AreasResponse = serde_json::from_slice(&body)
            .map_err(|source| ClientError::Decode { endpoint, source })?;
        let mut areas = response.areas;
        areas.sort();
        Ok(areas)
    }

    async fn send(
        &self,
        endpoint: Endpoint,
        request: reqwest::RequestBuilder,
        started: Instant,
    ) -> Result<Vec<u8>, ClientError> {
        let response = request.send().await.map_err(|source| {
            warn!(%endpoint, error = %source, "request did not complete");
            ClientError::Transport { endpoint, source }
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| ClientError::Transport { endpoint, source })?;

        info!(
            %endpoint,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request finished"
        );

        if !status.is_success() {
            // A blank error string counts as no error body.
            return Err(match serde_json::from_slice::<ErrorEnvelope>(&body) {
                Ok(envelope) if !envelope.error.trim().is_empty() => ClientError::Server {
                    status: status.as_u16(),
                    message: envelope.error,
                },
                _ => ClientError::Status {
                    endpoint,
                    status: status.as_u16(),
                },
            });
        }

        Ok(body.to_vec())
    }
}
