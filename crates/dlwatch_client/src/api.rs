use std::time::Duration;

use dlwatch_core::{download_href, stream_href, JobId, ListedJob, StatusSnapshot};
use dlwatch_logging::{watch_debug, watch_info};
use serde::de::DeserializeOwned;

use crate::wire::{DeleteResponse, ListResponse, StatusResponse, SubmitResponse};
use crate::ApiError;

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Boundary to the download server. The runtime talks to it exclusively
/// through this trait so the dispatch loop can be tested without a server.
#[async_trait::async_trait]
pub trait JobApi: Send + Sync {
    /// Submit a URL for download; the server answers with the job id.
    async fn submit(&self, url: &str) -> Result<JobId, ApiError>;
    /// Fetch the authoritative status of one job.
    async fn status(&self, id: &JobId) -> Result<StatusSnapshot, ApiError>;
    /// Fetch every job the server currently knows about.
    async fn list(&self) -> Result<Vec<ListedJob>, ApiError>;
    /// Delete a stored artifact by its path.
    async fn delete(&self, file_path: &str) -> Result<(), ApiError>;
}

pub struct ReqwestApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    /// Absolute attachment-mode URL for a completed artifact.
    pub fn download_url(&self, file_path: &str) -> String {
        self.endpoint(&download_href(file_path))
    }

    /// Absolute inline-playback URL for a completed artifact.
    pub fn stream_url(&self, file_path: &str) -> String {
        self.endpoint(&stream_href(file_path))
    }
}

#[async_trait::async_trait]
impl JobApi for ReqwestApi {
    async fn submit(&self, url: &str) -> Result<JobId, ApiError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ApiError::Validation("Please enter a valid URL".to_string()));
        }
        watch_info!("submitting download url={url}");

        let response = self
            .client
            .post(self.endpoint("/api/download"))
            .form(&[("url", url)])
            .send()
            .await
            .map_err(map_transport)?;
        let body: SubmitResponse = decode_json(response).await?;

        if body.success {
            body.download_id.map(JobId::new).ok_or_else(|| {
                ApiError::Transport("server accepted the job but sent no id".to_string())
            })
        } else {
            Err(ApiError::Logical(body.error.unwrap_or_else(|| {
                "Failed to start download".to_string()
            })))
        }
    }

    async fn status(&self, id: &JobId) -> Result<StatusSnapshot, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&format!("/api/download-status/{id}")))
            .send()
            .await
            .map_err(map_transport)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Transport(format!("http status {status}")));
        }

        let body: StatusResponse = decode_json(response).await?;
        Ok(body.into_snapshot())
    }

    async fn list(&self) -> Result<Vec<ListedJob>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("/api/downloads"))
            .send()
            .await
            .map_err(map_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Transport(format!("http status {status}")));
        }

        let body: ListResponse = decode_json(response).await?;
        Ok(body
            .downloads
            .into_iter()
            .map(|entry| entry.into_listed_job())
            .collect())
    }

    async fn delete(&self, file_path: &str) -> Result<(), ApiError> {
        watch_debug!("deleting artifact file_path={file_path}");

        let response = self
            .client
            .post(self.endpoint("/api/delete-download"))
            .form(&[("file_path", file_path)])
            .send()
            .await
            .map_err(map_transport)?;
        let body: DeleteResponse = decode_json(response).await?;

        if body.success {
            Ok(())
        } else {
            Err(ApiError::Logical(body.error.unwrap_or_else(|| {
                "Failed to delete file".to_string()
            })))
        }
    }
}

/// Decodes a JSON body without looking at the HTTP status first: the server
/// carries its error messages in the body of non-2xx answers too.
async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let body = response.text().await.map_err(map_transport)?;
    serde_json::from_str(&body)
        .map_err(|err| ApiError::Transport(format!("invalid response body: {err}")))
}

fn map_transport(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Transport(format!("request timed out: {err}"));
    }
    if err.is_connect() {
        return ApiError::Transport(format!("connection failed: {err}"));
    }
    ApiError::Transport(err.to_string())
}
