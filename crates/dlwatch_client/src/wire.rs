//! Serde mirrors of the server's JSON bodies, converted to core types at the
//! boundary so the core stays serialization-free.

use serde::Deserialize;

use dlwatch_core::{JobStatus, ListedJob, StatusSnapshot};

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub download_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusResponse {
    pub status: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
}

impl StatusResponse {
    pub(crate) fn into_snapshot(self) -> StatusSnapshot {
        StatusSnapshot {
            status: JobStatus::parse(&self.status),
            title: self.title,
            progress: self.progress.map(clamp_progress),
            error: self.error,
            file_path: self.file_path,
        }
    }
}

// The server reports progress as a float percentage.
fn clamp_progress(raw: f64) -> u8 {
    raw.clamp(0.0, 100.0).round() as u8
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    #[serde(default)]
    pub downloads: Vec<ListEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub status: String,
    #[serde(default)]
    pub file_path: Option<String>,
}

impl ListEntry {
    pub(crate) fn into_listed_job(self) -> ListedJob {
        ListedJob {
            id: self.id.unwrap_or_default(),
            title: self.title.unwrap_or_else(|| "Unknown".to_string()),
            status: JobStatus::parse(&self.status),
            file_path: self.file_path,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}
