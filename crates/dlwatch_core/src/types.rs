use std::fmt;

/// Opaque server-issued download identifier; the registry key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque handle to the presentation element backing one tracked job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(pub u64);

/// Server-reported lifecycle state of a download job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Initializing,
    ExtractingInfo,
    Downloading,
    Completed,
    Failed,
    /// A status string this client does not recognize, kept verbatim.
    Unknown(String),
}

impl JobStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "initializing" => Self::Initializing,
            "extracting_info" => Self::ExtractingInfo,
            "downloading" => Self::Downloading,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// `completed` and `failed` end the lifecycle; the server never moves a
    /// job out of them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// One server-reported observation of a job. Transient: the registry keeps
/// only the most recent one, and only for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub status: JobStatus,
    pub title: Option<String>,
    pub progress: Option<u8>,
    pub error: Option<String>,
    pub file_path: Option<String>,
}

impl StatusSnapshot {
    pub fn new(status: JobStatus) -> Self {
        Self {
            status,
            title: None,
            progress: None,
            error: None,
            file_path: None,
        }
    }
}

/// One row of the server's full job listing. Covers every job the server
/// knows about, including ones submitted by other clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedJob {
    pub id: String,
    pub title: String,
    pub status: JobStatus,
    pub file_path: Option<String>,
}
