use crate::{JobId, ListedJob, StatusSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User submitted a URL for download.
    SubmitRequested { url: String },
    /// Submission round trip finished; the error string is already
    /// user-facing. Either way the input re-enables.
    SubmitCompleted { result: Result<JobId, String> },
    /// Shared polling timer fired.
    Tick,
    /// Status poll for one tracked job finished. `seq` echoes the value the
    /// poll was issued with.
    StatusFetched {
        id: JobId,
        seq: u64,
        outcome: Result<StatusSnapshot, PollError>,
    },
    /// Full server-side listing fetched.
    ListFetched {
        outcome: Result<Vec<ListedJob>, String>,
    },
    /// User clicked delete on a listed artifact.
    DeleteClicked { file_path: String },
    /// User confirmed the deletion.
    DeleteConfirmed { file_path: String },
    /// Deletion round trip finished.
    DeleteCompleted {
        file_path: String,
        result: Result<(), String>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Why a status poll failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    /// Server has no record of the job; it is purged immediately, without a
    /// grace window.
    NotFound,
    /// Transient transport or decode failure; the job stays tracked and is
    /// retried next tick.
    Transport(String),
}
