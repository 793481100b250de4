use crate::JobId;

/// IO requests emitted by `update`. Rendering is not an effect: the driver
/// re-renders from the view model whenever the state turns dirty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the URL to the server; answer with `Msg::SubmitCompleted`.
    SubmitJob { url: String },
    /// Fetch one job's status; `seq` must come back on `Msg::StatusFetched`.
    PollStatus { id: JobId, seq: u64 },
    /// Fetch the full server-side job listing.
    FetchList,
    /// Ask the surface to confirm deleting the artifact before anything is
    /// sent to the server.
    ConfirmDelete { file_path: String },
    /// Delete the stored artifact; answer with `Msg::DeleteCompleted`.
    DeleteArtifact { file_path: String },
    /// Show a transient notification.
    Notify {
        level: NoticeLevel,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Danger,
}
