//! dlwatch core: pure reconciliation state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod types;
mod update;
mod view_model;

pub use effect::{Effect, NoticeLevel};
pub use msg::{Msg, PollError};
pub use state::{AppState, GRACE_TICKS};
pub use types::{JobId, JobStatus, ListedJob, StatusSnapshot, SurfaceId};
pub use update::update;
pub use view_model::{
    artifact_filename, download_href, present_list, stream_href, AppViewModel, ListRowView,
    ListView, ProgressTone, RetrieveAction, RowActions, StatusCardView,
};
