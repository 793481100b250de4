use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::{JobStatus, ListedJob, StatusSnapshot, SurfaceId};

/// Percent-encoding set for path segments: everything but unreserved chars.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    /// False while a submission round trip is in flight.
    pub input_enabled: bool,
    /// One card per pending submission and per tracked job.
    pub cards: Vec<StatusCardView>,
    pub list: ListView,
    pub tracked_count: usize,
    pub dirty: bool,
}

/// Renderable projection of one tracked job's latest snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCardView {
    pub surface: SurfaceId,
    /// Headline, e.g. "Downloading".
    pub title_label: String,
    /// Status line under the progress bar.
    pub detail: String,
    /// Server-reported title once known, otherwise the submitted URL.
    pub subject: String,
    /// Progress percent, 0..=100.
    pub progress: u8,
    pub tone: ProgressTone,
    pub retrieve: Option<RetrieveAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressTone {
    /// Still moving; render animated/neutral.
    Active,
    Success,
    Failure,
}

/// Link to fetch a completed artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrieveAction {
    pub filename: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListView {
    /// Server reported no jobs at all.
    #[default]
    Empty,
    Rows(Vec<ListRowView>),
    /// Listing fetch failed; the surface shows a placeholder instead of a
    /// silently stale list.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRowView {
    pub title: String,
    pub status_label: String,
    pub status_class: &'static str,
    pub actions: Option<RowActions>,
}

/// Actions available on a completed listing row with a stored artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowActions {
    pub download_href: String,
    pub stream_href: String,
    /// Raw stored path, passed back on `Msg::DeleteClicked`.
    pub file_path: String,
}

/// Card shown between submitting a URL and the first status observation.
pub(crate) fn pending_card(surface: SurfaceId, url: &str) -> StatusCardView {
    StatusCardView {
        surface,
        title_label: "Processing URL".to_string(),
        detail: "Initializing download...".to_string(),
        subject: url.to_string(),
        progress: 0,
        tone: ProgressTone::Active,
        retrieve: None,
    }
}

/// Presentation adapter for one tracked job: pure mapping from the latest
/// snapshot to a renderable card.
pub(crate) fn status_card(
    surface: SurfaceId,
    url: &str,
    snapshot: Option<&StatusSnapshot>,
) -> StatusCardView {
    let Some(snapshot) = snapshot else {
        return pending_card(surface, url);
    };

    let subject = snapshot
        .title
        .clone()
        .unwrap_or_else(|| url.to_string());

    let (title_label, detail, progress, tone) = match &snapshot.status {
        JobStatus::Initializing => (
            "Initializing".to_string(),
            "Setting up download...".to_string(),
            5,
            ProgressTone::Active,
        ),
        JobStatus::ExtractingInfo => (
            "Extracting Info".to_string(),
            "Getting video information...".to_string(),
            10,
            ProgressTone::Active,
        ),
        JobStatus::Downloading => (
            "Downloading".to_string(),
            "Downloading video...".to_string(),
            snapshot.progress.unwrap_or(0).min(100),
            ProgressTone::Active,
        ),
        JobStatus::Completed => (
            "Completed".to_string(),
            "Download complete!".to_string(),
            100,
            ProgressTone::Success,
        ),
        JobStatus::Failed => (
            "Failed".to_string(),
            snapshot
                .error
                .clone()
                .unwrap_or_else(|| "Download failed".to_string()),
            100,
            ProgressTone::Failure,
        ),
        JobStatus::Unknown(raw) => (
            "Unknown".to_string(),
            format!("Unrecognized status: {raw}"),
            snapshot.progress.unwrap_or(0).min(100),
            ProgressTone::Active,
        ),
    };

    let retrieve = match (&snapshot.status, snapshot.file_path.as_deref()) {
        (JobStatus::Completed, Some(file_path)) => {
            let filename = artifact_filename(file_path).to_string();
            let href = download_href(file_path);
            Some(RetrieveAction { filename, href })
        }
        _ => None,
    };

    StatusCardView {
        surface,
        title_label,
        detail,
        subject,
        progress,
        tone,
        retrieve,
    }
}

/// Sorts and projects the full server listing: active jobs before completed
/// ones, then case-insensitive title order. Sort is stable, so equal titles
/// keep the server's order tick over tick.
pub fn present_list(mut jobs: Vec<ListedJob>) -> ListView {
    if jobs.is_empty() {
        return ListView::Empty;
    }
    jobs.sort_by(|a, b| {
        let a_done = a.status == JobStatus::Completed;
        let b_done = b.status == JobStatus::Completed;
        a_done
            .cmp(&b_done)
            .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
    });
    ListView::Rows(jobs.into_iter().map(list_row).collect())
}

fn list_row(job: ListedJob) -> ListRowView {
    let (status_label, status_class) = match &job.status {
        JobStatus::Completed => ("Completed".to_string(), "success"),
        JobStatus::Failed => ("Failed".to_string(), "danger"),
        JobStatus::Downloading => ("Downloading".to_string(), "primary"),
        JobStatus::ExtractingInfo => ("Processing".to_string(), "info"),
        JobStatus::Initializing => ("Initializing".to_string(), "warning"),
        JobStatus::Unknown(raw) => (raw.clone(), "secondary"),
    };

    let actions = match (&job.status, job.file_path) {
        (JobStatus::Completed, Some(file_path)) => Some(RowActions {
            download_href: download_href(&file_path),
            stream_href: stream_href(&file_path),
            file_path,
        }),
        _ => None,
    };

    ListRowView {
        title: job.title,
        status_label,
        status_class,
        actions,
    }
}

/// Final path segment of a stored artifact path.
pub fn artifact_filename(file_path: &str) -> &str {
    file_path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_path)
}

/// Attachment-mode retrieval link for a stored artifact.
pub fn download_href(file_path: &str) -> String {
    format!(
        "/download/{}",
        utf8_percent_encode(artifact_filename(file_path), SEGMENT)
    )
}

/// Inline-playback link for a stored artifact.
pub fn stream_href(file_path: &str) -> String {
    format!(
        "/stream/{}",
        utf8_percent_encode(artifact_filename(file_path), SEGMENT)
    )
}
