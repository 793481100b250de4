use dlwatch_core::{AppViewModel, ListView, NoticeLevel, ProgressTone};

/// Rendering boundary. The reconcilers never touch presentation directly;
/// the dispatch loop hands the view model to whatever implements this.
pub trait Surface: Send + Sync {
    /// Re-render the whole view. Called only when the state turned dirty.
    fn render(&self, view: &AppViewModel);
    /// Show a transient notification.
    fn notify(&self, level: NoticeLevel, message: &str);
    /// Ask the user whether the artifact should really be deleted.
    fn confirm_delete(&self, file_path: &str) -> bool;
}

/// Plain-text surface for running in a terminal.
pub struct ConsoleSurface;

impl Surface for ConsoleSurface {
    fn render(&self, view: &AppViewModel) {
        let mut out = String::new();

        for card in &view.cards {
            let marker = match card.tone {
                ProgressTone::Active => '~',
                ProgressTone::Success => '+',
                ProgressTone::Failure => '!',
            };
            out.push_str(&format!(
                "[{marker}] {:<16} {:>3}%  {}\n    {}\n",
                card.title_label, card.progress, card.subject, card.detail
            ));
            if let Some(retrieve) = &card.retrieve {
                out.push_str(&format!(
                    "    retrieve {} -> {}\n",
                    retrieve.filename, retrieve.href
                ));
            }
        }

        match &view.list {
            ListView::Empty => out.push_str("-- no downloads available --\n"),
            ListView::Unavailable => out.push_str("-- failed to load downloads --\n"),
            ListView::Rows(rows) => {
                for row in rows {
                    out.push_str(&format!("  {:<12} {}\n", row.status_label, row.title));
                    if let Some(actions) = &row.actions {
                        out.push_str(&format!(
                            "               {} | {} | rm {}\n",
                            actions.download_href, actions.stream_href, actions.file_path
                        ));
                    }
                }
            }
        }

        print!("{out}");
    }

    fn notify(&self, level: NoticeLevel, message: &str) {
        let tag = match level {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "ok",
            NoticeLevel::Danger => "error",
        };
        println!("[{tag}] {message}");
    }

    fn confirm_delete(&self, file_path: &str) -> bool {
        // The `rm` command is the explicit user action here, so the console
        // surface confirms on its behalf and says so.
        println!("[info] deleting {file_path}");
        true
    }
}
