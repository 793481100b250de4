use crate::view_model::{present_list, ListView};
use crate::{AppState, Effect, Msg, NoticeLevel, PollError};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SubmitRequested { url } => {
            let url = url.trim().to_string();
            if url.is_empty() {
                vec![Effect::Notify {
                    level: NoticeLevel::Danger,
                    message: "Please enter a valid URL".to_string(),
                }]
            } else if state.submission_pending() {
                // The input control is disabled during a round trip; a second
                // submission in that window is dropped, not queued.
                Vec::new()
            } else {
                state.begin_submission(url.clone());
                vec![Effect::SubmitJob { url }]
            }
        }
        Msg::SubmitCompleted { result } => {
            let Some(pending) = state.take_pending() else {
                return (state, Vec::new());
            };
            match result {
                Ok(id) => {
                    state.register(id, pending);
                    vec![Effect::Notify {
                        level: NoticeLevel::Success,
                        message: "Download started".to_string(),
                    }]
                }
                // The optimistic card is dropped with the pending slot, so a
                // failed submission leaves nothing rendered behind.
                Err(message) => vec![Effect::Notify {
                    level: NoticeLevel::Danger,
                    message,
                }],
            }
        }
        Msg::Tick => {
            state.advance_tick();
            state.evict_due();
            let mut effects: Vec<Effect> = state
                .poll_targets()
                .into_iter()
                .map(|(id, seq)| Effect::PollStatus { id, seq })
                .collect();
            effects.push(Effect::FetchList);
            effects
        }
        Msg::StatusFetched { id, seq, outcome } => {
            match outcome {
                Ok(snapshot) => state.apply_snapshot(&id, seq, snapshot),
                // Out-of-band disappearance, not an error: purge without a
                // grace window and without a user-facing notice.
                Err(PollError::NotFound) => state.purge(&id),
                // Transient blip; the job stays tracked and is retried next
                // tick. The driver logs it.
                Err(PollError::Transport(_)) => {}
            }
            Vec::new()
        }
        Msg::ListFetched { outcome } => {
            match outcome {
                Ok(jobs) => state.set_list(present_list(jobs)),
                Err(_) => state.set_list(ListView::Unavailable),
            }
            Vec::new()
        }
        Msg::DeleteClicked { file_path } => vec![Effect::ConfirmDelete { file_path }],
        Msg::DeleteConfirmed { file_path } => vec![Effect::DeleteArtifact { file_path }],
        Msg::DeleteCompleted { result, .. } => match result {
            // Refresh the listing right away instead of waiting out the tick.
            Ok(()) => vec![
                Effect::Notify {
                    level: NoticeLevel::Success,
                    message: "File deleted successfully".to_string(),
                },
                Effect::FetchList,
            ],
            Err(message) => vec![Effect::Notify {
                level: NoticeLevel::Danger,
                message,
            }],
        },
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
