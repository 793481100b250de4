use std::sync::Arc;
use std::time::Duration;

use dlwatch_client::{ApiError, JobApi};
use dlwatch_core::{update, AppState, Effect, Msg, PollError};
use dlwatch_logging::{watch_debug, watch_warn};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::surface::Surface;

/// Shared cadence for both reconcilers.
pub const TICK_INTERVAL: Duration = Duration::from_secs(2);

/// Owns the state and the message channel; everything that mutates the
/// registry runs on the single `run` task, which is the coarse serialization
/// the registry needs on a multi-threaded runtime.
pub struct Runner {
    api: Arc<dyn JobApi>,
    surface: Arc<dyn Surface>,
    msg_tx: mpsc::UnboundedSender<Msg>,
    msg_rx: mpsc::UnboundedReceiver<Msg>,
    shutdown: CancellationToken,
}

impl Runner {
    pub fn new(api: Arc<dyn JobApi>, surface: Arc<dyn Surface>) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            api,
            surface,
            msg_tx,
            msg_rx,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<Msg> {
        self.msg_tx.clone()
    }

    /// Cancelling this token stops the timer and the dispatch loop; nothing
    /// keeps polling after teardown.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Dispatch loop: applies every message to the state, fans the resulting
    /// effects out, and re-renders when the state turned dirty.
    pub async fn run(mut self) {
        self.spawn_ticker();
        let mut state = AppState::new();
        let mut tick: u64 = 0;

        loop {
            let msg = tokio::select! {
                _ = self.shutdown.cancelled() => break,
                msg = self.msg_rx.recv() => match msg {
                    Some(msg) => msg,
                    None => break,
                },
            };
            if matches!(msg, Msg::Tick) {
                tick += 1;
                dlwatch_logging::set_poll_tick(tick);
            }
            let (next, effects) = update(state, msg);
            state = next;
            for effect in effects {
                self.dispatch(effect);
            }
            if state.consume_dirty() {
                self.surface.render(&state.view());
            }
        }
        watch_debug!("dispatch loop stopped");
    }

    fn spawn_ticker(&self) {
        let msg_tx = self.msg_tx.clone();
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            // Skip, not burst, if a tick's work overran the interval.
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = interval.tick() => {
                        if msg_tx.send(Msg::Tick).is_err() {
                            break;
                        }
                    }
                }
            }
        });
    }

    /// Network effects run fire-and-forget: no job's poll blocks another's,
    /// and a failing one only ever affects its own entry.
    fn dispatch(&self, effect: Effect) {
        match effect {
            Effect::SubmitJob { url } => {
                let api = self.api.clone();
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let result = api.submit(&url).await.map_err(submit_message);
                    let _ = tx.send(Msg::SubmitCompleted { result });
                });
            }
            Effect::PollStatus { id, seq } => {
                let api = self.api.clone();
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let outcome = match api.status(&id).await {
                        Ok(snapshot) => Ok(snapshot),
                        Err(ApiError::NotFound) => Err(PollError::NotFound),
                        Err(err) => {
                            // Routine polling stays quiet on blips; the job is
                            // retried next tick.
                            watch_warn!(
                                "status poll failed tick={} id={id}: {err}",
                                dlwatch_logging::get_poll_tick()
                            );
                            Err(PollError::Transport(err.to_string()))
                        }
                    };
                    let _ = tx.send(Msg::StatusFetched { id, seq, outcome });
                });
            }
            Effect::FetchList => {
                let api = self.api.clone();
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let outcome = api.list().await.map_err(|err| {
                        watch_warn!("listing fetch failed: {err}");
                        err.to_string()
                    });
                    let _ = tx.send(Msg::ListFetched { outcome });
                });
            }
            Effect::ConfirmDelete { file_path } => {
                if self.surface.confirm_delete(&file_path) {
                    let _ = self.msg_tx.send(Msg::DeleteConfirmed { file_path });
                }
            }
            Effect::DeleteArtifact { file_path } => {
                let api = self.api.clone();
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let result = api.delete(&file_path).await.map_err(delete_message);
                    let _ = tx.send(Msg::DeleteCompleted { file_path, result });
                });
            }
            Effect::Notify { level, message } => self.surface.notify(level, &message),
        }
    }
}

fn submit_message(err: ApiError) -> String {
    match err {
        ApiError::Validation(msg) | ApiError::Logical(msg) => msg,
        ApiError::Transport(_) | ApiError::NotFound => {
            "An error occurred while processing your request".to_string()
        }
    }
}

fn delete_message(err: ApiError) -> String {
    match err {
        ApiError::Validation(msg) | ApiError::Logical(msg) => msg,
        ApiError::Transport(_) | ApiError::NotFound => {
            "An error occurred while deleting the file".to_string()
        }
    }
}
