use std::collections::BTreeMap;

use crate::view_model::{pending_card, status_card, AppViewModel, ListView};
use crate::{JobId, StatusSnapshot, SurfaceId};

/// Ticks a terminal job stays tracked before eviction: a 10 second grace
/// window at the 2 second poll cadence.
pub const GRACE_TICKS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TrackedJob {
    pub(crate) url: String,
    pub(crate) surface: SurfaceId,
    pub(crate) snapshot: Option<StatusSnapshot>,
    /// Sequence number of the last applied poll response; older responses
    /// are dropped (out-of-order guard).
    pub(crate) last_applied_seq: u64,
    /// Tick at which the entry is purged, set on the first terminal
    /// observation and never reset.
    pub(crate) evict_at: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingSubmission {
    pub(crate) url: String,
    pub(crate) surface: SurfaceId,
}

/// Whole client-side tracking state. The registry holds exactly the jobs the
/// client believes may still be live or inside their post-terminal grace
/// window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    registry: BTreeMap<JobId, TrackedJob>,
    pending: Option<PendingSubmission>,
    list: ListView,
    now: u64,
    next_surface: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let mut cards = Vec::with_capacity(self.registry.len() + 1);
        if let Some(pending) = &self.pending {
            cards.push(pending_card(pending.surface, &pending.url));
        }
        for job in self.registry.values() {
            cards.push(status_card(job.surface, &job.url, job.snapshot.as_ref()));
        }
        AppViewModel {
            input_enabled: self.pending.is_none(),
            cards,
            list: self.list.clone(),
            tracked_count: self.registry.len(),
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and clears it. The driver re-renders only when
    /// this reports true.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_tracked(&self, id: &JobId) -> bool {
        self.registry.contains_key(id)
    }

    pub fn tracked_count(&self) -> usize {
        self.registry.len()
    }

    pub(crate) fn submission_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Allocates a surface for an optimistic submission card and disables
    /// further intake until the round trip resolves.
    pub(crate) fn begin_submission(&mut self, url: String) -> SurfaceId {
        self.next_surface += 1;
        let surface = SurfaceId(self.next_surface);
        self.pending = Some(PendingSubmission { url, surface });
        self.dirty = true;
        surface
    }

    /// Ends the in-flight submission either way; the input re-enables because
    /// the pending slot empties.
    pub(crate) fn take_pending(&mut self) -> Option<PendingSubmission> {
        let pending = self.pending.take();
        if pending.is_some() {
            self.dirty = true;
        }
        pending
    }

    /// Registers a server-accepted job, keeping the surface allocated at
    /// submission time.
    pub(crate) fn register(&mut self, id: JobId, pending: PendingSubmission) {
        self.registry.insert(
            id,
            TrackedJob {
                url: pending.url,
                surface: pending.surface,
                snapshot: None,
                last_applied_seq: 0,
                evict_at: None,
            },
        );
        self.dirty = true;
    }

    /// Advances the tick counter and returns the new value, used as the
    /// sequence number for this tick's polls.
    pub(crate) fn advance_tick(&mut self) -> u64 {
        self.now += 1;
        self.now
    }

    /// Purges entries whose grace window has elapsed.
    pub(crate) fn evict_due(&mut self) {
        let now = self.now;
        let before = self.registry.len();
        self.registry
            .retain(|_, job| job.evict_at.map_or(true, |at| at > now));
        if self.registry.len() != before {
            self.dirty = true;
        }
    }

    /// Jobs to poll this tick, each tagged with the current sequence number.
    pub(crate) fn poll_targets(&self) -> Vec<(JobId, u64)> {
        self.registry
            .keys()
            .map(|id| (id.clone(), self.now))
            .collect()
    }

    /// Applies a poll response. Drops responses for ids no longer tracked and
    /// responses older than the last applied one. The first terminal
    /// observation arms the eviction deadline; later ones never move it.
    pub(crate) fn apply_snapshot(&mut self, id: &JobId, seq: u64, snapshot: StatusSnapshot) {
        let now = self.now;
        let Some(job) = self.registry.get_mut(id) else {
            return;
        };
        if seq < job.last_applied_seq {
            return;
        }
        job.last_applied_seq = seq;
        if snapshot.status.is_terminal() && job.evict_at.is_none() {
            job.evict_at = Some(now + GRACE_TICKS);
        }
        job.snapshot = Some(snapshot);
        self.dirty = true;
    }

    /// Removes a job out of band (server no longer knows it). Any armed
    /// eviction deadline goes with the entry.
    pub(crate) fn purge(&mut self, id: &JobId) {
        if self.registry.remove(id).is_some() {
            self.dirty = true;
        }
    }

    pub(crate) fn set_list(&mut self, list: ListView) {
        if self.list != list {
            self.list = list;
            self.dirty = true;
        }
    }
}
