// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use mindcanvas_timing::Debouncer;

/// Decides when to save: a burst of changes produces one save, a fixed delay
/// after the last change.
///
/// Changes are detected by comparing revision counters, so the caller only
/// reports the current revisions of whatever it persists.
#[derive(Clone, Debug)]
pub struct AutoSave {
    debouncer: Debouncer,
    saved: Option<(u64, u64)>,
    seen: Option<(u64, u64)>,
}

impl AutoSave {
    /// Creates an autosave that waits `delay_ms` after the last change.
    #[must_use]
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            debouncer: Debouncer::new(delay_ms),
            saved: None,
            seen: None,
        }
    }

    /// Records the revisions that are already persisted (after a load or a
    /// save), so they do not trigger another save.
    pub fn mark_saved(&mut self, store_revision: u64, view_revision: u64) {
        let revisions = (store_revision, view_revision);
        self.saved = Some(revisions);
        self.seen = Some(revisions);
        self.debouncer.cancel();
    }

    /// Reports the current revisions at time `now`. Any difference from the
    /// last report (re)starts the delay.
    pub fn observe(&mut self, store_revision: u64, view_revision: u64, now: u64) {
        let revisions = (store_revision, view_revision);
        if self.seen == Some(revisions) {
            return;
        }
        self.seen = Some(revisions);
        if self.saved == Some(revisions) {
            self.debouncer.cancel();
        } else {
            self.debouncer.schedule(now);
        }
    }

    /// Returns `true` once the delay has passed since the last change; the
    /// caller should save now.
    pub fn poll(&mut self, now: u64) -> bool {
        self.debouncer.poll(now)
    }

    /// Returns `true` if a save is scheduled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
