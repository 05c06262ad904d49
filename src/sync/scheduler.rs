//! Debounced outward-emission scheduling.
//!
//! The scheduler decides *when* a changed model is pushed to the host:
//! after a short quiet window since the last qualifying change, so
//! per-keystroke edits coalesce into one outward update. Time is injected
//! through [`Instant`] arguments rather than read from a clock, keeping the
//! scheduler deterministic under test; the host drives it from whatever
//! timer source it has.

use std::time::{Duration, Instant};

/// Delay after the last qualifying change before an outward push commits.
pub const QUIET_WINDOW: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy)]
struct PendingEmit {
    fingerprint: u64,
    deadline: Instant,
}

/// Tracks the last pushed model fingerprint and the pending debounce
/// deadline, if any.
#[derive(Debug, Clone)]
pub struct EmitScheduler {
    quiet_window: Duration,
    last_pushed: Option<u64>,
    pending: Option<PendingEmit>,
}

impl Default for EmitScheduler {
    fn default() -> Self {
        Self::new(QUIET_WINDOW)
    }
}

impl EmitScheduler {
    pub fn new(quiet_window: Duration) -> Self {
        Self {
            quiet_window,
            last_pushed: None,
            pending: None,
        }
    }

    /// Records that the model now fingerprints to `fingerprint`.
    ///
    /// A change back to the last pushed state cancels any pending push;
    /// anything else arms (or re-arms) the quiet-window deadline, so a
    /// later change within the window resets the timer.
    pub fn note_change(&mut self, fingerprint: u64, now: Instant) {
        if self.last_pushed == Some(fingerprint) {
            self.pending = None;
            return;
        }
        self.pending = Some(PendingEmit {
            fingerprint,
            deadline: now + self.quiet_window,
        });
    }

    /// Aligns the scheduler with a state that arrived from outside (an
    /// inbound re-projection): that state is by definition already pushed.
    pub fn sync_to(&mut self, fingerprint: u64) {
        self.last_pushed = Some(fingerprint);
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.pending.is_some_and(|p| now >= p.deadline)
    }

    /// Consumes the pending emission if its deadline has passed, recording
    /// its fingerprint as pushed. Returns whether the caller should emit.
    pub fn take_due(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.take_now()
    }

    /// Consumes the pending emission immediately, deadline or not. Used on
    /// unmount and explicit flush so pending pushes are executed rather
    /// than dropped.
    pub fn take_now(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                self.last_pushed = Some(pending.fingerprint);
                true
            }
            None => false,
        }
    }

    pub fn last_pushed(&self) -> Option<u64> {
        self.last_pushed
    }
}
