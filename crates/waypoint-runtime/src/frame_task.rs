#![forbid(unsafe_code)]

//! A self-rescheduling unit of work on the host's frame clock.
//!
//! [`FrameTask`] owns at most one outstanding [`FrameHandle`]. The owner
//! schedules the next tick only after the current one has run, so there is
//! never more than one pending callback, and cancelling is a single
//! `cancel_frame` call.
//!
//! # Invariants
//!
//! 1. At most one handle is pending at any time.
//! 2. `schedule` on a task that is already pending cancels the old handle
//!    first, so rapid re-activation never stacks loops.
//! 3. `accept` consumes the pending handle only if it matches; callbacks
//!    for cancelled or superseded handles are reported as stale.
//! 4. Dropping a task does not cancel its handle (there is no host to call);
//!    owners cancel explicitly, typically from their own `Drop`.

use crate::host::{FrameHandle, FrameScheduler};

/// Pending-frame bookkeeping for one repeating task.
#[derive(Debug, Default)]
pub struct FrameTask {
    pending: Option<FrameHandle>,
    scheduled: u64,
    cancelled: u64,
}

impl FrameTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the next frame, replacing any pending request.
    pub fn schedule<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) -> FrameHandle {
        self.cancel(scheduler);
        let handle = scheduler.request_frame();
        self.pending = Some(handle);
        self.scheduled += 1;
        tracing::trace!(%handle, "frame scheduled");
        handle
    }

    /// Cancel the pending request, if any. Returns whether one was pending.
    pub fn cancel<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        match self.pending.take() {
            Some(handle) => {
                scheduler.cancel_frame(handle);
                self.cancelled += 1;
                tracing::trace!(%handle, "frame cancelled");
                true
            }
            None => false,
        }
    }

    /// Claim a delivered frame. `false` means the callback is stale.
    pub fn accept(&mut self, handle: FrameHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Total requests made over the task's lifetime.
    pub fn scheduled_count(&self) -> u64 {
        self.scheduled
    }

    /// Total cancellations over the task's lifetime.
    pub fn cancelled_count(&self) -> u64 {
        self.cancelled
    }
}
