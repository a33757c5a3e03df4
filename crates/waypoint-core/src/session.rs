#![forbid(unsafe_code)]

//! Tour session state machine.
//!
//! ```text
//! CLOSED --open()--> OPEN(0)
//! OPEN(i) --next()--> OPEN(i+1)           i < last
//! OPEN(last) --next()--> ReachedEnd       caller closes
//! OPEN(i) --previous()--> OPEN(max(i-1, 0))
//! OPEN(*) --close()--> CLOSED
//! ```
//!
//! # Invariants
//!
//! 1. `current_index < len(steps)` whenever the session is open and the
//!    list is non-empty.
//! 2. Every transition is total: out-of-range input is a no-op that
//!    returns `None`, never a panic.
//! 3. A transition returns `Some(event)` exactly when observable state
//!    changed (or, for `next()` at the last step, when the end was reached).

use crate::step::{Step, StepList};

/// Why the current step changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceReason {
    Next,
    Previous,
    Jump,
}

impl AdvanceReason {
    /// Short label for logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "previous",
            Self::Jump => "jump",
        }
    }
}

/// Outcome of a session transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourEvent {
    /// Session went from closed to open at index 0.
    Opened,
    /// The active step changed.
    StepChanged {
        from: usize,
        to: usize,
        reason: AdvanceReason,
    },
    /// `next()` was called on the last step. State is unchanged; the owner
    /// is expected to close the session.
    ReachedEnd { last: usize },
    /// Session went from open to closed.
    Closed { at: usize },
    /// The step list was swapped and the index reset to 0.
    StepsReplaced { len: usize },
}

/// Open/closed, indexed state of one tour instance.
#[derive(Debug, Clone, Default)]
pub struct TourSession {
    steps: StepList,
    current_index: usize,
    open: bool,
}

impl TourSession {
    /// A closed session over `steps`.
    pub fn new(steps: StepList) -> Self {
        Self {
            steps,
            current_index: 0,
            open: false,
        }
    }

    /// Whether `open()` has been called without a matching `close()`.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open and non-empty: something should be drawn.
    pub fn is_visible(&self) -> bool {
        self.open && !self.steps.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &StepList {
        &self.steps
    }

    /// The active step, if the session is visible.
    pub fn current_step(&self) -> Option<&Step> {
        if !self.open {
            return None;
        }
        self.steps.get(self.current_index)
    }

    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.steps.len()
    }

    /// Closed -> open at index 0. No-op when already open.
    pub fn open(&mut self) -> Option<TourEvent> {
        if self.open {
            return None;
        }
        self.open = true;
        self.current_index = 0;
        Some(TourEvent::Opened)
    }

    /// Advance one step, or report the end of the list.
    pub fn next(&mut self) -> Option<TourEvent> {
        if !self.is_visible() {
            return None;
        }
        let from = self.current_index;
        if from + 1 >= self.steps.len() {
            return Some(TourEvent::ReachedEnd { last: from });
        }
        self.current_index += 1;
        Some(TourEvent::StepChanged {
            from,
            to: self.current_index,
            reason: AdvanceReason::Next,
        })
    }

    /// Go back one step. No-op at the first step.
    pub fn previous(&mut self) -> Option<TourEvent> {
        if !self.is_visible() || self.current_index == 0 {
            return None;
        }
        let from = self.current_index;
        self.current_index -= 1;
        Some(TourEvent::StepChanged {
            from,
            to: self.current_index,
            reason: AdvanceReason::Previous,
        })
    }

    /// Jump to `index`. Rejected when out of range or already there.
    pub fn goto(&mut self, index: usize) -> Option<TourEvent> {
        if !self.is_visible() || index >= self.steps.len() || index == self.current_index {
            return None;
        }
        let from = self.current_index;
        self.current_index = index;
        Some(TourEvent::StepChanged {
            from,
            to: index,
            reason: AdvanceReason::Jump,
        })
    }

    /// Open -> closed. Keeps the index; the next `open()` resets it.
    pub fn close(&mut self) -> Option<TourEvent> {
        if !self.open {
            return None;
        }
        self.open = false;
        Some(TourEvent::Closed {
            at: self.current_index,
        })
    }

    /// Swap the step list and reset the index. The open flag is kept.
    pub fn replace_steps(&mut self, steps: StepList) -> Option<TourEvent> {
        if steps == self.steps {
            return None;
        }
        self.steps = steps;
        self.current_index = 0;
        Some(TourEvent::StepsReplaced {
            len: self.steps.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static THREE: &[Step] = &[
        Step::new("one", "One", "first"),
        Step::new("two", "Two", "second").target("#two"),
        Step::new("three", "Three", "third"),
    ];

    static OTHER: &[Step] = &[Step::new("solo", "Solo", "only")];

    fn session() -> TourSession {
        TourSession::new(StepList::new(THREE).expect("valid steps"))
    }

    #[test]
    fn created_closed() {
        let s = session();
        assert!(!s.is_open());
        assert!(s.current_step().is_none());
        assert_eq!(s.total_steps(), 3);
    }

    #[test]
    fn open_resets_index_and_is_idempotent() {
        let mut s = session();
        assert_eq!(s.open(), Some(TourEvent::Opened));
        let _ = s.next();
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.open(), None);
        assert_eq!(s.current_index(), 1);

        let _ = s.close();
        assert_eq!(s.open(), Some(TourEvent::Opened));
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn next_walks_then_reports_end() {
        let mut s = session();
        s.open();
        assert_eq!(
            s.next(),
            Some(TourEvent::StepChanged {
                from: 0,
                to: 1,
                reason: AdvanceReason::Next
            })
        );
        let _ = s.next();
        assert_eq!(s.current_index(), 2);
        assert_eq!(s.next(), Some(TourEvent::ReachedEnd { last: 2 }));
        assert_eq!(s.current_index(), 2);
        assert!(s.is_open());
    }

    #[test]
    fn previous_at_first_is_noop() {
        let mut s = session();
        s.open();
        assert_eq!(s.previous(), None);
        assert_eq!(s.current_index(), 0);
        let _ = s.next();
        assert_eq!(
            s.previous(),
            Some(TourEvent::StepChanged {
                from: 1,
                to: 0,
                reason: AdvanceReason::Previous
            })
        );
    }

    #[test]
    fn goto_rejects_out_of_range_and_same_index() {
        let mut s = session();
        s.open();
        assert_eq!(s.goto(3), None);
        assert_eq!(s.goto(usize::MAX), None);
        assert_eq!(s.goto(0), None);
        assert_eq!(s.current_index(), 0);
        assert!(s.goto(2).is_some());
        assert_eq!(s.current_index(), 2);
    }

    #[test]
    fn transitions_ignored_while_closed() {
        let mut s = session();
        assert_eq!(s.next(), None);
        assert_eq!(s.previous(), None);
        assert_eq!(s.goto(1), None);
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn close_twice_equals_once() {
        let mut s = session();
        s.open();
        let _ = s.next();
        assert_eq!(s.close(), Some(TourEvent::Closed { at: 1 }));
        let snapshot = (s.is_open(), s.current_index());
        assert_eq!(s.close(), None);
        assert_eq!((s.is_open(), s.current_index()), snapshot);
    }

    #[test]
    fn empty_session_open_but_not_visible() {
        let mut s = TourSession::new(StepList::empty());
        assert_eq!(s.open(), Some(TourEvent::Opened));
        assert!(s.is_open());
        assert!(!s.is_visible());
        assert!(s.current_step().is_none());
        assert_eq!(s.next(), None);
        assert_eq!(s.previous(), None);
        assert_eq!(s.goto(0), None);
    }

    #[test]
    fn replace_steps_resets_index() {
        let mut s = session();
        s.open();
        let _ = s.goto(2);
        let replaced = s.replace_steps(StepList::new(OTHER).expect("valid"));
        assert_eq!(replaced, Some(TourEvent::StepsReplaced { len: 1 }));
        assert_eq!(s.current_index(), 0);
        assert!(s.is_open());
        assert_eq!(s.current_step().map(|step| step.id), Some("solo"));
    }

    #[test]
    fn replace_with_same_list_is_noop() {
        let mut s = session();
        s.open();
        let _ = s.next();
        assert_eq!(s.replace_steps(StepList::new(THREE).expect("valid")), None);
        assert_eq!(s.current_index(), 1);
    }
}
