//! Property-based invariant tests for `TourSession`.
//!
//! 1. `open()` from closed always lands on index 0
//! 2. `next()` n-1 times reaches the last step, one more reports the end
//! 3. `previous()` at index 0 is a no-op
//! 4. `goto(k)` outside `[0, n)` leaves the index unchanged
//! 5. `close()` is idempotent
//! 6. No operation sequence breaks `index < n` while open

use proptest::prelude::*;
use waypoint_core::session::{TourEvent, TourSession};
use waypoint_core::step::{Step, StepList};

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Open,
    Next,
    Previous,
    Goto(usize),
    Close,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Open),
        Just(Op::Next),
        Just(Op::Previous),
        (0usize..40).prop_map(Op::Goto),
        Just(Op::Close),
    ]
}

fn steps(n: usize) -> StepList {
    let steps: Vec<Step> = (0..n)
        .map(|i| {
            let id: &'static str = Box::leak(format!("step-{i}").into_boxed_str());
            Step::new(id, "title", "description")
        })
        .collect();
    StepList::new(steps).expect("generated ids are unique")
}

/// Drive the session the way the engine does: `ReachedEnd` closes.
fn apply(session: &mut TourSession, op: &Op) {
    let event = match op {
        Op::Open => session.open(),
        Op::Next => session.next(),
        Op::Previous => session.previous(),
        Op::Goto(k) => session.goto(*k),
        Op::Close => session.close(),
    };
    if let Some(TourEvent::ReachedEnd { .. }) = event {
        session.close();
    }
}

// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn open_from_closed_is_index_zero(n in 1usize..30, ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut session = TourSession::new(steps(n));
        for op in &ops {
            apply(&mut session, op);
        }
        session.close();
        prop_assert_eq!(session.open(), Some(TourEvent::Opened));
        prop_assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn next_reaches_last_then_ends(n in 1usize..30) {
        let mut session = TourSession::new(steps(n));
        session.open();
        for _ in 0..n - 1 {
            let is_step_changed = matches!(session.next(), Some(TourEvent::StepChanged { .. }));
            prop_assert!(is_step_changed);
        }
        prop_assert_eq!(session.current_index(), n - 1);
        prop_assert_eq!(session.next(), Some(TourEvent::ReachedEnd { last: n - 1 }));
    }

    #[test]
    fn previous_at_zero_is_noop(n in 1usize..30) {
        let mut session = TourSession::new(steps(n));
        session.open();
        prop_assert_eq!(session.previous(), None);
        prop_assert_eq!(session.current_index(), 0);
        prop_assert!(session.is_open());
    }

    #[test]
    fn goto_out_of_range_is_rejected(n in 1usize..30, start in 0usize..30, k in 0usize..200) {
        let mut session = TourSession::new(steps(n));
        session.open();
        session.goto(start % n);
        let before = session.current_index();
        let k = n + k;
        prop_assert_eq!(session.goto(k), None);
        prop_assert_eq!(session.current_index(), before);
    }

    #[test]
    fn close_is_idempotent(n in 1usize..30, ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut session = TourSession::new(steps(n));
        for op in &ops {
            apply(&mut session, op);
        }
        session.close();
        let snapshot = (session.is_open(), session.current_index());
        prop_assert_eq!(session.close(), None);
        prop_assert_eq!((session.is_open(), session.current_index()), snapshot);
    }

    #[test]
    fn index_in_bounds_while_open(n in 1usize..30, ops in prop::collection::vec(op_strategy(), 0..80)) {
        let mut session = TourSession::new(steps(n));
        for op in &ops {
            apply(&mut session, op);
            if session.is_open() {
                prop_assert!(session.current_index() < n);
                prop_assert!(session.current_step().is_some());
            }
        }
    }

    #[test]
    fn rapid_next_closes_exactly_once(n in 1usize..20, extra in 1usize..20) {
        let mut session = TourSession::new(steps(n));
        session.open();
        let mut closes = 0;
        for _ in 0..(n - 1 + extra) {
            if let Some(TourEvent::ReachedEnd { .. }) = session.next()
                && session.close().is_some()
            {
                closes += 1;
            }
        }
        prop_assert_eq!(closes, 1);
        prop_assert!(!session.is_open());
        prop_assert_eq!(session.current_index(), n - 1);
    }
}
