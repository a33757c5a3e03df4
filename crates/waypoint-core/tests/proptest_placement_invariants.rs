//! Property-based invariant tests for card placement.
//!
//! 1. The card stays inside the viewport margins whenever it fits
//! 2. A missing target always centers the card
//! 3. Placement is deterministic
//! 4. No panics on hostile inputs (NaN, negative sizes, tiny viewports)

use proptest::prelude::*;
use waypoint_core::geometry::{BoundingBox, Size, Viewport};
use waypoint_core::placement::place_card;
use waypoint_core::step::Anchor;

const EPS: f64 = 1e-6;

fn anchor_strategy() -> impl Strategy<Value = Anchor> {
    prop_oneof![
        Just(Anchor::Top),
        Just(Anchor::Bottom),
        Just(Anchor::Left),
        Just(Anchor::Right),
        Just(Anchor::Center),
    ]
}

fn box_strategy() -> impl Strategy<Value = BoundingBox> {
    (-3000.0f64..5000.0, -3000.0f64..5000.0, 0.0f64..2000.0, 0.0f64..2000.0)
        .prop_map(|(l, t, w, h)| BoundingBox::new(l, t, w, h))
}

proptest! {
    #[test]
    fn card_stays_within_viewport(
        target in prop::option::of(box_strategy()),
        anchor in anchor_strategy(),
        card_w in 1.0f64..600.0,
        card_h in 1.0f64..400.0,
        margin in 0.0f64..40.0,
        extra_w in 0.0f64..2000.0,
        extra_h in 0.0f64..2000.0,
    ) {
        let viewport = Viewport::new(card_w + margin * 2.0 + extra_w, card_h + margin * 2.0 + extra_h);
        let placed = place_card(target, anchor, Size::new(card_w, card_h), margin, viewport);

        prop_assert!(placed.left >= margin);
        prop_assert!(placed.left <= viewport.width - placed.width - margin + EPS);
        prop_assert!(placed.top >= margin);
        prop_assert!(placed.top <= viewport.height - placed.height - margin + EPS);
        prop_assert!((placed.width - card_w).abs() < EPS);
    }

    #[test]
    fn missing_target_is_centered(
        anchor in anchor_strategy(),
        vw in 500.0f64..3000.0,
        vh in 400.0f64..2000.0,
    ) {
        let placed = place_card(None, anchor, Size::new(360.0, 220.0), 16.0, Viewport::new(vw, vh));
        prop_assert_eq!(placed.anchor, Anchor::Center);
        prop_assert!((placed.left - (vw - 360.0) / 2.0).abs() < 1e-9);
        prop_assert!((placed.top - (vh - 220.0) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn placement_is_deterministic(
        target in prop::option::of(box_strategy()),
        anchor in anchor_strategy(),
    ) {
        let viewport = Viewport::new(1280.0, 800.0);
        let a = place_card(target, anchor, Size::new(360.0, 220.0), 16.0, viewport);
        let b = place_card(target, anchor, Size::new(360.0, 220.0), 16.0, viewport);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn hostile_inputs_do_not_panic(
        l in prop::num::f64::ANY,
        t in prop::num::f64::ANY,
        w in prop::num::f64::ANY,
        h in prop::num::f64::ANY,
        vw in prop::num::f64::ANY,
        vh in prop::num::f64::ANY,
        anchor in anchor_strategy(),
    ) {
        let _ = place_card(
            Some(BoundingBox::new(l, t, w, h)),
            anchor,
            Size::new(360.0, 220.0),
            16.0,
            Viewport::new(vw, vh),
        );
    }
}
