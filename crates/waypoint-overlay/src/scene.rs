#![forbid(unsafe_code)]

//! Overlay scene composition.
//!
//! [`OverlayScene::compose`] is a pure function from a [`TourView`] to the
//! layers a host draws: a full-viewport scrim, an optional cut-out around
//! the target, and the explanation card with its text and controls.
//!
//! # Invariants
//!
//! 1. No view, no scene: a closed or empty tour draws nothing.
//! 2. The cut-out exists exactly when the target resolved this frame.
//! 3. The action hint appears only on steps that allow interaction, and the
//!    cut-out passes pointer events through only on those steps.
//! 4. The previous control is disabled on the first step; the next control
//!    reads `Finish` on the last.

use waypoint_core::app_state::StateFlag;
use waypoint_core::geometry::BoundingBox;
use waypoint_core::step::Anchor;
use waypoint_core::view::TourView;

/// Label of the next control on every step but the last.
pub const NEXT_LABEL: &str = "Next";
/// Label of the next control on the last step.
pub const FINISH_LABEL: &str = "Finish";
/// Label of the previous control.
pub const BACK_LABEL: &str = "Back";

/// Presentation knobs that do not affect geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    /// Scrim opacity in `[0, 1]`.
    pub scrim_opacity: f64,
    /// Draw one dot per step under the text.
    pub show_progress_dots: bool,
    /// Keyboard reminder shown in the card footer.
    pub key_hint: Option<&'static str>,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            scrim_opacity: 0.6,
            show_progress_dots: true,
            key_hint: Some("←/→ move · Esc close"),
        }
    }
}

impl OverlayStyle {
    #[must_use]
    pub fn scrim_opacity(mut self, opacity: f64) -> Self {
        self.scrim_opacity = opacity;
        self
    }

    #[must_use]
    pub fn show_progress_dots(mut self, show: bool) -> Self {
        self.show_progress_dots = show;
        self
    }

    #[must_use]
    pub fn key_hint(mut self, hint: Option<&'static str>) -> Self {
        self.key_hint = hint;
        self
    }
}

/// Hole in the scrim around the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cutout {
    pub rect: BoundingBox,
    /// Pointer events inside reach the page.
    pub pass_through: bool,
}

/// One progress dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressDot {
    Done,
    Current,
    Upcoming,
}

impl ProgressDot {
    pub const fn glyph(self) -> char {
        match self {
            Self::Done => '•',
            Self::Current => '●',
            Self::Upcoming => '○',
        }
    }
}

/// The explanation card.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub rect: BoundingBox,
    pub anchor: Anchor,
    pub step_id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// `"current / total"`, 1-based.
    pub progress: String,
    pub dots: Vec<ProgressDot>,
    pub previous_enabled: bool,
    pub next_label: &'static str,
    pub action_hint: Option<&'static str>,
    /// Milestone the step mentions that the app has not reached yet.
    pub waiting_for: Option<StateFlag>,
    pub key_hint: Option<&'static str>,
}

impl Card {
    /// `"Waiting for ..."` line, if any.
    pub fn waiting_hint(&self) -> Option<String> {
        self.waiting_for
            .map(|flag| format!("Waiting for {}.", flag.label()))
    }
}

/// Everything drawn for one frame of an open tour.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayScene {
    /// Scrim extent: the whole viewport.
    pub scrim: BoundingBox,
    pub scrim_opacity: f64,
    pub cutout: Option<Cutout>,
    pub card: Card,
}

impl OverlayScene {
    /// Build the scene for `view`; `None` when nothing should be drawn.
    pub fn compose(view: Option<TourView<'_>>, style: &OverlayStyle) -> Option<Self> {
        let view = view?;
        if view.total == 0 {
            return None;
        }
        let step = view.step;
        let geometry = view.geometry;

        let dots = if style.show_progress_dots {
            (0..view.total)
                .map(|i| match i.cmp(&view.index) {
                    std::cmp::Ordering::Less => ProgressDot::Done,
                    std::cmp::Ordering::Equal => ProgressDot::Current,
                    std::cmp::Ordering::Greater => ProgressDot::Upcoming,
                })
                .collect()
        } else {
            Vec::new()
        };

        Some(Self {
            scrim: geometry.viewport.bounds(),
            scrim_opacity: style.scrim_opacity.clamp(0.0, 1.0),
            cutout: geometry.highlight.map(|rect| Cutout {
                rect,
                pass_through: step.allow_interaction,
            }),
            card: Card {
                rect: geometry.card.bounds(),
                anchor: geometry.card.anchor,
                step_id: step.id,
                title: step.title,
                description: step.description,
                progress: format!("{} / {}", view.index + 1, view.total),
                dots,
                previous_enabled: !view.is_first(),
                next_label: if view.is_last() {
                    FINISH_LABEL
                } else {
                    NEXT_LABEL
                },
                action_hint: step.visible_action_hint(),
                waiting_for: view.waiting_for,
                key_hint: style.key_hint,
            },
        })
    }
}
