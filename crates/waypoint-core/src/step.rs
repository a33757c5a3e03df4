#![forbid(unsafe_code)]

//! Step descriptors and validated step lists.
//!
//! Steps are plain data built with `const` builders so registries can live
//! in `static` slices:
//!
//! ```
//! use waypoint_core::step::{Anchor, Step};
//!
//! static STEPS: &[Step] = &[
//!     Step::new("welcome", "Welcome", "A quick look around."),
//!     Step::new("upload", "Upload", "Drop a CSV here.")
//!         .target("#upload-zone")
//!         .position(Anchor::Right),
//! ];
//! assert_eq!(STEPS.len(), 2);
//! ```

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;

use crate::app_state::StateFlag;
use crate::error::RegistryError;

/// Opaque reference to a UI element, resolved by the host.
///
/// For web hosts this is a CSS selector; other hosts may use any naming
/// scheme. The engine never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetRef(&'static str);

impl TargetRef {
    pub const fn new(selector: &'static str) -> Self {
        Self(selector)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Side of the target the card is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
    /// Centered in the viewport; the target (if any) is still highlighted.
    Center,
}

/// One explanation bound to at most one UI element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub id: &'static str,
    pub target: Option<TargetRef>,
    pub title: &'static str,
    pub description: &'static str,
    pub position: Anchor,
    /// Milestone this step talks about. Advisory only.
    pub required_state: Option<StateFlag>,
    /// Instruction shown only when `allow_interaction` is set.
    pub action_hint: Option<&'static str>,
    /// Let pointer events reach the highlighted element.
    pub allow_interaction: bool,
}

impl Step {
    /// A centered step with no target.
    pub const fn new(id: &'static str, title: &'static str, description: &'static str) -> Self {
        Self {
            id,
            target: None,
            title,
            description,
            position: Anchor::Bottom,
            required_state: None,
            action_hint: None,
            allow_interaction: false,
        }
    }

    #[must_use]
    pub const fn target(mut self, selector: &'static str) -> Self {
        self.target = Some(TargetRef::new(selector));
        self
    }

    #[must_use]
    pub const fn position(mut self, position: Anchor) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub const fn requires(mut self, flag: StateFlag) -> Self {
        self.required_state = Some(flag);
        self
    }

    /// Allow interaction with the highlighted element and show `hint`.
    #[must_use]
    pub const fn interactive(mut self, hint: &'static str) -> Self {
        self.action_hint = Some(hint);
        self.allow_interaction = true;
        self
    }

    /// The hint to display, honoring `allow_interaction`.
    pub fn visible_action_hint(&self) -> Option<&'static str> {
        if self.allow_interaction {
            self.action_hint
        } else {
            None
        }
    }
}

/// An ordered, immutable list of steps with unique ids.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepList {
    steps: Cow<'static, [Step]>,
}

impl StepList {
    /// Validate and wrap a list of steps.
    pub fn new(steps: impl Into<Cow<'static, [Step]>>) -> Result<Self, RegistryError> {
        let steps = steps.into();
        let mut seen = HashSet::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            if step.id.is_empty() {
                return Err(RegistryError::EmptyStepId { index });
            }
            if !seen.insert(step.id) {
                return Err(RegistryError::DuplicateStepId {
                    id: step.id.to_string(),
                    index,
                });
            }
        }
        Ok(Self { steps })
    }

    /// An empty list. Sessions over it never render.
    pub const fn empty() -> Self {
        Self {
            steps: Cow::Borrowed(&[]),
        }
    }

    /// Position of the step with `id`.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.id == id)
    }
}

impl Deref for StepList {
    type Target = [Step];

    fn deref(&self) -> &[Step] {
        &self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static GOOD: &[Step] = &[
        Step::new("a", "A", "first"),
        Step::new("b", "B", "second").target("#b").position(Anchor::Left),
    ];

    static DUPLICATE: &[Step] = &[
        Step::new("a", "A", "first"),
        Step::new("b", "B", "second"),
        Step::new("a", "A again", "third"),
    ];

    #[test]
    fn builder_sets_fields() {
        let step = Step::new("pca", "PCA", "Scores plot")
            .target("#pca-scores")
            .position(Anchor::Right)
            .requires(StateFlag::PcaComputed)
            .interactive("Click a point");
        assert_eq!(step.target, Some(TargetRef::new("#pca-scores")));
        assert_eq!(step.position, Anchor::Right);
        assert_eq!(step.required_state, Some(StateFlag::PcaComputed));
        assert!(step.allow_interaction);
        assert_eq!(step.visible_action_hint(), Some("Click a point"));
    }

    #[test]
    fn action_hint_hidden_without_interaction() {
        let mut step = Step::new("x", "X", "x").interactive("do it");
        step.allow_interaction = false;
        assert_eq!(step.visible_action_hint(), None);
    }

    #[test]
    fn list_accepts_unique_ids() {
        let list = StepList::new(GOOD).expect("valid list");
        assert_eq!(list.len(), 2);
        assert_eq!(list.index_of("b"), Some(1));
        assert_eq!(list.index_of("zzz"), None);
    }

    #[test]
    fn list_rejects_duplicate_ids() {
        let err = StepList::new(DUPLICATE).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateStepId {
                id: "a".into(),
                index: 2
            }
        );
    }

    #[test]
    fn list_rejects_empty_id() {
        let err = StepList::new(vec![Step::new("", "t", "d")]).unwrap_err();
        assert_eq!(err, RegistryError::EmptyStepId { index: 0 });
    }

    #[test]
    fn empty_list_derefs_to_empty_slice() {
        assert!(StepList::empty().is_empty());
        assert_eq!(StepList::default(), StepList::empty());
    }
}
