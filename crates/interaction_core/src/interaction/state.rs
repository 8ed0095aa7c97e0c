//! Interaction states

use std::fmt;

/// Interactor lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractorState {
    /// Live, no target
    #[default]
    Normal,
    /// Targeting an interactable
    Hover,
    /// Committed to a grab or touch, possibly of nothing
    Select,
    /// Switched off; ignores every update
    Disabled,
}

/// Interactable state, derived from its membership sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractableState {
    /// Nobody hovering or selecting
    #[default]
    Normal,
    /// At least one hovering interactor
    Hover,
    /// At least one selecting interactor
    Select,
    /// Switched off; never a candidate
    Disabled,
}

impl fmt::Display for InteractorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for InteractableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Payload of a state-changed notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange<S> {
    /// State before the transition
    pub previous: S,
    /// State after the transition
    pub new: S,
}

impl<S: Copy + PartialEq> StateChange<S> {
    /// Build a change, `None` when nothing changed
    pub fn between(previous: S, new: S) -> Option<Self> {
        (previous != new).then_some(Self { previous, new })
    }
}
