// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-action configuration and the prepared-action record.

use tactile_coords::Edges;
use tactile_modifiers::ModifierSpec;

/// The kinds of action an interactable can perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    /// Move the whole target.
    Drag,
    /// Move one or more of the target's edges.
    Resize,
    /// Multi-pointer transform (pinch/rotate).
    Gesture,
}

impl ActionKind {
    /// The minimum number of tracked pointers needed to start this action.
    #[must_use]
    pub fn min_pointers(self) -> usize {
        match self {
            Self::Gesture => 2,
            Self::Drag | Self::Resize => 1,
        }
    }

    /// The action's name, used as the event type prefix.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Drag => "drag",
            Self::Resize => "resize",
            Self::Gesture => "gesture",
        }
    }
}

/// The action an interaction has selected (but possibly not yet started).
///
/// `kind` is `None` while no action is offered; a failed start resets it to
/// `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActionState {
    /// The selected action, if any.
    pub kind: Option<ActionKind>,
    /// Active edges for resize actions.
    pub edges: Edges,
}

/// Configuration of the post-release glide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InertiaOptions {
    /// Whether releases may glide at all.
    pub enabled: bool,
    /// The lambda of the exponential decay.
    pub resistance: f64,
    /// Release speed must exceed this for inertia to start.
    pub min_speed: f64,
    /// The speed at which the glide is slow enough to stop.
    pub end_speed: f64,
    /// Allow a pointer-down on the gliding element to resume the action.
    pub allow_resume: bool,
    /// Duration in ms of the eased glide used when inertia does not start
    /// but an end-only modifier pass still changes the coordinates.
    pub smooth_end_duration: f64,
}

impl Default for InertiaOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            resistance: 10.0,
            min_speed: 100.0,
            end_speed: 10.0,
            allow_resume: true,
            smooth_end_duration: 300.0,
        }
    }
}

impl InertiaOptions {
    /// Default options (disabled).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the glide.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the decay lambda.
    #[must_use]
    pub fn resistance(mut self, resistance: f64) -> Self {
        self.resistance = resistance;
        self
    }

    /// Sets the activation speed threshold.
    #[must_use]
    pub fn min_speed(mut self, min_speed: f64) -> Self {
        self.min_speed = min_speed;
        self
    }

    /// Sets the glide stop speed.
    #[must_use]
    pub fn end_speed(mut self, end_speed: f64) -> Self {
        self.end_speed = end_speed;
        self
    }

    /// Allows or forbids resume-by-down.
    #[must_use]
    pub fn allow_resume(mut self, allow_resume: bool) -> Self {
        self.allow_resume = allow_resume;
        self
    }
}

/// Options for one action kind on one interactable.
#[derive(Clone, Debug, Default)]
pub struct ActionOptions {
    /// Disabled actions are silently skipped in `start`.
    pub enabled: bool,
    /// The modifier pipeline built for each action of this kind.
    pub modifiers: Vec<ModifierSpec>,
    /// Post-release glide configuration.
    pub inertia: InertiaOptions,
}

impl ActionOptions {
    /// Default options: disabled, no modifiers, no inertia.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the action.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Appends a modifier.
    #[must_use]
    pub fn modifier(mut self, spec: ModifierSpec) -> Self {
        self.modifiers.push(spec);
        self
    }

    /// Sets the inertia options.
    #[must_use]
    pub fn inertia(mut self, inertia: InertiaOptions) -> Self {
        self.inertia = inertia;
        self
    }
}

/// The full per-interactable options table, keyed by action kind.
#[derive(Clone, Debug, Default)]
pub struct OptionsSet {
    /// Drag options.
    pub drag: ActionOptions,
    /// Resize options.
    pub resize: ActionOptions,
    /// Gesture options.
    pub gesture: ActionOptions,
}

impl OptionsSet {
    /// The options for one action kind.
    #[must_use]
    pub fn get(&self, kind: ActionKind) -> &ActionOptions {
        match kind {
            ActionKind::Drag => &self.drag,
            ActionKind::Resize => &self.resize,
            ActionKind::Gesture => &self.gesture,
        }
    }

    /// Mutable access to the options for one action kind.
    pub fn get_mut(&mut self, kind: ActionKind) -> &mut ActionOptions {
        match kind {
            ActionKind::Drag => &mut self.drag,
            ActionKind::Resize => &mut self.resize,
            ActionKind::Gesture => &mut self.gesture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gesture_needs_two_pointers() {
        assert_eq!(ActionKind::Gesture.min_pointers(), 2);
        assert_eq!(ActionKind::Drag.min_pointers(), 1);
        assert_eq!(ActionKind::Resize.min_pointers(), 1);
    }

    #[test]
    fn inertia_defaults_match_documented_values() {
        let options = InertiaOptions::default();
        assert!(!options.enabled);
        assert_eq!(options.resistance, 10.0);
        assert_eq!(options.min_speed, 100.0);
        assert_eq!(options.end_speed, 10.0);
        assert!(options.allow_resume);
        assert_eq!(options.smooth_end_duration, 300.0);
    }
}
