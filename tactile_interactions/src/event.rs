// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action events delivered to per-interactable listeners.

use std::rc::Rc;

use kurbo::{Point, Vec2};

use crate::dom::ElementId;
use crate::interactable::InteractableId;
use crate::options::ActionKind;
use crate::scope::InteractionId;

/// Lifecycle stage of an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The action began.
    Start,
    /// The pointer (or a simulation) moved.
    Move,
    /// The action finished.
    End,
    /// A post-release glide took over from the pointer.
    InertiaStart,
    /// A pointer-down cancelled a glide and resumed direct interaction.
    Resume,
    /// A synthetic replay is re-running the action without pointer input.
    Reflow,
}

impl Phase {
    /// The phase's event-type suffix.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Move => "move",
            Self::End => "end",
            Self::InertiaStart => "inertiastart",
            Self::Resume => "resume",
            Self::Reflow => "reflow",
        }
    }
}

/// One synthetic action event, as handed to listeners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractEvent {
    /// The interaction that produced the event.
    pub interaction: InteractionId,
    /// The bound interactable.
    pub interactable: InteractableId,
    /// The bound element.
    pub element: ElementId,
    /// The running action.
    pub action: ActionKind,
    /// The lifecycle stage.
    pub phase: Phase,
    /// Modifier-adjusted page position.
    pub page: Point,
    /// Modifier-adjusted client position.
    pub client: Point,
    /// Page movement since the previous event of this action.
    pub delta: Vec2,
    /// Pointer velocity in client units per second.
    pub velocity: Vec2,
    /// Magnitude of `velocity`.
    pub speed: f64,
    /// Timestamp in milliseconds.
    pub time: f64,
}

impl InteractEvent {
    /// The combined event type, action name plus phase suffix
    /// (`"dragstart"`, `"resizemove"`, ...).
    #[must_use]
    pub fn event_type(&self) -> String {
        format!("{}{}", self.action.as_str(), self.phase.suffix())
    }
}

/// Mutable reply channel for event listeners.
#[derive(Debug, Default)]
pub struct EventReply {
    stop: bool,
}

impl EventReply {
    /// Requests a synchronous stop of the interaction; no further phase for
    /// this down-sequence will run after the current firing.
    pub fn stop_interaction(&mut self) {
        self.stop = true;
    }

    /// Whether a stop was requested.
    #[must_use]
    pub fn stop_requested(&self) -> bool {
        self.stop
    }
}

/// A listener bound to one `(action, phase)` pair on an interactable.
pub type EventListener = Rc<dyn Fn(&InteractEvent, &mut EventReply)>;
