// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One tracked gesture session: its pointers, coordinates, and action state.
//!
//! The [`Interaction`] struct is pure state. Every operation that fires
//! signals or events lives on [`crate::scope::Scope`] and addresses the
//! interaction by id, so signal listeners can freely re-enter the scope.

use std::cell::Cell;
use std::rc::Rc;

use smallvec::SmallVec;
use tactile_coords::{CoordsSet, PointerId, PointerSample, PointerType};
use tactile_modifiers::{ModifierArg, Pipeline};

use crate::dom::ElementId;
use crate::event::InteractEvent;
use crate::inertia::InertiaState;
use crate::interactable::InteractableId;
use crate::options::ActionState;
use crate::scope::InteractionId;

/// One tracked pointer within an interaction.
#[derive(Clone, Copy, Debug)]
pub struct PointerRecord {
    /// The stable pointer identifier.
    pub id: PointerId,
    /// The latest sample seen for this pointer.
    pub sample: PointerSample,
    /// Timestamp of the pointer's down event.
    pub down_time: f64,
    /// Element the pointer went down on.
    pub down_target: Option<ElementId>,
    /// Whether the pointer is currently pressed.
    pub is_down: bool,
}

/// One gesture session spanning one or more pointers.
#[derive(Debug)]
pub struct Interaction {
    /// The scope-assigned id.
    pub id: InteractionId,
    /// Pointer type this interaction tracks; mixed types never share one
    /// interaction.
    pub pointer_type: PointerType,
    /// Tracked pointers, keyed by id, in first-seen order.
    pub pointers: SmallVec<[PointerRecord; 4]>,
    /// The interaction's coordinate records.
    pub coords: CoordsSet,
    /// The selected (possibly not yet started) action.
    pub prepared: ActionState,
    /// Bound interactable once an action starts.
    pub interactable: Option<InteractableId>,
    /// Bound element once an action starts.
    pub element: Option<ElementId>,
    /// Set once cumulative movement from start exceeds the move tolerance.
    pub pointer_was_moved: bool,
    pub(crate) interacting: bool,
    pub(crate) pipeline: Option<Pipeline>,
    pub(crate) modifier_base: Option<ModifierArg>,
    pub(crate) prev_event: Option<InteractEvent>,
    pub(crate) inertia: InertiaState,
    pub(crate) reflow_resolve: Option<Rc<Cell<bool>>>,
    pub(crate) dead: bool,
}

impl Interaction {
    pub(crate) fn new(id: InteractionId, pointer_type: PointerType) -> Self {
        Self {
            id,
            pointer_type,
            pointers: SmallVec::new(),
            coords: CoordsSet::default(),
            prepared: ActionState::default(),
            interactable: None,
            element: None,
            pointer_was_moved: false,
            interacting: false,
            pipeline: None,
            modifier_base: None,
            prev_event: None,
            inertia: InertiaState::default(),
            reflow_resolve: None,
            dead: false,
        }
    }

    /// Whether an action is currently running.
    #[must_use]
    pub fn interacting(&self) -> bool {
        self.interacting
    }

    /// Whether a post-release simulation is driving this interaction.
    #[must_use]
    pub fn simulating(&self) -> bool {
        self.inertia.active
    }

    /// True iff at least one tracked pointer is currently down.
    #[must_use]
    pub fn pointer_is_down(&self) -> bool {
        self.pointers.iter().any(|p| p.is_down)
    }

    /// Number of currently-down pointers.
    #[must_use]
    pub fn down_pointer_count(&self) -> usize {
        self.pointers.iter().filter(|p| p.is_down).count()
    }

    /// Index of the pointer with the given id.
    #[must_use]
    pub fn pointer_index(&self, id: PointerId) -> Option<usize> {
        self.pointers.iter().position(|p| p.id == id)
    }

    /// The latest samples of all tracked pointers, in first-seen order.
    #[must_use]
    pub fn samples(&self) -> SmallVec<[PointerSample; 4]> {
        self.pointers.iter().map(|p| p.sample).collect()
    }

    /// Inserts or replaces the record for the sample's pointer id; down
    /// time and target are captured only when `is_down`. Returns the
    /// pointer's index.
    pub(crate) fn upsert_pointer(
        &mut self,
        sample: PointerSample,
        down_target: Option<ElementId>,
        is_down: bool,
        now: f64,
    ) -> usize {
        if let Some(index) = self.pointer_index(sample.id) {
            let record = &mut self.pointers[index];
            record.sample = sample;
            if is_down {
                record.is_down = true;
                record.down_time = now;
                record.down_target = down_target;
            }
            index
        } else {
            self.pointers.push(PointerRecord {
                id: sample.id,
                sample,
                down_time: if is_down { now } else { 0.0 },
                down_target: if is_down { down_target } else { None },
                is_down,
            });
            self.pointers.len() - 1
        }
    }

    /// Removes the record for the pointer id; `false` if it was unknown.
    pub(crate) fn delete_pointer(&mut self, id: PointerId) -> bool {
        match self.pointer_index(id) {
            Some(index) => {
                self.pointers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether the finder may hand a fresh pointer stream to this
    /// interaction.
    pub(crate) fn idle(&self) -> bool {
        !self.dead && !self.interacting && !self.simulating() && self.pointers.is_empty()
    }
}
