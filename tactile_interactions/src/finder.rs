// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Routing of incoming pointer samples to interactions.

use tactile_coords::{PointerSample, PointerType};

use crate::scope::{InteractionId, Scope};

/// Searches the scope's interactions for one that should receive `pointer`.
///
/// Search order:
///
/// 1. an interaction running an action and already tracking this pointer id
///    (same pointer type);
/// 2. a not-yet-started interaction tracking this pointer id and type;
/// 3. for touch input, an interaction of the same type that is running an
///    action or holding pointers down — a secondary touch joins the
///    existing session instead of starting its own, which is how a gesture
///    ever sees two pointers;
/// 4. a simulating interaction of the same pointer type whose glide allows
///    resuming, so the down that cancels a glide reaches it;
/// 5. an idle interaction of the same pointer type, reused instead of
///    allocating.
///
/// Returns `None` when the caller should allocate. The scope fires
/// [`crate::scope::Signal::Find`] afterwards so plugins can override the
/// result.
pub(crate) fn search(scope: &Scope, pointer: &PointerSample) -> Option<InteractionId> {
    let mut tracking_idle = None;
    let mut touch_join = None;
    let mut resumable = None;
    let mut idle = None;

    for interaction in scope.interactions() {
        if interaction.dead || interaction.pointer_type != pointer.pointer_type {
            continue;
        }

        if interaction.pointer_index(pointer.id).is_some() {
            if interaction.interacting() {
                return Some(interaction.id);
            }
            tracking_idle.get_or_insert(interaction.id);
        } else if pointer.pointer_type == PointerType::Touch
            && (interaction.interacting() || interaction.pointer_is_down())
            && !interaction.simulating()
        {
            touch_join.get_or_insert(interaction.id);
        } else if interaction.simulating() && interaction.inertia.allow_resume {
            resumable.get_or_insert(interaction.id);
        } else if interaction.idle() {
            idle.get_or_insert(interaction.id);
        }
    }

    tracking_idle.or(touch_join).or(resumable).or(idle)
}
