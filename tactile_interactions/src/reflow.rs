// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reflow: replaying an action over an interactable's elements without any
//! pointer input, so modifier pipelines re-apply after options or layout
//! change.
//!
//! Each element gets a synthetic interaction whose single pointer sits at
//! the element's origin. The replay runs the full phase sequence (reflow,
//! start, move, end) synchronously unless a glide takes over the end, in
//! which case the returned [`ReflowHandle`] resolves when the glide
//! finishes.

use std::cell::Cell;
use std::rc::Rc;

use tactile_coords::{Edges, PointerId, PointerSample, PointerType};
use tactile_signals::{PluginEntry, Propagation};

use crate::dom::DomQuery;
use crate::event::Phase;
use crate::interactable::InteractableId;
use crate::interaction::Interaction;
use crate::options::{ActionKind, ActionState};
use crate::scope::{Plugin, Scope, Signal};

/// Completion flag for one element's replay.
#[derive(Clone, Debug)]
pub struct ReflowHandle(Rc<Cell<bool>>);

impl ReflowHandle {
    /// Whether the replay (including any deferred glide) has finished.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.0.get()
    }
}

struct ReflowPlugin;

/// The reflow plugin entry, for [`Scope::use_plugin`]. Required for replay
/// handles to resolve and synthetic interactions to be reclaimed.
#[must_use]
pub fn plugin() -> PluginEntry<Rc<dyn Plugin>> {
    PluginEntry::new("reflow", Rc::new(ReflowPlugin) as Rc<dyn Plugin>)
}

impl Plugin for ReflowPlugin {
    fn on_signal(
        &self,
        signal: &mut Signal,
        scope: &mut Scope,
        _dom: &dyn DomQuery,
    ) -> Propagation {
        if let Signal::Stop { interaction } = *signal {
            let Some(record) = scope.interaction_mut(interaction) else {
                return Propagation::Continue;
            };
            let synthetic = record.pointer_type == PointerType::Reflow;
            if let Some(cell) = record.reflow_resolve.take() {
                cell.set(true);
            }
            if synthetic {
                scope.remove_interaction(interaction);
            }
        }
        Propagation::Continue
    }
}

impl Scope {
    /// Replays `action` over every element the interactable currently
    /// matches, returning one handle per element reached.
    ///
    /// An element with no layout rect stops the walk. An element already
    /// running the same action re-runs its move phase in place instead of
    /// replaying, and its handle resolves when that interaction stops.
    pub fn reflow(
        &mut self,
        interactable: InteractableId,
        action: ActionKind,
        edges: Edges,
        dom: &dyn DomQuery,
    ) -> Vec<ReflowHandle> {
        let elements = self
            .interactables
            .by_id(interactable)
            .map(|record| record.elements(dom))
            .unwrap_or_default();

        let mut handles = Vec::new();
        for element in elements {
            let origin = self
                .interactables
                .by_id(interactable)
                .and_then(|record| record.replay_origin(element, dom));
            let Some(origin) = origin else {
                break;
            };

            let running = self
                .interactions()
                .find(|i| {
                    i.interacting()
                        && !i.simulating()
                        && i.interactable == Some(interactable)
                        && i.element == Some(element)
                        && i.prepared.kind == Some(action)
                })
                .map(|i| i.id);

            if let Some(id) = running {
                self.move_interaction(id, dom);
                if let Some(interaction) = self.interaction_mut(id) {
                    let cell = interaction
                        .reflow_resolve
                        .get_or_insert_with(|| Rc::new(Cell::new(false)));
                    handles.push(ReflowHandle(Rc::clone(cell)));
                }
                continue;
            }

            let id = self.new_interaction(PointerType::Reflow, dom);
            let now = self.now();
            let sample =
                PointerSample::new(PointerId(-1), PointerType::Reflow).at(origin, origin, now);
            self.update_pointer(id, sample, Some(element), true, dom);

            let cell = Rc::new(Cell::new(false));
            if let Some(interaction) = self.interaction_mut(id) {
                // Bind early so the reflow-phase event can be built before
                // `start` re-binds for real.
                interaction.interactable = Some(interactable);
                interaction.element = Some(element);
                interaction.prepared = ActionState {
                    kind: Some(action),
                    edges,
                };
                let samples = interaction.samples();
                interaction.coords.rebase(&samples, now);
                interaction.reflow_resolve = Some(Rc::clone(&cell));
            }
            handles.push(ReflowHandle(Rc::clone(&cell)));

            if let Some(event) = self.prepared_event(id, Phase::Reflow, origin) {
                self.fire_interact_event(&event, dom);
            }

            self.start(id, action, edges, interactable, element, dom);
            if self.interaction(id).is_some_and(Interaction::interacting) {
                // A glide may veto this end; the handle then resolves from
                // the stop that follows the glide.
                self.end(id, dom);
            } else {
                self.stop(id, dom);
            }
            self.remove_pointer(id, sample, dom);
        }
        handles
    }
}
