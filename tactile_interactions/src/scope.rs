// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scope: the explicit context object owning every piece of interaction
//! state, and the signal-firing operations of the state machine.
//!
//! ## Signal dispatch
//!
//! Plugins registered with [`Scope::use_plugin`] observe every state-machine
//! step through [`Signal`] values. Dispatch walks a snapshot of the plugin
//! list, so a listener may freely call back into the scope (including firing
//! further signals); returning [`Propagation::Stop`] short-circuits the
//! remaining listeners and, for the `Before*` signals, vetoes the default
//! behavior of the operation that fired them.

use std::rc::Rc;

use kurbo::{Point, Vec2};
use smallvec::SmallVec;
use tactile_coords::{points_within_tolerance, Edges, PointerSample, PointerType};
use tactile_modifiers::{ModifierArg, ModifierResult, Pipeline};
use tactile_signals::{PluginEntry, Propagation, Registry};

use crate::dom::{Clock, DomQuery, ElementId};
use crate::event::{EventReply, InteractEvent, Phase};
use crate::finder;
use crate::inertia::InertiaState;
use crate::interactable::{InteractableId, InteractableSet, Target};
use crate::interaction::Interaction;
use crate::options::{ActionKind, ActionState, OptionsSet};

/// Stable handle to an [`Interaction`] within one scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InteractionId(pub usize);

/// Milliseconds after a touch event during which mouse events are dropped
/// as browser-simulated duplicates.
const MOUSE_AFTER_TOUCH_MS: f64 = 500.0;

/// Everything a plugin can observe. Payloads are ids and copies, never
/// borrows into the scope, so listeners get the scope mutably alongside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Signal {
    /// A new interaction was allocated.
    New {
        /// The allocated interaction.
        interaction: InteractionId,
    },
    /// The finder ran for an incoming pointer; listeners may replace
    /// `found` to override the routing.
    Find {
        /// The incoming pointer.
        pointer: PointerSample,
        /// The finder's pick, if any.
        found: Option<InteractionId>,
    },
    /// A pointer went down.
    Down {
        /// The receiving interaction.
        interaction: InteractionId,
        /// The pointer sample.
        pointer: PointerSample,
        /// The element the pointer went down on.
        target: ElementId,
    },
    /// A pointer moved. `duplicate` is set when the averaged coordinates
    /// did not change from the previous update.
    Move {
        /// The receiving interaction.
        interaction: InteractionId,
        /// The pointer sample.
        pointer: PointerSample,
        /// Whether this update changed nothing.
        duplicate: bool,
    },
    /// A pointer was released.
    Up {
        /// The receiving interaction.
        interaction: InteractionId,
        /// The pointer sample.
        pointer: PointerSample,
    },
    /// A pointer record was inserted or refreshed.
    UpdatePointer {
        /// The receiving interaction.
        interaction: InteractionId,
        /// The pointer sample.
        pointer: PointerSample,
        /// Whether this update pressed the pointer.
        down: bool,
    },
    /// A pointer record is about to be removed.
    RemovePointer {
        /// The receiving interaction.
        interaction: InteractionId,
        /// The pointer sample.
        pointer: PointerSample,
    },
    /// An action started.
    ActionStart {
        /// The interaction.
        interaction: InteractionId,
    },
    /// A move phase is about to run; `Stop` suppresses the move event.
    BeforeActionMove {
        /// The interaction.
        interaction: InteractionId,
    },
    /// A move phase ran.
    ActionMove {
        /// The interaction.
        interaction: InteractionId,
    },
    /// An action is about to end; `Stop` vetoes the default end (used by
    /// inertia to glide instead, and by reflow to defer completion).
    BeforeActionEnd {
        /// The interaction.
        interaction: InteractionId,
    },
    /// An action ended.
    ActionEnd {
        /// The interaction.
        interaction: InteractionId,
    },
    /// A glide was cancelled by a pointer-down and the action resumed.
    ActionResume {
        /// The interaction.
        interaction: InteractionId,
    },
    /// An interaction stopped; action state is about to be reset.
    Stop {
        /// The interaction.
        interaction: InteractionId,
    },
    /// An interactable was registered.
    InteractableNew {
        /// The new interactable.
        interactable: InteractableId,
    },
    /// An interactable is being unset.
    InteractableUnset {
        /// The removed interactable.
        interactable: InteractableId,
    },
}

/// A signal listener registered through the plugin registry.
pub trait Plugin {
    /// Handles one signal. Return [`Propagation::Stop`] to short-circuit
    /// the remaining listeners (and veto defaults for `Before*` signals).
    fn on_signal(
        &self,
        signal: &mut Signal,
        scope: &mut Scope,
        dom: &dyn DomQuery,
    ) -> Propagation;
}

/// The context object owning all interaction state.
pub struct Scope {
    registry: Registry<Rc<dyn Plugin>>,
    /// The registered interactables.
    pub interactables: InteractableSet,
    interactions: Vec<Option<Interaction>>,
    clock: Rc<dyn Clock>,
    /// Cumulative movement below this never sets `pointer_was_moved`, and
    /// move events within this of the previous one are not re-fired.
    pub pointer_move_tolerance: f64,
    prev_touch_time: f64,
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("plugins", &self.registry.len())
            .field("interactables", &self.interactables.len())
            .field("interactions", &self.interactions.iter().flatten().count())
            .finish_non_exhaustive()
    }
}

impl Scope {
    /// Creates an empty scope around the given clock.
    #[must_use]
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            registry: Registry::new(),
            interactables: InteractableSet::default(),
            interactions: Vec::new(),
            clock,
            pointer_move_tolerance: 1.0,
            // Before any touch is seen there is no suppression window, even
            // on clocks that start near zero.
            prev_touch_time: f64::NEG_INFINITY,
        }
    }

    /// The current timestamp in milliseconds.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Registers a plugin; `false` if its id is already present.
    pub fn use_plugin(&mut self, entry: PluginEntry<Rc<dyn Plugin>>) -> bool {
        self.registry.use_plugin(entry)
    }

    /// Dispatches `signal` to every plugin in registry order.
    ///
    /// Returns [`Propagation::Stop`] if a listener short-circuited.
    pub fn fire(&mut self, signal: &mut Signal, dom: &dyn DomQuery) -> Propagation {
        let plugins: SmallVec<[Rc<dyn Plugin>; 8]> = self
            .registry
            .iter()
            .map(|entry| Rc::clone(&entry.plugin))
            .collect();

        for plugin in plugins {
            if plugin.on_signal(signal, self, dom).is_stop() {
                return Propagation::Stop;
            }
        }
        Propagation::Continue
    }

    /// Access an interaction by id; `None` for unknown or removed ids.
    #[must_use]
    pub fn interaction(&self, id: InteractionId) -> Option<&Interaction> {
        self.interactions.get(id.0)?.as_ref()
    }

    /// Mutable access to an interaction.
    pub fn interaction_mut(&mut self, id: InteractionId) -> Option<&mut Interaction> {
        self.interactions.get_mut(id.0)?.as_mut()
    }

    /// All live interactions, in allocation order.
    pub fn interactions(&self) -> impl Iterator<Item = &Interaction> {
        self.interactions.iter().flatten()
    }

    /// Allocates a fresh interaction and fires [`Signal::New`].
    pub fn new_interaction(
        &mut self,
        pointer_type: PointerType,
        dom: &dyn DomQuery,
    ) -> InteractionId {
        let id = InteractionId(self.interactions.len());
        self.interactions.push(Some(Interaction::new(id, pointer_type)));
        self.fire(&mut Signal::New { interaction: id }, dom);
        id
    }

    pub(crate) fn remove_interaction(&mut self, id: InteractionId) {
        if let Some(slot) = self.interactions.get_mut(id.0) {
            *slot = None;
        }
    }

    /// Registers an interactable and fires [`Signal::InteractableNew`].
    /// An existing (target, context) pair is returned unchanged.
    pub fn add_interactable(
        &mut self,
        target: Target,
        context: ElementId,
        options: OptionsSet,
        dom: &dyn DomQuery,
    ) -> InteractableId {
        let before = self.interactables.len();
        let id = self.interactables.insert(target, context, options);
        if self.interactables.len() > before {
            self.fire(&mut Signal::InteractableNew { interactable: id }, dom);
        }
        id
    }

    /// Removes an interactable, stopping any interaction bound to it.
    pub fn unset_interactable(&mut self, id: InteractableId, dom: &dyn DomQuery) {
        let bound: Vec<InteractionId> = self
            .interactions()
            .filter(|i| i.interactable == Some(id) && i.interacting())
            .map(|i| i.id)
            .collect();
        for interaction in bound {
            self.stop(interaction, dom);
        }

        self.fire(&mut Signal::InteractableUnset { interactable: id }, dom);
        self.interactables.remove(id);
    }

    /// Whether this sample should be processed at all.
    ///
    /// Touch samples stamp the suppression window; mouse samples are
    /// dropped while a non-mouse pointer is down, within the window after
    /// the last touch, or when their timestamp is zero (a browser-simulated
    /// mouse event).
    fn accepts(&mut self, sample: &PointerSample) -> bool {
        match sample.pointer_type {
            PointerType::Touch => {
                self.prev_touch_time = self.now();
                true
            }
            PointerType::Mouse => {
                let non_mouse_down = self
                    .interactions()
                    .any(|i| i.pointer_type != PointerType::Mouse && i.pointer_is_down());
                !(non_mouse_down
                    || self.now() - self.prev_touch_time < MOUSE_AFTER_TOUCH_MS
                    || sample.time == 0.0)
            }
            PointerType::Pen | PointerType::Reflow => true,
        }
    }

    fn find_or_create(&mut self, sample: &PointerSample, dom: &dyn DomQuery) -> InteractionId {
        let mut signal = Signal::Find {
            pointer: *sample,
            found: finder::search(self, sample),
        };
        self.fire(&mut signal, dom);

        let found = match signal {
            Signal::Find { found, .. } => found,
            _ => None,
        };
        found.unwrap_or_else(|| self.new_interaction(sample.pointer_type, dom))
    }

    /// Inserts or refreshes a pointer record and fires
    /// [`Signal::UpdatePointer`]. Returns the pointer's index.
    pub fn update_pointer(
        &mut self,
        id: InteractionId,
        sample: PointerSample,
        down_target: Option<ElementId>,
        down: bool,
        dom: &dyn DomQuery,
    ) -> Option<usize> {
        let now = self.now();
        let index = self
            .interaction_mut(id)?
            .upsert_pointer(sample, down_target, down, now);
        self.fire(
            &mut Signal::UpdatePointer {
                interaction: id,
                pointer: sample,
                down,
            },
            dom,
        );
        Some(index)
    }

    /// Fires [`Signal::RemovePointer`] and deletes the record. Unknown ids
    /// still fire and then no-op.
    pub fn remove_pointer(&mut self, id: InteractionId, sample: PointerSample, dom: &dyn DomQuery) {
        self.fire(
            &mut Signal::RemovePointer {
                interaction: id,
                pointer: sample,
            },
            dom,
        );
        if let Some(interaction) = self.interaction_mut(id) {
            interaction.delete_pointer(sample.id);
        }
    }

    /// Routes a pointer-down to an interaction (allocating if needed),
    /// presses the pointer, and fires [`Signal::Down`].
    ///
    /// Start coordinates rebase only when no action is running, so a down
    /// joining a live action (or resuming a glide) never disturbs them.
    pub fn pointer_down(
        &mut self,
        sample: PointerSample,
        target: ElementId,
        dom: &dyn DomQuery,
    ) -> Option<InteractionId> {
        if !self.accepts(&sample) {
            return None;
        }
        let id = self.find_or_create(&sample, dom);
        self.update_pointer(id, sample, Some(target), true, dom);

        self.fire(
            &mut Signal::Down {
                interaction: id,
                pointer: sample,
                target,
            },
            dom,
        );

        let now = self.now();
        if let Some(interaction) = self.interaction_mut(id)
            && !interaction.interacting()
        {
            let samples = interaction.samples();
            interaction.coords.rebase(&samples, now);
            interaction.pointer_was_moved = false;
        }
        Some(id)
    }

    /// Routes a pointer-move: refreshes the pointer record and coordinates,
    /// fires [`Signal::Move`], and runs the action's move phase when one is
    /// live and the update was not a duplicate.
    pub fn pointer_move(
        &mut self,
        sample: PointerSample,
        dom: &dyn DomQuery,
    ) -> Option<InteractionId> {
        if !self.accepts(&sample) {
            return None;
        }
        let id = self.find_or_create(&sample, dom);

        // A running simulation owns the coordinates; real moves routed here
        // during a glide must not disturb them.
        let simulating = self.interaction(id)?.simulating();
        if !simulating {
            self.update_pointer(id, sample, None, false, dom);
        }

        let now = self.now();
        let tolerance = self.pointer_move_tolerance;
        let (duplicate, interacting) = {
            let interaction = self.interaction_mut(id)?;
            if !simulating {
                let samples = interaction.samples();
                interaction.coords.set_cur(&samples, now);
            }

            let cur = interaction.coords.cur;
            let prev = interaction.coords.prev;
            let duplicate = cur.page == prev.page && cur.client == prev.client;

            if interaction.pointer_is_down() && !interaction.pointer_was_moved {
                let travelled = cur.page - interaction.coords.start.page;
                interaction.pointer_was_moved = travelled.hypot() > tolerance;
            }
            if !duplicate {
                interaction.coords.recompute_deltas();
            }
            (duplicate, interaction.interacting())
        };

        self.fire(
            &mut Signal::Move {
                interaction: id,
                pointer: sample,
                duplicate,
            },
            dom,
        );

        if !duplicate {
            if interacting {
                self.move_interaction(id, dom);
            }
            if let Some(interaction) = self.interaction_mut(id)
                && interaction.pointer_was_moved
            {
                interaction.coords.commit();
            }
        }
        Some(id)
    }

    /// Routes a pointer-up: fires [`Signal::Up`], ends a live action (unless
    /// a simulation took over), and removes the pointer.
    pub fn pointer_up(
        &mut self,
        sample: PointerSample,
        dom: &dyn DomQuery,
    ) -> Option<InteractionId> {
        if !self.accepts(&sample) {
            return None;
        }
        let id = self.find_or_create(&sample, dom);

        // An up for an untracked pointer still degrades gracefully.
        if self.interaction(id)?.pointer_index(sample.id).is_none() {
            self.update_pointer(id, sample, None, false, dom);
        }

        self.fire(
            &mut Signal::Up {
                interaction: id,
                pointer: sample,
            },
            dom,
        );

        if !self.interaction(id).is_some_and(Interaction::simulating) {
            self.end(id, dom);
        }

        if let Some(interaction) = self.interaction_mut(id)
            && let Some(index) = interaction.pointer_index(sample.id)
        {
            interaction.pointers[index].is_down = false;
        }
        self.remove_pointer(id, sample, dom);
        Some(id)
    }

    /// Attempts to start `action` on the interaction.
    ///
    /// Each precondition independently fails the start (resetting the
    /// prepared action): a pointer must be down, the tracked pointer count
    /// must reach the action's minimum, no action may already be running,
    /// and the action must be enabled in the interactable's options.
    ///
    /// On success the start-phase event fires, followed by an immediate
    /// first move.
    pub fn start(
        &mut self,
        id: InteractionId,
        action: ActionKind,
        edges: Edges,
        interactable: InteractableId,
        element: ElementId,
        dom: &dyn DomQuery,
    ) -> bool {
        let (enabled, specs) = match self.interactables.by_id(interactable) {
            Some(record) => {
                let options = record.options.get(action);
                (options.enabled, options.modifiers.clone())
            }
            None => (false, Vec::new()),
        };
        let rect = dom.element_rect(element);

        {
            let Some(interaction) = self.interaction_mut(id) else {
                return false;
            };
            if interaction.interacting()
                || !interaction.pointer_is_down()
                || interaction.pointers.len() < action.min_pointers()
                || !enabled
            {
                interaction.prepared.kind = None;
                return false;
            }

            interaction.interactable = Some(interactable);
            interaction.element = Some(element);
            interaction.prepared = ActionState {
                kind: Some(action),
                edges,
            };

            let mut pipeline = Pipeline::from_specs(&specs);
            let mut base = ModifierArg::new(interaction.coords.cur.page);
            if let Some(rect) = rect {
                base = base.with_rect(rect);
            }
            base = base.with_edges(edges);
            pipeline.start(&base);

            interaction.pipeline = Some(pipeline);
            interaction.modifier_base = Some(base);
            interaction.interacting = true;
        }

        self.fire(&mut Signal::ActionStart { interaction: id }, dom);

        let page = self.run_pipeline(id, false, false);
        if let Some(event) = self.prepared_event(id, Phase::Start, page) {
            self.fire_interact_event(&event, dom);
        }
        if self.interaction(id).is_some_and(Interaction::interacting) {
            self.move_interaction(id, dom);
        }
        true
    }

    /// Runs the move phase: modifier pipeline, `BeforeActionMove` veto,
    /// duplicate dedupe against the previous move event, then the move
    /// event itself.
    pub fn move_interaction(&mut self, id: InteractionId, dom: &dyn DomQuery) {
        if !self.interaction(id).is_some_and(Interaction::interacting) {
            return;
        }

        let page = self.run_pipeline(id, false, false);

        if self
            .fire(&mut Signal::BeforeActionMove { interaction: id }, dom)
            .is_stop()
        {
            return;
        }

        let tolerance = self.pointer_move_tolerance;
        if let Some(prev) = self.interaction(id).and_then(|i| i.prev_event)
            && prev.phase == Phase::Move
            && points_within_tolerance(prev.page, page, tolerance)
        {
            return;
        }

        self.fire(&mut Signal::ActionMove { interaction: id }, dom);
        if let Some(event) = self.prepared_event(id, Phase::Move, page) {
            self.fire_interact_event(&event, dom);
        }
    }

    /// Ends a live action: `BeforeActionEnd` may veto (inertia, reflow),
    /// otherwise the end-phase event fires and the interaction stops.
    pub fn end(&mut self, id: InteractionId, dom: &dyn DomQuery) {
        if !self.interaction(id).is_some_and(Interaction::interacting) {
            return;
        }

        if self
            .fire(&mut Signal::BeforeActionEnd { interaction: id }, dom)
            .is_stop()
        {
            return;
        }

        self.fire(&mut Signal::ActionEnd { interaction: id }, dom);

        // The end event reports the last delivered position, not the raw
        // pointer: a release after a snap must not un-snap.
        let page = match self.interaction(id) {
            Some(interaction) => match interaction.prev_event {
                Some(prev) => prev.page,
                None => interaction.coords.cur.page,
            },
            None => return,
        };
        if let Some(event) = self.prepared_event(id, Phase::End, page) {
            self.fire_interact_event(&event, dom);
        }

        self.stop(id, dom);
    }

    /// Fires [`Signal::Stop`] and resets all per-action state.
    pub fn stop(&mut self, id: InteractionId, dom: &dyn DomQuery) {
        self.fire(&mut Signal::Stop { interaction: id }, dom);

        if let Some(interaction) = self.interaction_mut(id) {
            if let (Some(pipeline), Some(base)) =
                (interaction.pipeline.as_mut(), interaction.modifier_base.as_ref())
            {
                pipeline.stop(base);
            }
            interaction.interactable = None;
            interaction.element = None;
            interaction.interacting = false;
            interaction.prepared = ActionState::default();
            interaction.pipeline = None;
            interaction.modifier_base = None;
            interaction.prev_event = None;
        }
    }

    /// Makes the interaction permanently inert: clears its pointers and
    /// references and hides it from the finder.
    pub fn destroy_interaction(&mut self, id: InteractionId) {
        if let Some(interaction) = self.interaction_mut(id) {
            interaction.pointers.clear();
            interaction.interactable = None;
            interaction.element = None;
            interaction.interacting = false;
            interaction.inertia = InertiaState::default();
            interaction.dead = true;
        }
    }

    /// Defensively ends every live (non-simulating) action, for when the
    /// host document loses focus.
    pub fn on_blur(&mut self, dom: &dyn DomQuery) {
        let live: Vec<InteractionId> = self
            .interactions()
            .filter(|i| i.interacting() && !i.simulating())
            .map(|i| i.id)
            .collect();
        for id in live {
            self.end(id, dom);
        }
    }

    /// Whether a simulation still needs frames.
    #[must_use]
    pub fn needs_tick(&self) -> bool {
        self.interactions().any(Interaction::simulating)
    }

    /// Advances every running simulation by one frame at the clock's
    /// current time.
    pub fn tick(&mut self, dom: &dyn DomQuery) {
        let running: Vec<InteractionId> = self
            .interactions()
            .filter(|i| i.simulating())
            .map(|i| i.id)
            .collect();
        for id in running {
            crate::inertia::advance(self, id, dom);
        }
    }

    /// Runs the modifier pipeline over the current coordinates and returns
    /// the adjusted page position.
    pub(crate) fn run_pipeline(
        &mut self,
        id: InteractionId,
        pre_end: bool,
        require_end_only: bool,
    ) -> Point {
        let page = match self.interaction(id) {
            Some(interaction) => interaction.coords.cur.page,
            None => Point::ZERO,
        };
        self.run_pipeline_at(id, page, pre_end, require_end_only)
            .coords
    }

    /// Runs the modifier pipeline over an explicit page position (used to
    /// project a glide's end point) and reports whether it moved.
    pub(crate) fn run_pipeline_at(
        &mut self,
        id: InteractionId,
        page: Point,
        pre_end: bool,
        require_end_only: bool,
    ) -> ModifierResult {
        let unchanged = ModifierResult {
            coords: page,
            delta: Vec2::ZERO,
            changed: false,
        };
        let Some(interaction) = self.interaction_mut(id) else {
            return unchanged;
        };
        let mut arg = match &interaction.modifier_base {
            Some(base) => base.clone(),
            None => ModifierArg::new(page),
        };
        arg.coords = page;
        arg.pre_end = pre_end;
        arg.require_end_only = require_end_only;

        match interaction.pipeline.as_mut() {
            Some(pipeline) => pipeline.set_all(&mut arg),
            None => unchanged,
        }
    }

    /// Builds the typed event for one phase at the given (already adjusted)
    /// page position.
    pub(crate) fn prepared_event(
        &self,
        id: InteractionId,
        phase: Phase,
        page: Point,
    ) -> Option<InteractEvent> {
        let interaction = self.interaction(id)?;
        let interactable = interaction.interactable?;
        let element = interaction.element?;
        let action = interaction.prepared.kind?;

        let cur = interaction.coords.cur;
        let client = cur.client + (page - cur.page);
        let delta = match (&interaction.prev_event, phase) {
            (Some(prev), Phase::Move | Phase::End) => page - prev.page,
            _ => Vec2::ZERO,
        };
        let velocity = interaction.coords.velocity.client.to_vec2();

        Some(InteractEvent {
            interaction: id,
            interactable,
            element,
            action,
            phase,
            page,
            client,
            delta,
            velocity,
            speed: velocity.hypot(),
            time: cur.time,
        })
    }

    /// Delivers an event to the bound interactable's listeners, records it
    /// as the previous event, and honors a synchronous stop request.
    pub(crate) fn fire_interact_event(&mut self, event: &InteractEvent, dom: &dyn DomQuery) {
        let mut reply = EventReply::default();
        if let Some(interactable) = self.interactables.by_id(event.interactable) {
            interactable.fire(event, &mut reply);
        }

        if let Some(interaction) = self.interaction_mut(event.interaction) {
            interaction.prev_event = Some(*event);
        }
        if reply.stop_requested() {
            self.stop(event.interaction, dom);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ManualClock, TestDom};
    use tactile_coords::PointerId;

    fn mouse(x: f64, y: f64, time: f64) -> PointerSample {
        PointerSample::new(PointerId(1), PointerType::Mouse).at(
            Point::new(x, y),
            Point::new(x, y),
            time,
        )
    }

    fn touch(id: i64, x: f64, y: f64, time: f64) -> PointerSample {
        PointerSample::new(PointerId(id), PointerType::Touch).at(
            Point::new(x, y),
            Point::new(x, y),
            time,
        )
    }

    #[test]
    fn mouse_shortly_after_touch_is_dropped() {
        let clock = ManualClock::at(1000.0);
        let mut scope = Scope::new(clock.handle());
        let dom = TestDom::new();
        let root = ElementId(0);

        assert!(scope.pointer_down(touch(7, 0.0, 0.0, 1000.0), root, &dom).is_some());
        let up = touch(7, 0.0, 0.0, 1000.0);
        scope.pointer_up(up, &dom);

        clock.advance(100.0);
        assert!(scope.pointer_down(mouse(0.0, 0.0, 1100.0), root, &dom).is_none());

        clock.advance(1000.0);
        assert!(scope.pointer_down(mouse(0.0, 0.0, 2100.0), root, &dom).is_some());
    }

    #[test]
    fn mouse_is_accepted_on_a_young_clock_with_no_prior_touch() {
        // A monotonic clock may start near zero; with no touch seen yet
        // there is no suppression window to fall into.
        let clock = ManualClock::at(100.0);
        let mut scope = Scope::new(clock.handle());
        let dom = TestDom::new();

        assert!(scope.pointer_down(mouse(0.0, 0.0, 100.0), ElementId(0), &dom).is_some());
    }

    #[test]
    fn zero_timestamp_mouse_is_dropped_as_simulated() {
        let clock = ManualClock::at(5000.0);
        let mut scope = Scope::new(clock.handle());
        let dom = TestDom::new();

        assert!(scope.pointer_down(mouse(0.0, 0.0, 0.0), ElementId(0), &dom).is_none());
    }

    #[test]
    fn mouse_is_dropped_while_a_touch_pointer_is_down() {
        let clock = ManualClock::at(1000.0);
        let mut scope = Scope::new(clock.handle());
        let dom = TestDom::new();
        let root = ElementId(0);

        scope.pointer_down(touch(7, 0.0, 0.0, 1000.0), root, &dom);
        clock.advance(2000.0);

        assert!(scope.pointer_move(mouse(1.0, 1.0, 3000.0), &dom).is_none());
    }

    #[test]
    fn second_touch_joins_the_tracking_interaction() {
        let clock = ManualClock::at(0.0);
        let mut scope = Scope::new(clock.handle());
        let dom = TestDom::new();
        let root = ElementId(0);

        let a = scope.pointer_down(touch(1, 0.0, 0.0, 0.0), root, &dom);
        let b = scope.pointer_move(touch(1, 5.0, 0.0, 16.0), &dom);
        assert_eq!(a, b);

        // A different touch id gets routed to the idle same-type pool
        // rather than the one already tracking pointer 1... unless that one
        // is interacting, which is covered in the integration tests.
        let c = scope.pointer_down(touch(2, 50.0, 0.0, 32.0), root, &dom);
        assert_eq!(c, a);
    }

    #[test]
    fn destroyed_interaction_is_never_found_again() {
        let clock = ManualClock::at(0.0);
        let mut scope = Scope::new(clock.handle());
        let dom = TestDom::new();
        let root = ElementId(0);

        let id = scope.pointer_down(touch(1, 0.0, 0.0, 0.0), root, &dom).unwrap();
        scope.pointer_up(touch(1, 0.0, 0.0, 0.0), &dom);
        scope.destroy_interaction(id);

        let next = scope.pointer_down(touch(1, 0.0, 0.0, 16.0), root, &dom).unwrap();
        assert_ne!(next, id);
        assert!(scope.interaction(id).is_some_and(|i| i.pointers.is_empty()));
    }
}
