// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Post-release glides: exponential-decay inertia and the eased smooth end.
//!
//! The plugin listens for the end of an action. When the release is fast
//! enough (and recent enough) it vetoes the default end and replaces it with
//! a closed-form decay glide; when it is not, but a final end-only modifier
//! pass still changes the coordinates, a short eased glide runs instead.
//! Either way the host advances the simulation by calling
//! [`Scope::tick`](crate::scope::Scope::tick) once per frame; a pointer-down
//! on the gliding element cancels the glide and resumes the action.

use std::rc::Rc;

use kurbo::{Point, Vec2};
use tactile_coords::CoordsInfo;
use tactile_signals::{PluginEntry, Propagation};

use crate::dom::{DomQuery, ElementId};
use crate::event::Phase;
use crate::options::{ActionKind, InertiaOptions};
use crate::scope::{InteractionId, Plugin, Scope, Signal};

/// A release older than this cannot start inertia; the pointer had already
/// come to rest.
const INERTIA_IDLE_MS: f64 = 50.0;

/// Per-interaction glide state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InertiaState {
    /// A glide is running.
    pub active: bool,
    /// The running glide is the eased smooth end, not decay inertia.
    pub smooth_end: bool,
    /// Whether a pointer-down on the element may resume the action.
    pub allow_resume: bool,
    pub(crate) up_page: Point,
    pub(crate) up_client: Point,
    pub(crate) xe: f64,
    pub(crate) ye: f64,
    pub(crate) modified_xe: f64,
    pub(crate) modified_ye: f64,
    pub(crate) sx: f64,
    pub(crate) sy: f64,
    pub(crate) t0: f64,
    pub(crate) te: f64,
    pub(crate) v0: f64,
    pub(crate) vx0: f64,
    pub(crate) vy0: f64,
    pub(crate) lambda_v0: f64,
    pub(crate) one_ve_v0: f64,
}

struct InertiaPlugin;

/// The inertia plugin entry, for [`Scope::use_plugin`].
#[must_use]
pub fn plugin() -> PluginEntry<Rc<dyn Plugin>> {
    PluginEntry::new("inertia", Rc::new(InertiaPlugin) as Rc<dyn Plugin>)
}

impl Plugin for InertiaPlugin {
    fn on_signal(
        &self,
        signal: &mut Signal,
        scope: &mut Scope,
        dom: &dyn DomQuery,
    ) -> Propagation {
        match *signal {
            Signal::BeforeActionEnd { interaction } => release(scope, interaction, dom),
            Signal::Down {
                interaction,
                target,
                ..
            } => {
                resume(scope, interaction, target, dom);
                Propagation::Continue
            }
            Signal::Stop { interaction } => {
                if let Some(record) = scope.interaction_mut(interaction) {
                    record.inertia.active = false;
                    record.inertia.smooth_end = false;
                }
                Propagation::Continue
            }
            _ => Propagation::Continue,
        }
    }
}

fn glide_options(scope: &Scope, id: InteractionId) -> Option<InertiaOptions> {
    let interaction = scope.interaction(id)?;
    let kind = interaction.prepared.kind?;
    let interactable = interaction.interactable?;
    Some(scope.interactables.by_id(interactable)?.options.get(kind).inertia)
}

/// Decides at release time whether a glide takes over; `Stop` vetoes the
/// default end.
fn release(scope: &mut Scope, id: InteractionId, dom: &dyn DomQuery) -> Propagation {
    let now = scope.now();

    let Some(interaction) = scope.interaction(id) else {
        return Propagation::Continue;
    };
    if !interaction.interacting() || interaction.simulating() {
        return Propagation::Continue;
    }
    let Some(kind) = interaction.prepared.kind else {
        return Propagation::Continue;
    };
    let Some(options) = glide_options(scope, id) else {
        return Propagation::Continue;
    };

    let cur = interaction.coords.cur;
    let velocity = interaction.coords.velocity.client.to_vec2();
    let speed = velocity.hypot();

    let inertia_possible = options.enabled && kind != ActionKind::Gesture;
    let inertia = inertia_possible
        && now - cur.time < INERTIA_IDLE_MS
        && speed > options.min_speed
        && speed > options.end_speed;

    // Without inertia, a final end-only modifier pass may still pull the
    // coordinates somewhere new; glide there over a fixed duration.
    let mut smooth_target = None;
    if inertia_possible && !inertia {
        let result = scope.run_pipeline_at(id, cur.page, true, false);
        if result.changed {
            smooth_target = Some(result.coords);
        }
    }

    if !inertia && smooth_target.is_none() {
        return Propagation::Continue;
    }

    if let Some(interaction) = scope.interaction_mut(id) {
        interaction.inertia = InertiaState {
            active: true,
            smooth_end: false,
            allow_resume: options.allow_resume,
            up_page: cur.page,
            up_client: cur.client,
            t0: now,
            ..InertiaState::default()
        };
    }

    let event_page = smooth_target.unwrap_or(cur.page);
    if let Some(event) = scope.prepared_event(id, Phase::InertiaStart, event_page) {
        scope.fire_interact_event(&event, dom);
    }
    // A listener may have stopped the interaction synchronously; the stop
    // handler above has already cancelled the glide in that case.
    if !scope.interaction(id).is_some_and(|i| i.inertia.active) {
        return Propagation::Stop;
    }

    if inertia {
        let lambda = options.resistance;
        let te = -(options.end_speed / speed).ln() / lambda;
        let xe = (velocity.x - te) / lambda;
        let ye = (velocity.y - te) / lambda;

        if let Some(interaction) = scope.interaction_mut(id) {
            let state = &mut interaction.inertia;
            state.vx0 = velocity.x;
            state.vy0 = velocity.y;
            state.v0 = speed;
            state.te = te;
            state.xe = xe;
            state.ye = ye;
            state.modified_xe = xe;
            state.modified_ye = ye;
            state.lambda_v0 = lambda / speed;
            state.one_ve_v0 = 1.0 - options.end_speed / speed;
        }

        // Project the glide's end point through the end-only modifiers; if
        // they move it, the glide curves toward the modified end point.
        let projected = cur.page + Vec2::new(xe, ye);
        let shift = scope.run_pipeline_at(id, projected, true, true).delta;
        if let Some(interaction) = scope.interaction_mut(id) {
            interaction.inertia.modified_xe += shift.x;
            interaction.inertia.modified_ye += shift.y;
        }
    } else if let (Some(target), Some(interaction)) = (smooth_target, scope.interaction_mut(id)) {
        let state = &mut interaction.inertia;
        state.smooth_end = true;
        state.xe = target.x - cur.page.x;
        state.ye = target.y - cur.page.y;
    }

    Propagation::Stop
}

/// Cancels a glide when a pointer goes down on (a descendant of) the
/// gliding element, and resumes the action at the simulated position.
fn resume(scope: &mut Scope, id: InteractionId, target: ElementId, dom: &dyn DomQuery) {
    let Some(interaction) = scope.interaction(id) else {
        return;
    };
    if !interaction.inertia.active || !interaction.inertia.allow_resume {
        return;
    }
    let Some(element) = interaction.element else {
        return;
    };

    let mut node = Some(target);
    let mut hit = false;
    while let Some(candidate) = node {
        if candidate == element {
            hit = true;
            break;
        }
        node = dom.parent(candidate);
    }
    if !hit {
        return;
    }

    let now = scope.now();
    let page = {
        let Some(interaction) = scope.interaction_mut(id) else {
            return;
        };
        interaction.inertia.active = false;
        interaction.inertia.smooth_end = false;

        let samples = interaction.samples();
        interaction.coords.set_cur(&samples, now);
        interaction.coords.cur.page
    };

    scope.fire(&mut Signal::ActionResume { interaction: id }, dom);
    if let Some(event) = scope.prepared_event(id, Phase::Resume, page) {
        scope.fire_interact_event(&event, dom);
    }
    if let Some(interaction) = scope.interaction_mut(id) {
        interaction.coords.commit();
    }
}

/// Advances one simulation frame for the interaction.
pub(crate) fn advance(scope: &mut Scope, id: InteractionId, dom: &dyn DomQuery) {
    let smooth = match scope.interaction(id) {
        Some(interaction) if interaction.inertia.active => interaction.inertia.smooth_end,
        _ => return,
    };
    if smooth {
        smooth_end_tick(scope, id, dom);
    } else {
        inertia_tick(scope, id, dom);
    }
}

fn set_glide_coords(scope: &mut Scope, id: InteractionId, now: f64) {
    if let Some(interaction) = scope.interaction_mut(id) {
        let state = interaction.inertia;
        let shift = Vec2::new(state.sx, state.sy);
        interaction.coords.cur = CoordsInfo {
            page: state.up_page + shift,
            client: state.up_client + shift,
            time: now,
        };
        interaction.coords.recompute_deltas();
    }
}

fn inertia_tick(scope: &mut Scope, id: InteractionId, dom: &dyn DomQuery) {
    let now = scope.now();
    let Some(state) = scope.interaction(id).map(|i| i.inertia) else {
        return;
    };

    let lambda = state.lambda_v0 * state.v0;
    let t = (now - state.t0) / 1000.0;

    if t < state.te {
        let progress = 1.0 - ((-lambda * t).exp() - state.lambda_v0) / state.one_ve_v0;

        let (sx, sy) = if state.modified_xe == state.xe && state.modified_ye == state.ye {
            (state.xe * progress, state.ye * progress)
        } else {
            // Curve toward the modified end point along a quadratic bezier
            // whose control point is the unmodified end point.
            let point = quadratic_curve_point(
                Point::ZERO,
                Point::new(state.xe, state.ye),
                Point::new(state.modified_xe, state.modified_ye),
                progress,
            );
            (point.x, point.y)
        };

        if let Some(interaction) = scope.interaction_mut(id) {
            interaction.inertia.sx = sx;
            interaction.inertia.sy = sy;
        }
        set_glide_coords(scope, id, now);
        scope.move_interaction(id, dom);
    } else {
        if let Some(interaction) = scope.interaction_mut(id) {
            interaction.inertia.sx = state.modified_xe;
            interaction.inertia.sy = state.modified_ye;
        }
        set_glide_coords(scope, id, now);
        scope.move_interaction(id, dom);
        scope.end(id, dom);
    }

    if let Some(interaction) = scope.interaction_mut(id) {
        interaction.coords.commit();
    }
}

fn smooth_end_tick(scope: &mut Scope, id: InteractionId, dom: &dyn DomQuery) {
    let now = scope.now();
    let Some(state) = scope.interaction(id).map(|i| i.inertia) else {
        return;
    };
    let duration = glide_options(scope, id)
        .map(|o| o.smooth_end_duration)
        .unwrap_or_default();

    let t = now - state.t0;
    if t < duration {
        let sx = ease_out_quad(t, 0.0, state.xe, duration);
        let sy = ease_out_quad(t, 0.0, state.ye, duration);
        if let Some(interaction) = scope.interaction_mut(id) {
            interaction.inertia.sx = sx;
            interaction.inertia.sy = sy;
        }
        set_glide_coords(scope, id, now);
        scope.move_interaction(id, dom);
    } else {
        if let Some(interaction) = scope.interaction_mut(id) {
            interaction.inertia.sx = state.xe;
            interaction.inertia.sy = state.ye;
        }
        set_glide_coords(scope, id, now);
        scope.move_interaction(id, dom);
        scope.end(id, dom);
    }

    if let Some(interaction) = scope.interaction_mut(id) {
        interaction.coords.commit();
    }
}

fn ease_out_quad(t: f64, start: f64, distance: f64, duration: f64) -> f64 {
    let t = t / duration;
    -distance * t * (t - 2.0) + start
}

fn quadratic_curve_point(start: Point, control: Point, end: Point, t: f64) -> Point {
    let it = 1.0 - t;
    Point::new(
        it * it * start.x + 2.0 * it * t * control.x + t * t * end.x,
        it * it * start.y + 2.0 * it * t * control.y + t * t * end.y,
    )
}
