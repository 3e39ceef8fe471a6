// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests for the `tactile_interactions` crate.
//!
//! These drive a [`Scope`] with synthetic pointer samples through whole
//! action lifecycles: start preconditions, modifier-shaped moves, inertia
//! and smooth-end glides, resume-by-down, and reflow deferral against a
//! running interaction.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect, Vec2};
use tactile_coords::{Edges, PointerId, PointerSample, PointerType};
use tactile_interactions::testing::{ManualClock, TestDom};
use tactile_interactions::{
    inertia, reflow, ActionKind, ActionOptions, ElementId, InertiaOptions, InteractableId,
    OptionsSet, Phase, Scope, Target,
};
use tactile_modifiers::restrict::{RestrictBounds, RestrictEdgesOptions};
use tactile_modifiers::snap::{SnapOptions, SnapTarget};
use tactile_modifiers::ModifierSpec;

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

struct Rig {
    scope: Scope,
    dom: TestDom,
    clock: ManualClock,
    element: ElementId,
    target: InteractableId,
    log: Rc<RefCell<Vec<(String, Point)>>>,
}

/// Builds a scope (with the inertia and reflow plugins), one 100x100
/// element, and an interactable that logs every event as (type, page).
fn rig(options: OptionsSet) -> Rig {
    let clock = ManualClock::at(1000.0);
    let mut scope = Scope::new(clock.handle());
    scope.use_plugin(inertia::plugin());
    scope.use_plugin(reflow::plugin());

    let mut dom = TestDom::new();
    let root = dom.root();
    let element = dom.add_element(root, Rect::new(0.0, 0.0, 100.0, 100.0));
    let target = scope.add_interactable(Target::Element(element), root, options, &dom);

    let log: Rc<RefCell<Vec<(String, Point)>>> = Rc::new(RefCell::new(Vec::new()));
    if let Some(record) = scope.interactables.by_id_mut(target) {
        for action in [ActionKind::Drag, ActionKind::Resize, ActionKind::Gesture] {
            for phase in [
                Phase::Start,
                Phase::Move,
                Phase::End,
                Phase::InertiaStart,
                Phase::Resume,
                Phase::Reflow,
            ] {
                let sink = Rc::clone(&log);
                record.on(
                    action,
                    phase,
                    Rc::new(move |event, _reply| {
                        sink.borrow_mut().push((event.event_type(), event.page));
                    }),
                );
            }
        }
    }

    Rig {
        scope,
        dom,
        clock,
        element,
        target,
        log,
    }
}

fn draggable() -> OptionsSet {
    OptionsSet {
        drag: ActionOptions::new().enabled(true),
        ..OptionsSet::default()
    }
}

fn types(log: &Rc<RefCell<Vec<(String, Point)>>>) -> Vec<String> {
    log.borrow().iter().map(|(t, _)| t.clone()).collect()
}

#[test]
fn drag_lifecycle_fires_start_move_end() {
    let mut r = rig(draggable());

    let deltas: Rc<RefCell<Vec<Vec2>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&deltas);
    if let Some(record) = r.scope.interactables.by_id_mut(r.target) {
        record.on(
            ActionKind::Drag,
            Phase::Move,
            Rc::new(move |event, _reply| sink.borrow_mut().push(event.delta)),
        );
    }

    let id = r
        .scope
        .pointer_down(mouse(10.0, 10.0, 1000.0), r.element, &r.dom)
        .unwrap();
    assert!(r
        .scope
        .start(id, ActionKind::Drag, Edges::NONE, r.target, r.element, &r.dom));

    r.clock.advance(16.0);
    r.scope.pointer_move(mouse(30.0, 25.0, 1016.0), &r.dom);
    r.clock.advance(4.0);
    r.scope.pointer_up(mouse(30.0, 25.0, 1020.0), &r.dom);

    // The start includes an immediate first move at the down position.
    assert_eq!(
        types(&r.log),
        vec!["dragstart", "dragmove", "dragmove", "dragend"]
    );
    let log = r.log.borrow();
    assert_eq!(log[1].1, Point::new(10.0, 10.0));
    assert_eq!(log[2].1, Point::new(30.0, 25.0));
    assert_eq!(log[3].1, Point::new(30.0, 25.0));

    assert_eq!(deltas.borrow().last().copied(), Some(Vec2::new(20.0, 15.0)));
    assert!(!r.scope.interaction(id).unwrap().interacting());
}

#[test]
fn start_requires_a_down_pointer_and_an_enabled_action() {
    // Released pointer: the interaction exists but nothing is down.
    let mut r = rig(draggable());
    let id = r
        .scope
        .pointer_down(mouse(10.0, 10.0, 1000.0), r.element, &r.dom)
        .unwrap();
    r.scope.pointer_up(mouse(10.0, 10.0, 1000.0), &r.dom);

    assert!(!r
        .scope
        .start(id, ActionKind::Drag, Edges::NONE, r.target, r.element, &r.dom));
    assert_eq!(r.scope.interaction(id).unwrap().prepared.kind, None);

    // Disabled action: the down is fine but the options say no.
    let mut r = rig(OptionsSet::default());
    let id = r
        .scope
        .pointer_down(mouse(10.0, 10.0, 1000.0), r.element, &r.dom)
        .unwrap();
    assert!(!r
        .scope
        .start(id, ActionKind::Drag, Edges::NONE, r.target, r.element, &r.dom));
    assert!(types(&r.log).is_empty());
}

#[test]
fn start_on_a_live_interaction_is_rejected() {
    let mut r = rig(draggable());
    let id = r
        .scope
        .pointer_down(mouse(10.0, 10.0, 1000.0), r.element, &r.dom)
        .unwrap();
    assert!(r
        .scope
        .start(id, ActionKind::Drag, Edges::NONE, r.target, r.element, &r.dom));

    // A second start while the drag runs fails and resets the prepared
    // action, leaving the running interaction alone.
    assert!(!r
        .scope
        .start(id, ActionKind::Drag, Edges::NONE, r.target, r.element, &r.dom));
    assert_eq!(r.scope.interaction(id).unwrap().prepared.kind, None);
    assert!(r.scope.interaction(id).unwrap().interacting());

    let starts = types(&r.log).iter().filter(|t| *t == "dragstart").count();
    assert_eq!(starts, 1, "the rejected start must not re-fire");
}

#[test]
fn gesture_needs_a_second_pointer_before_it_starts() {
    let mut r = rig(OptionsSet {
        gesture: ActionOptions::new().enabled(true),
        ..OptionsSet::default()
    });

    let id = r
        .scope
        .pointer_down(touch(1, 10.0, 10.0, 1000.0), r.element, &r.dom)
        .unwrap();
    assert!(!r
        .scope
        .start(id, ActionKind::Gesture, Edges::NONE, r.target, r.element, &r.dom));

    // The second touch joins the same interaction; now the start succeeds.
    let joined = r
        .scope
        .pointer_down(touch(2, 30.0, 10.0, 1008.0), r.element, &r.dom)
        .unwrap();
    assert_eq!(joined, id);
    assert!(r
        .scope
        .start(id, ActionKind::Gesture, Edges::NONE, r.target, r.element, &r.dom));

    assert_eq!(types(&r.log)[0], "gesturestart");
}

#[test]
fn duplicate_move_fires_no_action_event() {
    let mut r = rig(draggable());
    let id = r
        .scope
        .pointer_down(mouse(10.0, 10.0, 1000.0), r.element, &r.dom)
        .unwrap();
    r.scope
        .start(id, ActionKind::Drag, Edges::NONE, r.target, r.element, &r.dom);

    r.clock.advance(16.0);
    r.scope.pointer_move(mouse(30.0, 25.0, 1016.0), &r.dom);
    r.clock.advance(16.0);
    r.scope.pointer_move(mouse(30.0, 25.0, 1032.0), &r.dom);

    let moves = types(&r.log).iter().filter(|t| *t == "dragmove").count();
    assert_eq!(moves, 2, "the repeated position must not re-fire");
}

#[test]
fn snap_shapes_the_move_and_the_end_does_not_unsnap() {
    let mut options = draggable();
    options.drag = options.drag.modifier(ModifierSpec::Snap(
        SnapOptions::new()
            .target(SnapTarget::point(Point::new(50.0, 100.0)))
            .enabled(true),
    ));
    let mut r = rig(options);

    let id = r
        .scope
        .pointer_down(mouse(10.0, 10.0, 1000.0), r.element, &r.dom)
        .unwrap();
    r.scope
        .start(id, ActionKind::Drag, Edges::NONE, r.target, r.element, &r.dom);

    r.clock.advance(16.0);
    r.scope.pointer_move(mouse(10.0, 20.0, 1016.0), &r.dom);
    r.clock.advance(4.0);
    // Release at the raw pointer position, away from the snap target.
    r.scope.pointer_up(mouse(10.0, 20.0, 1020.0), &r.dom);

    let log = r.log.borrow();
    let (end_type, end_page) = log.last().unwrap();
    assert_eq!(end_type, "dragend");
    assert_eq!(*end_page, Point::new(50.0, 100.0));
    for (_, page) in log.iter() {
        assert_eq!(*page, Point::new(50.0, 100.0));
    }
}

#[test]
fn restrict_edges_clamps_only_the_active_axis() {
    let options = OptionsSet {
        resize: ActionOptions::new().enabled(true).modifier(
            ModifierSpec::RestrictEdges(
                RestrictEdgesOptions::new()
                    .inner(RestrictBounds::rect(Rect::new(200.0, 200.0, 400.0, 400.0)))
                    .outer(RestrictBounds::rect(Rect::new(0.0, 0.0, 600.0, 600.0)))
                    .enabled(true),
            ),
        ),
        ..OptionsSet::default()
    };
    let mut r = rig(options);
    let edges = Edges {
        top: true,
        ..Edges::NONE
    };

    let id = r
        .scope
        .pointer_down(mouse(50.0, 0.0, 1000.0), r.element, &r.dom)
        .unwrap();
    r.scope
        .start(id, ActionKind::Resize, edges, r.target, r.element, &r.dom);

    // Dragging the top edge past the inner bound pins it there; x is free.
    r.clock.advance(16.0);
    r.scope.pointer_move(mouse(50.0, 300.0, 1016.0), &r.dom);
    assert_eq!(r.log.borrow().last().unwrap().1, Point::new(50.0, 200.0));

    // And past the outer bound on the way back up.
    r.clock.advance(16.0);
    r.scope.pointer_move(mouse(50.0, -50.0, 1032.0), &r.dom);
    assert_eq!(r.log.borrow().last().unwrap().1, Point::new(50.0, 0.0));
}

#[test]
fn fast_release_glides_and_ends_near_the_projected_point() {
    let mut options = draggable();
    options.drag = options.drag.inertia(InertiaOptions::new().enabled(true));
    let mut r = rig(options);

    let id = r
        .scope
        .pointer_down(mouse(0.0, 0.0, 1000.0), r.element, &r.dom)
        .unwrap();
    r.scope
        .start(id, ActionKind::Drag, Edges::NONE, r.target, r.element, &r.dom);

    // 16px in 16ms: 1000px/s, well past the activation threshold.
    r.clock.advance(16.0);
    r.scope.pointer_move(mouse(16.0, 0.0, 1016.0), &r.dom);
    r.clock.advance(4.0);
    r.scope.pointer_up(mouse(16.0, 0.0, 1020.0), &r.dom);

    assert!(types(&r.log).contains(&"draginertiastart".to_owned()));
    assert!(r.scope.needs_tick());

    let mut frames = 0;
    while r.scope.needs_tick() && frames < 200 {
        r.clock.advance(16.0);
        r.scope.tick(&r.dom);
        frames += 1;
    }
    assert!(frames < 200, "the glide must converge");

    let log = r.log.borrow();
    let (end_type, end_page) = log.last().unwrap();
    assert_eq!(end_type, "dragend");
    // xe = (v0 - te) / lambda ~= 99.95 past the release point at 16.
    assert!(end_page.x > 110.0 && end_page.x < 120.0, "got {end_page:?}");
    assert!(end_page.y.abs() < 1.0);
    assert!(!r.scope.interaction(id).unwrap().interacting());
}

#[test]
fn slow_release_ends_synchronously() {
    let mut options = draggable();
    options.drag = options.drag.inertia(InertiaOptions::new().enabled(true));
    let mut r = rig(options);

    let id = r
        .scope
        .pointer_down(mouse(0.0, 0.0, 1000.0), r.element, &r.dom)
        .unwrap();
    r.scope
        .start(id, ActionKind::Drag, Edges::NONE, r.target, r.element, &r.dom);

    // 5px in 200ms: 25px/s, below the minimum speed.
    r.clock.advance(200.0);
    r.scope.pointer_move(mouse(5.0, 0.0, 1200.0), &r.dom);
    r.clock.advance(4.0);
    r.scope.pointer_up(mouse(5.0, 0.0, 1204.0), &r.dom);

    assert!(!r.scope.needs_tick());
    let log = types(&r.log);
    assert_eq!(log.last().unwrap(), "dragend");
    assert!(!log.contains(&"draginertiastart".to_owned()));
}

#[test]
fn glide_activation_respects_the_minimum_speed() {
    // 15px in 100ms: 150px/s, above the default minimum of 100.
    let mut options = draggable();
    options.drag = options.drag.inertia(InertiaOptions::new().enabled(true));
    let mut r = rig(options.clone());

    let id = r
        .scope
        .pointer_down(mouse(0.0, 0.0, 1000.0), r.element, &r.dom)
        .unwrap();
    r.scope
        .start(id, ActionKind::Drag, Edges::NONE, r.target, r.element, &r.dom);
    r.clock.advance(100.0);
    r.scope.pointer_move(mouse(15.0, 0.0, 1100.0), &r.dom);
    r.clock.advance(4.0);
    r.scope.pointer_up(mouse(15.0, 0.0, 1104.0), &r.dom);
    assert!(r.scope.needs_tick());

    // 1px in 200ms: 5px/s, far below it.
    let mut r = rig(options);
    let id = r
        .scope
        .pointer_down(mouse(0.0, 0.0, 1000.0), r.element, &r.dom)
        .unwrap();
    r.scope
        .start(id, ActionKind::Drag, Edges::NONE, r.target, r.element, &r.dom);
    r.clock.advance(200.0);
    r.scope.pointer_move(mouse(1.0, 0.0, 1200.0), &r.dom);
    r.clock.advance(4.0);
    r.scope.pointer_up(mouse(1.0, 0.0, 1204.0), &r.dom);
    assert!(!r.scope.needs_tick());
    // With no modifiers there is nothing to smooth toward either, even
    // when the tiny last move was deduplicated away.
    assert!(!types(&r.log).contains(&"draginertiastart".to_owned()));
}

#[test]
fn end_only_snap_triggers_a_smooth_end_glide() {
    let mut options = draggable();
    options.drag = options
        .drag
        .modifier(ModifierSpec::Snap(
            SnapOptions::new()
                .target(SnapTarget::point(Point::new(100.0, 0.0)))
                .enabled(true)
                .end_only(true),
        ))
        .inertia(InertiaOptions::new().enabled(true));
    let mut r = rig(options);

    let id = r
        .scope
        .pointer_down(mouse(0.0, 0.0, 1000.0), r.element, &r.dom)
        .unwrap();
    r.scope
        .start(id, ActionKind::Drag, Edges::NONE, r.target, r.element, &r.dom);

    // Too slow for inertia, but the end-only snap wants (100, 0).
    r.clock.advance(200.0);
    r.scope.pointer_move(mouse(10.0, 0.0, 1200.0), &r.dom);
    r.clock.advance(4.0);
    r.scope.pointer_up(mouse(10.0, 0.0, 1204.0), &r.dom);

    // The inertiastart event already reports the snapped position.
    {
        let log = r.log.borrow();
        let (_, page) = log
            .iter()
            .find(|(t, _)| t == "draginertiastart")
            .expect("smooth end must fire inertiastart");
        assert_eq!(*page, Point::new(100.0, 0.0));
    }
    assert!(r.scope.needs_tick());

    let mut frames = 0;
    while r.scope.needs_tick() && frames < 50 {
        r.clock.advance(16.0);
        r.scope.tick(&r.dom);
        frames += 1;
    }

    let log = r.log.borrow();
    let (end_type, end_page) = log.last().unwrap();
    assert_eq!(end_type, "dragend");
    assert!(end_page.x > 99.0 && end_page.x <= 100.0, "got {end_page:?}");
}

#[test]
fn pointer_down_during_a_glide_resumes_the_action() {
    let mut options = draggable();
    options.drag = options.drag.inertia(InertiaOptions::new().enabled(true));
    let mut r = rig(options);

    let id = r
        .scope
        .pointer_down(mouse(0.0, 0.0, 1000.0), r.element, &r.dom)
        .unwrap();
    r.scope
        .start(id, ActionKind::Drag, Edges::NONE, r.target, r.element, &r.dom);
    r.clock.advance(16.0);
    r.scope.pointer_move(mouse(16.0, 0.0, 1016.0), &r.dom);
    r.clock.advance(4.0);
    r.scope.pointer_up(mouse(16.0, 0.0, 1020.0), &r.dom);
    assert!(r.scope.needs_tick());

    for _ in 0..5 {
        r.clock.advance(16.0);
        r.scope.tick(&r.dom);
    }

    // Down on the gliding element cancels the glide and resumes in place.
    let now = 1020.0 + 5.0 * 16.0;
    let resumed = r
        .scope
        .pointer_down(mouse(50.0, 0.0, now), r.element, &r.dom)
        .unwrap();
    assert_eq!(resumed, id);
    assert!(!r.scope.needs_tick());
    assert!(r.scope.interaction(id).unwrap().interacting());
    assert!(types(&r.log).contains(&"dragresume".to_owned()));

    // The resumed action keeps delivering moves, then ends normally.
    r.clock.advance(200.0);
    r.scope.pointer_move(mouse(60.0, 0.0, now + 200.0), &r.dom);
    r.clock.advance(4.0);
    r.scope.pointer_up(mouse(60.0, 0.0, now + 204.0), &r.dom);

    let log = types(&r.log);
    assert_eq!(log.last().unwrap(), "dragend");
    assert!(!r.scope.interaction(id).unwrap().interacting());
}

#[test]
fn reflow_of_a_running_interaction_defers_to_its_stop() {
    let mut r = rig(draggable());

    let id = r
        .scope
        .pointer_down(mouse(10.0, 10.0, 1000.0), r.element, &r.dom)
        .unwrap();
    r.scope
        .start(id, ActionKind::Drag, Edges::NONE, r.target, r.element, &r.dom);
    r.clock.advance(16.0);
    r.scope.pointer_move(mouse(30.0, 25.0, 1016.0), &r.dom);

    let handles = r
        .scope
        .reflow(r.target, ActionKind::Drag, Edges::NONE, &r.dom);
    assert_eq!(handles.len(), 1);
    assert!(!handles[0].is_complete(), "running action defers completion");
    // No synthetic interaction was allocated for the busy element.
    assert_eq!(r.scope.interactions().count(), 1);

    r.clock.advance(4.0);
    r.scope.pointer_up(mouse(30.0, 25.0, 1036.0), &r.dom);
    assert!(handles[0].is_complete());
}
