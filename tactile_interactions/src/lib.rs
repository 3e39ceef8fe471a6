// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tactile Interactions: the pointer-driven action state machine.
//!
//! ## Overview
//!
//! A [`Scope`] owns everything: the registered [interactables](Interactable)
//! (per-target options and listeners), the live [interactions](Interaction)
//! (one per gesture session), and the plugin registry through which
//! cross-cutting features observe state-machine [signals](Signal).
//!
//! The host feeds raw pointer samples into [`Scope::pointer_down`],
//! [`Scope::pointer_move`] and [`Scope::pointer_up`]. A finder routes each
//! sample to the right interaction; once the host (or an auto-start plugin)
//! calls [`Scope::start`], every further move runs the action's modifier
//! pipeline and delivers typed [events](InteractEvent) to the interactable's
//! listeners.
//!
//! Element queries and time are abstracted behind [`DomQuery`] and
//! [`Clock`], so the core runs the same against a browser bridge, a native
//! scene graph, or the in-memory [`testing`] doubles.
//!
//! Two bundled plugins extend the lifecycle: [`inertia`] turns fast releases
//! into decaying glides (with resume-by-down), and [`reflow`] replays an
//! action over an interactable's elements without any pointer input.
//!
//! ## Minimal example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Rect};
//! use tactile_coords::{Edges, PointerId, PointerSample, PointerType};
//! use tactile_interactions::testing::{ManualClock, TestDom};
//! use tactile_interactions::{
//!     ActionKind, ActionOptions, OptionsSet, Phase, Scope, Target,
//! };
//!
//! let clock = ManualClock::at(1000.0);
//! let mut scope = Scope::new(clock.handle());
//! let mut dom = TestDom::new();
//! let element = dom.add_element(dom.root(), Rect::new(0.0, 0.0, 100.0, 100.0));
//!
//! let options = OptionsSet {
//!     drag: ActionOptions::new().enabled(true),
//!     ..OptionsSet::default()
//! };
//! let target = scope.add_interactable(Target::Element(element), dom.root(), options, &dom);
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&log);
//! scope.interactables.by_id_mut(target).unwrap().on(
//!     ActionKind::Drag,
//!     Phase::Move,
//!     Rc::new(move |event, _reply| sink.borrow_mut().push(event.page)),
//! );
//!
//! let at = |x: f64, y: f64, time: f64| {
//!     PointerSample::new(PointerId(1), PointerType::Mouse)
//!         .at(Point::new(x, y), Point::new(x, y), time)
//! };
//!
//! let id = scope.pointer_down(at(10.0, 10.0, 1000.0), element, &dom).unwrap();
//! scope.start(id, ActionKind::Drag, Edges::NONE, target, element, &dom);
//!
//! clock.advance(16.0);
//! scope.pointer_move(at(30.0, 25.0, 1016.0), &dom);
//!
//! assert_eq!(log.borrow().last().copied(), Some(Point::new(30.0, 25.0)));
//! ```

pub mod dom;
pub mod event;
pub mod inertia;
pub mod interactable;
pub mod interaction;
pub mod options;
pub mod reflow;
pub mod scope;
pub mod testing;

mod finder;

pub use dom::{Clock, DomQuery, ElementId};
pub use event::{EventListener, EventReply, InteractEvent, Phase};
pub use interactable::{Interactable, InteractableId, InteractableSet, Target};
pub use interaction::{Interaction, PointerRecord};
pub use options::{ActionKind, ActionOptions, ActionState, InertiaOptions, OptionsSet};
pub use reflow::ReflowHandle;
pub use scope::{InteractionId, Plugin, Scope, Signal};
