// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactables: per-target options and listener bindings, and the set
//! that owns them.

use kurbo::Point;

use crate::dom::{DomQuery, ElementId};
use crate::event::{EventListener, EventReply, InteractEvent, Phase};
use crate::options::{ActionKind, OptionsSet};

/// Stable handle to an [`Interactable`] within one scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InteractableId(pub usize);

/// What an interactable is bound to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// One literal element.
    Element(ElementId),
    /// Every element matching a selector within the context.
    Selector(String),
}

/// Configuration and listeners for one target/context pair.
#[derive(Clone)]
pub struct Interactable {
    /// The set-assigned id.
    pub id: InteractableId,
    /// The bound target.
    pub target: Target,
    /// The containing document or root element.
    pub context: ElementId,
    /// Per-action options.
    pub options: OptionsSet,
    listeners: Vec<(ActionKind, Phase, EventListener)>,
}

impl std::fmt::Debug for Interactable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interactable")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("context", &self.context)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Interactable {
    /// Registers a listener for one action/phase pair. Multiple listeners
    /// run in registration order.
    pub fn on(&mut self, action: ActionKind, phase: Phase, listener: EventListener) {
        self.listeners.push((action, phase, listener));
    }

    /// The listeners registered for `(action, phase)`, in order.
    fn listeners_for(&self, action: ActionKind, phase: Phase) -> Vec<EventListener> {
        self.listeners
            .iter()
            .filter(|(a, p, _)| *a == action && *p == phase)
            .map(|(_, _, listener)| listener.clone())
            .collect()
    }

    /// Delivers `event` to the matching listeners, collecting the reply.
    pub fn fire(&self, event: &InteractEvent, reply: &mut EventReply) {
        for listener in self.listeners_for(event.action, event.phase) {
            listener(event, reply);
        }
    }

    /// Whether this interactable's target matches `node` within its context.
    pub fn matches(&self, node: ElementId, dom: &dyn DomQuery) -> bool {
        let target_hit = match &self.target {
            Target::Element(element) => *element == node,
            Target::Selector(selector) => dom.matches_selector(node, selector),
        };
        target_hit && dom.contains(self.context, node)
    }

    /// The elements this interactable currently applies to.
    pub fn elements(&self, dom: &dyn DomQuery) -> Vec<ElementId> {
        match &self.target {
            Target::Element(element) => vec![*element],
            Target::Selector(selector) => dom.select_all(self.context, selector),
        }
    }

    /// Where a synthetic replay places its pointer for `element`.
    pub(crate) fn replay_origin(&self, element: ElementId, dom: &dyn DomQuery) -> Option<Point> {
        dom.element_rect(element).map(|rect| rect.origin())
    }
}

/// The scope's collection of interactables, keyed by (target, context).
#[derive(Debug, Default)]
pub struct InteractableSet {
    items: Vec<Option<Interactable>>,
}

impl InteractableSet {
    /// Creates or looks up the interactable for `(target, context)`.
    ///
    /// A second insert for the same pair returns the existing id and leaves
    /// its options untouched.
    pub fn insert(&mut self, target: Target, context: ElementId, options: OptionsSet) -> InteractableId {
        if let Some(existing) = self.get(&target, context) {
            return existing;
        }

        let id = InteractableId(self.items.len());
        self.items.push(Some(Interactable {
            id,
            target,
            context,
            options,
            listeners: Vec::new(),
        }));
        id
    }

    /// Exact lookup by target and context.
    #[must_use]
    pub fn get(&self, target: &Target, context: ElementId) -> Option<InteractableId> {
        self.items
            .iter()
            .flatten()
            .find(|item| item.target == *target && item.context == context)
            .map(|item| item.id)
    }

    /// Access by id.
    #[must_use]
    pub fn by_id(&self, id: InteractableId) -> Option<&Interactable> {
        self.items.get(id.0)?.as_ref()
    }

    /// Mutable access by id.
    pub fn by_id_mut(&mut self, id: InteractableId) -> Option<&mut Interactable> {
        self.items.get_mut(id.0)?.as_mut()
    }

    /// Calls `f` for every interactable whose target matches `node` within
    /// its context, in registration order, short-circuiting once `f` returns
    /// `Some`.
    pub fn for_each_match<R>(
        &self,
        node: ElementId,
        dom: &dyn DomQuery,
        mut f: impl FnMut(&Interactable) -> Option<R>,
    ) -> Option<R> {
        self.items
            .iter()
            .flatten()
            .filter(|item| item.matches(node, dom))
            .find_map(|item| f(item))
    }

    /// Removes and returns the record. Further access through the stale id
    /// yields `None`.
    pub(crate) fn remove(&mut self, id: InteractableId) -> Option<Interactable> {
        self.items.get_mut(id.0)?.take()
    }

    /// Number of live interactables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.iter().flatten().count()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestDom;
    use kurbo::Rect;

    fn square(dom: &mut TestDom, root: ElementId) -> ElementId {
        dom.add_element(root, Rect::new(0.0, 0.0, 100.0, 100.0))
    }

    #[test]
    fn duplicate_target_context_returns_existing_id() {
        let mut dom = TestDom::new();
        let root = dom.root();
        let element = square(&mut dom, root);

        let mut set = InteractableSet::default();
        let a = set.insert(Target::Element(element), root, OptionsSet::default());
        let b = set.insert(Target::Element(element), root, OptionsSet::default());

        assert_eq!(a, b);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn selector_and_element_targets_match_by_kind() {
        let mut dom = TestDom::new();
        let root = dom.root();
        let tagged = square(&mut dom, root);
        let plain = square(&mut dom, root);
        dom.tag(tagged, ".item");

        let mut set = InteractableSet::default();
        set.insert(Target::Selector(".item".into()), root, OptionsSet::default());
        let by_element = set.insert(Target::Element(plain), root, OptionsSet::default());

        let hit = set.for_each_match(tagged, &dom, |item| Some(item.id));
        assert_eq!(hit, set.get(&Target::Selector(".item".into()), root));

        let hit = set.for_each_match(plain, &dom, |item| Some(item.id));
        assert_eq!(hit, Some(by_element));
    }

    #[test]
    fn match_requires_context_containment() {
        let mut dom = TestDom::new();
        let root = dom.root();
        let other_root = dom.add_element(root, Rect::ZERO);
        let element = square(&mut dom, root);
        dom.tag(element, ".item");

        let mut set = InteractableSet::default();
        set.insert(Target::Selector(".item".into()), other_root, OptionsSet::default());

        // The element matches the selector but lives outside the context.
        assert!(set.for_each_match(element, &dom, |item| Some(item.id)).is_none());
    }

    #[test]
    fn fire_delivers_to_matching_listeners_and_collects_the_reply() {
        use crate::event::{EventReply, InteractEvent, Phase};
        use crate::scope::InteractionId;
        use kurbo::{Point, Vec2};
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut dom = TestDom::new();
        let root = dom.root();
        let element = square(&mut dom, root);

        let mut set = InteractableSet::default();
        let id = set.insert(Target::Element(element), root, OptionsSet::default());

        let log = Rc::new(RefCell::new(Vec::new()));
        if let Some(record) = set.by_id_mut(id) {
            for (action, phase, tag) in [
                (ActionKind::Drag, Phase::Move, "drag-move"),
                (ActionKind::Drag, Phase::End, "drag-end"),
                (ActionKind::Resize, Phase::Move, "resize-move"),
            ] {
                let log = Rc::clone(&log);
                record.on(
                    action,
                    phase,
                    Rc::new(move |_event, reply: &mut EventReply| {
                        log.borrow_mut().push(tag);
                        reply.stop_interaction();
                    }),
                );
            }
        }

        let event = InteractEvent {
            interaction: InteractionId(0),
            interactable: id,
            element,
            action: ActionKind::Drag,
            phase: Phase::Move,
            page: Point::ZERO,
            client: Point::ZERO,
            delta: Vec2::ZERO,
            velocity: Vec2::ZERO,
            speed: 0.0,
            time: 0.0,
        };
        let mut reply = EventReply::default();
        if let Some(record) = set.by_id(id) {
            record.fire(&event, &mut reply);
        }

        assert_eq!(*log.borrow(), vec!["drag-move"]);
        assert!(reply.stop_requested());
    }

    #[test]
    fn removed_id_is_inert() {
        let mut dom = TestDom::new();
        let root = dom.root();
        let element = square(&mut dom, root);

        let mut set = InteractableSet::default();
        let id = set.insert(Target::Element(element), root, OptionsSet::default());
        assert!(set.remove(id).is_some());

        assert!(set.by_id(id).is_none());
        assert!(set.get(&Target::Element(element), root).is_none());
        assert!(set.remove(id).is_none());
    }
}
