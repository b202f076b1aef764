//! Drawing surface abstraction and pointer-event subscriptions.
//!
//! A surface owns the scene graph and a registry of pointer subscriptions.
//! Subscriptions map a `(target, kind)` pair to a [`Reaction`]; the host
//! asks the surface which reactions fire for an event and applies them to
//! the chart state. Every `subscribe` returns a [`Subscription`] handle that
//! disposes the registration.

use crate::scene::{NodeId, Scene};

/// Host-page element id of the chart title.
pub const TITLE_ID: &str = "plot-title";

/// Host-page element id of the tooltip box.
pub const TOOLTIP_ID: &str = "tooltip";

/// What a pointer event is aimed at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// A node in the scene.
    Node(NodeId),
    /// An element owned by the host, addressed by id.
    Host(String),
}

impl EventTarget {
    pub fn host(id: &str) -> Self {
        Self::Host(id.to_string())
    }

    /// The chart title element.
    pub fn title() -> Self {
        Self::host(TITLE_ID)
    }
}

/// Kind of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Enter,
    Move,
    Leave,
}

/// A pointer event in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f64, y: f64) -> Self {
        Self { kind, x, y }
    }
}

/// State change triggered by a subscribed pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reaction {
    /// Show the tooltip for the zone at this index.
    ShowTooltip { zone: usize },
    /// Move the tooltip along with the cursor.
    TrackTooltip,
    /// Hide the tooltip.
    HideTooltip,
    /// Animate the legend towards this opacity.
    FadeLegend { to: f64 },
}

/// Disposer handle for a registered subscription.
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "dropping the handle leaks the subscription until the surface is dropped"]
pub struct Subscription(u64);

impl Subscription {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Scene graph plus event subscription registry.
pub trait DrawingSurface {
    fn scene(&self) -> &Scene;

    fn scene_mut(&mut self) -> &mut Scene;

    /// Register `reaction` for `kind` events on `target`.
    fn subscribe(&mut self, target: EventTarget, kind: PointerKind, reaction: Reaction)
        -> Subscription;

    /// Dispose a subscription. Returns whether it was still registered.
    fn unsubscribe(&mut self, subscription: Subscription) -> bool;

    /// Reactions registered for `kind` on `target`, in registration order.
    fn reactions(&self, target: &EventTarget, kind: PointerKind) -> Vec<Reaction>;
}

#[derive(Debug, Clone)]
struct Registration {
    id: u64,
    target: EventTarget,
    kind: PointerKind,
    reaction: Reaction,
}

/// In-memory drawing surface.
#[derive(Debug, Clone, Default)]
pub struct SceneSurface {
    scene: Scene,
    registrations: Vec<Registration>,
    next_id: u64,
}

impl SceneSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.registrations.len()
    }

    /// Top-most scene node with at least one subscription whose rect
    /// contains `point`.
    pub fn hit_test(&self, point: (f64, f64)) -> Option<NodeId> {
        self.registrations
            .iter()
            .filter_map(|r| match r.target {
                EventTarget::Node(id) => Some(id),
                EventTarget::Host(_) => None,
            })
            .filter(|id| self.scene.rect_contains(*id, point))
            .max()
    }
}

impl DrawingSurface for SceneSurface {
    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    fn subscribe(
        &mut self,
        target: EventTarget,
        kind: PointerKind,
        reaction: Reaction,
    ) -> Subscription {
        self.next_id += 1;
        let id = self.next_id;
        self.registrations.push(Registration {
            id,
            target,
            kind,
            reaction,
        });
        Subscription(id)
    }

    fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.id != subscription.0);
        before != self.registrations.len()
    }

    fn reactions(&self, target: &EventTarget, kind: PointerKind) -> Vec<Reaction> {
        self.registrations
            .iter()
            .filter(|r| &r.target == target && r.kind == kind)
            .map(|r| r.reaction)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Shape, Style};

    #[test]
    fn test_subscribe_and_dispatch() {
        let mut surface = SceneSurface::new();
        let title = EventTarget::title();
        let _enter = surface.subscribe(title.clone(), PointerKind::Enter, Reaction::FadeLegend { to: 1.0 });
        let _leave = surface.subscribe(title.clone(), PointerKind::Leave, Reaction::FadeLegend { to: 0.0 });

        assert_eq!(
            surface.reactions(&title, PointerKind::Enter),
            vec![Reaction::FadeLegend { to: 1.0 }]
        );
        assert!(surface.reactions(&title, PointerKind::Move).is_empty());
        assert!(surface
            .reactions(&EventTarget::host(TOOLTIP_ID), PointerKind::Enter)
            .is_empty());
    }

    #[test]
    fn test_unsubscribe_disposes_once() {
        let mut surface = SceneSurface::new();
        let title = EventTarget::title();
        let handle = surface.subscribe(title.clone(), PointerKind::Enter, Reaction::HideTooltip);
        let id = handle.id();
        assert_eq!(surface.subscription_count(), 1);

        assert!(surface.unsubscribe(handle));
        assert!(surface.reactions(&title, PointerKind::Enter).is_empty());
        assert!(!surface.unsubscribe(Subscription(id)));
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut surface = SceneSurface::new();
        let root = surface.scene().root();
        let below = surface
            .scene_mut()
            .append(root, Shape::rect(0.0, 0.0, 100.0, 100.0), Style::default());
        let above = surface
            .scene_mut()
            .append(root, Shape::rect(50.0, 0.0, 100.0, 100.0), Style::default());
        let unsubscribed = surface
            .scene_mut()
            .append(root, Shape::rect(0.0, 0.0, 500.0, 500.0), Style::default());

        let _a = surface.subscribe(EventTarget::Node(below), PointerKind::Enter, Reaction::HideTooltip);
        let _b = surface.subscribe(EventTarget::Node(above), PointerKind::Enter, Reaction::HideTooltip);

        assert_eq!(surface.hit_test((10.0, 10.0)), Some(below));
        assert_eq!(surface.hit_test((60.0, 10.0)), Some(above));
        assert_eq!(surface.hit_test((300.0, 300.0)), None);
        assert_ne!(surface.hit_test((300.0, 300.0)), Some(unsubscribed));
    }
}
