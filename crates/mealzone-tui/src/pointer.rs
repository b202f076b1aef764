//! Turns raw mouse positions into enter/move/leave pointer events.
//!
//! The terminal only reports where the mouse is. The tracker remembers the
//! target under the previous position so it can emit `Leave` on the old
//! target and `Enter` on the new one when the pointer crosses a boundary.

use mealzone_engine::{EventTarget, PointerEvent, PointerKind};

/// Remembers the target currently under the pointer.
#[derive(Debug, Default, Clone)]
pub struct PointerTracker {
    current: Option<EventTarget>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target the pointer is over, if any.
    pub fn current(&self) -> Option<&EventTarget> {
        self.current.as_ref()
    }

    /// Pointer moved to `(x, y)` over `target`.
    ///
    /// Returns the events to dispatch in order.
    pub fn update(
        &mut self,
        target: Option<EventTarget>,
        x: f64,
        y: f64,
    ) -> Vec<(EventTarget, PointerEvent)> {
        if target == self.current {
            return target
                .map(|t| vec![(t, PointerEvent::new(PointerKind::Move, x, y))])
                .unwrap_or_default();
        }

        let mut events = Vec::with_capacity(2);
        if let Some(previous) = self.current.take() {
            events.push((previous, PointerEvent::new(PointerKind::Leave, x, y)));
        }
        if let Some(next) = target {
            events.push((next.clone(), PointerEvent::new(PointerKind::Enter, x, y)));
            self.current = Some(next);
        }
        events
    }

    /// Pointer left the chart entirely.
    pub fn clear(&mut self, x: f64, y: f64) -> Option<(EventTarget, PointerEvent)> {
        self.current
            .take()
            .map(|t| (t, PointerEvent::new(PointerKind::Leave, x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealzone_engine::NodeId;

    fn kinds(events: &[(EventTarget, PointerEvent)]) -> Vec<(EventTarget, PointerKind)> {
        events.iter().map(|(t, e)| (t.clone(), e.kind)).collect()
    }

    #[test]
    fn test_enter_move_leave_sequence() {
        let mut tracker = PointerTracker::new();
        let zone = EventTarget::Node(NodeId(3));

        let events = tracker.update(Some(zone.clone()), 10.0, 20.0);
        assert_eq!(kinds(&events), vec![(zone.clone(), PointerKind::Enter)]);
        assert!((events[0].1.x - 10.0).abs() < f64::EPSILON);

        let events = tracker.update(Some(zone.clone()), 12.0, 20.0);
        assert_eq!(kinds(&events), vec![(zone.clone(), PointerKind::Move)]);

        let events = tracker.update(None, 500.0, 20.0);
        assert_eq!(kinds(&events), vec![(zone, PointerKind::Leave)]);
        assert!(tracker.current().is_none());
    }

    #[test]
    fn test_crossing_between_targets() {
        let mut tracker = PointerTracker::new();
        let a = EventTarget::Node(NodeId(3));
        let b = EventTarget::title();
        tracker.update(Some(a.clone()), 0.0, 0.0);

        let events = tracker.update(Some(b.clone()), 1.0, 1.0);
        assert_eq!(
            kinds(&events),
            vec![(a, PointerKind::Leave), (b.clone(), PointerKind::Enter)]
        );
        assert_eq!(tracker.current(), Some(&b));
    }

    #[test]
    fn test_nothing_to_do_outside_targets() {
        let mut tracker = PointerTracker::new();
        assert!(tracker.update(None, 0.0, 0.0).is_empty());
        assert!(tracker.clear(0.0, 0.0).is_none());

        tracker.update(Some(EventTarget::title()), 0.0, 0.0);
        let (target, event) = tracker.clear(0.0, 0.0).unwrap();
        assert_eq!(target, EventTarget::title());
        assert_eq!(event.kind, PointerKind::Leave);
    }
}
