// input/gesture.rs
//
// Turns raw pointer down/move/up into press and drag phases.
//
// Usage:
//   let mut gestures = GestureTracker::new(16.0);
//   for event in input.iter() {
//       if let Some(ev) = gestures.feed(event) { /* match ev.phase */ }
//   }

use glam::Vec2;
use super::queue::InputEvent;

/// Pointer phase as seen by gameplay code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Pointer pressed.
    Down,
    /// Pointer released without having dragged.
    Up,
    /// Pointer moved past the drag threshold while pressed. Emitted once per press.
    DragStart,
    /// Pointer moved while dragging.
    Dragging,
    /// Pointer released after a drag.
    DragEnd,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub pos: Vec2,
}

/// Tracks a single pointer between press and release.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    /// Squared distance from the press point that starts a drag.
    threshold_sq: f32,
    press_origin: Option<Vec2>,
    dragging: bool,
}

impl GestureTracker {
    pub fn new(threshold_sq: f32) -> Self {
        Self {
            threshold_sq,
            press_origin: None,
            dragging: false,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.press_origin.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Feed one raw event. Non-pointer events and moves without a press yield `None`.
    pub fn feed(&mut self, event: &InputEvent) -> Option<PointerEvent> {
        match *event {
            InputEvent::PointerDown { x, y } => {
                let pos = Vec2::new(x, y);
                self.press_origin = Some(pos);
                self.dragging = false;
                Some(PointerEvent { phase: PointerPhase::Down, pos })
            }
            InputEvent::PointerMove { x, y } => {
                let origin = self.press_origin?;
                let pos = Vec2::new(x, y);
                if self.dragging {
                    Some(PointerEvent { phase: PointerPhase::Dragging, pos })
                } else if pos.distance_squared(origin) > self.threshold_sq {
                    self.dragging = true;
                    Some(PointerEvent { phase: PointerPhase::DragStart, pos })
                } else {
                    None
                }
            }
            InputEvent::PointerUp { x, y } => {
                self.press_origin.take()?;
                let phase = if self.dragging { PointerPhase::DragEnd } else { PointerPhase::Up };
                self.dragging = false;
                Some(PointerEvent { phase, pos: Vec2::new(x, y) })
            }
            InputEvent::Custom { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phases(tracker: &mut GestureTracker, events: &[InputEvent]) -> Vec<PointerPhase> {
        events.iter().filter_map(|e| tracker.feed(e)).map(|e| e.phase).collect()
    }

    #[test]
    fn tap_is_down_then_up() {
        let mut t = GestureTracker::new(16.0);
        let got = phases(&mut t, &[
            InputEvent::PointerDown { x: 0.0, y: 0.0 },
            InputEvent::PointerMove { x: 1.0, y: 1.0 },
            InputEvent::PointerUp { x: 1.0, y: 1.0 },
        ]);
        assert_eq!(got, vec![PointerPhase::Down, PointerPhase::Up]);
    }

    #[test]
    fn drag_starts_once_past_threshold() {
        let mut t = GestureTracker::new(16.0);
        let got = phases(&mut t, &[
            InputEvent::PointerDown { x: 0.0, y: 0.0 },
            InputEvent::PointerMove { x: 5.0, y: 0.0 },
            InputEvent::PointerMove { x: 6.0, y: 0.0 },
            InputEvent::PointerMove { x: 1.0, y: 0.0 },
            InputEvent::PointerUp { x: 1.0, y: 0.0 },
        ]);
        assert_eq!(got, vec![
            PointerPhase::Down,
            PointerPhase::DragStart,
            PointerPhase::Dragging,
            PointerPhase::Dragging,
            PointerPhase::DragEnd,
        ]);
        assert!(!t.is_pressed());
    }

    #[test]
    fn hover_and_stray_release_are_ignored() {
        let mut t = GestureTracker::new(16.0);
        let got = phases(&mut t, &[
            InputEvent::PointerMove { x: 50.0, y: 0.0 },
            InputEvent::PointerUp { x: 50.0, y: 0.0 },
        ]);
        assert!(got.is_empty());
    }
}
