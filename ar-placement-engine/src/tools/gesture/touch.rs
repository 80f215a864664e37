use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;

/// One finger in contact with the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Stable for the finger's whole contact.
    pub id: u64,
    pub position: Vec2,
}

impl TouchPoint {
    pub fn new(id: u64, x: f32, y: f32) -> Self {
        Self {
            id,
            position: Vec2::new(x, y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchEventKind {
    Start,
    Move,
    End,
    Cancel,
}

/// A touch input event carrying the set of touches still active after it.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub kind: TouchEventKind,
    pub touches: Vec<TouchPoint>,
}

impl TouchEvent {
    pub fn new(kind: TouchEventKind, touches: Vec<TouchPoint>) -> Self {
        Self { kind, touches }
    }

    pub fn start(touches: &[TouchPoint]) -> Self {
        Self::new(TouchEventKind::Start, touches.to_vec())
    }

    pub fn moved(touches: &[TouchPoint]) -> Self {
        Self::new(TouchEventKind::Move, touches.to_vec())
    }

    pub fn end(touches: &[TouchPoint]) -> Self {
        Self::new(TouchEventKind::End, touches.to_vec())
    }

    pub fn cancel() -> Self {
        Self::new(TouchEventKind::Cancel, Vec::new())
    }

    pub fn find(&self, id: u64) -> Option<&TouchPoint> {
        self.touches.iter().find(|t| t.id == id)
    }
}

/// Folds Bevy's per-finger `TouchInput` stream into active-set snapshots.
#[derive(Resource, Default)]
pub struct TouchTracker {
    active: Vec<TouchPoint>,
}

impl TouchTracker {
    pub fn apply(&mut self, input: &TouchInput) -> TouchEvent {
        let point = TouchPoint {
            id: input.id,
            position: input.position,
        };

        let kind = match input.phase {
            TouchPhase::Started => {
                self.upsert(point);
                TouchEventKind::Start
            }
            TouchPhase::Moved => {
                self.upsert(point);
                TouchEventKind::Move
            }
            TouchPhase::Ended => {
                self.active.retain(|t| t.id != input.id);
                TouchEventKind::End
            }
            TouchPhase::Canceled => {
                self.active.clear();
                TouchEventKind::Cancel
            }
        };

        TouchEvent::new(kind, self.active.clone())
    }

    pub fn active(&self) -> &[TouchPoint] {
        &self.active
    }

    fn upsert(&mut self, point: TouchPoint) {
        match self.active.iter_mut().find(|t| t.id == point.id) {
            Some(existing) => existing.position = point.position,
            None => self.active.push(point),
        }
    }
}
