use bevy::prelude::*;

use super::touch::{TouchEvent, TouchPoint};

/// What a single finger does for the rest of its episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleTouchMode {
    Pan,
    Rotate,
}

/// Classification of a two-finger episode under the axis-locked policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwoTouchMode {
    Undecided,
    Rotation,
    Scale,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SingleTouchSession {
    pub id: u64,
    pub mode: SingleTouchMode,
    pub last: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoTouchSession {
    pub ids: [u64; 2],
    pub baseline_spread: f32,
    pub baseline_scale: f32,
    pub last_spread: f32,
    pub last_midpoint: Vec2,
    pub last_angle: f32,
    pub accumulated_horizontal: f32,
    pub accumulated_spread: f32,
    pub mode: TwoTouchMode,
}

impl TwoTouchSession {
    pub fn begin(a: &TouchPoint, b: &TouchPoint, target_scale: f32) -> Self {
        let pair = FingerPair::new(a.position, b.position);
        Self {
            ids: [a.id, b.id],
            baseline_spread: pair.spread(),
            baseline_scale: target_scale,
            last_spread: pair.spread(),
            last_midpoint: pair.midpoint(),
            last_angle: pair.angle(),
            accumulated_horizontal: 0.0,
            accumulated_spread: 0.0,
            mode: TwoTouchMode::Undecided,
        }
    }

    pub fn tracks_both(&self, event: &TouchEvent) -> bool {
        self.ids.iter().all(|id| event.find(*id).is_some())
    }

    /// Positions of the two tracked fingers in this event.
    ///
    /// When the active set no longer carries a tracked identifier, the first
    /// remaining touch that is not already paired stands in for it.
    pub fn resolve(&self, event: &TouchEvent) -> Option<FingerPair> {
        let [id_a, id_b] = self.ids;
        let a = event
            .find(id_a)
            .or_else(|| event.touches.iter().find(|t| t.id != id_b))?;
        let b = event
            .find(id_b)
            .or_else(|| event.touches.iter().find(|t| t.id != a.id))?;

        if a.id == b.id {
            return None;
        }
        if a.id != id_a || b.id != id_b {
            debug!(
                "Two-touch identifiers {:?} not in active set, using ({}, {})",
                self.ids, a.id, b.id
            );
        }
        Some(FingerPair::new(a.position, b.position))
    }
}

/// Touch-session state, alive from the first touch-down until the touch
/// count returns to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureSession {
    #[default]
    Idle,
    Single(SingleTouchSession),
    Two(TwoTouchSession),
}

impl GestureSession {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn two_touch_mode(&self) -> Option<TwoTouchMode> {
        match self {
            Self::Two(two) => Some(two.mode),
            _ => None,
        }
    }

    pub fn single_touch_mode(&self) -> Option<SingleTouchMode> {
        match self {
            Self::Single(single) => Some(single.mode),
            _ => None,
        }
    }
}

/// Screen-space geometry of two fingers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerPair {
    pub a: Vec2,
    pub b: Vec2,
}

impl FingerPair {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn spread(&self) -> f32 {
        self.a.distance(self.b)
    }

    pub fn midpoint(&self) -> Vec2 {
        (self.a + self.b) * 0.5
    }

    /// Angle of the line from `a` to `b`.
    pub fn angle(&self) -> f32 {
        let d = self.b - self.a;
        d.y.atan2(d.x)
    }
}

/// Smallest signed difference between two angles, in (-PI, PI].
pub fn wrap_angle_delta(current: f32, previous: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let mut delta = (current - previous) % TAU;
    if delta > PI {
        delta -= TAU;
    } else if delta <= -PI {
        delta += TAU;
    }
    delta
}
