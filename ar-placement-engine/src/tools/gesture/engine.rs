use bevy::prelude::*;

use super::session::{
    FingerPair, GestureSession, SingleTouchMode, SingleTouchSession, TwoTouchMode,
    TwoTouchSession, wrap_angle_delta,
};
use super::touch::{TouchEvent, TouchEventKind, TouchPoint};
use crate::engine::camera::viewer::ViewerPose;
use crate::engine::loading::config::{GestureConfig, SingleTouchPolicy, TwoTouchPolicy};
use crate::tools::placement::target::PlacementTarget;

/// Decides whether a screen position lies on the placed object.
pub trait TargetHitTester {
    fn hits_target(&self, screen: Vec2, target: &PlacementTarget) -> bool;
}

/// Hit tester for hosts that cannot pick; every touch lands off the object.
pub struct NoHitTest;

impl TargetHitTester for NoHitTest {
    fn hits_target(&self, _screen: Vec2, _target: &PlacementTarget) -> bool {
        false
    }
}

/// Per-event view of the scene the engine needs to interpret touches.
pub struct GestureContext<'a> {
    pub viewer: ViewerPose,
    pub hit_tester: &'a dyn TargetHitTester,
}

/// Scale from a pinch, or `None` when either spread is too small to trust.
pub fn pinch_scale(
    baseline_scale: f32,
    baseline_spread: f32,
    current_spread: f32,
    config: &GestureConfig,
) -> Option<f32> {
    // Written as negated >= so NaN spreads are rejected too.
    if !(baseline_spread >= config.min_spread_px) || !(current_spread >= config.min_spread_px) {
        return None;
    }
    let scale = config.clamp_scale(baseline_scale * (current_spread / baseline_spread));
    scale.is_finite().then_some(scale)
}

/// Turns the touch stream into pan, rotate and scale edits of one target.
///
/// While detached every event is dropped, so nothing queued behind a detach
/// can reach the target.
#[derive(Debug, Clone)]
pub struct GestureEngine {
    config: GestureConfig,
    session: GestureSession,
    attached: bool,
}

impl GestureEngine {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            session: GestureSession::Idle,
            attached: false,
        }
    }

    /// Start receiving touch input. Returns false if already attached.
    pub fn attach(&mut self) -> bool {
        if self.attached {
            return false;
        }
        self.attached = true;
        self.session = GestureSession::Idle;
        true
    }

    /// Stop receiving touch input and forget the current gesture, mid-gesture
    /// or not. Returns false if already detached.
    pub fn detach(&mut self) -> bool {
        let was_attached = self.attached;
        self.attached = false;
        self.session = GestureSession::Idle;
        was_attached
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Apply one touch event. Returns whether the target was modified.
    pub fn handle(
        &mut self,
        event: &TouchEvent,
        target: &mut PlacementTarget,
        ctx: &GestureContext,
    ) -> bool {
        if !self.attached {
            return false;
        }

        match event.kind {
            TouchEventKind::Cancel => {
                self.session = GestureSession::Idle;
                false
            }
            TouchEventKind::Start => {
                self.on_start(event, target, ctx);
                false
            }
            TouchEventKind::Move => self.on_move(event, target, ctx),
            TouchEventKind::End => {
                self.on_end(event, target, ctx);
                false
            }
        }
    }

    fn on_start(&mut self, event: &TouchEvent, target: &PlacementTarget, ctx: &GestureContext) {
        match event.touches.as_slice() {
            [] => self.session = GestureSession::Idle,
            [only] => {
                if !matches!(self.session, GestureSession::Single(s) if s.id == only.id) {
                    self.begin_single(only, target, ctx);
                }
            }
            [first, second, ..] => {
                // Fingers beyond the tracked pair are ignored.
                let keep =
                    matches!(self.session, GestureSession::Two(two) if two.tracks_both(event));
                if !keep {
                    self.begin_two(first, second, target);
                }
            }
        }
    }

    fn on_end(&mut self, event: &TouchEvent, target: &PlacementTarget, ctx: &GestureContext) {
        match (event.touches.as_slice(), self.session) {
            ([], _) => self.session = GestureSession::Idle,
            ([only], GestureSession::Two(_)) => {
                // Fresh baseline from where the remaining finger is now.
                self.begin_single(only, target, ctx);
            }
            ([only], GestureSession::Single(single)) if single.id != only.id => {
                self.begin_single(only, target, ctx);
            }
            ([only], GestureSession::Idle) => self.begin_single(only, target, ctx),
            ([first, second, ..], GestureSession::Two(two)) if !two.tracks_both(event) => {
                self.begin_two(first, second, target);
            }
            _ => {}
        }
    }

    fn on_move(
        &mut self,
        event: &TouchEvent,
        target: &mut PlacementTarget,
        ctx: &GestureContext,
    ) -> bool {
        match (self.session, event.touches.as_slice()) {
            (_, []) => false,
            (GestureSession::Idle, _) => {
                // Start was missed; baseline here and wait for the next move.
                self.on_start(event, target, ctx);
                false
            }
            (GestureSession::Single(_), [_, _, ..]) => {
                self.on_start(event, target, ctx);
                false
            }
            (GestureSession::Two(_), [only]) => {
                self.begin_single(only, target, ctx);
                false
            }
            (GestureSession::Single(single), touches) => {
                let touch = event.find(single.id).copied().unwrap_or_else(|| {
                    debug!("Single-touch id {} lost, using first active touch", single.id);
                    touches[0]
                });
                self.move_single(single, touch.position, target, &ctx.viewer)
            }
            (GestureSession::Two(two), _) => match two.resolve(event) {
                Some(pair) => self.move_two(two, pair, target),
                None => false,
            },
        }
    }

    fn begin_single(&mut self, touch: &TouchPoint, target: &PlacementTarget, ctx: &GestureContext) {
        let mode = match self.config.single_touch {
            SingleTouchPolicy::AlwaysPan => SingleTouchMode::Pan,
            SingleTouchPolicy::HitTestPanOrRotate => {
                if ctx.hit_tester.hits_target(touch.position, target) {
                    SingleTouchMode::Pan
                } else {
                    SingleTouchMode::Rotate
                }
            }
        };
        self.session = GestureSession::Single(SingleTouchSession {
            id: touch.id,
            mode,
            last: touch.position,
        });
    }

    fn begin_two(&mut self, a: &TouchPoint, b: &TouchPoint, target: &PlacementTarget) {
        self.session = GestureSession::Two(TwoTouchSession::begin(a, b, target.scale));
    }

    fn move_single(
        &mut self,
        mut single: SingleTouchSession,
        position: Vec2,
        target: &mut PlacementTarget,
        viewer: &ViewerPose,
    ) -> bool {
        let floor = self.config.pan_noise_floor_px;
        let raw = position - single.last;
        let dx = if raw.x.abs() >= floor { raw.x } else { 0.0 };
        let dy = if raw.y.abs() >= floor { raw.y } else { 0.0 };

        // Sub-threshold moves keep the old baseline so slow drags still add up.
        let changed = match single.mode {
            SingleTouchMode::Pan => {
                if dx == 0.0 && dy == 0.0 {
                    return false;
                }
                // Screen y grows downward: dragging up pushes the object away.
                let right = viewer.horizontal_right() * dx * self.config.pan_horizontal_sensitivity;
                let forward = viewer.horizontal_forward() * -dy * self.config.pan_depth_sensitivity;
                target.position += right + forward;
                true
            }
            SingleTouchMode::Rotate => {
                if dx == 0.0 {
                    return false;
                }
                target.rotate_yaw(dx * self.config.rotate_sensitivity);
                true
            }
        };

        single.last = position;
        self.session = GestureSession::Single(single);
        changed
    }

    fn move_two(
        &mut self,
        mut two: TwoTouchSession,
        pair: FingerPair,
        target: &mut PlacementTarget,
    ) -> bool {
        let spread = pair.spread();
        let midpoint = pair.midpoint();
        let angle = pair.angle();

        // A pinch that started with the fingers nearly touching has no usable
        // baseline; re-capture once the spread is trustworthy.
        if !(two.baseline_spread >= self.config.min_spread_px)
            && spread >= self.config.min_spread_px
        {
            two.baseline_spread = spread;
            two.baseline_scale = target.scale;
        }

        let changed = match self.config.two_touch {
            TwoTouchPolicy::Concurrent => {
                let scaled = self.apply_scale(&two, spread, target);
                let twisted = self.apply_twist(&two, spread, angle, target);
                scaled || twisted
            }
            TwoTouchPolicy::AxisLocked => match two.mode {
                TwoTouchMode::Undecided => {
                    two.accumulated_horizontal += (midpoint.x - two.last_midpoint.x).abs();
                    two.accumulated_spread += (spread - two.last_spread).abs();
                    self.try_lock(&mut two, spread, target);
                    false
                }
                TwoTouchMode::Rotation => self.apply_twist(&two, spread, angle, target),
                TwoTouchMode::Scale => self.apply_scale(&two, spread, target),
            },
        };

        two.last_spread = spread;
        two.last_midpoint = midpoint;
        two.last_angle = angle;
        self.session = GestureSession::Two(two);
        changed
    }

    fn try_lock(&self, two: &mut TwoTouchSession, spread: f32, target: &PlacementTarget) {
        let horizontal = two.accumulated_horizontal;
        let pinch = two.accumulated_spread;
        if horizontal + pinch < self.config.lock_threshold_px {
            return;
        }

        let ratio = self.config.dominance_ratio;
        if horizontal >= pinch * ratio {
            two.mode = TwoTouchMode::Rotation;
            debug!("Two-touch locked to rotation ({horizontal:.1}px vs {pinch:.1}px)");
        } else if pinch >= horizontal * ratio {
            two.mode = TwoTouchMode::Scale;
            two.baseline_spread = spread;
            two.baseline_scale = target.scale;
            debug!("Two-touch locked to scale ({pinch:.1}px vs {horizontal:.1}px)");
        }
    }

    /// Rotate by the change in angle of the line through both fingers.
    fn apply_twist(
        &self,
        two: &TwoTouchSession,
        spread: f32,
        angle: f32,
        target: &mut PlacementTarget,
    ) -> bool {
        let min = self.config.min_spread_px;
        if spread < min || two.last_spread < min {
            return false;
        }
        let twist = wrap_angle_delta(angle, two.last_angle);
        if twist == 0.0 {
            return false;
        }
        // Screen y grows downward, so on-screen clockwise is a positive twist.
        target.rotate_yaw(-twist);
        true
    }

    fn apply_scale(
        &self,
        two: &TwoTouchSession,
        spread: f32,
        target: &mut PlacementTarget,
    ) -> bool {
        match pinch_scale(two.baseline_scale, two.baseline_spread, spread, &self.config) {
            Some(scale) if scale != target.scale => {
                target.scale = scale;
                true
            }
            _ => false,
        }
    }
}
