use bevy::input::touch::TouchPhase;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::engine::GestureContext;
use super::touch::{TouchEvent, TouchEventKind, TouchTracker};
use crate::engine::camera::viewer::{ArCamera, ViewerPose};
use crate::engine::loading::config::PlacementConfig;
use crate::engine::scene::target::{Hotspot, ObbHitTester, pick_hotspot};
use crate::tools::placement::events::HotspotTapped;
use crate::tools::placement::lifecycle::LifecyclePhase;
use crate::tools::placement::session::PlacementSession;

/// Feed Bevy touch input to the session, diverting taps on hotspots.
pub fn feed_touch_input(
    mut touches: EventReader<TouchInput>,
    mut tracker: ResMut<TouchTracker>,
    mut session: ResMut<PlacementSession>,
    config: Res<PlacementConfig>,
    cameras: Query<(&Camera, &GlobalTransform), With<ArCamera>>,
    hotspots: Query<(&Hotspot, &GlobalTransform)>,
    mut tapped: EventWriter<HotspotTapped>,
) {
    let Ok((camera, camera_transform)) = cameras.single() else {
        touches.clear();
        return;
    };

    let hit_tester = ObbHitTester {
        camera,
        camera_transform,
        bounds: config.target_bounds(),
    };
    let ctx = GestureContext {
        viewer: ViewerPose::from_global(camera_transform),
        hit_tester: &hit_tester,
    };

    for input in touches.read() {
        let event = tracker.apply(input);
        let picked = route_touch(&mut session, &event, &ctx, || {
            pick_hotspot(camera, camera_transform, input.position, hotspots.iter())
                .map(|hotspot| hotspot.id.clone())
        });
        if let Some(id) = picked {
            debug!("Hotspot '{}' tapped", id);
            tapped.write(HotspotTapped { id });
        }
    }
}

/// Hand one touch event to the session unless it is the first finger landing
/// on a hotspot, in which case the secondary view opens and the id is returned.
///
/// The view opens before any later event of the same frame is routed, so the
/// tapping finger can never drag the object.
pub fn route_touch(
    session: &mut PlacementSession,
    event: &TouchEvent,
    ctx: &GestureContext,
    pick: impl FnOnce() -> Option<String>,
) -> Option<String> {
    let first_touch = event.kind == TouchEventKind::Start && event.touches.len() == 1;
    if first_touch && session.phase() == LifecyclePhase::Placed {
        if let Some(id) = pick() {
            session.open_secondary_view();
            return Some(id);
        }
    }

    session.handle_touch(event, ctx);
    None
}

const MOUSE_TOUCH_ID: u64 = u64::MAX;
const MIRROR_TOUCH_ID: u64 = u64::MAX - 1;

type EmulatedTouch = (u64, TouchPhase, Vec2);

/// Turns left-button drags into a finger, or with Alt held into a pinch
/// mirrored about the window centre, so gestures work without a touchscreen.
#[derive(Resource, Default)]
pub struct MouseTouchEmulator {
    pressed: bool,
    pinch: bool,
    last_cursor: Vec2,
}

impl MouseTouchEmulator {
    pub fn press(&mut self, cursor: Vec2, centre: Vec2, pinch: bool) -> Vec<EmulatedTouch> {
        if self.pressed {
            return Vec::new();
        }
        self.pressed = true;
        self.pinch = pinch;
        self.last_cursor = cursor;
        self.touches(TouchPhase::Started, cursor, centre)
    }

    pub fn drag(&mut self, cursor: Vec2, centre: Vec2) -> Vec<EmulatedTouch> {
        if !self.pressed || cursor == self.last_cursor {
            return Vec::new();
        }
        self.last_cursor = cursor;
        self.touches(TouchPhase::Moved, cursor, centre)
    }

    pub fn release(&mut self, centre: Vec2) -> Vec<EmulatedTouch> {
        if !self.pressed {
            return Vec::new();
        }
        self.pressed = false;
        let touches = self.touches(TouchPhase::Ended, self.last_cursor, centre);
        self.pinch = false;
        touches
    }

    fn touches(&self, phase: TouchPhase, cursor: Vec2, centre: Vec2) -> Vec<EmulatedTouch> {
        let mut touches = vec![(MOUSE_TOUCH_ID, phase, cursor)];
        if self.pinch {
            touches.push((MIRROR_TOUCH_ID, phase, centre * 2.0 - cursor));
        }
        touches
    }
}

pub fn emulate_touch_from_mouse(
    mut emulator: ResMut<MouseTouchEmulator>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    windows: Query<(Entity, &Window), With<PrimaryWindow>>,
    mut touches: EventWriter<TouchInput>,
) {
    let Ok((window_entity, window)) = windows.single() else {
        return;
    };
    let centre = window.size() * 0.5;

    let generated = if mouse_button.just_released(MouseButton::Left) {
        emulator.release(centre)
    } else if let Some(cursor) = window.cursor_position() {
        if mouse_button.just_pressed(MouseButton::Left) {
            let pinch = keyboard.any_pressed([KeyCode::AltLeft, KeyCode::AltRight]);
            emulator.press(cursor, centre, pinch)
        } else if mouse_button.pressed(MouseButton::Left) {
            emulator.drag(cursor, centre)
        } else {
            Vec::new()
        }
    } else {
        Vec::new()
    };

    for (id, phase, position) in generated {
        touches.write(TouchInput {
            phase,
            position,
            window: window_entity,
            force: None,
            id,
        });
    }
}
