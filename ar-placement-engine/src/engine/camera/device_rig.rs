use bevy::input::mouse::MouseMotion;
use bevy::math::EulerRot;
use bevy::prelude::*;

use super::viewer::ArCamera;

const EYE_HEIGHT: f32 = 1.6;
const YAW_SENSITIVITY: f32 = 0.0035;
const PITCH_SENSITIVITY: f32 = 0.0030;
const WALK_SPEED: f32 = 1.4;

/// Desktop stand-in for a handheld device: the user "walks" the camera over
/// the floor and looks around, which is all the tracking pipeline would
/// report on a phone.
#[derive(Resource)]
pub struct DeviceRig {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for DeviceRig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, EYE_HEIGHT, 0.0),
            yaw: 0.0,
            // Tilted toward the floor like a phone held at chest height.
            pitch: -0.6,
        }
    }
}

impl DeviceRig {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.rotation())
    }
}

pub fn spawn_ar_camera(mut commands: Commands, rig: Res<DeviceRig>) {
    commands.spawn((Camera3d::default(), rig.transform(), ArCamera));
}

pub fn device_rig_controller(
    mut camera_query: Query<&mut Transform, With<ArCamera>>,
    mut rig: ResMut<DeviceRig>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    // Right drag looks around; left and touch input belong to gestures.
    if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
        rig.yaw += -mouse_delta.x * YAW_SENSITIVITY;
        rig.pitch += -mouse_delta.y * PITCH_SENSITIVITY;
        rig.pitch = rig.pitch.clamp(-1.55, 1.55);
    }

    let mut move_input = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        move_input.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        move_input.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        move_input.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        move_input.x -= 1.0;
    }

    if move_input != Vec2::ZERO {
        // Walking stays on the floor regardless of pitch.
        let heading = Quat::from_rotation_y(rig.yaw);
        let forward = heading * Vec3::NEG_Z;
        let right = heading * Vec3::X;

        let mut speed = WALK_SPEED;
        if keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) {
            speed *= 2.5;
        }

        let delta = (right * move_input.x + forward * move_input.y).normalize_or_zero();
        rig.position += delta * speed * time.delta_secs();
    }

    *camera_transform = rig.transform();
}
