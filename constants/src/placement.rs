use bevy::math::Vec3;

/// Scale used to keep the target invisible while it still streams and renders.
/// Hiding through a visibility flag can stall streaming in some hosts.
pub const PARK_SCALE: f32 = 0.0001;

/// Uniform scale applied when the target is first placed on a surface.
pub const INITIAL_SCALE: f32 = 1.0;

/// Metres the placement pose is pulled from the hit point toward the viewer.
pub const FORWARD_OFFSET: f32 = 0.5;

/// Clearance above the detected surface, avoids z-fighting with the floor.
pub const VERTICAL_OFFSET: f32 = 0.01;

/// Horizontal distances below this are treated as "viewer directly above".
pub const POSE_EPSILON: f32 = 1e-4;

/// Consecutive surface hits required before trusting a rescan placement.
pub const RESCAN_SETTLE_FRAMES: u32 = 45;

/// Identifier of the surface that placement ray casts are filtered against.
pub const SURFACE_ID: &str = "ground";

/// Height of the desktop stand-in floor.
pub const GROUND_HEIGHT: f32 = 0.0;

/// Default model streamed in as the placement target.
pub const TARGET_MODEL_PATH: &str = "models/placement_target.gltf";

/// Local extents of the target, used for touch hit-testing.
pub const TARGET_BOUNDS: Vec3 = Vec3::new(0.6, 0.6, 0.6);

/// Edge length of a hotspot decoration's pick box.
pub const HOTSPOT_SIZE: f32 = 0.12;

/// Default hotspot floating above the target's centre.
pub const HOTSPOT_ID: &str = "overview";
pub const HOTSPOT_OFFSET: Vec3 = Vec3::new(0.0, 0.55, 0.0);
