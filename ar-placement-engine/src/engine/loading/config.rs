use bevy::prelude::*;
use constants::{gesture, placement, session};
use serde::{Deserialize, Serialize};

use crate::tools::placement::error::PlacementError;

/// How a single finger manipulates the placed object.
///
/// The two policies are mutually exclusive: an engine runs exactly one for
/// its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingleTouchPolicy {
    /// Every single-finger drag pans the object along the floor.
    #[default]
    AlwaysPan,
    /// Touch-down on the object pans it, touch-down elsewhere rotates it.
    HitTestPanOrRotate,
}

/// How two fingers manipulate the placed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwoTouchPolicy {
    /// Pinch scales and twist rotates on every move.
    Concurrent,
    /// The episode is classified once as either rotate or scale.
    #[default]
    AxisLocked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub pan_horizontal_sensitivity: f32,
    pub pan_depth_sensitivity: f32,
    pub pan_noise_floor_px: f32,
    pub rotate_sensitivity: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    pub min_spread_px: f32,
    pub lock_threshold_px: f32,
    pub dominance_ratio: f32,
    pub single_touch: SingleTouchPolicy,
    pub two_touch: TwoTouchPolicy,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pan_horizontal_sensitivity: gesture::PAN_HORIZONTAL_SENSITIVITY,
            pan_depth_sensitivity: gesture::PAN_DEPTH_SENSITIVITY,
            pan_noise_floor_px: gesture::PAN_NOISE_FLOOR_PX,
            rotate_sensitivity: gesture::ROTATE_SENSITIVITY,
            scale_min: gesture::SCALE_MIN,
            scale_max: gesture::SCALE_MAX,
            min_spread_px: gesture::MIN_SPREAD_PX,
            lock_threshold_px: gesture::LOCK_THRESHOLD_PX,
            dominance_ratio: gesture::DOMINANCE_RATIO,
            single_touch: SingleTouchPolicy::default(),
            two_touch: TwoTouchPolicy::default(),
        }
    }
}

impl GestureConfig {
    /// Clamp a candidate scale into the configured manipulation range.
    pub fn clamp_scale(&self, scale: f32) -> f32 {
        scale.clamp(self.scale_min, self.scale_max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResetConfig {
    pub cover_fade_secs: f32,
    pub pipeline_restart_delay_secs: f32,
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            cover_fade_secs: session::COVER_FADE_SECS,
            pipeline_restart_delay_secs: session::PIPELINE_RESTART_DELAY_SECS,
        }
    }
}

/// A tappable marker attached to the placed object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotConfig {
    pub id: String,
    /// Offset from the target origin, in target-local units.
    pub offset: [f32; 3],
}

impl HotspotConfig {
    pub fn offset(&self) -> Vec3 {
        Vec3::from_array(self.offset)
    }
}

/// Runtime configuration for the placement session, loaded from JSON.
#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub park_scale: f32,
    pub initial_scale: f32,
    pub forward_offset: f32,
    pub vertical_offset: f32,
    pub rescan_settle_frames: u32,
    /// Show the target tracking the candidate pose while a rescan settles.
    pub rescan_preview: bool,
    pub surface_id: String,
    pub ground_height: f32,
    pub model_path: String,
    pub target_bounds: [f32; 3],
    /// Start scanning without waiting for the device collaborator.
    pub auto_proceed: bool,
    pub hotspots: Vec<HotspotConfig>,
    pub gesture: GestureConfig,
    pub reset: ResetConfig,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            park_scale: placement::PARK_SCALE,
            initial_scale: placement::INITIAL_SCALE,
            forward_offset: placement::FORWARD_OFFSET,
            vertical_offset: placement::VERTICAL_OFFSET,
            rescan_settle_frames: placement::RESCAN_SETTLE_FRAMES,
            rescan_preview: false,
            surface_id: placement::SURFACE_ID.to_string(),
            ground_height: placement::GROUND_HEIGHT,
            model_path: placement::TARGET_MODEL_PATH.to_string(),
            target_bounds: placement::TARGET_BOUNDS.to_array(),
            auto_proceed: !cfg!(target_arch = "wasm32"),
            hotspots: vec![HotspotConfig {
                id: placement::HOTSPOT_ID.to_string(),
                offset: placement::HOTSPOT_OFFSET.to_array(),
            }],
            gesture: GestureConfig::default(),
            reset: ResetConfig::default(),
        }
    }
}

impl PlacementConfig {
    /// Reject configurations that would break the scale or lock invariants.
    pub fn validate(&self) -> Result<(), PlacementError> {
        let g = &self.gesture;
        let checks = [
            (g.scale_min > 0.0, "gesture.scale_min must be positive"),
            (g.scale_min <= g.scale_max, "gesture.scale_min exceeds scale_max"),
            (
                (g.scale_min..=g.scale_max).contains(&self.initial_scale),
                "initial_scale lies outside the scale clamp",
            ),
            (self.park_scale > 0.0, "park_scale must be positive"),
            (g.min_spread_px > 0.0, "gesture.min_spread_px must be positive"),
            (g.lock_threshold_px > 0.0, "gesture.lock_threshold_px must be positive"),
            (g.dominance_ratio >= 1.0, "gesture.dominance_ratio must be at least 1"),
            (self.rescan_settle_frames > 0, "rescan_settle_frames must be positive"),
            (
                self.reset.cover_fade_secs >= 0.0 && self.reset.pipeline_restart_delay_secs >= 0.0,
                "reset timings must not be negative",
            ),
        ];

        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, reason)) => Err(PlacementError::InvalidConfig(reason.to_string())),
            None => Ok(()),
        }
    }

    pub fn target_bounds(&self) -> Vec3 {
        Vec3::from_array(self.target_bounds)
    }
}
