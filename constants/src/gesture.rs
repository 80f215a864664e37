/// Metres of lateral travel per screen pixel of horizontal single-touch drag.
pub const PAN_HORIZONTAL_SENSITIVITY: f32 = 0.005;

/// Metres of depth travel per screen pixel of vertical single-touch drag.
pub const PAN_DEPTH_SENSITIVITY: f32 = 0.005;

/// Per-axis screen deltas below this (in pixels) are treated as sensor noise.
pub const PAN_NOISE_FLOOR_PX: f32 = 0.3;

/// Radians of yaw per screen pixel of horizontal rotate drag.
pub const ROTATE_SENSITIVITY: f32 = 0.01;

/// Lower bound for the uniform scale of the placed object.
pub const SCALE_MIN: f32 = 0.02;

/// Upper bound for the uniform scale of the placed object.
pub const SCALE_MAX: f32 = 5.0;

/// Finger spreads below this (pixels) are too degenerate to derive a ratio from.
pub const MIN_SPREAD_PX: f32 = 10.0;

/// Accumulated two-finger movement (pixels) required before a mode is locked.
pub const LOCK_THRESHOLD_PX: f32 = 18.0;

/// How much larger one accumulated axis must be than the other to win the lock.
pub const DOMINANCE_RATIO: f32 = 1.8;
