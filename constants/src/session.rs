/// Seconds for the transition cover to fade fully in or out.
pub const COVER_FADE_SECS: f32 = 0.35;

/// Seconds to wait after stopping the tracking pipeline before restarting it,
/// giving the platform time to release the camera track.
pub const PIPELINE_RESTART_DELAY_SECS: f32 = 0.3;

/// Path of the runtime configuration asset.
pub const CONFIG_PATH: &str = "config/session.placement.json";
