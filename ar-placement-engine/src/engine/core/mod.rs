//! Core application setup and state management.
//!
//! Handles application boot, window configuration, the proceed gate and the
//! mirrored placement phase for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the placement, gesture and reset plugins plus
/// platform-specific configuration.
pub mod app_setup;

/// Boot states, mirrored placement phase and device proceed gate.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
