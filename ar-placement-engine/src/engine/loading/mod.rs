//! Placement configuration asset and the boot-time loader that turns it
//! into a `PlacementSession`.

/// Serde-backed configuration asset with defaults and validation.
pub mod config;

/// Loads the configuration, falls back to defaults, builds the session.
pub mod config_loader;
