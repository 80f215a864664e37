//! Markerless AR placement: scan for a floor, drop one object on it, let the
//! user pan, rotate and scale it, and restart tracking behind a black cover on
//! demand.
//!
//! - `engine`: Bevy app setup, configuration loading, camera and the scene
//!   collaborators (floor surface, tracking pipeline, target entity, cover).
//! - `tools`: the placement lifecycle, gesture engine and reset coordinator.
//! - `rpc`: JSON-RPC bridge to the overlay UI hosting the canvas.

pub mod engine;
pub mod rpc;
pub mod tools;
