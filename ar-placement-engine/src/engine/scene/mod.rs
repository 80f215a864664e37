//! Scene-side collaborators of the placement session.
//!
//! Everything the placement core consumes through traits is implemented here
//! against the Bevy world: surface ray casts, geometry readiness, the tracking
//! pipeline, the target entity and the transition cover node.

/// Full-screen black UI node driven by the transition cover.
pub mod cover;

/// Per-frame `PlacementHost` snapshot over camera, floor and asset state.
pub mod host;

/// Slab-method ray intersection against boxes and the floor plane.
pub mod ray;

/// Surface identifiers, ray hits and the desktop floor surface.
pub mod surface;

/// Target model entity, decorations, transform sync and hit testing.
pub mod target;

/// Desktop tracking pipeline with stop/run restart semantics.
pub mod tracking;
