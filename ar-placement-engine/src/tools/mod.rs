//! Interactive AR placement tools.
//!
//! ## Tool Coordination
//!
//! All three tools operate on one `PlacementSession` resource and run in the
//! `PlacementSet` order every frame while the app is `Running`:
//!
//! ```text
//! PlacementSet::Input    touch → gesture engine, reset / secondary view requests
//! PlacementSet::Advance  cover fade → reset step → lifecycle tick → notices
//! PlacementSet::Present  target transform, cover node, preview bounds
//! ```
//!
//! The gesture engine mutates the target only while the lifecycle is
//! `Placed`; the lifecycle mutates it everywhere else. The reset coordinator
//! switches between the two by detaching the engine before parking the target.
//!
//! ## Events
//!
//! - `PlacementNoticeEvent`: phase changes, stable surface, cover state and
//!   decoration disposal, consumed by the scene and the RPC layer
//! - `ResetRequested`: overlay reset button (RPC) or `R` (native)
//! - `SecondaryViewEvent`: secondary view opened/closed (RPC) or `Esc` (native)
//! - `HotspotTapped`: a hotspot tap already opened the secondary view; forwarded
//!   to the overlay

/// Touch gesture disambiguation and manipulation of the placed object.
pub mod gesture;

/// Placement lifecycle, session aggregate and scene systems.
pub mod placement;

/// Tracking pipeline restart behind the transition cover.
pub mod session_reset;

#[cfg(test)]
pub(crate) mod testing;
