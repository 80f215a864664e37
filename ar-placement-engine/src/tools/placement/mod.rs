//! Placement of a single AR object on a detected surface.
//!
//! ## Lifecycle
//!
//! ```text
//! Loading ──geometry ready──> Scanning ──stable hit──> Placed
//!                                ^                       │
//!                                └──── reset (rescan) ───┘
//! ```
//!
//! - **Loading**: target streams in, parked at a near-zero scale.
//! - **Scanning**: the viewer's centre ray is cast every frame. The first
//!   placement accepts the first hit; a rescan waits for a run of
//!   consecutive hits while tracking re-converges.
//! - **Placed**: a fresh gesture engine owns all touch input until the next
//!   reset detaches it.
//!
//! The pure state machines (`lifecycle`, `session`) know nothing about Bevy;
//! `systems` adapts them to the ECS each frame.

/// Errors raised while building a session.
pub mod error;

/// ECS events published by the placement session.
pub mod events;

/// Collaborator traits: scene queries and the competing scale source.
pub mod host;

/// Loading/Scanning/Placed state machine owning the target.
pub mod lifecycle;

/// Spatial transform helper turning a surface hit into a placement pose.
pub mod pose;

/// Lifecycle, reset coordinator and cover bundled as one resource.
pub mod session;

/// Bevy systems driving the session each frame.
pub mod systems;

/// Placement target state: pose, scale and visual variant.
pub mod target;

use bevy::prelude::*;

use crate::engine::core::app_state::{AppState, PlacementPhase};
use crate::engine::scene::cover::{spawn_cover_node, update_cover_node};
use crate::engine::scene::target::{
    draw_preview_bounds, spawn_placement_target, sync_target_transform,
};
use crate::engine::scene::tracking::{pause_tracking_on_focus_loss, start_tracking};
use events::{HotspotTapped, PlacementNoticeEvent};
use systems::{
    advance_placement_session, apply_placement_notices, insert_ground_surface,
    warn_on_target_load_failure,
};

/// Frame ordering shared by the placement, gesture and reset plugins.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlacementSet {
    /// Touch input and UI requests mutate the session.
    Input,
    /// Cover, reset and lifecycle advance one frame.
    Advance,
    /// Session state is written back to entities.
    Present,
}

pub struct PlacementPlugin;

impl Plugin for PlacementPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlacementNoticeEvent>()
            .add_event::<HotspotTapped>()
            .configure_sets(
                Update,
                (
                    PlacementSet::Input,
                    PlacementSet::Advance,
                    PlacementSet::Present,
                )
                    .chain()
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(
                OnEnter(AppState::AwaitingProceed),
                (insert_ground_surface, spawn_placement_target, spawn_cover_node),
            )
            .add_systems(OnEnter(AppState::Running), start_tracking)
            .add_systems(
                Update,
                (
                    pause_tracking_on_focus_loss,
                    advance_placement_session,
                    apply_placement_notices,
                )
                    .chain()
                    .in_set(PlacementSet::Advance),
            )
            .add_systems(
                Update,
                (
                    sync_target_transform,
                    update_cover_node,
                    draw_preview_bounds.run_if(in_state(PlacementPhase::Scanning)),
                    warn_on_target_load_failure,
                )
                    .in_set(PlacementSet::Present),
            );
    }
}
