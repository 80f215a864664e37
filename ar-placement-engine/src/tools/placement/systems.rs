use bevy::asset::LoadState;
use bevy::prelude::*;

use super::events::PlacementNoticeEvent;
use super::lifecycle::LifecyclePhase;
use super::session::{PlacementNotice, PlacementSession};
use crate::engine::camera::viewer::{ArCamera, ViewerPose};
use crate::engine::core::app_state::PlacementPhase;
use crate::engine::loading::config::PlacementConfig;
use crate::engine::scene::host::SceneHost;
use crate::engine::scene::surface::{GroundSurface, SurfaceReference};
use crate::engine::scene::target::{
    PlacementDecoration, PlacementTargetModel, TargetScene, spawn_hotspots,
};
use crate::engine::scene::tracking::DesktopTrackingPipeline;

pub fn insert_ground_surface(mut commands: Commands, config: Res<PlacementConfig>) {
    commands.insert_resource(GroundSurface::new(
        SurfaceReference::new(&config.surface_id),
        config.ground_height,
    ));
}

/// Run one lifecycle frame against the current world and publish notices.
pub fn advance_placement_session(
    time: Res<Time>,
    mut session: ResMut<PlacementSession>,
    mut pipeline: ResMut<DesktopTrackingPipeline>,
    ground: Res<GroundSurface>,
    asset_server: Res<AssetServer>,
    target_scene: Option<Res<TargetScene>>,
    cameras: Query<&GlobalTransform, With<ArCamera>>,
    mut notices: EventWriter<PlacementNoticeEvent>,
) {
    let Ok(camera_transform) = cameras.single() else {
        return;
    };

    let geometry_ready = target_scene
        .as_ref()
        .is_some_and(|scene| asset_server.is_loaded_with_dependencies(&scene.0));

    let mut host = SceneHost {
        geometry_ready,
        viewer: ViewerPose::from_global(camera_transform),
        ground: &ground,
        tracking: pipeline.is_tracking(),
    };
    session.frame(time.delta(), &mut host, &mut *pipeline);

    for notice in session.drain_notices() {
        notices.write(PlacementNoticeEvent(notice));
    }
}

/// Mirror phase changes into Bevy state and manage placement decorations.
pub fn apply_placement_notices(
    mut commands: Commands,
    mut notices: EventReader<PlacementNoticeEvent>,
    mut next_phase: ResMut<NextState<PlacementPhase>>,
    config: Res<PlacementConfig>,
    targets: Query<Entity, With<PlacementTargetModel>>,
    decorations: Query<Entity, With<PlacementDecoration>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for PlacementNoticeEvent(notice) in notices.read() {
        match *notice {
            PlacementNotice::PhaseChanged { phase, .. } => {
                next_phase.set(phase.into());
                if phase == LifecyclePhase::Placed {
                    for target in &targets {
                        spawn_hotspots(
                            &mut commands,
                            target,
                            &config,
                            &mut meshes,
                            &mut materials,
                        );
                    }
                }
            }
            PlacementNotice::DisposeDecorations => {
                for entity in &decorations {
                    commands.entity(entity).despawn();
                }
            }
            PlacementNotice::SurfaceStable | PlacementNotice::CoverChanged { .. } => {}
        }
    }
}

/// A target model that never loads leaves the lifecycle in Loading; say so once.
pub fn warn_on_target_load_failure(
    asset_server: Res<AssetServer>,
    target_scene: Option<Res<TargetScene>>,
    mut warned: Local<bool>,
) {
    if *warned {
        return;
    }
    let Some(scene) = target_scene else {
        return;
    };
    if let Some(LoadState::Failed(e)) = asset_server.get_load_state(&scene.0) {
        warn!("Placement target failed to load ({e}), waiting in Loading");
        *warned = true;
    }
}
