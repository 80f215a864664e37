use bevy::prelude::*;
use constants::placement::HOTSPOT_SIZE;

use super::ray::ray_hits_obb;
use super::tracking::DesktopTrackingPipeline;
use crate::engine::loading::config::PlacementConfig;
use crate::tools::gesture::engine::TargetHitTester;
use crate::tools::placement::session::PlacementSession;
use crate::tools::placement::target::{PlacementTarget, VisualVariant};

/// Root entity of the streamed target model.
#[derive(Component)]
pub struct PlacementTargetModel;

/// Scene handle polled for geometry readiness.
#[derive(Resource)]
pub struct TargetScene(pub Handle<Scene>);

/// Anything spawned on top of a placement that must not outlive it.
#[derive(Component)]
pub struct PlacementDecoration;

#[derive(Component, Debug, Clone)]
pub struct Hotspot {
    pub id: String,
}

/// Start streaming the target model and spawn it parked.
pub fn spawn_placement_target(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<PlacementConfig>,
    session: Res<PlacementSession>,
) {
    let handle: Handle<Scene> =
        asset_server.load(GltfAssetLabel::Scene(0).from_asset(config.model_path.clone()));
    info!("Streaming placement target from {}", config.model_path);

    commands.spawn((
        SceneRoot(handle.clone()),
        session.target().to_transform(),
        PlacementTargetModel,
    ));
    commands.insert_resource(TargetScene(handle));
}

/// Copy the session's target state onto the model entity.
pub fn sync_target_transform(
    session: Res<PlacementSession>,
    pipeline: Res<DesktopTrackingPipeline>,
    mut targets: Query<&mut Transform, With<PlacementTargetModel>>,
) {
    let mut desired = session.target().to_transform();
    if let Some(scale) = pipeline.scale_override() {
        desired.scale = Vec3::splat(scale);
    }

    for mut transform in &mut targets {
        if *transform != desired {
            *transform = desired;
        }
    }
}

/// Wireframe outline marking a preview placement candidate.
pub fn draw_preview_bounds(
    session: Res<PlacementSession>,
    config: Res<PlacementConfig>,
    mut gizmos: Gizmos,
) {
    let target = session.target();
    if target.variant != VisualVariant::Preview {
        return;
    }

    let mut transform = target.to_transform();
    transform.scale *= config.target_bounds();
    gizmos.cuboid(transform, Color::srgba(0.3, 0.8, 1.0, 0.8));
}

/// Attach the configured hotspots to the freshly placed model.
pub fn spawn_hotspots(
    commands: &mut Commands,
    target: Entity,
    config: &PlacementConfig,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    if config.hotspots.is_empty() {
        return;
    }

    let mesh = meshes.add(Sphere::new(HOTSPOT_SIZE * 0.5));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.85, 0.2),
        emissive: LinearRgba::rgb(1.0, 0.7, 0.1),
        ..default()
    });

    commands.entity(target).with_children(|parent| {
        for hotspot in &config.hotspots {
            parent.spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_translation(hotspot.offset()),
                Hotspot {
                    id: hotspot.id.clone(),
                },
                PlacementDecoration,
            ));
        }
    });
}

/// Camera-ray picking against an oriented box around the target.
pub struct ObbHitTester<'a> {
    pub camera: &'a Camera,
    pub camera_transform: &'a GlobalTransform,
    pub bounds: Vec3,
}

impl TargetHitTester for ObbHitTester<'_> {
    fn hits_target(&self, screen: Vec2, target: &PlacementTarget) -> bool {
        let Ok(ray) = self.camera.viewport_to_world(self.camera_transform, screen) else {
            return false;
        };
        let xf = GlobalTransform::from(target.to_transform());
        ray_hits_obb(ray.origin, *ray.direction, &xf, self.bounds).is_some()
    }
}

/// Nearest hotspot under `screen`, if any.
pub fn pick_hotspot<'h>(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    screen: Vec2,
    hotspots: impl IntoIterator<Item = (&'h Hotspot, &'h GlobalTransform)>,
) -> Option<&'h Hotspot> {
    let ray = camera.viewport_to_world(camera_transform, screen).ok()?;
    hotspots
        .into_iter()
        .filter_map(|(hotspot, xf)| {
            ray_hits_obb(ray.origin, *ray.direction, xf, Vec3::splat(HOTSPOT_SIZE))
                .map(|t| (hotspot, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(hotspot, _)| hotspot)
}
