use bevy::prelude::*;

use super::surface::{GroundSurface, RaycastHit};
use crate::engine::camera::viewer::ViewerPose;
use crate::tools::placement::host::PlacementHost;

/// Frame snapshot of the Bevy world handed to the placement lifecycle.
pub struct SceneHost<'a> {
    pub geometry_ready: bool,
    pub viewer: ViewerPose,
    pub ground: &'a GroundSurface,
    /// Surfaces are only seen while the tracking pipeline is live.
    pub tracking: bool,
}

impl PlacementHost for SceneHost<'_> {
    fn is_geometry_ready(&self) -> bool {
        self.geometry_ready
    }

    fn viewer_pose(&self) -> ViewerPose {
        self.viewer
    }

    fn cast_ray(&mut self, viewer: &ViewerPose) -> Vec<RaycastHit> {
        if !self.tracking {
            return Vec::new();
        }
        self.ground
            .cast(viewer.position, viewer.forward())
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::surface::SurfaceReference;

    fn looking_down() -> ViewerPose {
        ViewerPose::new(Vec3::new(0.0, 1.6, 0.0), Quat::from_rotation_x(-0.6))
    }

    #[test]
    fn no_surfaces_without_tracking() {
        let ground = GroundSurface::new(SurfaceReference::new("ground"), 0.0);
        let mut host = SceneHost {
            geometry_ready: true,
            viewer: looking_down(),
            ground: &ground,
            tracking: false,
        };

        assert!(host.cast_ray(&looking_down()).is_empty());
    }

    #[test]
    fn tracked_centre_ray_hits_the_floor_ahead() {
        let ground = GroundSurface::new(SurfaceReference::new("ground"), 0.0);
        let mut host = SceneHost {
            geometry_ready: true,
            viewer: looking_down(),
            ground: &ground,
            tracking: true,
        };

        let hits = host.cast_ray(&looking_down());
        assert_eq!(hits.len(), 1);
        assert!(hits[0].point.y.abs() < 1e-5);
        assert!(hits[0].point.z < 0.0);
    }
}
