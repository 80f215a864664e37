use bevy::prelude::*;
use std::sync::Arc;

use super::ray::ray_plane_hit_t;

/// Identifier a ray cast must strike for its hit to count as placement input.
/// Fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceReference(Arc<str>);

impl SurfaceReference {
    pub fn new(id: &str) -> Self {
        Self(Arc::from(id))
    }

    pub fn id(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, hit: &RaycastHit) -> bool {
        hit.surface == *self
    }
}

/// A single ray/surface intersection, valid only for the tick that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct RaycastHit {
    pub surface: SurfaceReference,
    pub point: Vec3,
    pub ray_origin: Vec3,
    pub ray_direction: Vec3,
}

/// Horizontal floor plane standing in for a detected real-world surface.
#[derive(Resource, Debug, Clone)]
pub struct GroundSurface {
    pub reference: SurfaceReference,
    pub height: f32,
}

impl GroundSurface {
    pub fn new(reference: SurfaceReference, height: f32) -> Self {
        Self { reference, height }
    }

    /// Cast the viewer's centre ray against the floor.
    pub fn cast(&self, origin: Vec3, direction: Vec3) -> Option<RaycastHit> {
        let t = ray_plane_hit_t(origin, direction, self.height)?;
        Some(RaycastHit {
            surface: self.reference.clone(),
            point: origin + direction * t,
            ray_origin: origin,
            ray_direction: direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downward_ray_hits_floor() {
        let ground = GroundSurface::new(SurfaceReference::new("ground"), 0.0);

        let hit = ground
            .cast(Vec3::new(0.0, 1.5, 0.0), Vec3::new(0.0, -1.0, -1.0).normalize())
            .unwrap();

        assert!((hit.point - Vec3::new(0.0, 0.0, -1.5)).length() < 1e-4);
        assert!(ground.reference.matches(&hit));
    }

    #[test]
    fn horizon_ray_misses() {
        let ground = GroundSurface::new(SurfaceReference::new("ground"), 0.0);

        assert!(ground.cast(Vec3::Y, Vec3::NEG_Z).is_none());
        assert!(ground.cast(Vec3::Y, Vec3::Y).is_none());
    }

    #[test]
    fn other_surfaces_do_not_match() {
        let ground = GroundSurface::new(SurfaceReference::new("ground"), 0.0);
        let wall = SurfaceReference::new("wall");

        let hit = ground.cast(Vec3::Y, Vec3::NEG_Y).unwrap();
        assert!(!wall.matches(&hit));
    }
}
