use crate::engine::camera::viewer::ViewerPose;
use crate::engine::scene::surface::RaycastHit;

/// Scene queries the lifecycle polls once per tick.
///
/// Implemented by the Bevy host over the asset server, camera and surface
/// resources, and by in-memory fakes in tests.
pub trait PlacementHost {
    /// Whether the target's renderable geometry has finished streaming.
    fn is_geometry_ready(&self) -> bool;

    /// Current viewer pose.
    fn viewer_pose(&self) -> ViewerPose;

    /// Cast a ray from the viewer into the scene. Hits on any surface may be
    /// returned; the caller filters them against its surface reference.
    fn cast_ray(&mut self, viewer: &ViewerPose) -> Vec<RaycastHit>;
}

/// A platform component that writes the target's scale on its own and must be
/// switched off before placement takes ownership of scale.
pub trait CompetingScaleSource {
    fn disable(&mut self);
}

impl<F: FnMut()> CompetingScaleSource for F {
    fn disable(&mut self) {
        self()
    }
}
