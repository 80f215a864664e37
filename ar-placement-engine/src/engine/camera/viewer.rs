use bevy::prelude::*;

/// Marker for the camera that renders the device viewpoint.
#[derive(Component)]
pub struct ArCamera;

/// Position and orientation of the viewer for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerPose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for ViewerPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl ViewerPose {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    pub fn from_global(transform: &GlobalTransform) -> Self {
        let (_, rotation, translation) = transform.to_scale_rotation_translation();
        Self::new(translation, rotation)
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Camera forward flattened onto the floor plane.
    ///
    /// Looking straight down leaves no horizontal forward, in which case the
    /// camera's up vector (screen-up) is flattened instead.
    pub fn horizontal_forward(&self) -> Vec3 {
        let flat = |v: Vec3| Vec3::new(v.x, 0.0, v.z).try_normalize();
        flat(self.forward())
            .or_else(|| flat(self.orientation * Vec3::Y))
            .unwrap_or(Vec3::NEG_Z)
    }

    /// Unit vector to the viewer's right on the floor plane.
    pub fn horizontal_right(&self) -> Vec3 {
        self.horizontal_forward().cross(Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn identity_pose_looks_down_negative_z() {
        let pose = ViewerPose::default();

        assert!(approx(pose.horizontal_forward(), Vec3::NEG_Z));
        assert!(approx(pose.horizontal_right(), Vec3::X));
    }

    #[test]
    fn tilted_camera_flattens_forward() {
        let pose = ViewerPose::new(Vec3::Y, Quat::from_rotation_x(-0.7));

        assert!(approx(pose.horizontal_forward(), Vec3::NEG_Z));
        assert!(approx(pose.horizontal_right(), Vec3::X));
    }

    #[test]
    fn straight_down_uses_screen_up() {
        let pose = ViewerPose::new(Vec3::Y, Quat::from_rotation_x(-FRAC_PI_2));

        let forward = pose.horizontal_forward();
        assert!(forward.is_finite());
        assert!(approx(forward, Vec3::NEG_Z));
    }

    #[test]
    fn yawed_camera_rotates_both_axes() {
        let pose = ViewerPose::new(Vec3::ZERO, Quat::from_rotation_y(FRAC_PI_2));

        assert!(approx(pose.horizontal_forward(), Vec3::NEG_X));
        assert!(approx(pose.horizontal_right(), Vec3::NEG_Z));
    }
}
