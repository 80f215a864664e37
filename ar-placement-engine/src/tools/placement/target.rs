use bevy::prelude::*;

/// Material set shown on the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualVariant {
    /// Translucent look while the pose is only a candidate.
    Preview,
    #[default]
    Final,
}

/// The single manipulable object of a placement session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementTarget {
    pub position: Vec3,
    pub orientation: Quat,
    pub scale: f32,
    pub variant: VisualVariant,
}

impl PlacementTarget {
    pub fn parked(park_scale: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            scale: park_scale,
            variant: VisualVariant::default(),
        }
    }

    /// Shrink to the park scale without touching position or orientation.
    pub fn park(&mut self, park_scale: f32) {
        self.scale = park_scale;
    }

    /// Yaw the target by `angle` radians about the world vertical axis.
    ///
    /// Applied as a half-angle quaternion so many small increments compose
    /// without tracking an absolute angle. The result is renormalised every
    /// call to keep drift from accumulating over long sessions.
    pub fn rotate_yaw(&mut self, angle: f32) {
        if angle == 0.0 || !angle.is_finite() {
            return;
        }
        let half = angle * 0.5;
        let delta = Quat::from_xyzw(0.0, half.sin(), 0.0, half.cos());
        self.orientation = (delta * self.orientation).normalize();
    }

    pub fn to_transform(&self) -> Transform {
        Transform {
            translation: self.position,
            rotation: self.orientation,
            scale: Vec3::splat(self.scale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn small_yaw_increments_compose_to_the_total_angle() {
        let mut target = PlacementTarget::parked(1.0);
        for _ in 0..1000 {
            target.rotate_yaw(PI / 1000.0);
        }

        let expected = Quat::from_rotation_y(PI);
        assert!(target.orientation.angle_between(expected) < 1e-3);
        assert!((target.orientation.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn yaw_matches_bevy_rotation_about_y() {
        let mut target = PlacementTarget::parked(1.0);
        target.rotate_yaw(FRAC_PI_2);

        let forward = target.orientation * Vec3::NEG_Z;
        assert!((forward - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn non_finite_angle_is_ignored() {
        let mut target = PlacementTarget::parked(1.0);
        target.rotate_yaw(f32::NAN);

        assert_eq!(target.orientation, Quat::IDENTITY);
    }
}
