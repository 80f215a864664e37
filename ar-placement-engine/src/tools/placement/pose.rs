use bevy::prelude::*;
use constants::placement::POSE_EPSILON;

/// Candidate placement position for a surface hit seen from `viewer`.
///
/// The hit point is pulled `forward_offset` metres toward the viewer along the
/// floor plane so the object lands in front of the user rather than under the
/// aim point, and lifted `vertical_offset` above the surface. A viewer directly
/// above the hit leaves the horizontal position untouched.
pub fn placement_pose(
    hit_point: Vec3,
    viewer_position: Vec3,
    forward_offset: f32,
    vertical_offset: f32,
) -> Vec3 {
    let toward_viewer = Vec3::new(
        viewer_position.x - hit_point.x,
        0.0,
        viewer_position.z - hit_point.z,
    );

    let horizontal = match toward_viewer.try_normalize() {
        Some(dir) if toward_viewer.length() >= POSE_EPSILON => {
            hit_point + dir * forward_offset
        }
        _ => hit_point,
    };

    Vec3::new(horizontal.x, hit_point.y + vertical_offset, horizontal.z)
}
