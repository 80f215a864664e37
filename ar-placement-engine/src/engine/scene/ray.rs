use bevy::prelude::*;

/// Distance along the ray to the target's oriented bounding box, if struck.
///
/// `size` is the unscaled local extent; the transform's scale is applied by
/// moving the ray into the box's local space.
pub fn ray_hits_obb(origin: Vec3, dir: Vec3, xf: &GlobalTransform, size: Vec3) -> Option<f32> {
    let inv = xf.compute_matrix().inverse();
    let o_local = inv.transform_point3(origin);
    let d_local = inv.transform_vector3(dir);
    let he = size * 0.5;
    ray_aabb_hit_t(o_local, d_local, -he, he)
}

// Slab-method ray/AABB intersection
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for axis in 0..3 {
        let o = ray_origin[axis];
        let d = ray_direction[axis];

        if d == 0.0 {
            // Parallel to this slab: inside it or never.
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let (mut t0, mut t1) = ((min[axis] - o) * inv, (max[axis] - o) * inv);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }
    Some(if t_near >= 0.0 { t_near } else { t_far })
}

/// Distance along the ray to the horizontal plane at `plane_y`.
pub fn ray_plane_hit_t(origin: Vec3, dir: Vec3, plane_y: f32) -> Option<f32> {
    if dir.y.abs() < 0.001 {
        return None;
    }
    let t = (plane_y - origin.y) / dir.y;
    (t > 0.0).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_through_box_centre_hits_front_face() {
        let t = ray_aabb_hit_t(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, Vec3::splat(-1.0), Vec3::ONE);

        assert_eq!(t, Some(4.0));
    }

    #[test]
    fn parallel_ray_outside_slab_misses() {
        let t = ray_aabb_hit_t(Vec3::new(0.0, 2.0, 5.0), Vec3::NEG_Z, Vec3::splat(-1.0), Vec3::ONE);

        assert_eq!(t, None);
    }

    #[test]
    fn origin_inside_box_reports_exit_distance() {
        let t = ray_aabb_hit_t(Vec3::ZERO, Vec3::X, Vec3::splat(-1.0), Vec3::ONE);

        assert_eq!(t, Some(1.0));
    }

    #[test]
    fn box_behind_ray_misses() {
        let t = ray_aabb_hit_t(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, Vec3::splat(-1.0), Vec3::ONE);

        assert_eq!(t, None);
    }

    #[test]
    fn obb_respects_translation_and_scale() {
        let xf = GlobalTransform::from(
            Transform::from_xyz(3.0, 0.0, 0.0).with_scale(Vec3::splat(2.0)),
        );

        // Local half extent 0.5 scaled by 2 spans x in [2, 4].
        let hit = ray_hits_obb(Vec3::new(3.9, 0.0, 5.0), Vec3::NEG_Z, &xf, Vec3::ONE);
        let miss = ray_hits_obb(Vec3::new(4.2, 0.0, 5.0), Vec3::NEG_Z, &xf, Vec3::ONE);

        assert!(hit.is_some());
        assert!(miss.is_none());
    }

    #[test]
    fn plane_hit_requires_ray_toward_plane() {
        assert_eq!(ray_plane_hit_t(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y, 0.0), Some(2.0));
        assert_eq!(ray_plane_hit_t(Vec3::new(0.0, 2.0, 0.0), Vec3::Y, 0.0), None);
    }
}
