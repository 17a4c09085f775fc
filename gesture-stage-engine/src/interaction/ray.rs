use bevy::prelude::*;

/// A note intersection tagged with the hand slot whose ray produced it.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub entity: Entity,
    pub slot: usize,
    pub t: f32,
}

/// Ray against a note's rotated bounds: transform the ray into local
/// space and run the slab test against the half-extents.
pub fn ray_hits_bounds(
    origin: Vec3,
    dir: Vec3,
    transform: &GlobalTransform,
    size: Vec3,
) -> Option<f32> {
    let inv = transform.compute_matrix().inverse();
    let o_local = inv.transform_point3(origin);
    let d_local = inv.transform_vector3(dir);
    let he = size * 0.5;
    ray_aabb_hit_t(o_local, d_local, -he, he)
}

// Slab-method ray/AABB intersection, returns the entry distance.
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = Vec3::new(
        if ray_direction.x != 0.0 { 1.0 / ray_direction.x } else { f32::INFINITY },
        if ray_direction.y != 0.0 { 1.0 / ray_direction.y } else { f32::INFINITY },
        if ray_direction.z != 0.0 { 1.0 / ray_direction.z } else { f32::INFINITY },
    );

    let (mut tmin, mut tmax) = ((min.x - ray_origin.x) * inv.x, (max.x - ray_origin.x) * inv.x);
    if tmin > tmax {
        std::mem::swap(&mut tmin, &mut tmax);
    }

    let (mut tymin, mut tymax) = ((min.y - ray_origin.y) * inv.y, (max.y - ray_origin.y) * inv.y);
    if tymin > tymax {
        std::mem::swap(&mut tymin, &mut tymax);
    }

    if (tmin > tymax) || (tymin > tmax) {
        return None;
    }
    if tymin > tmin {
        tmin = tymin;
    }
    if tymax < tmax {
        tmax = tymax;
    }

    let (mut tzmin, mut tzmax) = ((min.z - ray_origin.z) * inv.z, (max.z - ray_origin.z) * inv.z);
    if tzmin > tzmax {
        std::mem::swap(&mut tzmin, &mut tzmax);
    }

    if (tmin > tzmax) || (tzmin > tmax) {
        return None;
    }
    if tzmin > tmin {
        tmin = tzmin;
    }
    if tzmax < tmax {
        tmax = tzmax;
    }

    if tmax < 0.0 {
        return None;
    }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}

/// Intersection of a ray with the horizontal plane z = `plane_z`, used to
/// project drag motion onto the stage plane.
pub fn ray_plane_z(origin: Vec3, dir: Vec3, plane_z: f32) -> Option<Vec3> {
    if dir.z.abs() < f32::EPSILON {
        return None;
    }
    let t = (plane_z - origin.z) / dir.z;
    if t < 0.0 {
        return None;
    }
    Some(origin + dir * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_hits_centred_box() {
        let t = ray_aabb_hit_t(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::NEG_Z,
            Vec3::splat(-0.5),
            Vec3::splat(0.5),
        );
        assert!((t.unwrap() - 4.5).abs() < 1e-5);
    }

    #[test]
    fn test_ray_misses_offset_box() {
        let t = ray_aabb_hit_t(
            Vec3::new(2.0, 0.0, 5.0),
            Vec3::NEG_Z,
            Vec3::splat(-0.5),
            Vec3::splat(0.5),
        );
        assert!(t.is_none());
    }

    #[test]
    fn test_downward_probe_hits_box_below() {
        let t = ray_aabb_hit_t(
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::NEG_Y,
            Vec3::new(-0.5, 0.5, -0.5),
            Vec3::new(0.5, 1.5, 0.5),
        );
        assert!((t.unwrap() - 8.5).abs() < 1e-5);
    }

    #[test]
    fn test_rotated_bounds_intersection() {
        // A box rotated 45 degrees about Z still catches a centred ray.
        let transform = GlobalTransform::from(
            Transform::from_xyz(1.0, 2.0, 0.0)
                .with_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_4)),
        );
        let hit = ray_hits_bounds(
            Vec3::new(1.0, 2.0, 5.0),
            Vec3::NEG_Z,
            &transform,
            Vec3::splat(0.5),
        );
        assert!(hit.is_some());
    }

    #[test]
    fn test_plane_projection_lands_on_plane() {
        let hit = ray_plane_z(Vec3::new(1.5, -0.5, 3.0), Vec3::NEG_Z, 0.0).unwrap();
        assert_eq!(hit, Vec3::new(1.5, -0.5, 0.0));
    }

    #[test]
    fn test_plane_parallel_ray_has_no_projection() {
        assert!(ray_plane_z(Vec3::new(0.0, 0.0, 3.0), Vec3::X, 0.0).is_none());
    }
}
