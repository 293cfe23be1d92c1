use crate::{Hit, Ray, Triangle};

/// Objects capable of being intersected by a ray
pub trait RayIntersect {
    /// Closest intersection with `t` in `[0, htmax]`, if any
    fn ray_intersect(&self, ray: &Ray, htmax: f32) -> Option<Hit>;
}

/// Epsilon used when comparing intersection results
pub const RAY_INTERSECT_EPSILON: f32 = 0.0001;

/// Intersect a triangle with a ray (Möller–Trumbore, "fast, minimum storage
/// ray-triangle intersection").
///
/// Only an exactly zero determinant is rejected up front; near-parallel rays
/// fall out through the barycentric bounds checks.
#[inline]
pub fn ray_triangle_intersect(tri: &Triangle, ray: &Ray, htmax: f32) -> Option<Hit> {
    let pvec = ray.direction.cross(tri.edge2);
    let det = tri.edge1.dot(pvec);
    if det == 0.0 {
        // ray parallel to triangle
        return None;
    }
    let inv_det = 1.0 / det;

    let tvec = ray.origin - tri.origin;
    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(tri.edge1);
    let v = ray.direction.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = tri.edge2.dot(qvec) * inv_det;
    if t > htmax || t < 0.0 {
        return None;
    }

    Some(Hit::new(tri.id, t, u, v))
}

impl RayIntersect for Triangle {
    #[inline]
    fn ray_intersect(&self, ray: &Ray, htmax: f32) -> Option<Hit> {
        ray_triangle_intersect(self, ray, htmax)
    }
}

/// Closest hit by testing every triangle. Reference for the accelerated query.
pub fn linear_nearest_hit(triangles: &[Triangle], ray: &Ray) -> Option<Hit> {
    let mut closest: Option<Hit> = None;
    let mut htmax = ray.tmax;

    for tri in triangles {
        if let Some(hit) = tri.ray_intersect(ray, htmax) {
            htmax = hit.t;
            closest = Some(hit);
        }
    }

    closest
}

/// Whether any triangle blocks the ray, by testing every triangle
pub fn linear_is_occluded(triangles: &[Triangle], ray: &Ray) -> bool {
    triangles
        .iter()
        .any(|tri| tri.ray_intersect(ray, ray.tmax).is_some())
}

#[cfg(test)]
mod tests {

    use rand::{thread_rng, Rng};

    use glam::Vec3A;

    use approx::*;

    use crate::*;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Vec3A::new(0.0, 0.0, 0.0),
            Vec3A::new(1.0, 0.0, 0.0),
            Vec3A::new(0.0, 1.0, 0.0),
            0,
        )
    }

    #[test]
    fn ray_triangle_intersect_inside() {
        let tri = unit_triangle();
        let ray = Ray::infinite_ray(Vec3A::new(0.2, 0.2, -1.0), Vec3A::Z);

        let hit = tri.ray_intersect(&ray, ray.tmax).unwrap();

        assert_eq!(hit.triangle_id, 0);
        assert_abs_diff_eq!(hit.t, 1.0, epsilon = RAY_INTERSECT_EPSILON);
        assert_abs_diff_eq!(hit.u, 0.2, epsilon = RAY_INTERSECT_EPSILON);
        assert_abs_diff_eq!(hit.v, 0.2, epsilon = RAY_INTERSECT_EPSILON);
    }

    #[test]
    fn ray_triangle_outside_diagonal() {
        let tri = unit_triangle();
        let ray = Ray::infinite_ray(Vec3A::new(0.6, 0.6, -1.0), Vec3A::Z);

        assert!(tri.ray_intersect(&ray, ray.tmax).is_none());
    }

    #[test]
    fn ray_triangle_parallel() {
        let tri = unit_triangle();
        let ray = Ray::infinite_ray(Vec3A::new(-1.0, 0.2, 0.0), Vec3A::X);

        assert!(tri.ray_intersect(&ray, ray.tmax).is_none());
    }

    #[test]
    fn ray_triangle_beyond_htmax() {
        let tri = unit_triangle();
        let ray = Ray::infinite_ray(Vec3A::new(0.2, 0.2, -1.0), Vec3A::Z);

        assert!(tri.ray_intersect(&ray, 0.5).is_none());
        assert!(tri.ray_intersect(&ray, 1.0).is_some());
    }

    #[test]
    fn ray_triangle_behind_origin() {
        let tri = unit_triangle();
        let ray = Ray::infinite_ray(Vec3A::new(0.2, 0.2, 1.0), Vec3A::Z);

        assert!(tri.ray_intersect(&ray, ray.tmax).is_none());
    }

    #[test]
    fn ray_from_vertex_does_not_panic() {
        let tri = unit_triangle();
        let ray = Ray::infinite_ray(Vec3A::ZERO, Vec3A::new(0.3, 0.4, 1.0));

        // either answer is fine as long as it is stable
        let first = tri.ray_intersect(&ray, ray.tmax);
        let second = tri.ray_intersect(&ray, ray.tmax);
        assert_eq!(first, second);
    }

    #[test]
    fn degenerate_triangle_misses() {
        let tri = Triangle::new(Vec3A::ZERO, Vec3A::X, Vec3A::X * 2.0, 0);
        let ray = Ray::infinite_ray(Vec3A::new(0.5, 0.0, -1.0), Vec3A::Z);

        assert!(tri.ray_intersect(&ray, ray.tmax).is_none());
    }

    #[test]
    fn barycentric_point_matches_ray_point() {
        let mut rng = thread_rng();
        let a = rng.gen::<Vec3A>() * 9.0 - Vec3A::splat(5.0);
        let b = rng.gen::<Vec3A>() * 9.0 - Vec3A::splat(5.0);
        let c = rng.gen::<Vec3A>() * 9.0 - Vec3A::splat(5.0);
        let tri = Triangle::new(a, b, c, 11);

        // aim at an interior point from off the plane
        let target = (a + b + c) / 3.0;
        let origin = target + tri.normal().normalize_or_zero() * 2.0 + Vec3A::splat(0.01);
        let ray = Ray::infinite_ray(origin, target - origin);

        if tri.area() < 1e-3 {
            return;
        }

        let hit = tri.ray_intersect(&ray, ray.tmax).unwrap();
        assert_eq!(hit.triangle_id, 11);
        assert!(hit.u >= 0.0 && hit.v >= 0.0 && hit.u + hit.v <= 1.0);
        assert_abs_diff_eq!(hit.t, 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(hit.barycentric_point(a, b, c), hit.point(&ray), epsilon = 1e-3);
    }

    #[test]
    fn linear_scan_keeps_closest() {
        let near = unit_triangle().with_id(0);
        let far = Triangle::new(
            Vec3A::new(0.0, 0.0, 2.0),
            Vec3A::new(1.0, 0.0, 2.0),
            Vec3A::new(0.0, 1.0, 2.0),
            1,
        );
        let ray = Ray::infinite_ray(Vec3A::new(0.2, 0.2, -1.0), Vec3A::Z);

        let hit = linear_nearest_hit(&[far, near], &ray).unwrap();
        assert_eq!(hit.triangle_id, 0);
        assert_abs_diff_eq!(hit.t, 1.0, epsilon = RAY_INTERSECT_EPSILON);

        assert!(linear_is_occluded(&[far, near], &ray));
        assert!(!linear_is_occluded(&[far, near], &Ray::new(ray.origin, ray.direction, 0.5)));
    }
}
