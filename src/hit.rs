use crate::Ray;

/// Ray/triangle intersection record.
///
/// Barycentric convention: `p = (1 - u - v) * a + u * b + v * c`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hit {
    /// Mesh id of the triangle, see [`crate::Triangle::id`]
    pub triangle_id: u32,
    pub t: f32,
    pub u: f32,
    pub v: f32,
}

impl Hit {
    #[inline]
    pub fn new(triangle_id: u32, t: f32, u: f32, v: f32) -> Self {
        Self {
            triangle_id,
            t,
            u,
            v,
        }
    }

    /// Intersection point along the ray
    #[inline]
    pub fn point(&self, ray: &Ray) -> glam::Vec3A {
        ray.at(self.t)
    }

    /// Intersection point rebuilt from the triangle vertices
    #[inline]
    pub fn barycentric_point(
        &self,
        a: glam::Vec3A,
        b: glam::Vec3A,
        c: glam::Vec3A,
    ) -> glam::Vec3A {
        self.interpolate(a, b, c)
    }

    /// Blend per-vertex attributes (normals, texcoords stored as xyz, ...)
    #[inline]
    pub fn interpolate(
        &self,
        a: glam::Vec3A,
        b: glam::Vec3A,
        c: glam::Vec3A,
    ) -> glam::Vec3A {
        (1.0 - self.u - self.v) * a + self.u * b + self.v * c
    }
}
