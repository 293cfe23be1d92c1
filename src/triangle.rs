extern crate glam;

use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

use crate::{Grow, AABB};

/// Triangle stored as an origin vertex plus the two edges leaving it, which
/// is the layout the ray intersection test consumes.
///
/// `id` is the index of the triangle in the caller's mesh. It survives the
/// reordering done while building a BVH.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub origin: glam::Vec3A,
    pub edge1: glam::Vec3A,
    pub edge2: glam::Vec3A,
    pub id: u32,
}

impl Triangle {
    /// Zeroed Triangle
    pub const ZERO: Self = Triangle {
        origin: glam::Vec3A::ZERO,
        edge1: glam::Vec3A::ZERO,
        edge2: glam::Vec3A::ZERO,
        id: 0,
    };

    #[inline]
    pub fn new(a: glam::Vec3A, b: glam::Vec3A, c: glam::Vec3A, id: u32) -> Triangle {
        Triangle {
            origin: a,
            edge1: b - a,
            edge2: c - a,
            id,
        }
    }

    #[inline]
    pub fn vertex0(&self) -> glam::Vec3A {
        self.origin
    }

    #[inline]
    pub fn vertex1(&self) -> glam::Vec3A {
        self.origin + self.edge1
    }

    #[inline]
    pub fn vertex2(&self) -> glam::Vec3A {
        self.origin + self.edge2
    }

    /// Bounding box of the three vertices
    #[inline]
    pub fn bounds(&self) -> AABB {
        let mut aabb = AABB::default();
        aabb.grow(self);
        aabb
    }

    /// Center of the bounding box (not the vertex average)
    #[inline]
    pub fn centroid(&self) -> glam::Vec3A {
        self.bounds().center()
    }

    /// Geometric normal, not normalized. Its length is twice the area.
    #[inline]
    pub fn normal(&self) -> glam::Vec3A {
        self.edge1.cross(self.edge2)
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.normal().length() * 0.5
    }

    /// Same triangle with another mesh id
    #[inline]
    pub fn with_id(mut self, id: u32) -> Triangle {
        self.id = id;
        self
    }
}

impl Default for Triangle {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Distribution<Triangle> for Standard {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Triangle {
        Triangle::new(rng.gen(), rng.gen(), rng.gen(), 0)
    }
}
