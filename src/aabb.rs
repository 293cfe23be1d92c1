use crate::{Ray, Triangle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: glam::Vec3A,
    pub max: glam::Vec3A,
}

impl Default for AABB {
    fn default() -> Self {
        Self {
            min: glam::Vec3A::splat(f32::INFINITY),
            max: glam::Vec3A::splat(-f32::INFINITY),
        }
    }
}

/// Things an AABB can be grown to contain
pub trait Grow<T> {
    fn grow(&mut self, other: T);
}

impl Grow<glam::Vec3A> for AABB {
    /// Grow the box to contain a new point
    #[inline]
    fn grow(&mut self, point: glam::Vec3A) {
        self.max = self.max.max(point);
        self.min = self.min.min(point);
    }
}

impl Grow<&AABB> for AABB {
    #[inline]
    fn grow(&mut self, other: &AABB) {
        self.max = self.max.max(other.max);
        self.min = self.min.min(other.min);
    }
}

impl Grow<&Triangle> for AABB {
    #[inline]
    fn grow(&mut self, tri: &Triangle) {
        self.grow(tri.vertex0());
        self.grow(tri.vertex1());
        self.grow(tri.vertex2());
    }
}

impl AABB {
    #[inline]
    pub fn new(min: glam::Vec3A, max: glam::Vec3A) -> Self {
        Self { min, max }
    }

    /// If the AABB is valid (min <= max)
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all()
    }

    #[inline]
    pub fn extent(&self) -> glam::Vec3A {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> glam::Vec3A {
        (self.min + self.max) * 0.5
    }

    /// Area of the six faces. Zero for flat or point boxes.
    #[inline]
    pub fn surface_area(&self) -> f32 {
        let d = self.extent();
        2.0 * (d.x * d.y + d.x * d.z + d.y * d.z)
    }

    /// Whether `other` fits inside this box, allowing `epsilon` of slack per face
    #[inline]
    pub fn contains(&self, other: &AABB, epsilon: f32) -> bool {
        let slack = glam::Vec3A::splat(epsilon);
        (self.min - slack).cmple(other.min).all() && other.max.cmple(self.max + slack).all()
    }

    /// Slab test against the ray, clipped to `[0, htmax]`.
    ///
    /// `inv_dir` must be `ray.inverse_direction()`. Bounds are swapped on the
    /// axes where the reciprocal is negative so the near plane always comes
    /// first. A `-0.0` direction component has a `-inf` reciprocal and swaps
    /// too. An origin lying on a plane of a zero-direction axis gives a NaN
    /// distance, which `f32::max`/`f32::min` drop.
    #[inline]
    pub fn intersect(&self, ray: &Ray, inv_dir: glam::Vec3A, htmax: f32) -> NodeHit {
        let mut rmin = self.min;
        let mut rmax = self.max;
        if inv_dir.x < 0.0 {
            std::mem::swap(&mut rmin.x, &mut rmax.x);
        }
        if inv_dir.y < 0.0 {
            std::mem::swap(&mut rmin.y, &mut rmax.y);
        }
        if inv_dir.z < 0.0 {
            std::mem::swap(&mut rmin.z, &mut rmax.z);
        }

        let dmin = (rmin - ray.origin) * inv_dir;
        let dmax = (rmax - ray.origin) * inv_dir;

        let tmin = dmin.z.max(dmin.y.max(dmin.x.max(0.0)));
        let tmax = dmax.z.min(dmax.y.min(dmax.x.min(htmax)));

        NodeHit::new(tmin, tmax)
    }
}

/// Entry/exit distances of a ray through a box. Empty when `tmin > tmax`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeHit {
    pub tmin: f32,
    pub tmax: f32,
}

impl Default for NodeHit {
    fn default() -> Self {
        Self {
            tmin: 0.0,
            tmax: -1.0,
        }
    }
}

impl NodeHit {
    #[inline]
    pub fn new(tmin: f32, tmax: f32) -> Self {
        Self { tmin, tmax }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.tmin <= self.tmax
    }
}
