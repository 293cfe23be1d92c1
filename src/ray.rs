/// Ray object. Might be a proper ray (tmax = infinity) or a line segment (tmax is finite)
///
/// The direction does not need to be normalized; `tmax` is expressed in units
/// of the direction length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: glam::Vec3A,
    pub direction: glam::Vec3A,
    pub tmax: f32,
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Default::default(),
            direction: glam::Vec3A::new(1.0, 0.0, 0.0),
            tmax: 1.0,
        }
    }
}

impl Ray {
    #[inline]
    pub fn new(origin: glam::Vec3A, direction: glam::Vec3A, tmax: f32) -> Self {
        Self {
            origin,
            direction,
            tmax,
        }
    }

    /// Create a ray with infinite length (a proper ray)
    #[inline]
    pub fn infinite_ray(origin: glam::Vec3A, direction: glam::Vec3A) -> Self {
        Self::new(origin, direction, f32::INFINITY)
    }

    /// Segment going from `from` (t = 0) to `to` (t = 1)
    #[inline]
    pub fn between(from: glam::Vec3A, to: glam::Vec3A) -> Self {
        Self::new(from, to - from, 1.0)
    }

    /// Point at parametric distance `t`
    #[inline]
    pub fn at(&self, t: f32) -> glam::Vec3A {
        self.origin + self.direction * t
    }

    /// Per-axis reciprocal of the direction. Zero components map to +-infinity.
    #[inline]
    pub fn inverse_direction(&self) -> glam::Vec3A {
        self.direction.recip()
    }
}
