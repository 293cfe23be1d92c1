//! Direction sampling around a surface normal, for callers that shoot
//! secondary rays (ambient occlusion, shadows) from a hit point.
//!
//! Every worker should own its own `Rng`.

use std::f32::consts::PI;

use rand::{distributions::Distribution, Rng};

/// Orthonormal basis `(t, b, n)` around a unit normal.
///
/// Built with the branchless method of Duff et al., "Building an Orthonormal
/// Basis, Revisited" (2017).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub t: glam::Vec3A,
    pub b: glam::Vec3A,
    pub n: glam::Vec3A,
}

impl Frame {
    pub fn from_normal(n: glam::Vec3A) -> Self {
        let sign = 1.0_f32.copysign(n.z);
        let a = -1.0 / (sign + n.z);
        let d = n.x * n.y * a;

        Self {
            t: glam::Vec3A::new(1.0 + sign * n.x * n.x * a, sign * d, -sign * n.x),
            b: glam::Vec3A::new(d, sign + n.y * n.y * a, -n.y),
            n,
        }
    }

    /// Local coordinates to world space
    #[inline]
    pub fn to_world(&self, local: glam::Vec3A) -> glam::Vec3A {
        local.x * self.t + local.y * self.b + local.z * self.n
    }

    /// World space to local coordinates
    #[inline]
    pub fn to_local(&self, global: glam::Vec3A) -> glam::Vec3A {
        glam::Vec3A::new(global.dot(self.t), global.dot(self.b), global.dot(self.n))
    }
}

/// Uniform directions over the hemisphere around a normal (pdf = 1 / 2pi)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformHemisphere {
    pub frame: Frame,
}

impl UniformHemisphere {
    #[inline]
    pub fn new(normal: glam::Vec3A) -> Self {
        Self {
            frame: Frame::from_normal(normal),
        }
    }

    /// Map two uniform numbers in `[0, 1)` to a direction
    #[inline]
    pub fn direction(&self, u1: f32, u2: f32) -> glam::Vec3A {
        let cos_theta = u1;
        let phi = 2.0 * PI * u2;
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

        self.frame.to_world(glam::Vec3A::new(
            phi.cos() * sin_theta,
            phi.sin() * sin_theta,
            cos_theta,
        ))
    }

    #[inline]
    pub fn pdf(&self, direction: glam::Vec3A) -> f32 {
        if direction.dot(self.frame.n) < 0.0 {
            0.0
        } else {
            1.0 / (2.0 * PI)
        }
    }
}

impl Distribution<glam::Vec3A> for UniformHemisphere {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> glam::Vec3A {
        self.direction(rng.gen(), rng.gen())
    }
}
