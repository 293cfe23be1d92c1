pub mod axis;
pub use axis::*;

pub mod triangle;
pub use triangle::*;

pub mod ray;
pub use ray::*;

pub mod hit;
pub use hit::*;

pub mod aabb;
pub use aabb::*;

pub mod intersections;
pub use intersections::*;

pub mod error;
pub use error::*;

pub mod config;
pub use config::*;

pub mod bvh_strategy;
pub use bvh_strategy::*;

pub mod bvh;
pub use bvh::*;

pub mod stats;
pub use stats::*;

pub mod sampling;
