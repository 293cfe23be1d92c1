use thiserror::Error;

/// Reasons a BVH cannot be built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("cannot build a BVH without triangles")]
    EmptyScene,

    #[error("{count} triangles do not fit in 32-bit node indices")]
    TooManyTriangles { count: usize },
}
