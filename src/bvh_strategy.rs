use crate::{Axis, Grow, Triangle, AABB};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitPlane {
    pub axis: Axis,
    pub split_position: f32,
}

/// Boxes of a triangle range: one over the geometry (stored in the node) and
/// one over the triangle centroids (used to pick a split).
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeBounds {
    pub bounds: AABB,
    pub centroid_bounds: AABB,
}

impl RangeBounds {
    pub fn compute(triangles: &[Triangle]) -> Self {
        let mut bounds = AABB::default();
        let mut centroid_bounds = AABB::default();

        for tri in triangles {
            let tri_bounds = tri.bounds();
            bounds.grow(&tri_bounds);
            centroid_bounds.grow(tri_bounds.center());
        }

        Self {
            bounds,
            centroid_bounds,
        }
    }
}

/// Outcome of a split: triangles `[0, left_count)` of the range go left.
///
/// `left_count` may be `0` or the range length when the strategy could not
/// separate the triangles; `axis` is then used by the fallback split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    pub axis: Axis,
    pub left_count: usize,
}

pub trait SplitPlaneStrategy {
    /// Reorder a range of at least two triangles into a left and a right group.
    fn split(triangles: &mut [Triangle], range_bounds: &RangeBounds) -> Split;
}

/// Cut the centroid box in half on its longest axis.
pub struct CentroidMidpointStrategy {}

impl CentroidMidpointStrategy {
    /// Get split plane using the longest extent of the centroid box.
    #[inline]
    pub fn get_split_plane(centroid_bounds: &AABB) -> SplitPlane {
        let extent = centroid_bounds.extent();
        let axis = Axis::longest(extent);

        SplitPlane {
            axis,
            split_position: centroid_bounds.min[axis] + extent[axis] * 0.5,
        }
    }
}

impl SplitPlaneStrategy for CentroidMidpointStrategy {
    #[inline]
    fn split(triangles: &mut [Triangle], range_bounds: &RangeBounds) -> Split {
        let plane = Self::get_split_plane(&range_bounds.centroid_bounds);

        Split {
            axis: plane.axis,
            left_count: partition_by_plane(triangles, &plane),
        }
    }
}

/// Sort on the longest axis of the geometric bounds and cut at the middle
/// index. Slower than [`CentroidMidpointStrategy`] (O(n log n) per level) but
/// always balanced.
pub struct MedianSortStrategy {}

impl SplitPlaneStrategy for MedianSortStrategy {
    fn split(triangles: &mut [Triangle], range_bounds: &RangeBounds) -> Split {
        let axis = Axis::longest(range_bounds.bounds.extent());

        triangles.sort_unstable_by(|a, b| {
            let a = a.bounds();
            let b = b.bounds();
            a.min[axis]
                .total_cmp(&b.min[axis])
                .then_with(|| a.max[axis].total_cmp(&b.max[axis]))
        });

        Split {
            axis,
            left_count: triangles.len() / 2,
        }
    }
}

/// Move triangles whose centroid lies below the plane to the front.
/// Returns how many there are. Relative order is not kept.
pub fn partition_by_plane(triangles: &mut [Triangle], plane: &SplitPlane) -> usize {
    let mut i = 0;
    let mut j = triangles.len();
    while i < j {
        if triangles[i].centroid()[plane.axis] < plane.split_position {
            i += 1;
        } else {
            j -= 1;
            triangles.swap(i, j);
        }
    }

    i
}

/// Split at the middle index, placing the lower half of centroids (on `axis`)
/// first. Both sides are non-empty for ranges of two or more triangles.
pub fn median_split(triangles: &mut [Triangle], axis: Axis) -> usize {
    let mid = triangles.len() / 2;
    if mid == 0 {
        return mid;
    }

    triangles.select_nth_unstable_by(mid, |a, b| {
        a.centroid()[axis].total_cmp(&b.centroid()[axis])
    });

    mid
}
