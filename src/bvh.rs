extern crate glam;
use glam::Vec3A;

use std::ops::Range;
use std::time::Instant;

use log::{debug, info, trace};
use smallvec::{smallvec, SmallVec};

use crate::{
    median_split, BuildError, BvhConfig, BvhStats, CentroidMidpointStrategy, Hit, NodeHit,
    RangeBounds, Ray, RayIntersect, Split, SplitPlaneStrategy, TraversalOrder, Triangle, AABB,
};

/// Inline capacity of the occlusion traversal stack; deeper trees spill to the heap
const MAX_STACK_SIZE: usize = 64;

/// Largest triangle count whose `2n - 1` nodes still have `u32` indices
const MAX_TRIANGLES: usize = (u32::MAX / 2) as usize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BvhNode {
    /// Two children, both stored before this node
    Internal { bounds: AABB, left: u32, right: u32 },
    /// Triangles `[begin, end)` of the tree's triangle array
    Leaf { bounds: AABB, begin: u32, end: u32 },
}

impl BvhNode {
    #[inline]
    pub fn bounds(&self) -> &AABB {
        match self {
            BvhNode::Internal { bounds, .. } | BvhNode::Leaf { bounds, .. } => bounds,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, BvhNode::Leaf { .. })
    }

    /// Triangle range of a leaf, `None` for internal nodes
    #[inline]
    pub fn triangle_range(&self) -> Option<Range<usize>> {
        match *self {
            BvhNode::Leaf { begin, end, .. } => Some(begin as usize..end as usize),
            BvhNode::Internal { .. } => None,
        }
    }

    #[inline]
    fn intersect(&self, ray: &Ray, inv_dir: Vec3A, htmax: f32) -> NodeHit {
        self.bounds().intersect(ray, inv_dir, htmax)
    }
}

/// Bounding volume hierarchy over a triangle mesh.
///
/// Immutable once built: queries take `&self` and can run from many threads.
#[derive(Debug, Clone)]
pub struct Bvh {
    triangles: Vec<Triangle>,
    nodes: Vec<BvhNode>,
    root: u32,
    config: BvhConfig,
}

/// Closest hit found so far during a traversal
struct Closest {
    hit: Option<Hit>,
    t: f32,
}

impl Closest {
    #[inline]
    fn new(tmax: f32) -> Self {
        Self { hit: None, t: tmax }
    }

    #[inline]
    fn record(&mut self, hit: Hit) {
        self.t = hit.t;
        self.hit = Some(hit);
    }
}

/// Owns the triangle buffer while nodes are being appended
struct Builder {
    triangles: Vec<Triangle>,
    nodes: Vec<BvhNode>,
}

impl Builder {
    #[inline]
    fn push(&mut self, node: BvhNode) -> u32 {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        index
    }

    fn subdivide<Strat>(&mut self, begin: usize, end: usize) -> u32
    where
        Strat: SplitPlaneStrategy,
    {
        let range = &mut self.triangles[begin..end];
        let range_bounds = RangeBounds::compute(range);

        if range.len() < 2 {
            return self.push(BvhNode::Leaf {
                bounds: range_bounds.bounds,
                begin: begin as u32,
                end: end as u32,
            });
        }

        let Split { axis, left_count } = Strat::split(range, &range_bounds);

        // One side is empty
        let left_count = if left_count == 0 || left_count >= range.len() {
            trace!(
                "Degenerate split of {} triangles on {:?}, using the median",
                range.len(),
                axis
            );
            median_split(range, axis)
        } else {
            left_count
        };

        let mid = begin + left_count;
        let left = self.subdivide::<Strat>(begin, mid);
        let right = self.subdivide::<Strat>(mid, end);

        self.push(BvhNode::Internal {
            bounds: range_bounds.bounds,
            left,
            right,
        })
    }
}

impl Bvh {
    /// Build with the centroid midpoint split and the default config
    pub fn build(triangles: Vec<Triangle>) -> Result<Self, BuildError> {
        Self::build_with::<CentroidMidpointStrategy>(triangles, BvhConfig::default())
    }

    /// Build with a split strategy and config.
    ///
    /// The triangles are reordered so each leaf owns a contiguous range; use
    /// [`Triangle::id`] to find them in the original mesh.
    pub fn build_with<Strat>(
        triangles: Vec<Triangle>,
        config: BvhConfig,
    ) -> Result<Self, BuildError>
    where
        Strat: SplitPlaneStrategy,
    {
        let tri_count = triangles.len();
        if tri_count == 0 {
            return Err(BuildError::EmptyScene);
        }
        if tri_count > MAX_TRIANGLES {
            return Err(BuildError::TooManyTriangles { count: tri_count });
        }

        debug!("Building BVH; triangles = {}", tri_count);
        let tt = Instant::now();

        let mut builder = Builder {
            triangles,
            nodes: Vec::with_capacity(2 * tri_count - 1),
        };
        let root = builder.subdivide::<Strat>(0, tri_count);

        let bvh = Self {
            triangles: builder.triangles,
            nodes: builder.nodes,
            root,
            config,
        };

        info!(
            "BVH built; root = {}, nodes = {}, triangles = {}, tt = {:?}",
            bvh.root,
            bvh.nodes.len(),
            bvh.triangles.len(),
            tt.elapsed()
        );

        Ok(bvh)
    }

    /// Closest hit with `t` in `[0, ray.tmax]`
    pub fn nearest_hit(&self, ray: &Ray) -> Option<Hit> {
        self.nearest_hit_within(ray, ray.tmax)
    }

    fn nearest_hit_within(&self, ray: &Ray, htmax: f32) -> Option<Hit> {
        let inv_dir = ray.inverse_direction();
        let mut closest = Closest::new(htmax);

        match self.config.traversal {
            TraversalOrder::Ordered => self.intersect_ordered(self.root, ray, inv_dir, &mut closest),
            TraversalOrder::Naive => self.intersect_naive(self.root, ray, inv_dir, &mut closest),
        }

        closest.hit
    }

    /// Whether anything blocks the ray within `[0, ray.tmax]`. Stops at the first hit.
    pub fn is_occluded(&self, ray: &Ray) -> bool {
        let inv_dir = ray.inverse_direction();

        let mut stack: SmallVec<[u32; MAX_STACK_SIZE]> = smallvec![self.root];
        while let Some(index) = stack.pop() {
            match self.nodes[index as usize] {
                BvhNode::Leaf { begin, end, .. } => {
                    let hit = self.triangles[begin as usize..end as usize]
                        .iter()
                        .any(|tri| tri.ray_intersect(ray, ray.tmax).is_some());
                    if hit {
                        return true;
                    }
                }
                BvhNode::Internal {
                    bounds,
                    left,
                    right,
                } => {
                    if bounds.intersect(ray, inv_dir, ray.tmax).is_hit() {
                        stack.push(right);
                        stack.push(left);
                    }
                }
            }
        }

        false
    }

    /// Opposite of [`Bvh::is_occluded`]
    #[inline]
    pub fn is_visible(&self, ray: &Ray) -> bool {
        !self.is_occluded(ray)
    }

    fn intersect_leaf(&self, begin: u32, end: u32, ray: &Ray, closest: &mut Closest) {
        for tri in &self.triangles[begin as usize..end as usize] {
            // only hits in [0, closest.t]
            if let Some(hit) = tri.ray_intersect(ray, closest.t) {
                closest.record(hit);
            }
        }
    }

    fn intersect_ordered(&self, index: u32, ray: &Ray, inv_dir: Vec3A, closest: &mut Closest) {
        let (bounds, left, right) = match self.nodes[index as usize] {
            BvhNode::Leaf { begin, end, .. } => {
                self.intersect_leaf(begin, end, ray, closest);
                return;
            }
            BvhNode::Internal {
                bounds,
                left,
                right,
            } => (bounds, left, right),
        };

        if !bounds.intersect(ray, inv_dir, closest.t).is_hit() {
            return;
        }

        let left_hit = self.nodes[left as usize].intersect(ray, inv_dir, closest.t);
        let right_hit = self.nodes[right as usize].intersect(ray, inv_dir, closest.t);

        match (left_hit.is_hit(), right_hit.is_hit()) {
            (true, true) => {
                let (near, far, far_hit) = if left_hit.tmin < right_hit.tmin {
                    (left, right, right_hit)
                } else {
                    (right, left, left_hit)
                };

                self.intersect_ordered(near, ray, inv_dir, closest);
                // the far child can only matter if it starts before the closest hit
                if far_hit.tmin <= closest.t {
                    self.intersect_ordered(far, ray, inv_dir, closest);
                }
            }
            (true, false) => self.intersect_ordered(left, ray, inv_dir, closest),
            (false, true) => self.intersect_ordered(right, ray, inv_dir, closest),
            (false, false) => {}
        }
    }

    fn intersect_naive(&self, index: u32, ray: &Ray, inv_dir: Vec3A, closest: &mut Closest) {
        match self.nodes[index as usize] {
            BvhNode::Leaf { begin, end, .. } => self.intersect_leaf(begin, end, ray, closest),
            BvhNode::Internal {
                bounds,
                left,
                right,
            } => {
                if bounds.intersect(ray, inv_dir, closest.t).is_hit() {
                    self.intersect_naive(left, ray, inv_dir, closest);
                    self.intersect_naive(right, ray, inv_dir, closest);
                }
            }
        }
    }

    /// Triangles in leaf order
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    #[inline]
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    #[inline]
    pub fn root(&self) -> u32 {
        self.root
    }

    #[inline]
    pub fn config(&self) -> &BvhConfig {
        &self.config
    }

    /// Box around the whole scene
    #[inline]
    pub fn bounds(&self) -> AABB {
        *self.nodes[self.root as usize].bounds()
    }

    pub fn stats(&self) -> BvhStats {
        BvhStats::compute(&self.nodes, self.root)
    }

    /// Give the (reordered) triangles back
    pub fn into_triangles(self) -> Vec<Triangle> {
        self.triangles
    }
}

impl RayIntersect for Bvh {
    #[inline]
    fn ray_intersect(&self, ray: &Ray, htmax: f32) -> Option<Hit> {
        self.nearest_hit_within(ray, htmax.min(ray.tmax))
    }
}
