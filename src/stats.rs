use std::fmt;

use crate::BvhNode;

/// Shape and quality figures of a built tree
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BvhStats {
    pub triangle_count: usize,
    pub node_count: usize,
    pub leaf_count: usize,
    /// Levels on the longest root-to-leaf path, a lone leaf counts as 1
    pub depth: usize,
    pub max_leaf_size: usize,
    /// Sum over nodes of `area(node) / area(root)` weighted by 1 for internal
    /// nodes and by the triangle count for leaves. Lower is better.
    pub sah_cost: f64,
}

impl BvhStats {
    pub fn compute(nodes: &[BvhNode], root: u32) -> Self {
        let root_area = nodes[root as usize].bounds().surface_area() as f64;

        let mut stats = BvhStats {
            node_count: nodes.len(),
            depth: depth(nodes, root),
            ..Default::default()
        };

        for node in nodes {
            let area_ratio = if root_area > 0.0 {
                node.bounds().surface_area() as f64 / root_area
            } else {
                // flat scene, every box has zero area
                1.0
            };

            match node {
                BvhNode::Leaf { begin, end, .. } => {
                    let size = (end - begin) as usize;
                    stats.leaf_count += 1;
                    stats.triangle_count += size;
                    stats.max_leaf_size = stats.max_leaf_size.max(size);
                    stats.sah_cost += area_ratio * size as f64;
                }
                BvhNode::Internal { .. } => {
                    stats.sah_cost += area_ratio;
                }
            }
        }

        stats
    }
}

fn depth(nodes: &[BvhNode], index: u32) -> usize {
    match nodes[index as usize] {
        BvhNode::Leaf { .. } => 1,
        BvhNode::Internal { left, right, .. } => 1 + depth(nodes, left).max(depth(nodes, right)),
    }
}

impl fmt::Display for BvhStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "triangles {}, nodes {}, leaves {}, depth {}, max leaf {}, SAH cost {:.3}",
            self.triangle_count,
            self.node_count,
            self.leaf_count,
            self.depth,
            self.max_leaf_size,
            self.sah_cost
        )
    }
}
