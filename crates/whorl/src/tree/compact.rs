use super::TreeRows;
use crate::{NodeSizes, Point, Vec2};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Assign compact Cartesian positions to every tree vertex
///
/// Each depth occupies its own horizontal band, sibling subtrees are packed
/// left to right with at least `node_distance` between them, and every
/// parent is centered over its children. The result is the input for the
/// radial projection, and a usable top-down tree layout on its own.
pub(crate) fn assign_compact_positions<N, S>(
    tree: &TreeRows<N>,
    sizes: &S,
    node_distance: f32,
    level_distance: f32,
) -> HashMap<N, Point>
where
    N: Copy + Ord + Hash + fmt::Debug,
    S: NodeSizes<N>,
{
    let node_count = tree.nodes.len();

    // One band per depth: as tall as the tallest node at that depth,
    // consecutive bands separated by level_distance
    let depth_count = tree.rows.len() + 1;
    let mut band_size = vec![Vec2::zero(); depth_count];
    for node in &tree.nodes {
        band_size[node.depth] = band_size[node.depth].max(sizes.size(node.vertex));
    }

    let mut band_top = vec![0.0f32; depth_count];
    for depth in 1..depth_count {
        band_top[depth] = band_top[depth - 1] + band_size[depth - 1].y + level_distance;
    }

    // Slab widths, bottom up: a subtree claims enough horizontal room for
    // its own node and for all child slabs plus the configured gaps.
    // Nodes are in breadth-first order, so reverse iteration visits every
    // child before its parent.
    let mut slab_width = vec![0.0f32; node_count];
    for index in (0..node_count).rev() {
        let node = &tree.nodes[index];
        let own_width = sizes.size(node.vertex).x;
        slab_width[index] = own_width.max(block_width(&node.children, &slab_width, node_distance));
    }

    // Place top down: each node sits centered in its slab, vertically
    // centered in its band, with the block of child slabs centered
    // underneath it
    let mut slab_left = vec![0.0f32; node_count];
    let mut positions = HashMap::with_capacity(node_count);
    for index in 0..node_count {
        let node = &tree.nodes[index];
        let size = sizes.size(node.vertex);
        let center_x = slab_left[index] + slab_width[index] / 2.0;

        positions.insert(
            node.vertex,
            Point::new(
                center_x - size.x / 2.0,
                band_top[node.depth] + (band_size[node.depth].y - size.y) / 2.0,
            ),
        );

        let children_width = block_width(&node.children, &slab_width, node_distance);
        let mut cursor = slab_left[index] + (slab_width[index] - children_width) / 2.0;
        for &child in &node.children {
            slab_left[child] = cursor;
            cursor += slab_width[child] + node_distance;
        }
    }

    positions
}

/// Width of a block of sibling slabs, gaps included
fn block_width(children: &[usize], slab_width: &[f32], node_distance: f32) -> f32 {
    if children.is_empty() {
        return 0.0;
    }

    let gaps = (children.len() - 1) as f32 * node_distance;
    children.iter().map(|&child| slab_width[child]).sum::<f32>() + gaps
}

#[cfg(test)]
mod tests {
    use super::super::CompactTreeLayout;
    use crate::{NodeSizes, Rect, Vec2};
    use petgraph::graphmap::DiGraphMap;
    use std::collections::HashMap;
    use test_log::test;

    const NODE_DISTANCE: f32 = 10.0;
    const LEVEL_DISTANCE: f32 = 120.0;

    fn sample_graph() -> DiGraphMap<&'static str, ()> {
        let mut graph = DiGraphMap::new();
        graph.add_edge("r", "a", ());
        graph.add_edge("r", "b", ());
        graph.add_edge("r", "c", ());
        graph.add_edge("a", "d", ());
        graph.add_edge("a", "e", ());
        graph
    }

    fn sample_sizes(node: &'static str) -> Vec2 {
        match node {
            "r" => Vec2::new(60.0, 30.0),
            "a" => Vec2::new(30.0, 20.0),
            "b" => Vec2::new(50.0, 40.0),
            "c" => Vec2::new(20.0, 20.0),
            _ => Vec2::new(40.0, 20.0),
        }
    }

    fn layout_sample() -> (
        super::super::TreeRows<&'static str>,
        HashMap<&'static str, Rect>,
    ) {
        let graph = sample_graph();
        let engine = CompactTreeLayout::default();
        let tree = engine.compute_tree(&graph).unwrap();
        let positions = engine.compute_positions(&tree, &sample_sizes);

        let bounds = positions
            .iter()
            .map(|(&v, &pos)| (v, Rect::new(pos, sample_sizes.size(v))))
            .collect();
        (tree, bounds)
    }

    #[test]
    fn siblings_keep_their_distance() {
        let (tree, bounds) = layout_sample();

        for row in 0..tree.depth() {
            let row_bounds: Vec<_> = tree.row(row).map(|v| bounds[&v]).collect();
            for pair in row_bounds.windows(2) {
                assert!(
                    pair[1].x >= pair[0].right() + NODE_DISTANCE - 1e-3,
                    "row {row}: {:?} overlaps {:?}",
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn levels_occupy_distinct_bands() {
        let (tree, bounds) = layout_sample();

        let root_bottom = bounds[&tree.root()].bottom();
        let mut previous_bottom = root_bottom;
        for row in 0..tree.depth() {
            let top = tree
                .row(row)
                .map(|v| bounds[&v].y)
                .fold(f32::INFINITY, f32::min);
            assert!(
                top >= previous_bottom + LEVEL_DISTANCE - 1e-3,
                "row {row} starts at {top}, previous level ends at {previous_bottom}"
            );
            previous_bottom = tree
                .row(row)
                .map(|v| bounds[&v].bottom())
                .fold(f32::NEG_INFINITY, f32::max);
        }
    }

    #[test]
    fn parents_are_centered_over_children() {
        // Equal child widths make the expected center exact
        let mut graph = DiGraphMap::new();
        graph.add_edge("r", "a", ());
        graph.add_edge("r", "b", ());
        graph.add_edge("r", "c", ());

        let engine = CompactTreeLayout::default();
        let sizes = |_: &'static str| Vec2::new(40.0, 20.0);
        let tree = engine.compute_tree(&graph).unwrap();
        let positions = engine.compute_positions(&tree, &sizes);

        let center = |v: &'static str| positions[&v].x + 20.0;
        let expected = (center("a") + center("c")) / 2.0;
        assert!((center("r") - expected).abs() < 1e-3);
    }

    #[test]
    fn lone_root_sits_at_the_origin() {
        let mut graph: DiGraphMap<&'static str, ()> = DiGraphMap::new();
        graph.add_node("r");

        let engine = CompactTreeLayout::default();
        let sizes = |_: &'static str| Vec2::new(40.0, 20.0);
        let tree = engine.compute_tree_from(&graph, "r").unwrap();
        let positions = engine.compute_positions(&tree, &sizes);

        assert_eq!(positions.len(), 1);
        assert_eq!(positions[&"r"].x, 0.0);
        assert_eq!(positions[&"r"].y, 0.0);
    }
}
