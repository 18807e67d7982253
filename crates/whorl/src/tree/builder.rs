use super::{TreeLayoutError, TreeNode, TreeRows};
use petgraph::visit::{IntoNeighborsDirected, IntoNodeIdentifiers};
use petgraph::Direction;
use std::collections::HashSet;
use std::hash::Hash;
use tracing::debug;

/// Build the layout tree for the graph, rooted at `root` or at a
/// discovered root
///
/// Walks outgoing edges breadth-first from the root. Edges leading back
/// into the visited set (diamonds, cycles, self loops) are ignored, so a
/// graph that only approximates a tree degrades to its spanning tree in
/// discovery order.
pub(crate) fn build_tree<G>(
    graph: G,
    root: Option<G::NodeId>,
    sort_edges: bool,
) -> Result<TreeRows<G::NodeId>, TreeLayoutError<G::NodeId>>
where
    G: IntoNodeIdentifiers + IntoNeighborsDirected,
    G::NodeId: Copy + Ord + Hash + std::fmt::Debug,
{
    let root = match root {
        Some(vertex) => {
            if !graph.node_identifiers().any(|n| n == vertex) {
                return Err(TreeLayoutError::UnknownRoot(vertex));
            }
            vertex
        }
        None => discover_root(&graph)?,
    };

    let mut nodes = vec![TreeNode {
        vertex: root,
        children: Vec::new(),
        depth: 0,
    }];
    let mut visited = HashSet::new();
    visited.insert(root);

    let mut cursor = 0;
    while cursor < nodes.len() {
        let vertex = nodes[cursor].vertex;
        let depth = nodes[cursor].depth;

        let mut successors: Vec<_> = graph
            .neighbors_directed(vertex, Direction::Outgoing)
            .collect();
        if sort_edges {
            successors.sort_unstable();
        }

        for succ in successors {
            if !visited.insert(succ) {
                continue;
            }
            let child = nodes.len();
            nodes.push(TreeNode {
                vertex: succ,
                children: Vec::new(),
                depth: depth + 1,
            });
            nodes[cursor].children.push(child);
        }

        cursor += 1;
    }

    // Nodes are in breadth-first order, so the last one is the deepest
    let max_depth = nodes.last().map_or(0, |node| node.depth);
    let mut rows = vec![Vec::new(); max_depth];
    for (index, node) in nodes.iter().enumerate() {
        if node.depth > 0 {
            rows[node.depth - 1].push(index);
        }
    }

    debug!(
        "Tree from {root:?}: {} nodes in {} rows",
        nodes.len(),
        rows.len()
    );

    Ok(TreeRows { nodes, rows })
}

/// Pick the first vertex with outgoing but no incoming edges
///
/// Vertices without any connection never qualify, they are excluded from
/// layout entirely.
fn discover_root<G>(graph: &G) -> Result<G::NodeId, TreeLayoutError<G::NodeId>>
where
    G: IntoNodeIdentifiers + IntoNeighborsDirected,
    G::NodeId: Copy + Ord + Hash + std::fmt::Debug,
{
    for vertex in graph.node_identifiers() {
        let has_outgoing = graph
            .neighbors_directed(vertex, Direction::Outgoing)
            .next()
            .is_some();
        let has_incoming = graph
            .neighbors_directed(vertex, Direction::Incoming)
            .next()
            .is_some();

        if has_outgoing && !has_incoming {
            return Ok(vertex);
        }
    }

    Err(TreeLayoutError::NoRoot)
}
