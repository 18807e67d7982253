mod builder;
mod compact;
mod radial;

use crate::{LayoutEngine, NodeSizes, Point};
use petgraph::visit::{IntoNeighborsDirected, IntoNodeIdentifiers};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use thiserror::Error;

use builder::build_tree;
use compact::assign_compact_positions;
use radial::project_radial;

/// Errors that can occur while building the layout tree
#[derive(Debug, Error)]
pub enum TreeLayoutError<N>
where
    N: fmt::Debug,
{
    /// No connected vertex qualifies as a tree root
    #[error("no connected vertex free of incoming edges to use as a root")]
    NoRoot,

    /// The requested root is not part of the graph
    #[error("root vertex {0:?} is not part of the graph")]
    UnknownRoot(N),
}

/// Tree structure organized into depth rows, cacheable between runs
///
/// Row `i` holds the vertices at depth `i + 1` in left-to-right layout
/// order; the root is the layout center and belongs to no row. Row `i + 1`
/// only exists if some vertex in row `i` has children. Building the tree
/// depends on the graph structure alone, not on node sizes.
#[derive(Debug, Clone)]
pub struct TreeRows<N>
where
    N: Copy + Ord + Hash + fmt::Debug,
{
    pub(crate) nodes: Vec<TreeNode<N>>,
    pub(crate) rows: Vec<Vec<usize>>,
}

/// One vertex of the layout tree, children ordered left to right
#[derive(Debug, Clone)]
pub(crate) struct TreeNode<N> {
    pub(crate) vertex: N,
    pub(crate) children: Vec<usize>,
    pub(crate) depth: usize,
}

impl<N> TreeRows<N>
where
    N: Copy + Ord + Hash + fmt::Debug,
{
    /// The root vertex the tree was built from
    pub fn root(&self) -> N {
        self.nodes[0].vertex
    }

    /// Number of vertices in the tree, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of rows below the root
    pub fn depth(&self) -> usize {
        self.rows.len()
    }

    /// Vertices of row `index` in left-to-right order
    pub fn row(&self, index: usize) -> impl Iterator<Item = N> + '_ {
        self.rows[index].iter().map(move |&i| self.nodes[i].vertex)
    }
}

/// Configuration for the compact top-down tree layout
///
/// Levels occupy distinct horizontal bands, sibling subtrees never overlap
/// and every parent is centered over its children.
#[derive(Debug, Clone)]
pub struct CompactTreeLayout {
    /// Minimum horizontal gap between sibling subtrees
    pub node_distance: f32,

    /// Vertical gap between consecutive tree levels
    pub level_distance: f32,

    /// Order children by vertex id instead of edge declaration order
    pub sort_edges: bool,
}

impl Default for CompactTreeLayout {
    fn default() -> Self {
        Self {
            node_distance: 10.0,
            level_distance: 120.0,
            sort_edges: false,
        }
    }
}

impl CompactTreeLayout {
    /// Create a new compact tree layout with the given distances
    pub fn new(node_distance: f32, level_distance: f32) -> Self {
        Self {
            node_distance,
            level_distance,
            ..Default::default()
        }
    }

    /// Build the tree structure (expensive, cache this)
    ///
    /// The root is discovered as the first connected vertex without
    /// incoming edges.
    ///
    /// # Errors
    /// Returns an error if no vertex qualifies as a root
    pub fn compute_tree<G>(&self, graph: G) -> Result<TreeRows<G::NodeId>, TreeLayoutError<G::NodeId>>
    where
        G: IntoNodeIdentifiers + IntoNeighborsDirected,
        G::NodeId: Copy + Ord + Hash + fmt::Debug,
    {
        build_tree(graph, None, self.sort_edges)
    }

    /// Build the tree structure below an explicit root (expensive, cache
    /// this)
    ///
    /// # Errors
    /// Returns an error if `root` is not part of the graph
    pub fn compute_tree_from<G>(
        &self,
        graph: G,
        root: G::NodeId,
    ) -> Result<TreeRows<G::NodeId>, TreeLayoutError<G::NodeId>>
    where
        G: IntoNodeIdentifiers + IntoNeighborsDirected,
        G::NodeId: Copy + Ord + Hash + fmt::Debug,
    {
        build_tree(graph, Some(root), self.sort_edges)
    }

    /// Compute positions from a cached tree (cheap, rerun when sizes
    /// change)
    pub fn compute_positions<N, S>(&self, tree: &TreeRows<N>, sizes: &S) -> HashMap<N, Point>
    where
        N: Copy + Ord + Hash + fmt::Debug,
        S: NodeSizes<N>,
    {
        assign_compact_positions(tree, sizes, self.node_distance, self.level_distance)
    }

    /// Lay out the tree below an explicit root in one call
    ///
    /// # Errors
    /// Returns an error if `root` is not part of the graph
    pub fn layout_from<G, S>(
        &self,
        graph: G,
        root: G::NodeId,
        sizes: &S,
    ) -> Result<HashMap<G::NodeId, Point>, TreeLayoutError<G::NodeId>>
    where
        G: IntoNodeIdentifiers + IntoNeighborsDirected,
        G::NodeId: Copy + Ord + Hash + fmt::Debug,
        S: NodeSizes<G::NodeId>,
    {
        let tree = self.compute_tree_from(graph, root)?;
        Ok(self.compute_positions(&tree, sizes))
    }
}

/// Configuration for the radial tree layout
///
/// Projects the compact layout onto concentric rings around the root: one
/// ring per tree level, angles taken from the compact horizontal order,
/// parents pulled toward the angular centroid of their children.
#[derive(Debug, Clone)]
pub struct RadialTreeLayout {
    /// Minimum horizontal gap between sibling subtrees, also the margin of
    /// the virtual extent angles are mapped from
    pub node_distance: f32,

    /// Vertical gap between consecutive tree levels; with `auto_radius`
    /// the nominal radial spacing per level
    pub level_distance: f32,

    /// Initial angular offset, kept for configuration compatibility; the
    /// current angle formula does not apply it
    pub angle_offset: f32,

    /// Derive ring radii from `level_distance` instead of the compact
    /// vertical placement
    pub auto_radius: bool,

    /// Order children by vertex id instead of edge declaration order
    pub sort_edges: bool,
}

impl Default for RadialTreeLayout {
    fn default() -> Self {
        Self {
            node_distance: 10.0,
            level_distance: 120.0,
            angle_offset: 0.5,
            auto_radius: false,
            sort_edges: false,
        }
    }
}

impl RadialTreeLayout {
    /// Create a new radial tree layout with the given distances
    pub fn new(node_distance: f32, level_distance: f32) -> Self {
        Self {
            node_distance,
            level_distance,
            ..Default::default()
        }
    }

    /// Build the tree structure (expensive, cache this)
    ///
    /// The root is discovered as the first connected vertex without
    /// incoming edges.
    ///
    /// # Errors
    /// Returns an error if no vertex qualifies as a root
    pub fn compute_tree<G>(&self, graph: G) -> Result<TreeRows<G::NodeId>, TreeLayoutError<G::NodeId>>
    where
        G: IntoNodeIdentifiers + IntoNeighborsDirected,
        G::NodeId: Copy + Ord + Hash + fmt::Debug,
    {
        build_tree(graph, None, self.sort_edges)
    }

    /// Build the tree structure below an explicit root (expensive, cache
    /// this)
    ///
    /// # Errors
    /// Returns an error if `root` is not part of the graph
    pub fn compute_tree_from<G>(
        &self,
        graph: G,
        root: G::NodeId,
    ) -> Result<TreeRows<G::NodeId>, TreeLayoutError<G::NodeId>>
    where
        G: IntoNodeIdentifiers + IntoNeighborsDirected,
        G::NodeId: Copy + Ord + Hash + fmt::Debug,
    {
        build_tree(graph, Some(root), self.sort_edges)
    }

    /// Compute positions from a cached tree (cheap, rerun when sizes
    /// change)
    ///
    /// Runs the compact pass first and projects its result onto rings; a
    /// tree without rows leaves the root at its compact position.
    pub fn compute_positions<N, S>(&self, tree: &TreeRows<N>, sizes: &S) -> HashMap<N, Point>
    where
        N: Copy + Ord + Hash + fmt::Debug,
        S: NodeSizes<N>,
    {
        let compact = assign_compact_positions(tree, sizes, self.node_distance, self.level_distance);
        project_radial(tree, sizes, &compact, self)
    }

    /// Lay out the tree below an explicit root in one call
    ///
    /// # Errors
    /// Returns an error if `root` is not part of the graph
    pub fn layout_from<G, S>(
        &self,
        graph: G,
        root: G::NodeId,
        sizes: &S,
    ) -> Result<HashMap<G::NodeId, Point>, TreeLayoutError<G::NodeId>>
    where
        G: IntoNodeIdentifiers + IntoNeighborsDirected,
        G::NodeId: Copy + Ord + Hash + fmt::Debug,
        S: NodeSizes<G::NodeId>,
    {
        let tree = self.compute_tree_from(graph, root)?;
        Ok(self.compute_positions(&tree, sizes))
    }
}

// Implement the stage contract for any graph with the required capabilities
impl<G> LayoutEngine<G> for CompactTreeLayout
where
    G: IntoNodeIdentifiers + IntoNeighborsDirected,
    G::NodeId: Copy + Ord + Hash + fmt::Debug,
{
    type NodeId = G::NodeId;
    type Error = TreeLayoutError<G::NodeId>;

    fn layout<S>(&self, graph: G, sizes: &S) -> Result<HashMap<Self::NodeId, Point>, Self::Error>
    where
        S: NodeSizes<Self::NodeId>,
    {
        let tree = self.compute_tree(graph)?;
        Ok(self.compute_positions(&tree, sizes))
    }
}

impl<G> LayoutEngine<G> for RadialTreeLayout
where
    G: IntoNodeIdentifiers + IntoNeighborsDirected,
    G::NodeId: Copy + Ord + Hash + fmt::Debug,
{
    type NodeId = G::NodeId;
    type Error = TreeLayoutError<G::NodeId>;

    fn layout<S>(&self, graph: G, sizes: &S) -> Result<HashMap<Self::NodeId, Point>, Self::Error>
    where
        S: NodeSizes<Self::NodeId>,
    {
        let tree = self.compute_tree(graph)?;
        Ok(self.compute_positions(&tree, sizes))
    }
}
