use crate::{NodeSizes, Point};
use std::collections::HashMap;
use std::hash::Hash;

/// A layout engine that can compute positions for graph nodes
///
/// This is the stage contract of a layout pipeline: every stage consumes the
/// shared graph plus the current node sizes and produces positions for the
/// next consumer. The trait is generic over the graph type `G`, allowing
/// different layout engines to state their own graph requirements:
/// - Tree layouts implement it for graphs readable through petgraph's
///   directed visitor traits
/// - Force-directed layouts could implement it for undirected graphs
pub trait LayoutEngine<G> {
    /// The type used to identify nodes in the graph
    type NodeId: Copy + Ord + Hash;

    /// Error surfaced when the graph violates the engine's preconditions
    type Error;

    /// Compute node positions for the given graph
    ///
    /// # Errors
    /// Returns an error if the layout computation fails (e.g., no tree root
    /// can be resolved for tree layouts, or other layout-specific
    /// constraints are violated)
    fn layout<S>(&self, graph: G, sizes: &S) -> Result<HashMap<Self::NodeId, Point>, Self::Error>
    where
        S: NodeSizes<Self::NodeId>;
}
