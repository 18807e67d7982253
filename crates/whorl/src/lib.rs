//! Tree and radial graph layout algorithms
//!
//! This crate lays out directed graphs that form, or approximate, a tree.
//! It works with any graph data structure through petgraph's visitor
//! traits: the engine only reads topology and node sizes, and hands the
//! computed positions back to the caller.
//!
//! # Layout Engines
//!
//! - [`CompactTreeLayout`]: compact top-down tree layout, one horizontal
//!   band per level
//! - [`RadialTreeLayout`]: projects the compact layout onto concentric
//!   rings around the root
//!
//! # Example
//!
//! ```
//! use whorl::{LayoutEngine, RadialTreeLayout, Vec2};
//! use petgraph::graphmap::DiGraphMap;
//!
//! // Create a graph
//! let mut graph = DiGraphMap::new();
//! graph.add_edge(1, 2, ());
//! graph.add_edge(1, 3, ());
//!
//! // Create a layout engine
//! let engine = RadialTreeLayout::default();
//!
//! // Provide node sizes
//! let sizes = |_node| Vec2::new(100.0, 50.0);
//!
//! // Use the LayoutEngine trait (simple, single call):
//! let positions = engine.layout(&graph, &sizes).unwrap();
//! assert_eq!(positions.len(), 3);
//!
//! // Or call each phase separately for better control
//! let tree = engine.compute_tree(&graph).unwrap();
//! let positions = engine.compute_positions(&tree, &sizes);
//! # assert_eq!(positions.len(), 3);
//! ```

mod engine;
mod geometry;
mod sizes;

pub mod tree;

// Re-export core types and traits
pub use engine::LayoutEngine;
pub use geometry::{Point, Rect, Vec2};
pub use sizes::NodeSizes;

// Re-export petgraph visitor traits for graph abstraction
pub use petgraph::visit::{GraphBase, IntoNeighborsDirected, IntoNodeIdentifiers};
pub use petgraph::Direction;

// Re-export tree layout types
pub use tree::{CompactTreeLayout, RadialTreeLayout, TreeLayoutError, TreeRows};
