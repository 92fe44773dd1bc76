//! bacon-core: In-memory minimum-path trees over labeled graphs.
//!
//! A pure Rust library that keeps a directed, labeled multigraph in
//! adjacency lists and builds breadth-first minimum-path trees from a
//! chosen root. From a tree it reconstructs paths back to the root, lists
//! the vertices the root cannot reach, and computes the average
//! separation (hop distance) of everything it can.
//!
//! No I/O happens here; the `bacon` CLI loads movie datasets, builds the
//! costar graph and drives these operations.

mod error;
mod graph;
mod traversal;
mod tree;

pub use error::{Result, TraversalError};
pub use graph::{Edge, EdgeRecord, Graph, LabelId, NodeId};
pub use traversal::{
    average_separation, build_tree, build_tree_from, path_steps, path_to_root, unreached,
    PathStep,
};
pub use tree::BfsTree;
