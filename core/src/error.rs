use thiserror::Error;

/// Failures of the traversal and aggregation operations.
///
/// A path query for a vertex outside the tree is not an error; it yields
/// an empty path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TraversalError {
    #[error("vertex is not in the graph")]
    UnknownVertex,

    #[error("vertex is not the root of this tree")]
    NotTreeRoot,

    #[error("cannot aggregate over an empty tree")]
    EmptyTree,
}

pub type Result<T> = std::result::Result<T, TraversalError>;
