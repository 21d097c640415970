//! Error types for graph mutation and query operations.

use thiserror::Error;

/// Errors surfaced by the graph store, its constrained views, and the paths
/// engine.
///
/// Every variant is a local, synchronous contract violation; there is no
/// transient-failure class in this subsystem. Callers enumerating candidate
/// mutations (orientation search, transformations) are expected to treat
/// these as "this candidate is invalid" rather than as system failures.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GraphError {
    /// An operation referenced a node that is not registered in the graph.
    #[error("node '{0}' is not in the graph")]
    NodeNotInGraph(String),

    /// A node with this name is already registered.
    #[error("a node named '{0}' is already in the graph")]
    DuplicateNode(String),

    /// An edge was added between a pair that is already connected. At most
    /// one edge may connect any unordered node pair.
    #[error("nodes '{0}' and '{1}' are already adjacent")]
    AlreadyAdjacent(String, String),

    /// An endpoint operation referenced a pair with no connecting edge.
    #[error("no edge between '{0}' and '{1}'")]
    NoSuchEdge(String, String),

    /// The edge is not a directed edge of the graph (required by
    /// DAG insertion and PAG visibility queries).
    #[error("'{0}' is not a directed edge of this graph")]
    NotDirected(String),

    /// Adding the edge would make its head an ancestor of its tail.
    #[error("adding '{0}' would create a directed cycle")]
    WouldCreateCycle(String),

    /// The operation is rejected by this graph kind (e.g. undirected edges
    /// on a DAG view).
    #[error("operation not supported for this graph kind: {0}")]
    UnsupportedOperation(&'static str),

    /// Inducing-path queries require measured endpoint nodes.
    #[error("'{0}' is not a measured node")]
    NotMeasured(String),

    /// A partially directed graph admits no consistent DAG extension.
    #[error("no DAG extension exists: {0}")]
    NoDagExtension(String),

    /// Syntax error in a textual edge spec.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<ananke_frontend::FrontendError> for GraphError {
    fn from(err: ananke_frontend::FrontendError) -> Self {
        match err {
            ananke_frontend::FrontendError::ParseError(msg) => GraphError::Parse(msg),
            other => GraphError::Parse(format!("unexpected frontend error: {other:?}")),
        }
    }
}
