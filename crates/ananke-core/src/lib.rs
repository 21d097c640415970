//! # Ananke Core
//!
//! The graph data model and algorithms of a causal-discovery toolkit:
//! causal graphs (DAGs, CPDAGs, PAGs, time-lagged SVAR graphs), the
//! mutation and query contract over them, and the path/d-separation engine
//! search procedures are built on.
//!
//! ## Layout
//!
//! - [`graph`]: nodes, edges, the edge-list store, and the DAG and
//!   lag-replicating views
//! - [`paths`]: reachability, ancestry, d-separation, possible-d-connection,
//!   inducing paths, PAG edge visibility
//! - [`transform`]: DAG ↔ CPDAG conversions via the Meek rules
//! - [`convert`]: building graphs from textual edge specs

pub mod convert;
pub mod graph;
pub mod paths;
pub mod transform;

pub use convert::graph_from_spec;
pub use graph::{
    Dag, DefaultLagPolicy, Edge, EdgeKind, EdgeListGraph, Endpoint, GraphError, LagGraph, Node,
    NodeType, ReplicationPolicy, Triple,
};
pub use paths::Paths;
