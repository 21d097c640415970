//! The causal graph data model.
//!
//! This module provides:
//! - **endpoint / node / edge / edges / triple**: the vocabulary types —
//!   endpoint marks, shared node handles, canonicalized edges, the edge
//!   factory, and path triples
//! - **store**: the mutable edge-list graph with its adjacency index
//! - **dag**: the acyclicity-enforcing view
//! - **lag**: the replication-aware view for time-lagged (SVAR) graphs
//! - **errors**: the error type shared by all graph operations

pub mod dag;
pub mod edge;
pub mod edges;
pub mod endpoint;
pub mod errors;
pub mod lag;
pub mod node;
pub mod store;
pub mod triple;

pub use dag::Dag;
pub use edge::{Edge, EdgeKind, EdgeProperty, EdgeTypeProbability, EdgeTypeTag};
pub use endpoint::Endpoint;
pub use errors::GraphError;
pub use lag::{parse_lag_name, DefaultLagPolicy, LagGraph, ReplicationPolicy};
pub use node::{AttrValue, Node, NodeType, NodeVariableType};
pub use store::EdgeListGraph;
pub use triple::Triple;
