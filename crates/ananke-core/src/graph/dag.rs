//! A DAG view over the edge-list store.
//!
//! The constraint is enforced purely at mutation time: only directed edges
//! may be added, and an edge whose head already reaches its tail is
//! rejected. Queries pass through to the wrapped store (`Deref`); mutation
//! is only possible through the checked methods, so a `Dag` can never be
//! driven into a cyclic or non-directed state.

use std::ops::Deref;

use super::edge::Edge;
use super::edges;
use super::endpoint::Endpoint;
use super::errors::GraphError;
use super::node::Node;
use super::store::EdgeListGraph;

/// A directed acyclic graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dag {
    graph: EdgeListGraph,
}

impl Dag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a DAG from an arbitrary graph.
    ///
    /// # Errors
    ///
    /// Fails if the source contains a directed cycle or any non-directed
    /// edge; nodes and edges are copied through the checked insertion path.
    pub fn from_graph(source: &EdgeListGraph) -> Result<Self, GraphError> {
        if source.paths().exists_directed_cycle() {
            return Err(GraphError::WouldCreateCycle(
                "source graph contains a directed cycle".to_string(),
            ));
        }

        let mut dag = Dag::new();
        for node in source.nodes() {
            dag.graph.add_node(node.clone());
        }
        for edge in source.edges() {
            dag.add_edge(edge.clone())?;
        }
        Ok(dag)
    }

    /// Registers a node. Returns `false` on duplicate identity.
    pub fn add_node(&mut self, node: Node) -> bool {
        self.graph.add_node(node)
    }

    /// Adds a directed edge, rejecting anything that is not directed or
    /// that would close a directed cycle.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        let (Some(tail), Some(head)) = (
            edges::directed_edge_tail(&edge),
            edges::directed_edge_head(&edge),
        ) else {
            return Err(GraphError::NotDirected(edge.to_string()));
        };

        if self.graph.paths().is_ancestor_of(head, tail) {
            return Err(GraphError::WouldCreateCycle(edge.to_string()));
        }

        self.graph.add_edge(edge)
    }

    /// Adds `a --> b` with the cycle check.
    pub fn add_directed_edge(&mut self, a: &Node, b: &Node) -> Result<(), GraphError> {
        self.add_edge(edges::directed_edge(a, b))
    }

    pub fn remove_edge(&mut self, edge: &Edge) -> bool {
        self.graph.remove_edge(edge)
    }

    pub fn remove_edge_between(&mut self, a: &Node, b: &Node) -> bool {
        self.graph.remove_edge_between(a, b)
    }

    pub fn remove_node(&mut self, node: &Node) -> bool {
        self.graph.remove_node(node)
    }

    /// Rejected: a DAG holds directed edges only.
    pub fn add_undirected_edge(&mut self, _a: &Node, _b: &Node) -> Result<(), GraphError> {
        Err(GraphError::UnsupportedOperation(
            "undirected edges on a DAG",
        ))
    }

    /// Rejected: a DAG holds directed edges only.
    pub fn add_bidirected_edge(&mut self, _a: &Node, _b: &Node) -> Result<(), GraphError> {
        Err(GraphError::UnsupportedOperation(
            "bidirected edges on a DAG",
        ))
    }

    /// Rejected: a DAG holds directed edges only.
    pub fn add_nondirected_edge(&mut self, _a: &Node, _b: &Node) -> Result<(), GraphError> {
        Err(GraphError::UnsupportedOperation(
            "nondirected edges on a DAG",
        ))
    }

    /// Rejected: a DAG holds directed edges only.
    pub fn add_partially_oriented_edge(
        &mut self,
        _a: &Node,
        _b: &Node,
    ) -> Result<(), GraphError> {
        Err(GraphError::UnsupportedOperation(
            "partially oriented edges on a DAG",
        ))
    }

    /// Rejected: reorienting endpoints could break acyclicity.
    pub fn set_endpoint(
        &mut self,
        _from: &Node,
        _to: &Node,
        _endpoint: Endpoint,
    ) -> Result<(), GraphError> {
        Err(GraphError::UnsupportedOperation("set_endpoint on a DAG"))
    }

    /// Rejected: a complete graph of one endpoint kind is never a DAG.
    pub fn fully_connect(&mut self, _endpoint: Endpoint) -> Result<(), GraphError> {
        Err(GraphError::UnsupportedOperation("fully_connect on a DAG"))
    }

    /// Rejected: uniform reorientation would destroy directedness.
    pub fn reorient_all_with(&mut self, _endpoint: Endpoint) -> Result<(), GraphError> {
        Err(GraphError::UnsupportedOperation(
            "reorient_all_with on a DAG",
        ))
    }

    /// The wrapped store, read-only.
    pub fn graph(&self) -> &EdgeListGraph {
        &self.graph
    }

    /// Unwraps into the plain store, dropping the DAG constraint.
    pub fn into_graph(self) -> EdgeListGraph {
        self.graph
    }
}

impl Deref for Dag {
    type Target = EdgeListGraph;

    fn deref(&self) -> &Self::Target {
        &self.graph
    }
}
