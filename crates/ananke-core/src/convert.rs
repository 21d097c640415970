//! Builds graphs from textual edge specs.
//!
//! The spec language is parsed by `ananke-frontend`; this module gives the
//! AST its graph semantics: latent declarations set the node type, nodes
//! auto-register on first mention, and the store's single-edge-per-pair
//! invariant surfaces as an error for duplicate pairs.

use tracing::debug;

use ananke_frontend::{EdgeMark, SpecItem};

use crate::graph::{Edge, EdgeListGraph, Endpoint, GraphError, Node, NodeType};

/// Parses a spec such as `"X,Latent(L1),L1-->X,L1-->Y"` into a graph.
///
/// # Errors
///
/// Syntax errors from the parser and structural violations from the store
/// (in particular a second edge between an already-adjacent pair).
pub fn graph_from_spec(spec: &str) -> Result<EdgeListGraph, GraphError> {
    let parsed = ananke_frontend::parse_spec(spec)?;
    let mut graph = EdgeListGraph::new();

    for item in &parsed.items {
        match item {
            SpecItem::Node(name) => {
                ensure_node(&mut graph, name, NodeType::Measured);
            }
            SpecItem::Latent(name) => {
                ensure_node(&mut graph, name, NodeType::Latent);
            }
            SpecItem::Edge { left, right, mark } => {
                let left = ensure_node(&mut graph, left, NodeType::Measured);
                let right = ensure_node(&mut graph, right, NodeType::Measured);
                let (e1, e2) = endpoints_of(*mark);
                graph.add_edge(Edge::new(left, right, e1, e2))?;
            }
        }
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph built from spec"
    );
    Ok(graph)
}

fn ensure_node(graph: &mut EdgeListGraph, name: &str, node_type: NodeType) -> Node {
    if let Some(existing) = graph.node(name) {
        return existing.clone();
    }
    let node = Node::with_type(name, node_type);
    graph.add_node(node.clone());
    node
}

fn endpoints_of(mark: EdgeMark) -> (Endpoint, Endpoint) {
    match mark {
        EdgeMark::Directed => (Endpoint::Tail, Endpoint::Arrow),
        EdgeMark::Undirected => (Endpoint::Tail, Endpoint::Tail),
        EdgeMark::Bidirected => (Endpoint::Arrow, Endpoint::Arrow),
        EdgeMark::PartialRight => (Endpoint::Circle, Endpoint::Arrow),
        EdgeMark::PartialLeft => (Endpoint::Arrow, Endpoint::Circle),
        EdgeMark::Nondirected => (Endpoint::Circle, Endpoint::Circle),
    }
}
