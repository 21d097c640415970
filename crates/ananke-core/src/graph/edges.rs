//! Edge factory and classification helpers.
//!
//! Free functions constructing the six canonical edge kinds, classifying
//! edges by their endpoint pattern, and traversing edges relative to one of
//! their nodes. Traversal helpers return `None` when the edge cannot be
//! crossed in the requested sense, which lets search loops filter with a
//! single `else { continue }`.

use super::edge::{Edge, EdgeKind};
use super::endpoint::Endpoint;
use super::node::Node;

/// `a --> b`: tail at `a`, arrowhead at `b`.
pub fn directed_edge(a: &Node, b: &Node) -> Edge {
    Edge::new(a.clone(), b.clone(), Endpoint::Tail, Endpoint::Arrow)
}

/// `a <-> b`.
pub fn bidirected_edge(a: &Node, b: &Node) -> Edge {
    Edge::new(a.clone(), b.clone(), Endpoint::Arrow, Endpoint::Arrow)
}

/// `a --- b`.
pub fn undirected_edge(a: &Node, b: &Node) -> Edge {
    Edge::new(a.clone(), b.clone(), Endpoint::Tail, Endpoint::Tail)
}

/// `a o-o b`.
pub fn nondirected_edge(a: &Node, b: &Node) -> Edge {
    Edge::new(a.clone(), b.clone(), Endpoint::Circle, Endpoint::Circle)
}

/// `a o-> b`: circle at `a`, arrowhead at `b`.
pub fn partially_oriented_edge(a: &Node, b: &Node) -> Edge {
    Edge::new(a.clone(), b.clone(), Endpoint::Circle, Endpoint::Arrow)
}

/// An edge with no marks at either end.
pub fn null_edge(a: &Node, b: &Node) -> Edge {
    Edge::new(a.clone(), b.clone(), Endpoint::Null, Endpoint::Null)
}

pub fn is_directed_edge(edge: &Edge) -> bool {
    edge.kind() == Some(EdgeKind::Directed)
}

pub fn is_bidirected_edge(edge: &Edge) -> bool {
    edge.kind() == Some(EdgeKind::Bidirected)
}

pub fn is_undirected_edge(edge: &Edge) -> bool {
    edge.kind() == Some(EdgeKind::Undirected)
}

pub fn is_nondirected_edge(edge: &Edge) -> bool {
    edge.kind() == Some(EdgeKind::Nondirected)
}

pub fn is_partially_oriented_edge(edge: &Edge) -> bool {
    edge.kind() == Some(EdgeKind::PartiallyOriented)
}

pub fn is_null_edge(edge: &Edge) -> bool {
    edge.kind() == Some(EdgeKind::Null)
}

/// The tail node of a directed edge, or `None` if the edge is not directed.
///
/// Canonicalization stores directed edges tail-first, but callers should not
/// rely on that; this inspects the marks.
pub fn directed_edge_tail(edge: &Edge) -> Option<&Node> {
    if edge.endpoint1() == Endpoint::Tail && edge.endpoint2() == Endpoint::Arrow {
        Some(edge.node1())
    } else if edge.endpoint1() == Endpoint::Arrow && edge.endpoint2() == Endpoint::Tail {
        Some(edge.node2())
    } else {
        None
    }
}

/// The head node of a directed edge, or `None` if the edge is not directed.
pub fn directed_edge_head(edge: &Edge) -> Option<&Node> {
    if edge.endpoint1() == Endpoint::Tail && edge.endpoint2() == Endpoint::Arrow {
        Some(edge.node2())
    } else if edge.endpoint1() == Endpoint::Arrow && edge.endpoint2() == Endpoint::Tail {
        Some(edge.node1())
    } else {
        None
    }
}

/// Crosses `edge` from `node` regardless of orientation.
pub fn traverse(node: &Node, edge: &Edge) -> Option<Node> {
    edge.distal_node(node).cloned()
}

/// Crosses `edge` from `node` only if it is a directed edge out of `node`
/// (tail at `node`, arrowhead at the far end); yields the child.
pub fn traverse_directed(node: &Node, edge: &Edge) -> Option<Node> {
    if edge.proximal_endpoint(node) == Some(Endpoint::Tail)
        && edge.distal_endpoint(node) == Some(Endpoint::Arrow)
    {
        edge.distal_node(node).cloned()
    } else {
        None
    }
}

/// Crosses `edge` from `node` unless the edge has an arrowhead into `node`;
/// a tail or circle at `node` permits forward traversal.
pub fn traverse_semi_directed(node: &Node, edge: &Edge) -> Option<Node> {
    match edge.proximal_endpoint(node) {
        Some(Endpoint::Tail) | Some(Endpoint::Circle) => edge.distal_node(node).cloned(),
        _ => None,
    }
}

/// Sorts edges into the deterministic display order.
pub fn ordered(edges: impl IntoIterator<Item = Edge>) -> Vec<Edge> {
    let mut edges: Vec<Edge> = edges.into_iter().collect();
    edges.sort();
    edges
}
