//! Edges: unordered node pairs with endpoint marks.
//!
//! Construction canonicalizes the stored orientation: any endpoint pattern
//! that would read as an arrow pointing right-to-left (an arrowhead at
//! node1 paired with a tail or circle at node2) is stored with the nodes
//! and endpoints swapped. Equality and hashing are symmetric — the edge
//! `A --> B` constructed either way around is one value.
//!
//! Display annotations (highlighting, property tags, bootstrap edge-type
//! probabilities) are shared across clones of the same edge and excluded
//! from identity.

use std::cmp::Ordering;
use std::fmt;
use std::sync::{Arc, RwLock};

use super::endpoint::Endpoint;
use super::node::Node;

/// The six canonical edge kinds derivable from an endpoint pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeKind {
    /// `A --> B` (tail, arrow).
    Directed,
    /// `A <-> B` (arrow, arrow).
    Bidirected,
    /// `A --- B` (tail, tail).
    Undirected,
    /// `A o-o B` (circle, circle).
    Nondirected,
    /// `A o-> B` (circle, arrow).
    PartiallyOriented,
    /// No marks at either end.
    Null,
}

/// Distinguishing property tags an edge may carry, in the sense used by
/// bootstrap ensemble output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeProperty {
    /// Definitely direct.
    Dd,
    /// No latent confounder.
    Nl,
    /// Possibly direct.
    Pd,
    /// Possibly confounded by a latent.
    Pl,
}

/// One of the eight edge-type tags a bootstrap distribution ranges over,
/// read relative to the edge's stored (node1, node2) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeTypeTag {
    /// No edge.
    Nil,
    /// `node1 --> node2`
    Directed,
    /// `node1 <-- node2`
    Reversed,
    /// `node1 o-> node2`
    PartialRight,
    /// `node1 <-o node2`
    PartialLeft,
    /// `node1 o-o node2`
    Nondirected,
    /// `node1 <-> node2`
    Bidirected,
    /// `node1 --- node2`
    Undirected,
}

/// A bootstrap record: how often an edge type was seen, with its properties.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeTypeProbability {
    pub edge_type: EdgeTypeTag,
    pub probability: f64,
    pub properties: Vec<EdgeProperty>,
}

impl EdgeTypeProbability {
    pub fn new(edge_type: EdgeTypeTag, probability: f64) -> Self {
        Self {
            edge_type,
            probability,
            properties: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
struct Annotations {
    highlighted: bool,
    properties: Vec<EdgeProperty>,
    type_probabilities: Vec<EdgeTypeProbability>,
    probability: f64,
}

/// An edge between two nodes, one endpoint mark proximal to each.
#[derive(Debug, Clone)]
pub struct Edge {
    node1: Node,
    node2: Node,
    endpoint1: Endpoint,
    endpoint2: Endpoint,
    annotations: Arc<RwLock<Annotations>>,
}

impl Edge {
    /// Constructs an edge, normalizing the stored orientation so arrows
    /// never read right-to-left.
    pub fn new(node1: Node, node2: Node, endpoint1: Endpoint, endpoint2: Endpoint) -> Self {
        let (node1, node2, endpoint1, endpoint2) = if points_left(endpoint1, endpoint2) {
            (node2, node1, endpoint2, endpoint1)
        } else {
            (node1, node2, endpoint1, endpoint2)
        };

        Edge {
            node1,
            node2,
            endpoint1,
            endpoint2,
            annotations: Arc::new(RwLock::new(Annotations::default())),
        }
    }

    pub fn node1(&self) -> &Node {
        &self.node1
    }

    pub fn node2(&self) -> &Node {
        &self.node2
    }

    pub fn endpoint1(&self) -> Endpoint {
        self.endpoint1
    }

    pub fn endpoint2(&self) -> Endpoint {
        self.endpoint2
    }

    /// Whether the given node is one of this edge's two nodes.
    pub fn touches(&self, node: &Node) -> bool {
        self.node1 == *node || self.node2 == *node
    }

    /// The node at the other end from `node`, if `node` is on this edge.
    ///
    /// For a self-loop both ends are the same node.
    pub fn distal_node(&self, node: &Node) -> Option<&Node> {
        if self.node1 == *node {
            Some(&self.node2)
        } else if self.node2 == *node {
            Some(&self.node1)
        } else {
            None
        }
    }

    /// The mark at `node`'s own end.
    pub fn proximal_endpoint(&self, node: &Node) -> Option<Endpoint> {
        if self.node1 == *node {
            Some(self.endpoint1)
        } else if self.node2 == *node {
            Some(self.endpoint2)
        } else {
            None
        }
    }

    /// The mark at the far end from `node`.
    pub fn distal_endpoint(&self, node: &Node) -> Option<Endpoint> {
        if self.node1 == *node {
            Some(self.endpoint2)
        } else if self.node2 == *node {
            Some(self.endpoint1)
        } else {
            None
        }
    }

    /// True iff this edge is `other --> node`: an arrowhead at `node` and a
    /// tail at the far end.
    pub fn points_towards(&self, node: &Node) -> bool {
        self.proximal_endpoint(node) == Some(Endpoint::Arrow)
            && self.distal_endpoint(node) == Some(Endpoint::Tail)
    }

    /// Classifies this edge into one of the six canonical kinds, or `None`
    /// for irregular patterns (star marks, mixed null).
    pub fn kind(&self) -> Option<EdgeKind> {
        use Endpoint::*;
        match (self.endpoint1, self.endpoint2) {
            (Tail, Arrow) => Some(EdgeKind::Directed),
            (Arrow, Arrow) => Some(EdgeKind::Bidirected),
            (Tail, Tail) => Some(EdgeKind::Undirected),
            (Circle, Circle) => Some(EdgeKind::Nondirected),
            (Circle, Arrow) => Some(EdgeKind::PartiallyOriented),
            (Null, Null) => Some(EdgeKind::Null),
            _ => None,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.annotations.read().map(|a| a.highlighted).unwrap_or(false)
    }

    pub fn set_highlighted(&self, highlighted: bool) {
        if let Ok(mut a) = self.annotations.write() {
            a.highlighted = highlighted;
        }
    }

    pub fn properties(&self) -> Vec<EdgeProperty> {
        self.annotations
            .read()
            .map(|a| a.properties.clone())
            .unwrap_or_default()
    }

    /// Appends a property tag, keeping the list duplicate-free and ordered
    /// by insertion.
    pub fn add_property(&self, property: EdgeProperty) {
        if let Ok(mut a) = self.annotations.write() {
            if !a.properties.contains(&property) {
                a.properties.push(property);
            }
        }
    }

    pub fn type_probabilities(&self) -> Vec<EdgeTypeProbability> {
        self.annotations
            .read()
            .map(|a| a.type_probabilities.clone())
            .unwrap_or_default()
    }

    pub fn add_type_probability(&self, record: EdgeTypeProbability) {
        if let Ok(mut a) = self.annotations.write() {
            a.type_probabilities.push(record);
        }
    }

    /// Overall probability of this edge (bootstrap frequency); 0.0 unless
    /// set.
    pub fn probability(&self) -> f64 {
        self.annotations.read().map(|a| a.probability).unwrap_or(0.0)
    }

    pub fn set_probability(&self, probability: f64) {
        if let Ok(mut a) = self.annotations.write() {
            a.probability = probability;
        }
    }

    /// Shares the annotation cell of `other` so replacement edges produced
    /// by endpoint reorientation keep their display state.
    pub(crate) fn share_annotations_from(&mut self, other: &Edge) {
        self.annotations = Arc::clone(&other.annotations);
    }

    /// The stored pair keyed in name order, with endpoints arranged to
    /// match. Used for order-insensitive hashing and comparison.
    fn normalized(&self) -> (&Node, &Node, Endpoint, Endpoint) {
        if self.node1 <= self.node2 {
            (&self.node1, &self.node2, self.endpoint1, self.endpoint2)
        } else {
            (&self.node2, &self.node1, self.endpoint2, self.endpoint1)
        }
    }
}

/// An endpoint pattern that would read as an arrow into node1.
fn points_left(endpoint1: Endpoint, endpoint2: Endpoint) -> bool {
    endpoint1 == Endpoint::Arrow
        && (endpoint2 == Endpoint::Tail || endpoint2 == Endpoint::Circle)
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        (self.node1 == other.node1
            && self.node2 == other.node2
            && self.endpoint1 == other.endpoint1
            && self.endpoint2 == other.endpoint2)
            || (self.node1 == other.node2
                && self.node2 == other.node1
                && self.endpoint1 == other.endpoint2
                && self.endpoint2 == other.endpoint1)
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        let (a, b, ea, eb) = self.normalized();
        a.hash(state);
        b.hash(state);
        ea.hash(state);
        eb.hash(state);
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge {
    /// Deterministic display order: by the name-ordered node pair, then by
    /// endpoint marks.
    fn cmp(&self, other: &Self) -> Ordering {
        let (a1, b1, ea1, eb1) = self.normalized();
        let (a2, b2, ea2, eb2) = other.normalized();
        a1.cmp(a2)
            .then_with(|| b1.cmp(b2))
            .then_with(|| ea1.cmp(&ea2))
            .then_with(|| eb1.cmp(&eb2))
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{} {}",
            self.node1,
            self.endpoint1.left_char(),
            self.endpoint2.right_char(),
            self.node2
        )
    }
}
