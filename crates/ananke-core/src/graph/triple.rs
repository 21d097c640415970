//! Ordered-center, unordered-ends node triples.
//!
//! A triple `(x, y, z)` marks the three nodes of a potential collider or
//! noncollider along a path; `(x, y, z)` and `(z, y, x)` are the same
//! triple.

use std::fmt;

use super::node::Node;
use super::store::EdgeListGraph;

#[derive(Debug, Clone)]
pub struct Triple {
    x: Node,
    y: Node,
    z: Node,
}

impl Triple {
    pub fn new(x: Node, y: Node, z: Node) -> Self {
        Triple { x, y, z }
    }

    pub fn x(&self) -> &Node {
        &self.x
    }

    pub fn y(&self) -> &Node {
        &self.y
    }

    pub fn z(&self) -> &Node {
        &self.z
    }

    /// Whether this triple lies along a path in `graph`: x adjacent to y,
    /// y adjacent to z, and x distinct from z.
    pub fn along_path_in(&self, graph: &EdgeListGraph) -> bool {
        self.x != self.z
            && graph.is_adjacent_to(&self.x, &self.y)
            && graph.is_adjacent_to(&self.y, &self.z)
    }
}

impl PartialEq for Triple {
    fn eq(&self, other: &Self) -> bool {
        self.y == other.y
            && ((self.x == other.x && self.z == other.z)
                || (self.x == other.z && self.z == other.x))
    }
}

impl Eq for Triple {}

impl std::hash::Hash for Triple {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.y.hash(state);
        let (a, b) = if self.x <= self.z {
            (&self.x, &self.z)
        } else {
            (&self.z, &self.x)
        };
        a.hash(state);
        b.hash(state);
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}, {}>", self.x, self.y, self.z)
    }
}
