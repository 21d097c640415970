//! The edge-list graph store.
//!
//! Maintains a node list in insertion order, an edge set, and an adjacency
//! index from node to incident edges — kept mutually consistent under every
//! mutation. At most one edge connects any unordered node pair; a second
//! `add_edge` for an adjacent pair is an error. Triple annotations
//! (ambiguous / underline / dotted-underline) ride alongside the structure
//! and are purged on demand when they go stale.
//!
//! Mutation requires `&mut self`; shared references permit concurrent
//! reads. There is no internal locking — callers serialize writers.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

use super::edge::Edge;
use super::edges;
use super::endpoint::Endpoint;
use super::errors::GraphError;
use super::node::Node;
use super::triple::Triple;
use crate::paths::Paths;

type AdjacencyList = SmallVec<[Edge; 4]>;

/// A mutable causal graph stored as a node list plus edge set plus
/// adjacency index.
#[derive(Debug, Clone, Default)]
pub struct EdgeListGraph {
    /// Nodes in the order they were added; drives deterministic output.
    nodes: Vec<Node>,
    /// Name index for O(1) lookup.
    names: FxHashMap<Arc<str>, Node>,
    /// All edges, deduplicated by symmetric edge equality.
    edges: FxHashSet<Edge>,
    /// Node -> incident edges. Every edge appears in exactly the two lists
    /// of its nodes (once for a self-loop).
    adjacency: FxHashMap<Node, AdjacencyList>,

    ambiguous_triples: FxHashSet<Triple>,
    underline_triples: FxHashSet<Triple>,
    dotted_underline_triples: FxHashSet<Triple>,
}

impl EdgeListGraph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph with the given nodes and no edges.
    ///
    /// # Errors
    ///
    /// Fails on a duplicate node name.
    pub fn with_nodes(nodes: impl IntoIterator<Item = Node>) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for node in nodes {
            let name = node.name().to_string();
            if !graph.add_node(node) {
                return Err(GraphError::DuplicateNode(name));
            }
        }
        Ok(graph)
    }

    //======================== mutation ========================//

    /// Registers a node. Returns `false` if a node of the same identity is
    /// already present, leaving the graph unchanged.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.names.contains_key(node.name()) {
            return false;
        }
        self.names.insert(node.name_arc(), node.clone());
        self.adjacency.insert(node.clone(), SmallVec::new());
        self.nodes.push(node);
        true
    }

    /// Adds an edge.
    ///
    /// # Errors
    ///
    /// Fails if either node is absent from the graph, or if the two nodes
    /// are already adjacent (any edge kind between a pair blocks a second
    /// one).
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        for node in [edge.node1(), edge.node2()] {
            if !self.names.contains_key(node.name()) {
                return Err(GraphError::NodeNotInGraph(node.name().to_string()));
            }
        }

        if self.is_adjacent_to(edge.node1(), edge.node2()) {
            return Err(GraphError::AlreadyAdjacent(
                edge.node1().name().to_string(),
                edge.node2().name().to_string(),
            ));
        }

        let node1 = edge.node1().clone();
        let node2 = edge.node2().clone();

        if let Some(list) = self.adjacency.get_mut(&node1) {
            list.push(edge.clone());
        }
        if node1 != node2 {
            if let Some(list) = self.adjacency.get_mut(&node2) {
                list.push(edge.clone());
            }
        }
        self.edges.insert(edge);
        Ok(())
    }

    /// Adds `a --> b`.
    pub fn add_directed_edge(&mut self, a: &Node, b: &Node) -> Result<(), GraphError> {
        self.add_edge(edges::directed_edge(a, b))
    }

    /// Adds `a --- b`.
    pub fn add_undirected_edge(&mut self, a: &Node, b: &Node) -> Result<(), GraphError> {
        self.add_edge(edges::undirected_edge(a, b))
    }

    /// Adds `a <-> b`.
    pub fn add_bidirected_edge(&mut self, a: &Node, b: &Node) -> Result<(), GraphError> {
        self.add_edge(edges::bidirected_edge(a, b))
    }

    /// Adds `a o-o b`.
    pub fn add_nondirected_edge(&mut self, a: &Node, b: &Node) -> Result<(), GraphError> {
        self.add_edge(edges::nondirected_edge(a, b))
    }

    /// Adds `a o-> b`.
    pub fn add_partially_oriented_edge(&mut self, a: &Node, b: &Node) -> Result<(), GraphError> {
        self.add_edge(edges::partially_oriented_edge(a, b))
    }

    /// Removes an edge; returns whether anything was removed.
    pub fn remove_edge(&mut self, edge: &Edge) -> bool {
        if !self.edges.remove(edge) {
            return false;
        }
        for node in [edge.node1(), edge.node2()] {
            if let Some(list) = self.adjacency.get_mut(node) {
                list.retain(|e| e != edge);
            }
        }
        true
    }

    /// Removes the edge connecting `a` and `b`, if any. Stale triple
    /// annotations are purged.
    pub fn remove_edge_between(&mut self, a: &Node, b: &Node) -> bool {
        match self.edge_between(a, b).cloned() {
            Some(edge) => {
                let removed = self.remove_edge(&edge);
                self.remove_triples_not_in_graph();
                removed
            }
            None => false,
        }
    }

    /// Removes a node and every incident edge; returns whether the node was
    /// present. Stale triple annotations are purged.
    pub fn remove_node(&mut self, node: &Node) -> bool {
        if self.names.remove(node.name()).is_none() {
            return false;
        }

        let incident = self.adjacency.remove(node).unwrap_or_default();
        for edge in &incident {
            self.edges.remove(edge);
            if let Some(distal) = edge.distal_node(node) {
                if distal != node {
                    if let Some(list) = self.adjacency.get_mut(distal) {
                        list.retain(|e| e != edge);
                    }
                }
            }
        }

        self.nodes.retain(|n| n != node);
        self.remove_triples_not_in_graph();
        true
    }

    /// Removes each node in turn; returns whether anything changed.
    pub fn remove_nodes(&mut self, nodes: &[Node]) -> bool {
        let mut changed = false;
        for node in nodes {
            changed |= self.remove_node(node);
        }
        changed
    }

    /// Reorients the edge between `from` and `to`: the endpoint at `to`
    /// becomes `endpoint`, the endpoint at `from` is preserved. The
    /// replacement is atomic — at no point does the pair read as
    /// non-adjacent.
    ///
    /// # Errors
    ///
    /// Fails if the pair is not adjacent.
    pub fn set_endpoint(
        &mut self,
        from: &Node,
        to: &Node,
        endpoint: Endpoint,
    ) -> Result<(), GraphError> {
        let old = self
            .edge_between(from, to)
            .cloned()
            .ok_or_else(|| {
                GraphError::NoSuchEdge(from.name().to_string(), to.name().to_string())
            })?;

        let proximal_from = old
            .proximal_endpoint(from)
            .unwrap_or(Endpoint::Tail);
        let mut replacement = Edge::new(from.clone(), to.clone(), proximal_from, endpoint);
        replacement.share_annotations_from(&old);

        self.edges.remove(&old);
        self.edges.insert(replacement.clone());
        for node in [from, to] {
            if let Some(list) = self.adjacency.get_mut(node) {
                for slot in list.iter_mut() {
                    if *slot == old {
                        *slot = replacement.clone();
                    }
                }
            }
        }
        Ok(())
    }

    /// Clears all edges and reconnects every node pair with `# - #` edges of
    /// the given endpoint.
    pub fn fully_connect(&mut self, endpoint: Endpoint) {
        self.edges.clear();
        for list in self.adjacency.values_mut() {
            list.clear();
        }
        let nodes = self.nodes.clone();
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                let edge = Edge::new(nodes[i].clone(), nodes[j].clone(), endpoint, endpoint);
                // Both nodes are registered and the pair is fresh.
                let _ = self.add_edge(edge);
            }
        }
    }

    /// Replaces every edge's two endpoints with the given mark, keeping the
    /// skeleton.
    pub fn reorient_all_with(&mut self, endpoint: Endpoint) {
        let old_edges: Vec<Edge> = self.edges.iter().cloned().collect();
        for old in old_edges {
            self.remove_edge(&old);
            let edge = Edge::new(old.node1().clone(), old.node2().clone(), endpoint, endpoint);
            let _ = self.add_edge(edge);
        }
    }

    /// Bulk-imports all nodes, then all edges, from another graph.
    ///
    /// # Errors
    ///
    /// Fails on the first individual add that fails (duplicate node name or
    /// duplicate adjacency).
    pub fn transfer_nodes_and_edges(&mut self, other: &EdgeListGraph) -> Result<(), GraphError> {
        for node in other.nodes() {
            if !self.add_node(node.clone()) {
                return Err(GraphError::DuplicateNode(node.name().to_string()));
            }
        }
        for edge in other.edges() {
            self.add_edge(edge.clone())?;
        }
        Ok(())
    }

    //======================== queries ========================//

    /// Looks up a node by name.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.names.get(name)
    }

    /// The nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node names in insertion order.
    pub fn node_names(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.name().to_string()).collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All edges, in no particular order. Use [`edges::ordered`] for
    /// deterministic output.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn contains_node(&self, node: &Node) -> bool {
        self.names.contains_key(node.name())
    }

    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.edges.contains(edge)
    }

    /// The edges incident to `node` (empty if the node is absent).
    pub fn edges_of(&self, node: &Node) -> &[Edge] {
        self.adjacency.get(node).map(|list| &list[..]).unwrap_or(&[])
    }

    /// The unique edge between `a` and `b`, if the pair is adjacent.
    pub fn edge_between(&self, a: &Node, b: &Node) -> Option<&Edge> {
        self.edges_of(a).iter().find(|e| e.distal_node(a) == Some(b))
    }

    /// The endpoint proximal to `b` on the edge between `a` and `b`.
    pub fn endpoint(&self, a: &Node, b: &Node) -> Option<Endpoint> {
        self.edge_between(a, b).and_then(|e| e.proximal_endpoint(b))
    }

    pub fn is_adjacent_to(&self, a: &Node, b: &Node) -> bool {
        self.edge_between(a, b).is_some()
    }

    /// The distinct nodes adjacent to `node`.
    pub fn adjacent_nodes(&self, node: &Node) -> Vec<Node> {
        let mut seen = FxHashSet::default();
        let mut adjacent = Vec::new();
        for edge in self.edges_of(node) {
            if let Some(distal) = edge.distal_node(node) {
                if seen.insert(distal.clone()) {
                    adjacent.push(distal.clone());
                }
            }
        }
        adjacent
    }

    /// Nodes reached from `node` by directed edges out of it.
    pub fn children(&self, node: &Node) -> Vec<Node> {
        self.edges_of(node)
            .iter()
            .filter_map(|edge| edges::traverse_directed(node, edge))
            .collect()
    }

    /// Nodes with a directed edge into `node`.
    pub fn parents(&self, node: &Node) -> Vec<Node> {
        self.edges_of(node)
            .iter()
            .filter(|edge| {
                edge.proximal_endpoint(node) == Some(Endpoint::Arrow)
                    && edge.distal_endpoint(node) == Some(Endpoint::Tail)
            })
            .filter_map(|edge| edge.distal_node(node).cloned())
            .collect()
    }

    pub fn is_parent_of(&self, a: &Node, b: &Node) -> bool {
        self.edge_between(a, b)
            .map(|edge| edge.points_towards(b))
            .unwrap_or(false)
    }

    pub fn is_child_of(&self, a: &Node, b: &Node) -> bool {
        self.is_parent_of(b, a)
    }

    /// The number of edges incident to `node`.
    pub fn degree(&self, node: &Node) -> usize {
        self.edges_of(node).len()
    }

    /// The largest node degree in the graph.
    pub fn max_degree(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| self.degree(node))
            .max()
            .unwrap_or(0)
    }

    pub fn indegree(&self, node: &Node) -> usize {
        self.parents(node).len()
    }

    pub fn outdegree(&self, node: &Node) -> usize {
        self.children(node).len()
    }

    /// A node with no parents is exogenous.
    pub fn is_exogenous(&self, node: &Node) -> bool {
        self.indegree(node) == 0
    }

    /// Nodes adjacent to `node` whose edge has the given mark proximal to
    /// `node`.
    pub fn nodes_into(&self, node: &Node, endpoint: Endpoint) -> Vec<Node> {
        self.edges_of(node)
            .iter()
            .filter(|edge| edge.proximal_endpoint(node) == Some(endpoint))
            .filter_map(|edge| edge.distal_node(node).cloned())
            .collect()
    }

    /// Nodes adjacent to `node` whose edge has the given mark at the far
    /// end.
    pub fn nodes_out_of(&self, node: &Node, endpoint: Endpoint) -> Vec<Node> {
        self.edges_of(node)
            .iter()
            .filter(|edge| edge.distal_endpoint(node) == Some(endpoint))
            .filter_map(|edge| edge.distal_node(node).cloned())
            .collect()
    }

    /// The subgraph induced by the given nodes.
    pub fn subgraph(&self, nodes: &[Node]) -> EdgeListGraph {
        let mut sub = EdgeListGraph::new();
        for node in nodes {
            sub.add_node(node.clone());
        }
        for edge in &self.edges {
            if sub.contains_node(edge.node1()) && sub.contains_node(edge.node2()) {
                // Nodes are present and pairs are unique in the source.
                let _ = sub.add_edge(edge.clone());
            }
        }
        sub
    }

    /// A paths engine over a live view of this graph.
    pub fn paths(&self) -> Paths<'_> {
        Paths::new(self)
    }

    //================== collider classification ==================//

    /// Whether `x *-> y <-* z`: both edges carry an arrowhead into `y`.
    pub fn is_def_collider(&self, x: &Node, y: &Node, z: &Node) -> bool {
        let Some(edge1) = self.edge_between(x, y) else {
            return false;
        };
        let Some(edge2) = self.edge_between(y, z) else {
            return false;
        };
        edge1.proximal_endpoint(y) == Some(Endpoint::Arrow)
            && edge2.proximal_endpoint(y) == Some(Endpoint::Arrow)
    }

    /// Whether `y` is definitely a noncollider between `x` and `z`: one of
    /// the two edges points away from `y`, or both carry circles at `y` and
    /// `x`, `z` are non-adjacent (the covered-triple clause of Zhang 2008).
    pub fn is_def_noncollider(&self, x: &Node, y: &Node, z: &Node) -> bool {
        let mut circle_x = false;
        let mut circle_z = false;

        for edge in self.edges_of(y) {
            let toward_x = edge.distal_node(y) == Some(x);
            let toward_z = edge.distal_node(y) == Some(z);

            if toward_x && edge.points_towards(x) {
                return true;
            }
            if toward_z && edge.points_towards(z) {
                return true;
            }

            if toward_x && edge.proximal_endpoint(y) == Some(Endpoint::Circle) {
                circle_x = true;
            }
            if toward_z && edge.proximal_endpoint(y) == Some(Endpoint::Circle) {
                circle_z = true;
            }
            if circle_x && circle_z && !self.is_adjacent_to(x, z) {
                return true;
            }
        }

        false
    }

    //======================== triples ========================//

    /// Marks a triple ambiguous. No path-legality restriction applies.
    pub fn add_ambiguous_triple(&mut self, x: &Node, y: &Node, z: &Node) {
        self.ambiguous_triples
            .insert(Triple::new(x.clone(), y.clone(), z.clone()));
    }

    /// Underlines a triple. Silently ignored unless the triple lies along a
    /// path in this graph.
    pub fn add_underline_triple(&mut self, x: &Node, y: &Node, z: &Node) {
        let triple = Triple::new(x.clone(), y.clone(), z.clone());
        if triple.along_path_in(self) {
            self.underline_triples.insert(triple);
        }
    }

    /// Dotted-underlines a triple. Silently ignored unless the triple lies
    /// along a path in this graph.
    pub fn add_dotted_underline_triple(&mut self, x: &Node, y: &Node, z: &Node) {
        let triple = Triple::new(x.clone(), y.clone(), z.clone());
        if triple.along_path_in(self) {
            self.dotted_underline_triples.insert(triple);
        }
    }

    pub fn remove_ambiguous_triple(&mut self, x: &Node, y: &Node, z: &Node) {
        self.ambiguous_triples
            .remove(&Triple::new(x.clone(), y.clone(), z.clone()));
    }

    pub fn remove_underline_triple(&mut self, x: &Node, y: &Node, z: &Node) {
        self.underline_triples
            .remove(&Triple::new(x.clone(), y.clone(), z.clone()));
    }

    pub fn remove_dotted_underline_triple(&mut self, x: &Node, y: &Node, z: &Node) {
        self.dotted_underline_triples
            .remove(&Triple::new(x.clone(), y.clone(), z.clone()));
    }

    pub fn is_ambiguous_triple(&self, x: &Node, y: &Node, z: &Node) -> bool {
        self.ambiguous_triples
            .contains(&Triple::new(x.clone(), y.clone(), z.clone()))
    }

    pub fn is_underline_triple(&self, x: &Node, y: &Node, z: &Node) -> bool {
        self.underline_triples
            .contains(&Triple::new(x.clone(), y.clone(), z.clone()))
    }

    pub fn is_dotted_underline_triple(&self, x: &Node, y: &Node, z: &Node) -> bool {
        self.dotted_underline_triples
            .contains(&Triple::new(x.clone(), y.clone(), z.clone()))
    }

    pub fn ambiguous_triples(&self) -> Vec<Triple> {
        self.ambiguous_triples.iter().cloned().collect()
    }

    pub fn underline_triples(&self) -> Vec<Triple> {
        self.underline_triples.iter().cloned().collect()
    }

    pub fn dotted_underline_triples(&self) -> Vec<Triple> {
        self.dotted_underline_triples.iter().cloned().collect()
    }

    /// Replaces the ambiguous set wholesale.
    pub fn set_ambiguous_triples(&mut self, triples: impl IntoIterator<Item = Triple>) {
        self.ambiguous_triples = triples.into_iter().collect();
    }

    /// Replaces the underline set; each triple is re-checked for path
    /// legality.
    pub fn set_underline_triples(&mut self, triples: impl IntoIterator<Item = Triple>) {
        self.underline_triples.clear();
        for t in triples {
            self.add_underline_triple(t.x(), t.y(), t.z());
        }
    }

    /// Replaces the dotted-underline set; each triple is re-checked for path
    /// legality.
    pub fn set_dotted_underline_triples(&mut self, triples: impl IntoIterator<Item = Triple>) {
        self.dotted_underline_triples.clear();
        for t in triples {
            self.add_dotted_underline_triple(t.x(), t.y(), t.z());
        }
    }

    /// Drops every triple whose nodes are gone or whose required adjacency
    /// pattern no longer holds.
    pub fn remove_triples_not_in_graph(&mut self) {
        let stale = |graph: &Self, t: &Triple| {
            !graph.contains_node(t.x())
                || !graph.contains_node(t.y())
                || !graph.contains_node(t.z())
                || !graph.is_adjacent_to(t.x(), t.y())
                || !graph.is_adjacent_to(t.y(), t.z())
        };

        let ambiguous: Vec<Triple> = self
            .ambiguous_triples
            .iter()
            .filter(|t| stale(self, t))
            .cloned()
            .collect();
        let underline: Vec<Triple> = self
            .underline_triples
            .iter()
            .filter(|t| stale(self, t))
            .cloned()
            .collect();
        let dotted: Vec<Triple> = self
            .dotted_underline_triples
            .iter()
            .filter(|t| stale(self, t))
            .cloned()
            .collect();

        for t in ambiguous {
            self.ambiguous_triples.remove(&t);
        }
        for t in underline {
            self.underline_triples.remove(&t);
        }
        for t in dotted {
            self.dotted_underline_triples.remove(&t);
        }
    }
}

impl PartialEq for EdgeListGraph {
    /// Graphs are equal when their node sets and edge sets are equal;
    /// insertion order and triple annotations do not participate.
    fn eq(&self, other: &Self) -> bool {
        self.nodes.len() == other.nodes.len()
            && self.nodes.iter().all(|n| other.contains_node(n))
            && self.edges == other.edges
    }
}

impl Eq for EdgeListGraph {}

impl fmt::Display for EdgeListGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Graph nodes:")?;
        for node in &self.nodes {
            writeln!(f, "  {node}")?;
        }
        writeln!(f, "Graph edges:")?;
        for (i, edge) in edges::ordered(self.edges.iter().cloned()).iter().enumerate() {
            writeln!(f, "  {}. {edge}", i + 1)?;
        }
        Ok(())
    }
}
