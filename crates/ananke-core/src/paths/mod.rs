//! Path and separation queries over a graph.
//!
//! A [`Paths`] value borrows its graph, so every query sees the graph as it
//! is at call time; nothing derived is cached between calls. The engine
//! covers:
//!
//! - directed, undirected, and semi-directed reachability
//! - ancestor/descendant closure and cycle detection
//! - d-connection / d-separation (collider-respecting path search)
//! - possible-d-connection, the conservative variant for partially oriented
//!   graphs
//! - inducing-path existence and PAG edge visibility (Zhang 2008)
//!
//! Reachability searches that must consider *some* path (undirected and
//! semi-directed existence) run a depth-first search over an explicit stack
//! carrying the current path; the on-path set is popped on backtrack rather
//! than kept as a global visited set, so diamond-shaped revisits from other
//! branches stay reachable while cycles cannot recurse. Closure queries
//! (directed reachability) are monotone and use an ordinary visited-set BFS.

use std::collections::VecDeque;

use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::graph::edges;
use crate::graph::{Edge, EdgeListGraph, Endpoint, GraphError, Node, NodeType};

/// Ancestor closure for every node: node -> the set of its ancestors
/// (reflexive).
pub type AncestorMap = FxHashMap<Node, FxHashSet<Node>>;

/// Stateless path queries bound to one live graph reference.
pub struct Paths<'g> {
    graph: &'g EdgeListGraph,
}

impl<'g> Paths<'g> {
    pub(crate) fn new(graph: &'g EdgeListGraph) -> Self {
        Paths { graph }
    }

    //==================== directed reachability ====================//

    /// Whether a directed path (following child edges only) leads from
    /// `from` to `to`. A path from a node to itself requires a cycle.
    pub fn exists_directed_path(&self, from: &Node, to: &Node) -> bool {
        let mut queue = VecDeque::new();
        let mut visited = FxHashSet::default();
        queue.push_back(from.clone());
        visited.insert(from.clone());

        while let Some(t) = queue.pop_front() {
            for child in self.graph.children(&t) {
                if child == *to {
                    return true;
                }
                if visited.insert(child.clone()) {
                    queue.push_back(child);
                }
            }
        }

        false
    }

    /// Whether any node reaches itself by a directed path.
    pub fn exists_directed_cycle(&self) -> bool {
        for node in self.graph.nodes() {
            if self.exists_directed_path(node, node) {
                debug!(node = node.name(), "directed cycle found");
                return true;
            }
        }
        false
    }

    pub fn is_acyclic(&self) -> bool {
        !self.exists_directed_cycle()
    }

    /// Reflexive ancestry: every node is an ancestor of itself.
    pub fn is_ancestor_of(&self, a: &Node, b: &Node) -> bool {
        a == b || self.exists_directed_path(a, b)
    }

    pub fn is_descendant_of(&self, a: &Node, b: &Node) -> bool {
        b == a || self.exists_directed_path(b, a)
    }

    /// Every node of the graph that is an ancestor of some member of
    /// `nodes`, sorted by name for deterministic output.
    pub fn ancestors_of(&self, nodes: &[Node]) -> Vec<Node> {
        let mut result: Vec<Node> = self
            .graph
            .nodes()
            .iter()
            .filter(|n| nodes.iter().any(|m| self.is_ancestor_of(n, m)))
            .cloned()
            .collect();
        result.sort();
        result
    }

    /// Every node of the graph that is a descendant of some member of
    /// `nodes`, sorted by name.
    pub fn descendants_of(&self, nodes: &[Node]) -> Vec<Node> {
        let mut result: Vec<Node> = self
            .graph
            .nodes()
            .iter()
            .filter(|n| nodes.iter().any(|m| self.is_descendant_of(n, m)))
            .cloned()
            .collect();
        result.sort();
        result
    }

    /// Precomputes the reflexive ancestor set of every node, in parallel.
    /// For repeated separation queries against a fixed graph, pair this
    /// with [`Paths::is_d_connected_to_with`].
    pub fn ancestor_map(&self) -> AncestorMap {
        self.graph
            .nodes()
            .par_iter()
            .map(|t| {
                let mut ancestors = FxHashSet::default();
                ancestors.insert(t.clone());
                let mut queue: VecDeque<Node> = self.graph.parents(t).into();
                while let Some(u) = queue.pop_front() {
                    if ancestors.insert(u.clone()) {
                        for p in self.graph.parents(&u) {
                            queue.push_back(p);
                        }
                    }
                }
                (t.clone(), ancestors)
            })
            .collect()
    }

    /// Precomputes the reflexive descendant set of every node, in parallel.
    pub fn descendant_map(&self) -> AncestorMap {
        self.graph
            .nodes()
            .par_iter()
            .map(|s| {
                let mut descendants = FxHashSet::default();
                descendants.insert(s.clone());
                let mut queue: VecDeque<Node> = self.graph.children(s).into();
                while let Some(u) = queue.pop_front() {
                    if descendants.insert(u.clone()) {
                        for c in self.graph.children(&u) {
                            queue.push_back(c);
                        }
                    }
                }
                (s.clone(), descendants)
            })
            .collect()
    }

    //============= undirected / semi-directed reachability =============//

    /// Whether any path at all connects `from` and `to`, ignoring
    /// orientation.
    pub fn exists_undirected_path(&self, from: &Node, to: &Node) -> bool {
        self.exists_path_dfs(from, to, edges::traverse)
    }

    /// Whether a semi-directed path leads from `from` to `to`: each step
    /// leaves the current node through a tail or circle mark (an arrowhead
    /// into the current node blocks the step).
    pub fn exists_semi_directed_path(&self, from: &Node, to: &Node) -> bool {
        self.exists_path_dfs(from, to, edges::traverse_semi_directed)
    }

    /// Whether `a` could be an ancestor of `b` under some orientation of
    /// the circle marks.
    pub fn possible_ancestor_of(&self, a: &Node, b: &Node) -> bool {
        self.exists_semi_directed_path(a, b)
    }

    /// Depth-first search over an explicit stack. `step` decides whether an
    /// edge can be crossed from the given node and yields the far node. The
    /// on-path set is popped on backtrack so alternative branches may
    /// revisit a node.
    fn exists_path_dfs<F>(&self, from: &Node, to: &Node, step: F) -> bool
    where
        F: Fn(&Node, &Edge) -> Option<Node>,
    {
        struct Frame {
            node: Node,
            next_edge: usize,
        }

        let mut stack = vec![Frame {
            node: from.clone(),
            next_edge: 0,
        }];
        let mut on_path = FxHashSet::default();
        on_path.insert(from.clone());

        while let Some(frame) = stack.last_mut() {
            let incident = self.graph.edges_of(&frame.node);
            if frame.next_edge >= incident.len() {
                on_path.remove(&frame.node);
                stack.pop();
                continue;
            }
            let edge = &incident[frame.next_edge];
            frame.next_edge += 1;

            let node = frame.node.clone();
            let Some(next) = step(&node, edge) else {
                continue;
            };
            if next == *to {
                return true;
            }
            if on_path.contains(&next) {
                continue;
            }
            on_path.insert(next.clone());
            stack.push(Frame {
                node: next,
                next_edge: 0,
            });
        }

        false
    }

    //======================= d-connection =======================//

    /// Whether `x` and `y` are d-connected given the conditioning set `z`:
    /// some path exists on which every collider is in `z` or has a
    /// descendant in `z`, and every noncollider is outside `z`. Symmetric
    /// in `x` and `y`.
    pub fn is_d_connected_to(&self, x: &Node, y: &Node, z: &[Node]) -> bool {
        let cond: FxHashSet<Node> = z.iter().cloned().collect();
        self.d_connected(x, y, &cond, None)
    }

    /// d-separation is the negation of d-connection.
    pub fn is_d_separated_from(&self, x: &Node, y: &Node, z: &[Node]) -> bool {
        !self.is_d_connected_to(x, y, z)
    }

    /// [`Paths::is_d_connected_to`] against a precomputed
    /// [`Paths::ancestor_map`], for repeated queries on an unchanged graph.
    pub fn is_d_connected_to_with(
        &self,
        x: &Node,
        y: &Node,
        z: &[Node],
        ancestors: &AncestorMap,
    ) -> bool {
        let cond: FxHashSet<Node> = z.iter().cloned().collect();
        self.d_connected(x, y, &cond, Some(ancestors))
    }

    /// Breadth-first expansion over (edge, origin-node) states. Each state
    /// is the crossing of one edge; a successor edge is admitted when the
    /// shared middle node passes the collider test against `z`.
    fn d_connected(
        &self,
        x: &Node,
        y: &Node,
        z: &FxHashSet<Node>,
        ancestors: Option<&AncestorMap>,
    ) -> bool {
        if x == y {
            return true;
        }

        let mut queue: VecDeque<(Edge, Node)> = VecDeque::new();
        let mut visited: FxHashSet<(Edge, Node)> = FxHashSet::default();

        for edge in self.graph.edges_of(x) {
            if edge.distal_node(x) == Some(y) {
                return true;
            }
            let state = (edge.clone(), x.clone());
            if visited.insert(state.clone()) {
                queue.push_back(state);
            }
        }

        while let Some((edge1, a)) = queue.pop_front() {
            let Some(b) = edge1.distal_node(&a).cloned() else {
                continue;
            };

            for edge2 in self.graph.edges_of(&b) {
                let Some(c) = edge2.distal_node(&b) else {
                    continue;
                };
                if *c == a {
                    continue;
                }

                if self.reachable(&edge1, edge2, &a, z, ancestors) {
                    if c == y {
                        return true;
                    }
                    let state = (edge2.clone(), b.clone());
                    if visited.insert(state.clone()) {
                        queue.push_back(state);
                    }
                }
            }
        }

        false
    }

    /// The step test of the d-connection search: may the walk continue
    /// through the middle node of `e1`, `e2`?
    ///
    /// Underlined triples are treated as noncolliders by annotation, which
    /// is how search procedures encode "this triple was oriented away".
    fn reachable(
        &self,
        e1: &Edge,
        e2: &Edge,
        a: &Node,
        z: &FxHashSet<Node>,
        ancestors: Option<&AncestorMap>,
    ) -> bool {
        let Some(b) = e1.distal_node(a) else {
            return false;
        };
        let Some(c) = e2.distal_node(b) else {
            return false;
        };

        let collider = e1.proximal_endpoint(b) == Some(Endpoint::Arrow)
            && e2.proximal_endpoint(b) == Some(Endpoint::Arrow);

        if (!collider || self.graph.is_underline_triple(a, b, c)) && !z.contains(b) {
            return true;
        }

        if !collider {
            return false;
        }

        match ancestors {
            Some(map) => z
                .iter()
                .any(|w| map.get(w).is_some_and(|anc| anc.contains(b))),
            None => self.is_ancestor_of_any(b, z),
        }
    }

    /// Whether `b` is an ancestor of some member of `z`, counting `b`
    /// itself. Runs a breadth-first walk upward from `z` through parents.
    pub fn is_ancestor_of_any(&self, b: &Node, z: &FxHashSet<Node>) -> bool {
        if z.is_empty() {
            return false;
        }
        if z.contains(b) {
            return true;
        }

        let mut queue: VecDeque<Node> = z.iter().cloned().collect();
        let mut seen: FxHashSet<Node> = z.clone();

        while let Some(t) = queue.pop_front() {
            if t == *b {
                return true;
            }
            for p in self.graph.parents(&t) {
                if seen.insert(p.clone()) {
                    queue.push_back(p);
                }
            }
        }

        false
    }

    //==================== possible-d-connection ====================//

    /// The conservative d-connection variant for partially oriented graphs:
    /// a staged breadth-first frontier over edges, expanded from both
    /// endpoints at once. A transition a–b–c is admitted iff b is a
    /// definite noncollider outside `z`, or a definite collider that is a
    /// possible ancestor of some member of `z`. Returns true when a
    /// frontier reaches the opposite endpoint or the two frontiers stage
    /// the same edge; false at the fixed point with no new edges.
    pub fn possible_d_connected_to(&self, x: &Node, y: &Node, z: &[Node]) -> bool {
        const FROM_X: u8 = 1;
        const FROM_Y: u8 = 2;

        if x == y || self.graph.is_adjacent_to(x, y) {
            return true;
        }

        let cond: FxHashSet<Node> = z.iter().cloned().collect();

        // Ordered (prev, cur) pair -> bitmask of the sides that staged it.
        let mut staged: FxHashMap<(Node, Node), u8> = FxHashMap::default();
        let mut frontier: Vec<(Node, Node, u8)> = Vec::new();

        for (start, side) in [(x, FROM_X), (y, FROM_Y)] {
            for u in self.graph.adjacent_nodes(start) {
                staged.insert((start.clone(), u.clone()), side);
                frontier.push((start.clone(), u, side));
            }
        }

        while !frontier.is_empty() {
            let mut next = Vec::new();

            for (a, b, side) in frontier.drain(..) {
                for edge in self.graph.edges_of(&b) {
                    let Some(c) = edge.distal_node(&b) else {
                        continue;
                    };
                    if *c == a {
                        continue;
                    }

                    let admissible = (self.graph.is_def_noncollider(&a, &b, c)
                        && !cond.contains(&b))
                        || (self.graph.is_def_collider(&a, &b, c)
                            && self.possible_ancestor_of_any(&b, &cond));
                    if !admissible {
                        continue;
                    }

                    let target = if side == FROM_X { y } else { x };
                    if c == target {
                        return true;
                    }

                    let key = (b.clone(), c.clone());
                    let mask = staged.get(&key).copied().unwrap_or(0);
                    if mask & side != 0 {
                        continue;
                    }
                    let opposite = (FROM_X | FROM_Y) ^ side;
                    let reverse_mask = staged
                        .get(&(c.clone(), b.clone()))
                        .copied()
                        .unwrap_or(0);
                    if mask & opposite != 0 || reverse_mask & opposite != 0 {
                        // The frontiers met on this edge.
                        return true;
                    }

                    staged.insert(key, mask | side);
                    next.push((b.clone(), c.clone(), side));
                }
            }

            frontier = next;
        }

        false
    }

    /// Whether `b` is a possible ancestor of some member of `z`, counting
    /// `b` itself.
    fn possible_ancestor_of_any(&self, b: &Node, z: &FxHashSet<Node>) -> bool {
        z.contains(b) || z.iter().any(|t| self.possible_ancestor_of(b, t))
    }

    //======================= inducing paths =======================//

    /// Whether an inducing path joins `x` and `y` relative to the given
    /// selection variables: a path on which every interior measured node is
    /// a collider, and every collider is an ancestor of `x`, `y`, or a
    /// selection variable.
    ///
    /// # Errors
    ///
    /// Both endpoints must be measured nodes.
    pub fn exists_inducing_path(
        &self,
        x: &Node,
        y: &Node,
        selection: &[Node],
    ) -> Result<bool, GraphError> {
        for node in [x, y] {
            if node.node_type() != NodeType::Measured {
                return Err(GraphError::NotMeasured(node.name().to_string()));
            }
        }

        let sel: FxHashSet<Node> = selection.iter().cloned().collect();

        // Breadth-first over (prev, cur, path) states; the path guards
        // against revisits on the same walk.
        let mut queue: VecDeque<(Node, Node, Vec<Node>)> = VecDeque::new();

        for b in self.graph.adjacent_nodes(x) {
            if b == *y {
                return Ok(true);
            }
            queue.push_back((x.clone(), b.clone(), vec![x.clone(), b]));
        }

        while let Some((a, b, path)) = queue.pop_front() {
            for c in self.graph.adjacent_nodes(&b) {
                if c == a || path.contains(&c) {
                    continue;
                }

                if b.node_type() == NodeType::Measured && !self.graph.is_def_collider(&a, &b, &c)
                {
                    continue;
                }

                if self.graph.is_def_collider(&a, &b, &c)
                    && !(self.is_ancestor_of(&b, x)
                        || self.is_ancestor_of(&b, y)
                        || self.is_ancestor_of_any(&b, &sel))
                {
                    continue;
                }

                if c == *y {
                    return Ok(true);
                }

                let mut extended = path.clone();
                extended.push(c.clone());
                queue.push_back((b.clone(), c, extended));
            }
        }

        Ok(false)
    }

    //======================= PAG visibility =======================//

    /// Whether a directed edge `a --> b` is definitely visible in a PAG
    /// (Zhang 2008): some node `c` not adjacent to `b` either has an
    /// arrowhead into `a`, or reaches `a` by a collider path whose interior
    /// vertices are all parents of `b`.
    ///
    /// # Errors
    ///
    /// The edge must be present in the graph and directed.
    pub fn def_visible(&self, edge: &Edge) -> Result<bool, GraphError> {
        if !self.graph.contains_edge(edge) {
            return Err(GraphError::NoSuchEdge(
                edge.node1().name().to_string(),
                edge.node2().name().to_string(),
            ));
        }
        let (Some(a), Some(b)) = (
            edges::directed_edge_tail(edge),
            edges::directed_edge_head(edge),
        ) else {
            return Err(GraphError::NotDirected(edge.to_string()));
        };

        let path_branch = a.node_type() == NodeType::Measured
            && b.node_type() == NodeType::Measured;

        for c in self.graph.nodes() {
            if c == a || c == b || self.graph.is_adjacent_to(c, b) {
                continue;
            }

            if self.graph.endpoint(c, a) == Some(Endpoint::Arrow) {
                return Ok(true);
            }

            if path_branch && self.exists_collider_path_into(c, a, b) {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// A collider path c = v0 … vk = a (k >= 1), arrow-headed into `a`,
    /// whose interior vertices are all parents of `b`. Depth-first over an
    /// explicit stack with a branch guard.
    fn exists_collider_path_into(&self, c: &Node, a: &Node, b: &Node) -> bool {
        struct Frame {
            prev: Option<Node>,
            cur: Node,
            adjacent: Vec<Node>,
            next: usize,
        }

        let mut on_branch = FxHashSet::default();
        on_branch.insert(c.clone());
        let mut stack = vec![Frame {
            prev: None,
            cur: c.clone(),
            adjacent: self.graph.adjacent_nodes(c),
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            if frame.next >= frame.adjacent.len() {
                on_branch.remove(&frame.cur);
                stack.pop();
                continue;
            }
            let nxt = frame.adjacent[frame.next].clone();
            frame.next += 1;

            if on_branch.contains(&nxt) {
                continue;
            }

            let prev = frame.prev.clone();
            let cur = frame.cur.clone();

            // The collider requirement applies once the path has a
            // predecessor.
            let collider_ok = match &prev {
                None => true,
                Some(p) => self.graph.is_def_collider(p, &cur, &nxt),
            };
            if !collider_ok {
                continue;
            }

            if nxt == *a {
                if self.graph.endpoint(&cur, a) == Some(Endpoint::Arrow) {
                    return true;
                }
                continue;
            }

            // Interior vertices must point to b.
            if !self.graph.is_parent_of(&nxt, b) {
                continue;
            }

            let adjacent = self.graph.adjacent_nodes(&nxt);
            on_branch.insert(nxt.clone());
            stack.push(Frame {
                prev: Some(cur),
                cur: nxt,
                adjacent,
                next: 0,
            });
        }

        false
    }
}
