//! Replication-aware graphs for time-lagged (SVAR-style) models.
//!
//! A [`LagGraph`] wraps the edge-list store together with a
//! [`ReplicationPolicy`]. Every edge add, edge remove, and endpoint
//! reorientation is propagated to all structurally corresponding lagged
//! copies of the mutated relationship. Mirrored mutations go through the
//! store directly — never back through the public mutators — so mirroring
//! cannot re-trigger itself; no ambient guard state is involved.
//!
//! The default policy reads lags out of node names: `base[:lag]`, with a
//! missing suffix meaning lag 0.

use tracing::trace;

use super::edge::Edge;
use super::endpoint::Endpoint;
use super::errors::GraphError;
use super::node::Node;
use super::store::EdgeListGraph;
use std::ops::Deref;

/// Splits a node name into `(base, lag)` by the `base[:lag]` convention.
///
/// Only a well-formed trailing `:<integer>` counts as a lag; any other name
/// is base with lag 0, which makes non-time-series names degenerate
/// gracefully.
pub fn parse_lag_name(name: &str) -> (&str, i64) {
    if let Some((base, suffix)) = name.rsplit_once(':') {
        if !base.is_empty() {
            if let Ok(lag) = suffix.parse::<i64>() {
                return (base, lag);
            }
        }
    }
    (name, 0)
}

/// Formats the conventional name of `base` at `lag` (lag 0 is the bare
/// base).
fn lag_name(base: &str, lag: i64) -> String {
    if lag == 0 {
        base.to_string()
    } else {
        format!("{base}:{lag}")
    }
}

/// Finds the node named `base` at `lag`, accepting both `base:0` and the
/// bare `base` spelling of lag 0.
fn node_at<'g>(graph: &'g EdgeListGraph, base: &str, lag: i64) -> Option<&'g Node> {
    if let Some(node) = graph.node(&format!("{base}:{lag}")) {
        return Some(node);
    }
    if lag == 0 {
        return graph.node(base);
    }
    None
}

/// Computes the set of edges that must change together with a seed edge.
pub trait ReplicationPolicy {
    /// Ordered `(from-copy, to-copy)` node pairs structurally corresponding
    /// to the pair `(from, to)`, including the seed pair itself when it
    /// qualifies. Pairs reference nodes that exist in `graph`.
    fn mirror_pairs(&self, graph: &EdgeListGraph, from: &Node, to: &Node) -> Vec<(Node, Node)>;

    /// The mirror edges of `seed`: every corresponding pair carrying the
    /// seed's endpoint pattern.
    fn mirrors(&self, graph: &EdgeListGraph, seed: &Edge) -> Vec<Edge> {
        self.mirror_pairs(graph, seed.node1(), seed.node2())
            .into_iter()
            .map(|(u, v)| Edge::new(u, v, seed.endpoint1(), seed.endpoint2()))
            .collect()
    }
}

/// The name-convention lag policy.
///
/// For a seed relating `base(A):la` to `base(B):lb`, the shift is
/// `lb - la`; the mirror set pairs `base(A):t` with `base(B):(t + shift)`
/// for every lag `t` at which both nodes exist. Optional min/max bounds
/// restrict the lags considered, and a seasonal `step` keeps only lag 0 and
/// multiples of the step.
#[derive(Debug, Clone)]
pub struct DefaultLagPolicy {
    min_lag: Option<i64>,
    max_lag: Option<i64>,
    step: i64,
}

impl Default for DefaultLagPolicy {
    fn default() -> Self {
        DefaultLagPolicy {
            min_lag: None,
            max_lag: None,
            step: 1,
        }
    }
}

impl DefaultLagPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts mirroring to lags within `[min, max]` (either side
    /// optional).
    pub fn with_bounds(mut self, min_lag: Option<i64>, max_lag: Option<i64>) -> Self {
        self.min_lag = min_lag;
        self.max_lag = max_lag;
        self
    }

    /// Mirrors only lag 0 and multiples of `step` (a seasonal pattern).
    /// Steps below 1 are treated as 1.
    pub fn with_step(mut self, step: i64) -> Self {
        self.step = step.max(1);
        self
    }

    fn lag_admitted(&self, lag: i64) -> bool {
        if let Some(min) = self.min_lag {
            if lag < min {
                return false;
            }
        }
        if let Some(max) = self.max_lag {
            if lag > max {
                return false;
            }
        }
        lag == 0 || lag % self.step == 0
    }
}

impl ReplicationPolicy for DefaultLagPolicy {
    fn mirror_pairs(&self, graph: &EdgeListGraph, from: &Node, to: &Node) -> Vec<(Node, Node)> {
        let (base_from, lag_from) = parse_lag_name(from.name());
        let (base_to, lag_to) = parse_lag_name(to.name());
        let shift = lag_to - lag_from;

        // Every lag at which the from-base occurs.
        let mut lags: Vec<i64> = graph
            .nodes()
            .iter()
            .filter_map(|n| {
                let (base, lag) = parse_lag_name(n.name());
                (base == base_from).then_some(lag)
            })
            .collect();
        lags.sort_unstable();
        lags.dedup();

        let mut pairs = Vec::new();
        for t in lags {
            if !self.lag_admitted(t) {
                continue;
            }
            let Some(u) = node_at(graph, base_from, t) else {
                continue;
            };
            let Some(v) = node_at(graph, base_to, t + shift) else {
                continue;
            };
            pairs.push((u.clone(), v.clone()));
        }

        if pairs.is_empty() {
            // No structurally corresponding copies: the seed stands alone.
            pairs.push((from.clone(), to.clone()));
        }
        pairs
    }
}

/// An edge-list graph whose mutations are mirrored across lagged copies by
/// a replication policy.
#[derive(Debug, Clone)]
pub struct LagGraph<P = DefaultLagPolicy> {
    graph: EdgeListGraph,
    policy: P,
}

impl LagGraph<DefaultLagPolicy> {
    /// A replicating graph with the default lag policy (no bounds,
    /// step 1).
    pub fn new() -> Self {
        Self::with_policy(DefaultLagPolicy::default())
    }
}

impl Default for LagGraph<DefaultLagPolicy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ReplicationPolicy> LagGraph<P> {
    pub fn with_policy(policy: P) -> Self {
        LagGraph {
            graph: EdgeListGraph::new(),
            policy,
        }
    }

    /// Registers a node; node registration is not mirrored.
    pub fn add_node(&mut self, node: Node) -> bool {
        self.graph.add_node(node)
    }

    /// Adds the seed edge, then every mirror the policy reports, skipping
    /// pairs that are already adjacent.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        self.graph.add_edge(edge.clone())?;

        let mirrors = self.policy.mirrors(&self.graph, &edge);
        trace!(seed = %edge, mirrors = mirrors.len(), "replicating edge add");
        for mirror in mirrors {
            if self.graph.is_adjacent_to(mirror.node1(), mirror.node2()) {
                continue;
            }
            // Mirrors whose nodes vanished between policy and insert are
            // skipped rather than failing the seed insertion.
            let _ = self.graph.add_edge(mirror);
        }
        Ok(())
    }

    /// Removes the seed edge and all of its current mirrors; returns
    /// whether the seed itself was present.
    pub fn remove_edge(&mut self, edge: &Edge) -> bool {
        let mirrors = self.policy.mirrors(&self.graph, edge);
        let removed = self.graph.remove_edge(edge);
        for mirror in mirrors {
            self.graph.remove_edge(&mirror);
        }
        removed
    }

    /// Reorients the endpoint at `to`, then the matching endpoint of every
    /// mirrored copy of the relationship.
    pub fn set_endpoint(
        &mut self,
        from: &Node,
        to: &Node,
        endpoint: Endpoint,
    ) -> Result<(), GraphError> {
        self.graph.set_endpoint(from, to, endpoint)?;

        for (u, v) in self.policy.mirror_pairs(&self.graph, from, to) {
            if u == *from && v == *to {
                continue;
            }
            if self.graph.is_adjacent_to(&u, &v) {
                // The v side corresponds to `to`.
                self.graph.set_endpoint(&u, &v, endpoint)?;
            }
        }
        Ok(())
    }

    /// Removes a node; incident edges go with it, but the removal itself is
    /// not mirrored.
    pub fn remove_node(&mut self, node: &Node) -> bool {
        self.graph.remove_node(node)
    }

    /// The wrapped store, read-only.
    pub fn graph(&self) -> &EdgeListGraph {
        &self.graph
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn into_graph(self) -> EdgeListGraph {
        self.graph
    }
}

impl<P> Deref for LagGraph<P> {
    type Target = EdgeListGraph;

    fn deref(&self) -> &Self::Target {
        &self.graph
    }
}
