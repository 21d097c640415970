//! Transformations between graph representations.
//!
//! - [`cpdag_from_dag`]: the Markov-equivalence-class representative of a
//!   DAG — undirect every non-compelled edge, then close under the Meek
//!   orientation rules.
//! - [`meek_orient`]: the reusable R1–R3 fixed-point pass over a partially
//!   directed graph. (R4 applies only under background knowledge, which is
//!   outside this crate.)
//! - [`pdag_to_dag`] / [`dag_from_cpdag`]: extend a partially directed
//!   graph to a DAG in its equivalence class, erroring when no consistent
//!   extension exists.

use tracing::debug;

use crate::graph::edges;
use crate::graph::{Dag, Edge, EdgeListGraph, Endpoint, GraphError, Node};

/// Computes the CPDAG of a DAG.
///
/// An edge x → y stays directed iff some parent of y other than x is
/// non-adjacent to x (it participates in an unshielded collider); every
/// other edge is undirected, and the Meek rules then restore every
/// orientation shared by the whole equivalence class.
pub fn cpdag_from_dag(dag: &Dag) -> EdgeListGraph {
    let mut graph = dag.graph().clone();

    // Phase 1: decide compelled edges against the unmodified graph.
    let mut to_undirect: Vec<Edge> = Vec::new();
    for edge in graph.edges() {
        let (Some(x), Some(y)) = (
            edges::directed_edge_tail(edge),
            edges::directed_edge_head(edge),
        ) else {
            continue;
        };
        let compelled = graph
            .parents(y)
            .iter()
            .any(|p| p != x && !graph.is_adjacent_to(p, x));
        if !compelled {
            to_undirect.push(edge.clone());
        }
    }

    // Phase 2: undirect them.
    for edge in to_undirect {
        let (a, b) = (edge.node1().clone(), edge.node2().clone());
        graph.remove_edge(&edge);
        // The pair was adjacent a moment ago, so re-adding cannot fail.
        let _ = graph.add_undirected_edge(&a, &b);
    }

    meek_orient(&mut graph);
    graph
}

/// Applies Meek rules R1–R3 to a fixed point, orienting undirected edges
/// whose direction is implied by the existing orientations. Returns the
/// number of edges oriented.
pub fn meek_orient(graph: &mut EdgeListGraph) -> usize {
    let mut oriented = 0;
    let mut rounds = 0;

    loop {
        rounds += 1;
        let mut changed = false;

        let undirected: Vec<Edge> = graph
            .edges()
            .filter(|e| edges::is_undirected_edge(e))
            .cloned()
            .collect();

        for edge in undirected {
            let u = edge.node1().clone();
            let v = edge.node2().clone();
            // An earlier orientation this round may have consumed it.
            match graph.edge_between(&u, &v) {
                Some(current) if edges::is_undirected_edge(current) => {}
                _ => continue,
            }

            if let Some((from, to)) = meek_implied(graph, &u, &v) {
                // set_endpoint keeps the tail at `from`, yielding from --> to.
                if graph.set_endpoint(&from, &to, Endpoint::Arrow).is_ok() {
                    oriented += 1;
                    changed = true;
                }
            }
        }

        if !changed {
            break;
        }
    }

    debug!(oriented, rounds, "meek orientation reached fixed point");
    oriented
}

/// The direction R1–R3 imply for the undirected edge u — v, if any.
fn meek_implied(graph: &EdgeListGraph, u: &Node, v: &Node) -> Option<(Node, Node)> {
    for (a, b) in [(u, v), (v, u)] {
        if meek_r1(graph, a, b) || meek_r2(graph, a, b) || meek_r3(graph, a, b) {
            return Some((a.clone(), b.clone()));
        }
    }
    None
}

/// R1: w --> a, a --- b, w not adjacent to b  =>  a --> b.
fn meek_r1(graph: &EdgeListGraph, a: &Node, b: &Node) -> bool {
    graph
        .parents(a)
        .iter()
        .any(|w| !graph.is_adjacent_to(w, b))
}

/// R2: a --> w --> b with a --- b  =>  a --> b.
fn meek_r2(graph: &EdgeListGraph, a: &Node, b: &Node) -> bool {
    graph
        .children(a)
        .iter()
        .any(|w| graph.is_parent_of(w, b))
}

/// R3: a --- w1 --> b, a --- w2 --> b, w1 and w2 non-adjacent  =>  a --> b.
fn meek_r3(graph: &EdgeListGraph, a: &Node, b: &Node) -> bool {
    let spouses: Vec<Node> = graph
        .edges_of(a)
        .iter()
        .filter(|e| edges::is_undirected_edge(e))
        .filter_map(|e| e.distal_node(a).cloned())
        .filter(|w| graph.is_parent_of(w, b))
        .collect();

    for (i, w1) in spouses.iter().enumerate() {
        for w2 in &spouses[i + 1..] {
            if !graph.is_adjacent_to(w1, w2) {
                return true;
            }
        }
    }
    false
}

/// Extends a partially directed graph to a DAG: repeatedly find a node with
/// no children whose undirected neighbors together with its parents form a
/// clique, orient its undirected edges into it, and retire it.
///
/// # Errors
///
/// [`GraphError::NoDagExtension`] when no node qualifies — the input is not
/// a consistent PDAG.
pub fn pdag_to_dag(source: &EdgeListGraph) -> Result<EdgeListGraph, GraphError> {
    let mut result = source.clone();
    let mut working = source.clone();

    // Undirected edges leave the result until an orientation is chosen.
    let undirected: Vec<Edge> = result
        .edges()
        .filter(|e| edges::is_undirected_edge(e))
        .cloned()
        .collect();
    for edge in &undirected {
        result.remove_edge(edge);
    }

    while working.node_count() > 0 {
        let mut found: Option<(Node, Vec<Node>)> = None;

        for x in working.nodes().to_vec() {
            if !working.children(&x).is_empty() {
                continue;
            }

            let neighbors: Vec<Node> = working
                .edges_of(&x)
                .iter()
                .filter(|e| edges::is_undirected_edge(e))
                .filter_map(|e| e.distal_node(&x).cloned())
                .collect();

            if !neighbors.is_empty() {
                let mut boundary = neighbors.clone();
                boundary.extend(working.parents(&x));
                if !is_clique(&working, &boundary) {
                    continue;
                }
            }

            found = Some((x, neighbors));
            break;
        }

        let Some((x, neighbors)) = found else {
            return Err(GraphError::NoDagExtension(
                "no removable sink with a clique boundary".to_string(),
            ));
        };

        for neighbor in neighbors {
            result.add_directed_edge(&neighbor, &x)?;
        }
        working.remove_node(&x);
    }

    Ok(result)
}

/// Extends a CPDAG to one DAG of its equivalence class.
pub fn dag_from_cpdag(cpdag: &EdgeListGraph) -> Result<Dag, GraphError> {
    Dag::from_graph(&pdag_to_dag(cpdag)?)
}

/// Whether every pair of the given nodes is adjacent.
fn is_clique(graph: &EdgeListGraph, nodes: &[Node]) -> bool {
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            if a != b && !graph.is_adjacent_to(a, b) {
                return false;
            }
        }
    }
    true
}
