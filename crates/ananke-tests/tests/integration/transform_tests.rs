use ananke_core::graph::{Dag, EdgeKind, EdgeListGraph, GraphError, Node};
use ananke_core::transform::{cpdag_from_dag, dag_from_cpdag, meek_orient, pdag_to_dag};

fn dag_of(edges: &[(&str, &str)], names: &[&str]) -> Dag {
    let mut dag = Dag::new();
    for name in names {
        dag.add_node(Node::new(*name));
    }
    for (a, b) in edges {
        let a = dag.node(a).unwrap().clone();
        let b = dag.node(b).unwrap().clone();
        dag.add_directed_edge(&a, &b).unwrap();
    }
    dag
}

fn same_skeleton(g1: &EdgeListGraph, g2: &EdgeListGraph) -> bool {
    g1.edge_count() == g2.edge_count()
        && g1.edges().all(|e| g2.is_adjacent_to(e.node1(), e.node2()))
}

#[test]
fn markov_equivalent_dags_share_a_cpdag() {
    // X --> Y --> Z and X <-- Y --> Z are Markov equivalent; the collider
    // X --> Y <-- Z is not.
    let chain = dag_of(&[("X", "Y"), ("Y", "Z")], &["X", "Y", "Z"]);
    let fork = dag_of(&[("Y", "X"), ("Y", "Z")], &["X", "Y", "Z"]);
    let collider = dag_of(&[("X", "Y"), ("Z", "Y")], &["X", "Y", "Z"]);

    let chain_cpdag = cpdag_from_dag(&chain);
    let fork_cpdag = cpdag_from_dag(&fork);
    let collider_cpdag = cpdag_from_dag(&collider);

    assert_eq!(chain_cpdag, fork_cpdag);
    assert_ne!(chain_cpdag, collider_cpdag);

    // The collider's CPDAG keeps both arrowheads.
    let x = collider_cpdag.node("X").unwrap().clone();
    let y = collider_cpdag.node("Y").unwrap().clone();
    let z = collider_cpdag.node("Z").unwrap().clone();
    assert!(collider_cpdag.is_parent_of(&x, &y));
    assert!(collider_cpdag.is_parent_of(&z, &y));
}

#[test]
fn cpdag_preserves_skeleton() {
    let dag = dag_of(
        &[("A", "B"), ("B", "D"), ("C", "D"), ("A", "D")],
        &["A", "B", "C", "D"],
    );
    let cpdag = cpdag_from_dag(&dag);
    assert!(same_skeleton(dag.graph(), &cpdag));
}

#[test]
fn extension_of_cpdag_lands_in_the_same_class() {
    let dag = dag_of(
        &[("A", "B"), ("B", "D"), ("C", "D")],
        &["A", "B", "C", "D"],
    );
    let cpdag = cpdag_from_dag(&dag);

    let extension = dag_from_cpdag(&cpdag).unwrap();
    assert!(extension.paths().is_acyclic());
    assert!(same_skeleton(dag.graph(), extension.graph()));
    assert_eq!(cpdag_from_dag(&extension), cpdag);
}

#[test]
fn meek_is_idempotent() {
    let dag = dag_of(
        &[("X", "Z"), ("Y", "Z"), ("Z", "W"), ("W", "V")],
        &["X", "Y", "Z", "W", "V"],
    );
    let mut cpdag = cpdag_from_dag(&dag);
    assert_eq!(meek_orient(&mut cpdag), 0);
}

#[test]
fn pdag_without_extension_errors() {
    // An undirected square with two opposing colliders pointed into it has
    // no consistent extension: A --- B with both A and B already sinks of
    // directed edges whose tails are non-adjacent.
    let mut g = EdgeListGraph::new();
    for name in ["A", "B", "C", "D"] {
        g.add_node(Node::new(name));
    }
    let a = g.node("A").unwrap().clone();
    let b = g.node("B").unwrap().clone();
    let c = g.node("C").unwrap().clone();
    let d = g.node("D").unwrap().clone();

    // C --> A --- B <-- D, C and D not adjacent to the opposite side:
    // orienting A --- B either way makes an unshielded collider whose
    // boundary is not a clique.
    g.add_directed_edge(&c, &a).unwrap();
    g.add_directed_edge(&d, &b).unwrap();
    g.add_undirected_edge(&a, &b).unwrap();

    assert!(matches!(
        pdag_to_dag(&g),
        Err(GraphError::NoDagExtension(_))
    ));
}

#[test]
fn fully_undirected_clique_extends() {
    let mut g = EdgeListGraph::new();
    for name in ["A", "B", "C"] {
        g.add_node(Node::new(name));
    }
    let a = g.node("A").unwrap().clone();
    let b = g.node("B").unwrap().clone();
    let c = g.node("C").unwrap().clone();
    g.add_undirected_edge(&a, &b).unwrap();
    g.add_undirected_edge(&b, &c).unwrap();
    g.add_undirected_edge(&a, &c).unwrap();

    let dag = pdag_to_dag(&g).unwrap();
    assert_eq!(dag.edge_count(), 3);
    assert!(dag.paths().is_acyclic());
    assert!(dag.edges().all(|e| e.kind() == Some(EdgeKind::Directed)));
}
