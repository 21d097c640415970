use ananke_core::graph::edges;
use ananke_core::graph::{Edge, EdgeListGraph, Endpoint, GraphError, Node, Triple};

fn graph_with(names: &[&str]) -> EdgeListGraph {
    let mut g = EdgeListGraph::new();
    for name in names {
        g.add_node(Node::new(*name));
    }
    g
}

fn node(g: &EdgeListGraph, name: &str) -> Node {
    g.node(name).unwrap().clone()
}

#[test]
fn one_edge_per_pair_across_every_kind() {
    let kinds: [fn(&Node, &Node) -> Edge; 5] = [
        edges::directed_edge,
        edges::undirected_edge,
        edges::bidirected_edge,
        edges::nondirected_edge,
        edges::partially_oriented_edge,
    ];

    for first in kinds {
        for second in kinds {
            let mut g = graph_with(&["A", "B"]);
            let a = node(&g, "A");
            let b = node(&g, "B");
            g.add_edge(first(&a, &b)).unwrap();
            let err = g.add_edge(second(&a, &b)).unwrap_err();
            assert!(matches!(err, GraphError::AlreadyAdjacent(_, _)));
            // Reversed orientation is still the same pair.
            assert!(g.add_edge(second(&b, &a)).is_err());
            assert_eq!(g.edge_count(), 1);
        }
    }
}

#[test]
fn node_list_preserves_insertion_order() {
    let g = graph_with(&["C", "A", "B"]);
    assert_eq!(g.node_names(), vec!["C", "A", "B"]);
}

#[test]
fn name_lookup_reflects_membership() {
    let mut g = graph_with(&["A"]);
    assert!(g.node("A").is_some());
    assert!(g.node("B").is_none());

    let a = node(&g, "A");
    g.remove_node(&a);
    assert!(g.node("A").is_none());
}

#[test]
fn removing_node_detaches_every_neighbor() {
    let mut g = graph_with(&["HUB", "A", "B", "C"]);
    let hub = node(&g, "HUB");
    for name in ["A", "B", "C"] {
        let other = node(&g, name);
        g.add_directed_edge(&hub, &other).unwrap();
    }
    assert_eq!(g.edge_count(), 3);

    g.remove_node(&hub);
    assert_eq!(g.edge_count(), 0);
    for name in ["A", "B", "C"] {
        let other = node(&g, name);
        assert_eq!(g.degree(&other), 0);
    }
}

#[test]
fn set_endpoint_walks_an_edge_through_orientations() {
    let mut g = graph_with(&["A", "B"]);
    let a = node(&g, "A");
    let b = node(&g, "B");
    g.add_undirected_edge(&a, &b).unwrap();

    g.set_endpoint(&a, &b, Endpoint::Arrow).unwrap();
    assert!(g.is_parent_of(&a, &b));

    g.set_endpoint(&b, &a, Endpoint::Arrow).unwrap();
    let edge = g.edge_between(&a, &b).unwrap();
    assert_eq!(edge.kind(), Some(ananke_core::EdgeKind::Bidirected));

    g.set_endpoint(&a, &b, Endpoint::Circle).unwrap();
    assert_eq!(g.endpoint(&a, &b), Some(Endpoint::Circle));
    assert_eq!(g.endpoint(&b, &a), Some(Endpoint::Arrow));

    assert_eq!(g.edge_count(), 1);
}

#[test]
fn transfer_builds_equal_graph() {
    let mut source = graph_with(&["A", "B", "C"]);
    let a = node(&source, "A");
    let b = node(&source, "B");
    let c = node(&source, "C");
    source.add_directed_edge(&a, &b).unwrap();
    source.add_bidirected_edge(&b, &c).unwrap();

    let mut target = EdgeListGraph::new();
    target.transfer_nodes_and_edges(&source).unwrap();
    assert_eq!(target, source);
}

#[test]
fn triple_sets_purge_on_structure_change() {
    let mut g = graph_with(&["X", "Y", "Z", "W"]);
    let x = node(&g, "X");
    let y = node(&g, "Y");
    let z = node(&g, "Z");
    g.add_directed_edge(&x, &y).unwrap();
    g.add_directed_edge(&y, &z).unwrap();

    g.add_underline_triple(&x, &y, &z);
    g.add_dotted_underline_triple(&x, &y, &z);
    g.add_ambiguous_triple(&x, &y, &z);

    assert!(g.is_underline_triple(&x, &y, &z));
    assert!(g.is_dotted_underline_triple(&x, &y, &z));

    // Dropping Y invalidates all three.
    g.remove_node(&y);
    assert!(g.underline_triples().is_empty());
    assert!(g.dotted_underline_triples().is_empty());
    assert!(g.ambiguous_triples().is_empty());
}

#[test]
fn bulk_triple_setters_recheck_legality() {
    let mut g = graph_with(&["X", "Y", "Z"]);
    let x = node(&g, "X");
    let y = node(&g, "Y");
    let z = node(&g, "Z");
    g.add_directed_edge(&x, &y).unwrap();

    // y-z not adjacent: the underline is silently dropped, the ambiguous
    // triple kept.
    g.set_underline_triples(vec![Triple::new(x.clone(), y.clone(), z.clone())]);
    g.set_ambiguous_triples(vec![Triple::new(x.clone(), y.clone(), z.clone())]);
    assert!(g.underline_triples().is_empty());
    assert_eq!(g.ambiguous_triples().len(), 1);
}

#[test]
fn graph_equality_ignores_insertion_order() {
    let mut g1 = graph_with(&["A", "B"]);
    let mut g2 = graph_with(&["B", "A"]);
    let a1 = node(&g1, "A");
    let b1 = node(&g1, "B");
    let a2 = node(&g2, "A");
    let b2 = node(&g2, "B");
    g1.add_directed_edge(&a1, &b1).unwrap();
    g2.add_directed_edge(&a2, &b2).unwrap();
    assert_eq!(g1, g2);

    g2.remove_edge_between(&a2, &b2);
    g2.add_directed_edge(&b2, &a2).unwrap();
    assert_ne!(g1, g2);
}

#[test]
fn shared_nodes_across_graphs() {
    let x = Node::new("X");
    let y = Node::new("Y");

    let mut g1 = EdgeListGraph::new();
    let mut g2 = EdgeListGraph::new();
    for g in [&mut g1, &mut g2] {
        g.add_node(x.clone());
        g.add_node(y.clone());
    }
    g1.add_directed_edge(&x, &y).unwrap();
    g2.add_bidirected_edge(&x, &y).unwrap();

    // Shared handle, independent structure.
    assert!(g1.is_parent_of(&x, &y));
    assert!(!g2.is_parent_of(&x, &y));
}

#[test]
fn display_is_deterministic() {
    let mut g = graph_with(&["B", "A"]);
    let a = node(&g, "A");
    let b = node(&g, "B");
    g.add_directed_edge(&b, &a).unwrap();

    let rendered = g.to_string();
    assert!(rendered.contains("B --> A"));
}
