use ananke_core::graph::edges;
use ananke_core::graph::{EdgeListGraph, Endpoint, GraphError, Node, NodeType};

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

/// The triangle scenario: X --> Y, Y --> Z, X --> Z.
fn triangle() -> EdgeListGraph {
    let mut g = graph_with(&["X", "Y", "Z"]);
    let x = node(&g, "X");
    let y = node(&g, "Y");
    let z = node(&g, "Z");
    g.add_directed_edge(&x, &y).unwrap();
    g.add_directed_edge(&y, &z).unwrap();
    g.add_directed_edge(&x, &z).unwrap();
    g
}

#[test]
fn triangle_has_no_cycle() {
    let g = triangle();
    assert!(!g.paths().exists_directed_cycle());
    assert!(g.paths().is_acyclic());
}

#[test]
fn triangle_ancestors_of_sink_is_everything() {
    let g = triangle();
    let z = node(&g, "Z");
    let ancestors = g.paths().ancestors_of(&[z]);
    let names: Vec<&str> = ancestors.iter().map(Node::name).collect();
    assert_eq!(names, vec!["X", "Y", "Z"]);
}

#[test]
fn triangle_direct_edge_bypasses_conditioning() {
    let g = triangle();
    let x = node(&g, "X");
    let y = node(&g, "Y");
    let z = node(&g, "Z");

    assert!(g.paths().is_d_connected_to(&x, &z, &[y.clone()]));
    assert!(g.paths().is_d_connected_to(&x, &z, &[]));
}

#[test]
fn removing_direct_edge_lets_middle_block() {
    let mut g = triangle();
    let x = node(&g, "X");
    let y = node(&g, "Y");
    let z = node(&g, "Z");

    assert!(g.remove_edge_between(&x, &z));
    assert!(!g.paths().is_d_connected_to(&x, &z, &[y.clone()]));
    assert!(g.paths().is_d_connected_to(&x, &z, &[]));
}

#[test]
fn d_connection_is_symmetric() {
    let mut g = graph_with(&["A", "B", "C", "D"]);
    let a = node(&g, "A");
    let b = node(&g, "B");
    let c = node(&g, "C");
    let d = node(&g, "D");
    g.add_directed_edge(&a, &b).unwrap();
    g.add_directed_edge(&c, &b).unwrap();
    g.add_directed_edge(&c, &d).unwrap();

    for z in [vec![], vec![b.clone()], vec![c.clone()], vec![b.clone(), c.clone()]] {
        assert_eq!(
            g.paths().is_d_connected_to(&a, &d, &z),
            g.paths().is_d_connected_to(&d, &a, &z),
        );
    }
}

#[test]
fn collider_descendant_in_conditioning_set_opens_path() {
    // A --> C <-- B, C --> S: conditioning on the collider's descendant S
    // opens A -- B.
    let mut g = graph_with(&["A", "B", "C", "S"]);
    let a = node(&g, "A");
    let b = node(&g, "B");
    let c = node(&g, "C");
    let s = node(&g, "S");
    g.add_directed_edge(&a, &c).unwrap();
    g.add_directed_edge(&b, &c).unwrap();
    g.add_directed_edge(&c, &s).unwrap();

    assert!(!g.paths().is_d_connected_to(&a, &b, &[]));
    assert!(g.paths().is_d_connected_to(&a, &b, &[s.clone()]));
    assert!(g.paths().is_d_connected_to(&a, &b, &[c.clone()]));
}

#[test]
fn precomputed_ancestor_map_agrees_with_direct_queries() {
    let mut g = graph_with(&["A", "B", "C", "D", "E"]);
    let a = node(&g, "A");
    let b = node(&g, "B");
    let c = node(&g, "C");
    let d = node(&g, "D");
    let e = node(&g, "E");
    g.add_directed_edge(&a, &c).unwrap();
    g.add_directed_edge(&b, &c).unwrap();
    g.add_directed_edge(&c, &d).unwrap();
    g.add_directed_edge(&d, &e).unwrap();

    let ancestors = g.paths().ancestor_map();
    assert!(ancestors[&e].contains(&a));
    assert!(ancestors[&a].contains(&a));
    assert!(!ancestors[&a].contains(&c));

    let nodes = [a, b, c, d, e];
    for x in &nodes {
        for y in &nodes {
            for z in &nodes {
                let with_map =
                    g.paths()
                        .is_d_connected_to_with(x, y, &[z.clone()], &ancestors);
                let direct = g.paths().is_d_connected_to(x, y, &[z.clone()]);
                assert_eq!(with_map, direct, "x={x} y={y} z={z}");
            }
        }
    }
}

#[test]
fn descendant_map_is_dual_of_ancestor_map() {
    let g = triangle();
    let ancestors = g.paths().ancestor_map();
    let descendants = g.paths().descendant_map();
    for s in g.nodes() {
        for t in g.nodes() {
            assert_eq!(
                ancestors[t].contains(s),
                descendants[s].contains(t),
                "s={s} t={t}"
            );
        }
    }
}

#[test]
fn underlined_triples_are_treated_as_noncolliders() {
    let mut g = graph_with(&["X", "Y", "Z"]);
    let x = node(&g, "X");
    let y = node(&g, "Y");
    let z = node(&g, "Z");
    g.add_directed_edge(&x, &y).unwrap();
    g.add_directed_edge(&z, &y).unwrap();

    // Without the annotation, the collider blocks unconditionally.
    assert!(!g.paths().is_d_connected_to(&x, &z, &[]));

    g.add_underline_triple(&x, &y, &z);
    assert!(g.paths().is_d_connected_to(&x, &z, &[]));
    // Conditioning on the middle node still opens it — Y remains a
    // structural collider.
    assert!(g.paths().is_d_connected_to(&x, &z, &[y.clone()]));
}

#[test]
fn possible_d_connection_on_partially_oriented_graphs() {
    // X o-> Y <-o Z: Y is a definite collider.
    let mut g = graph_with(&["X", "Y", "Z"]);
    let x = node(&g, "X");
    let y = node(&g, "Y");
    let z = node(&g, "Z");
    g.add_partially_oriented_edge(&x, &y).unwrap();
    g.add_partially_oriented_edge(&z, &y).unwrap();

    assert!(!g.paths().possible_d_connected_to(&x, &z, &[]));
    assert!(g.paths().possible_d_connected_to(&x, &z, &[y.clone()]));
}

#[test]
fn possible_d_connection_circles_block_when_conditioned() {
    // X o-o Y o-o Z, triple unshielded: Y is a definite noncollider.
    let mut g = graph_with(&["X", "Y", "Z"]);
    let x = node(&g, "X");
    let y = node(&g, "Y");
    let z = node(&g, "Z");
    g.add_nondirected_edge(&x, &y).unwrap();
    g.add_nondirected_edge(&y, &z).unwrap();

    assert!(g.paths().possible_d_connected_to(&x, &z, &[]));
    assert!(!g.paths().possible_d_connected_to(&x, &z, &[y.clone()]));
}

#[test]
fn possible_d_connection_trivial_cases() {
    let mut g = graph_with(&["X", "Y"]);
    let x = node(&g, "X");
    let y = node(&g, "Y");
    assert!(g.paths().possible_d_connected_to(&x, &x, &[]));

    g.add_nondirected_edge(&x, &y).unwrap();
    assert!(g.paths().possible_d_connected_to(&x, &y, &[]));
}

#[test]
fn semi_directed_reachability_allows_diamonds() {
    // A o-o B, A o-o C, B o-o D, C --> D: some semi-directed path A ~> D
    // exists through either branch.
    let mut g = graph_with(&["A", "B", "C", "D"]);
    let a = node(&g, "A");
    let b = node(&g, "B");
    let c = node(&g, "C");
    let d = node(&g, "D");
    g.add_nondirected_edge(&a, &b).unwrap();
    g.add_nondirected_edge(&a, &c).unwrap();
    g.add_nondirected_edge(&b, &d).unwrap();
    g.add_directed_edge(&c, &d).unwrap();

    assert!(g.paths().possible_ancestor_of(&a, &d));
    // D cannot leave through the arrowhead into itself on C --> D, but can
    // through the circle toward B.
    assert!(g.paths().possible_ancestor_of(&d, &a));

    assert!(g.paths().exists_undirected_path(&a, &d));
}

#[test]
fn inducing_path_through_latent_confounder() {
    let mut g = EdgeListGraph::new();
    let x = Node::new("X");
    let y = Node::new("Y");
    let l = Node::with_type("L", NodeType::Latent);
    for n in [&x, &y, &l] {
        g.add_node(n.clone());
    }
    g.add_directed_edge(&l, &x).unwrap();
    g.add_directed_edge(&l, &y).unwrap();

    assert!(g.paths().exists_inducing_path(&x, &y, &[]).unwrap());
}

#[test]
fn measured_chain_is_not_an_inducing_path() {
    let mut g = graph_with(&["X", "M", "Y"]);
    let x = node(&g, "X");
    let m = node(&g, "M");
    let y = node(&g, "Y");
    g.add_directed_edge(&x, &m).unwrap();
    g.add_directed_edge(&m, &y).unwrap();

    assert!(!g.paths().exists_inducing_path(&x, &y, &[]).unwrap());
}

#[test]
fn selection_variables_license_collider_interiors() {
    let mut g = graph_with(&["X", "C", "Y"]);
    let x = node(&g, "X");
    let c = node(&g, "C");
    let y = node(&g, "Y");
    g.add_directed_edge(&x, &c).unwrap();
    g.add_directed_edge(&y, &c).unwrap();

    assert!(!g.paths().exists_inducing_path(&x, &y, &[]).unwrap());
    assert!(g
        .paths()
        .exists_inducing_path(&x, &y, &[c.clone()])
        .unwrap());
}

#[test]
fn inducing_path_requires_measured_endpoints() {
    let mut g = EdgeListGraph::new();
    let l = Node::with_type("L", NodeType::Latent);
    let y = Node::new("Y");
    g.add_node(l.clone());
    g.add_node(y.clone());

    assert!(matches!(
        g.paths().exists_inducing_path(&l, &y, &[]),
        Err(GraphError::NotMeasured(_))
    ));
}

#[test]
fn visible_edge_by_arrow_into_tail() {
    // C --> A --> B with C not adjacent to B: A --> B is visible.
    let mut g = graph_with(&["A", "B", "C"]);
    let a = node(&g, "A");
    let b = node(&g, "B");
    let c = node(&g, "C");
    g.add_directed_edge(&c, &a).unwrap();
    g.add_directed_edge(&a, &b).unwrap();

    let edge = g.edge_between(&a, &b).unwrap().clone();
    assert!(g.paths().def_visible(&edge).unwrap());
}

#[test]
fn lone_directed_edge_is_invisible() {
    let mut g = graph_with(&["A", "B"]);
    let a = node(&g, "A");
    let b = node(&g, "B");
    g.add_directed_edge(&a, &b).unwrap();

    let edge = g.edge_between(&a, &b).unwrap().clone();
    assert!(!g.paths().def_visible(&edge).unwrap());
}

#[test]
fn visible_edge_by_collider_path() {
    // C <-> D <-> A --> B with D --> B: the collider path C <-> D <-> A is
    // arrow-headed into A and its interior D is a parent of B.
    let mut g = graph_with(&["A", "B", "C", "D"]);
    let a = node(&g, "A");
    let b = node(&g, "B");
    let c = node(&g, "C");
    let d = node(&g, "D");
    g.add_directed_edge(&a, &b).unwrap();
    g.add_bidirected_edge(&d, &a).unwrap();
    g.add_bidirected_edge(&c, &d).unwrap();
    g.add_directed_edge(&d, &b).unwrap();

    let edge = g.edge_between(&a, &b).unwrap().clone();
    assert!(g.paths().def_visible(&edge).unwrap());
}

#[test]
fn def_visible_rejects_bad_arguments() {
    let mut g = graph_with(&["A", "B", "C"]);
    let a = node(&g, "A");
    let b = node(&g, "B");
    let c = node(&g, "C");
    g.add_undirected_edge(&a, &b).unwrap();

    let undirected = g.edge_between(&a, &b).unwrap().clone();
    assert!(matches!(
        g.paths().def_visible(&undirected),
        Err(GraphError::NotDirected(_))
    ));

    let absent = edges::directed_edge(&a, &c);
    assert!(matches!(
        g.paths().def_visible(&absent),
        Err(GraphError::NoSuchEdge(_, _))
    ));
}

#[test]
fn endpoint_queries_round_trip_through_paths() {
    let mut g = graph_with(&["A", "B"]);
    let a = node(&g, "A");
    let b = node(&g, "B");
    g.add_partially_oriented_edge(&a, &b).unwrap();

    assert_eq!(g.endpoint(&a, &b), Some(Endpoint::Arrow));
    assert_eq!(g.endpoint(&b, &a), Some(Endpoint::Circle));
    assert_eq!(g.nodes_into(&b, Endpoint::Arrow), vec![a.clone()]);
    assert_eq!(g.nodes_out_of(&a, Endpoint::Arrow), vec![b.clone()]);
}
