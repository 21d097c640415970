//! Typed AST for parsed edge specs.

/// The endpoint-mark written between two node names in a spec string.
///
/// Marks are read left to right, so `PartialLeft` (`<-o`) is the mirror of
/// `PartialRight` (`o->`) with the arrow at the left-hand node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeMark {
    /// `-->`
    Directed,
    /// `---`
    Undirected,
    /// `<->`
    Bidirected,
    /// `o->`
    PartialRight,
    /// `<-o`
    PartialLeft,
    /// `o-o`
    Nondirected,
}

/// One comma-separated item of a spec string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecItem {
    /// A bare node name, declaring a measured node.
    Node(String),
    /// `Latent(Name)`, declaring a latent node.
    Latent(String),
    /// An edge between two named nodes.
    Edge {
        left: String,
        right: String,
        mark: EdgeMark,
    },
}

/// A parsed spec: the items in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphSpec {
    pub items: Vec<SpecItem>,
}
