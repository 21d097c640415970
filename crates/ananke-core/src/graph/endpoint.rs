//! Edge endpoint marks.

use std::fmt;

/// The mark an edge carries at one of its two nodes.
///
/// The five marks give the edge vocabulary of every graph kind handled by
/// this crate: DAGs and CPDAGs use tails and arrows, PAGs add circles, and
/// star/null marks appear in display and placeholder contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endpoint {
    /// A plain line end: `-`.
    Tail,
    /// An arrowhead: `>` (or `<` read from the left).
    Arrow,
    /// An unknown-orientation mark: `o`.
    Circle,
    /// A wildcard mark used in display contexts: `*`.
    Star,
    /// No mark at all.
    Null,
}

impl Endpoint {
    /// The character used for this mark on the left side of a rendered edge.
    pub(crate) fn left_char(self) -> char {
        match self {
            Endpoint::Tail => '-',
            Endpoint::Arrow => '<',
            Endpoint::Circle => 'o',
            Endpoint::Star => '*',
            Endpoint::Null => '.',
        }
    }

    /// The character used for this mark on the right side of a rendered edge.
    pub(crate) fn right_char(self) -> char {
        match self {
            Endpoint::Tail => '-',
            Endpoint::Arrow => '>',
            Endpoint::Circle => 'o',
            Endpoint::Star => '*',
            Endpoint::Null => '.',
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.right_char())
    }
}
