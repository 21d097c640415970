//! # Ananke Frontend
//!
//! Parser for the textual edge-spec mini-language used to write small causal
//! graphs inline: `"X,Latent(L1),L1-->X,L1-->Y"`. Produces a typed AST that
//! `ananke-core` converts into a graph.

pub mod ast;
pub mod errors;
pub mod parser;

pub use ast::{EdgeMark, GraphSpec, SpecItem};
pub use errors::FrontendError;
pub use parser::parse_spec;
