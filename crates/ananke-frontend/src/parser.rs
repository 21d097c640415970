//! Parser for the edge-spec mini-language, built on the Pest parser
//! generator.
//!
//! The language is a comma-separated list of tokens: bare node names,
//! `Latent(Name)` declarations, and edges written as `A-->B`, `A---B`,
//! `A<->B`, `Ao->B`, `A<-oB`, or `Ao-oB`. Parsing is purely syntactic; the
//! single-edge-per-pair rule is enforced by the graph store when the AST is
//! converted into a graph.
//!
//! The grammar is defined in `grammar.pest` using Pest's PEG syntax.

use crate::ast::*;
use crate::errors::FrontendError;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "../grammar.pest"]
struct SpecParser;

/// Parses a spec string into a [`GraphSpec`].
///
/// # Errors
///
/// Returns [`FrontendError::ParseError`] with location information if the
/// input is not well-formed.
pub fn parse_spec(source: &str) -> Result<GraphSpec, FrontendError> {
    let mut items = Vec::new();

    let mut pairs = SpecParser::parse(Rule::spec, source)
        .map_err(|e| FrontendError::ParseError(e.to_string()))?;

    if let Some(spec_pair) = pairs.next() {
        debug_assert_eq!(spec_pair.as_rule(), Rule::spec);
        for inner in spec_pair.into_inner() {
            if inner.as_rule() == Rule::item {
                items.push(build_item(inner)?);
            }
        }
    }

    Ok(GraphSpec { items })
}

fn build_item(pair: pest::iterators::Pair<Rule>) -> Result<SpecItem, FrontendError> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| FrontendError::ParseError("empty spec item".to_string()))?;

    match inner.as_rule() {
        Rule::latent => {
            let name = first_name(inner)?;
            Ok(SpecItem::Latent(name))
        }
        Rule::node => {
            let name = first_name(inner)?;
            Ok(SpecItem::Node(name))
        }
        Rule::edge => build_edge(inner),
        rule => Err(FrontendError::ParseError(format!(
            "unexpected rule in spec item: {rule:?}"
        ))),
    }
}

fn build_edge(pair: pest::iterators::Pair<Rule>) -> Result<SpecItem, FrontendError> {
    let mut left = String::new();
    let mut right = String::new();
    let mut mark = None;

    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::name if left.is_empty() => left = p.as_str().to_string(),
            Rule::name => right = p.as_str().to_string(),
            Rule::mark => mark = Some(build_mark(p.as_str())?),
            _ => {}
        }
    }

    let mark =
        mark.ok_or_else(|| FrontendError::ParseError("edge without a mark".to_string()))?;

    Ok(SpecItem::Edge { left, right, mark })
}

fn build_mark(text: &str) -> Result<EdgeMark, FrontendError> {
    match text {
        "-->" => Ok(EdgeMark::Directed),
        "---" => Ok(EdgeMark::Undirected),
        "<->" => Ok(EdgeMark::Bidirected),
        "o->" => Ok(EdgeMark::PartialRight),
        "<-o" => Ok(EdgeMark::PartialLeft),
        "o-o" => Ok(EdgeMark::Nondirected),
        other => Err(FrontendError::ParseError(format!(
            "unknown edge mark: {other}"
        ))),
    }
}

fn first_name(pair: pest::iterators::Pair<Rule>) -> Result<String, FrontendError> {
    pair.into_inner()
        .find(|p| p.as_rule() == Rule::name)
        .map(|p| p.as_str().to_string())
        .ok_or_else(|| FrontendError::ParseError("missing node name".to_string()))
}
