//! Graph nodes: shared, cheaply-clonable handles with name identity.
//!
//! A [`Node`] is an `Arc`-backed handle, so the same node can be registered
//! in any number of graphs without copying. Identity is fixed at
//! construction and defined by the name alone: two handles compare equal iff
//! their names are equal, regardless of which allocation they point at. This
//! is the one equality discipline used everywhere in the crate — there is no
//! process-wide mode switch, and hash-based collections stay consistent no
//! matter when a node was inserted.

use std::cmp::Ordering;
use std::fmt;
use std::sync::{Arc, RwLock};

use rustc_hash::FxHashMap;

/// The role a node plays in a causal model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeType {
    /// An observed variable.
    Measured,
    /// An unobserved confounder.
    Latent,
    /// An error term in a structural equation model.
    Error,
    /// A session node (editor bookkeeping).
    Session,
    /// A randomization indicator.
    Randomize,
    /// A locked node.
    Lock,
    /// No type assigned.
    NoType,
}

/// Whether a variable is a domain variable or part of an intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeVariableType {
    Domain,
    InterventionStatus,
    InterventionValue,
}

/// A value in a node's open attribute bag.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

#[derive(Debug)]
struct NodeData {
    name: Arc<str>,
    node_type: NodeType,
    variable_type: NodeVariableType,
    /// Display position, cosmetic only; layout algorithms live outside this
    /// crate.
    center: (i32, i32),
    /// Open string-keyed attribute bag. Interior-mutable so every graph
    /// sharing this node observes updates.
    attributes: RwLock<FxHashMap<String, AttrValue>>,
}

/// A node handle. Clones share the same underlying data.
#[derive(Debug, Clone)]
pub struct Node(Arc<NodeData>);

impl Node {
    /// Creates a measured domain node at the origin.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self::with_type(name, NodeType::Measured)
    }

    /// Creates a node with the given type.
    pub fn with_type(name: impl Into<Arc<str>>, node_type: NodeType) -> Self {
        Node(Arc::new(NodeData {
            name: name.into(),
            node_type,
            variable_type: NodeVariableType::Domain,
            center: (0, 0),
            attributes: RwLock::new(FxHashMap::default()),
        }))
    }

    /// Builder: sets the display position.
    pub fn at(self, x: i32, y: i32) -> Self {
        let data = &self.0;
        Node(Arc::new(NodeData {
            name: Arc::clone(&data.name),
            node_type: data.node_type,
            variable_type: data.variable_type,
            center: (x, y),
            attributes: RwLock::new(self.attributes_snapshot()),
        }))
    }

    /// Builder: sets the node-variable type.
    pub fn with_variable_type(self, variable_type: NodeVariableType) -> Self {
        let data = &self.0;
        Node(Arc::new(NodeData {
            name: Arc::clone(&data.name),
            node_type: data.node_type,
            variable_type,
            center: data.center,
            attributes: RwLock::new(self.attributes_snapshot()),
        }))
    }

    /// A new node of the same type and variable type under a different name.
    ///
    /// Used to stamp out lagged copies of a template variable.
    pub fn like(&self, name: impl Into<Arc<str>>) -> Self {
        Node(Arc::new(NodeData {
            name: name.into(),
            node_type: self.0.node_type,
            variable_type: self.0.variable_type,
            center: self.0.center,
            attributes: RwLock::new(FxHashMap::default()),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub(crate) fn name_arc(&self) -> Arc<str> {
        Arc::clone(&self.0.name)
    }

    pub fn node_type(&self) -> NodeType {
        self.0.node_type
    }

    pub fn variable_type(&self) -> NodeVariableType {
        self.0.variable_type
    }

    pub fn center(&self) -> (i32, i32) {
        self.0.center
    }

    /// Looks up an attribute by key.
    pub fn attribute(&self, key: &str) -> Option<AttrValue> {
        self.0
            .attributes
            .read()
            .ok()
            .and_then(|attrs| attrs.get(key).cloned())
    }

    /// Sets an attribute, visible through every handle to this node.
    pub fn set_attribute(&self, key: impl Into<String>, value: AttrValue) {
        if let Ok(mut attrs) = self.0.attributes.write() {
            attrs.insert(key.into(), value);
        }
    }

    /// Removes an attribute; returns the previous value if any.
    pub fn remove_attribute(&self, key: &str) -> Option<AttrValue> {
        self.0
            .attributes
            .write()
            .ok()
            .and_then(|mut attrs| attrs.remove(key))
    }

    fn attributes_snapshot(&self) -> FxHashMap<String, AttrValue> {
        self.0
            .attributes
            .read()
            .map(|attrs| attrs.clone())
            .unwrap_or_default()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.name == other.0.name
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    /// Name order, for deterministic output.
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.name.cmp(&other.0.name)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.name)
    }
}
