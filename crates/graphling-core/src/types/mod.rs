//! # Core Type Definitions
//!
//! This module contains all core types for the Graphling traversal pipeline:
//! - Element identifiers (`VertexId`, `EdgeId`, `ElementId`)
//! - Property values and maps (`PropertyValue`, `ElementProperties`)
//! - Traversal mode (`SourceType`)
//! - Error types (`TraversalError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

// =============================================================================
// ELEMENT IDENTIFIERS
// =============================================================================

/// Unique identifier for a vertex in the graph.
///
/// Vertex ids are opaque strings: the pipeline never interprets them, it
/// only matches and dereferences them against a [`GraphStore`].
///
/// [`GraphStore`]: crate::graph::GraphStore
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub String);

impl VertexId {
    /// Create a new vertex id from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VertexId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for VertexId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier of a directed edge: the ordered (source, target) vertex pair.
///
/// Edges have no identity of their own beyond their endpoints; two calls
/// with the same pair always address the same edge.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId {
    /// Source vertex of the edge.
    pub from: VertexId,
    /// Target vertex of the edge.
    pub to: VertexId,
}

impl EdgeId {
    /// Create a new edge id from its endpoints.
    #[must_use]
    pub fn new(from: impl Into<VertexId>, to: impl Into<VertexId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// Identifier of any graph element a traversal can visit.
///
/// [`Path`] entries are `ElementId`s: vertex expansions append vertices,
/// edge expansions append edges.
///
/// [`Path`]: crate::path::Path
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ElementId {
    /// A vertex id.
    Vertex(VertexId),
    /// An edge id (ordered endpoint pair).
    Edge(EdgeId),
}

impl ElementId {
    /// The vertex id, if this element is a vertex.
    #[must_use]
    pub fn as_vertex(&self) -> Option<&VertexId> {
        match self {
            Self::Vertex(v) => Some(v),
            Self::Edge(_) => None,
        }
    }

    /// The edge id, if this element is an edge.
    #[must_use]
    pub fn as_edge(&self) -> Option<&EdgeId> {
        match self {
            Self::Edge(e) => Some(e),
            Self::Vertex(_) => None,
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex(v) => write!(f, "v[{v}]"),
            Self::Edge(e) => write!(f, "e[{e}]"),
        }
    }
}

impl From<VertexId> for ElementId {
    fn from(id: VertexId) -> Self {
        Self::Vertex(id)
    }
}

impl From<EdgeId> for ElementId {
    fn from(id: EdgeId) -> Self {
        Self::Edge(id)
    }
}

// =============================================================================
// PROPERTY VALUES
// =============================================================================

/// A value stored under a property key on a vertex or edge.
///
/// Numbers are integer-only: the pipeline is deterministic and performs
/// no floating-point arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PropertyValue {
    /// A string value.
    Str(String),
    /// An integer value.
    Int(i64),
    /// A boolean value.
    Bool(bool),
    /// An ordered list of values.
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Truthiness of a value, used by the existence form of `has`.
    ///
    /// Empty strings, zero, `false` and empty lists are falsy; everything
    /// else is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Str(s) => !s.is_empty(),
            Self::Int(i) => *i != 0,
            Self::Bool(b) => *b,
            Self::List(l) => !l.is_empty(),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// The property map carried by a vertex or edge.
///
/// `BTreeMap` keeps key iteration deterministic, which in turn keeps
/// `values()` projections and `fold()` sequences deterministic.
pub type ElementProperties = BTreeMap<String, PropertyValue>;

// =============================================================================
// SOURCE TYPE
// =============================================================================

/// The kind of element a traversal carries.
///
/// Fixed at construction of each [`Traversal`] instance and never mixed
/// within one; operators that only make sense in one mode fail with
/// [`TraversalError::NotExecutable`] in the other.
///
/// [`Traversal`]: crate::traversal::Traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SourceType {
    /// The traversal carries vertices.
    Vertex,
    /// The traversal carries edges.
    Edge,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Edge => write!(f, "edge"),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised by the traversal pipeline.
///
/// All failures are local and synchronous: mode and argument errors are
/// raised eagerly when the operator is chained, missing elements are
/// raised lazily at the first dereference during a drain. A failed
/// element aborts the entire drain; there is no retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalError {
    /// An operator was invoked against the wrong source type.
    #[error("`{operation}` is not executable on {source_type} traversals")]
    NotExecutable {
        /// The operator that was rejected.
        operation: &'static str,
        /// The mode of the traversal it was invoked on.
        source_type: SourceType,
    },

    /// An operator received an argument form it does not support.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An unknown vertex or edge id was dereferenced during evaluation.
    #[error("missing element: {0}")]
    MissingElement(ElementId),
}

// =============================================================================
// TESTS
// =============================================================================
