//! # graphling-core
//!
//! The lazy graph-traversal engine for Graphling - THE PIPELINE.
//!
//! This crate implements a chained traversal DSL over property graphs: a
//! [`TraversalSource`] seeds vertex or edge traversals, operators
//! (filters, expansions, map steps) compose a pull-driven pipeline, and
//! terminals drain it against a [`GraphStore`].
//!
//! ## Architectural Constraints
//!
//! The PIPELINE:
//! - Is lazy: no store access happens before a terminal pulls
//! - Is single-pass: draining consumes the traversal (enforced by moves)
//! - Is deterministic: `BTreeMap` everywhere, no HashMap iteration order
//! - Has NO async, NO network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod aggregate;
pub mod graph;
pub mod path;
pub mod predicate;
pub mod statics;
pub mod traversal;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    EdgeId, ElementId, ElementProperties, PropertyValue, SourceType, TraversalError, VertexId,
};

// =============================================================================
// RE-EXPORTS: Traversal Engine
// =============================================================================

pub use aggregate::{Group, GroupCount};
pub use graph::{GraphStore, PropertyGraph};
pub use path::Path;
pub use predicate::{Has, Predicate};
pub use traversal::{Traversal, TraversalSource, TraversalValue};
