//! # Graph Store
//!
//! The read-only graph contract consumed by the traversal pipeline, and a
//! deterministic in-memory implementation of it.
//!
//! All data structures use `BTreeMap` for deterministic ordering.

use crate::types::{EdgeId, ElementId, ElementProperties, PropertyValue, TraversalError, VertexId};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// GRAPHSTORE TRAIT
// =============================================================================

/// The read-only graph contract a traversal evaluates against.
///
/// The pipeline only ever reads: it enumerates element ids, dereferences
/// property maps, and walks adjacency. Mutating the graph while a
/// traversal is being drained is out of scope and unsupported.
///
/// Dereferencing an unknown id fails with
/// [`TraversalError::MissingElement`]; enumeration never fails.
pub trait GraphStore {
    /// All vertex ids, in deterministic order.
    fn vertex_ids(&self) -> Vec<VertexId>;

    /// All edge ids, in deterministic order.
    fn edge_ids(&self) -> Vec<EdgeId>;

    /// The property map of a vertex. Fails if the vertex is unknown.
    fn vertex_properties(&self, id: &VertexId) -> Result<ElementProperties, TraversalError>;

    /// The property map of an edge. Fails if the edge is unknown.
    fn edge_properties(&self, id: &EdgeId) -> Result<ElementProperties, TraversalError>;

    /// Vertices reachable over outgoing edges. Fails if the vertex is unknown.
    fn successors(&self, id: &VertexId) -> Result<Vec<VertexId>, TraversalError>;

    /// Vertices reaching this one over incoming edges. Fails if the
    /// vertex is unknown. Equals [`successors`](Self::successors) for
    /// undirected graphs.
    fn predecessors(&self, id: &VertexId) -> Result<Vec<VertexId>, TraversalError>;
}

/// Dereference the property map of any element against a store.
pub(crate) fn element_properties(
    store: &dyn GraphStore,
    element: &ElementId,
) -> Result<ElementProperties, TraversalError> {
    match element {
        ElementId::Vertex(v) => store.vertex_properties(v),
        ElementId::Edge(e) => store.edge_properties(e),
    }
}

// =============================================================================
// PROPERTY GRAPH IMPLEMENTATION
// =============================================================================

/// In-memory directed property graph.
///
/// Uses `BTreeMap` exclusively for deterministic ordering.
/// No `HashMap` allowed.
///
/// Mutation is construction-time only: build the graph, then hand a
/// shared reference to a [`TraversalSource`].
///
/// [`TraversalSource`]: crate::traversal::TraversalSource
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct PropertyGraph {
    /// Vertex storage: VertexId -> properties
    vertices: BTreeMap<VertexId, ElementProperties>,

    /// Edge storage: EdgeId -> properties
    edges: BTreeMap<EdgeId, ElementProperties>,

    /// Forward adjacency: source -> targets
    out_adjacency: BTreeMap<VertexId, BTreeSet<VertexId>>,

    /// Reverse adjacency: target -> sources
    in_adjacency: BTreeMap<VertexId, BTreeSet<VertexId>>,
}

impl PropertyGraph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a vertex with no properties. Idempotent: re-adding an
    /// existing vertex keeps its properties.
    pub fn add_vertex(&mut self, id: impl Into<VertexId>) -> VertexId {
        let id = id.into();
        self.vertices.entry(id.clone()).or_default();
        id
    }

    /// Insert a directed edge, creating missing endpoints. Idempotent:
    /// re-adding an existing edge keeps its properties.
    pub fn add_edge(&mut self, from: impl Into<VertexId>, to: impl Into<VertexId>) -> EdgeId {
        let from = self.add_vertex(from);
        let to = self.add_vertex(to);
        let edge = EdgeId::new(from.clone(), to.clone());
        self.edges.entry(edge.clone()).or_default();
        self.out_adjacency
            .entry(from.clone())
            .or_default()
            .insert(to.clone());
        self.in_adjacency.entry(to).or_default().insert(from);
        edge
    }

    /// Set a property on an existing vertex.
    pub fn set_vertex_property(
        &mut self,
        id: &VertexId,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Result<(), TraversalError> {
        let props = self
            .vertices
            .get_mut(id)
            .ok_or_else(|| TraversalError::MissingElement(ElementId::Vertex(id.clone())))?;
        props.insert(key.into(), value.into());
        Ok(())
    }

    /// Set a property on an existing edge.
    pub fn set_edge_property(
        &mut self,
        id: &EdgeId,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Result<(), TraversalError> {
        let props = self
            .edges
            .get_mut(id)
            .ok_or_else(|| TraversalError::MissingElement(ElementId::Edge(id.clone())))?;
        props.insert(key.into(), value.into());
        Ok(())
    }

    /// Total number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Total number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check if the graph contains a vertex.
    #[must_use]
    pub fn contains_vertex(&self, id: &VertexId) -> bool {
        self.vertices.contains_key(id)
    }

    /// Check if the graph contains an edge.
    #[must_use]
    pub fn contains_edge(&self, id: &EdgeId) -> bool {
        self.edges.contains_key(id)
    }
}

impl GraphStore for PropertyGraph {
    fn vertex_ids(&self) -> Vec<VertexId> {
        self.vertices.keys().cloned().collect()
    }

    fn edge_ids(&self) -> Vec<EdgeId> {
        self.edges.keys().cloned().collect()
    }

    fn vertex_properties(&self, id: &VertexId) -> Result<ElementProperties, TraversalError> {
        self.vertices
            .get(id)
            .cloned()
            .ok_or_else(|| TraversalError::MissingElement(ElementId::Vertex(id.clone())))
    }

    fn edge_properties(&self, id: &EdgeId) -> Result<ElementProperties, TraversalError> {
        self.edges
            .get(id)
            .cloned()
            .ok_or_else(|| TraversalError::MissingElement(ElementId::Edge(id.clone())))
    }

    fn successors(&self, id: &VertexId) -> Result<Vec<VertexId>, TraversalError> {
        if !self.vertices.contains_key(id) {
            return Err(TraversalError::MissingElement(ElementId::Vertex(
                id.clone(),
            )));
        }
        Ok(self
            .out_adjacency
            .get(id)
            .map(|targets| targets.iter().cloned().collect())
            .unwrap_or_default())
    }

    fn predecessors(&self, id: &VertexId) -> Result<Vec<VertexId>, TraversalError> {
        if !self.vertices.contains_key(id) {
            return Err(TraversalError::MissingElement(ElementId::Vertex(
                id.clone(),
            )));
        }
        Ok(self
            .in_adjacency
            .get(id)
            .map(|sources| sources.iter().cloned().collect())
            .unwrap_or_default())
    }
}

// =============================================================================
// TESTS
// =============================================================================
