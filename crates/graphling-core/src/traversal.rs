//! # Traversal Engine
//!
//! The lazy, single-pass traversal pipeline: a [`TraversalSource`] seeds a
//! [`Traversal`], chained operators transform it, and a terminal
//! (iteration, [`count`](Traversal::count), or an aggregator) drains it
//! against the [`GraphStore`].
//!
//! ## Evaluation model
//!
//! Pull-driven and synchronous: each operator wraps the upstream iterator
//! in a filter/map/flat-map stage, and nothing touches the store until a
//! terminal pulls. Early exit from the pull stops all upstream work.
//!
//! Operators consume `self` and return a fresh `Traversal`; draining
//! moves the value, so a drained traversal cannot be replayed — the
//! single-pass contract is enforced by the compiler rather than by a
//! runtime flag.

use crate::graph::{GraphStore, element_properties};
use crate::path::Path;
use crate::predicate::{Has, Predicate, matches_labels};
use crate::types::{
    EdgeId, ElementId, ElementProperties, PropertyValue, SourceType, TraversalError, VertexId,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// TRAVERSAL SOURCE
// =============================================================================

/// Entry point producing seeded traversals over one graph.
///
/// A pure factory: holds only a shared read-only store reference, and
/// every call mints an independent traversal.
#[derive(Clone, Copy)]
pub struct TraversalSource<'g> {
    store: &'g dyn GraphStore,
}

impl<'g> TraversalSource<'g> {
    /// Create a traversal source over a graph store.
    #[must_use]
    pub fn new(store: &'g dyn GraphStore) -> Self {
        Self { store }
    }

    /// Seed a vertex traversal from explicit ids, or from the full
    /// vertex set when no ids are given. Each seed becomes a singleton
    /// path.
    #[must_use]
    pub fn v<I>(&self, ids: I) -> Traversal<'g>
    where
        I: IntoIterator<Item = VertexId>,
    {
        let mut seeds: Vec<ElementId> = ids.into_iter().map(ElementId::Vertex).collect();
        if seeds.is_empty() {
            seeds = self
                .store
                .vertex_ids()
                .into_iter()
                .map(ElementId::Vertex)
                .collect();
        }
        Traversal::seeded(self.store, seeds, SourceType::Vertex)
    }

    /// Seed an edge traversal from explicit edge pairs, or from the full
    /// edge set when none are given.
    #[must_use]
    pub fn e<I>(&self, ids: I) -> Traversal<'g>
    where
        I: IntoIterator<Item = EdgeId>,
    {
        let mut seeds: Vec<ElementId> = ids.into_iter().map(ElementId::Edge).collect();
        if seeds.is_empty() {
            seeds = self
                .store
                .edge_ids()
                .into_iter()
                .map(ElementId::Edge)
                .collect();
        }
        Traversal::seeded(self.store, seeds, SourceType::Edge)
    }
}

// =============================================================================
// PIPELINE ELEMENTS
// =============================================================================

/// What one pipeline element currently surfaces, next to its path.
///
/// Filters and expansions always work on the path's last entry; the
/// payload only changes through map steps (`values`, `fold`) and is what
/// a terminal yields when path mode is off.
#[derive(Debug, Clone)]
enum Payload {
    /// The element id itself (the default).
    Element(ElementId),
    /// A property map produced by `values`.
    Map(ElementProperties),
    /// An id paired with its full property map, produced by `data`.
    Data(ElementId, ElementProperties),
    /// A single value produced by `fold` on a one-entry map.
    Value(PropertyValue),
    /// An ordered value sequence produced by `fold` on a larger map.
    Seq(Vec<PropertyValue>),
}

/// One traversal branch in flight: its full path plus current payload.
#[derive(Debug, Clone)]
struct Traverser {
    path: Path,
    payload: Payload,
}

impl Traverser {
    fn seed(id: ElementId) -> Self {
        Self {
            payload: Payload::Element(id.clone()),
            path: Path::seed(id),
        }
    }

    /// The current element: the last path entry.
    fn current(&self) -> &ElementId {
        self.path.last()
    }

    /// Hop to a new element, extending the path copy-on-write.
    fn advance(&self, id: ElementId) -> Self {
        Self {
            path: self.path.push(id.clone()),
            payload: Payload::Element(id),
        }
    }

    fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    fn into_value(self, path_mode: bool) -> TraversalValue {
        if path_mode {
            return TraversalValue::Path(self.path);
        }
        match self.payload {
            Payload::Element(id) => TraversalValue::Id(id),
            Payload::Map(map) => TraversalValue::Map(map),
            Payload::Data(id, map) => TraversalValue::Data(id, map),
            Payload::Value(value) => TraversalValue::Value(value),
            Payload::Seq(seq) => TraversalValue::Seq(seq),
        }
    }
}

/// A value surfaced by draining a traversal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TraversalValue {
    /// An element id (the default surface form).
    Id(ElementId),
    /// The full hop history, surfaced when path mode is on.
    Path(Path),
    /// A property map projected by `values`.
    Map(ElementProperties),
    /// An element id paired with its property map, projected by `data`.
    Data(ElementId, ElementProperties),
    /// A single property value unwrapped by `fold`.
    Value(PropertyValue),
    /// An ordered property-value sequence unwrapped by `fold`.
    Seq(Vec<PropertyValue>),
}

impl TraversalValue {
    /// The element id, if this value surfaces one.
    #[must_use]
    pub fn as_id(&self) -> Option<&ElementId> {
        match self {
            Self::Id(id) => Some(id),
            _ => None,
        }
    }

    /// The path, if this value surfaces one.
    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::Path(path) => Some(path),
            _ => None,
        }
    }

    /// The property map, if this value surfaces one.
    #[must_use]
    pub fn as_map(&self) -> Option<&ElementProperties> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// The id and property map, if this value surfaces the pair.
    #[must_use]
    pub fn as_data(&self) -> Option<(&ElementId, &ElementProperties)> {
        match self {
            Self::Data(id, map) => Some((id, map)),
            _ => None,
        }
    }
}

// =============================================================================
// EXPANSION PLUMBING
// =============================================================================

/// Which adjacency an expansion walks.
#[derive(Debug, Clone, Copy)]
enum Direction {
    Out,
    In,
}

/// What an expansion appends to the path.
#[derive(Debug, Clone, Copy)]
enum Emit {
    Vertex,
    Edge,
}

/// Neighbors of `vertex` whose connecting edge satisfies every label,
/// mapped to the element the expansion emits.
fn expansion_targets(
    store: &dyn GraphStore,
    vertex: &VertexId,
    direction: Direction,
    emit: Emit,
    labels: &[String],
) -> Result<Vec<ElementId>, TraversalError> {
    let neighbors = match direction {
        Direction::Out => store.successors(vertex)?,
        Direction::In => store.predecessors(vertex)?,
    };

    let mut targets = Vec::new();
    for neighbor in neighbors {
        let edge = match direction {
            Direction::Out => EdgeId::new(vertex.clone(), neighbor.clone()),
            Direction::In => EdgeId::new(neighbor.clone(), vertex.clone()),
        };
        if !labels.is_empty() {
            let props = store.edge_properties(&edge)?;
            if !matches_labels(&props, labels) {
                continue;
            }
        }
        targets.push(match emit {
            Emit::Vertex => ElementId::Vertex(neighbor),
            Emit::Edge => ElementId::Edge(edge),
        });
    }
    Ok(targets)
}

fn owned_labels(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| (*label).to_string()).collect()
}

// =============================================================================
// TRAVERSAL
// =============================================================================

type Stage<'g> = Box<dyn Iterator<Item = Result<Traverser, TraversalError>> + 'g>;

/// A lazy sequence of traversal branches over one graph, in one mode.
///
/// Every operator consumes the traversal and returns a new one wrapping a
/// transformed stage. Mode errors (`NotExecutable`, `InvalidArgument`)
/// are raised eagerly by the operator call; unresolved ids surface as
/// `MissingElement` items during the drain and abort it.
pub struct Traversal<'g> {
    store: &'g dyn GraphStore,
    source_type: SourceType,
    path_mode: bool,
    stage: Stage<'g>,
}

impl<'g> Traversal<'g> {
    fn seeded(store: &'g dyn GraphStore, seeds: Vec<ElementId>, source_type: SourceType) -> Self {
        Self {
            store,
            source_type,
            path_mode: false,
            stage: Box::new(seeds.into_iter().map(|id| Ok(Traverser::seed(id)))),
        }
    }

    /// The kind of element this traversal carries.
    #[must_use]
    pub fn source_type(&self) -> SourceType {
        self.source_type
    }

    /// Whether terminals surface full paths instead of payloads.
    #[must_use]
    pub fn path_mode(&self) -> bool {
        self.path_mode
    }

    pub(crate) fn store(&self) -> &'g dyn GraphStore {
        self.store
    }

    // -------------------------------------------------------------------------
    // Stage combinators
    // -------------------------------------------------------------------------

    /// Filter stage: keep branches for which `keep` is true; errors pass
    /// through and poison the drain.
    fn retain<F>(self, keep: F) -> Self
    where
        F: Fn(&'g dyn GraphStore, &Traverser) -> Result<bool, TraversalError> + 'g,
    {
        let Self {
            store,
            source_type,
            path_mode,
            stage,
        } = self;
        let stage: Stage<'g> = Box::new(stage.filter_map(move |item| match item {
            Ok(t) => match keep(store, &t) {
                Ok(true) => Some(Ok(t)),
                Ok(false) => None,
                Err(e) => Some(Err(e)),
            },
            Err(e) => Some(Err(e)),
        }));
        Self {
            store,
            source_type,
            path_mode,
            stage,
        }
    }

    /// Map stage: transform each branch; errors pass through.
    fn map_branches<F>(self, transform: F) -> Self
    where
        F: Fn(&'g dyn GraphStore, Traverser) -> Result<Traverser, TraversalError> + 'g,
    {
        let Self {
            store,
            source_type,
            path_mode,
            stage,
        } = self;
        let stage: Stage<'g> = Box::new(stage.map(move |item| transform(store, item?)));
        Self {
            store,
            source_type,
            path_mode,
            stage,
        }
    }

    /// Flat-map expansion stage over vertex adjacency.
    fn expand(
        self,
        operation: &'static str,
        direction: Direction,
        emit: Emit,
        labels: Vec<String>,
    ) -> Result<Self, TraversalError> {
        if self.source_type == SourceType::Edge {
            return Err(TraversalError::NotExecutable {
                operation,
                source_type: self.source_type,
            });
        }

        let Self {
            store,
            path_mode,
            stage,
            ..
        } = self;
        let stage: Stage<'g> = Box::new(stage.flat_map(move |item| -> Stage<'g> {
            let t = match item {
                Ok(t) => t,
                Err(e) => return Box::new(std::iter::once(Err(e))),
            };
            let vertex = match t.current() {
                ElementId::Vertex(v) => v.clone(),
                // Vertex traversals only carry vertex ids at the tip.
                ElementId::Edge(_) => return Box::new(std::iter::empty()),
            };
            match expansion_targets(store, &vertex, direction, emit, &labels) {
                Ok(targets) => Box::new(targets.into_iter().map(move |next| Ok(t.advance(next)))),
                Err(e) => Box::new(std::iter::once(Err(e))),
            }
        }));

        Ok(Self {
            store,
            source_type: match emit {
                Emit::Vertex => SourceType::Vertex,
                Emit::Edge => SourceType::Edge,
            },
            path_mode,
            stage,
        })
    }

    // -------------------------------------------------------------------------
    // Filter operators
    // -------------------------------------------------------------------------

    /// Keep branches whose current element carries every given label.
    ///
    /// Vertex traversals only; fails eagerly with `NotExecutable` on an
    /// edge traversal.
    pub fn has_label(self, labels: &[&str]) -> Result<Self, TraversalError> {
        if self.source_type == SourceType::Edge {
            return Err(TraversalError::NotExecutable {
                operation: "has_label",
                source_type: self.source_type,
            });
        }
        let labels = owned_labels(labels);
        Ok(self.retain(move |store, t| {
            let props = element_properties(store, t.current())?;
            Ok(matches_labels(&props, &labels))
        }))
    }

    /// Keep branches whose current element satisfies the condition.
    ///
    /// The labeled form fails eagerly with `InvalidArgument` on an edge
    /// traversal. A missing property is simply false.
    pub fn has(self, condition: Has) -> Result<Self, TraversalError> {
        condition.check_mode(self.source_type)?;
        Ok(self.retain(move |store, t| condition.evaluate(store, t.current())))
    }

    /// Keep branches whose current element does NOT satisfy the
    /// condition: the exact complement of [`has`](Self::has) over the
    /// same input.
    pub fn has_not(self, condition: Has) -> Result<Self, TraversalError> {
        condition.check_mode(self.source_type)?;
        Ok(self.retain(move |store, t| Ok(!condition.evaluate(store, t.current())?)))
    }

    /// Keep branches for which the deferred predicate is false.
    ///
    /// The predicate is evaluated lazily with the traversal's store and
    /// mode as context; a mode mismatch inside it surfaces during the
    /// drain.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self, predicate: Predicate) -> Self {
        let source_type = self.source_type;
        self.retain(move |store, t| Ok(!predicate.evaluate(store, source_type, t.current())?))
    }

    // -------------------------------------------------------------------------
    // Expansion operators
    // -------------------------------------------------------------------------

    /// Expand each branch to the successor vertices whose connecting
    /// edge carries every given label (no labels: all successors).
    /// Vertex traversals only; the result is a vertex traversal.
    pub fn out(self, labels: &[&str]) -> Result<Self, TraversalError> {
        self.expand("out", Direction::Out, Emit::Vertex, owned_labels(labels))
    }

    /// Like [`out`](Self::out), but append the connecting edges instead
    /// of the successor vertices. The result is an edge traversal.
    pub fn out_e(self, labels: &[&str]) -> Result<Self, TraversalError> {
        self.expand("out_e", Direction::Out, Emit::Edge, owned_labels(labels))
    }

    /// Mirror of [`out`](Self::out) over predecessor adjacency.
    pub fn in_(self, labels: &[&str]) -> Result<Self, TraversalError> {
        self.expand("in_", Direction::In, Emit::Vertex, owned_labels(labels))
    }

    /// Mirror of [`out_e`](Self::out_e) over predecessor adjacency.
    pub fn in_e(self, labels: &[&str]) -> Result<Self, TraversalError> {
        self.expand("in_e", Direction::In, Emit::Edge, owned_labels(labels))
    }

    // -------------------------------------------------------------------------
    // Map operators
    // -------------------------------------------------------------------------

    /// Replace each branch's payload with its current element's property
    /// map: the full map with no keys given, otherwise the submap of the
    /// requested keys (absent keys are omitted, never an error).
    #[must_use]
    pub fn values(self, keys: &[&str]) -> Self {
        let keys = owned_labels(keys);
        self.map_branches(move |store, t| {
            let all = element_properties(store, t.current())?;
            let map = if keys.is_empty() {
                all
            } else {
                all.into_iter().filter(|(k, _)| keys.contains(k)).collect()
            };
            Ok(t.with_payload(Payload::Map(map)))
        })
    }

    /// Replace each branch's payload with its current element's id
    /// paired with the full property map, so consumers keep the identity
    /// [`values`](Self::values) drops.
    #[must_use]
    pub fn data(self) -> Self {
        self.map_branches(|store, t| {
            let id = t.current().clone();
            let props = element_properties(store, &id)?;
            Ok(t.with_payload(Payload::Data(id, props)))
        })
    }

    /// Unwrap map payloads: a single-entry map becomes its value, a
    /// larger map its ordered value sequence; other payloads pass
    /// through unchanged.
    #[must_use]
    pub fn fold(self) -> Self {
        self.map_branches(|_, t| {
            let payload = match t.payload.clone() {
                Payload::Map(map) => {
                    let mut values: Vec<PropertyValue> = map.into_values().collect();
                    match values.pop() {
                        Some(last) if values.is_empty() => Payload::Value(last),
                        Some(last) => {
                            values.push(last);
                            Payload::Seq(values)
                        }
                        None => Payload::Seq(values),
                    }
                }
                other => other,
            };
            Ok(t.with_payload(payload))
        })
    }

    /// Switch path mode on (monotonic): terminals surface each branch's
    /// full path instead of its payload. Filtering and mapping are
    /// unaffected.
    #[must_use]
    pub fn path(mut self) -> Self {
        self.path_mode = true;
        self
    }

    // -------------------------------------------------------------------------
    // Terminals
    // -------------------------------------------------------------------------

    /// Drain the traversal and count its elements (duplicates counted).
    /// Fail-fast: the first lazy error aborts the drain.
    pub fn count(self) -> Result<usize, TraversalError> {
        let mut n = 0usize;
        for item in self.stage {
            item?;
            n = n.saturating_add(1);
        }
        Ok(n)
    }

    /// Drain the traversal into a vector of surfaced values.
    pub fn to_list(self) -> Result<Vec<TraversalValue>, TraversalError> {
        self.collect()
    }

    /// Drain into both the raw current elements and the surfaced values,
    /// for the aggregators.
    pub(crate) fn drain(self) -> Result<(Vec<ElementId>, Vec<TraversalValue>), TraversalError> {
        let path_mode = self.path_mode;
        let mut elements = Vec::new();
        let mut values = Vec::new();
        for item in self.stage {
            let t = item?;
            elements.push(t.current().clone());
            values.push(t.into_value(path_mode));
        }
        Ok((elements, values))
    }
}

impl Iterator for Traversal<'_> {
    type Item = Result<TraversalValue, TraversalError>;

    fn next(&mut self) -> Option<Self::Item> {
        let path_mode = self.path_mode;
        self.stage
            .next()
            .map(|item| item.map(|t| t.into_value(path_mode)))
    }
}

impl std::fmt::Debug for Traversal<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Traversal")
            .field("source_type", &self.source_type)
            .field("path_mode", &self.path_mode)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PropertyGraph;
    use crate::statics;

    /// The fixture from the air-routes shape: vertices 1..3, vertices 1
    /// and 2 are airports, edge 1->2 is a route, edge 1->3 a road.
    fn fixture() -> PropertyGraph {
        let mut graph = PropertyGraph::new();
        let v1 = graph.add_vertex("1");
        let v2 = graph.add_vertex("2");
        graph.add_vertex("3");
        graph
            .set_vertex_property(&v1, "labelV", "airport")
            .expect("set property");
        graph
            .set_vertex_property(&v1, "code", "AUS")
            .expect("set property");
        graph
            .set_vertex_property(&v2, "labelV", "airport")
            .expect("set property");
        graph
            .set_vertex_property(&v2, "code", "DFW")
            .expect("set property");

        let route = graph.add_edge("1", "2");
        graph
            .set_edge_property(&route, "labelE", "route")
            .expect("set property");
        let road = graph.add_edge("1", "3");
        graph
            .set_edge_property(&road, "labelE", "road")
            .expect("set property");
        graph
    }

    fn ids(values: Vec<TraversalValue>) -> Vec<String> {
        values
            .into_iter()
            .filter_map(|v| match v {
                TraversalValue::Id(ElementId::Vertex(id)) => Some(id.0),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn v_seeds_all_vertices() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        assert_eq!(g.v([]).count().expect("count"), 3);
    }

    #[test]
    fn e_seeds_all_edges() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        assert_eq!(g.e([]).count().expect("count"), 2);
    }

    #[test]
    fn v_with_explicit_ids() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let list = g.v([VertexId::new("2")]).to_list().expect("drain");
        assert_eq!(ids(list), vec!["2"]);
    }

    #[test]
    fn has_label_filters_vertices() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let airports = g
            .v([])
            .has_label(&["airport"])
            .expect("has_label")
            .to_list()
            .expect("drain");
        assert_eq!(ids(airports), vec!["1", "2"]);
    }

    #[test]
    fn has_label_is_idempotent() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let once = g
            .v([])
            .has_label(&["airport"])
            .expect("has_label")
            .to_list()
            .expect("drain");
        let twice = g
            .v([])
            .has_label(&["airport"])
            .expect("has_label")
            .has_label(&["airport"])
            .expect("has_label")
            .to_list()
            .expect("drain");
        assert_eq!(once, twice);
    }

    #[test]
    fn has_label_is_not_executable_on_edges() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let err = g.e([]).has_label(&["route"]).expect_err("must fail");
        assert_eq!(
            err,
            TraversalError::NotExecutable {
                operation: "has_label",
                source_type: SourceType::Edge,
            }
        );
    }

    #[test]
    fn has_filters_on_property_equality() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let austin = g
            .v([])
            .has(Has::equals("code", "AUS"))
            .expect("has")
            .to_list()
            .expect("drain");
        assert_eq!(ids(austin), vec!["1"]);
    }

    #[test]
    fn has_works_on_edges() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let routes = g
            .e([])
            .has(Has::equals("labelE", "route"))
            .expect("has")
            .count()
            .expect("count");
        assert_eq!(routes, 1);
    }

    #[test]
    fn labeled_has_rejected_on_edges() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let err = g
            .e([])
            .has(Has::labeled("route", "dist", 1_i64))
            .expect_err("must fail");
        assert!(matches!(err, TraversalError::InvalidArgument(_)));
    }

    #[test]
    fn has_not_is_the_complement() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let with = g
            .v([])
            .has(Has::exists("code"))
            .expect("has")
            .count()
            .expect("count");
        let without = g
            .v([])
            .has_not(Has::exists("code"))
            .expect("has_not")
            .count()
            .expect("count");
        assert_eq!(with, 2);
        assert_eq!(without, 1);
    }

    #[test]
    fn not_negates_a_deferred_predicate() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let non_airports = g
            .v([])
            .not(statics::has_label(&["airport"]))
            .to_list()
            .expect("drain");
        assert_eq!(ids(non_airports), vec!["3"]);
    }

    #[test]
    fn out_follows_labelled_edges() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let dest = g
            .v([VertexId::new("1")])
            .out(&["route"])
            .expect("out")
            .to_list()
            .expect("drain");
        assert_eq!(ids(dest), vec!["2"]);
    }

    #[test]
    fn out_without_labels_follows_everything() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let dest = g
            .v([VertexId::new("1")])
            .out(&[])
            .expect("out")
            .to_list()
            .expect("drain");
        assert_eq!(ids(dest), vec!["2", "3"]);
    }

    #[test]
    fn out_e_emits_edge_ids_and_switches_mode() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let t = g.v([VertexId::new("1")]).out_e(&["route"]).expect("out_e");
        assert_eq!(t.source_type(), SourceType::Edge);

        let list = t.to_list().expect("drain");
        assert_eq!(
            list,
            vec![TraversalValue::Id(ElementId::Edge(EdgeId::new("1", "2")))]
        );
    }

    #[test]
    fn in_mirrors_out() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let origins = g
            .v([VertexId::new("2")])
            .in_(&["route"])
            .expect("in_")
            .to_list()
            .expect("drain");
        assert_eq!(ids(origins), vec!["1"]);
    }

    #[test]
    fn in_e_emits_incoming_edges() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let list = g
            .v([VertexId::new("3")])
            .in_e(&[])
            .expect("in_e")
            .to_list()
            .expect("drain");
        assert_eq!(
            list,
            vec![TraversalValue::Id(ElementId::Edge(EdgeId::new("1", "3")))]
        );
    }

    #[test]
    fn expansion_on_edge_traversal_fails_eagerly() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let err = g.e([]).out(&[]).expect_err("must fail");
        assert!(matches!(err, TraversalError::NotExecutable { .. }));
    }

    #[test]
    fn values_projects_requested_keys() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let list = g
            .v([VertexId::new("1")])
            .out(&["route"])
            .expect("out")
            .values(&["labelV"])
            .to_list()
            .expect("drain");

        let mut expected = ElementProperties::new();
        expected.insert("labelV".to_string(), PropertyValue::from("airport"));
        assert_eq!(list, vec![TraversalValue::Map(expected)]);
    }

    #[test]
    fn values_omits_absent_keys() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let list = g
            .v([VertexId::new("3")])
            .values(&["code"])
            .to_list()
            .expect("drain");
        assert_eq!(list, vec![TraversalValue::Map(ElementProperties::new())]);
    }

    #[test]
    fn values_with_no_keys_is_the_full_map() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let list = g
            .v([VertexId::new("1")])
            .values(&[])
            .to_list()
            .expect("drain");
        let map = list[0].as_map().expect("map payload");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("code"), Some(&PropertyValue::from("AUS")));
    }

    #[test]
    fn data_pairs_id_with_full_property_map() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let list = g
            .v([VertexId::new("1")])
            .out(&["route"])
            .expect("out")
            .data()
            .to_list()
            .expect("drain");

        let (id, map) = list[0].as_data().expect("data payload");
        assert_eq!(id, &ElementId::Vertex(VertexId::new("2")));
        assert_eq!(map.get("code"), Some(&PropertyValue::from("DFW")));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn fold_unwraps_single_entry_maps() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let list = g
            .v([VertexId::new("1")])
            .values(&["code"])
            .fold()
            .to_list()
            .expect("drain");
        assert_eq!(list, vec![TraversalValue::Value(PropertyValue::from("AUS"))]);
    }

    #[test]
    fn fold_sequences_larger_maps() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let list = g
            .v([VertexId::new("1")])
            .values(&[])
            .fold()
            .to_list()
            .expect("drain");
        // BTreeMap order: code before labelV
        assert_eq!(
            list,
            vec![TraversalValue::Seq(vec![
                PropertyValue::from("AUS"),
                PropertyValue::from("airport"),
            ])]
        );
    }

    #[test]
    fn fold_passes_non_map_payloads_through() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let list = g.v([VertexId::new("3")]).fold().to_list().expect("drain");
        assert_eq!(
            list,
            vec![TraversalValue::Id(ElementId::Vertex(VertexId::new("3")))]
        );
    }

    #[test]
    fn path_surfaces_the_full_hop_history() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let list = g
            .v([VertexId::new("1")])
            .out(&["route"])
            .expect("out")
            .path()
            .to_list()
            .expect("drain");

        let path = list[0].as_path().expect("path value");
        assert_eq!(path.first(), &ElementId::Vertex(VertexId::new("1")));
        assert_eq!(path.last(), &ElementId::Vertex(VertexId::new("2")));
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn missing_seed_fails_lazily_at_first_dereference() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);

        // Chaining succeeds: the unknown id has not been dereferenced yet
        let t = g
            .v([VertexId::new("404")])
            .has_label(&["airport"])
            .expect("chain");

        // Draining dereferences and fails
        let err = t.count().expect_err("must fail");
        assert_eq!(
            err,
            TraversalError::MissingElement(ElementId::Vertex(VertexId::new("404")))
        );
    }

    #[test]
    fn early_exit_stops_the_pull() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        // A good seed ahead of a poisoned one: pulling only the first
        // value never evaluates the bad branch.
        let mut t = g.v([VertexId::new("1"), VertexId::new("404")]).values(&[]);
        let first = t.next().expect("one item");
        assert!(first.is_ok());
    }

    #[test]
    fn duplicate_seeds_are_counted_twice() {
        let graph = fixture();
        let g = TraversalSource::new(&graph);
        let n = g
            .v([VertexId::new("1"), VertexId::new("1")])
            .out(&["route"])
            .expect("out")
            .count()
            .expect("count");
        assert_eq!(n, 2);
    }
}
