//! # Aggregation
//!
//! Eager terminal consumers over a drained traversal: [`Group`] and
//! [`GroupCount`].
//!
//! Aggregation is the sole eager boundary in the pipeline. Grouping
//! requires full materialization, so both aggregators drain their input
//! traversal at construction; everything upstream stays lazy. The
//! resulting mapping can then be re-derived with the `by` family without
//! touching the (already consumed) traversal again.

use crate::graph::{GraphStore, element_properties};
use crate::traversal::{Traversal, TraversalValue};
use crate::types::{ElementId, SourceType, TraversalError};
use std::collections::BTreeMap;

// =============================================================================
// GROUP
// =============================================================================

/// Key → values mapping built from a drained traversal.
///
/// The default mapping is identity: every surfaced value keyed by
/// itself. [`by_with`](Self::by_with) replaces the mapping wholesale;
/// the transformer receives the aggregator and can reach the drained
/// elements, the surfaced values and the store.
pub struct Group<'g> {
    store: &'g dyn GraphStore,
    source_type: SourceType,
    elements: Vec<ElementId>,
    values: Vec<TraversalValue>,
    map: BTreeMap<TraversalValue, Vec<TraversalValue>>,
}

impl<'g> Group<'g> {
    /// Drain a traversal into an identity grouping.
    pub fn from_traversal(traversal: Traversal<'g>) -> Result<Self, TraversalError> {
        let store = traversal.store();
        let source_type = traversal.source_type();
        let (elements, values) = traversal.drain()?;

        let mut map: BTreeMap<TraversalValue, Vec<TraversalValue>> = BTreeMap::new();
        for value in &values {
            map.entry(value.clone()).or_default().push(value.clone());
        }

        Ok(Self {
            store,
            source_type,
            elements,
            values,
            map,
        })
    }

    /// Reinitialize the mapping with the transformer's result.
    #[must_use]
    pub fn by_with<F>(mut self, transform: F) -> Self
    where
        F: FnOnce(&Self) -> BTreeMap<TraversalValue, Vec<TraversalValue>>,
    {
        let map = transform(&self);
        self.map = map;
        self
    }

    /// The store the source traversal ran against.
    #[must_use]
    pub fn store(&self) -> &'g dyn GraphStore {
        self.store
    }

    /// The mode of the source traversal.
    #[must_use]
    pub fn source_type(&self) -> SourceType {
        self.source_type
    }

    /// The drained current elements, in drain order.
    #[must_use]
    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    /// The drained surfaced values, in drain order.
    #[must_use]
    pub fn values(&self) -> &[TraversalValue] {
        &self.values
    }

    /// The current mapping.
    #[must_use]
    pub fn map(&self) -> &BTreeMap<TraversalValue, Vec<TraversalValue>> {
        &self.map
    }

    /// Consume the aggregator, yielding the mapping.
    #[must_use]
    pub fn into_map(self) -> BTreeMap<TraversalValue, Vec<TraversalValue>> {
        self.map
    }

    /// Values grouped under one key.
    #[must_use]
    pub fn get(&self, key: &TraversalValue) -> Option<&[TraversalValue]> {
        self.map.get(key).map(Vec::as_slice)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True when no element was drained into the mapping.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl std::fmt::Debug for Group<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Group")
            .field("source_type", &self.source_type)
            .field("map", &self.map)
            .finish()
    }
}

// =============================================================================
// GROUP COUNT
// =============================================================================

/// Key → occurrence-count mapping built from a drained traversal.
///
/// The default counts are the multiset cardinality of the surfaced
/// values. [`by`](Self::by) re-keys the counts by a property of the
/// drained elements; [`by_with`](Self::by_with) replaces them wholesale.
pub struct GroupCount<'g> {
    store: &'g dyn GraphStore,
    source_type: SourceType,
    elements: Vec<ElementId>,
    values: Vec<TraversalValue>,
    counts: BTreeMap<TraversalValue, u64>,
}

impl<'g> GroupCount<'g> {
    /// Drain a traversal into multiset counts.
    pub fn from_traversal(traversal: Traversal<'g>) -> Result<Self, TraversalError> {
        let store = traversal.store();
        let source_type = traversal.source_type();
        let (elements, values) = traversal.drain()?;

        let mut counts: BTreeMap<TraversalValue, u64> = BTreeMap::new();
        for value in &values {
            counts
                .entry(value.clone())
                .and_modify(|n| *n = n.saturating_add(1))
                .or_insert(1);
        }

        Ok(Self {
            store,
            source_type,
            elements,
            values,
            counts,
        })
    }

    /// Re-derive the counts keyed by a property of the drained elements.
    ///
    /// Vertex traversals key by the vertex property, edge traversals by
    /// the edge property. Elements missing the property are excluded.
    pub fn by(mut self, property: &str) -> Result<Self, TraversalError> {
        let mut counts: BTreeMap<TraversalValue, u64> = BTreeMap::new();
        for element in &self.elements {
            let props = element_properties(self.store, element)?;
            if let Some(value) = props.get(property) {
                counts
                    .entry(TraversalValue::Value(value.clone()))
                    .and_modify(|n| *n = n.saturating_add(1))
                    .or_insert(1);
            }
        }
        self.counts = counts;
        Ok(self)
    }

    /// Reinitialize the counts with the transformer's result.
    #[must_use]
    pub fn by_with<F>(mut self, transform: F) -> Self
    where
        F: FnOnce(&Self) -> BTreeMap<TraversalValue, u64>,
    {
        let counts = transform(&self);
        self.counts = counts;
        self
    }

    /// The store the source traversal ran against.
    #[must_use]
    pub fn store(&self) -> &'g dyn GraphStore {
        self.store
    }

    /// The mode of the source traversal.
    #[must_use]
    pub fn source_type(&self) -> SourceType {
        self.source_type
    }

    /// The drained current elements, in drain order.
    #[must_use]
    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    /// The drained surfaced values, in drain order.
    #[must_use]
    pub fn values(&self) -> &[TraversalValue] {
        &self.values
    }

    /// The current counts.
    #[must_use]
    pub fn counts(&self) -> &BTreeMap<TraversalValue, u64> {
        &self.counts
    }

    /// Consume the aggregator, yielding the counts.
    #[must_use]
    pub fn into_counts(self) -> BTreeMap<TraversalValue, u64> {
        self.counts
    }

    /// Occurrences counted under one key.
    #[must_use]
    pub fn get(&self, key: &TraversalValue) -> Option<u64> {
        self.counts.get(key).copied()
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no key survived the (re-)derivation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0, |acc, n| acc.saturating_add(*n))
    }
}

impl std::fmt::Debug for GroupCount<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupCount")
            .field("source_type", &self.source_type)
            .field("counts", &self.counts)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
