//! # Path
//!
//! The append-only hop history of one traversal branch.

use crate::types::ElementId;
use serde::{Deserialize, Serialize};

/// Ordered, append-only sequence of element ids recording the hops of one
/// traversal branch. The last entry is the current element; the first is
/// the seed the branch started from.
///
/// A path is never empty: it is always constructed from a seed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Path {
    entries: Vec<ElementId>,
}

impl Path {
    /// Create a single-entry path from a seed element.
    #[must_use]
    pub fn seed(id: ElementId) -> Self {
        Self { entries: vec![id] }
    }

    /// Append an element, returning a new path.
    ///
    /// Appending copies: branches produced by a flat-map expansion own
    /// independent sequences and never alias each other.
    #[must_use]
    pub fn push(&self, id: ElementId) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len().saturating_add(1));
        entries.extend(self.entries.iter().cloned());
        entries.push(id);
        Self { entries }
    }

    /// The current element: the last entry.
    #[must_use]
    pub fn last(&self) -> &ElementId {
        match self.entries.last() {
            Some(id) => id,
            // Unreachable: every constructor starts from a seed.
            None => unreachable!("path constructed without a seed"),
        }
    }

    /// The seed element: the first entry.
    #[must_use]
    pub fn first(&self) -> &ElementId {
        match self.entries.first() {
            Some(id) => id,
            None => unreachable!("path constructed without a seed"),
        }
    }

    /// Number of hops recorded (including the seed).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for iterator-adapter ergonomics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in hop order.
    #[must_use]
    pub fn entries(&self) -> &[ElementId] {
        &self.entries
    }

    /// Consume the path, yielding its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<ElementId> {
        self.entries
    }
}

// =============================================================================
// TESTS
// =============================================================================
