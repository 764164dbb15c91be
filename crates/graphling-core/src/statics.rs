//! # Statics
//!
//! Free constructors for deferred predicates: the vocabulary handed to
//! [`Traversal::not`](crate::traversal::Traversal::not) and any other
//! consumer of [`Predicate`] values.
//!
//! Each constructor captures its arguments into the predicate; mode
//! checks that the equivalent inline operator performs eagerly happen
//! here at evaluation time, against the mode of the traversal the
//! predicate ends up running in.

use crate::graph::element_properties;
use crate::predicate::{Has, Predicate, matches_labels};
use crate::types::{SourceType, TraversalError};

/// Deferred form of [`Traversal::has_label`]: true when the element
/// carries every given label. Vertex traversals only.
///
/// [`Traversal::has_label`]: crate::traversal::Traversal::has_label
pub fn has_label(labels: &[&str]) -> Predicate {
    let labels: Vec<String> = labels.iter().map(|label| (*label).to_string()).collect();
    Predicate::from_fn(move |store, source_type, element| {
        if source_type == SourceType::Edge {
            return Err(TraversalError::NotExecutable {
                operation: "has_label",
                source_type,
            });
        }
        let props = element_properties(store, element)?;
        Ok(matches_labels(&props, &labels))
    })
}

/// Deferred form of [`Traversal::has`].
///
/// [`Traversal::has`]: crate::traversal::Traversal::has
pub fn has(condition: Has) -> Predicate {
    Predicate::from_fn(move |store, source_type, element| {
        condition.check_mode(source_type)?;
        condition.evaluate(store, element)
    })
}

/// Deferred form of [`Traversal::has_not`]: the exact complement of
/// [`has`] over the same elements.
///
/// [`Traversal::has_not`]: crate::traversal::Traversal::has_not
pub fn has_not(condition: Has) -> Predicate {
    Predicate::from_fn(move |store, source_type, element| {
        condition.check_mode(source_type)?;
        Ok(!condition.evaluate(store, element)?)
    })
}

// =============================================================================
// TESTS
// =============================================================================
