//! # Predicates
//!
//! Label matching, `has` conditions and deferred predicates.
//!
//! ## Label convention
//!
//! Labels are not a first-class graph construct: an element carries label
//! `L` when some property key starting with `label` (conventionally
//! `labelV` on vertices, `labelE` on edges) holds the literal string `L`.
//! Multiple labels combine with AND. The legacy boolean-flag encoding
//! (`label_L = true`) is not supported.

use crate::graph::{GraphStore, element_properties};
use crate::types::{ElementId, ElementProperties, PropertyValue, SourceType, TraversalError};
use std::fmt;
use std::rc::Rc;

/// Property keys starting with this prefix carry label values.
pub const LABEL_KEY_PREFIX: &str = "label";

/// True when the property map carries every given label under the
/// `label*` key convention. No labels means a trivial match.
#[must_use]
pub fn matches_labels(props: &ElementProperties, labels: &[String]) -> bool {
    labels.iter().all(|label| {
        props.iter().any(|(key, value)| {
            key.starts_with(LABEL_KEY_PREFIX)
                && matches!(value, PropertyValue::Str(s) if s == label)
        })
    })
}

// =============================================================================
// HAS CONDITIONS
// =============================================================================

/// A property condition for the `has` family of filters.
///
/// The three forms are explicit variants rather than an argument-count
/// dispatch; each states exactly what it checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Has {
    /// The property exists with a truthy value.
    Exists(String),
    /// The property exists and equals the value. A falsy comparison
    /// value degrades the check to truthy existence, so equality always
    /// refines [`Exists`](Self::Exists).
    Equals(String, PropertyValue),
    /// The element carries the label AND the property equals the value
    /// (same falsy-value degradation as [`Equals`](Self::Equals)).
    /// Vertex traversals only.
    LabeledEquals(String, String, PropertyValue),
}

impl Has {
    /// Existence check of a property.
    #[must_use]
    pub fn exists(prop: impl Into<String>) -> Self {
        Self::Exists(prop.into())
    }

    /// Equality check of a property.
    #[must_use]
    pub fn equals(prop: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self::Equals(prop.into(), value.into())
    }

    /// Combined label and property-equality check.
    #[must_use]
    pub fn labeled(
        label: impl Into<String>,
        prop: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        Self::LabeledEquals(label.into(), prop.into(), value.into())
    }

    /// Validate this condition against a traversal mode.
    ///
    /// The labeled form is rejected on edge traversals; this check runs
    /// eagerly when the filter is chained, not during the drain.
    pub(crate) fn check_mode(&self, source_type: SourceType) -> Result<(), TraversalError> {
        if matches!(self, Self::LabeledEquals(..)) && source_type == SourceType::Edge {
            return Err(TraversalError::InvalidArgument(
                "labeled `has` is not supported on edge traversals".to_string(),
            ));
        }
        Ok(())
    }

    /// Evaluate the condition against one element.
    ///
    /// A missing property is `false`, never an error; an unknown element
    /// id is a [`TraversalError::MissingElement`].
    pub fn evaluate(
        &self,
        store: &dyn GraphStore,
        element: &ElementId,
    ) -> Result<bool, TraversalError> {
        let props = element_properties(store, element)?;
        Ok(match self {
            Self::Exists(prop) => props.get(prop).is_some_and(PropertyValue::is_truthy),
            Self::Equals(prop, value) => equals_or_truthy(&props, prop, value),
            Self::LabeledEquals(label, prop, value) => {
                matches_labels(&props, std::slice::from_ref(label))
                    && equals_or_truthy(&props, prop, value)
            }
        })
    }
}

/// Equality against a truthy comparison value; a falsy one degrades to
/// the truthy-existence check, keeping equality a subset of existence.
fn equals_or_truthy(props: &ElementProperties, prop: &str, value: &PropertyValue) -> bool {
    if value.is_truthy() {
        props.get(prop) == Some(value)
    } else {
        props.get(prop).is_some_and(PropertyValue::is_truthy)
    }
}

// =============================================================================
// DEFERRED PREDICATES
// =============================================================================

/// A deferred check carrying its own captured arguments, evaluated with
/// `(store, source_type, element)` context.
///
/// Built-in predicates come from the [`statics`](crate::statics) module;
/// arbitrary checks can be wrapped with [`Predicate::from_fn`]. Used by
/// [`Traversal::not`](crate::traversal::Traversal::not).
#[derive(Clone)]
pub struct Predicate {
    check: Rc<PredicateFn>,
}

type PredicateFn = dyn Fn(&dyn GraphStore, SourceType, &ElementId) -> Result<bool, TraversalError>;

impl Predicate {
    /// Wrap a closure as a deferred predicate.
    pub fn from_fn<F>(check: F) -> Self
    where
        F: Fn(&dyn GraphStore, SourceType, &ElementId) -> Result<bool, TraversalError> + 'static,
    {
        Self {
            check: Rc::new(check),
        }
    }

    /// Evaluate the predicate against one element.
    pub fn evaluate(
        &self,
        store: &dyn GraphStore,
        source_type: SourceType,
        element: &ElementId,
    ) -> Result<bool, TraversalError> {
        (self.check)(store, source_type, element)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

// =============================================================================
// TESTS
// =============================================================================
