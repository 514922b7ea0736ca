//! Conjunctive value filters, modeled to the depth their pruning capability
//! requires.
//!
//! The slicer never evaluates a filter against rows. It only asks one
//! question: "which values could this filter possibly accept for dimension
//! `d`?" The answer is a [`ValueDomain`], either an exact provable set or
//! `Unrestricted` when nothing can be proven. Every construct this module
//! cannot reason about degrades to `Unrestricted`, so pruning stays
//! conservative by construction.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Value filter over dimension values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DimFilter {
    /// Dimension equals a single value.
    Selector { dimension: String, value: String },
    /// Dimension is one of a set of values.
    InValues {
        dimension: String,
        values: BTreeSet<String>,
    },
    /// Every child filter must match.
    And { filters: Vec<DimFilter> },
    /// At least one child filter must match.
    Or { filters: Vec<DimFilter> },
    /// Child filter must not match.
    Not { filter: Box<DimFilter> },
}

impl DimFilter {
    /// Creates a `dimension = value` filter.
    #[must_use]
    pub fn selector(dimension: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Selector {
            dimension: dimension.into(),
            value: value.into(),
        }
    }

    /// Creates a `dimension IN (values…)` filter.
    #[must_use]
    pub fn in_values<I, S>(dimension: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::InValues {
            dimension: dimension.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a conjunction of filters.
    #[must_use]
    pub fn and(filters: Vec<DimFilter>) -> Self {
        Self::And { filters }
    }

    /// Creates a disjunction of filters.
    #[must_use]
    pub fn or(filters: Vec<DimFilter>) -> Self {
        Self::Or { filters }
    }

    /// Creates a negation of a filter.
    #[must_use]
    pub fn not(filter: DimFilter) -> Self {
        Self::Not {
            filter: Box::new(filter),
        }
    }

    /// The set of values this filter could possibly accept for `dimension`.
    #[must_use]
    pub fn possible_values(&self, dimension: &str) -> ValueDomain {
        match self {
            Self::Selector {
                dimension: dim,
                value,
            } => {
                if dim == dimension {
                    ValueDomain::Exact(BTreeSet::from([value.clone()]))
                } else {
                    ValueDomain::Unrestricted
                }
            }
            Self::InValues {
                dimension: dim,
                values,
            } => {
                if dim == dimension {
                    ValueDomain::Exact(values.clone())
                } else {
                    ValueDomain::Unrestricted
                }
            }
            Self::And { filters } => {
                // Conjunction: intersect whatever the children can prove.
                let mut domain = ValueDomain::Unrestricted;
                for child in filters {
                    domain = domain.intersect(child.possible_values(dimension));
                }
                domain
            }
            Self::Or { filters } => {
                // Disjunction is only provable when every branch is.
                let mut union = BTreeSet::new();
                for child in filters {
                    match child.possible_values(dimension) {
                        ValueDomain::Exact(values) => union.extend(values),
                        ValueDomain::Unrestricted => return ValueDomain::Unrestricted,
                    }
                }
                ValueDomain::Exact(union)
            }
            // Complements are never provable from a value set.
            Self::Not { .. } => ValueDomain::Unrestricted,
        }
    }
}

/// Provable per-dimension value domain of a filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueDomain {
    /// The filter can only accept values from this set.
    Exact(BTreeSet<String>),
    /// Nothing provable; the filter may accept any value.
    Unrestricted,
}

impl ValueDomain {
    fn intersect(self, other: ValueDomain) -> ValueDomain {
        match (self, other) {
            (ValueDomain::Unrestricted, domain) | (domain, ValueDomain::Unrestricted) => domain,
            (ValueDomain::Exact(left), ValueDomain::Exact(right)) => {
                ValueDomain::Exact(left.intersection(&right).cloned().collect())
            }
        }
    }
}
