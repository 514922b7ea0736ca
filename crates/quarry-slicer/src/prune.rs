//! Filter-driven partition pruning.
//!
//! Pruning is a proof obligation: a segment is dropped only when its value
//! range is provably disjoint from the filter. The outcome stays three-valued
//! so the conservative default is visible at the call site: `Unknown` and
//! `Overlapping` both mean "keep the segment"; only `Disjoint` prunes.

use std::collections::BTreeSet;

use quarry_core::{DimFilter, ShardSpec, ValueDomain};

/// Result of testing a partition against a filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PruneOutcome {
    /// The filter provably accepts no value inside the partition's range.
    Disjoint,
    /// The filter provably accepts at least one value inside the range.
    Overlapping,
    /// Nothing provable; incorrectly pruning here would lose rows.
    Unknown,
}

/// Tests whether `shard` can be excluded under `filter`.
///
/// `eligible_fields` restricts which dimensions the filter may be trusted to
/// prune on: `None` means all dimensions, while a present-but-empty set
/// disables pruning entirely. Tombstones never prune through this path; they
/// are dropped unconditionally before descriptor construction.
#[must_use]
pub fn prune_outcome(
    shard: &ShardSpec,
    filter: Option<&DimFilter>,
    eligible_fields: Option<&BTreeSet<String>>,
) -> PruneOutcome {
    let Some(filter) = filter else {
        return PruneOutcome::Unknown;
    };
    let range = match shard {
        ShardSpec::Tombstone => return PruneOutcome::Unknown,
        ShardSpec::Range(range) => range,
    };
    if let Some(fields) = eligible_fields {
        if !fields.contains(&range.dimension) {
            return PruneOutcome::Unknown;
        }
    }
    match filter.possible_values(&range.dimension) {
        ValueDomain::Unrestricted => PruneOutcome::Unknown,
        ValueDomain::Exact(values) => {
            if values.iter().any(|value| range.contains_value(value)) {
                PruneOutcome::Overlapping
            } else {
                PruneOutcome::Disjoint
            }
        }
    }
}

/// True only when the partition is provably excludable.
#[must_use]
pub fn can_prune(
    shard: &ShardSpec,
    filter: Option<&DimFilter>,
    eligible_fields: Option<&BTreeSet<String>>,
) -> bool {
    matches!(
        prune_outcome(shard, filter, eligible_fields),
        PruneOutcome::Disjoint
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_core::RangeShardSpec;

    fn lower_half() -> ShardSpec {
        // (-inf, "foo")
        ShardSpec::Range(RangeShardSpec::new("dim", None, Some("foo".into()), 0, 2))
    }

    fn upper_half() -> ShardSpec {
        // ["foo", +inf)
        ShardSpec::Range(RangeShardSpec::new("dim", Some("foo".into()), None, 1, 2))
    }

    fn fields(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn test_no_filter_never_prunes() {
        assert_eq!(prune_outcome(&upper_half(), None, None), PruneOutcome::Unknown);
    }

    #[test]
    fn test_selector_disjoint_from_range() {
        let filter = DimFilter::selector("dim", "bar");
        assert_eq!(
            prune_outcome(&upper_half(), Some(&filter), None),
            PruneOutcome::Disjoint
        );
        assert_eq!(
            prune_outcome(&lower_half(), Some(&filter), None),
            PruneOutcome::Overlapping
        );
    }

    #[test]
    fn test_lower_bound_is_inclusive_for_pruning() {
        let filter = DimFilter::selector("dim", "foo");
        assert_eq!(
            prune_outcome(&upper_half(), Some(&filter), None),
            PruneOutcome::Overlapping
        );
        assert_eq!(
            prune_outcome(&lower_half(), Some(&filter), None),
            PruneOutcome::Disjoint
        );
    }

    #[test]
    fn test_unprovable_filter_stays_unknown() {
        let filter = DimFilter::not(DimFilter::selector("dim", "bar"));
        assert_eq!(
            prune_outcome(&upper_half(), Some(&filter), None),
            PruneOutcome::Unknown
        );
    }

    #[test]
    fn test_filter_on_other_dimension_stays_unknown() {
        let filter = DimFilter::selector("other", "bar");
        assert_eq!(
            prune_outcome(&upper_half(), Some(&filter), None),
            PruneOutcome::Unknown
        );
    }

    #[test]
    fn test_empty_eligible_fields_disables_pruning() {
        let filter = DimFilter::selector("dim", "bar");
        assert_eq!(
            prune_outcome(&upper_half(), Some(&filter), Some(&fields(&[]))),
            PruneOutcome::Unknown
        );
    }

    #[test]
    fn test_eligible_fields_must_cover_the_partition_dimension() {
        let filter = DimFilter::selector("dim", "bar");
        assert_eq!(
            prune_outcome(&upper_half(), Some(&filter), Some(&fields(&["other"]))),
            PruneOutcome::Unknown
        );
        assert_eq!(
            prune_outcome(&upper_half(), Some(&filter), Some(&fields(&["dim"]))),
            PruneOutcome::Disjoint
        );
    }

    #[test]
    fn test_tombstone_never_prunes_via_filter() {
        let filter = DimFilter::selector("dim", "bar");
        assert_eq!(
            prune_outcome(&ShardSpec::Tombstone, Some(&filter), None),
            PruneOutcome::Unknown
        );
    }

    #[test]
    fn test_can_prune_only_on_proof() {
        let disjoint = DimFilter::selector("dim", "bar");
        let unprovable = DimFilter::not(DimFilter::selector("dim", "bar"));
        assert!(can_prune(&upper_half(), Some(&disjoint), None));
        assert!(!can_prune(&lower_half(), Some(&disjoint), None));
        assert!(!can_prune(&upper_half(), Some(&unprovable), None));
    }
}
