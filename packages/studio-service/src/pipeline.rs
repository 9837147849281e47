//! The filter stages as plain functions over borrowed records.
//!
//! Callers decide when to rerun them; nothing here caches.

use time::OffsetDateTime;

use studio_domain::{FilterSpec, MemberRecord, QuickFilter, search};

pub fn apply_quick_filter<'a>(
	records: &'a [MemberRecord],
	filter: &QuickFilter,
	now: OffsetDateTime,
) -> Vec<&'a MemberRecord> {
	records.iter().filter(|record| filter.admits(record, now)).collect()
}

pub fn apply_filters<'a>(records: &[&'a MemberRecord], spec: &FilterSpec) -> Vec<&'a MemberRecord> {
	if spec.is_unconstrained() {
		return records.to_vec();
	}

	records.iter().copied().filter(|record| spec.admits(record)).collect()
}

pub fn apply_search<'a>(records: &[&'a MemberRecord], term: &str) -> Vec<&'a MemberRecord> {
	if term.is_empty() {
		return records.to_vec();
	}

	records.iter().copied().filter(|record| search::matches(record, term)).collect()
}

/// Quick filter over the whole store, then the structured filter. Both stages are plain
/// conjunctions, so the order does not change the result.
pub fn working_set<'a>(
	records: &'a [MemberRecord],
	quick: &QuickFilter,
	spec: &FilterSpec,
	now: OffsetDateTime,
) -> Vec<&'a MemberRecord> {
	apply_filters(&apply_quick_filter(records, quick, now), spec)
}
