//! Read-only reductions behind the metric cards, charts and filter facets.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use time::OffsetDateTime;

use studio_domain::{MemberRecord, QuickFilter, Status};

/// Display truncation for chart buckets and preset lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartLimits {
	pub membership_types: usize,
	pub locations: usize,
	pub location_presets: usize,
	pub label_max_chars: usize,
}
impl From<&studio_config::Charts> for ChartLimits {
	fn from(cfg: &studio_config::Charts) -> Self {
		Self {
			membership_types: cfg.membership_types_limit,
			locations: cfg.locations_limit,
			location_presets: cfg.location_presets,
			label_max_chars: cfg.label_max_chars,
		}
	}
}
impl Default for ChartLimits {
	fn default() -> Self {
		Self { membership_types: 8, locations: 5, location_presets: 4, label_max_chars: 20 }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
	pub name: String,
	pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledBucket {
	pub name: String,
	pub label: String,
	pub count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
	pub with_sessions: usize,
	pub without_sessions: usize,
	pub total: i64,
	/// Mean over every record, rounded half up. Zero for an empty collection.
	pub average: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSummary {
	pub status: Vec<Bucket>,
	pub membership_types: Vec<LabeledBucket>,
	pub locations: Vec<Bucket>,
	pub sessions: SessionSummary,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeadlineMetrics {
	pub total_members: usize,
	pub active_members: usize,
	pub expired_members: usize,
	pub total_sessions: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
	pub locations: Vec<String>,
	pub membership_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickFilterCount {
	pub token: String,
	pub label: String,
	pub count: usize,
}

pub fn aggregate(records: &[&MemberRecord], limits: ChartLimits) -> ChartSummary {
	let mut membership_types =
		histogram(records.iter().map(|record| record.membership_name.as_str()));

	membership_types.truncate(limits.membership_types);

	let mut locations = histogram(
		records
			.iter()
			.filter(|record| record.has_location())
			.map(|record| record.location.as_str()),
	);

	locations.truncate(limits.locations);

	ChartSummary {
		status: histogram(records.iter().map(|record| record.status.as_str())),
		membership_types: membership_types
			.into_iter()
			.map(|bucket| LabeledBucket {
				label: truncate_label(&bucket.name, limits.label_max_chars),
				name: bucket.name,
				count: bucket.count,
			})
			.collect(),
		locations,
		sessions: session_summary(records),
	}
}

pub fn session_summary(records: &[&MemberRecord]) -> SessionSummary {
	let with_sessions = records.iter().filter(|record| record.has_sessions()).count();
	let without_sessions = records.iter().filter(|record| record.sessions_left == 0).count();
	let total = total_sessions(records.iter().copied());
	let average = if records.is_empty() {
		0
	} else {
		(total as f64 / records.len() as f64 + 0.5).floor() as i64
	};

	SessionSummary { with_sessions, without_sessions, total, average }
}

pub fn headline_metrics(records: &[MemberRecord]) -> HeadlineMetrics {
	HeadlineMetrics {
		total_members: records.len(),
		active_members: records.iter().filter(|record| record.status == Status::Active).count(),
		expired_members: records.iter().filter(|record| record.status == Status::Expired).count(),
		total_sessions: total_sessions(records.iter()),
	}
}

/// Distinct facet values over the whole store, in first-seen order.
pub fn facets(records: &[MemberRecord]) -> Facets {
	Facets {
		locations: distinct(
			records
				.iter()
				.filter(|record| record.has_location())
				.map(|record| record.location.as_str()),
		),
		membership_types: distinct(records.iter().map(|record| record.membership_name.as_str())),
	}
}

/// Counts for every fixed preset plus one preset per leading location facet.
pub fn quick_filter_counts(
	records: &[MemberRecord],
	facets: &Facets,
	limits: ChartLimits,
	now: OffsetDateTime,
) -> Vec<QuickFilterCount> {
	QuickFilter::FIXED
		.into_iter()
		.chain(
			facets
				.locations
				.iter()
				.take(limits.location_presets)
				.map(|location| QuickFilter::ByLocation(location.clone())),
		)
		.map(|filter| QuickFilterCount {
			token: filter.token(),
			label: filter.label(),
			count: records.iter().filter(|record| filter.admits(record, now)).count(),
		})
		.collect()
}

/// Cuts a chart label to `max_chars` characters and marks the cut with "...".
pub fn truncate_label(name: &str, max_chars: usize) -> String {
	if name.chars().count() <= max_chars {
		return name.to_string();
	}

	let head: String = name.chars().take(max_chars).collect();

	format!("{head}...")
}

/// Saturates instead of overflowing, so hostile balances cannot wrap the total.
fn total_sessions<'a>(records: impl Iterator<Item = &'a MemberRecord>) -> i64 {
	records.fold(0_i64, |total, record| total.saturating_add(record.sessions_left))
}

fn histogram<'a>(values: impl Iterator<Item = &'a str>) -> Vec<Bucket> {
	let mut buckets: Vec<Bucket> = Vec::new();
	let mut index: HashMap<&'a str, usize> = HashMap::new();

	for value in values {
		match index.get(value) {
			Some(position) => buckets[*position].count += 1,
			None => {
				index.insert(value, buckets.len());
				buckets.push(Bucket { name: value.to_string(), count: 1 });
			},
		}
	}

	buckets
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
	let mut seen = HashSet::new();

	values.filter(|value| seen.insert(*value)).map(str::to_string).collect()
}
