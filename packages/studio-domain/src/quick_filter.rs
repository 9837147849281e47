use std::fmt::{Display, Formatter};

use time::{Duration, OffsetDateTime};

use crate::{
	date,
	record::{MemberRecord, Status},
};

pub const RECENT_WINDOW_DAYS: i64 = 30;
pub const WEEKLY_WINDOW_DAYS: i64 = 7;
pub const EXPIRING_WINDOW_DAYS: i64 = 30;

const LOCATION_PREFIX: &str = "location-";

/// A single coarse preset. Exactly one is active at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum QuickFilter {
	#[default]
	All,
	Active,
	Expired,
	HasSessions,
	NoSessions,
	Recent,
	Weekly,
	Expiring,
	ByLocation(String),
}
impl QuickFilter {
	/// Presets that do not depend on the dataset, in display order.
	pub const FIXED: [QuickFilter; 8] = [
		QuickFilter::All,
		QuickFilter::Active,
		QuickFilter::Expired,
		QuickFilter::HasSessions,
		QuickFilter::NoSessions,
		QuickFilter::Recent,
		QuickFilter::Weekly,
		QuickFilter::Expiring,
	];

	/// Decodes a preset token. Unknown tokens fall back to `All`.
	pub fn parse(token: &str) -> Self {
		match token.trim() {
			"active" => Self::Active,
			"expired" => Self::Expired,
			"sessions" => Self::HasSessions,
			"no-sessions" => Self::NoSessions,
			"recent" => Self::Recent,
			"weekly" => Self::Weekly,
			"expiring" => Self::Expiring,
			other => match other.strip_prefix(LOCATION_PREFIX) {
				Some(location) => Self::ByLocation(location.to_string()),
				None => Self::All,
			},
		}
	}

	pub fn token(&self) -> String {
		match self {
			Self::All => "all".to_string(),
			Self::Active => "active".to_string(),
			Self::Expired => "expired".to_string(),
			Self::HasSessions => "sessions".to_string(),
			Self::NoSessions => "no-sessions".to_string(),
			Self::Recent => "recent".to_string(),
			Self::Weekly => "weekly".to_string(),
			Self::Expiring => "expiring".to_string(),
			Self::ByLocation(location) => format!("{LOCATION_PREFIX}{location}"),
		}
	}

	pub fn label(&self) -> String {
		match self {
			Self::All => "All Members".to_string(),
			Self::Active => "Active".to_string(),
			Self::Expired => "Expired".to_string(),
			Self::HasSessions => "With Sessions".to_string(),
			Self::NoSessions => "No Sessions".to_string(),
			Self::Recent => "Last 30 Days".to_string(),
			Self::Weekly => "This Week".to_string(),
			Self::Expiring => "Expiring Soon".to_string(),
			Self::ByLocation(location) => short_location(location).to_string(),
		}
	}

	/// Evaluates the preset against `now`. Dates that do not parse never match a period preset.
	pub fn admits(&self, record: &MemberRecord, now: OffsetDateTime) -> bool {
		match self {
			Self::All => true,
			Self::Active => record.status == Status::Active,
			Self::Expired => record.status == Status::Expired,
			Self::HasSessions => record.has_sessions(),
			Self::NoSessions => record.sessions_left == 0,
			Self::Recent => ordered_since(record, now - Duration::days(RECENT_WINDOW_DAYS)),
			Self::Weekly => ordered_since(record, now - Duration::days(WEEKLY_WINDOW_DAYS)),
			Self::Expiring => date::parse_date_time(&record.end_date)
				.map(|end| end >= now && end <= now + Duration::days(EXPIRING_WINDOW_DAYS))
				.unwrap_or(false),
			Self::ByLocation(location) => &record.location == location,
		}
	}
}
impl Display for QuickFilter {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.token())
	}
}

/// Text before the first comma, e.g. "Kwality House, Kemps Corner" -> "Kwality House".
pub fn short_location(location: &str) -> &str {
	match location.split(',').next() {
		Some(head) if !head.is_empty() => head,
		_ => location,
	}
}

fn ordered_since(record: &MemberRecord, since: OffsetDateTime) -> bool {
	date::parse_date_time(&record.order_date).map(|ordered| ordered >= since).unwrap_or(false)
}
