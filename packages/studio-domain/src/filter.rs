use std::{
	collections::BTreeSet,
	fmt::{Display, Formatter},
};

use time::Date;

use crate::{
	date,
	record::{MemberRecord, Status},
};

pub const DEFAULT_SESSIONS_MIN: i64 = 0;
pub const DEFAULT_SESSIONS_MAX: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterError {
	field: &'static str,
	message: String,
}
impl Display for FilterError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}: {}", self.field, self.message)
	}
}
impl std::error::Error for FilterError {}

/// Structured filter from the advanced filter panel.
///
/// Every criterion must hold for a record to pass. An empty set places no constraint on its
/// field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
	pub status: BTreeSet<Status>,
	pub locations: BTreeSet<String>,
	pub membership_types: BTreeSet<String>,
	pub date_range: DateRange,
	pub sessions_range: SessionsRange,
}
impl FilterSpec {
	/// True when no criterion is set, so every record passes.
	pub fn is_unconstrained(&self) -> bool {
		self == &Self::default()
	}

	pub fn admits(&self, record: &MemberRecord) -> bool {
		if !self.status.is_empty() && !self.status.contains(&record.status) {
			return false;
		}
		if !self.locations.is_empty() && !self.locations.contains(&record.location) {
			return false;
		}
		if !self.membership_types.is_empty()
			&& !self.membership_types.contains(&record.membership_name)
		{
			return false;
		}
		if !self.sessions_range.contains(record.sessions_left) {
			return false;
		}

		self.date_range.admits(&record.end_date)
	}

	pub fn toggle_status(&mut self, status: Status) {
		toggle(&mut self.status, status);
	}

	pub fn toggle_location(&mut self, location: &str) {
		toggle(&mut self.locations, location.to_string());
	}

	pub fn toggle_membership_type(&mut self, membership_type: &str) {
		toggle(&mut self.membership_types, membership_type.to_string());
	}
}

/// Inclusive calendar-date bounds on a record's end date. `None` leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
	pub start: Option<Date>,
	pub end: Option<Date>,
}
impl DateRange {
	/// Blank inputs leave a side open. Anything else must parse as a date.
	pub fn parse(start: &str, end: &str) -> Result<Self, FilterError> {
		Ok(Self {
			start: parse_bound("date_range.start", start)?,
			end: parse_bound("date_range.end", end)?,
		})
	}

	pub fn is_unbounded(&self) -> bool {
		self.start.is_none() && self.end.is_none()
	}

	/// An end date that does not parse fails any bound that is set.
	pub fn admits(&self, end_date: &str) -> bool {
		if self.is_unbounded() {
			return true;
		}

		let Some(end_date) = date::parse_date(end_date) else {
			return false;
		};

		if let Some(start) = self.start
			&& end_date < start
		{
			return false;
		}
		if let Some(end) = self.end
			&& end_date > end
		{
			return false;
		}

		true
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionsRange {
	pub min: i64,
	pub max: i64,
}
impl SessionsRange {
	/// Builds a range from panel text. Input that is not an integer falls back to the
	/// default bound for that side.
	pub fn from_inputs(min: &str, max: &str) -> Self {
		Self {
			min: min.trim().parse().unwrap_or(DEFAULT_SESSIONS_MIN),
			max: max.trim().parse().unwrap_or(DEFAULT_SESSIONS_MAX),
		}
	}

	pub fn contains(&self, sessions_left: i64) -> bool {
		sessions_left >= self.min && sessions_left <= self.max
	}
}
impl Default for SessionsRange {
	fn default() -> Self {
		Self { min: DEFAULT_SESSIONS_MIN, max: DEFAULT_SESSIONS_MAX }
	}
}

fn parse_bound(field: &'static str, raw: &str) -> Result<Option<Date>, FilterError> {
	if raw.trim().is_empty() {
		return Ok(None);
	}

	date::parse_date(raw)
		.map(Some)
		.ok_or_else(|| FilterError { field, message: format!("'{raw}' is not a date.") })
}

fn toggle<T>(set: &mut BTreeSet<T>, value: T)
where
	T: Ord,
{
	if !set.remove(&value) {
		set.insert(value);
	}
}
