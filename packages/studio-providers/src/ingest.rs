//! Turns raw sheet rows into validated member records.
//!
//! Rows that would break record identity (missing or repeated `uniqueId`) or carry an unknown
//! status are dropped. Values the pipeline can tolerate (odd dates, negative balances) are kept
//! and reported so the operator can fix the sheet.

use std::{
	collections::{HashMap, HashSet},
	fmt::{Display, Formatter},
};

use serde_json::Value;

use studio_domain::{MemberRecord, Status, date};

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
	MissingUniqueId,
	DuplicateUniqueId { unique_id: String },
	InvalidStatus { value: String },
	InvalidSessions { value: String },
	NegativeSessions { value: i64 },
	UnparseableDate { field: &'static str, value: String },
}
impl IssueKind {
	pub fn skips_row(&self) -> bool {
		matches!(
			self,
			Self::MissingUniqueId | Self::DuplicateUniqueId { .. } | Self::InvalidStatus { .. }
		)
	}
}

/// A problem found in one input row. `row` is 1-based over data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestIssue {
	pub row: usize,
	pub kind: IssueKind,
}
impl Display for IngestIssue {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match &self.kind {
			IssueKind::MissingUniqueId => write!(f, "row {}: missing uniqueId", self.row),
			IssueKind::DuplicateUniqueId { unique_id } =>
				write!(f, "row {}: duplicate uniqueId {unique_id:?}", self.row),
			IssueKind::InvalidStatus { value } =>
				write!(f, "row {}: unknown status {value:?}", self.row),
			IssueKind::InvalidSessions { value } =>
				write!(f, "row {}: sessionsLeft {value:?} is not a number, using 0", self.row),
			IssueKind::NegativeSessions { value } =>
				write!(f, "row {}: negative sessionsLeft {value}", self.row),
			IssueKind::UnparseableDate { field, value } =>
				write!(f, "row {}: {field} {value:?} is not a date", self.row),
		}
	}
}

#[derive(Debug, Clone, Default)]
pub struct IngestReport {
	pub records: Vec<MemberRecord>,
	pub issues: Vec<IngestIssue>,
}
impl IngestReport {
	pub fn skipped(&self) -> usize {
		self.issues.iter().filter(|issue| issue.kind.skips_row()).count()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Column {
	UniqueId,
	MemberId,
	FirstName,
	LastName,
	Email,
	MembershipName,
	EndDate,
	Location,
	SessionsLeft,
	ItemId,
	OrderDate,
	SoldBy,
	MembershipId,
	Frozen,
	Paid,
	Status,
}
impl Column {
	/// Matches headers ignoring case, spaces and punctuation, so "Unique Id" and "uniqueId"
	/// are the same column.
	fn from_header(raw: &str) -> Option<Self> {
		let key: String = raw
			.chars()
			.filter(|ch| ch.is_ascii_alphanumeric())
			.map(|ch| ch.to_ascii_lowercase())
			.collect();

		match key.as_str() {
			"uniqueid" => Some(Self::UniqueId),
			"memberid" => Some(Self::MemberId),
			"firstname" => Some(Self::FirstName),
			"lastname" => Some(Self::LastName),
			"email" => Some(Self::Email),
			"membershipname" => Some(Self::MembershipName),
			"enddate" => Some(Self::EndDate),
			"location" => Some(Self::Location),
			"sessionsleft" => Some(Self::SessionsLeft),
			"itemid" => Some(Self::ItemId),
			"orderdate" => Some(Self::OrderDate),
			"soldby" => Some(Self::SoldBy),
			"membershipid" => Some(Self::MembershipId),
			"frozen" => Some(Self::Frozen),
			"paid" => Some(Self::Paid),
			"status" => Some(Self::Status),
			_ => None,
		}
	}
}

struct RowReader<'a> {
	columns: &'a HashMap<Column, usize>,
	cells: &'a [Value],
}
impl RowReader<'_> {
	fn text(&self, column: Column) -> String {
		self.columns
			.get(&column)
			.and_then(|index| self.cells.get(*index))
			.map(cell_text)
			.unwrap_or_default()
	}
}

/// Ingests a values grid whose first row is the header.
pub fn ingest_rows(rows: &[Vec<Value>]) -> Result<IngestReport> {
	let Some((header, data)) = rows.split_first() else {
		return Ok(IngestReport::default());
	};
	let mut columns = HashMap::new();

	for (index, cell) in header.iter().enumerate() {
		if let Some(column) = Column::from_header(&cell_text(cell)) {
			columns.entry(column).or_insert(index);
		}
	}

	if !columns.contains_key(&Column::UniqueId) {
		return Err(Error::InvalidResponse {
			message: "Sheet header is missing the uniqueId column.".to_string(),
		});
	}

	let mut validator = Validator::default();

	for (offset, cells) in data.iter().enumerate() {
		let row = offset + 1;

		if cells.iter().all(|cell| cell_text(cell).is_empty()) {
			continue;
		}

		let reader = RowReader { columns: &columns, cells };
		let raw_status = reader.text(Column::Status);
		let Some(status) = Status::parse(&raw_status) else {
			validator.report(row, IssueKind::InvalidStatus { value: raw_status });

			continue;
		};
		let sessions_left = validator.sessions(row, &reader.text(Column::SessionsLeft));
		let record = MemberRecord {
			unique_id: reader.text(Column::UniqueId),
			member_id: reader.text(Column::MemberId),
			first_name: reader.text(Column::FirstName),
			last_name: reader.text(Column::LastName),
			email: reader.text(Column::Email),
			membership_name: reader.text(Column::MembershipName),
			end_date: reader.text(Column::EndDate),
			location: reader.text(Column::Location),
			sessions_left,
			item_id: reader.text(Column::ItemId),
			order_date: reader.text(Column::OrderDate),
			sold_by: reader.text(Column::SoldBy),
			membership_id: reader.text(Column::MembershipId),
			frozen: reader.text(Column::Frozen),
			paid: reader.text(Column::Paid),
			status,
			comments: String::new(),
			notes: String::new(),
			tags: Vec::new(),
		};

		validator.admit(row, record);
	}

	Ok(validator.finish())
}

/// Applies the same identity and value checks to already-typed records.
pub fn ingest_records(records: Vec<MemberRecord>) -> IngestReport {
	let mut validator = Validator::default();

	for (offset, record) in records.into_iter().enumerate() {
		validator.admit(offset + 1, record);
	}

	validator.finish()
}

#[derive(Default)]
struct Validator {
	seen: HashSet<String>,
	report: IngestReport,
}
impl Validator {
	fn report(&mut self, row: usize, kind: IssueKind) {
		self.report.issues.push(IngestIssue { row, kind });
	}

	fn sessions(&mut self, row: usize, raw: &str) -> i64 {
		let raw = raw.trim();

		if raw.is_empty() {
			return 0;
		}

		match parse_sessions(raw) {
			Some(value) => value,
			None => {
				self.report(row, IssueKind::InvalidSessions { value: raw.to_string() });

				0
			},
		}
	}

	fn admit(&mut self, row: usize, mut record: MemberRecord) {
		record.unique_id = record.unique_id.trim().to_string();

		if record.unique_id.is_empty() {
			self.report(row, IssueKind::MissingUniqueId);

			return;
		}
		if !self.seen.insert(record.unique_id.clone()) {
			self.report(row, IssueKind::DuplicateUniqueId { unique_id: record.unique_id });

			return;
		}
		if record.sessions_left < 0 {
			self.report(row, IssueKind::NegativeSessions { value: record.sessions_left });
		}

		for (field, value) in [("endDate", &record.end_date), ("orderDate", &record.order_date)] {
			if !value.trim().is_empty() && date::parse_date_time(value).is_none() {
				self.report(row, IssueKind::UnparseableDate { field, value: value.clone() });
			}
		}

		self.report.records.push(record);
	}

	fn finish(self) -> IngestReport {
		self.report
	}
}

fn parse_sessions(raw: &str) -> Option<i64> {
	if let Ok(value) = raw.parse::<i64>() {
		return Some(value);
	}

	// Sheets sometimes renders integers as floats ("12.0", "1e3"). Anything that is not a whole
	// number inside the i64 range is rejected.
	let value = raw.parse::<f64>().ok()?;

	if !value.is_finite() || value.fract() != 0.0 {
		return None;
	}

	format!("{value:.0}").parse::<i64>().ok()
}

fn cell_text(cell: &Value) -> String {
	match cell {
		Value::String(text) => text.trim().to_string(),
		Value::Number(number) => number.to_string(),
		Value::Bool(flag) => flag.to_string(),
		_ => String::new(),
	}
}
