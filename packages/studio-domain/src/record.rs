use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub const LOCATION_PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
	Active,
	Expired,
}
impl Status {
	pub const ALL: [Status; 2] = [Status::Active, Status::Expired];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Active => "Active",
			Self::Expired => "Expired",
		}
	}

	/// Case-insensitive; surrounding whitespace is ignored.
	pub fn parse(raw: &str) -> Option<Self> {
		let raw = raw.trim();

		Self::ALL.into_iter().find(|status| status.as_str().eq_ignore_ascii_case(raw))
	}
}
impl Display for Status {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One membership purchase row.
///
/// `unique_id` identifies the row. `member_id` identifies the person and repeats across
/// their purchases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
	pub unique_id: String,
	pub member_id: String,
	pub first_name: String,
	pub last_name: String,
	pub email: String,
	pub membership_name: String,
	pub end_date: String,
	pub location: String,
	pub sessions_left: i64,
	pub item_id: String,
	pub order_date: String,
	pub sold_by: String,
	pub membership_id: String,
	pub frozen: String,
	pub paid: String,
	pub status: Status,
	#[serde(default)]
	pub comments: String,
	#[serde(default)]
	pub notes: String,
	#[serde(default)]
	pub tags: Vec<String>,
}
impl MemberRecord {
	pub fn full_name(&self) -> String {
		format!("{} {}", self.first_name, self.last_name).trim().to_string()
	}

	pub fn has_sessions(&self) -> bool {
		self.sessions_left > 0
	}

	/// True when the location is a real facet value rather than blank or the sheet placeholder.
	pub fn has_location(&self) -> bool {
		let location = self.location.trim();

		!location.is_empty() && location != LOCATION_PLACEHOLDER
	}

	/// Overwrites all three annotation fields. Empty values clear.
	pub fn set_annotation(&mut self, annotation: &Annotation) {
		self.comments.clone_from(&annotation.comments);
		self.notes.clone_from(&annotation.notes);
		self.tags.clone_from(&annotation.tags);
	}

	/// Text fields visited by free-text search, in declaration order.
	pub(crate) fn text_fields(&self) -> [&str; 17] {
		[
			&self.unique_id,
			&self.member_id,
			&self.first_name,
			&self.last_name,
			&self.email,
			&self.membership_name,
			&self.end_date,
			&self.location,
			&self.item_id,
			&self.order_date,
			&self.sold_by,
			&self.membership_id,
			&self.frozen,
			&self.paid,
			self.status.as_str(),
			&self.comments,
			&self.notes,
		]
	}
}

/// Operator-entered notes attached to a member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
	#[serde(default)]
	pub comments: String,
	#[serde(default)]
	pub notes: String,
	#[serde(default)]
	pub tags: Vec<String>,
}
