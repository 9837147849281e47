use std::cmp::Ordering;

use serde::Serialize;

use studio_domain::MemberRecord;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
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
impl SortField {
	pub const ALL: [SortField; 16] = [
		SortField::UniqueId,
		SortField::MemberId,
		SortField::FirstName,
		SortField::LastName,
		SortField::Email,
		SortField::MembershipName,
		SortField::EndDate,
		SortField::Location,
		SortField::SessionsLeft,
		SortField::ItemId,
		SortField::OrderDate,
		SortField::SoldBy,
		SortField::MembershipId,
		SortField::Frozen,
		SortField::Paid,
		SortField::Status,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::UniqueId => "uniqueId",
			Self::MemberId => "memberId",
			Self::FirstName => "firstName",
			Self::LastName => "lastName",
			Self::Email => "email",
			Self::MembershipName => "membershipName",
			Self::EndDate => "endDate",
			Self::Location => "location",
			Self::SessionsLeft => "sessionsLeft",
			Self::ItemId => "itemId",
			Self::OrderDate => "orderDate",
			Self::SoldBy => "soldBy",
			Self::MembershipId => "membershipId",
			Self::Frozen => "frozen",
			Self::Paid => "paid",
			Self::Status => "status",
		}
	}

	pub fn parse(raw: &str) -> Result<Self> {
		let raw = raw.trim();

		Self::ALL
			.into_iter()
			.find(|field| field.as_str().eq_ignore_ascii_case(raw))
			.ok_or_else(|| Error::InvalidRequest {
				message: format!("Unknown sort field '{raw}'."),
			})
	}

	/// Natural ordering of the field: numeric for `sessionsLeft`, byte-wise on the stored text
	/// for everything else, dates included.
	pub fn compare(&self, a: &MemberRecord, b: &MemberRecord) -> Ordering {
		match self {
			Self::SessionsLeft => a.sessions_left.cmp(&b.sessions_left),
			Self::Status => a.status.as_str().cmp(b.status.as_str()),
			_ => self.text(a).cmp(self.text(b)),
		}
	}

	fn text<'a>(&self, record: &'a MemberRecord) -> &'a str {
		match self {
			Self::UniqueId => &record.unique_id,
			Self::MemberId => &record.member_id,
			Self::FirstName => &record.first_name,
			Self::LastName => &record.last_name,
			Self::Email => &record.email,
			Self::MembershipName => &record.membership_name,
			Self::EndDate => &record.end_date,
			Self::Location => &record.location,
			Self::ItemId => &record.item_id,
			Self::OrderDate => &record.order_date,
			Self::SoldBy => &record.sold_by,
			Self::MembershipId => &record.membership_id,
			Self::Frozen => &record.frozen,
			Self::Paid => &record.paid,
			Self::Status => record.status.as_str(),
			Self::SessionsLeft => "",
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	#[default]
	Asc,
	Desc,
}
impl SortDirection {
	pub fn flipped(self) -> Self {
		match self {
			Self::Asc => Self::Desc,
			Self::Desc => Self::Asc,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortKey {
	pub field: SortField,
	pub direction: SortDirection,
}
impl SortKey {
	pub fn new(field: SortField, direction: SortDirection) -> Self {
		Self { field, direction }
	}

	/// Header-click behavior: the same field flips direction, a new field starts ascending.
	pub fn toggled(self, field: SortField) -> Self {
		if field == self.field {
			Self { field, direction: self.direction.flipped() }
		} else {
			Self { field, direction: SortDirection::Asc }
		}
	}
}
impl Default for SortKey {
	fn default() -> Self {
		Self { field: SortField::EndDate, direction: SortDirection::Desc }
	}
}

/// Stable sort, so records with equal keys keep their incoming order in both directions.
pub fn apply_sort(records: &mut [&MemberRecord], key: SortKey) {
	match key.direction {
		SortDirection::Asc => records.sort_by(|a, b| key.field.compare(a, b)),
		SortDirection::Desc => records.sort_by(|a, b| key.field.compare(b, a)),
	}
}
