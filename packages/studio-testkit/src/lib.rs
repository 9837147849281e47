//! Record fixtures shared by the workspace's tests.

use time::{Date, Duration, macros::date};

use studio_domain::{MemberRecord, Status, date::format_date};

const BASE_DATE: Date = date!(2024-01-01);

pub struct MemberBuilder {
	record: MemberRecord,
}
impl MemberBuilder {
	pub fn new(unique_id: &str) -> Self {
		Self {
			record: MemberRecord {
				unique_id: unique_id.to_string(),
				member_id: format!("M-{unique_id}"),
				first_name: "Test".to_string(),
				last_name: format!("Member {unique_id}"),
				email: format!("{unique_id}@example.com"),
				membership_name: "Studio 8 Class Package".to_string(),
				end_date: format_date(BASE_DATE),
				location: "Kwality House, Kemps Corner".to_string(),
				sessions_left: 0,
				item_id: format!("I-{unique_id}"),
				order_date: format_date(BASE_DATE - Duration::days(30)),
				sold_by: "Front Desk".to_string(),
				membership_id: format!("MS-{unique_id}"),
				frozen: "No".to_string(),
				paid: "Yes".to_string(),
				status: Status::Active,
				comments: String::new(),
				notes: String::new(),
				tags: Vec::new(),
			},
		}
	}

	pub fn member_id(mut self, member_id: &str) -> Self {
		self.record.member_id = member_id.to_string();

		self
	}

	pub fn name(mut self, first_name: &str, last_name: &str) -> Self {
		self.record.first_name = first_name.to_string();
		self.record.last_name = last_name.to_string();

		self
	}

	pub fn status(mut self, status: Status) -> Self {
		self.record.status = status;

		self
	}

	pub fn sessions(mut self, sessions_left: i64) -> Self {
		self.record.sessions_left = sessions_left;

		self
	}

	pub fn membership(mut self, membership_name: &str) -> Self {
		self.record.membership_name = membership_name.to_string();

		self
	}

	pub fn location(mut self, location: &str) -> Self {
		self.record.location = location.to_string();

		self
	}

	pub fn end_date(mut self, end_date: &str) -> Self {
		self.record.end_date = end_date.to_string();

		self
	}

	pub fn order_date(mut self, order_date: &str) -> Self {
		self.record.order_date = order_date.to_string();

		self
	}

	pub fn build(self) -> MemberRecord {
		self.record
	}
}

/// `count` active records with ids "r01", "r02", ... whose end dates increase one day apart,
/// so record `n` ends on 2024-01-01 plus `n` days.
pub fn numbered_records(count: usize) -> Vec<MemberRecord> {
	(1..=count)
		.map(|n| {
			let end = BASE_DATE + Duration::days(n as i64);

			MemberBuilder::new(&format!("r{n:02}"))
				.sessions((n % 4) as i64)
				.end_date(&format_date(end))
				.build()
		})
		.collect()
}

pub fn unique_ids(records: &[MemberRecord]) -> Vec<&str> {
	records.iter().map(|record| record.unique_id.as_str()).collect()
}
