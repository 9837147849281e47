//! Plain-text output for the operator commands.

use studio_domain::{MemberRecord, date, quick_filter};
use studio_service::{DashboardSummary, Notice, PageWindow, TableView, aggregate};

// Column text limits, three short of the column width to leave room for "...".
const NAME_CHARS: usize = 19;
const MEMBERSHIP_CHARS: usize = 21;
const LOCATION_CHARS: usize = 13;

pub fn notice(notice: &Notice) -> String {
	match notice {
		Notice::Refreshed { count } => format!("Refreshed: {count} records loaded."),
		Notice::FetchFailed { message } => format!("Refresh error: {message}"),
		Notice::UsingSample { count } =>
			format!("Could not reach the sheet. Showing {count} sample records."),
	}
}

pub fn summary(summary: &DashboardSummary) -> String {
	let headline = &summary.headline;
	let sessions = &summary.charts.sessions;
	let mut lines = vec![
		format!(
			"Members: {} total, {} active, {} expired, {} sessions left",
			headline.total_members,
			headline.active_members,
			headline.expired_members,
			headline.total_sessions,
		),
		format!(
			"Working set: {} of {} records (quick filter: {})",
			summary.working_records, summary.total_records, summary.quick_filter,
		),
		String::new(),
		"Quick filters".to_string(),
	];

	for count in &summary.quick_filters {
		lines.push(format!("  {:<24} {:<16} {:>6}", count.token, count.label, count.count));
	}

	lines.push(String::new());
	lines.push("Status".to_string());

	for bucket in &summary.charts.status {
		lines.push(format!("  {:<24} {:>6}", bucket.name, bucket.count));
	}

	lines.push(String::new());
	lines.push("Membership types".to_string());

	for bucket in &summary.charts.membership_types {
		lines.push(format!("  {:<24} {:>6}", bucket.label, bucket.count));
	}

	lines.push(String::new());
	lines.push("Locations".to_string());

	for bucket in &summary.charts.locations {
		lines.push(format!("  {:<24} {:>6}", bucket.name, bucket.count));
	}

	lines.push(String::new());
	lines.push(format!(
		"Sessions: {} with, {} without, {} total, {} average",
		sessions.with_sessions, sessions.without_sessions, sessions.total, sessions.average,
	));

	finish(lines)
}

pub fn table(view: &TableView<'_>) -> String {
	let mut lines = vec![format!(
		"{} (sort: {} {}{})",
		view.title,
		view.sort.field.as_str(),
		match view.sort.direction {
			studio_service::SortDirection::Asc => "asc",
			studio_service::SortDirection::Desc => "desc",
		},
		if view.search.is_empty() {
			String::new()
		} else {
			format!(", search: {:?}", view.search)
		},
	)];

	if view.rows.is_empty() {
		lines.push("No members found.".to_string());

		return finish(lines);
	}

	lines.push(window(&view.window));
	lines.push(format!(
		"{:<10} {:<22} {:<24} {:<10} {:<16} {:>8} {:<8} TAGS",
		"ID", "NAME", "MEMBERSHIP", "END DATE", "LOCATION", "SESSIONS", "STATUS",
	));

	for record in &view.rows {
		lines.push(row(record));
	}

	lines.push(format!("Page {} of {}", view.page, view.total_pages));

	finish(lines)
}

/// Annotated rows of one member.
pub fn annotations(records: &[&MemberRecord]) -> String {
	let mut lines = Vec::new();

	for record in records {
		lines.push(format!(
			"{} {} ({})",
			record.unique_id,
			record.full_name(),
			record.membership_name
		));

		if !record.comments.is_empty() {
			lines.push(format!("  comments: {}", record.comments));
		}
		if !record.notes.is_empty() {
			lines.push(format!("  notes: {}", record.notes));
		}
		if !record.tags.is_empty() {
			lines.push(format!("  tags: {}", record.tags.join(", ")));
		}
	}

	finish(lines)
}

pub fn window(window: &PageWindow) -> String {
	format!("Showing {} to {} of {}", window.from, window.to, window.total)
}

fn row(record: &MemberRecord) -> String {
	let end_date = date::parse_date(&record.end_date)
		.map(date::format_date)
		.unwrap_or_else(|| record.end_date.clone());

	format!(
		"{:<10} {:<22} {:<24} {:<10} {:<16} {:>8} {:<8} {}",
		record.unique_id,
		aggregate::truncate_label(&record.full_name(), NAME_CHARS),
		aggregate::truncate_label(&record.membership_name, MEMBERSHIP_CHARS),
		end_date,
		aggregate::truncate_label(quick_filter::short_location(&record.location), LOCATION_CHARS),
		record.sessions_left,
		record.status.as_str(),
		record.tags.join(","),
	)
}

fn finish(lines: Vec<String>) -> String {
	let mut out = lines.join("\n");

	out.push('\n');

	out
}

#[cfg(test)]
mod tests {
	use time::{OffsetDateTime, macros::datetime};

	use studio_service::{Dashboard, Surface};
	use studio_testkit::{MemberBuilder, numbered_records};

	use super::*;

	const NOW: OffsetDateTime = datetime!(2024-06-15 12:00 UTC);

	#[test]
	fn last_page_reports_its_window() {
		let mut dashboard = Dashboard::default();

		dashboard.replace_records(numbered_records(25), NOW);
		dashboard.set_page(Surface::Overview, 3, NOW);

		let text = table(&dashboard.table_view(Surface::Overview, NOW));

		assert!(text.starts_with("All Members Overview (sort: endDate desc)\n"));
		assert!(text.contains("Showing 21 to 25 of 25\n"));
		assert!(text.ends_with("Page 3 of 3\n"));
	}

	#[test]
	fn empty_table_says_so() {
		let mut dashboard = Dashboard::default();

		dashboard.replace_records(numbered_records(2), NOW);
		dashboard.set_search(Surface::Overview, "nobody matches this", NOW);

		let text = table(&dashboard.table_view(Surface::Overview, NOW));

		assert!(text.contains("search: \"nobody matches this\""));
		assert!(text.ends_with("No members found.\n"));
	}

	#[test]
	fn rows_use_short_locations_and_truncated_names() {
		let record = MemberBuilder::new("r1")
			.name("Alexandria", "Montgomery-Wellington")
			.location("Kwality House, Kemps Corner")
			.end_date("2024-03-01T10:00:00Z")
			.build();
		let text = row(&record);

		assert!(text.contains("Alexandria Montgome..."));
		assert!(text.contains("Kwality House"));
		assert!(!text.contains("Kemps Corner"));
		assert!(text.contains("2024-03-01 "));
	}

	#[test]
	fn notices_read_as_sentences() {
		assert_eq!(notice(&Notice::Refreshed { count: 3 }), "Refreshed: 3 records loaded.");
		assert_eq!(
			notice(&Notice::FetchFailed { message: "Fetch failed: 403".to_string() }),
			"Refresh error: Fetch failed: 403"
		);
	}
}
