use time::{OffsetDateTime, macros::datetime};

use studio_domain::{Annotation, FilterSpec, QuickFilter, SessionsRange, Status};
use studio_service::{
	ChartLimits, Dashboard, SortDirection, SortField, SortKey, Surface, pager, pipeline, sort,
};
use studio_testkit::{MemberBuilder, numbered_records, unique_ids};

const NOW: OffsetDateTime = datetime!(2024-06-15 12:00 UTC);

fn ids<'a>(rows: &[&'a studio_domain::MemberRecord]) -> Vec<&'a str> {
	rows.iter().map(|record| record.unique_id.as_str()).collect()
}

#[test]
fn quick_then_structured_filter_selects_active_with_sessions() {
	let records = vec![
		MemberBuilder::new("first").status(Status::Active).sessions(5).build(),
		MemberBuilder::new("second").status(Status::Expired).sessions(0).build(),
		MemberBuilder::new("third").status(Status::Active).sessions(0).build(),
	];
	let spec = FilterSpec {
		sessions_range: SessionsRange { min: 1, max: 100 },
		..FilterSpec::default()
	};
	let working = pipeline::working_set(&records, &QuickFilter::Active, &spec, NOW);

	assert_eq!(ids(&working), vec!["first"]);

	let structured_first = pipeline::apply_filters(&records.iter().collect::<Vec<_>>(), &spec);
	let reversed: Vec<_> = structured_first
		.into_iter()
		.filter(|record| QuickFilter::Active.admits(record, NOW))
		.collect();

	assert_eq!(ids(&reversed), vec!["first"]);
}

#[test]
fn unconstrained_filter_and_blank_search_keep_everything() {
	let records = numbered_records(13);
	let refs: Vec<_> = records.iter().collect();

	assert_eq!(pipeline::apply_filters(&refs, &FilterSpec::default()).len(), 13);
	assert_eq!(pipeline::apply_search(&refs, "").len(), 13);
	assert_eq!(pipeline::apply_quick_filter(&records, &QuickFilter::parse("bogus"), NOW).len(), 13);
}

#[test]
fn end_date_descending_pages_of_ten() {
	let mut dashboard = Dashboard::default();

	dashboard.replace_records(numbered_records(25), NOW);

	let first = dashboard.table_view(Surface::Overview, NOW);

	assert_eq!(first.sort, SortKey::new(SortField::EndDate, SortDirection::Desc));
	assert_eq!(first.total_pages, 3);
	assert_eq!(first.rows.len(), 10);
	assert_eq!(first.rows[0].unique_id, "r25");
	assert_eq!(first.rows[9].unique_id, "r16");

	dashboard.set_page(Surface::Overview, 3, NOW);

	let last = dashboard.table_view(Surface::Overview, NOW);

	assert_eq!(last.page, 3);
	assert_eq!(ids(&last.rows), vec!["r05", "r04", "r03", "r02", "r01"]);
	assert_eq!(last.window.from, 21);
	assert_eq!(last.window.to, 25);
}

#[test]
fn annotation_applies_to_every_row_of_the_member() {
	let mut dashboard = Dashboard::default();

	dashboard.replace_records(
		vec![
			MemberBuilder::new("a").member_id("M1").build(),
			MemberBuilder::new("b").member_id("M1").sessions(4).build(),
			MemberBuilder::new("c").member_id("M2").build(),
		],
		NOW,
	);

	let untouched = dashboard.store().records()[2].clone();
	let annotation = Annotation {
		comments: "VIP".to_string(),
		notes: String::new(),
		tags: vec!["gold".to_string()],
	};

	assert_eq!(dashboard.annotate("M1", &annotation, NOW), 2);

	let after_once = dashboard.store().records().to_vec();

	for record in &after_once[..2] {
		assert_eq!(record.comments, "VIP");
		assert_eq!(record.tags, vec!["gold".to_string()]);
	}

	assert_eq!(after_once[1].sessions_left, 4);
	assert_eq!(after_once[2], untouched);

	dashboard.annotate("M1", &annotation, NOW);

	assert_eq!(dashboard.store().records(), after_once.as_slice());
	assert_eq!(dashboard.annotate("nobody", &annotation, NOW), 0);
	assert_eq!(dashboard.store().records(), after_once.as_slice());
}

#[test]
fn annotations_become_searchable() {
	let mut dashboard = Dashboard::default();

	dashboard.replace_records(numbered_records(3), NOW);
	dashboard.annotate(
		"M-r02",
		&Annotation { tags: vec!["Platinum".to_string()], ..Annotation::default() },
		NOW,
	);
	dashboard.set_search(Surface::Overview, "platinum", NOW);

	let view = dashboard.table_view(Surface::Overview, NOW);

	assert_eq!(ids(&view.rows), vec!["r02"]);
	assert_eq!(view.total_before_search, 3);
	assert_eq!(view.total_matching, 1);
}

#[test]
fn sort_is_stable_and_reversible() {
	let records = vec![
		MemberBuilder::new("a").sessions(2).build(),
		MemberBuilder::new("b").sessions(1).build(),
		MemberBuilder::new("c").sessions(2).build(),
		MemberBuilder::new("d").sessions(1).build(),
		MemberBuilder::new("e").sessions(3).build(),
	];
	let mut asc: Vec<_> = records.iter().collect();

	sort::apply_sort(&mut asc, SortKey::new(SortField::SessionsLeft, SortDirection::Asc));

	assert_eq!(ids(&asc), vec!["b", "d", "a", "c", "e"]);

	let mut again = asc.clone();

	sort::apply_sort(&mut again, SortKey::new(SortField::SessionsLeft, SortDirection::Asc));

	assert_eq!(ids(&again), ids(&asc));

	let mut desc: Vec<_> = records.iter().collect();

	sort::apply_sort(&mut desc, SortKey::new(SortField::SessionsLeft, SortDirection::Desc));

	assert_eq!(ids(&desc), vec!["e", "a", "c", "b", "d"]);
}

#[test]
fn header_clicks_toggle_direction() {
	let mut dashboard = Dashboard::default();

	dashboard.replace_records(numbered_records(3), NOW);
	dashboard.toggle_sort(Surface::Overview, SortField::EndDate);

	let view = dashboard.table_view(Surface::Overview, NOW);

	assert_eq!(view.sort.direction, SortDirection::Asc);
	assert_eq!(ids(&view.rows), vec!["r01", "r02", "r03"]);

	dashboard.toggle_sort(Surface::Overview, SortField::FirstName);

	assert_eq!(
		dashboard.table_state(Surface::Overview).sort,
		SortKey::new(SortField::FirstName, SortDirection::Asc)
	);
}

#[test]
fn shrinking_results_reclamps_the_page() {
	let mut dashboard = Dashboard::default();

	dashboard.replace_records(numbered_records(25), NOW);
	dashboard.set_page(Surface::Overview, 3, NOW);

	assert_eq!(dashboard.table_state(Surface::Overview).page, 3);

	let spec = FilterSpec {
		sessions_range: SessionsRange { min: 1, max: 1 },
		..FilterSpec::default()
	};

	dashboard.set_filter(spec, NOW);

	let view = dashboard.table_view(Surface::Overview, NOW);

	assert_eq!(view.total_matching, 7);
	assert_eq!(view.total_pages, 1);
	assert_eq!(view.page, 1);
	assert_eq!(dashboard.table_state(Surface::Overview).page, 1);
	assert_eq!(view.rows.len(), 7);
}

#[test]
fn navigation_stops_at_the_ends() {
	let mut dashboard = Dashboard::default();

	dashboard.replace_records(numbered_records(15), NOW);
	dashboard.previous_page(Surface::Overview, NOW);

	assert_eq!(dashboard.table_state(Surface::Overview).page, 1);

	dashboard.next_page(Surface::Overview, NOW);
	dashboard.next_page(Surface::Overview, NOW);

	assert_eq!(dashboard.table_state(Surface::Overview).page, 2);
}

#[test]
fn new_search_returns_to_first_page() {
	let mut dashboard = Dashboard::default();

	dashboard.replace_records(numbered_records(25), NOW);
	dashboard.set_page(Surface::Overview, 2, NOW);
	dashboard.set_search(Surface::Overview, "test", NOW);

	assert_eq!(dashboard.table_state(Surface::Overview).page, 1);
	assert_eq!(dashboard.table_view(Surface::Overview, NOW).total_matching, 25);
}

#[test]
fn surfaces_keep_independent_state() {
	let mut dashboard = Dashboard::default();

	dashboard.replace_records(
		vec![
			MemberBuilder::new("a").status(Status::Active).sessions(2).build(),
			MemberBuilder::new("b").status(Status::Expired).sessions(0).build(),
			MemberBuilder::new("c").status(Status::Active).sessions(0).build(),
		],
		NOW,
	);
	dashboard.set_search(Surface::Active, "member a", NOW);

	assert_eq!(ids(&dashboard.table_view(Surface::Active, NOW).rows), vec!["a"]);
	assert_eq!(dashboard.table_view(Surface::Expired, NOW).total_matching, 1);
	assert_eq!(dashboard.table_view(Surface::WithSessions, NOW).total_matching, 1);
	assert_eq!(dashboard.table_view(Surface::NoSessions, NOW).total_matching, 2);
	assert_eq!(dashboard.table_view(Surface::Overview, NOW).total_matching, 3);
}

#[test]
fn clearing_filters_keeps_the_quick_filter() {
	let mut dashboard = Dashboard::default();
	let mut spec = FilterSpec::default();

	spec.toggle_location("Bandra");
	dashboard.set_quick_filter(QuickFilter::Expired, NOW);
	dashboard.set_filter(spec, NOW);
	dashboard.clear_filters(NOW);

	assert!(dashboard.filter().is_unconstrained());
	assert_eq!(dashboard.quick_filter(), &QuickFilter::Expired);
}

#[test]
fn summary_separates_store_wide_and_working_set_figures() {
	let mut dashboard = Dashboard::new(10, ChartLimits::default());

	dashboard.replace_records(
		vec![
			MemberBuilder::new("a").status(Status::Active).sessions(5).location("Bandra").build(),
			MemberBuilder::new("b").status(Status::Expired).sessions(0).location("-").build(),
			MemberBuilder::new("c")
				.status(Status::Active)
				.sessions(0)
				.location("Kemps Corner")
				.order_date("2024-06-14")
				.build(),
		],
		NOW,
	);
	dashboard.set_quick_filter(QuickFilter::Active, NOW);

	let summary = dashboard.summary(NOW);

	assert_eq!(summary.quick_filter, "active");
	assert_eq!(summary.total_records, 3);
	assert_eq!(summary.working_records, 2);
	assert_eq!(summary.headline.total_members, 3);
	assert_eq!(summary.headline.expired_members, 1);
	assert_eq!(summary.headline.total_sessions, 5);
	assert_eq!(summary.facets.locations, vec!["Bandra".to_string(), "Kemps Corner".to_string()]);

	let status_total: usize = summary.charts.status.iter().map(|bucket| bucket.count).sum();

	assert_eq!(status_total, summary.working_records);
	assert_eq!(summary.charts.sessions.total, 5);
	assert_eq!(summary.charts.sessions.average, 3);

	let counts: Vec<_> = summary
		.quick_filters
		.iter()
		.map(|count| (count.token.as_str(), count.count))
		.collect();

	assert_eq!(
		counts,
		vec![
			("all", 3),
			("active", 2),
			("expired", 1),
			("sessions", 1),
			("no-sessions", 2),
			("recent", 1),
			("weekly", 1),
			("expiring", 0),
			("location-Bandra", 1),
			("location-Kemps Corner", 1),
		]
	);
}

#[test]
fn empty_store_degrades_gracefully() {
	let dashboard = Dashboard::default();
	let view = dashboard.table_view(Surface::Overview, NOW);
	let summary = dashboard.summary(NOW);

	assert!(view.rows.is_empty());
	assert_eq!(view.total_pages, 1);
	assert_eq!(summary.charts.sessions.average, 0);
	assert!(summary.charts.status.is_empty());
	assert!(summary.facets.locations.is_empty());
}

#[test]
fn page_sizes_follow_configuration() {
	let records = numbered_records(7);
	let page = pager::apply_page(&records, 2, 3);

	assert_eq!(unique_ids(page.items), vec!["r04", "r05", "r06"]);
	assert_eq!(page.total_pages, 3);
}

#[test]
fn views_serialize_for_presentation() {
	let mut dashboard = Dashboard::default();

	dashboard.replace_records(numbered_records(2), NOW);

	let view = serde_json::to_value(dashboard.table_view(Surface::WithSessions, NOW))
		.expect("serialize failed");

	assert_eq!(view["surface"], "with-sessions");
	assert_eq!(view["sort"]["field"], "endDate");
	assert_eq!(view["sort"]["direction"], "desc");
	assert_eq!(view["rows"][0]["uniqueId"], "r02");
}

#[test]
fn summary_survives_absurd_session_cells() {
	let header = ["Unique Id", "Status", "Sessions Left"].map(serde_json::Value::from).to_vec();
	let row = |id: &str, sessions: &str| {
		vec![serde_json::json!(id), serde_json::json!("Active"), serde_json::json!(sessions)]
	};
	let report = studio_providers::ingest::ingest_rows(&[
		header,
		row("a", "1e30"),
		row("b", "5"),
		row("c", "9223372036854775807"),
		row("d", "9223372036854775807"),
	])
	.expect("ingest failed");
	let mut dashboard = Dashboard::default();

	assert_eq!(report.issues.len(), 1);

	dashboard.replace_records(report.records, NOW);

	let summary = dashboard.summary(NOW);

	assert_eq!(summary.headline.total_members, 4);
	assert_eq!(summary.headline.total_sessions, i64::MAX);
}
