use std::collections::VecDeque;

use serde::Serialize;
use time::OffsetDateTime;

use studio_domain::{Annotation, FilterSpec, MemberRecord, QuickFilter};

use crate::{
	aggregate::{self, ChartLimits, ChartSummary, Facets, HeadlineMetrics, QuickFilterCount},
	pager::{self, DEFAULT_PAGE_SIZE},
	pipeline,
	sort::SortField,
	store::RecordStore,
	table::{self, Surface, TableState, TableView},
};

/// Non-blocking operator notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
	Refreshed { count: usize },
	FetchFailed { message: String },
	UsingSample { count: usize },
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
	pub quick_filter: String,
	pub total_records: usize,
	pub working_records: usize,
	pub headline: HeadlineMetrics,
	pub quick_filters: Vec<QuickFilterCount>,
	pub charts: ChartSummary,
	pub facets: Facets,
}

/// All view state for one operator session.
///
/// Every control is a synchronous mutation; every view is recomputed from current state on
/// request. Page numbers are re-clamped after any change that can shrink a table.
#[derive(Debug)]
pub struct Dashboard {
	store: RecordStore,
	filter: FilterSpec,
	quick: QuickFilter,
	tables: [TableState; 5],
	page_size: usize,
	limits: ChartLimits,
	notices: VecDeque<Notice>,
}
impl Dashboard {
	pub fn new(page_size: usize, limits: ChartLimits) -> Self {
		Self {
			store: RecordStore::default(),
			filter: FilterSpec::default(),
			quick: QuickFilter::All,
			tables: Default::default(),
			page_size: page_size.max(1),
			limits,
			notices: VecDeque::new(),
		}
	}

	pub fn from_config(cfg: &studio_config::Config) -> Self {
		Self::new(cfg.table.page_size, ChartLimits::from(&cfg.charts))
	}

	pub fn store(&self) -> &RecordStore {
		&self.store
	}

	pub fn filter(&self) -> &FilterSpec {
		&self.filter
	}

	pub fn quick_filter(&self) -> &QuickFilter {
		&self.quick
	}

	pub fn page_size(&self) -> usize {
		self.page_size
	}

	pub fn table_state(&self, surface: Surface) -> &TableState {
		&self.tables[surface.index()]
	}

	pub fn replace_records(&mut self, records: Vec<MemberRecord>, now: OffsetDateTime) {
		self.store.replace(records);
		self.clamp_pages(now);
	}

	pub fn set_filter(&mut self, spec: FilterSpec, now: OffsetDateTime) {
		self.filter = spec;
		self.clamp_pages(now);
	}

	/// Resets the structured filter only. The quick filter stays as it is.
	pub fn clear_filters(&mut self, now: OffsetDateTime) {
		self.set_filter(FilterSpec::default(), now);
	}

	pub fn set_quick_filter(&mut self, quick: QuickFilter, now: OffsetDateTime) {
		self.quick = quick;
		self.clamp_pages(now);
	}

	pub fn set_search(&mut self, surface: Surface, term: &str, now: OffsetDateTime) {
		self.tables[surface.index()].set_search(term);
		self.clamp_pages(now);
	}

	pub fn toggle_sort(&mut self, surface: Surface, field: SortField) {
		self.tables[surface.index()].toggle_sort(field);
	}

	pub fn set_page(&mut self, surface: Surface, page: usize, now: OffsetDateTime) {
		let len = self.matching_len(surface, now);
		let state = &mut self.tables[surface.index()];

		state.page = pager::clamp_page(page, len, self.page_size);
	}

	pub fn next_page(&mut self, surface: Surface, now: OffsetDateTime) {
		let len = self.matching_len(surface, now);
		let state = &mut self.tables[surface.index()];

		state.page = pager::next_page(state.page, len, self.page_size);
	}

	pub fn previous_page(&mut self, surface: Surface, now: OffsetDateTime) {
		let len = self.matching_len(surface, now);
		let state = &mut self.tables[surface.index()];

		state.page = pager::previous_page(state.page, len, self.page_size);
	}

	/// Writes the annotation to every row of the member. Returns how many rows changed.
	pub fn annotate(
		&mut self,
		member_id: &str,
		annotation: &Annotation,
		now: OffsetDateTime,
	) -> usize {
		let matched = self.store.annotate(member_id, annotation);

		if matched > 0 {
			self.clamp_pages(now);
		}

		matched
	}

	pub fn push_notice(&mut self, notice: Notice) {
		self.notices.push_back(notice);
	}

	pub fn drain_notices(&mut self) -> Vec<Notice> {
		self.notices.drain(..).collect()
	}

	/// Quick filter then structured filter over the whole store. Feeds charts and tables.
	pub fn working_set(&self, now: OffsetDateTime) -> Vec<&MemberRecord> {
		pipeline::working_set(self.store.records(), &self.quick, &self.filter, now)
	}

	pub fn table_view(&self, surface: Surface, now: OffsetDateTime) -> TableView<'_> {
		let working = self.working_set(now);

		table::build_view(surface, self.table_state(surface), &working, self.page_size)
	}

	pub fn summary(&self, now: OffsetDateTime) -> DashboardSummary {
		let records = self.store.records();
		let working = self.working_set(now);
		let facets = aggregate::facets(records);

		DashboardSummary {
			quick_filter: self.quick.token(),
			total_records: records.len(),
			working_records: working.len(),
			headline: aggregate::headline_metrics(records),
			quick_filters: aggregate::quick_filter_counts(records, &facets, self.limits, now),
			charts: aggregate::aggregate(&working, self.limits),
			facets,
		}
	}

	fn matching_len(&self, surface: Surface, now: OffsetDateTime) -> usize {
		table::matching_len(surface, self.table_state(surface), &self.working_set(now))
	}

	fn clamp_pages(&mut self, now: OffsetDateTime) {
		let lens: Vec<usize> = {
			let working = self.working_set(now);

			Surface::ALL
				.iter()
				.map(|surface| table::matching_len(*surface, self.table_state(*surface), &working))
				.collect()
		};

		for (state, len) in self.tables.iter_mut().zip(lens) {
			state.clamp(len, self.page_size);
		}
	}
}
impl Default for Dashboard {
	fn default() -> Self {
		Self::new(DEFAULT_PAGE_SIZE, ChartLimits::default())
	}
}
