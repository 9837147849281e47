use serde::Serialize;

use studio_domain::{MemberRecord, Status};

use crate::{
	Error, Result,
	pager::{self, PageWindow},
	pipeline,
	sort::{self, SortField, SortKey},
};

/// A table over a slice of the working set. Each surface keeps its own search, sort and page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Surface {
	Overview,
	Active,
	Expired,
	WithSessions,
	NoSessions,
}
impl Surface {
	pub const ALL: [Surface; 5] = [
		Surface::Overview,
		Surface::Active,
		Surface::Expired,
		Surface::WithSessions,
		Surface::NoSessions,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Overview => "overview",
			Self::Active => "active",
			Self::Expired => "expired",
			Self::WithSessions => "with-sessions",
			Self::NoSessions => "no-sessions",
		}
	}

	pub fn title(&self) -> &'static str {
		match self {
			Self::Overview => "All Members Overview",
			Self::Active => "Active Members",
			Self::Expired => "Expired Members",
			Self::WithSessions => "Members with Remaining Sessions",
			Self::NoSessions => "Members with No Sessions",
		}
	}

	pub fn parse(raw: &str) -> Result<Self> {
		let raw = raw.trim();

		Self::ALL
			.into_iter()
			.find(|surface| surface.as_str().eq_ignore_ascii_case(raw))
			.ok_or_else(|| Error::InvalidRequest { message: format!("Unknown surface '{raw}'.") })
	}

	pub fn admits(&self, record: &MemberRecord) -> bool {
		match self {
			Self::Overview => true,
			Self::Active => record.status == Status::Active,
			Self::Expired => record.status == Status::Expired,
			Self::WithSessions => record.has_sessions(),
			Self::NoSessions => record.sessions_left == 0,
		}
	}

	pub(crate) fn index(&self) -> usize {
		match self {
			Self::Overview => 0,
			Self::Active => 1,
			Self::Expired => 2,
			Self::WithSessions => 3,
			Self::NoSessions => 4,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
	pub search: String,
	pub sort: SortKey,
	pub page: usize,
}
impl TableState {
	/// A new search starts from the first page.
	pub fn set_search(&mut self, term: &str) {
		if self.search != term {
			self.search = term.to_string();
			self.page = 1;
		}
	}

	pub fn toggle_sort(&mut self, field: SortField) {
		self.sort = self.sort.toggled(field);
	}

	pub fn clamp(&mut self, len: usize, page_size: usize) {
		self.page = pager::clamp_page(self.page, len, page_size);
	}
}
impl Default for TableState {
	fn default() -> Self {
		Self { search: String::new(), sort: SortKey::default(), page: 1 }
	}
}

#[derive(Debug, Clone, Serialize)]
pub struct TableView<'a> {
	pub surface: Surface,
	pub title: &'static str,
	pub search: String,
	pub sort: SortKey,
	/// Records on this surface before the search term is applied.
	pub total_before_search: usize,
	pub total_matching: usize,
	pub page: usize,
	pub total_pages: usize,
	pub window: PageWindow,
	pub rows: Vec<&'a MemberRecord>,
}

/// Surface predicate, search, sort, then page.
pub fn build_view<'a>(
	surface: Surface,
	state: &TableState,
	working: &[&'a MemberRecord],
	page_size: usize,
) -> TableView<'a> {
	let base: Vec<&MemberRecord> =
		working.iter().copied().filter(|record| surface.admits(record)).collect();
	let mut matching = pipeline::apply_search(&base, &state.search);

	sort::apply_sort(&mut matching, state.sort);

	let page = pager::apply_page(&matching, state.page, page_size);

	TableView {
		surface,
		title: surface.title(),
		search: state.search.clone(),
		sort: state.sort,
		total_before_search: base.len(),
		total_matching: matching.len(),
		page: page.page,
		total_pages: page.total_pages,
		window: page.window,
		rows: page.items.to_vec(),
	}
}

/// Number of rows a surface would show across all pages.
pub fn matching_len(surface: Surface, state: &TableState, working: &[&MemberRecord]) -> usize {
	let base: Vec<&MemberRecord> =
		working.iter().copied().filter(|record| surface.admits(record)).collect();

	pipeline::apply_search(&base, &state.search).len()
}
