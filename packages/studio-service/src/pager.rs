use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// "Showing `from` to `to` of `total`", 1-based and inclusive. Both bounds are zero when there
/// is nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
	pub from: usize,
	pub to: usize,
	pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
	pub items: &'a [T],
	pub page: usize,
	pub total_pages: usize,
	pub window: PageWindow,
}

/// Never less than one, so an empty collection still has an (empty) first page.
pub fn total_pages(len: usize, page_size: usize) -> usize {
	len.div_ceil(page_size.max(1)).max(1)
}

pub fn clamp_page(page: usize, len: usize, page_size: usize) -> usize {
	page.clamp(1, total_pages(len, page_size))
}

pub fn next_page(page: usize, len: usize, page_size: usize) -> usize {
	clamp_page(page.saturating_add(1), len, page_size)
}

pub fn previous_page(page: usize, len: usize, page_size: usize) -> usize {
	clamp_page(page.saturating_sub(1), len, page_size)
}

/// Slices out the 1-based `page`, clamping it into range first.
pub fn apply_page<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
	let page_size = page_size.max(1);
	let total_pages = total_pages(items.len(), page_size);
	let page = page.clamp(1, total_pages);
	let start = ((page - 1) * page_size).min(items.len());
	let end = (page * page_size).min(items.len());
	let window = if start == end {
		PageWindow { from: 0, to: 0, total: items.len() }
	} else {
		PageWindow { from: start + 1, to: end, total: items.len() }
	};

	Page { items: &items[start..end], page, total_pages, window }
}
