pub mod aggregate;
pub mod annotate;
pub mod dashboard;
pub mod pager;
pub mod pipeline;
pub mod refresh;
pub mod sort;
pub mod store;
pub mod table;

mod error;

pub use aggregate::{
	Bucket, ChartLimits, ChartSummary, Facets, HeadlineMetrics, LabeledBucket, QuickFilterCount,
	SessionSummary,
};
pub use dashboard::{Dashboard, DashboardSummary, Notice};
pub use error::{Error, Result};
pub use pager::{DEFAULT_PAGE_SIZE, Page, PageWindow};
pub use refresh::{
	BoxFuture, RecordSource, RefreshOutcome, Refresher, SampleSource, SheetSource, Trigger,
};
pub use sort::{SortDirection, SortField, SortKey};
pub use store::RecordStore;
pub use table::{Surface, TableState, TableView};
