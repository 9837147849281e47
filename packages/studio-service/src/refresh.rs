//! Fetch-then-replace scheduling.
//!
//! A refresh either swaps the whole store or leaves it alone and queues a notice. At most one
//! fetch is in flight; a tick or manual trigger that arrives meanwhile is skipped.

use std::{
	future::Future,
	path::PathBuf,
	pin::Pin,
	sync::{
		Arc, Mutex,
		atomic::{AtomicBool, Ordering},
	},
	time::Duration,
};

use time::OffsetDateTime;
use tokio::{
	sync::mpsc,
	time::{self as tokio_time, MissedTickBehavior},
};

use studio_providers::{IngestReport, sample, sheets};

use crate::{
	Error, Result,
	dashboard::{Dashboard, Notice},
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait RecordSource
where
	Self: Send + Sync,
{
	fn fetch(&self) -> BoxFuture<'_, Result<IngestReport>>;
}

/// The configured spreadsheet range.
pub struct SheetSource {
	cfg: studio_config::Source,
}
impl SheetSource {
	pub fn new(cfg: studio_config::Source) -> Self {
		Self { cfg }
	}
}
impl RecordSource for SheetSource {
	fn fetch(&self) -> BoxFuture<'_, Result<IngestReport>> {
		Box::pin(async move { Ok(sheets::fetch(&self.cfg).await?) })
	}
}

/// A JSON file of records, used as the first-load fallback.
pub struct SampleSource {
	path: PathBuf,
}
impl SampleSource {
	pub fn new(path: PathBuf) -> Self {
		Self { path }
	}
}
impl RecordSource for SampleSource {
	fn fetch(&self) -> BoxFuture<'_, Result<IngestReport>> {
		Box::pin(async move { Ok(sample::load(&self.path).await?) })
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
	Initial,
	Periodic,
	Manual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
	Replaced { count: usize, skipped_rows: usize },
	FellBack { count: usize },
	Failed { message: String },
	Skipped,
}

pub struct Refresher {
	source: Arc<dyn RecordSource>,
	fallback: Option<Arc<dyn RecordSource>>,
	dashboard: Arc<Mutex<Dashboard>>,
	in_flight: AtomicBool,
}
impl Refresher {
	pub fn new(source: Arc<dyn RecordSource>, dashboard: Arc<Mutex<Dashboard>>) -> Self {
		Self { source, fallback: None, dashboard, in_flight: AtomicBool::new(false) }
	}

	pub fn from_config(cfg: &studio_config::Source, dashboard: Arc<Mutex<Dashboard>>) -> Self {
		let refresher = Self::new(Arc::new(SheetSource::new(cfg.clone())), dashboard);

		match cfg.sample_path.clone() {
			Some(path) => refresher.with_fallback(Arc::new(SampleSource::new(path))),
			None => refresher,
		}
	}

	pub fn with_fallback(mut self, fallback: Arc<dyn RecordSource>) -> Self {
		self.fallback = Some(fallback);

		self
	}

	pub fn dashboard(&self) -> &Arc<Mutex<Dashboard>> {
		&self.dashboard
	}

	pub fn is_in_flight(&self) -> bool {
		self.in_flight.load(Ordering::SeqCst)
	}

	pub async fn refresh(&self, trigger: Trigger) -> RefreshOutcome {
		let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
			tracing::info!(?trigger, "Refresh skipped; a fetch is already in flight.");

			return RefreshOutcome::Skipped;
		};

		match self.source.fetch().await {
			Ok(report) => self.replace(report, trigger),
			Err(err) => self.recover(err, trigger).await,
		}
	}

	/// Runs until `shutdown` resolves. The first tick fires immediately.
	pub async fn run<F>(&self, interval: Duration, mut manual: mpsc::Receiver<()>, shutdown: F)
	where
		F: Future<Output = ()>,
	{
		let mut ticker = tokio_time::interval(interval);

		ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

		tokio::pin!(shutdown);

		let mut trigger = Trigger::Initial;

		loop {
			tokio::select! {
				_ = &mut shutdown => break,
				_ = ticker.tick() => {
					self.refresh(trigger).await;

					trigger = Trigger::Periodic;
				},
				Some(()) = manual.recv() => {
					self.refresh(Trigger::Manual).await;
				},
			}
		}
	}

	fn replace(&self, report: IngestReport, trigger: Trigger) -> RefreshOutcome {
		for issue in &report.issues {
			if issue.kind.skips_row() {
				tracing::warn!(%issue, "Row skipped at ingestion.");
			} else {
				tracing::warn!(%issue, "Row kept with a questionable value.");
			}
		}

		let skipped_rows = report.skipped();
		let count = report.records.len();
		let mut dashboard = self.lock();

		dashboard.replace_records(report.records, OffsetDateTime::now_utc());

		if trigger == Trigger::Manual {
			dashboard.push_notice(Notice::Refreshed { count });
		}

		tracing::info!(count, skipped_rows, ?trigger, "Record store replaced.");

		RefreshOutcome::Replaced { count, skipped_rows }
	}

	async fn recover(&self, err: Error, trigger: Trigger) -> RefreshOutcome {
		let message = err.to_string();

		tracing::error!(error = %message, ?trigger, "Membership fetch failed.");

		let loaded = self.lock().store().is_loaded();

		if !loaded && let Some(fallback) = self.fallback.as_ref() {
			match fallback.fetch().await {
				Ok(report) => {
					let count = report.records.len();
					let mut dashboard = self.lock();

					dashboard.replace_records(report.records, OffsetDateTime::now_utc());
					dashboard.push_notice(Notice::FetchFailed { message });
					dashboard.push_notice(Notice::UsingSample { count });

					tracing::warn!(count, "Using sample records.");

					return RefreshOutcome::FellBack { count };
				},
				Err(fallback_err) => {
					tracing::error!(error = %fallback_err, "Sample records could not be loaded.");
				},
			}
		}

		self.lock().push_notice(Notice::FetchFailed { message: message.clone() });

		RefreshOutcome::Failed { message }
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, Dashboard> {
		self.dashboard.lock().unwrap_or_else(|err| err.into_inner())
	}
}

struct InFlightGuard<'a> {
	flag: &'a AtomicBool,
}
impl<'a> InFlightGuard<'a> {
	fn acquire(flag: &'a AtomicBool) -> Option<Self> {
		flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
			.ok()
			.map(|_| Self { flag })
	}
}
impl Drop for InFlightGuard<'_> {
	fn drop(&mut self) {
		self.flag.store(false, Ordering::SeqCst);
	}
}
