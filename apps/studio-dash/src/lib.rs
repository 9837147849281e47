pub mod render;

use std::{
	convert::Infallible,
	io::{self, BufRead},
	path::PathBuf,
	sync::{Arc, Mutex, MutexGuard},
	thread,
	time::Duration,
};

use clap::{
	Parser, Subcommand,
	builder::{
		Styles,
		styling::{AnsiColor, Effects},
	},
};
use serde::Serialize;
use time::OffsetDateTime;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use studio_config::Config;
use studio_domain::{
	Annotation, DateRange, FilterSpec, MemberRecord, QuickFilter, SessionsRange, Status,
};
use studio_service::{
	Dashboard, Notice, RefreshOutcome, Refresher, SortField, Surface, Trigger, aggregate,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const REPORT_POLL: Duration = Duration::from_secs(1);

#[derive(Debug, Parser)]
#[command(version = VERSION, rename_all = "kebab", styles = styles())]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Headline metrics, quick-filter counts and charts for the working set.
	Summary(SummaryArgs),
	/// One page of a table surface.
	Table(TableArgs),
	/// Attach comments, notes and tags to every row of a member. Nothing is written back.
	Annotate(AnnotateArgs),
	/// Refresh on the configured interval until Ctrl-C. Press Enter to refresh immediately.
	Watch,
}

/// Quick preset plus the structured filter panel. Each status, location or membership-type
/// flag is a checkbox click, so naming the same value twice clears it again.
#[derive(Debug, Clone, clap::Args)]
pub struct ViewArgs {
	#[arg(long, value_name = "PRESET", default_value = "all", value_parser = parse_quick)]
	pub quick: QuickFilter,
	#[arg(long, value_name = "STATUS", value_parser = parse_status)]
	pub status: Vec<Status>,
	#[arg(long, value_name = "LOCATION")]
	pub location: Vec<String>,
	#[arg(long, value_name = "TYPE")]
	pub membership_type: Vec<String>,
	#[arg(long, value_name = "DATE")]
	pub from: Option<String>,
	#[arg(long, value_name = "DATE")]
	pub to: Option<String>,
	#[arg(long, value_name = "N")]
	pub min_sessions: Option<String>,
	#[arg(long, value_name = "N")]
	pub max_sessions: Option<String>,
}
impl ViewArgs {
	pub fn filter_spec(&self) -> color_eyre::Result<FilterSpec> {
		let date_range =
			DateRange::parse(self.from.as_deref().unwrap_or(""), self.to.as_deref().unwrap_or(""))?;
		let sessions_range = SessionsRange::from_inputs(
			self.min_sessions.as_deref().unwrap_or(""),
			self.max_sessions.as_deref().unwrap_or(""),
		);

		let mut spec = FilterSpec { date_range, sessions_range, ..FilterSpec::default() };

		for status in &self.status {
			spec.toggle_status(*status);
		}
		for location in &self.location {
			spec.toggle_location(location);
		}
		for membership_type in &self.membership_type {
			spec.toggle_membership_type(membership_type);
		}

		Ok(spec)
	}
}

#[derive(Debug, Clone, clap::Args)]
pub struct SummaryArgs {
	#[arg(long)]
	pub json: bool,
	#[command(flatten)]
	pub view: ViewArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct TableArgs {
	#[arg(long)]
	pub json: bool,
	#[command(flatten)]
	pub view: ViewArgs,
	#[arg(long, value_name = "SURFACE", default_value = "overview", value_parser = Surface::parse)]
	pub surface: Surface,
	#[arg(long, value_name = "TEXT", default_value = "")]
	pub search: String,
	/// A column header click. Repeat the flag to click again.
	#[arg(long = "sort", value_name = "FIELD", value_parser = SortField::parse)]
	pub sort: Vec<SortField>,
	#[arg(long, value_name = "N", default_value_t = 1)]
	pub page: usize,
}

#[derive(Debug, Clone, clap::Args)]
pub struct AnnotateArgs {
	#[arg(long)]
	pub json: bool,
	#[arg(long, value_name = "ID")]
	pub member_id: String,
	#[arg(long, value_name = "TEXT", default_value = "")]
	pub comments: String,
	#[arg(long, value_name = "TEXT", default_value = "")]
	pub notes: String,
	#[arg(long = "tag", value_name = "TAG")]
	pub tags: Vec<String>,
}

pub fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Red.on_default() | Effects::BOLD)
		.usage(AnsiColor::Red.on_default() | Effects::BOLD)
		.literal(AnsiColor::Blue.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Green.on_default())
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = studio_config::load(&args.config)?;
	init_tracing(&config)?;
	let dashboard = Arc::new(Mutex::new(Dashboard::from_config(&config)));
	let refresher = Refresher::from_config(&config.source, dashboard.clone());

	if matches!(args.command, Command::Watch) {
		return watch(&refresher, &config).await;
	}

	for notice in initial_load(&refresher).await {
		eprintln!("{}", render::notice(&notice));
	}

	let mut dashboard = lock(&dashboard);
	let now = OffsetDateTime::now_utc();

	match args.command {
		Command::Summary(summary) => show_summary(&mut dashboard, &summary, now),
		Command::Table(table) => show_table(&mut dashboard, &table, now),
		Command::Annotate(annotate) => show_annotation(&mut dashboard, &annotate, now),
		Command::Watch => Ok(()),
	}
}

/// First fetch for the one-shot commands. A failure leaves the store as it was, empty on a
/// first load, and is reported through the returned notices.
pub async fn initial_load(refresher: &Refresher) -> Vec<Notice> {
	if let RefreshOutcome::Failed { message } = refresher.refresh(Trigger::Initial).await {
		tracing::warn!(error = %message, "Continuing without fresh records.");
	}

	lock(refresher.dashboard()).drain_notices()
}

pub fn apply_view(
	dashboard: &mut Dashboard,
	view: &ViewArgs,
	now: OffsetDateTime,
) -> color_eyre::Result<()> {
	dashboard.set_quick_filter(view.quick.clone(), now);
	dashboard.set_filter(view.filter_spec()?, now);

	Ok(())
}

/// Replays the table flags in the order an operator would use the controls.
pub fn apply_table(
	dashboard: &mut Dashboard,
	args: &TableArgs,
	now: OffsetDateTime,
) -> color_eyre::Result<()> {
	apply_view(dashboard, &args.view, now)?;
	dashboard.set_search(args.surface, &args.search, now);

	for field in &args.sort {
		dashboard.toggle_sort(args.surface, *field);
	}

	dashboard.set_page(args.surface, args.page, now);

	Ok(())
}

fn show_summary(
	dashboard: &mut Dashboard,
	args: &SummaryArgs,
	now: OffsetDateTime,
) -> color_eyre::Result<()> {
	apply_view(dashboard, &args.view, now)?;

	let summary = dashboard.summary(now);

	if args.json {
		return print_json(&summary);
	}

	print!("{}", render::summary(&summary));

	Ok(())
}

fn show_table(
	dashboard: &mut Dashboard,
	args: &TableArgs,
	now: OffsetDateTime,
) -> color_eyre::Result<()> {
	apply_table(dashboard, args, now)?;

	let view = dashboard.table_view(args.surface, now);

	if args.json {
		return print_json(&view);
	}

	print!("{}", render::table(&view));

	Ok(())
}

fn show_annotation(
	dashboard: &mut Dashboard,
	args: &AnnotateArgs,
	now: OffsetDateTime,
) -> color_eyre::Result<()> {
	let annotation = Annotation {
		comments: args.comments.clone(),
		notes: args.notes.clone(),
		tags: args.tags.clone(),
	};
	let changed = dashboard.annotate(&args.member_id, &annotation, now);

	if changed == 0 {
		tracing::warn!(member_id = %args.member_id, "No records found for member.");

		return Ok(());
	}

	tracing::info!(member_id = %args.member_id, changed, "Annotation applied.");

	let rows: Vec<&MemberRecord> = dashboard
		.store()
		.records()
		.iter()
		.filter(|record| record.member_id == args.member_id)
		.collect();

	if args.json {
		return print_json(&rows);
	}

	print!("{}", render::annotations(&rows));

	Ok(())
}

async fn watch(refresher: &Refresher, config: &Config) -> color_eyre::Result<()> {
	let (manual_tx, manual_rx) = mpsc::channel(1);
	let interval = Duration::from_secs(config.refresh.interval_secs);

	thread::spawn(move || forward_enter_presses(manual_tx));

	let reporter = tokio::spawn(report_refreshes(refresher.dashboard().clone()));

	tracing::info!(interval_secs = config.refresh.interval_secs, "Watching membership records.");

	refresher
		.run(interval, manual_rx, async {
			if let Err(err) = tokio::signal::ctrl_c().await {
				tracing::error!(error = %err, "Failed to listen for Ctrl-C.");
			}
		})
		.await;
	reporter.abort();

	tracing::info!("Watch stopped.");

	Ok(())
}

fn forward_enter_presses(manual: mpsc::Sender<()>) {
	for line in io::stdin().lock().lines() {
		if line.is_err() || manual.blocking_send(()).is_err() {
			break;
		}
	}
}

async fn report_refreshes(dashboard: Arc<Mutex<Dashboard>>) {
	let mut ticker = tokio::time::interval(REPORT_POLL);
	let mut seen = 0;

	loop {
		ticker.tick().await;

		let (notices, headline) = {
			let mut dashboard = lock(&dashboard);
			let generation = dashboard.store().generation();
			let headline = (generation != seen)
				.then(|| aggregate::headline_metrics(dashboard.store().records()));

			seen = generation;

			(dashboard.drain_notices(), headline)
		};

		for notice in &notices {
			eprintln!("{}", render::notice(notice));
		}

		if let Some(headline) = headline {
			tracing::info!(
				total = headline.total_members,
				active = headline.active_members,
				expired = headline.expired_members,
				sessions = headline.total_sessions,
				"Dashboard refreshed."
			);
		}
	}
}

fn print_json<T>(value: &T) -> color_eyre::Result<()>
where
	T: ?Sized + Serialize,
{
	let json = serde_json::to_string_pretty(value)?;

	println!("{json}");

	Ok(())
}

fn lock(dashboard: &Mutex<Dashboard>) -> MutexGuard<'_, Dashboard> {
	dashboard.lock().unwrap_or_else(|err| err.into_inner())
}

fn parse_quick(raw: &str) -> Result<QuickFilter, Infallible> {
	Ok(QuickFilter::parse(raw))
}

fn parse_status(raw: &str) -> Result<Status, String> {
	Status::parse(raw).ok_or_else(|| format!("unknown status '{raw}', expected Active or Expired"))
}

fn init_tracing(config: &Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(filter).init();
	Ok(())
}
