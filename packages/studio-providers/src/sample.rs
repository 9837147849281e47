use std::path::Path;

use studio_domain::MemberRecord;

use crate::{IngestReport, Result, ingest};

/// Loads a JSON array of records, e.g. a saved export used for demonstrations.
pub async fn load(path: &Path) -> Result<IngestReport> {
	let raw = tokio::fs::read_to_string(path).await?;

	parse(&raw)
}

pub fn parse(raw: &str) -> Result<IngestReport> {
	let records: Vec<MemberRecord> = serde_json::from_str(raw)?;

	Ok(ingest::ingest_records(records))
}
