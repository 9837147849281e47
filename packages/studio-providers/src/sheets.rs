use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::{Error, IngestReport, Result, ingest};

#[derive(Debug, Deserialize)]
struct ValuesResponse {
	#[serde(default)]
	values: Vec<Vec<Value>>,
}

/// Fetches the configured values range and ingests it.
pub async fn fetch(cfg: &studio_config::Source) -> Result<IngestReport> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = values_url(cfg)?;
	let res = client.get(url).headers(crate::default_headers(&cfg.default_headers)?).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_values_response(json)
}

fn values_url(cfg: &studio_config::Source) -> Result<Url> {
	let mut url = Url::parse(&cfg.api_base).map_err(|err| Error::InvalidConfig {
		message: format!("source.api_base is not a valid URL: {err}."),
	})?;

	url.path_segments_mut()
		.map_err(|_| Error::InvalidConfig {
			message: "source.api_base cannot carry path segments.".to_string(),
		})?
		.pop_if_empty()
		.push(&cfg.spreadsheet_id)
		.push("values")
		.push(&cfg.range);

	if let Some(api_key) = cfg.api_key.as_deref() {
		url.query_pairs_mut().append_pair("key", api_key);
	}

	Ok(url)
}

fn parse_values_response(json: Value) -> Result<IngestReport> {
	if !json.is_object() {
		return Err(Error::InvalidResponse {
			message: "Sheet response must be a JSON object.".to_string(),
		});
	}

	let response: ValuesResponse = serde_json::from_value(json)?;

	ingest::ingest_rows(&response.values)
}
