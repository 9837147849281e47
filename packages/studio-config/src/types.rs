use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub source: Source,
	#[serde(default)]
	pub refresh: Refresh,
	#[serde(default)]
	pub table: Table,
	#[serde(default)]
	pub charts: Charts,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub log_level: String,
}

/// Where membership rows come from.
#[derive(Debug, Clone, Deserialize)]
pub struct Source {
	/// Base URL of the spreadsheet values API,
	/// e.g. "https://sheets.googleapis.com/v4/spreadsheets".
	pub api_base: String,
	pub spreadsheet_id: String,
	/// A1 range including the header row, e.g. "Members!A1:P".
	pub range: String,
	pub api_key: Option<String>,
	pub timeout_ms: u64,
	/// Optional. JSON array of records used when the first load fails.
	pub sample_path: Option<PathBuf>,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Refresh {
	#[serde(default = "default_refresh_interval_secs")]
	pub interval_secs: u64,
}
impl Default for Refresh {
	fn default() -> Self {
		Self { interval_secs: default_refresh_interval_secs() }
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Table {
	#[serde(default = "default_page_size")]
	pub page_size: usize,
}
impl Default for Table {
	fn default() -> Self {
		Self { page_size: default_page_size() }
	}
}

/// Display-only truncation of chart buckets.
#[derive(Debug, Clone, Deserialize)]
pub struct Charts {
	#[serde(default = "default_membership_types_limit")]
	pub membership_types_limit: usize,
	#[serde(default = "default_locations_limit")]
	pub locations_limit: usize,
	/// Number of locations offered as quick-filter presets.
	#[serde(default = "default_location_presets")]
	pub location_presets: usize,
	#[serde(default = "default_label_max_chars")]
	pub label_max_chars: usize,
}
impl Default for Charts {
	fn default() -> Self {
		Self {
			membership_types_limit: default_membership_types_limit(),
			locations_limit: default_locations_limit(),
			location_presets: default_location_presets(),
			label_max_chars: default_label_max_chars(),
		}
	}
}

fn default_refresh_interval_secs() -> u64 {
	300
}

fn default_page_size() -> usize {
	10
}

fn default_membership_types_limit() -> usize {
	8
}

fn default_locations_limit() -> usize {
	5
}

fn default_location_presets() -> usize {
	4
}

fn default_label_max_chars() -> usize {
	20
}
