mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Charts, Config, Refresh, Service, Source, Table};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	for (label, value) in [
		("source.api_base", &cfg.source.api_base),
		("source.spreadsheet_id", &cfg.source.spreadsheet_id),
		("source.range", &cfg.source.range),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if !cfg.source.api_base.starts_with("http://") && !cfg.source.api_base.starts_with("https://")
	{
		return Err(Error::Validation {
			message: "source.api_base must be an http or https URL.".to_string(),
		});
	}
	if cfg.source.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "source.timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (key, value) in &cfg.source.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("source.default_headers.{key} must be a string."),
			});
		}
	}

	if cfg.refresh.interval_secs == 0 {
		return Err(Error::Validation {
			message: "refresh.interval_secs must be greater than zero.".to_string(),
		});
	}
	if cfg.table.page_size == 0 {
		return Err(Error::Validation {
			message: "table.page_size must be greater than zero.".to_string(),
		});
	}

	for (label, value) in [
		("charts.membership_types_limit", cfg.charts.membership_types_limit),
		("charts.locations_limit", cfg.charts.locations_limit),
		("charts.location_presets", cfg.charts.location_presets),
		("charts.label_max_chars", cfg.charts.label_max_chars),
	] {
		if value == 0 {
			return Err(Error::Validation {
				message: format!("{label} must be greater than zero."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.source.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		cfg.source.api_key = None;
	}
	if cfg
		.source
		.sample_path
		.as_deref()
		.map(|path| path.as_os_str().is_empty())
		.unwrap_or(false)
	{
		cfg.source.sample_path = None;
	}

	let trimmed = cfg.source.api_base.trim_end_matches('/').to_string();

	cfg.source.api_base = trimmed;
}
