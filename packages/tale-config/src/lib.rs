mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Assets, Config, Postgres, Search, Security, Service, Storage};

use std::{fs, path::Path};

/// Hard ceiling on any page of search results.
pub const SEARCH_LIMIT_CEILING: u32 = 100;

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
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if !(1..=SEARCH_LIMIT_CEILING).contains(&cfg.search.max_limit) {
		return Err(Error::Validation {
			message: format!("search.max_limit must be in the range 1-{SEARCH_LIMIT_CEILING}."),
		});
	}
	if cfg.search.default_limit == 0 || cfg.search.default_limit > cfg.search.max_limit {
		return Err(Error::Validation {
			message: "search.default_limit must be between 1 and search.max_limit.".to_string(),
		});
	}

	let base = cfg.assets.public_base_url.as_str();

	if !(base.starts_with("http://") || base.starts_with("https://")) {
		return Err(Error::Validation {
			message: "assets.public_base_url must be an http or https URL.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let trimmed = cfg.assets.public_base_url.trim().trim_end_matches('/');

	if trimmed.len() != cfg.assets.public_base_url.len() {
		cfg.assets.public_base_url = trimmed.to_string();
	}

	let level = cfg.service.log_level.trim();

	if level.is_empty() {
		cfg.service.log_level = "info".to_string();
	} else if level.len() != cfg.service.log_level.len() {
		cfg.service.log_level = level.to_string();
	}
}
