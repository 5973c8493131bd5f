mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Cache, Config, FieldBoosts, Index, Service, Similarity};

use std::{fs, path::Path};

/// Upper bound the index accepts for `size` without scrolling.
pub const MAX_RESULT_WINDOW: u32 = 10_000;

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
		("service.http_bind", &cfg.service.http_bind),
		("service.admin_bind", &cfg.service.admin_bind),
		("index.url", &cfg.index.url),
		("index.index", &cfg.index.index),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if !cfg.index.url.starts_with("http://") && !cfg.index.url.starts_with("https://") {
		return Err(Error::Validation {
			message: "index.url must start with http:// or https://.".to_string(),
		});
	}
	if cfg.index.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "index.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.index.page_size == 0 || cfg.index.page_size > MAX_RESULT_WINDOW {
		return Err(Error::Validation {
			message: format!("index.page_size must be in the range 1-{MAX_RESULT_WINDOW}."),
		});
	}
	if cfg.index.username.is_some() != cfg.index.password.is_some() {
		return Err(Error::Validation {
			message: "index.username and index.password must be set together.".to_string(),
		});
	}
	if cfg.index.api_key.is_some() && cfg.index.username.is_some() {
		return Err(Error::Validation {
			message: "index.api_key and index.username are mutually exclusive.".to_string(),
		});
	}
	if cfg.index.default_headers.values().any(|value| !value.is_string()) {
		return Err(Error::Validation {
			message: "index.default_headers values must be strings.".to_string(),
		});
	}
	if cfg.similarity.size == 0 || cfg.similarity.size > MAX_RESULT_WINDOW {
		return Err(Error::Validation {
			message: format!("similarity.size must be in the range 1-{MAX_RESULT_WINDOW}."),
		});
	}
	if cfg.similarity.pre_tag.is_empty() || cfg.similarity.post_tag.is_empty() {
		return Err(Error::Validation {
			message: "similarity.pre_tag and similarity.post_tag must be non-empty.".to_string(),
		});
	}
	if cfg.similarity.pre_tag == cfg.similarity.post_tag {
		return Err(Error::Validation {
			message: "similarity.pre_tag and similarity.post_tag must differ.".to_string(),
		});
	}

	for (label, boost) in cfg.similarity.boosts.entries() {
		if !boost.is_finite() {
			return Err(Error::Validation {
				message: format!("similarity.boosts.{label} must be a finite number."),
			});
		}
		if boost < 0.0 {
			return Err(Error::Validation {
				message: format!("similarity.boosts.{label} must be zero or greater."),
			});
		}
	}

	if cfg.cache.export_max_entries == 0 {
		return Err(Error::Validation {
			message: "cache.export_max_entries must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.index.url = cfg.index.url.trim().trim_end_matches('/').to_string();

	for secret in [&mut cfg.index.api_key, &mut cfg.index.username, &mut cfg.index.password] {
		if secret.as_deref().map(|value| value.trim().is_empty()).unwrap_or(false) {
			*secret = None;
		}
	}
}
