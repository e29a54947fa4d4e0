mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Export, Service, Store};

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
	if cfg.store.api_base.trim().is_empty() {
		return Err(Error::Validation { message: "store.api_base must be non-empty.".to_string() });
	}
	if cfg.store.collection.trim().is_empty() {
		return Err(Error::Validation {
			message: "store.collection must be non-empty.".to_string(),
		});
	}
	if cfg.store.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "store.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.store.page_limit == 0 {
		return Err(Error::Validation {
			message: "store.page_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.export.filename_prefix.trim().is_empty() {
		return Err(Error::Validation {
			message: "export.filename_prefix must be non-empty.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	while cfg.store.api_base.ends_with('/') {
		cfg.store.api_base.pop();
	}

	cfg.store.collection = cfg.store.collection.trim().to_string();
}
