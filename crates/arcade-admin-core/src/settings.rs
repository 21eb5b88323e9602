//! Layered admin settings
//!
//! Settings are merged from built-in defaults, an optional TOML file and
//! environment variables, later sources overriding earlier ones.

use crate::error::{AdminError, AdminResult};
use crate::format::DEFAULT_LOCALE;
use crate::registry::{ColorScheme, SiteOptions};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix of environment variables read by [`EnvSource`]
pub const ENV_PREFIX: &str = "ARCADE_ADMIN_";

/// Settings file looked up when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "arcade-admin.toml";

/// Admin settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSettings {
	/// Site title
	pub title: String,
	/// Default color scheme
	pub default_color_scheme: ColorScheme,
	/// Locale used when a request does not negotiate one
	pub default_locale: String,
	/// Records per list page
	pub page_size: usize,
	/// Log level used when `RUST_LOG` is unset
	pub log_level: String,
	/// URL returned by the avatar upload handler
	pub avatar_upload_url: String,
}

impl Default for AdminSettings {
	fn default() -> Self {
		Self {
			title: "⚡️ My Admin".to_string(),
			default_color_scheme: ColorScheme::Dark,
			default_locale: DEFAULT_LOCALE.to_string(),
			page_size: 20,
			log_level: "info".to_string(),
			avatar_upload_url: "https://raw.githubusercontent.com/premieroctet/next-admin/33fcd755a34f1ec5ad53ca8e293029528af814ca/apps/example/public/assets/logo.svg".to_string(),
		}
	}
}

impl AdminSettings {
	/// Load settings from the default file and the process environment.
	///
	/// `path` overrides [`DEFAULT_CONFIG_FILE`]; a missing file is skipped.
	///
	/// # Errors
	///
	/// Returns `AdminError::Settings` if a source cannot be read or a value
	/// has the wrong type.
	pub fn load(path: Option<&Path>) -> AdminResult<Self> {
		let path = path
			.map(Path::to_path_buf)
			.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
		Self::from_sources(&[
			&TomlFileSource::new(path),
			&EnvSource::new().with_prefix(ENV_PREFIX),
		])
	}

	/// Merge sources in order over the defaults
	///
	/// # Errors
	///
	/// Returns `AdminError::Settings` if a source fails or the merged values
	/// do not deserialize.
	pub fn from_sources(sources: &[&dyn SettingsSource]) -> AdminResult<Self> {
		let mut merged = defaults_map()?;
		for source in sources {
			let values = source.load()?;
			tracing::debug!(source = %source.description(), keys = values.len(), "settings source loaded");
			for (key, value) in values {
				if let Some(slot) = merged.get_mut(&key) {
					*slot = coerce(&key, slot, value)?;
				}
			}
		}
		let object = merged.into_iter().collect::<serde_json::Map<_, _>>();
		serde_json::from_value(Value::Object(object))
			.map_err(|e| AdminError::Settings(format!("invalid settings: {}", e)))
	}

	/// Site options derived from the settings
	pub fn site_options(&self) -> SiteOptions {
		SiteOptions::new(self.title.clone()).with_color_scheme(self.default_color_scheme)
	}
}

fn defaults_map() -> AdminResult<IndexMap<String, Value>> {
	match serde_json::to_value(AdminSettings::default()) {
		Ok(Value::Object(map)) => Ok(map.into_iter().collect()),
		Ok(_) => Err(AdminError::Settings("defaults are not an object".to_string())),
		Err(e) => Err(AdminError::Settings(e.to_string())),
	}
}

// Environment values arrive as strings; numeric settings are parsed here.
fn coerce(key: &str, current: &Value, value: Value) -> AdminResult<Value> {
	match (current, value) {
		(Value::Number(_), Value::String(raw)) => raw
			.trim()
			.parse::<u64>()
			.map(Value::from)
			.map_err(|_| AdminError::Settings(format!("'{}' must be a number, got '{}'", key, raw))),
		(Value::String(_), Value::String(raw)) if key == "default_color_scheme" => {
			Ok(Value::String(raw.to_lowercase()))
		}
		(_, value) => Ok(value),
	}
}

/// Source of setting values
pub trait SettingsSource {
	/// Load key/value pairs; keys use the settings field names
	fn load(&self) -> AdminResult<IndexMap<String, Value>>;

	/// Description used in logs
	fn description(&self) -> String;
}

/// TOML file source
#[derive(Debug, Clone)]
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	/// Create a source reading `path`
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl SettingsSource for TomlFileSource {
	fn load(&self) -> AdminResult<IndexMap<String, Value>> {
		if !self.path.exists() {
			return Ok(IndexMap::new());
		}

		let content = fs::read_to_string(&self.path).map_err(|e| {
			AdminError::Settings(format!("cannot read {}: {}", self.path.display(), e))
		})?;
		let table: toml::Table = toml::from_str(&content).map_err(|e| {
			AdminError::Settings(format!("cannot parse {}: {}", self.path.display(), e))
		})?;
		let value = serde_json::to_value(table).map_err(|e| AdminError::Settings(e.to_string()))?;

		match value {
			Value::Object(map) => Ok(map.into_iter().collect()),
			_ => Err(AdminError::Settings("expected a table at the root".to_string())),
		}
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// Environment variable source
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
	prefix: Option<String>,
	vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
	/// Read the process environment
	pub fn new() -> Self {
		Self::default()
	}

	/// Only read variables starting with `prefix`, stripping it from keys
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = Some(prefix.into());
		self
	}

	/// Read a fixed set of variables instead of the process environment
	pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.vars = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
		self
	}
}

impl SettingsSource for EnvSource {
	fn load(&self) -> AdminResult<IndexMap<String, Value>> {
		let vars: Vec<(String, String)> = match &self.vars {
			Some(vars) => vars.clone(),
			None => std::env::vars().collect(),
		};

		let mut config = IndexMap::new();
		for (key, value) in vars {
			let clean_key = match &self.prefix {
				Some(prefix) => match key.strip_prefix(prefix.as_str()) {
					Some(stripped) => stripped.to_string(),
					None => continue,
				},
				None => key,
			};
			config.insert(clean_key.to_lowercase(), Value::String(value));
		}
		Ok(config)
	}

	fn description(&self) -> String {
		match &self.prefix {
			Some(prefix) => format!("environment ({}*)", prefix),
			None => "environment".to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serial_test::serial;
	use std::env;
	use std::io::Write;
	use tempfile::TempDir;

	fn write_config(dir: &TempDir, content: &str) -> PathBuf {
		let path = dir.path().join("arcade-admin.toml");
		let mut file = fs::File::create(&path).unwrap();
		writeln!(file, "{}", content).unwrap();
		path
	}

	#[test]
	fn test_defaults() {
		let settings = AdminSettings::from_sources(&[]).unwrap();

		assert_eq!(settings, AdminSettings::default());
		assert_eq!(settings.site_options().title, "⚡️ My Admin");
		assert_eq!(settings.site_options().default_color_scheme, ColorScheme::Dark);
	}

	#[test]
	fn test_layering_env_over_file_over_defaults() {
		// Arrange
		let dir = TempDir::new().unwrap();
		let path = write_config(
			&dir,
			r#"
page_size = 10
default_locale = "fr"
title = "Arcade"
"#,
		);
		let file = TomlFileSource::new(&path);
		let env = EnvSource::new()
			.with_prefix(ENV_PREFIX)
			.with_vars([
				("ARCADE_ADMIN_PAGE_SIZE", "50"),
				("ARCADE_ADMIN_DEFAULT_COLOR_SCHEME", "Light"),
				("ARCADE_ADMIN_UNKNOWN", "ignored"),
				("PATH", "/usr/bin"),
			]);

		// Act
		let settings = AdminSettings::from_sources(&[&file, &env]).unwrap();

		// Assert
		assert_eq!(settings.page_size, 50);
		assert_eq!(settings.default_locale, "fr");
		assert_eq!(settings.title, "Arcade");
		assert_eq!(settings.default_color_scheme, ColorScheme::Light);
		assert_eq!(settings.log_level, "info");
	}

	#[test]
	fn test_malformed_env_value() {
		let env = EnvSource::new()
			.with_prefix(ENV_PREFIX)
			.with_vars([("ARCADE_ADMIN_PAGE_SIZE", "many")]);

		let result = AdminSettings::from_sources(&[&env]);

		assert!(matches!(result, Err(AdminError::Settings(_))));
	}

	#[test]
	fn test_malformed_toml() {
		let dir = TempDir::new().unwrap();
		let path = write_config(&dir, "page_size = = 3");

		let result = TomlFileSource::new(path).load();

		assert!(matches!(result, Err(AdminError::Settings(_))));
	}

	#[test]
	fn test_missing_file_is_skipped() {
		let dir = TempDir::new().unwrap();
		let source = TomlFileSource::new(dir.path().join("absent.toml"));

		assert!(source.load().unwrap().is_empty());
	}

	#[test]
	#[serial]
	fn test_load_reads_process_environment() {
		// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			env::set_var("ARCADE_ADMIN_LOG_LEVEL", "debug");
		}
		let dir = TempDir::new().unwrap();

		let settings = AdminSettings::load(Some(&dir.path().join("none.toml")));

		// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			env::remove_var("ARCADE_ADMIN_LOG_LEVEL");
		}
		assert_eq!(settings.unwrap().log_level, "debug");
	}
}
