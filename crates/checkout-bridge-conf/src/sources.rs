//! Configuration sources for layered settings
//!
//! Sources are merged in priority order (environment variables > settings
//! file > defaults). Each source produces a nested JSON object; objects are
//! merged key by key so a higher source only overrides the leaves it sets.

use std::fs;
use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::settings::BridgeSettings;

/// Default prefix of environment overrides.
pub const ENV_PREFIX: &str = "CHECKOUT_BRIDGE__";

const ENV_SEPARATOR: &str = "__";

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<Map<String, Value>, SettingsError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Errors raised while loading settings or installing the subscriber.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// A source produced something other than a table at its root
	#[error("Parse error in {source_name}: {message}")]
	Parse {
		source_name: String,
		message: String,
	},

	/// Logging could not be set up
	#[error("Logging error: {0}")]
	Logging(String),
}

/// Compiled-in defaults.
pub struct DefaultSource;

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<Map<String, Value>, SettingsError> {
		match serde_json::to_value(BridgeSettings::default())? {
			Value::Object(map) => Ok(map),
			_ => Err(SettingsError::Parse {
				source_name: self.description(),
				message: "expected object at root".to_string(),
			}),
		}
	}

	fn priority(&self) -> u8 {
		0
	}

	fn description(&self) -> String {
		"Defaults".to_string()
	}
}

/// TOML settings file. A missing file contributes nothing.
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<Map<String, Value>, SettingsError> {
		if !self.path.exists() {
			tracing::debug!(path = %self.path.display(), "settings file not found; skipping");
			return Ok(Map::new());
		}

		let content = fs::read_to_string(&self.path)?;
		let toml_value: toml::Value = toml::from_str(&content)?;

		match serde_json::to_value(toml_value)? {
			Value::Object(map) => Ok(map),
			_ => Err(SettingsError::Parse {
				source_name: self.description(),
				message: "expected table at root".to_string(),
			}),
		}
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// Environment variables with a prefix.
///
/// `CHECKOUT_BRIDGE__PAYPAL__SDK_URL` sets `paypal.sdk_url`. Values that parse
/// as integers or booleans are stored as such.
pub struct EnvSource {
	prefix: String,
}

impl EnvSource {
	pub fn new() -> Self {
		Self {
			prefix: ENV_PREFIX.to_string(),
		}
	}

	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	/// Builds the override table from `vars`.
	pub fn collect<I>(&self, vars: I) -> Map<String, Value>
	where
		I: IntoIterator<Item = (String, String)>,
	{
		let mut config = Map::new();
		for (key, value) in vars {
			let Some(path) = key.strip_prefix(&self.prefix) else {
				continue;
			};
			let segments: Vec<String> = path
				.split(ENV_SEPARATOR)
				.filter(|segment| !segment.is_empty())
				.map(str::to_lowercase)
				.collect();
			if segments.is_empty() {
				continue;
			}
			insert_path(&mut config, &segments, parse_env_value(value));
		}
		config
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<Map<String, Value>, SettingsError> {
		Ok(self.collect(std::env::vars()))
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", self.prefix)
	}
}

fn parse_env_value(value: String) -> Value {
	if let Ok(num) = value.parse::<i64>() {
		Value::Number(num.into())
	} else if let Ok(b) = value.parse::<bool>() {
		Value::Bool(b)
	} else {
		Value::String(value)
	}
}

fn insert_path(config: &mut Map<String, Value>, segments: &[String], value: Value) {
	let (last, parents) = match segments.split_last() {
		Some(split) => split,
		None => return,
	};
	let mut current = config;
	for segment in parents {
		let entry = current
			.entry(segment.clone())
			.or_insert_with(|| Value::Object(Map::new()));
		if !entry.is_object() {
			*entry = Value::Object(Map::new());
		}
		current = match entry {
			Value::Object(map) => map,
			_ => return,
		};
	}
	current.insert(last.clone(), value);
}

fn merge(target: &mut Map<String, Value>, overrides: Map<String, Value>) {
	for (key, value) in overrides {
		match (target.get_mut(&key), value) {
			(Some(Value::Object(existing)), Value::Object(incoming)) => merge(existing, incoming),
			(_, value) => {
				target.insert(key, value);
			}
		}
	}
}

/// Builds [`BridgeSettings`] from layered sources.
pub struct SettingsLoader {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsLoader {
	/// Defaults plus environment overrides.
	pub fn new() -> Self {
		Self {
			sources: vec![Box::new(DefaultSource), Box::new(EnvSource::new())],
		}
	}

	/// Adds a TOML settings file.
	pub fn with_file(self, path: impl Into<PathBuf>) -> Self {
		self.with_source(TomlFileSource::new(path))
	}

	pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Ignores the process environment.
	pub fn without_env(mut self) -> Self {
		self.sources.retain(|source| source.priority() < 100);
		self
	}

	/// Merges every source, lowest priority first, and deserializes the result.
	pub fn load(mut self) -> Result<BridgeSettings, SettingsError> {
		self.sources.sort_by_key(|source| source.priority());

		let mut merged = Map::new();
		for source in &self.sources {
			let layer = source.load()?;
			tracing::trace!(
				source = %source.description(),
				keys = layer.len(),
				"merging settings source"
			);
			merge(&mut merged, layer);
		}

		Ok(serde_json::from_value(Value::Object(merged))?)
	}
}

impl Default for SettingsLoader {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_env_collect_builds_nested_paths() {
		// Arrange
		let source = EnvSource::new();
		let vars = vec![
			(
				"CHECKOUT_BRIDGE__BRAINTREE__THREE_D_SECURE_VERSION".to_string(),
				"1".to_string(),
			),
			(
				"CHECKOUT_BRIDGE__BRAINTREE__VENMO__ALLOW_DESKTOP".to_string(),
				"false".to_string(),
			),
			("UNRELATED".to_string(), "x".to_string()),
		];

		// Act
		let config = source.collect(vars);

		// Assert
		assert_eq!(
			Value::Object(config),
			json!({
				"braintree": {
					"three_d_secure_version": 1,
					"venmo": { "allow_desktop": false }
				}
			})
		);
	}

	#[rstest]
	fn test_merge_overrides_leaves_only() {
		// Arrange
		let mut base = json!({"paypal": {"sdk_url": "a"}, "logging": {"level": "info"}})
			.as_object()
			.unwrap()
			.clone();
		let layer = json!({"logging": {"level": "debug"}})
			.as_object()
			.unwrap()
			.clone();

		// Act
		merge(&mut base, layer);

		// Assert
		assert_eq!(
			Value::Object(base),
			json!({"paypal": {"sdk_url": "a"}, "logging": {"level": "debug"}})
		);
	}

	#[rstest]
	fn test_env_prefix_alone_is_ignored() {
		// Arrange
		let source = EnvSource::new().with_prefix("APP__");

		// Act
		let config = source.collect(vec![("APP__".to_string(), "1".to_string())]);

		// Assert
		assert!(config.is_empty());
	}
}
