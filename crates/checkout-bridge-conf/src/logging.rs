//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::settings::{LogFormat, LoggingSettings};
use crate::sources::SettingsError;

/// Builds the filter: `RUST_LOG` when set, otherwise `settings.level`.
pub fn env_filter(settings: &LoggingSettings) -> Result<EnvFilter, SettingsError> {
	match EnvFilter::try_from_default_env() {
		Ok(filter) => Ok(filter),
		Err(_) => EnvFilter::try_new(&settings.level).map_err(|err| {
			SettingsError::Logging(format!("invalid level '{}': {}", settings.level, err))
		}),
	}
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns [`SettingsError::Logging`] when the level directive does not parse
/// or a global subscriber is already installed.
pub fn init_tracing(settings: &LoggingSettings) -> Result<(), SettingsError> {
	let filter = env_filter(settings)?;
	let builder = tracing_subscriber::fmt().with_env_filter(filter);

	let result = match settings.format {
		LogFormat::Pretty => builder.pretty().try_init(),
		LogFormat::Compact => builder.compact().try_init(),
		LogFormat::Json => builder.json().try_init(),
	};

	result.map_err(|err| SettingsError::Logging(err.to_string()))
}
