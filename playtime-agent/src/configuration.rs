use serde::Deserialize;
use std::fs::read_to_string;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Configuration {
	pub log_filters: String,
	#[serde(default)]
	pub scheduler: SchedulerConfiguration,
}

/// Delays and intervals of the re-scrape scheduler.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SchedulerConfiguration {
	/// Wait after startup before the first run, so the host page can finish loading.
	#[serde(with = "humantime_serde")]
	pub startup_delay: Duration,
	#[serde(with = "humantime_serde")]
	pub navigation_delay: Duration,
	/// First stage of the wait after content changes.
	#[serde(with = "humantime_serde")]
	pub mutation_delay: Duration,
	/// Second stage of the wait after content changes.
	#[serde(with = "humantime_serde")]
	pub settle_delay: Duration,
	#[serde(with = "humantime_serde")]
	pub fast_poll_interval: Duration,
	/// Number of fast fallback checks after every (re)start before slowing down.
	pub fast_poll_limit: u32,
	#[serde(with = "humantime_serde")]
	pub slow_poll_interval: Duration,
}

impl Default for SchedulerConfiguration {
	fn default() -> Self {
		Self {
			startup_delay: Duration::from_secs(2),
			navigation_delay: Duration::from_secs(1),
			mutation_delay: Duration::from_secs(1),
			settle_delay: Duration::from_millis(500),
			fast_poll_interval: Duration::from_secs(1),
			fast_poll_limit: 10,
			slow_poll_interval: Duration::from_secs(10),
		}
	}
}

impl Configuration {
	pub fn from_file(path: impl AsRef<Path>) -> Result<Configuration, ConfigurationError> {
		let text = read_to_string(path)?;

		Configuration::try_from(text.as_str())
	}
}

impl Default for Configuration {
	fn default() -> Self {
		Self {
			log_filters: "info".to_string(),
			scheduler: SchedulerConfiguration::default(),
		}
	}
}

impl TryFrom<&str> for Configuration {
	type Error = ConfigurationError;

	fn try_from(text: &str) -> Result<Self, Self::Error> {
		let configuration = toml::from_str::<Configuration>(text)?;
		configuration.scheduler.validate()?;
		Ok(configuration)
	}
}

impl SchedulerConfiguration {
	/// Poll intervals of zero would make the poll fire continuously.
	fn validate(&self) -> Result<(), ConfigurationError> {
		let intervals = [
			("fast_poll_interval", self.fast_poll_interval),
			("slow_poll_interval", self.slow_poll_interval),
		];
		match intervals.into_iter().find(|(_, interval)| interval.is_zero()) {
			Some((name, _)) => Err(ConfigurationError::ZeroInterval(name)),
			None => Ok(()),
		}
	}
}

#[derive(Error, Debug)]
pub enum ConfigurationError {
	#[error("Failed to deserialize with error: {0}")]
	DeserializationError(#[from] toml::de::Error),
	#[error("IO operation failed: {0}")]
	IoError(#[from] std::io::Error),
	#[error("'{0}' must be longer than zero")]
	ZeroInterval(&'static str),
}
