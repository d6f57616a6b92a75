use crate::configuration::ConfigurationError;
use crate::host::HostError;
use crate::host::snapshot_page::PageLoadError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaytimeError {
	#[error("Failed to load configuration: {0}")]
	Configuration(#[from] ConfigurationError),
	#[error("Invalid log filters: {0}")]
	LogFilters(#[from] tracing_subscriber::filter::ParseError),
	#[error("Failed to load page: {0}")]
	PageLoad(#[from] PageLoadError),
	#[error("Host page failed: {0}")]
	Host(#[from] HostError),
	#[error("Failed to serialize statistics: {0}")]
	Serialization(#[from] serde_json::Error),
}
