use crate::host::HostError;
use url::Url;

const SUPPORTED_HOST: &str = "youtube.com";

/// Parsed address of the host page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageAddress(Url);

impl PageAddress {
	pub fn parse(address: &str) -> Result<Self, HostError> {
		Url::parse(address)
			.map(Self)
			.map_err(|source| HostError::InvalidAddress {
				address: address.to_string(),
				source,
			})
	}

	pub fn is_supported_host(&self) -> bool {
		self.0.host_str().is_some_and(|host| host.contains(SUPPORTED_HOST))
	}

	/// The full playlist listing lives under `/playlist`.
	pub fn is_listing(&self) -> bool {
		self.0.path().contains("/playlist")
	}

	pub fn is_watch(&self) -> bool {
		self.0.path().contains("/watch")
	}

	/// Whether the query references a playlist (`list=…`).
	pub fn has_playlist_query(&self) -> bool {
		self.0.query().is_some_and(|query| query.contains("list="))
	}

	/// Addresses where content changes are worth re-scraping for.
	pub fn is_playlist_relevant(&self) -> bool {
		self.is_listing() || (self.is_watch() && self.has_playlist_query())
	}
}

/// Like [`PageAddress::is_playlist_relevant`] but for addresses that may not even parse.
pub fn is_playlist_relevant(address: &str) -> bool {
	PageAddress::parse(address).is_ok_and(|address| address.is_playlist_relevant())
}
