use crate::host::{
	AnchorCandidate, HostError, HostPage, HostSignal, InjectedElement, ListingItem, PanelItem, Placement,
};
use crate::playlist::PageKind;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;
use thiserror::Error;

/// An in-memory host page, usually loaded from a JSON capture of the real page.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotPage {
	pub address: String,
	pub language: Option<String>,
	pub listing: Option<ListingLayout>,
	pub panel: Option<PanelLayout>,
	/// Makes every read fail with this message, like markup that throws on property access.
	pub broken: Option<String>,
	#[serde(skip)]
	injected: Vec<(Placement, InjectedElement)>,
	#[serde(skip)]
	insertions: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingLayout {
	pub items: Vec<ListingEntry>,
	pub header: bool,
	pub anchors: Vec<AnchorCandidate>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingEntry {
	pub badge_text: Option<String>,
	#[serde(flatten)]
	pub item: ListingItem,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelLayout {
	pub items: Vec<PanelEntry>,
	pub index_messages: Vec<AnchorCandidate>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelEntry {
	pub badge_text: Option<String>,
	#[serde(flatten)]
	pub item: PanelItem,
}

#[derive(Error, Debug)]
pub enum PageLoadError {
	#[error("Failed to deserialize page with error: {0}")]
	DeserializationError(#[from] serde_json::Error),
	#[error("IO operation failed: {0}")]
	IoError(#[from] std::io::Error),
}

impl SnapshotPage {
	pub fn new(address: impl Into<String>) -> Self {
		Self {
			address: address.into(),
			..Default::default()
		}
	}

	pub fn from_file(path: impl AsRef<Path>) -> Result<SnapshotPage, PageLoadError> {
		let text = read_to_string(path)?;

		Ok(SnapshotPage::try_from(text.as_str())?)
	}

	pub fn injected_elements(&self) -> impl Iterator<Item = &InjectedElement> {
		self.injected.iter().map(|(_, element)| element)
	}

	pub fn placement_of(&self, id: &str) -> Option<Placement> {
		self.injected
			.iter()
			.find(|(_, element)| element.id == id)
			.map(|(placement, _)| *placement)
	}

	/// How many elements were ever inserted, including ones that were removed again.
	pub fn insertions(&self) -> usize {
		self.insertions
	}

	fn check(&self, property: &'static str) -> Result<(), HostError> {
		match &self.broken {
			Some(message) => Err(HostError::PropertyAccess {
				property,
				message: message.clone(),
			}),
			None => Ok(()),
		}
	}

	fn anchors(&self, kind: PageKind) -> &[AnchorCandidate] {
		match kind {
			PageKind::Listing => self
				.listing
				.as_ref()
				.map(|listing| listing.anchors.as_slice())
				.unwrap_or_default(),
			PageKind::Watch => self
				.panel
				.as_ref()
				.map(|panel| panel.index_messages.as_slice())
				.unwrap_or_default(),
		}
	}
}

impl TryFrom<&str> for SnapshotPage {
	type Error = serde_json::Error;

	fn try_from(text: &str) -> Result<Self, Self::Error> {
		serde_json::from_str(text)
	}
}

impl HostPage for SnapshotPage {
	fn address(&self) -> Result<String, HostError> {
		self.check("location")?;
		Ok(self.address.clone())
	}

	fn document_language(&self) -> Option<String> {
		self.language.clone()
	}

	fn has_playlist_panel(&self) -> Result<bool, HostError> {
		self.check("playlist panel")?;
		Ok(self.panel.is_some())
	}

	fn badge_texts(&self, kind: PageKind) -> Result<Vec<String>, HostError> {
		self.check("badge text")?;
		let texts = match kind {
			PageKind::Listing => self
				.listing
				.iter()
				.flat_map(|listing| &listing.items)
				.filter_map(|entry| entry.badge_text.clone())
				.collect(),
			PageKind::Watch => self
				.panel
				.iter()
				.flat_map(|panel| &panel.items)
				.filter_map(|entry| entry.badge_text.clone())
				.collect(),
		};
		Ok(texts)
	}

	fn listing_items(&self) -> Result<Vec<ListingItem>, HostError> {
		self.check("listing items")?;
		Ok(self
			.listing
			.iter()
			.flat_map(|listing| &listing.items)
			.map(|entry| entry.item.clone())
			.collect())
	}

	fn panel_items(&self) -> Result<Vec<PanelItem>, HostError> {
		self.check("panel items")?;
		Ok(self
			.panel
			.iter()
			.flat_map(|panel| &panel.items)
			.map(|entry| entry.item.clone())
			.collect())
	}

	fn anchor_candidates(&self, kind: PageKind) -> Result<Vec<AnchorCandidate>, HostError> {
		self.check("anchor candidates")?;
		Ok(self.anchors(kind).to_vec())
	}

	fn has_listing_header(&self) -> Result<bool, HostError> {
		self.check("playlist header")?;
		Ok(self.listing.as_ref().is_some_and(|listing| listing.header))
	}

	fn contains_element(&self, id: &str) -> bool {
		self.injected.iter().any(|(_, element)| element.id == id)
	}

	fn remove_element(&mut self, id: &str) {
		self.injected.retain(|(_, element)| element.id != id);
	}

	fn insert_element(&mut self, placement: Placement, element: InjectedElement) -> Result<(), HostError> {
		match placement {
			Placement::After { anchor } => {
				let anchor_exists = [PageKind::Listing, PageKind::Watch]
					.into_iter()
					.any(|kind| anchor < self.anchors(kind).len());
				if !anchor_exists {
					return Err(HostError::MissingAnchor(anchor));
				}
			}
			Placement::AppendToHeader => self.check("playlist header")?,
		}

		self.insertions += 1;
		self.injected.push((placement, element));
		Ok(())
	}

	fn apply_signal(&mut self, signal: &HostSignal) {
		signal.address().clone_into(&mut self.address);
	}
}
