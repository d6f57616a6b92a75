use crate::playlist::PageKind;
use serde::{Deserialize, Serialize};
use static_assertions::assert_obj_safe;
use thiserror::Error;
use typed_builder::TypedBuilder;

pub mod address;
pub mod snapshot_page;

/// Access to the third party page the overlay is injected into.
///
/// Reads are fallible because the host markup can fail underneath us at any time. Missing
/// structure on the other hand is not an error, it shows up as empty collections or `false`.
pub trait HostPage {
	/// The full current address of the page, including path and query.
	fn address(&self) -> Result<String, HostError>;

	/// The `lang` attribute declared on the host's document element.
	fn document_language(&self) -> Option<String>;

	/// Whether the side panel listing the playlist next to the player is present.
	fn has_playlist_panel(&self) -> Result<bool, HostError>;

	/// Raw text of every duration badge of the given layout, in document order.
	fn badge_texts(&self, kind: PageKind) -> Result<Vec<String>, HostError>;

	fn listing_items(&self) -> Result<Vec<ListingItem>, HostError>;

	fn panel_items(&self) -> Result<Vec<PanelItem>, HostError>;

	/// Elements of the given layout that the overlay could be placed next to.
	fn anchor_candidates(&self, kind: PageKind) -> Result<Vec<AnchorCandidate>, HostError>;

	fn has_listing_header(&self) -> Result<bool, HostError>;

	fn contains_element(&self, id: &str) -> bool;

	fn remove_element(&mut self, id: &str);

	fn insert_element(&mut self, placement: Placement, element: InjectedElement) -> Result<(), HostError>;

	/// Hosts that only mirror a page (rather than being the page) follow navigation here.
	fn apply_signal(&mut self, _signal: &HostSignal) {}
}

assert_obj_safe!(HostPage);

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HostError {
	#[error("Failed to access '{property}' on the host page: {message}")]
	PropertyAccess { property: &'static str, message: String },
	#[error("Host address '{address}' is invalid: {source}")]
	InvalidAddress {
		address: String,
		#[source]
		source: url::ParseError,
	},
	#[error("Anchor #{0} doesn't exist (anymore).")]
	MissingAnchor(usize),
}

/// Notification that the host page changed without a full reload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostSignal {
	/// The address changed, e.g. through the history API or back/forward navigation.
	Navigated { address: String },
	/// The DOM subtree changed (class/style/hidden attributes or inserted/removed nodes).
	ContentChanged { address: String },
}

impl HostSignal {
	pub fn address(&self) -> &str {
		match self {
			HostSignal::Navigated { address } | HostSignal::ContentChanged { address } => address,
		}
	}
}

/// An item of the full playlist listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingItem {
	/// The "now playing" overlay on the thumbnail, if the host rendered one.
	pub now_playing_overlay: Option<OverlayIndicator>,
	pub accessibility_labels: Vec<String>,
	pub overlay_text: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayIndicator {
	pub hidden: bool,
}

/// An item of the side panel on the watch page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelItem {
	pub selected: bool,
	/// Content of the index cell, either the position or a play glyph.
	pub index_text: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorCandidate {
	pub text: String,
	pub hidden: bool,
	pub class_name: Option<String>,
	pub style: HostStyle,
}

/// The subset of an element's computed style that the overlay copies.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostStyle {
	pub color: String,
	pub font_family: String,
	pub font_size: String,
	pub font_weight: String,
	pub line_height: String,
}

impl HostStyle {
	pub fn to_css(&self) -> String {
		format!(
			"color: {}; font-family: {}; font-size: {}; font-weight: {}; line-height: {};",
			self.color, self.font_family, self.font_size, self.font_weight, self.line_height
		)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
	/// Directly after the anchor candidate with this index.
	After { anchor: usize },
	/// As last child of the playlist header.
	AppendToHeader,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementTag {
	Div,
	Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
pub struct InjectedElement {
	#[builder(setter(into))]
	pub id: String,
	pub tag: ElementTag,
	#[builder(setter(into))]
	pub text: String,
	#[builder(setter(into))]
	pub style: String,
	#[builder(default)]
	pub class_name: Option<String>,
}
