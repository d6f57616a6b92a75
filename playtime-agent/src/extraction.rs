use crate::host::address::PageAddress;
use crate::host::{HostError, HostPage};
use crate::playlist::duration::parse_duration;
use crate::playlist::locale::Locale;
use crate::playlist::locator::{locate_listing_item, locate_panel_item};
use crate::playlist::{PageKind, PlaylistSnapshot};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Extraction {
	/// Not a page that shows a playlist.
	NotPlaylistPage,
	/// A playlist page, but none of its badges held a usable duration (yet).
	NoData(PageKind),
	Snapshot(PlaylistSnapshot),
}

/// Determines which playlist layout, if any, the page currently shows.
pub fn classify_page<Page: HostPage + ?Sized>(page: &Page) -> Result<Option<PageKind>, HostError> {
	let address = PageAddress::parse(&page.address()?)?;
	if !address.is_supported_host() {
		return Ok(None);
	}

	if address.is_listing() {
		return Ok(Some(PageKind::Listing));
	}

	if address.has_playlist_query() && page.has_playlist_panel()? {
		return Ok(Some(PageKind::Watch));
	}

	Ok(None)
}

pub fn extract_snapshot<Page: HostPage + ?Sized>(page: &Page) -> Result<Extraction, HostError> {
	let Some(kind) = classify_page(page)? else {
		return Ok(Extraction::NotPlaylistPage);
	};

	let durations = page
		.badge_texts(kind)?
		.iter()
		.map(|text| parse_duration(text))
		.filter(|duration| !duration.is_zero())
		.collect::<Vec<_>>();
	if durations.is_empty() {
		debug!("No usable duration badges on {kind:?} page.");
		return Ok(Extraction::NoData(kind));
	}

	let locale = Locale::from_document_language(page.document_language().as_deref());
	let current_index = match kind {
		PageKind::Listing => locate_listing_item(&page.listing_items()?, locale),
		PageKind::Watch => locate_panel_item(&page.panel_items()?),
	};

	Ok(Extraction::Snapshot(PlaylistSnapshot::new(
		kind,
		locale,
		durations,
		current_index,
	)))
}
