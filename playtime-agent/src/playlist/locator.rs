//! Heuristics for finding the item that is currently playing.
//!
//! Both locators fall back to the first item when nothing matches.

use crate::host::{ListingItem, PanelItem};
use crate::playlist::locale::Locale;

const PLAY_GLYPH: char = '▶';

/// Index of the currently playing item of the full playlist listing.
///
/// The dedicated "now playing" overlay is the most reliable marker, the accessibility label and
/// the overlay text are checked in case the host didn't render one.
pub fn locate_listing_item(items: &[ListingItem], locale: Locale) -> usize {
	items
		.iter()
		.position(|item| is_now_playing(item, locale))
		.unwrap_or_default()
}

fn is_now_playing(item: &ListingItem, locale: Locale) -> bool {
	let has_visible_overlay = item.now_playing_overlay.is_some_and(|overlay| !overlay.hidden);
	let labelled = item
		.accessibility_labels
		.iter()
		.any(|label| label.contains(locale.now_playing_label()));
	let has_overlay_text = item
		.overlay_text
		.as_deref()
		.is_some_and(|text| text.contains(locale.now_playing_text()));

	has_visible_overlay || labelled || has_overlay_text
}

/// Index of the currently playing item of the watch page's side panel.
pub fn locate_panel_item(items: &[PanelItem]) -> usize {
	items
		.iter()
		.position(|item| {
			item.selected
				|| item
					.index_text
					.as_deref()
					.is_some_and(|text| text.contains(PLAY_GLYPH))
		})
		.unwrap_or_default()
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::host::OverlayIndicator;

	fn panel_item(index_text: &str) -> PanelItem {
		PanelItem {
			selected: false,
			index_text: Some(index_text.to_string()),
		}
	}

	#[test]
	fn listing_should_find_the_visible_overlay() {
		let items = vec![
			ListingItem::default(),
			ListingItem {
				now_playing_overlay: Some(OverlayIndicator { hidden: true }),
				..Default::default()
			},
			ListingItem {
				now_playing_overlay: Some(OverlayIndicator { hidden: false }),
				..Default::default()
			},
		];

		assert_eq!(2, locate_listing_item(&items, Locale::English));
	}

	#[test]
	fn listing_should_match_the_localized_accessibility_label() {
		let items = vec![
			ListingItem::default(),
			ListingItem {
				accessibility_labels: vec!["지금 재생 중인 동영상".to_string()],
				..Default::default()
			},
		];

		assert_eq!(1, locate_listing_item(&items, Locale::Korean));
		assert_eq!(0, locate_listing_item(&items, Locale::English));
	}

	#[test]
	fn listing_should_match_the_overlay_text() {
		let items = vec![
			ListingItem::default(),
			ListingItem::default(),
			ListingItem {
				overlay_text: Some("  Now playing ".to_string()),
				..Default::default()
			},
		];

		assert_eq!(2, locate_listing_item(&items, Locale::English));
	}

	#[test]
	fn listing_should_default_to_the_first_item() {
		let items = vec![ListingItem::default(), ListingItem::default()];

		assert_eq!(0, locate_listing_item(&items, Locale::English));
		assert_eq!(0, locate_listing_item(&[], Locale::Korean));
	}

	#[test]
	fn panel_should_find_the_selected_item() {
		let items = vec![
			panel_item("1"),
			PanelItem {
				selected: true,
				index_text: Some("2".to_string()),
			},
		];

		assert_eq!(1, locate_panel_item(&items));
	}

	#[test]
	fn panel_should_find_the_play_glyph() {
		let items = vec![panel_item("1"), panel_item("2"), panel_item("▶"), panel_item("4")];

		assert_eq!(2, locate_panel_item(&items));
	}

	#[test]
	fn panel_should_pick_the_first_match() {
		let items = vec![
			panel_item("1"),
			panel_item("▶"),
			PanelItem {
				selected: true,
				index_text: None,
			},
		];

		assert_eq!(1, locate_panel_item(&items));
	}

	#[test]
	fn panel_should_default_to_the_first_item() {
		assert_eq!(0, locate_panel_item(&[panel_item("1"), panel_item("2")]));
	}
}
