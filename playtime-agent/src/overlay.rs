use crate::host::{AnchorCandidate, ElementTag, HostError, HostPage, InjectedElement, Placement};
use crate::playlist::format::{DurationStyle, format_duration};
use crate::playlist::{PageKind, PlaylistSnapshot};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Identifier of the element injected into the full playlist listing.
pub const LISTING_ELEMENT_ID: &str = "playlist-total-time";
/// Identifier of the element injected into the watch page's side panel.
pub const PANEL_ELEMENT_ID: &str = "playlist-panel-time";

const HEADER_FALLBACK_STYLE: &str =
	"color: #030303; font-size: 14px; margin-top: 8px; padding-left: 24px; font-family: Roboto, Arial, sans-serif;";

static VIDEO_COUNT: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\d+\s*(videos?|동영상)").expect("Invalid video count pattern"));
static POSITION_IN_PLAYLIST: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\d+\s*/\s*\d+$").expect("Invalid playlist position pattern"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
	Injected { id: &'static str, placement: Placement },
	/// None of the expected elements were on the page, nothing was injected.
	NoTarget,
}

pub fn has_result_element<Page: HostPage + ?Sized>(page: &Page) -> bool {
	page.contains_element(LISTING_ELEMENT_ID) || page.contains_element(PANEL_ELEMENT_ID)
}

/// Replaces whatever a previous run injected with the totals of `snapshot`.
pub fn render<Page: HostPage + ?Sized>(page: &mut Page, snapshot: &PlaylistSnapshot) -> Result<RenderOutcome, HostError> {
	page.remove_element(LISTING_ELEMENT_ID);
	page.remove_element(PANEL_ELEMENT_ID);

	let target = match snapshot.kind {
		PageKind::Listing => listing_element(&*page, snapshot)?,
		PageKind::Watch => panel_element(&*page, snapshot)?,
	};

	let Some((placement, element)) = target else {
		debug!("Found no place for the overlay on the {:?} page.", snapshot.kind);
		return Ok(RenderOutcome::NoTarget);
	};

	let id = match snapshot.kind {
		PageKind::Listing => LISTING_ELEMENT_ID,
		PageKind::Watch => PANEL_ELEMENT_ID,
	};
	page.insert_element(placement, element)?;
	Ok(RenderOutcome::Injected { id, placement })
}

fn listing_element<Page: HostPage + ?Sized>(
	page: &Page,
	snapshot: &PlaylistSnapshot,
) -> Result<Option<(Placement, InjectedElement)>, HostError> {
	let total = snapshot.progress().total;
	let duration_text = format_duration(total, DurationStyle::Words(snapshot.locale));

	let anchors = page.anchor_candidates(PageKind::Listing)?;
	let video_count = anchors
		.iter()
		.enumerate()
		.find(|(_, anchor)| looks_like_video_count(&anchor.text))
		.or_else(|| {
			anchors
				.iter()
				.enumerate()
				.find(|(_, anchor)| loosely_mentions_videos(&anchor.text))
		});
	if let Some((index, anchor)) = video_count {
		let element = InjectedElement::builder()
			.id(LISTING_ELEMENT_ID)
			.tag(ElementTag::Div)
			.text(format!("{} {duration_text}", snapshot.locale.total_duration_label()))
			.style(format!("{} margin-top: 4px; display: block;", anchor.style.to_css()))
			.class_name(non_empty_class(anchor))
			.build();
		return Ok(Some((Placement::After { anchor: index }, element)));
	}

	if page.has_listing_header()? {
		let element = InjectedElement::builder()
			.id(LISTING_ELEMENT_ID)
			.tag(ElementTag::Div)
			.text(duration_text)
			.style(HEADER_FALLBACK_STYLE)
			.build();
		return Ok(Some((Placement::AppendToHeader, element)));
	}

	Ok(None)
}

fn panel_element<Page: HostPage + ?Sized>(
	page: &Page,
	snapshot: &PlaylistSnapshot,
) -> Result<Option<(Placement, InjectedElement)>, HostError> {
	let total = snapshot.progress().total;
	let anchors = page.anchor_candidates(PageKind::Watch)?;

	let target = anchors
		.iter()
		.enumerate()
		.find(|(_, anchor)| !anchor.hidden && POSITION_IN_PLAYLIST.is_match(anchor.text.trim()))
		.map(|(index, anchor)| {
			let element = InjectedElement::builder()
				.id(PANEL_ELEMENT_ID)
				.tag(ElementTag::Span)
				.text(format!("🕒 {}", format_duration(total, DurationStyle::Digital)))
				.style(format!(
					"{} margin-left: auto; padding-left: 8px; float: right;",
					anchor.style.to_css()
				))
				.build();
			(Placement::After { anchor: index }, element)
		});
	Ok(target)
}

fn looks_like_video_count(text: &str) -> bool {
	(text.contains("동영상") && text.contains('개')) || VIDEO_COUNT.is_match(text)
}

/// Short texts that merely talk about videos, for hosts that reworded the video count.
fn loosely_mentions_videos(text: &str) -> bool {
	const MAXIMUM_LENGTH: usize = 100;

	let text = text.trim();
	text.chars().count() < MAXIMUM_LENGTH
		&& ((text.contains("동영상") && text.contains('개')) || text.contains("video"))
}

fn non_empty_class(anchor: &AnchorCandidate) -> Option<String> {
	anchor
		.class_name
		.as_ref()
		.filter(|class_name| !class_name.is_empty())
		.cloned()
}
