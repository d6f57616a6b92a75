//! Statistics for the extension popup.
//!
//! The JSON shape is consumed by a separate UI and has to stay stable.

use crate::extraction::{Extraction, extract_snapshot};
use crate::host::HostPage;
use crate::playlist::PageKind;
use crate::playlist::format::{DurationStyle, format_duration};
use crate::playlist::locale::Locale;
use js_int::UInt;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
#[serde(tag = "type")]
pub enum PlaylistStatistics {
	#[serde(rename = "none")]
	NotPlaylistPage,
	NoData,
	Error {
		message: String,
	},
	Playlist(StatisticsPayload),
	Watch(StatisticsPayload),
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsPayload {
	pub total_duration: String,
	pub total_videos: UInt,
	/// 1-based
	pub current_video: UInt,
	pub remaining_time: String,
	pub progress: f64,
	pub total_seconds: UInt,
	pub remaining_seconds: UInt,
}

/// Extracts the statistics of the playlist the page currently shows.
///
/// Host failures don't propagate, they are reported as [`PlaylistStatistics::Error`].
pub fn query_statistics<Page: HostPage + ?Sized>(page: &Page) -> PlaylistStatistics {
	let snapshot = match extract_snapshot(page) {
		Ok(Extraction::NotPlaylistPage) => return PlaylistStatistics::NotPlaylistPage,
		Ok(Extraction::NoData(_)) => return PlaylistStatistics::NoData,
		Ok(Extraction::Snapshot(snapshot)) => snapshot,
		Err(error) => {
			warn!("Failed to extract playlist statistics: {error}");
			return PlaylistStatistics::Error {
				message: error.to_string(),
			};
		}
	};

	let progress = snapshot.progress();
	let style = DurationStyle::Words(Locale::English);
	let payload = StatisticsPayload {
		total_duration: format_duration(progress.total, style),
		total_videos: saturating_uint(progress.item_count),
		current_video: saturating_uint(progress.current_item),
		remaining_time: format_duration(progress.remaining, style),
		progress: progress.progress_percent,
		total_seconds: UInt::new_saturating(progress.total.as_u64()),
		remaining_seconds: UInt::new_saturating(progress.remaining.as_u64()),
	};

	match snapshot.kind {
		PageKind::Listing => PlaylistStatistics::Playlist(payload),
		PageKind::Watch => PlaylistStatistics::Watch(payload),
	}
}

fn saturating_uint(count: usize) -> UInt {
	UInt::new_saturating(u64::try_from(count).unwrap_or(u64::MAX))
}
