use crate::playlist::duration::Seconds;
use crate::playlist::locale::Locale;
use crate::playlist::progress::{ProgressResult, compute_progress};
use serde::{Deserialize, Serialize};

pub mod duration;
pub mod format;
pub mod locale;
pub mod locator;
pub mod progress;

/// The two ways the host lays out a playlist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
	/// The full listing on a `/playlist` page.
	Listing,
	/// The side panel next to the player on a `/watch?list=…` page.
	Watch,
}

/// One consistent read of all visible item durations plus the current item.
///
/// Snapshots are taken fresh for every run and never merged with earlier ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistSnapshot {
	pub kind: PageKind,
	pub locale: Locale,
	durations: Vec<Seconds>,
	current_index: usize,
}

impl PlaylistSnapshot {
	/// Zero durations are dropped and `current_index` is clamped to the remaining items.
	pub fn new(kind: PageKind, locale: Locale, durations: Vec<Seconds>, current_index: usize) -> Self {
		let durations = durations
			.into_iter()
			.filter(|duration| !duration.is_zero())
			.collect::<Vec<_>>();
		let current_index = current_index.min(durations.len().saturating_sub(1));

		Self {
			kind,
			locale,
			durations,
			current_index,
		}
	}

	pub fn durations(&self) -> &[Seconds] {
		&self.durations
	}

	pub fn current_index(&self) -> usize {
		self.current_index
	}

	pub fn progress(&self) -> ProgressResult {
		compute_progress(&self.durations, self.current_index)
	}
}
