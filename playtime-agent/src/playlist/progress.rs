use crate::playlist::duration::Seconds;

/// Aggregated durations of a playlist up to and including the current item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressResult {
	pub total: Seconds,
	pub watched: Seconds,
	pub remaining: Seconds,
	/// `watched / total` in percent, rounded to one decimal place.
	pub progress_percent: f64,
	/// 1-based position of the current item, 0 for an empty playlist.
	pub current_item: usize,
	pub item_count: usize,
}

/// Computes the progress through a playlist where every item up to and including `current_index`
/// counts as watched. An index past the end is clamped to the last item.
pub fn compute_progress(durations: &[Seconds], current_index: usize) -> ProgressResult {
	let total = durations.iter().sum::<Seconds>();
	let watched_count = if durations.is_empty() {
		0
	} else {
		current_index.min(durations.len() - 1) + 1
	};
	let watched = durations[..watched_count].iter().sum::<Seconds>();
	let remaining = total.saturating_sub(watched);

	ProgressResult {
		total,
		watched,
		remaining,
		progress_percent: percentage(watched, total),
		current_item: watched_count,
		item_count: durations.len(),
	}
}

#[allow(clippy::cast_precision_loss)]
fn percentage(part: Seconds, whole: Seconds) -> f64 {
	if whole.is_zero() {
		return 0.0;
	}

	let percent = part.as_u64() as f64 / whole.as_u64() as f64 * 100.0;
	((percent * 10.0).round() / 10.0).clamp(0.0, 100.0)
}
