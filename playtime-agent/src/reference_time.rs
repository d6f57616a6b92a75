use std::time::Duration;
use tokio::time::Instant;

/// Monotonic clock of the agent. Reference times are durations since the timer was created.
///
/// Based on tokio's clock so that tests with paused time control it.
#[derive(Clone, Copy, Debug)]
pub struct ReferenceTimer(Instant);

impl ReferenceTimer {
	pub fn reference_time(&self) -> Duration {
		self.0.elapsed()
	}

	/// The instant at which the given reference time is reached.
	pub fn instant_at(&self, reference_time: Duration) -> Instant {
		self.0 + reference_time
	}
}

impl Default for ReferenceTimer {
	fn default() -> Self {
		Self(Instant::now())
	}
}
