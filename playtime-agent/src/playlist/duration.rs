use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use std::iter::Sum;

/// Length of a playlist item in whole seconds.
#[derive(
	Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Seconds(u64);

impl Seconds {
	pub const ZERO: Seconds = Seconds(0);

	pub const fn new(seconds: u64) -> Self {
		Self(seconds)
	}

	pub const fn as_u64(self) -> u64 {
		self.0
	}

	pub const fn is_zero(self) -> bool {
		self.0 == 0
	}

	#[must_use]
	pub const fn saturating_sub(self, other: Seconds) -> Seconds {
		Seconds(self.0.saturating_sub(other.0))
	}
}

impl Sum for Seconds {
	fn sum<Iter: Iterator<Item = Self>>(iter: Iter) -> Self {
		Seconds(iter.map(|seconds| seconds.0).fold(0, u64::saturating_add))
	}
}

impl<'a> Sum<&'a Seconds> for Seconds {
	fn sum<Iter: Iterator<Item = &'a Seconds>>(iter: Iter) -> Self {
		iter.copied().sum()
	}
}

/// Parses a duration badge like `4:14` or `1:30:45`.
///
/// Anything that isn't two or three colon separated numbers is treated as unparseable and yields
/// [`Seconds::ZERO`]. Callers filter those out before aggregating.
pub fn parse_duration(text: &str) -> Seconds {
	let components = text
		.trim()
		.split(':')
		.map(|component| component.trim().parse::<u64>().ok())
		.collect::<Option<Vec<_>>>();

	let seconds = match components.as_deref() {
		Some([minutes, seconds]) => minutes.saturating_mul(60).saturating_add(*seconds),
		Some([hours, minutes, seconds]) => hours
			.saturating_mul(3600)
			.saturating_add(minutes.saturating_mul(60))
			.saturating_add(*seconds),
		_ => 0,
	};

	Seconds(seconds)
}
