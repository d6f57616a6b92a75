use serde::{Deserialize, Serialize};

/// The two locales the overlay knows. Everything that isn't Korean falls back to English.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
	Korean,
	#[default]
	English,
}

pub struct TimeUnits {
	pub hour: &'static str,
	pub minute: &'static str,
	pub second: &'static str,
}

impl Locale {
	/// Picks the locale from the `lang` attribute the host document declares.
	pub fn from_document_language(language: Option<&str>) -> Self {
		match language {
			Some(language) if language.starts_with("ko") => Locale::Korean,
			_ => Locale::English,
		}
	}

	pub fn time_units(self) -> TimeUnits {
		match self {
			Locale::Korean => TimeUnits {
				hour: "시간",
				minute: "분",
				second: "초",
			},
			Locale::English => TimeUnits {
				hour: "h",
				minute: "m",
				second: "s",
			},
		}
	}

	pub fn total_duration_label(self) -> &'static str {
		match self {
			Locale::Korean => "총 재생시간:",
			Locale::English => "Total duration:",
		}
	}

	/// Text the host shows on the thumbnail of the item that is currently playing.
	pub fn now_playing_text(self) -> &'static str {
		match self {
			Locale::Korean => "지금 재생 중",
			Locale::English => "Now playing",
		}
	}

	/// Substring of the accessibility label of the currently playing item.
	pub fn now_playing_label(self) -> &'static str {
		match self {
			Locale::Korean => "지금 재생",
			Locale::English => "Now playing",
		}
	}
}
