use crate::playlist::duration::Seconds;
use crate::playlist::locale::Locale;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DurationStyle {
	/// `1h 30m 45s` with the unit words of the given locale.
	Words(Locale),
	/// `1:30:45`, minutes and seconds padded to two digits.
	Digital,
}

pub fn format_duration(duration: Seconds, style: DurationStyle) -> String {
	let total_seconds = duration.as_u64();
	let hours = total_seconds / 3600;
	let minutes = (total_seconds % 3600) / 60;
	let seconds = total_seconds % 60;

	match style {
		DurationStyle::Words(locale) => {
			let units = locale.time_units();
			if hours > 0 {
				format!(
					"{hours}{} {minutes}{} {seconds}{}",
					units.hour, units.minute, units.second
				)
			} else {
				format!("{minutes}{} {seconds}{}", units.minute, units.second)
			}
		}
		DurationStyle::Digital => {
			if hours > 0 {
				format!("{hours}:{minutes:02}:{seconds:02}")
			} else {
				format!("{minutes:02}:{seconds:02}")
			}
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn digital_style_should_include_hours_when_present() {
		assert_eq!("1:30:45", format_duration(Seconds::new(5445), DurationStyle::Digital));
		assert_eq!("10:00:00", format_duration(Seconds::new(36000), DurationStyle::Digital));
	}

	#[test]
	fn digital_style_should_pad_minutes_and_seconds() {
		assert_eq!("01:05", format_duration(Seconds::new(65), DurationStyle::Digital));
		assert_eq!("04:14", format_duration(Seconds::new(254), DurationStyle::Digital));
		assert_eq!("1:01:01", format_duration(Seconds::new(3661), DurationStyle::Digital));
		assert_eq!("00:00", format_duration(Seconds::ZERO, DurationStyle::Digital));
	}

	#[test]
	fn word_style_should_omit_hours_when_zero() {
		assert_eq!(
			"4m 14s",
			format_duration(Seconds::new(254), DurationStyle::Words(Locale::English))
		);
	}

	#[test]
	fn word_style_should_use_english_units() {
		assert_eq!(
			"1h 30m 45s",
			format_duration(Seconds::new(5445), DurationStyle::Words(Locale::English))
		);
	}

	#[test]
	fn word_style_should_use_korean_units() {
		assert_eq!(
			"1시간 30분 45초",
			format_duration(Seconds::new(5445), DurationStyle::Words(Locale::Korean))
		);
		assert_eq!(
			"0분 7초",
			format_duration(Seconds::new(7), DurationStyle::Words(Locale::Korean))
		);
	}
}
