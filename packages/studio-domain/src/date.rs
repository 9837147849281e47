use time::{
	Date, OffsetDateTime, PrimitiveDateTime,
	format_description::{BorrowedFormatItem, well_known::Rfc3339},
	macros::format_description,
};

const ISO_DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const ISO_DATE_TIME: &[BorrowedFormatItem<'_>] =
	format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const SPACED_DATE_TIME: &[BorrowedFormatItem<'_>] =
	format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const US_DATE: &[BorrowedFormatItem<'_>] =
	format_description!("[month padding:none]/[day padding:none]/[year]");

/// Parses the date shapes that appear in membership sheets.
///
/// Values without an offset are taken as UTC. Date-only values resolve to midnight.
/// Returns `None` for anything else, which callers treat as failing every comparison.
pub fn parse_date_time(raw: &str) -> Option<OffsetDateTime> {
	let raw = raw.trim();

	if raw.is_empty() {
		return None;
	}
	if let Ok(value) = OffsetDateTime::parse(raw, &Rfc3339) {
		return Some(value);
	}

	for format in [ISO_DATE_TIME, SPACED_DATE_TIME] {
		if let Ok(value) = PrimitiveDateTime::parse(raw, &format) {
			return Some(value.assume_utc());
		}
	}
	for format in [ISO_DATE, US_DATE] {
		if let Ok(date) = Date::parse(raw, &format) {
			return Some(date.midnight().assume_utc());
		}
	}

	None
}

pub fn parse_date(raw: &str) -> Option<Date> {
	parse_date_time(raw).map(|value| value.date())
}

pub fn format_date(date: Date) -> String {
	date.format(&ISO_DATE).unwrap_or_else(|_| date.to_string())
}

#[cfg(test)]
mod tests {
	use time::macros::{date, datetime};

	use super::*;

	#[test]
	fn parses_iso_dates_at_midnight_utc() {
		assert_eq!(parse_date_time("2024-03-05"), Some(datetime!(2024-03-05 0:00 UTC)));
	}

	#[test]
	fn parses_rfc3339_with_offset() {
		assert_eq!(
			parse_date_time("2024-03-05T10:30:00+02:00"),
			Some(datetime!(2024-03-05 10:30 +02:00))
		);
	}

	#[test]
	fn parses_naive_timestamps_as_utc() {
		assert_eq!(parse_date_time("2024-03-05 08:15:00"), Some(datetime!(2024-03-05 8:15 UTC)));
		assert_eq!(parse_date_time("2024-03-05T08:15:00"), Some(datetime!(2024-03-05 8:15 UTC)));
	}

	#[test]
	fn rejects_garbage_and_blank() {
		assert_eq!(parse_date_time(""), None);
		assert_eq!(parse_date_time("   "), None);
		assert_eq!(parse_date_time("not a date"), None);
		assert_eq!(parse_date_time("2024-13-40"), None);
	}

	#[test]
	fn formats_as_iso() {
		assert_eq!(format_date(date!(2024-01-09)), "2024-01-09");
	}
}
