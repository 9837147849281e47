use crate::record::MemberRecord;

/// Case-insensitive substring match across every field of the record.
///
/// A blank term matches everything.
pub fn matches(record: &MemberRecord, term: &str) -> bool {
	let needle = term.to_lowercase();

	if needle.is_empty() {
		return true;
	}

	matches_lowercase(record, &needle)
}

fn matches_lowercase(record: &MemberRecord, needle: &str) -> bool {
	record.text_fields().iter().any(|field| contains_ci(field, needle))
		|| record.sessions_left.to_string().contains(needle)
		|| record.tags.iter().any(|tag| contains_ci(tag, needle))
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
	haystack.to_lowercase().contains(needle)
}
