use studio_domain::{Annotation, MemberRecord};

/// Overwrites comments, notes and tags on every record whose `member_id` matches.
///
/// Matching is by member rather than by row: a member with several purchases gets the same
/// annotation on each of them. No match leaves the collection untouched. Returns the number of
/// records the annotation was written to.
pub fn apply_annotation(
	records: &mut [MemberRecord],
	member_id: &str,
	annotation: &Annotation,
) -> usize {
	let mut matched = 0;

	for record in records.iter_mut().filter(|record| record.member_id == member_id) {
		record.set_annotation(annotation);

		matched += 1;
	}

	matched
}

#[cfg(test)]
mod tests {
	use studio_domain::Status;
	use studio_testkit::MemberBuilder;

	use super::*;

	#[test]
	fn empty_payload_clears_previous_values() {
		let mut records = vec![MemberBuilder::new("a").member_id("M1").build()];
		let first = Annotation {
			comments: "VIP".to_string(),
			notes: "Call back".to_string(),
			tags: vec!["gold".to_string(), "gold".to_string()],
		};

		apply_annotation(&mut records, "M1", &first);

		assert_eq!(records[0].tags, vec!["gold".to_string(), "gold".to_string()]);

		apply_annotation(&mut records, "M1", &Annotation::default());

		assert!(records[0].comments.is_empty());
		assert!(records[0].notes.is_empty());
		assert!(records[0].tags.is_empty());
		assert_eq!(records[0].status, Status::Active);
	}

	#[test]
	fn unknown_member_is_a_no_op() {
		let mut records = vec![MemberBuilder::new("a").member_id("M1").build()];
		let before = records.clone();
		let annotation = Annotation { comments: "x".to_string(), ..Annotation::default() };

		assert_eq!(apply_annotation(&mut records, "M9", &annotation), 0);
		assert_eq!(records, before);
	}
}
