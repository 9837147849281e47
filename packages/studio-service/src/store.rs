use studio_domain::{Annotation, MemberRecord};

use crate::annotate;

/// The single current collection of records.
///
/// Replaced wholesale on load or refresh. Patched in place only by annotations, which keep
/// record identity.
#[derive(Debug, Default)]
pub struct RecordStore {
	records: Vec<MemberRecord>,
	generation: u64,
}
impl RecordStore {
	pub fn records(&self) -> &[MemberRecord] {
		&self.records
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Number of successful replacements so far. Zero means nothing has loaded yet.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	pub fn is_loaded(&self) -> bool {
		self.generation > 0
	}

	pub fn replace(&mut self, records: Vec<MemberRecord>) {
		self.records = records;
		self.generation += 1;
	}

	/// Returns the number of records changed.
	pub fn annotate(&mut self, member_id: &str, annotation: &Annotation) -> usize {
		annotate::apply_annotation(&mut self.records, member_id, annotation)
	}
}
