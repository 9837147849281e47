use std::{env, fs, path::PathBuf};

use studio_providers::{IssueKind, sample};

const SAMPLE: &str = r#"[
	{
		"uniqueId": "u1", "memberId": "M1", "firstName": "Asha", "lastName": "Rao",
		"email": "asha@example.com", "membershipName": "Studio Annual", "endDate": "2024-12-31",
		"location": "Bandra", "sessionsLeft": 4, "itemId": "I1", "orderDate": "2024-01-02",
		"soldBy": "Desk", "membershipId": "MS1", "frozen": "No", "paid": "Yes", "status": "Active"
	},
	{
		"uniqueId": "u1", "memberId": "M2", "firstName": "Dev", "lastName": "Shah",
		"email": "dev@example.com", "membershipName": "Studio Annual", "endDate": "2023-12-31",
		"location": "-", "sessionsLeft": 0, "itemId": "I2", "orderDate": "2023-01-02",
		"soldBy": "Desk", "membershipId": "MS2", "frozen": "No", "paid": "Yes", "status": "Expired",
		"tags": ["lapsed"]
	}
]"#;

fn temp_path(name: &str) -> PathBuf {
	let mut path = env::temp_dir();

	path.push(format!("studio_providers_{}_{name}", std::process::id()));

	path
}

#[tokio::test]
async fn sample_file_goes_through_ingest_checks() {
	let path = temp_path("sample.json");

	fs::write(&path, SAMPLE).expect("Failed to write sample file.");

	let result = sample::load(&path).await;

	fs::remove_file(&path).expect("Failed to remove sample file.");

	let report = result.expect("sample load failed");

	assert_eq!(report.records.len(), 1);
	assert_eq!(report.records[0].first_name, "Asha");
	assert_eq!(report.skipped(), 1);
	assert_eq!(report.issues[0].kind, IssueKind::DuplicateUniqueId { unique_id: "u1".to_string() });
}

#[tokio::test]
async fn missing_sample_file_is_an_io_error() {
	let err = sample::load(&temp_path("does-not-exist.json"))
		.await
		.expect_err("expected a missing file error");

	assert!(matches!(err, studio_providers::Error::Io(_)), "Unexpected error: {err}");
}

#[test]
fn malformed_sample_is_a_json_error() {
	let err = sample::parse("{\"not\": \"an array\"}").expect_err("expected a parse error");

	assert!(matches!(err, studio_providers::Error::SerdeJson(_)), "Unexpected error: {err}");
}
