mod common;

use serde_json::Value;
use wpce_core::AnyEmptyResult;

#[test]
fn list_shows_builtin_components() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::wpce_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Components:"))
		.stdout(predicates::str::contains("  Link\n"))
		.stdout(predicates::str::contains("label: string (required)"))
		.stdout(predicates::str::contains("InputField (template: Field)"))
		.stdout(predicates::str::contains("11 component(s)"));

	Ok(())
}

#[test]
fn list_json_describes_props() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	let output = common::wpce_cmd()
		.arg("list")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;
	assert!(output.status.success());

	let listings: Value = serde_json::from_slice(&output.stdout)?;
	let listings = listings.as_array().ok_or("expected an array")?;
	assert_eq!(listings.len(), 11);

	let link = listings
		.iter()
		.find(|listing| listing["name"] == "Link")
		.ok_or("Link is listed")?;
	assert_eq!(link["template"], "Link");

	let props = link["props"].as_array().ok_or("expected props")?;
	let names: Vec<&str> = props.iter().filter_map(|prop| prop["name"].as_str()).collect();
	assert_eq!(names, ["label", "target", "url"]);
	assert_eq!(props[0]["required"], true);
	assert_eq!(props[0]["types"], serde_json::json!(["string"]));

	Ok(())
}

#[test]
fn list_reports_invalid_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("wpce.toml"), "[components\n")?;

	common::wpce_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}
