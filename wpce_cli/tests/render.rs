mod common;

use wpce_core::AnyEmptyResult;

#[test]
fn render_prints_escaped_html() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let props_path = tmp.path().join("link.json");
	std::fs::write(&props_path, r#"{ "label": "Docs & help", "url": "/docs" }"#)?;

	common::wpce_cmd()
		.arg("render")
		.arg("Link")
		.arg("--props")
		.arg(&props_path)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("<a class=\"c-Link\" href=\"/docs\">Docs &amp; help</a>\n");

	Ok(())
}

#[test]
fn render_without_props_uses_defaults() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::wpce_cmd()
		.arg("render")
		.arg("EditorContent")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("<div class=\"c-EditorContent\"></div>\n");

	Ok(())
}

#[test]
fn render_uses_configured_prefix() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("wpce.toml"),
		"[components]\nroot_name_prefix = \"ui-\"\n",
	)?;
	let props_path = tmp.path().join("link.yaml");
	std::fs::write(&props_path, "label: Docs\nurl: /docs\n")?;

	common::wpce_cmd()
		.arg("render")
		.arg("Link")
		.arg("--props")
		.arg(&props_path)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(r#"class="ui-Link""#));

	Ok(())
}

#[test]
fn render_prefers_project_templates() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("wpce.toml"),
		"[templates]\npaths = [\"components\"]\n",
	)?;
	std::fs::create_dir_all(tmp.path().join("components/Link"))?;
	std::fs::write(
		tmp.path().join("components/Link/Link.html"),
		r#"<span class="{{ rootClasses }}">{{ label }}</span>"#,
	)?;
	let props_path = tmp.path().join("link.json");
	std::fs::write(&props_path, r#"{ "label": "Docs", "url": "/docs" }"#)?;

	common::wpce_cmd()
		.arg("render")
		.arg("Link")
		.arg("--props")
		.arg(&props_path)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("<span class=\"c-Link\">Docs</span>\n");

	Ok(())
}

#[test]
fn render_reads_svg_images_relative_to_the_project() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("wpce.toml"), "[svg]\npath = \"icons\"\n")?;
	std::fs::create_dir_all(tmp.path().join("icons"))?;
	std::fs::write(tmp.path().join("icons/dot.svg"), "<circle r=\"1\" />\n")?;
	let props_path = tmp.path().join("svg.json");
	std::fs::write(&props_path, r#"{ "imgName": "dot" }"#)?;

	common::wpce_cmd()
		.arg("render")
		.arg("Svg")
		.arg("--props")
		.arg(&props_path)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(r#"viewBox="0 0 16 16"><circle r="1" /></svg>"#));

	Ok(())
}

#[test]
fn render_reports_invalid_allowed_value() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let props_path = tmp.path().join("link.json");
	std::fs::write(
		&props_path,
		r#"{ "label": "Docs", "url": "/docs", "target": "_new" }"#,
	)?;

	common::wpce_cmd()
		.arg("render")
		.arg("Link")
		.arg("--props")
		.arg(&props_path)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("prop `target` has invalid value"));

	Ok(())
}

#[test]
fn verbose_logs_to_stderr() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::wpce_cmd()
		.arg("render")
		.arg("EditorContent")
		.arg("--verbose")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("<div class=\"c-EditorContent\"></div>\n")
		.stderr(predicates::str::contains("rendered component"));

	Ok(())
}
