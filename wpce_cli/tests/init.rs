mod common;

use wpce_core::AnyEmptyResult;
use wpce_core::WpceConfig;

#[test]
fn can_init() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let mut cmd = common::wpce_cmd();
	cmd.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Created"))
		.stdout(predicates::str::contains("wpce.toml"));

	let config_path = tmp.path().join("wpce.toml");
	assert!(config_path.exists());

	let content = std::fs::read_to_string(&config_path)?;
	assert!(content.contains("[components]"));
	assert!(content.contains("[templates]"));

	insta::assert_snapshot!(content, @r##"
	# wpce configuration

	[components]
	# Prefix of every root class, e.g. `c-Button`.
	root_name_prefix = "c-"
	# Separator between the root class and a modifier, e.g. `c-Button--wide`.
	class_separator = "--"

	[templates]
	# Directories holding one folder per component, searched before the bundled templates.
	# paths = ["components"]
	extension = "html"

	[site]
	home_url = "/"
	home_title = "Home"

	# Directory of `<name>.svg` files rendered by the Svg component.
	# [svg]
	# path = "assets/svg"
	"##);

	let config = WpceConfig::from_toml(&content)?;
	assert_eq!(config.components.root_name_prefix, "c-");
	assert_eq!(config.components.class_separator, "--");
	assert_eq!(config.site.home_title, "Home");

	Ok(())
}

#[test]
fn init_does_not_overwrite() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let config_path = tmp.path().join("wpce.toml");
	std::fs::write(&config_path, "existing config")?;

	let mut cmd = common::wpce_cmd();
	cmd.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already exists"));

	assert_eq!(std::fs::read_to_string(&config_path)?, "existing config");

	Ok(())
}

#[test]
fn init_respects_discovered_config_location() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join(".config"))?;
	std::fs::write(tmp.path().join(".config/wpce.toml"), "")?;

	let mut cmd = common::wpce_cmd();
	cmd.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already exists"));

	assert!(!tmp.path().join("wpce.toml").exists());

	Ok(())
}

#[test]
fn missing_subcommand_exits_with_usage_hint() {
	common::wpce_cmd()
		.assert()
		.code(1)
		.stderr(predicates::str::contains("No subcommand specified"));
}
