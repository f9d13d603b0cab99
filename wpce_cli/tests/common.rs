use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn wpce_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("wpce"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("WPCE_LOG");
	cmd
}
