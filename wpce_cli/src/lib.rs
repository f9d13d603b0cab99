use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Validate and render theme components.",
	long_about = "wpce validates prop bags against component schemas and renders components \
	              through their templates.\n\nQuick start:\n  wpce init      Create a wpce.toml \
	              file\n  wpce list      Show components and their props\n  wpce validate  \
	              Check a props file against a component\n  wpce render    Print the HTML of \
	              a component"
)]
pub struct WpceCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output. Debug logs are written to stderr.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Create a sample `wpce.toml` in the project root.
	///
	/// If the file already exists, this command is a no-op and exits
	/// successfully.
	Init,
	/// List the registered components and their props.
	List {
		/// Output format. Use `text` for human-readable output or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Validate a props file against a component schema.
	///
	/// Prints the resolved props, including defaults, as JSON. Exits with a
	/// non-zero status code when the props are invalid.
	Validate {
		/// Name of the component, e.g. `Button`.
		component: String,

		/// Props file in JSON, TOML or YAML format.
		#[arg(long)]
		props: PathBuf,
	},
	/// Render a component and print its HTML.
	Render {
		/// Name of the component, e.g. `Button`.
		component: String,

		/// Props file in JSON, TOML or YAML format. Without it the component
		/// is rendered with its defaults.
		#[arg(long)]
		props: Option<PathBuf>,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
