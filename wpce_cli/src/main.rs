use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use wpce_cli::Commands;
use wpce_cli::OutputFormat;
use wpce_cli::WpceCli;
use wpce_core::ComponentContext;
use wpce_core::PropBag;
use wpce_core::PropSummary;
use wpce_core::config::CONFIG_FILE_CANDIDATES;
use wpce_core::config::load_props_file;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,dimmed) => {
		if color_enabled() {
			format!("{}", $text.dimmed())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

/// Environment variable holding the log filter, e.g. `WPCE_LOG=wpce_core=trace`.
const LOG_ENV: &str = "WPCE_LOG";

const SAMPLE_CONFIG: &str = "# wpce configuration\n\n[components]\n# Prefix of every root \
                             class, e.g. `c-Button`.\nroot_name_prefix = \"c-\"\n# Separator \
                             between the root class and a modifier, e.g. \
                             `c-Button--wide`.\nclass_separator = \"--\"\n\n[templates]\n# \
                             Directories holding one folder per component, searched before \
                             the bundled templates.\n# paths = [\"components\"]\nextension = \
                             \"html\"\n\n[site]\nhome_url = \"/\"\nhome_title = \"Home\"\n\n# \
                             Directory of `<name>.svg` files rendered by the Svg \
                             component.\n# [svg]\n# path = \"assets/svg\"\n";

fn main() {
	let args = WpceCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::List { format }) => run_list(&args, *format),
		Some(Commands::Validate { component, props }) => run_validate(&args, component, props),
		Some(Commands::Render { component, props }) => {
			run_render(&args, component, props.as_deref())
		}
		None => {
			eprintln!("No subcommand specified. Run `wpce --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<wpce_core::WpceError>() {
			Ok(wpce_err) => {
				let report: miette::Report = (*wpce_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `--verbose` forces `debug`, otherwise the filter is read
/// from `WPCE_LOG` and defaults to `warn`.
fn init_tracing(verbose: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
	};

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init();
}

fn resolve_root(args: &WpceCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_context(args: &WpceCli) -> Result<ComponentContext, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	tracing::debug!(root = %root.display(), "loading components");

	Ok(ComponentContext::load(&root)?)
}

fn run_init(args: &WpceCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);

	if let Some(existing) = CONFIG_FILE_CANDIDATES
		.iter()
		.map(|candidate| root.join(candidate))
		.find(|path| path.exists())
	{
		println!("Config file already exists: {}", existing.display());
		return Ok(());
	}

	let config_path = root.join(CONFIG_FILE_CANDIDATES[0]);
	std::fs::write(&config_path, SAMPLE_CONFIG)?;
	println!("Created {}", config_path.display());

	println!();
	println!("Next steps:");
	println!("  1. Run `wpce list` to see the available components");
	println!("  2. Write a props file, e.g. button.json:");
	println!("     {{ \"label\": \"Save\", \"color\": \"primary\" }}");
	println!("  3. Run `wpce render Button --props button.json`");

	Ok(())
}

#[derive(Serialize)]
struct ComponentListing {
	name: String,
	template: String,
	props: Vec<PropSummary>,
}

fn run_list(args: &WpceCli, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let context = load_context(args)?;

	let mut listings = Vec::new();
	for component in context.components() {
		let schema = context.schema(component.name())?;
		listings.push(ComponentListing {
			name: component.name().to_string(),
			template: component.template().to_string(),
			props: schema.summary(),
		});
	}

	match format {
		OutputFormat::Json => {
			println!("{}", serde_json::to_string_pretty(&listings)?);
		}
		OutputFormat::Text => {
			println!("{}", colored!("Components:", bold));
			for listing in &listings {
				let template = if listing.template == listing.name {
					String::new()
				} else {
					colored!(format!(" (template: {})", listing.template), dimmed)
				};
				println!("  {}{template}", listing.name);

				for prop in &listing.props {
					print_prop(prop, 4);
				}
			}
			println!("\n{} component(s)", listings.len());
		}
	}

	Ok(())
}

fn print_prop(prop: &PropSummary, indent: usize) {
	let types = if prop.types.is_empty() {
		"any".to_string()
	} else {
		prop.types
			.iter()
			.map(ToString::to_string)
			.collect::<Vec<_>>()
			.join(" | ")
	};
	let required = if prop.required {
		format!(" {}", colored!("(required)", red))
	} else {
		String::new()
	};
	let default = prop
		.default
		.as_ref()
		.map(|value| format!(" = {value}"))
		.unwrap_or_default();

	println!("{:indent$}{}: {types}{default}{required}", "", prop.name);

	for nested in prop.nested.iter().flatten() {
		print_prop(nested, indent + 2);
	}
}

fn run_validate(
	args: &WpceCli,
	component: &str,
	props_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
	let context = load_context(args)?;
	let bag = load_props_file(props_path)?;
	let resolved = context.resolve_props(component, &bag)?;

	eprintln!("{} props are valid for {component}", colored!("✓", green));
	println!("{}", serde_json::to_string_pretty(&resolved)?);

	Ok(())
}

fn run_render(
	args: &WpceCli,
	component: &str,
	props_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
	let context = load_context(args)?;
	let bag = match props_path {
		Some(path) => load_props_file(path)?,
		None => PropBag::new(),
	};

	println!("{}", context.render(component, &bag)?);

	Ok(())
}
