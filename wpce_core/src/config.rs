use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::DEFAULT_CLASS_SEPARATOR;
use crate::DEFAULT_ROOT_NAME_PREFIX;
use crate::PropBag;
use crate::PropValue;
use crate::WpceError;
use crate::WpceResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["wpce.toml", ".wpce.toml", ".config/wpce.toml"];

/// File extension of component templates unless configured otherwise.
pub const DEFAULT_TEMPLATE_EXTENSION: &str = "html";

/// Configuration loaded from a `wpce.toml` file.
///
/// ```toml
/// [components]
/// root_name_prefix = "c-"
/// class_separator = "--"
///
/// [templates]
/// paths = ["components"]
/// extension = "html"
///
/// [site]
/// home_url = "/"
///
/// [svg]
/// path = "assets/svg"
///
/// [svg.images.check]
/// type = "path"
/// viewbox = "0 0 24 24"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WpceConfig {
	/// Root class naming.
	#[serde(default)]
	pub components: ComponentsConfig,
	/// Where component templates are looked up.
	#[serde(default)]
	pub templates: TemplatesConfig,
	/// Site-wide values used by built-in components.
	#[serde(default)]
	pub site: SiteConfig,
	/// Image data used by the `Svg` component.
	#[serde(default)]
	pub svg: SvgConfig,
}

/// `[components]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentsConfig {
	/// Prefix joined with a component name to form its root class, e.g.
	/// `c-` + `Button`.
	#[serde(default = "default_root_name_prefix")]
	pub root_name_prefix: String,
	/// Separator between the root class and a prefixed modifier, e.g.
	/// `c-Button` + `--` + `wide`.
	#[serde(default = "default_class_separator")]
	pub class_separator: String,
}

impl Default for ComponentsConfig {
	fn default() -> Self {
		Self {
			root_name_prefix: default_root_name_prefix(),
			class_separator: default_class_separator(),
		}
	}
}

/// `[templates]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesConfig {
	/// Directories holding one sub-directory per component. Searched in
	/// order, relative to the project root, before the bundled templates.
	#[serde(default)]
	pub paths: Vec<PathBuf>,
	/// Template file extension without the leading dot.
	#[serde(default = "default_template_extension")]
	pub extension: String,
	/// When true, the templates bundled with the built-in components are not
	/// used as a fallback.
	#[serde(default)]
	pub disable_builtin: bool,
}

impl Default for TemplatesConfig {
	fn default() -> Self {
		Self {
			paths: Vec::new(),
			extension: default_template_extension(),
			disable_builtin: false,
		}
	}
}

/// `[site]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
	/// URL of the home crumb in breadcrumbs.
	#[serde(default = "default_home_url")]
	pub home_url: String,
	/// Title of the home crumb in breadcrumbs.
	#[serde(default = "default_home_title")]
	pub home_title: String,
}

impl Default for SiteConfig {
	fn default() -> Self {
		Self {
			home_url: default_home_url(),
			home_title: default_home_title(),
		}
	}
}

/// `[svg]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SvgConfig {
	/// Directory holding one `<name>.svg` data file per image, relative to
	/// the project root.
	#[serde(default)]
	pub path: Option<PathBuf>,
	/// Settings per image name. Images without an entry are inline with the
	/// default view box.
	#[serde(default)]
	pub images: BTreeMap<String, SvgImageConfig>,
}

/// `[svg.images.<name>]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct SvgImageConfig {
	#[serde(default, rename = "type")]
	pub kind: SvgImageKind,
	#[serde(default = "default_svg_viewbox")]
	pub viewbox: String,
	/// Fill of a `path` image when the component gets no `color`.
	#[serde(default)]
	pub default_color: Option<String>,
}

impl Default for SvgImageConfig {
	fn default() -> Self {
		Self {
			kind: SvgImageKind::default(),
			viewbox: default_svg_viewbox(),
			default_color: None,
		}
	}
}

/// How the data file of an SVG image is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SvgImageKind {
	/// The file holds the `d` attribute of a single `<path>`.
	Path,
	/// The file holds the markup placed inside `<svg>`.
	#[default]
	Inline,
}

fn default_svg_viewbox() -> String {
	"0 0 16 16".to_string()
}

fn default_root_name_prefix() -> String {
	DEFAULT_ROOT_NAME_PREFIX.to_string()
}

fn default_class_separator() -> String {
	DEFAULT_CLASS_SEPARATOR.to_string()
}

fn default_template_extension() -> String {
	DEFAULT_TEMPLATE_EXTENSION.to_string()
}

fn default_home_url() -> String {
	"/".to_string()
}

fn default_home_title() -> String {
	"Home".to_string()
}

impl WpceConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> WpceResult<Option<WpceConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		tracing::debug!(path = %config_path.display(), "loading config");
		let content = std::fs::read_to_string(&config_path)?;
		Self::from_toml(&content).map(Some)
	}

	/// Load the config at `root`, falling back to defaults.
	pub fn load_or_default(root: &Path) -> WpceResult<WpceConfig> {
		Ok(Self::load(root)?.unwrap_or_default())
	}

	pub fn from_toml(content: &str) -> WpceResult<WpceConfig> {
		toml::from_str(content).map_err(|e| WpceError::ConfigParse(e.to_string()))
	}

	/// The SVG data directory resolved against `root`.
	pub fn svg_dir(&self, root: &Path) -> Option<PathBuf> {
		self.svg.path.as_ref().map(|path| root.join(path))
	}

	/// Template directories resolved against `root`.
	pub fn template_dirs(&self, root: &Path) -> Vec<PathBuf> {
		self.templates
			.paths
			.iter()
			.map(|path| {
				if path.is_absolute() {
					path.clone()
				} else {
					root.join(path)
				}
			})
			.collect()
	}
}

/// Read a props file into a [`PropBag`]. The format is chosen from the file
/// extension.
pub fn load_props_file(path: &Path) -> WpceResult<PropBag> {
	let path_display = path.display().to_string();
	let content = std::fs::read_to_string(path).map_err(|e| {
		WpceError::PropsFile {
			path: path_display.clone(),
			reason: e.to_string(),
		}
	})?;
	let format = path
		.extension()
		.and_then(|e| e.to_str())
		.unwrap_or("")
		.to_ascii_lowercase();

	parse_props(&content, &format, &path_display)
}

/// Parse props from `content` in the given format (`json`, `toml`, `yaml`
/// or `yml`).
pub fn parse_props(content: &str, format: &str, path_display: &str) -> WpceResult<PropBag> {
	let props_error = |reason: String| {
		WpceError::PropsFile {
			path: path_display.to_string(),
			reason,
		}
	};

	let value = match format {
		"json" => {
			let json: serde_json::Value =
				serde_json::from_str(content).map_err(|e| props_error(e.to_string()))?;
			PropValue::from_json(json)
		}
		"toml" => {
			let table: toml::Table = toml::from_str(content).map_err(|e| props_error(e.to_string()))?;
			toml_to_prop(toml::Value::Table(table))
		}
		"yaml" | "yml" => {
			let yaml: serde_json::Value =
				serde_yaml_ng::from_str(content).map_err(|e| props_error(e.to_string()))?;
			PropValue::from_json(yaml)
		}
		other => return Err(WpceError::UnsupportedPropsFormat(other.to_string())),
	};

	PropBag::try_from(value).map_err(|e| props_error(e.to_string()))
}

/// Convert a `toml::Value` to a [`PropValue`].
fn toml_to_prop(value: toml::Value) -> PropValue {
	match value {
		toml::Value::String(s) => PropValue::String(s),
		toml::Value::Integer(i) => PropValue::Int(i),
		toml::Value::Float(f) => PropValue::Float(f),
		toml::Value::Boolean(b) => PropValue::Bool(b),
		toml::Value::Datetime(dt) => PropValue::String(dt.to_string()),
		toml::Value::Array(arr) => PropValue::List(arr.into_iter().map(toml_to_prop).collect()),
		toml::Value::Table(table) => {
			PropValue::Map(
				table
					.into_iter()
					.map(|(k, v)| (k, toml_to_prop(v)))
					.collect(),
			)
		}
	}
}
