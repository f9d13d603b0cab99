use std::path::Path;
use std::path::PathBuf;

use crate::Component;
use crate::PropDef;
use crate::PropSchema;
use crate::PropType;
use crate::PropValue;
use crate::ViewBuilder;
use crate::WpceConfig;
use crate::WpceResult;
use crate::config::SvgImageKind;
use crate::html::Attributes;
use crate::html::element;

/// Fill of `path` images when neither the prop nor the image config sets one.
pub const DEFAULT_SVG_COLOR: &str = "currentColor";

/// An SVG image loaded from the `[svg]` data directory.
///
/// In `raw` mode the `<svg>` element carries the root classes. In `wrapped`
/// mode it is placed inside a `wrapperTag` element which carries them
/// instead. Unknown images render as an empty string.
#[derive(Debug, Clone, Default)]
pub struct Svg {
	dir: Option<PathBuf>,
}

impl Svg {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self {
			dir: Some(dir.into()),
		}
	}

	pub fn from_config(config: &WpceConfig, root: &Path) -> Self {
		Self {
			dir: config.svg_dir(root),
		}
	}

	/// The data file of image `name`, or `None` when it does not exist.
	fn load(&self, name: &str) -> WpceResult<Option<String>> {
		let Some(dir) = &self.dir else {
			return Ok(None);
		};

		let path = dir.join(format!("{name}.svg"));
		if !path.is_file() {
			return Ok(None);
		}

		tracing::trace!(path = %path.display(), "loading svg image");
		Ok(Some(std::fs::read_to_string(path)?))
	}
}

impl Component for Svg {
	fn name(&self) -> &str {
		"Svg"
	}

	fn define_props(&self, _config: &WpceConfig) -> WpceResult<PropSchema> {
		PropSchema::builder()
			.props([
				PropDef::new("color")
					.types([PropType::Null, PropType::String])
					.describe("fill of path images"),
				PropDef::new("displayMode")
					.default("raw")
					.allowed_values(["raw", "wrapped"]),
				PropDef::new("imgName")
					.required()
					.types([PropType::String])
					.allowed_by("image name", is_image_name),
				PropDef::new("size")
					.default("auto")
					.types([PropType::String, PropType::Int, PropType::Float, PropType::List])
					.allowed_by("size or [width, height] pair", is_size),
				PropDef::new("sizeUnit").default("rem").types([PropType::String]),
				PropDef::new("svgClass").types([PropType::Null, PropType::String]),
				PropDef::new("wrapperClass").types([PropType::Null, PropType::String]),
				PropDef::new("wrapperTag")
					.default("i")
					.allowed_by("tag name", is_tag_name),
			])
			.build()
	}

	fn derive(&self, view: &mut ViewBuilder<'_>) -> WpceResult<()> {
		let name = view.get_str("imgName").unwrap_or_default().to_string();
		let Some(data) = self.load(&name)? else {
			tracing::warn!(image = %name, "svg image not found");
			return Ok(());
		};

		let image = view
			.context()
			.config()
			.svg
			.images
			.get(&name)
			.cloned()
			.unwrap_or_default();

		let unit = view.get_str("sizeUnit").unwrap_or_default().to_string();
		let (width, height) = match view.get("size") {
			PropValue::List(pair) => {
				match pair.as_slice() {
					[width, height] => (dimension(width, &unit), dimension(height, &unit)),
					_ => (String::from("auto"), String::from("auto")),
				}
			}
			size => (dimension(size, &unit), dimension(size, &unit)),
		};
		let style = format!(
			"min-width: {width}; max-width: {width}; width: {width}; min-height: {height}; \
			 max-height: {height}; height: {height};"
		);

		let content = match image.kind {
			SvgImageKind::Path => {
				let fill = view
					.get_str("color")
					.filter(|color| !color.is_empty())
					.map(ToString::to_string)
					.or(image.default_color)
					.unwrap_or_else(|| DEFAULT_SVG_COLOR.to_string());
				let attrs = Attributes::new().with("d", data.trim()).with("fill", fill);
				element("path", &attrs, None)
			}
			SvgImageKind::Inline => data.trim().to_string(),
		};

		let svg_class = view.get_str("svgClass").map(ToString::to_string);
		let wrapper_class = view.get_str("wrapperClass").map(ToString::to_string);
		let wrapped = view.get_str("displayMode") == Some("wrapped");

		let svg_class = if wrapped {
			view.classes_mut().add(wrapper_class.as_deref(), false);
			svg_class.filter(|class| !class.is_empty())
		} else {
			view.classes_mut().add(svg_class.as_deref(), false);
			Some(view.classes().render())
		};

		let attrs = Attributes::new()
			.with("class", svg_class)
			.with("style", style)
			.with("viewBox", image.viewbox);
		let mut html = element("svg", &attrs, Some(&content));

		if wrapped {
			let tag = view.get_str("wrapperTag").unwrap_or("i").to_string();
			let attrs = Attributes::new().with("class", view.classes().render());
			html = element(&tag, &attrs, Some(&html));
		}

		view.set("svgHtml", PropValue::Html(html));

		Ok(())
	}
}

/// `value` with `unit` appended, unless it is `auto`.
fn dimension(value: &PropValue, unit: &str) -> String {
	let value = value.to_text();
	if value == "auto" {
		value
	} else {
		format!("{value}{unit}")
	}
}

fn is_scalar_size(value: &PropValue) -> bool {
	matches!(
		value,
		PropValue::String(_) | PropValue::Int(_) | PropValue::Float(_)
	)
}

fn is_size(value: &PropValue) -> bool {
	match value {
		PropValue::List(pair) => pair.len() == 2 && pair.iter().all(is_scalar_size),
		other => is_scalar_size(other),
	}
}

/// Image names are file stems. Path separators and leading dots are
/// rejected so names cannot leave the data directory.
fn is_image_name(value: &PropValue) -> bool {
	value.as_str().is_some_and(|name| {
		!name.is_empty()
			&& !name.starts_with('.')
			&& name
				.chars()
				.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'))
	})
}

fn is_tag_name(value: &PropValue) -> bool {
	value.as_str().is_some_and(|tag| {
		tag.chars().next().is_some_and(|ch| ch.is_ascii_alphabetic())
			&& tag.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
	})
}
