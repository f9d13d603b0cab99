//! Components shipped with the crate, each backed by a bundled template.

pub use breadcrumbs::*;
pub use button::*;
pub use editor_content::*;
pub use entries_list::*;
pub use field::*;
pub use image::*;
pub use link::*;
pub use notice::*;
pub use svg::*;

mod breadcrumbs;
mod button;
mod editor_content;
mod entries_list;
mod field;
mod image;
mod link;
mod notice;
mod svg;

use std::path::Path;

use crate::ComponentContext;
use crate::PropValue;
use crate::html::escape_html;
use crate::html::escape_url;

/// Register every built-in component with `context`. Files referenced by
/// the config, such as SVG image data, are resolved against `root`.
pub fn register_builtins(context: &mut ComponentContext, root: &Path) {
	let svg = Svg::from_config(context.config(), root);

	context
		.register(Breadcrumbs)
		.register(Button)
		.register(CheckboxField)
		.register(EditorContent)
		.register(EntriesList)
		.register(Image)
		.register(InputField)
		.register(Link)
		.register(Notice)
		.register(svg)
		.register(TextareaField);
}

/// A sanitized `href` value, or null when `url` is missing or empty.
pub(crate) fn href(url: Option<&str>) -> PropValue {
	match url.filter(|url| !url.is_empty()) {
		Some(url) => PropValue::Html(escape_url(url)),
		None => PropValue::Null,
	}
}

/// A raw `name="value"` attribute, or null when `value` is missing or empty.
pub(crate) fn attribute(name: &str, value: Option<&str>) -> PropValue {
	match value.filter(|value| !value.is_empty()) {
		Some(value) => PropValue::html(format!("{name}=\"{}\"", escape_html(value))),
		None => PropValue::Null,
	}
}
