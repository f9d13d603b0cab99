use std::path::Path;

use tempfile::TempDir;

use crate::Component;
use crate::ComponentContext;
use crate::PropBag;
use crate::PropDef;
use crate::PropSchema;
use crate::PropType;
use crate::PropValue;
use crate::Renderer;
use crate::TemplateRenderer;
use crate::ViewBuilder;
use crate::ViewModel;
use crate::WpceConfig;
use crate::WpceResult;
use crate::components::register_builtins;
use crate::props;

/// `{ color, label }`, both optional.
pub fn color_label_schema() -> PropSchema {
	PropSchema::builder()
		.props([PropDef::new("color"), PropDef::new("label")])
		.build()
		.unwrap_or_else(|e| panic!("fixture schema is valid: {e}"))
}

/// A context with only the built-in components and templates.
pub fn builtin_context() -> ComponentContext {
	ComponentContext::with_builtins(WpceConfig::default(), Path::new("."))
}

/// A context searching `dir` before the bundled templates.
pub fn context_with_templates(dir: &Path) -> ComponentContext {
	let renderer = TemplateRenderer::new(vec![dir.to_path_buf()]);
	let mut context = ComponentContext::new(WpceConfig::default(), renderer);
	register_builtins(&mut context, Path::new("."));
	context
}

/// A temporary template directory holding `files` as `(relative path,
/// source)` pairs.
pub fn template_dir(files: &[(&str, &str)]) -> TempDir {
	let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("temp dir: {e}"));
	for (relative, source) in files {
		let path = dir.path().join(relative);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create dir: {e}"));
		}
		std::fs::write(&path, source).unwrap_or_else(|e| panic!("write template: {e}"));
	}
	dir
}

/// A context whose `[svg]` data directory is `icons/` inside `dir`, holding
/// `check.svg` (path data) and `logo.svg` (inline markup). Only `check` has
/// an image config entry.
pub fn svg_context(dir: &Path) -> ComponentContext {
	for (name, data) in [("check", "M1 1L2 2\n"), ("logo", "<circle cx=\"8\" cy=\"8\" r=\"8\" />\n")] {
		let path = dir.join("icons").join(format!("{name}.svg"));
		std::fs::create_dir_all(dir.join("icons")).unwrap_or_else(|e| panic!("create dir: {e}"));
		std::fs::write(path, data).unwrap_or_else(|e| panic!("write svg: {e}"));
	}

	let config = WpceConfig::from_toml(
		r##"
[svg]
path = "icons"

[svg.images.check]
type = "path"
viewbox = "0 0 24 24"
default_color = "#333"
"##,
	)
	.unwrap_or_else(|e| panic!("fixture config is valid: {e}"));

	ComponentContext::with_builtins(config, dir)
}

/// Renders `<key>|<root classes>` so tests can see what reached the
/// renderer.
#[derive(Debug, Default)]
pub struct ClassRenderer;

impl Renderer for ClassRenderer {
	fn render(&self, key: &str, view: &ViewModel) -> WpceResult<String> {
		Ok(format!("{key}|{}", view.root_classes()))
	}
}

/// A menu rendering each item as a `Link` inside an `EntriesList`.
#[derive(Debug, Default)]
pub struct Menu;

impl Component for Menu {
	fn name(&self) -> &str {
		"Menu"
	}

	fn define_props(&self, _config: &WpceConfig) -> WpceResult<PropSchema> {
		let item = PropSchema::builder()
			.props([
				PropDef::new("label").required().types([PropType::String]),
				PropDef::new("url").required().types([PropType::String]),
			])
			.build()?;

		PropSchema::builder()
			.prop(PropDef::new("items").default(Vec::<PropValue>::new()).list_of(item))
			.build()
	}

	fn derive(&self, view: &mut ViewBuilder<'_>) -> WpceResult<()> {
		let mut entries = Vec::new();
		for item in view.get("items").as_list().unwrap_or_default() {
			let bag = PropBag::try_from(item.clone())?;
			entries.push(view.render_component("Link", &bag)?);
		}

		let list = view.render_component("EntriesList", &props! { "entries" => entries })?;
		view.set("listHtml", list);

		Ok(())
	}
}

/// A component whose schema declares the reserved `class` prop.
#[derive(Debug, Default)]
pub struct ClassProp;

impl Component for ClassProp {
	fn name(&self) -> &str {
		"ClassProp"
	}

	fn define_props(&self, _config: &WpceConfig) -> WpceResult<PropSchema> {
		PropSchema::builder().prop(PropDef::new("class")).build()
	}
}

pub const MENU_TEMPLATE: &str = r#"<nav class="{{ rootClasses }}">{{ listHtml }}</nav>"#;
