use super::attribute;
use super::href;
use crate::Component;
use crate::PropDef;
use crate::PropSchema;
use crate::ViewBuilder;
use crate::WpceConfig;
use crate::WpceResult;

/// A button, rendered as a link when `url` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Button;

impl Component for Button {
	fn name(&self) -> &str {
		"Button"
	}

	fn define_props(&self, _config: &WpceConfig) -> WpceResult<PropSchema> {
		PropSchema::builder()
			.props([
				PropDef::new("color").describe("color theme, added as a `color-<color>` modifier"),
				PropDef::new("iconHtml").html().describe("icon markup"),
				PropDef::new("label"),
				PropDef::new("sublabel"),
				PropDef::new("target"),
				PropDef::new("url").describe("href value"),
			])
			.build()
	}

	fn derive(&self, view: &mut ViewBuilder<'_>) -> WpceResult<()> {
		let target = attribute("target", view.get_str("target"));
		let color = view.get_str("color").map(|color| format!("color-{color}"));
		let has_icon = view.is_truthy("iconHtml");
		let href = href(view.get_str("url"));

		view.set("targetAttr", target);
		view.set("href", href);
		view.add_class(color.as_deref());
		view.add_class_if(has_icon, Some("hasIcon"));

		Ok(())
	}
}
