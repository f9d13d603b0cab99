use super::attribute;
use crate::Component;
use crate::PropDef;
use crate::PropSchema;
use crate::PropValue;
use crate::ViewBuilder;
use crate::WpceConfig;
use crate::WpceResult;

/// Notice types. A notice without a type is rendered hidden.
pub const NOTICE_TYPES: [&str; 4] = ["info", "warning", "error", "success"];

/// A dismissible message box, toggled by scripts through its `data-jshandle`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Notice;

impl Component for Notice {
	fn name(&self) -> &str {
		"Notice"
	}

	fn define_props(&self, _config: &WpceConfig) -> WpceResult<PropSchema> {
		let types = std::iter::once(PropValue::Null).chain(NOTICE_TYPES.map(PropValue::from));

		PropSchema::builder()
			.props([
				PropDef::new("jshandle").default("notice"),
				PropDef::new("messageHtml").html(),
				PropDef::new("type").allowed_values(types),
			])
			.build()
	}

	fn derive(&self, view: &mut ViewBuilder<'_>) -> WpceResult<()> {
		let style = if view.get("type").is_null() {
			PropValue::html("style=\"display: none;\"")
		} else {
			PropValue::Null
		};
		let jshandle = attribute("data-jshandle", view.get_str("jshandle"));
		let type_class = view.get_str("type").map(|kind| format!("type-{kind}"));

		view.set("styleAttr", style);
		view.set("jshandleAttr", jshandle);
		view.add_class(type_class.as_deref());

		Ok(())
	}
}
