use super::attribute;
use super::href;
use crate::Component;
use crate::PropDef;
use crate::PropSchema;
use crate::PropType;
use crate::PropValue;
use crate::ViewBuilder;
use crate::WpceConfig;
use crate::WpceResult;

/// Link targets accepted by [`Link`].
pub const LINK_TARGETS: [&str; 4] = ["_blank", "_self", "_parent", "_top"];

#[derive(Debug, Clone, Copy, Default)]
pub struct Link;

impl Component for Link {
	fn name(&self) -> &str {
		"Link"
	}

	fn define_props(&self, _config: &WpceConfig) -> WpceResult<PropSchema> {
		let targets = std::iter::once(PropValue::Null).chain(LINK_TARGETS.map(PropValue::from));

		PropSchema::builder()
			.props([
				PropDef::new("label").required().types([PropType::String]),
				PropDef::new("target").allowed_values(targets),
				PropDef::new("url").required().types([PropType::String]),
			])
			.build()
	}

	fn derive(&self, view: &mut ViewBuilder<'_>) -> WpceResult<()> {
		let target = attribute("target", view.get_str("target"));
		let href = href(view.get_str("url"));

		view.set("targetAttr", target);
		view.set("href", href);

		Ok(())
	}
}
