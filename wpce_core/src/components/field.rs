use std::collections::BTreeMap;

use super::attribute;
use crate::Component;
use crate::PropDef;
use crate::PropSchema;
use crate::PropType;
use crate::PropValue;
use crate::ViewBuilder;
use crate::WpceConfig;
use crate::WpceResult;
use crate::html::Attributes;
use crate::html::element;
use crate::html::escape_html;

/// Template shared by the form field components.
pub const FIELD_TEMPLATE: &str = "Field";

/// `type` values accepted by [`InputField`].
pub const INPUT_TYPES: [&str; 16] = [
	"color",
	"date",
	"datetime-local",
	"email",
	"file",
	"image",
	"month",
	"number",
	"password",
	"range",
	"search",
	"tel",
	"text",
	"time",
	"url",
	"week",
];

/// Props shared by every form field.
fn field_props() -> Vec<PropDef> {
	vec![
		PropDef::new("jshandle").describe("`data-jshandle` attribute value"),
		PropDef::new("label"),
		PropDef::new("disabled").default(false).types([PropType::Bool]),
		PropDef::new("name").types([PropType::Null, PropType::String]),
		PropDef::new("readonly").default(false).types([PropType::Bool]),
		PropDef::new("required").default(false).types([PropType::Bool]),
		PropDef::new("fieldAttributes")
			.default(BTreeMap::<String, PropValue>::new())
			.types([PropType::Map])
			.describe("extra attributes of the form control"),
	]
}

/// Set the derived fields every form field shares and return the leading
/// attributes of the form control.
fn derive_field(view: &mut ViewBuilder<'_>) -> Attributes {
	let jshandle = attribute("data-jshandle", view.get_str("jshandle"));
	let required_class = if view.is_truthy("required") {
		PropValue::html("class=\"isRequired\"")
	} else {
		PropValue::Null
	};
	let has_label = view.is_truthy("label");

	view.set("jshandleAttr", jshandle);
	view.set("labelRequiredClass", required_class);
	view.add_class_if(has_label, Some("hasLabel"));

	let props = view.props();
	let id = if has_label {
		props.value("name").clone()
	} else {
		PropValue::Null
	};

	Attributes::new()
		.with("disabled", props.value("disabled").clone())
		.with("name", props.value("name").clone())
		.with("id", id)
}

/// Merge the caller's `fieldAttributes` over `attrs`.
fn with_field_attributes(view: &ViewBuilder<'_>, mut attrs: Attributes) -> Attributes {
	if let Some(extra) = view.get("fieldAttributes").as_map() {
		attrs.merge(extra);
	}
	attrs
}

/// A single-line `<input>` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputField;

impl Component for InputField {
	fn name(&self) -> &str {
		"InputField"
	}

	fn template(&self) -> &str {
		FIELD_TEMPLATE
	}

	fn define_props(&self, _config: &WpceConfig) -> WpceResult<PropSchema> {
		PropSchema::builder()
			.props(field_props())
			.props([
				PropDef::new("placeholder"),
				PropDef::new("type").default("text").allowed_values(INPUT_TYPES),
				PropDef::new("value"),
			])
			.build()
	}

	fn derive(&self, view: &mut ViewBuilder<'_>) -> WpceResult<()> {
		let mut attrs = derive_field(view);
		let props = view.props();
		attrs.set("placeholder", props.value("placeholder").clone());
		attrs.set("readonly", props.value("readonly").clone());
		attrs.set("required", props.value("required").clone());
		attrs.set("type", props.value("type").clone());
		attrs.set("value", props.value("value").clone());

		let attrs = with_field_attributes(view, attrs);
		view.set("fieldHtml", PropValue::Html(element("input", &attrs, None)));

		Ok(())
	}
}

/// A multi-line `<textarea>` field. The value is escaped into the element
/// body.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextareaField;

impl Component for TextareaField {
	fn name(&self) -> &str {
		"TextareaField"
	}

	fn template(&self) -> &str {
		FIELD_TEMPLATE
	}

	fn define_props(&self, _config: &WpceConfig) -> WpceResult<PropSchema> {
		PropSchema::builder()
			.props(field_props())
			.props([PropDef::new("placeholder"), PropDef::new("value").default("")])
			.build()
	}

	fn derive(&self, view: &mut ViewBuilder<'_>) -> WpceResult<()> {
		let mut attrs = derive_field(view);
		let props = view.props();
		attrs.set("placeholder", props.value("placeholder").clone());
		attrs.set("readonly", props.value("readonly").clone());
		attrs.set("required", props.value("required").clone());
		let content = escape_html(&props.value("value").to_text());

		let attrs = with_field_attributes(view, attrs);
		let html = element("textarea", &attrs, Some(&content));
		view.set("fieldHtml", PropValue::Html(html));

		Ok(())
	}
}

/// A checkbox with an optional description.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckboxField;

impl Component for CheckboxField {
	fn name(&self) -> &str {
		"CheckboxField"
	}

	fn template(&self) -> &str {
		FIELD_TEMPLATE
	}

	fn define_props(&self, _config: &WpceConfig) -> WpceResult<PropSchema> {
		PropSchema::builder()
			.props(field_props())
			.props([
				PropDef::new("description"),
				PropDef::new("isChecked").default(false).types([PropType::Bool]),
			])
			.build()
	}

	fn derive(&self, view: &mut ViewBuilder<'_>) -> WpceResult<()> {
		let mut attrs = derive_field(view);
		let props = view.props();
		attrs.set("readonly", props.value("readonly").clone());
		attrs.set("required", props.value("required").clone());
		attrs.set("type", "checkbox");
		attrs.set("checked", props.value("isChecked").clone());

		let attrs = with_field_attributes(view, attrs);
		view.set("fieldHtml", PropValue::Html(element("input", &attrs, None)));

		Ok(())
	}
}
