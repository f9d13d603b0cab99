use crate::Component;
use crate::PropDef;
use crate::PropSchema;
use crate::PropType;
use crate::PropValue;
use crate::ViewBuilder;
use crate::WpceConfig;
use crate::WpceResult;

/// A `ul` or `ol` list of markup entries.
///
/// Entries are typically rendered components, see
/// [`ViewBuilder::render_component`]. An empty list renders `noEntriesHtml`,
/// or nothing at all when that is unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntriesList;

impl Component for EntriesList {
	fn name(&self) -> &str {
		"EntriesList"
	}

	fn define_props(&self, _config: &WpceConfig) -> WpceResult<PropSchema> {
		PropSchema::builder()
			.props([
				PropDef::new("entries")
					.default(Vec::<PropValue>::new())
					.types([PropType::List])
					.allowed_by("list of strings or html", is_markup_list)
					.html(),
				PropDef::new("noEntriesHtml")
					.types([PropType::Null, PropType::String])
					.html(),
				PropDef::new("tag").default("ul").allowed_values(["ol", "ul"]),
			])
			.build()
	}

	fn derive(&self, view: &mut ViewBuilder<'_>) -> WpceResult<()> {
		let has_entries = view.get("entries").as_list().is_some_and(|entries| !entries.is_empty());
		view.set("hasEntries", has_entries);

		Ok(())
	}
}

fn is_markup_list(value: &PropValue) -> bool {
	value.as_list().is_some_and(|entries| {
		entries
			.iter()
			.all(|entry| matches!(entry, PropValue::String(_) | PropValue::Html(_)))
	})
}
