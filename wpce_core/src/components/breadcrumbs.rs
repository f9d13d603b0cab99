use super::href;
use crate::Component;
use crate::PropDef;
use crate::PropSchema;
use crate::PropType;
use crate::PropValue;
use crate::ViewBuilder;
use crate::WpceConfig;
use crate::WpceResult;
use crate::text::DEFAULT_TRIM_END;
use crate::text::trim_by_words_count;

/// Crumb titles longer than this many words are shortened.
pub const CRUMB_TITLE_MAX_WORDS: usize = 5;

/// A breadcrumb trail starting at the home crumb.
///
/// Crumbs are `{ title, url }` objects. The home crumb is filled from the
/// `[site]` config section unless supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct Breadcrumbs;

impl Component for Breadcrumbs {
	fn name(&self) -> &str {
		"Breadcrumbs"
	}

	fn define_props(&self, config: &WpceConfig) -> WpceResult<PropSchema> {
		let crumb = PropSchema::builder()
			.props([
				PropDef::new("title").required().types([PropType::String]),
				PropDef::new("url").types([PropType::Null, PropType::String]),
			])
			.build()?;
		let home_crumb = PropSchema::builder()
			.props([
				PropDef::new("title")
					.default(config.site.home_title.as_str())
					.types([PropType::String]),
				PropDef::new("url")
					.default(config.site.home_url.as_str())
					.types([PropType::Null, PropType::String]),
			])
			.build()?;

		PropSchema::builder()
			.props([
				PropDef::new("separator").default(">").types([PropType::String]),
				PropDef::new("crumbs")
					.default(Vec::<PropValue>::new())
					.list_of(crumb),
				PropDef::new("homeCrumb").object(home_crumb),
			])
			.build()
	}

	fn derive(&self, view: &mut ViewBuilder<'_>) -> WpceResult<()> {
		let crumbs: Vec<PropValue> = view
			.get("crumbs")
			.as_list()
			.unwrap_or_default()
			.iter()
			.map(prepare_crumb)
			.collect();
		let home_crumb = prepare_crumb(view.get("homeCrumb"));

		view.set("crumbs", crumbs);
		view.set("homeCrumb", home_crumb);

		Ok(())
	}
}

/// Shorten the title and add a sanitized `href`.
fn prepare_crumb(crumb: &PropValue) -> PropValue {
	let Some(entries) = crumb.as_map() else {
		return crumb.clone();
	};

	let mut entries = entries.clone();
	if let Some(title) = entries.get("title").and_then(PropValue::as_str) {
		let title = trim_by_words_count(title, CRUMB_TITLE_MAX_WORDS, DEFAULT_TRIM_END);
		entries.insert("title".to_string(), title.into());
	}
	let href = href(entries.get("url").and_then(PropValue::as_str));
	entries.insert("href".to_string(), href);

	PropValue::Map(entries)
}
