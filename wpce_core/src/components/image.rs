use crate::Component;
use crate::PropDef;
use crate::PropSchema;
use crate::PropValue;
use crate::ViewBuilder;
use crate::WpceConfig;
use crate::WpceResult;
use crate::html::Attributes;
use crate::html::element;
use crate::text::strip_tags;

/// An image with an optional caption and link.
///
/// When `imageHtml` is supplied it is used as-is and `alt`, `src` and
/// `imageClass` are ignored. The photoswipe data attributes are only written
/// when source, width and height are all set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Image;

impl Component for Image {
	fn name(&self) -> &str {
		"Image"
	}

	fn define_props(&self, _config: &WpceConfig) -> WpceResult<PropSchema> {
		PropSchema::builder()
			.props([
				PropDef::new("alt"),
				PropDef::new("caption"),
				PropDef::new("imageClass"),
				PropDef::new("imageHtml").html(),
				PropDef::new("photoswipeHeight"),
				PropDef::new("photoswipeSrc"),
				PropDef::new("photoswipeWidth"),
				PropDef::new("src"),
				PropDef::new("target"),
				PropDef::new("url"),
			])
			.build()
	}

	fn derive(&self, view: &mut ViewBuilder<'_>) -> WpceResult<()> {
		let props = view.props();

		let mut image_html = match props.get_str("imageHtml").filter(|html| !html.is_empty()) {
			Some(html) => html.to_string(),
			None => {
				let mut attrs = Attributes::new()
					.with("alt", props.value("alt").clone())
					.with("class", props.value("imageClass").clone())
					.with("src", props.value("src").clone());

				let photoswipe = ["photoswipeSrc", "photoswipeWidth", "photoswipeHeight"];
				if photoswipe.iter().all(|name| props.is_truthy(name)) {
					attrs.set("data-original-src", props.value("photoswipeSrc").clone());
					attrs.set("data-original-src-width", props.value("photoswipeWidth").clone());
					attrs.set("data-original-src-height", props.value("photoswipeHeight").clone());
				}

				element("img", &attrs, None)
			}
		};

		if props.is_truthy("url") {
			let attrs = Attributes::new()
				.with("href", props.value("url").clone())
				.with("target", props.value("target").clone());
			image_html = element("a", &attrs, Some(&image_html));
		}

		let caption = props.get_str("caption").map(strip_tags);

		view.set("caption", caption);
		view.set("imageHtml", PropValue::Html(image_html));

		Ok(())
	}
}
