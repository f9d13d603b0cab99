//! Templates bundled with the built-in components.

/// `(key, name, source)` for every bundled template. The entry whose name
/// equals its key is the component body, the others are its partials.
pub const BUILTIN_TEMPLATES: &[(&str, &str, &str)] = &[
	("Breadcrumbs", "Breadcrumbs", include_str!("../templates/Breadcrumbs/Breadcrumbs.html")),
	("Breadcrumbs", "crumb", include_str!("../templates/Breadcrumbs/partials/crumb.html")),
	("Button", "Button", include_str!("../templates/Button/Button.html")),
	("Button", "content", include_str!("../templates/Button/partials/content.html")),
	("EditorContent", "EditorContent", include_str!("../templates/EditorContent/EditorContent.html")),
	("EntriesList", "EntriesList", include_str!("../templates/EntriesList/EntriesList.html")),
	("Field", "Field", include_str!("../templates/Field/Field.html")),
	("Image", "Image", include_str!("../templates/Image/Image.html")),
	("Link", "Link", include_str!("../templates/Link/Link.html")),
	("Notice", "Notice", include_str!("../templates/Notice/Notice.html")),
	("Svg", "Svg", include_str!("../templates/Svg/Svg.html")),
];

/// The bundled source of template `name` within the scope of `key`.
pub fn builtin_template(key: &str, name: &str) -> Option<&'static str> {
	BUILTIN_TEMPLATES
		.iter()
		.find(|(template_key, template_name, _)| *template_key == key && *template_name == name)
		.map(|(_, _, source)| *source)
}
