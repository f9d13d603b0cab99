//! HTML building helpers: entity escaping, URL sanitizing, attribute
//! serialization and small element factories.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::PropValue;

/// Attributes rendered as a bare name when truthy and omitted otherwise.
pub const BOOLEAN_ATTRIBUTES: [&str; 26] = [
	"allowfullscreen",
	"allowpaymentrequest",
	"async",
	"autofocus",
	"autoplay",
	"checked",
	"controls",
	"default",
	"defer",
	"disabled",
	"formnovalidate",
	"hidden",
	"ismap",
	"itemscope",
	"loop",
	"multiple",
	"muted",
	"nomodule",
	"novalidate",
	"open",
	"playsinline",
	"readonly",
	"required",
	"reversed",
	"selected",
	"truespeed",
];

/// URL schemes accepted by [`escape_url`].
pub const ALLOWED_PROTOCOLS: [&str; 22] = [
	"http", "https", "ftp", "ftps", "mailto", "news", "irc", "irc6", "ircs", "gopher", "nntp",
	"feed", "telnet", "mms", "rtsp", "sms", "svn", "tel", "fax", "xmpp", "webcal", "urn",
];

pub fn is_boolean_attribute(name: &str) -> bool {
	let name = name.to_ascii_lowercase();
	BOOLEAN_ATTRIBUTES.contains(&name.as_str())
}

/// Escape `&`, `<`, `>`, `"` and `'` as HTML entities.
pub fn escape_html(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for ch in text.chars() {
		match ch {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#039;"),
			other => escaped.push(other),
		}
	}
	escaped
}

/// Sanitize a URL for use inside an `href` attribute.
///
/// Whitespace is trimmed, spaces are percent-encoded, characters that are
/// never valid in a URL are dropped, and URLs with a scheme outside
/// [`ALLOWED_PROTOCOLS`] collapse to an empty string. Ampersands and single
/// quotes are entity-encoded.
pub fn escape_url(url: &str) -> String {
	let url = url.trim();
	if url.is_empty() {
		return String::new();
	}

	let cleaned: String = url
		.replace(' ', "%20")
		.chars()
		.filter(|ch| is_url_char(*ch))
		.collect();

	if let Some(scheme) = url_scheme(&cleaned) {
		let scheme = scheme.to_ascii_lowercase();
		if !ALLOWED_PROTOCOLS.contains(&scheme.as_str()) {
			return String::new();
		}
	}

	cleaned
		.replace("&amp;", "&")
		.replace('&', "&#038;")
		.replace('\'', "&#039;")
}

fn is_url_char(ch: char) -> bool {
	ch.is_ascii_alphanumeric() || !ch.is_ascii() || "-~+_.?#=!&;,/:%@$|*'()[]".contains(ch)
}

fn url_scheme(url: &str) -> Option<&str> {
	let end = url.find(':')?;
	let scheme = &url[..end];
	let mut chars = scheme.chars();
	let starts_with_letter = chars.next().is_some_and(|ch| ch.is_ascii_alphabetic());
	let valid = starts_with_letter
		&& chars.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '.'));

	valid.then_some(scheme)
}

/// Ordered HTML attributes. Setting an existing name replaces its value in
/// place, so merged attributes keep their original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
	entries: Vec<(String, PropValue)>,
}

impl Attributes {
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
		self.set(name, value);
		self
	}

	pub fn set(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
		let name = name.into();
		let value = value.into();
		match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
			Some((_, slot)) => *slot = value,
			None => self.entries.push((name, value)),
		}
	}

	/// Set every entry of `extra`, overriding existing names.
	pub fn merge(&mut self, extra: &BTreeMap<String, PropValue>) {
		for (name, value) in extra {
			self.set(name.clone(), value.clone());
		}
	}

	pub fn get(&self, name: &str) -> Option<&PropValue> {
		self.entries
			.iter()
			.find(|(existing, _)| existing == name)
			.map(|(_, value)| value)
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Serialize as ` name="value"` pairs.
	///
	/// Null values are skipped. Boolean attributes are written as a bare name
	/// when truthy and skipped otherwise. `href` is URL-sanitized, every other
	/// value is entity-escaped.
	pub fn render(&self) -> String {
		let mut rendered = String::new();

		for (name, value) in &self.entries {
			if is_boolean_attribute(name) {
				if value.is_truthy() {
					let _ = write!(rendered, " {name}");
				}
				continue;
			}

			if value.is_null() {
				continue;
			}

			let text = value.to_text();
			let escaped = if name == "href" {
				escape_url(&text)
			} else {
				escape_html(&text)
			};
			let _ = write!(rendered, " {name}=\"{escaped}\"");
		}

		rendered
	}
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Attributes {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut attrs = Self::new();
		for (name, value) in iter {
			attrs.set(name, value);
		}
		attrs
	}
}

/// Serialize attributes, see [`Attributes::render`].
///
/// ```rust
/// use wpce_core::PropValue;
/// use wpce_core::html::attrs_string;
///
/// let attrs = attrs_string([
/// 	("disabled", PropValue::Bool(false)),
/// 	("required", PropValue::Bool(true)),
/// 	("href", PropValue::Null),
/// ]);
/// assert_eq!(attrs, " required");
/// ```
pub fn attrs_string<K: Into<String>, V: Into<PropValue>>(
	attrs: impl IntoIterator<Item = (K, V)>,
) -> String {
	attrs.into_iter().collect::<Attributes>().render()
}

/// Build an element. Without content the element is self-closed. Content
/// is inserted verbatim.
pub fn element(tag: &str, attrs: &Attributes, content: Option<&str>) -> String {
	let attrs = attrs.render();
	match content {
		Some(content) => format!("<{tag}{attrs}>{content}</{tag}>"),
		None => format!("<{tag}{attrs} />"),
	}
}

/// A `mailto:` link opening in a new tab. The label defaults to the address.
pub fn mail_link(mail: &str, label: Option<&str>) -> String {
	let label = label.filter(|label| !label.is_empty()).unwrap_or(mail);
	let attrs = Attributes::new()
		.with("href", format!("mailto:{mail}"))
		.with("target", "_blank");
	element("a", &attrs, Some(&escape_html(label)))
}

/// A `tel:` link. Spaces are removed from the number in the `href`.
pub fn phone_link(phone: &str, label: Option<&str>) -> String {
	let label = label.filter(|label| !label.is_empty()).unwrap_or(phone);
	let attrs = Attributes::new().with("href", format!("tel:{}", phone.replace(' ', "")));
	element("a", &attrs, Some(&escape_html(label)))
}

/// A `background-image` style declaration, falling back to
/// `default_image_url` and to an empty string when neither is set.
pub fn background_image_attr(image_url: Option<&str>, default_image_url: Option<&str>) -> String {
	image_url
		.filter(|url| !url.is_empty())
		.or(default_image_url.filter(|url| !url.is_empty()))
		.map_or_else(String::new, |url| format!("background-image: url({url});"))
}

/// `output` when `condition` holds, otherwise an empty string.
pub fn string_if(condition: bool, output: impl Into<String>) -> String {
	if condition { output.into() } else { String::new() }
}
