use std::fmt;

use serde::Serialize;

/// Default prefix put in front of a component name to form its root class.
pub const DEFAULT_ROOT_NAME_PREFIX: &str = "c-";
/// Default separator between the root class and a modifier.
pub const DEFAULT_CLASS_SEPARATOR: &str = "--";

/// Ordered, duplicate-free list of CSS classes applied to a component's
/// outermost element.
///
/// The first token is always the root class. Prefixed tokens are written as
/// `<root><separator><token>`, BEM style:
///
/// ```rust
/// use wpce_core::RootClassList;
///
/// let mut classes = RootClassList::new("c-Button", "--");
/// classes.add(Some("wide"), false);
/// classes.add_if(true, Some("color-red"), true);
/// classes.add(Some("wide"), false);
/// assert_eq!(classes.render(), "c-Button wide c-Button--color-red");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootClassList {
	root: String,
	#[serde(skip)]
	separator: String,
	tokens: Vec<String>,
}

impl RootClassList {
	pub fn new(root: impl Into<String>, separator: impl Into<String>) -> Self {
		let root = root.into();
		Self {
			tokens: vec![root.clone()],
			root,
			separator: separator.into(),
		}
	}

	/// The root class seeding the list.
	pub fn root(&self) -> &str {
		&self.root
	}

	pub fn separator(&self) -> &str {
		&self.separator
	}

	pub fn tokens(&self) -> &[String] {
		&self.tokens
	}

	pub fn contains(&self, token: &str) -> bool {
		self.tokens.iter().any(|existing| existing == token)
	}

	/// Append `token`, prefixed with the root class when `prefixed` is set.
	/// Missing or empty tokens and tokens already present are ignored.
	pub fn add(&mut self, token: Option<&str>, prefixed: bool) {
		let Some(token) = token.filter(|token| !token.is_empty()) else {
			return;
		};

		let token = if prefixed {
			format!("{}{}{token}", self.root, self.separator)
		} else {
			token.to_string()
		};

		if !self.contains(&token) {
			self.tokens.push(token);
		}
	}

	/// [`RootClassList::add`] guarded by `condition`.
	pub fn add_if(&mut self, condition: bool, token: Option<&str>, prefixed: bool) {
		if condition {
			self.add(token, prefixed);
		}
	}

	/// Space-separated classes in insertion order.
	pub fn render(&self) -> String {
		self.tokens.join(" ")
	}
}

impl fmt::Display for RootClassList {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render())
	}
}
