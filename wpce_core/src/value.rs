use std::collections::BTreeMap;
use std::fmt;

use derive_more::Deref;
use derive_more::DerefMut;
use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;
use serde::ser::SerializeSeq;

use crate::WpceError;
use crate::WpceResult;

/// A single prop value as supplied by a caller or produced by a component
/// derivation.
///
/// [`PropValue::Html`] is a string that has been explicitly marked as trusted
/// markup. Renderers must insert it verbatim, while every other string is
/// entity-escaped.
#[derive(Debug, Clone, PartialEq, Default)]
#[non_exhaustive]
pub enum PropValue {
	#[default]
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	String(String),
	Html(String),
	List(Vec<PropValue>),
	Map(BTreeMap<String, PropValue>),
}

impl PropValue {
	/// Mark `markup` as raw HTML that must not be escaped when rendered.
	pub fn html(markup: impl Into<String>) -> Self {
		Self::Html(markup.into())
	}

	/// The runtime type tag of this value.
	pub fn prop_type(&self) -> PropType {
		match self {
			Self::Null => PropType::Null,
			Self::Bool(_) => PropType::Bool,
			Self::Int(_) => PropType::Int,
			Self::Float(_) => PropType::Float,
			Self::String(_) => PropType::String,
			Self::Html(_) => PropType::Html,
			Self::List(_) => PropType::List,
			Self::Map(_) => PropType::Map,
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Loose truthiness used by conditional class and attribute helpers.
	/// Null, `false`, zero, empty strings and empty collections are falsy.
	pub fn is_truthy(&self) -> bool {
		match self {
			Self::Null => false,
			Self::Bool(value) => *value,
			Self::Int(value) => *value != 0,
			Self::Float(value) => *value != 0.0,
			Self::String(value) | Self::Html(value) => !value.is_empty(),
			Self::List(items) => !items.is_empty(),
			Self::Map(entries) => !entries.is_empty(),
		}
	}

	/// Borrow the string content of plain and raw HTML strings.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) | Self::Html(value) => Some(value.as_str()),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[PropValue]> {
		match self {
			Self::List(items) => Some(items.as_slice()),
			_ => None,
		}
	}

	pub fn as_map(&self) -> Option<&BTreeMap<String, PropValue>> {
		match self {
			Self::Map(entries) => Some(entries),
			_ => None,
		}
	}

	/// Convert plain strings into raw HTML, leaving other values untouched.
	/// Lists are converted element by element.
	#[must_use]
	pub fn into_html(self) -> Self {
		match self {
			Self::String(value) => Self::Html(value),
			Self::List(items) => Self::List(items.into_iter().map(Self::into_html).collect()),
			other => other,
		}
	}

	/// The text form used when the value is written into an attribute or a
	/// class token. Null and `false` become empty, `true` becomes `1`.
	pub fn to_text(&self) -> String {
		match self {
			Self::Null | Self::Bool(false) => String::new(),
			Self::Bool(true) => "1".to_string(),
			Self::Int(value) => value.to_string(),
			Self::Float(value) => value.to_string(),
			Self::String(value) | Self::Html(value) => value.clone(),
			Self::List(_) | Self::Map(_) => self.to_string(),
		}
	}

	/// Convert a JSON document into a prop value. Integers that fit into an
	/// `i64` stay integers, every other number becomes a float.
	pub fn from_json(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Self::Null,
			serde_json::Value::Bool(value) => Self::Bool(value),
			serde_json::Value::Number(number) => {
				number
					.as_i64()
					.map_or_else(|| Self::Float(number.as_f64().unwrap_or(f64::NAN)), Self::Int)
			}
			serde_json::Value::String(value) => Self::String(value),
			serde_json::Value::Array(items) => {
				Self::List(items.into_iter().map(Self::from_json).collect())
			}
			serde_json::Value::Object(entries) => {
				Self::Map(
					entries
						.into_iter()
						.map(|(key, value)| (key, Self::from_json(value)))
						.collect(),
				)
			}
		}
	}
}

impl fmt::Display for PropValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => write!(f, "null"),
			Self::Bool(value) => write!(f, "{value}"),
			Self::Int(value) => write!(f, "{value}"),
			Self::Float(value) => write!(f, "{value}"),
			Self::String(value) | Self::Html(value) => write!(f, "{value:?}"),
			Self::List(items) => {
				write!(f, "[")?;
				for (index, item) in items.iter().enumerate() {
					if index > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{item}")?;
				}
				write!(f, "]")
			}
			Self::Map(entries) => {
				write!(f, "{{")?;
				for (index, (key, value)) in entries.iter().enumerate() {
					if index > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{key}: {value}")?;
				}
				write!(f, "}}")
			}
		}
	}
}

impl Serialize for PropValue {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Null => serializer.serialize_unit(),
			Self::Bool(value) => serializer.serialize_bool(*value),
			Self::Int(value) => serializer.serialize_i64(*value),
			Self::Float(value) => serializer.serialize_f64(*value),
			Self::String(value) | Self::Html(value) => serializer.serialize_str(value),
			Self::List(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Self::Map(entries) => {
				let mut map = serializer.serialize_map(Some(entries.len()))?;
				for (key, value) in entries {
					map.serialize_entry(key, value)?;
				}
				map.end()
			}
		}
	}
}

impl From<bool> for PropValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for PropValue {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<i32> for PropValue {
	fn from(value: i32) -> Self {
		Self::Int(i64::from(value))
	}
}

impl From<u32> for PropValue {
	fn from(value: u32) -> Self {
		Self::Int(i64::from(value))
	}
}

impl From<f64> for PropValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<&str> for PropValue {
	fn from(value: &str) -> Self {
		Self::String(value.to_string())
	}
}

impl From<String> for PropValue {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl<T: Into<PropValue>> From<Option<T>> for PropValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

impl<T: Into<PropValue>> From<Vec<T>> for PropValue {
	fn from(items: Vec<T>) -> Self {
		Self::List(items.into_iter().map(Into::into).collect())
	}
}

impl From<BTreeMap<String, PropValue>> for PropValue {
	fn from(entries: BTreeMap<String, PropValue>) -> Self {
		Self::Map(entries)
	}
}

impl From<PropBag> for PropValue {
	fn from(bag: PropBag) -> Self {
		Self::Map(bag.0)
	}
}

/// Type tags accepted by [`crate::PropDef::types`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropType {
	Null,
	Bool,
	Int,
	Float,
	/// Plain strings and raw HTML strings.
	String,
	/// Raw HTML strings only.
	Html,
	List,
	Map,
}

impl PropType {
	/// Whether `value` satisfies this type tag.
	pub fn matches(self, value: &PropValue) -> bool {
		match self {
			Self::String => matches!(value, PropValue::String(_) | PropValue::Html(_)),
			other => other == value.prop_type(),
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool => "bool",
			Self::Int => "int",
			Self::Float => "float",
			Self::String => "string",
			Self::Html => "html",
			Self::List => "list",
			Self::Map => "map",
		}
	}
}

impl fmt::Display for PropType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The raw props a caller hands to a component.
#[derive(Debug, Clone, Default, PartialEq, Deref, DerefMut)]
pub struct PropBag(BTreeMap<String, PropValue>);

impl PropBag {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insert.
	#[must_use]
	pub fn with(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
		self.0.insert(name.into(), value.into());
		self
	}

	/// Build a bag from a JSON object.
	pub fn from_json(value: serde_json::Value) -> WpceResult<Self> {
		Self::try_from(PropValue::from_json(value))
	}

	pub fn into_inner(self) -> BTreeMap<String, PropValue> {
		self.0
	}
}

impl TryFrom<PropValue> for PropBag {
	type Error = WpceError;

	fn try_from(value: PropValue) -> WpceResult<Self> {
		match value {
			PropValue::Map(entries) => Ok(Self(entries)),
			// An empty document is an empty bag.
			PropValue::Null => Ok(Self::default()),
			other => Err(WpceError::InvalidPropBag(other.prop_type().to_string())),
		}
	}
}

impl From<BTreeMap<String, PropValue>> for PropBag {
	fn from(entries: BTreeMap<String, PropValue>) -> Self {
		Self(entries)
	}
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for PropBag {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.collect(),
		)
	}
}

/// Build a [`PropBag`] from `name => value` pairs.
///
/// ```rust
/// let bag = wpce_core::props! { "label" => "Go", "url" => "/go" };
/// assert_eq!(bag.len(), 2);
/// ```
#[macro_export]
macro_rules! props {
	() => {
		$crate::PropBag::new()
	};
	($($name:expr => $value:expr),+ $(,)?) => {
		$crate::PropBag::new()$(.with($name, $value))+
	};
}
