use std::collections::BTreeMap;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use derive_more::Deref;
use serde::Serialize;

use crate::PropBag;
use crate::PropType;
use crate::PropValue;
use crate::WpceError;
use crate::WpceResult;

/// Names handled by the component pipeline itself. A schema declaring any
/// of them is rejected when it is built.
pub const RESERVED_PROP_NAMES: [&str; 5] = [
	"class",
	"rootName",
	"rootClasses",
	"rootNamePrefix",
	"classSeparator",
];

static NULL_VALUE: PropValue = PropValue::Null;

/// Value constraint attached to a prop.
#[derive(Clone)]
pub enum AllowedValues {
	/// The value must equal one of the listed values.
	OneOf(Vec<PropValue>),
	/// The value must pass a named predicate.
	Check {
		name: String,
		check: Arc<dyn Fn(&PropValue) -> bool + Send + Sync>,
	},
}

impl AllowedValues {
	pub fn allows(&self, value: &PropValue) -> bool {
		match self {
			Self::OneOf(values) => values.contains(value),
			Self::Check { check, .. } => check(value),
		}
	}

	fn reason(&self) -> String {
		match self {
			Self::OneOf(values) => {
				let listed: Vec<String> = values.iter().map(ToString::to_string).collect();
				format!("expected one of {}", listed.join(", "))
			}
			Self::Check { name, .. } => format!("failed check `{name}`"),
		}
	}
}

impl fmt::Debug for AllowedValues {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::OneOf(values) => f.debug_tuple("OneOf").field(values).finish(),
			Self::Check { name, .. } => f.debug_struct("Check").field("name", name).finish(),
		}
	}
}

/// Sub-schema attached to a prop.
#[derive(Debug, Clone)]
pub enum Nested {
	/// The prop is a map resolved against the sub-schema.
	Object(Arc<PropSchema>),
	/// The prop is a list whose items are maps resolved against the
	/// sub-schema.
	ListOf(Arc<PropSchema>),
}

/// Declaration of a single prop.
///
/// ```rust
/// use wpce_core::PropDef;
/// use wpce_core::PropType;
///
/// let target = PropDef::new("target")
/// 	.default(None::<String>)
/// 	.allowed_values([None, Some("_blank"), Some("_self")]);
/// let label = PropDef::new("label").required().types([PropType::String]);
/// # let _ = (target, label);
/// ```
#[derive(Debug, Clone)]
pub struct PropDef {
	name: String,
	required: bool,
	default: Option<PropValue>,
	types: Vec<PropType>,
	allowed: Option<AllowedValues>,
	nested: Option<Nested>,
	html: bool,
	description: Option<String>,
}

impl PropDef {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			required: false,
			default: None,
			types: Vec::new(),
			allowed: None,
			nested: None,
			html: false,
			description: None,
		}
	}

	/// The prop must be supplied unless a default is declared.
	#[must_use]
	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	#[must_use]
	pub fn default(mut self, value: impl Into<PropValue>) -> Self {
		self.default = Some(value.into());
		self
	}

	/// Restrict the accepted runtime types. An empty set accepts anything.
	#[must_use]
	pub fn types(mut self, types: impl IntoIterator<Item = PropType>) -> Self {
		self.types = types.into_iter().collect();
		self
	}

	/// Restrict the prop to an enumerated set of values.
	#[must_use]
	pub fn allowed_values<V: Into<PropValue>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
		self.allowed = Some(AllowedValues::OneOf(
			values.into_iter().map(Into::into).collect(),
		));
		self
	}

	/// Restrict the prop with a named predicate.
	#[must_use]
	pub fn allowed_by(
		mut self,
		name: impl Into<String>,
		check: impl Fn(&PropValue) -> bool + Send + Sync + 'static,
	) -> Self {
		self.allowed = Some(AllowedValues::Check {
			name: name.into(),
			check: Arc::new(check),
		});
		self
	}

	/// Resolve the prop as an object against `schema`.
	#[must_use]
	pub fn object(mut self, schema: PropSchema) -> Self {
		self.nested = Some(Nested::Object(Arc::new(schema)));
		self
	}

	/// Resolve every item of the prop against `schema`.
	#[must_use]
	pub fn list_of(mut self, schema: PropSchema) -> Self {
		self.nested = Some(Nested::ListOf(Arc::new(schema)));
		self
	}

	/// Treat string values as trusted markup.
	#[must_use]
	pub fn html(mut self) -> Self {
		self.html = true;
		self
	}

	#[must_use]
	pub fn describe(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn is_required(&self) -> bool {
		self.required
	}

	pub fn default_value(&self) -> Option<&PropValue> {
		self.default.as_ref()
	}

	pub fn allowed(&self) -> Option<&AllowedValues> {
		self.allowed.as_ref()
	}

	pub fn nested(&self) -> Option<&Nested> {
		self.nested.as_ref()
	}

	pub fn is_html(&self) -> bool {
		self.html
	}

	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// Type tags in effect for this prop. Nested props without explicit
	/// types accept a map or a list respectively.
	pub fn effective_types(&self) -> Vec<PropType> {
		match (&self.nested, self.types.is_empty()) {
			(Some(Nested::Object(_)), true) => vec![PropType::Map],
			(Some(Nested::ListOf(_)), true) => vec![PropType::List],
			_ => self.types.clone(),
		}
	}

	/// Validate and normalize a supplied value.
	fn check(&self, value: PropValue) -> WpceResult<PropValue> {
		let types = self.effective_types();
		if !types.is_empty() && !types.iter().any(|tag| tag.matches(&value)) {
			let expected: Vec<&str> = types.iter().map(|tag| tag.as_str()).collect();
			return Err(WpceError::InvalidPropType {
				name: self.name.clone(),
				expected: expected.join(" | "),
				actual: value.prop_type().to_string(),
			});
		}

		if let Some(allowed) = &self.allowed {
			if !allowed.allows(&value) {
				return Err(WpceError::InvalidPropValue {
					name: self.name.clone(),
					value: value.to_string(),
					reason: allowed.reason(),
				});
			}
		}

		let value = match (&self.nested, value) {
			(Some(Nested::Object(schema)), PropValue::Map(entries)) => {
				let resolved = schema
					.resolve(&PropBag::from(entries))
					.map_err(|e| e.nested_in(&self.name))?;
				PropValue::Map(resolved.into_inner())
			}
			(Some(Nested::ListOf(schema)), PropValue::List(items)) => {
				let mut resolved_items = Vec::with_capacity(items.len());
				for (index, item) in items.into_iter().enumerate() {
					let path = format!("{}.{index}", self.name);
					// Every item must be a map, null included.
					let PropValue::Map(entries) = item else {
						return Err(WpceError::InvalidPropType {
							name: path,
							expected: PropType::Map.to_string(),
							actual: item.prop_type().to_string(),
						});
					};
					let resolved = schema
						.resolve(&PropBag::from(entries))
						.map_err(|e| e.nested_in(&path))?;
					resolved_items.push(PropValue::Map(resolved.into_inner()));
				}
				PropValue::List(resolved_items)
			}
			(_, value) => value,
		};

		Ok(if self.html { value.into_html() } else { value })
	}

	/// Value used when the prop is absent from the bag.
	fn fallback(&self) -> WpceResult<PropValue> {
		match &self.default {
			Some(value) => Ok(value.clone()),
			None if self.required => {
				Err(WpceError::MissingProp {
					name: self.name.clone(),
				})
			}
			None => Ok(PropValue::Null),
		}
	}

	fn summary(&self) -> PropSummary {
		let nested = self.nested.as_ref().map(|nested| {
			match nested {
				Nested::Object(schema) | Nested::ListOf(schema) => schema.summary(),
			}
		});

		PropSummary {
			name: self.name.clone(),
			required: self.required,
			default: self.default.clone(),
			types: self.effective_types(),
			allowed: self.allowed.as_ref().map(AllowedValues::reason),
			html: self.html,
			description: self.description.clone(),
			nested,
		}
	}
}

/// Serializable description of a prop, used for listings.
#[derive(Debug, Clone, Serialize)]
pub struct PropSummary {
	pub name: String,
	pub required: bool,
	pub default: Option<PropValue>,
	pub types: Vec<PropType>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub allowed: Option<String>,
	pub html: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub nested: Option<Vec<PropSummary>>,
}

/// The declared contract for a component's props. Immutable once built;
/// props keep their declaration order.
#[derive(Debug, Clone, Default)]
pub struct PropSchema {
	props: Vec<PropDef>,
}

impl PropSchema {
	pub fn builder() -> PropSchemaBuilder {
		PropSchemaBuilder::default()
	}

	/// A schema without props. Resolving it rejects every key.
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn props(&self) -> &[PropDef] {
		&self.props
	}

	pub fn get(&self, name: &str) -> Option<&PropDef> {
		self.props.iter().find(|def| def.name == name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	pub fn names(&self) -> Vec<&str> {
		self.props.iter().map(|def| def.name.as_str()).collect()
	}

	pub fn summary(&self) -> Vec<PropSummary> {
		self.props.iter().map(PropDef::summary).collect()
	}

	/// Validate `bag` against the schema and fill in defaults.
	///
	/// Unknown keys are reported first, then props are checked in declaration
	/// order and the first failure is returned.
	pub fn resolve(&self, bag: &PropBag) -> WpceResult<ResolvedProps> {
		let unknown: Vec<&str> = bag
			.keys()
			.map(String::as_str)
			.filter(|name| !self.contains(name))
			.collect();

		if !unknown.is_empty() {
			return Err(WpceError::UnknownProps {
				unknown: quote_list(&unknown),
				defined: quote_list(&self.names()),
			});
		}

		let mut resolved = BTreeMap::new();
		for def in &self.props {
			let value = match bag.get(&def.name) {
				Some(value) => def.check(value.clone())?,
				None => def.fallback()?,
			};
			resolved.insert(def.name.clone(), value);
		}

		Ok(ResolvedProps(resolved))
	}
}

/// Collects [`PropDef`]s and checks them for consistency.
#[derive(Debug, Default)]
pub struct PropSchemaBuilder {
	props: Vec<PropDef>,
}

impl PropSchemaBuilder {
	#[must_use]
	pub fn prop(mut self, def: PropDef) -> Self {
		self.props.push(def);
		self
	}

	#[must_use]
	pub fn props(mut self, defs: impl IntoIterator<Item = PropDef>) -> Self {
		self.props.extend(defs);
		self
	}

	/// Finish the schema. Fails when a prop uses a reserved name, is declared
	/// twice, or has a default that violates its own constraints.
	pub fn build(self) -> WpceResult<PropSchema> {
		let mut seen = HashSet::new();
		let mut props = Vec::with_capacity(self.props.len());

		for mut def in self.props {
			if RESERVED_PROP_NAMES.contains(&def.name.as_str()) {
				return Err(WpceError::ReservedPropName { name: def.name });
			}

			if !seen.insert(def.name.clone()) {
				return Err(WpceError::DuplicateProp { name: def.name });
			}

			let invalid_default = |name: &str, error: WpceError| {
				WpceError::InvalidDefault {
					name: name.to_string(),
					reason: error.to_string(),
				}
			};

			// Defaults are stored in their normalized form so that absent props
			// resolve to exactly what a supplied value would have produced.
			if let Some(default) = def.default.take() {
				let normalized = def.check(default).map_err(|e| invalid_default(&def.name, e))?;
				def.default = Some(normalized);
			} else if let (Some(Nested::Object(schema)), false) = (&def.nested, def.required) {
				let resolved = schema
					.resolve(&PropBag::new())
					.map_err(|e| invalid_default(&def.name, e))?;
				def.default = Some(PropValue::Map(resolved.into_inner()));
			}

			props.push(def);
		}

		Ok(PropSchema { props })
	}
}

/// Props after validation, holding exactly the schema's keys.
#[derive(Debug, Clone, Default, PartialEq, Deref, Serialize)]
pub struct ResolvedProps(BTreeMap<String, PropValue>);

impl ResolvedProps {
	/// The value of `name`, or null when the prop does not exist.
	pub fn value(&self, name: &str) -> &PropValue {
		self.0.get(name).unwrap_or(&NULL_VALUE)
	}

	pub fn get_str(&self, name: &str) -> Option<&str> {
		self.value(name).as_str()
	}

	pub fn is_truthy(&self, name: &str) -> bool {
		self.value(name).is_truthy()
	}

	pub fn into_inner(self) -> BTreeMap<String, PropValue> {
		self.0
	}
}

fn quote_list(names: &[&str]) -> String {
	if names.is_empty() {
		return "(none)".to_string();
	}

	names
		.iter()
		.map(|name| format!("`{name}`"))
		.collect::<Vec<_>>()
		.join(", ")
}
