use miette::Diagnostic;
use thiserror::Error;

/// Broad classification of a [`WpceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// A component declared an inconsistent schema.
	SchemaDefinition,
	/// A prop bag failed schema resolution.
	Validation,
	/// Template lookup or rendering failed.
	Render,
	/// Configuration or props file could not be loaded.
	Config,
	/// Underlying filesystem failure.
	Io,
}

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum WpceError {
	#[error(transparent)]
	#[diagnostic(code(wpce::io_error))]
	Io(#[from] std::io::Error),

	#[error("`{name}` cannot be used as a prop name")]
	#[diagnostic(
		code(wpce::reserved_prop_name),
		help("`class`, `rootName`, `rootClasses`, `rootNamePrefix` and `classSeparator` are handled by the component pipeline")
	)]
	ReservedPropName { name: String },

	#[error("prop `{name}` is declared more than once")]
	#[diagnostic(code(wpce::duplicate_prop))]
	DuplicateProp { name: String },

	#[error("default value of prop `{name}` is invalid: {reason}")]
	#[diagnostic(code(wpce::invalid_default))]
	InvalidDefault { name: String, reason: String },

	#[error("unknown prop(s) {unknown}, defined props are: {defined}")]
	#[diagnostic(
		code(wpce::unknown_prop),
		help("remove the prop or declare it in the component schema")
	)]
	UnknownProps { unknown: String, defined: String },

	#[error("missing required prop `{name}`")]
	#[diagnostic(code(wpce::missing_prop))]
	MissingProp { name: String },

	#[error("prop `{name}` expects {expected}, got {actual}")]
	#[diagnostic(code(wpce::invalid_prop_type))]
	InvalidPropType {
		name: String,
		expected: String,
		actual: String,
	},

	#[error("prop `{name}` has invalid value {value}: {reason}")]
	#[diagnostic(code(wpce::invalid_prop_value))]
	InvalidPropValue {
		name: String,
		value: String,
		reason: String,
	},

	#[error("props must be a map, got {0}")]
	#[diagnostic(code(wpce::invalid_prop_bag))]
	InvalidPropBag(String),

	#[error("unknown component: `{0}`")]
	#[diagnostic(
		code(wpce::unknown_component),
		help("run `wpce list` to see the registered components")
	)]
	UnknownComponent(String),

	#[error("template not found: `{0}`")]
	#[diagnostic(
		code(wpce::template_not_found),
		help("add the template to one of the directories listed under [templates] in wpce.toml")
	)]
	TemplateNotFound(String),

	#[error("template rendering failed: {0}")]
	#[diagnostic(code(wpce::template_render))]
	TemplateRender(String),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(wpce::config_parse),
		help("check that wpce.toml is valid TOML with [components], [templates] and/or [site] sections")
	)]
	ConfigParse(String),

	#[error("failed to load props file `{path}`: {reason}")]
	#[diagnostic(code(wpce::props_file))]
	PropsFile { path: String, reason: String },

	#[error("unsupported props file format: `{0}`")]
	#[diagnostic(
		code(wpce::unsupported_format),
		help("supported formats: json, toml, yaml, yml")
	)]
	UnsupportedPropsFormat(String),
}

impl WpceError {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Io(_) => ErrorKind::Io,
			Self::ReservedPropName { .. } | Self::DuplicateProp { .. } | Self::InvalidDefault { .. } => {
				ErrorKind::SchemaDefinition
			}
			Self::UnknownProps { .. }
			| Self::MissingProp { .. }
			| Self::InvalidPropType { .. }
			| Self::InvalidPropValue { .. }
			| Self::InvalidPropBag(_) => ErrorKind::Validation,
			Self::UnknownComponent(_) | Self::TemplateNotFound(_) | Self::TemplateRender(_) => {
				ErrorKind::Render
			}
			Self::ConfigParse(_) | Self::PropsFile { .. } | Self::UnsupportedPropsFormat(_) => {
				ErrorKind::Config
			}
		}
	}

	/// Prefix the prop path of a validation error with `parent`, so errors
	/// raised while resolving nested props read as `crumbs.1.title`.
	#[must_use]
	pub(crate) fn nested_in(self, parent: &str) -> Self {
		let join = |name: String| format!("{parent}.{name}");

		match self {
			Self::MissingProp { name } => Self::MissingProp { name: join(name) },
			Self::InvalidPropType {
				name,
				expected,
				actual,
			} => {
				Self::InvalidPropType {
					name: join(name),
					expected,
					actual,
				}
			}
			Self::InvalidPropValue {
				name,
				value,
				reason,
			} => {
				Self::InvalidPropValue {
					name: join(name),
					value,
					reason,
				}
			}
			Self::UnknownProps { unknown, defined } => {
				Self::UnknownProps {
					unknown: format!("{unknown} in `{parent}`"),
					defined,
				}
			}
			Self::InvalidPropBag(actual) => {
				Self::InvalidPropType {
					name: parent.to_string(),
					expected: "map".to_string(),
					actual,
				}
			}
			other => other,
		}
	}
}

pub type WpceResult<T> = Result<T, WpceError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
