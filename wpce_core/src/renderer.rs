use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use minijinja::AutoEscape;
use minijinja::Environment;
use minijinja::ErrorKind as TemplateErrorKind;
use minijinja::Output;
use minijinja::State;
use minijinja::Value;

use crate::PropValue;
use crate::ViewModel;
use crate::WpceConfig;
use crate::WpceError;
use crate::WpceResult;
use crate::config::DEFAULT_TEMPLATE_EXTENSION;
use crate::html::escape_html;
use crate::templates::builtin_template;

/// Turns a view model into HTML.
///
/// Implementations must entity-escape every interpolated string unless it is
/// a raw [`PropValue::Html`] value.
pub trait Renderer: Send + Sync {
	/// Render `view` with the template set identified by `key`.
	fn render(&self, key: &str, view: &ViewModel) -> WpceResult<String>;
}

/// The default [`Renderer`], backed by `minijinja`.
///
/// Templates are looked up per component directory. With the extension
/// `html`, the key `Button` resolves to `Button/Button.html` and an
/// `{% include "icon" %}` inside it resolves to `Button/partials/icon.html`.
/// Configured directories are searched in order, then the templates bundled
/// with the built-in components.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
	dirs: Vec<PathBuf>,
	extension: String,
	builtin: bool,
}

impl Default for TemplateRenderer {
	fn default() -> Self {
		Self {
			dirs: Vec::new(),
			extension: DEFAULT_TEMPLATE_EXTENSION.to_string(),
			builtin: true,
		}
	}
}

impl TemplateRenderer {
	pub fn new(dirs: Vec<PathBuf>) -> Self {
		Self {
			dirs,
			..Self::default()
		}
	}

	/// Build a renderer from the `[templates]` section of `config`, resolving
	/// relative directories against `root`.
	pub fn from_config(config: &WpceConfig, root: &Path) -> Self {
		Self {
			dirs: config.template_dirs(root),
			extension: config.templates.extension.clone(),
			builtin: !config.templates.disable_builtin,
		}
	}

	#[must_use]
	pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
		self.extension = extension.into();
		self
	}

	/// Stop falling back to the bundled templates.
	#[must_use]
	pub fn without_builtin(mut self) -> Self {
		self.builtin = false;
		self
	}

	pub fn dirs(&self) -> &[PathBuf] {
		&self.dirs
	}

	/// Path of template `name` relative to a template directory, within the
	/// scope of component `key`.
	pub fn relative_path(&self, key: &str, name: &str) -> PathBuf {
		let file = format!("{name}.{}", self.extension);
		if name == key {
			Path::new(key).join(file)
		} else {
			Path::new(key).join("partials").join(file)
		}
	}

	/// Read the source of template `name` in the scope of `key`.
	pub fn load(&self, key: &str, name: &str) -> WpceResult<Option<String>> {
		let relative = self.relative_path(key, name);

		for dir in &self.dirs {
			let path = dir.join(&relative);
			if path.is_file() {
				tracing::trace!(path = %path.display(), "loading template");
				return Ok(Some(std::fs::read_to_string(path)?));
			}
		}

		if self.builtin {
			if let Some(source) = builtin_template(key, name) {
				tracing::trace!(key, name, "using bundled template");
				return Ok(Some(source.to_string()));
			}
		}

		Ok(None)
	}

	/// An environment scoped to `key`, plus the relative path of the last
	/// template its loader failed to find. Includes report the name as
	/// written in the template, so the path is kept here.
	fn environment(&self, key: &str) -> (Environment<'static>, MissingTemplate) {
		let mut env = Environment::new();
		env.set_trim_blocks(true);
		env.set_lstrip_blocks(true);
		env.set_auto_escape_callback(|_| AutoEscape::Html);
		env.set_formatter(escape_formatter);

		let missing = MissingTemplate::default();
		let recorder = missing.clone();
		let renderer = self.clone();
		let key = key.to_string();
		env.set_loader(move |name| {
			match renderer.load(&key, name) {
				Ok(Some(source)) => Ok(Some(source)),
				Ok(None) => {
					let relative = renderer.relative_path(&key, name).display().to_string();
					recorder.record(&relative);
					Err(minijinja::Error::new(TemplateErrorKind::TemplateNotFound, relative))
				}
				Err(e) => {
					Err(minijinja::Error::new(
						TemplateErrorKind::InvalidOperation,
						format!("failed to read template `{name}`: {e}"),
					))
				}
			}
		});

		(env, missing)
	}
}

/// Shared slot written by the loader when a template is missing.
#[derive(Debug, Clone, Default)]
struct MissingTemplate(Arc<Mutex<Option<String>>>);

impl MissingTemplate {
	fn record(&self, path: &str) {
		*self.0.lock().unwrap_or_else(PoisonError::into_inner) = Some(path.to_string());
	}

	fn take(&self) -> Option<String> {
		self.0.lock().unwrap_or_else(PoisonError::into_inner).take()
	}
}

impl Renderer for TemplateRenderer {
	fn render(&self, key: &str, view: &ViewModel) -> WpceResult<String> {
		let (env, missing) = self.environment(key);
		let template = env
			.get_template(key)
			.map_err(|e| render_error(key, &e, &missing))?;
		let html = template
			.render(view_context(view))
			.map_err(|e| render_error(key, &e, &missing))?;

		Ok(html.trim().to_string())
	}
}

/// Convert a view model into the template context.
pub fn view_context(view: &ViewModel) -> Value {
	let fields: BTreeMap<String, Value> = view
		.fields()
		.iter()
		.map(|(name, value)| (name.clone(), template_value(value)))
		.collect();

	Value::from(fields)
}

/// Convert a prop value into a template value. Raw HTML becomes a safe
/// string so the formatter does not escape it.
pub fn template_value(value: &PropValue) -> Value {
	match value {
		PropValue::Null => Value::from(()),
		PropValue::Bool(value) => Value::from(*value),
		PropValue::Int(value) => Value::from(*value),
		PropValue::Float(value) => Value::from(*value),
		PropValue::String(value) => Value::from(value.as_str()),
		PropValue::Html(value) => Value::from_safe_string(value.clone()),
		PropValue::List(items) => Value::from(items.iter().map(template_value).collect::<Vec<_>>()),
		PropValue::Map(entries) => {
			let entries: BTreeMap<String, Value> = entries
				.iter()
				.map(|(name, value)| (name.clone(), template_value(value)))
				.collect();
			Value::from(entries)
		}
	}
}

/// Writes values with `ENT_QUOTES`-style escaping. Safe strings are written
/// verbatim, none and undefined write nothing.
fn escape_formatter(
	out: &mut Output<'_>,
	state: &State<'_, '_>,
	value: &Value,
) -> Result<(), minijinja::Error> {
	if value.is_undefined() || value.is_none() {
		return Ok(());
	}

	let text = value.to_string();
	let written = if value.is_safe() || matches!(state.auto_escape(), AutoEscape::None) {
		out.write_str(&text)
	} else {
		out.write_str(&escape_html(&text))
	};

	written.map_err(|_| {
		minijinja::Error::new(TemplateErrorKind::WriteFailure, "failed to write template output")
	})
}

fn render_error(key: &str, error: &minijinja::Error, missing: &MissingTemplate) -> WpceError {
	if error.kind() == TemplateErrorKind::TemplateNotFound {
		return WpceError::TemplateNotFound(missing.take().unwrap_or_else(|| key.to_string()));
	}

	WpceError::TemplateRender(format!("{key}: {error:#}"))
}
