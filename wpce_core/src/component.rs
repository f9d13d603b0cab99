use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

use crate::PropBag;
use crate::PropSchema;
use crate::PropValue;
use crate::Renderer;
use crate::ResolvedProps;
use crate::RootClassList;
use crate::TemplateRenderer;
use crate::ViewBuilder;
use crate::ViewModel;
use crate::WpceConfig;
use crate::WpceError;
use crate::WpceResult;
use crate::components::register_builtins;

/// Names of the props every component accepts without declaring them.
pub const BUILTIN_PROP_NAMES: [&str; 2] = ["class", "rootName"];

/// A renderable UI component.
///
/// A component declares its name, its prop schema and an optional derivation
/// step that turns resolved props into extra template fields and root
/// classes. Everything else, from validation to rendering, is driven by the
/// [`ComponentContext`] it is registered with.
pub trait Component: Send + Sync {
	/// The registry name, also used for the default root class.
	fn name(&self) -> &str;

	/// Template lookup key. Defaults to the component name.
	fn template(&self) -> &str {
		self.name()
	}

	/// Declare the prop schema. Called at most once per context, the result
	/// is cached.
	fn define_props(&self, config: &WpceConfig) -> WpceResult<PropSchema>;

	/// Derive template fields and root classes from the resolved props.
	fn derive(&self, _view: &mut ViewBuilder<'_>) -> WpceResult<()> {
		Ok(())
	}
}

/// The pipeline-handled `class` and `rootName` props.
#[derive(Debug, Default)]
struct BuiltinProps {
	class: Option<String>,
	root_name: Option<String>,
}

/// Holds the component registry, the schema cache and the renderer.
///
/// ```rust,no_run
/// use wpce_core::ComponentContext;
/// use wpce_core::props;
///
/// let context = ComponentContext::load(std::path::Path::new("."))?;
/// let html = context.render("Button", &props! { "label" => "Save", "color" => "red" })?;
/// # Ok::<(), wpce_core::WpceError>(())
/// ```
pub struct ComponentContext {
	config: WpceConfig,
	components: BTreeMap<String, Arc<dyn Component>>,
	schemas: RwLock<HashMap<String, Arc<PropSchema>>>,
	renderer: Box<dyn Renderer>,
}

impl std::fmt::Debug for ComponentContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ComponentContext")
			.field("config", &self.config)
			.field("components", &self.components.keys().collect::<Vec<_>>())
			.finish_non_exhaustive()
	}
}

impl ComponentContext {
	/// An empty context rendering through `renderer`.
	pub fn new(config: WpceConfig, renderer: impl Renderer + 'static) -> Self {
		Self {
			config,
			components: BTreeMap::new(),
			schemas: RwLock::new(HashMap::new()),
			renderer: Box::new(renderer),
		}
	}

	/// A context with every built-in component registered and a
	/// [`TemplateRenderer`] configured from `config`.
	pub fn with_builtins(config: WpceConfig, root: &Path) -> Self {
		let renderer = TemplateRenderer::from_config(&config, root);
		let mut context = Self::new(config, renderer);
		register_builtins(&mut context, root);
		context
	}

	/// Load the config discovered at `root` and build a context with the
	/// built-in components.
	pub fn load(root: &Path) -> WpceResult<Self> {
		let config = WpceConfig::load_or_default(root)?;
		Ok(Self::with_builtins(config, root))
	}

	/// Register `component`, replacing any component with the same name.
	pub fn register(&mut self, component: impl Component + 'static) -> &mut Self {
		let name = component.name().to_string();
		tracing::trace!(component = %name, "registering component");

		self.schemas
			.get_mut()
			.unwrap_or_else(PoisonError::into_inner)
			.remove(&name);
		self.components.insert(name, Arc::new(component));
		self
	}

	/// Register `component` and build its schema right away, so schema
	/// definition errors surface here rather than on first render. Nothing is
	/// registered when the schema is invalid.
	pub fn try_register(&mut self, component: impl Component + 'static) -> WpceResult<&mut Self> {
		let schema = Arc::new(component.define_props(&self.config)?);
		let name = component.name().to_string();

		self.register(component);
		self.schemas
			.get_mut()
			.unwrap_or_else(PoisonError::into_inner)
			.insert(name, schema);

		Ok(self)
	}

	pub fn config(&self) -> &WpceConfig {
		&self.config
	}

	pub fn component(&self, name: &str) -> WpceResult<&dyn Component> {
		self.components
			.get(name)
			.map(Arc::as_ref)
			.ok_or_else(|| WpceError::UnknownComponent(name.to_string()))
	}

	/// Registered components ordered by name.
	pub fn components(&self) -> impl Iterator<Item = &dyn Component> {
		self.components.values().map(Arc::as_ref)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.components.contains_key(name)
	}

	/// The schema of component `name`, built on first use and cached.
	pub fn schema(&self, name: &str) -> WpceResult<Arc<PropSchema>> {
		if let Some(schema) = self
			.schemas
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(name)
		{
			return Ok(Arc::clone(schema));
		}

		let component = self.component(name)?;
		let schema = Arc::new(component.define_props(&self.config)?);
		tracing::debug!(component = name, props = schema.props().len(), "built schema");

		let mut schemas = self.schemas.write().unwrap_or_else(PoisonError::into_inner);
		let cached = schemas.entry(name.to_string()).or_insert(schema);

		Ok(Arc::clone(cached))
	}

	/// Validate `bag` against the schema of component `name`. The built-in
	/// props are accepted but not part of the result.
	pub fn resolve_props(&self, name: &str, bag: &PropBag) -> WpceResult<ResolvedProps> {
		let (_, bag) = split_builtin_props(bag)?;
		let schema = self.schema(name)?;
		let resolved = schema.resolve(&bag)?;
		tracing::debug!(component = name, "resolved props");

		Ok(resolved)
	}

	/// Resolve `bag`, seed the root classes and run the component
	/// derivation.
	pub fn build_view_model(&self, name: &str, bag: &PropBag) -> WpceResult<ViewModel> {
		let component = self.component(name)?;
		let (builtin, bag) = split_builtin_props(bag)?;
		let resolved = self.schema(name)?.resolve(&bag)?;

		let components = &self.config.components;
		let root = builtin
			.root_name
			.unwrap_or_else(|| format!("{}{name}", components.root_name_prefix));
		let mut classes = RootClassList::new(root, components.class_separator.clone());
		classes.add(builtin.class.as_deref(), false);

		let mut view = ViewBuilder::new(self, resolved, classes);
		component.derive(&mut view)?;

		Ok(view.finish(name, component.template(), builtin.class))
	}

	/// Render component `name` with `bag`.
	pub fn render(&self, name: &str, bag: &PropBag) -> WpceResult<String> {
		let _span = tracing::debug_span!("render", component = name).entered();
		let view = self.build_view_model(name, bag)?;
		let html = self.render_view(&view)?;
		tracing::debug!(bytes = html.len(), "rendered component");

		Ok(html)
	}

	/// Render an already built view model.
	pub fn render_view(&self, view: &ViewModel) -> WpceResult<String> {
		self.renderer.render(view.template(), view)
	}
}

/// Separate `class` and `rootName` from the rest of the bag.
fn split_builtin_props(bag: &PropBag) -> WpceResult<(BuiltinProps, PropBag)> {
	let mut rest = bag.clone();
	let mut builtin = BuiltinProps::default();

	for name in BUILTIN_PROP_NAMES {
		let Some(value) = rest.remove(name) else {
			continue;
		};

		let value = match value {
			PropValue::Null => None,
			PropValue::String(value) | PropValue::Html(value) => Some(value),
			other => {
				return Err(WpceError::InvalidPropType {
					name: name.to_string(),
					expected: "string | null".to_string(),
					actual: other.prop_type().to_string(),
				});
			}
		};

		match name {
			"class" => builtin.class = value,
			_ => builtin.root_name = value.filter(|root| !root.is_empty()),
		}
	}

	Ok((builtin, rest))
}
