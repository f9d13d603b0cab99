use std::collections::BTreeMap;

use serde::Serialize;

use crate::ComponentContext;
use crate::PropBag;
use crate::PropValue;
use crate::ResolvedProps;
use crate::RootClassList;
use crate::WpceResult;

/// The render-ready data of one component invocation.
///
/// Built once per render by [`ComponentContext::build_view_model`] and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
	name: String,
	template: String,
	class: Option<String>,
	props: ResolvedProps,
	derived: BTreeMap<String, PropValue>,
	classes: RootClassList,
}

impl ViewModel {
	/// Name of the component that produced the view model.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Template lookup key.
	pub fn template(&self) -> &str {
		&self.template
	}

	pub fn props(&self) -> &ResolvedProps {
		&self.props
	}

	pub fn derived(&self) -> &BTreeMap<String, PropValue> {
		&self.derived
	}

	pub fn classes(&self) -> &RootClassList {
		&self.classes
	}

	pub fn root_classes(&self) -> String {
		self.classes.render()
	}

	/// A field as the template sees it: derived fields shadow props.
	pub fn get(&self, name: &str) -> &PropValue {
		self.derived
			.get(name)
			.unwrap_or_else(|| self.props.value(name))
	}

	/// Every field handed to the template: props, derived fields on top, then
	/// `class`, `rootName` and `rootClasses`.
	pub fn fields(&self) -> BTreeMap<String, PropValue> {
		let mut fields = self.props.clone().into_inner();
		fields.extend(self.derived.clone());
		fields.insert("class".to_string(), self.class.clone().into());
		fields.insert("rootName".to_string(), self.classes.root().into());
		fields.insert("rootClasses".to_string(), self.classes.render().into());
		fields
	}
}

/// Mutable state handed to [`crate::Component::derive`].
///
/// Derivations read resolved props, add root classes, and set derived fields.
/// Once the derivation returns the builder is frozen into a [`ViewModel`].
pub struct ViewBuilder<'a> {
	context: &'a ComponentContext,
	props: ResolvedProps,
	derived: BTreeMap<String, PropValue>,
	classes: RootClassList,
}

impl<'a> ViewBuilder<'a> {
	pub(crate) fn new(
		context: &'a ComponentContext,
		props: ResolvedProps,
		classes: RootClassList,
	) -> Self {
		Self {
			context,
			props,
			derived: BTreeMap::new(),
			classes,
		}
	}

	pub fn context(&self) -> &'a ComponentContext {
		self.context
	}

	pub fn props(&self) -> &ResolvedProps {
		&self.props
	}

	/// The current value of `name`, preferring a derived field over the prop.
	pub fn get(&self, name: &str) -> &PropValue {
		self.derived
			.get(name)
			.unwrap_or_else(|| self.props.value(name))
	}

	pub fn get_str(&self, name: &str) -> Option<&str> {
		self.get(name).as_str()
	}

	pub fn is_truthy(&self, name: &str) -> bool {
		self.get(name).is_truthy()
	}

	/// Set a derived field, shadowing a prop of the same name.
	pub fn set(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
		self.derived.insert(name.into(), value.into());
	}

	pub fn classes(&self) -> &RootClassList {
		&self.classes
	}

	pub fn classes_mut(&mut self) -> &mut RootClassList {
		&mut self.classes
	}

	/// Add a modifier class prefixed with the root class.
	pub fn add_class(&mut self, token: Option<&str>) {
		self.classes.add(token, true);
	}

	/// Add a prefixed modifier class when `condition` holds.
	pub fn add_class_if(&mut self, condition: bool, token: Option<&str>) {
		self.classes.add_if(condition, token, true);
	}

	/// Render another registered component and return its HTML as a raw
	/// value, ready to embed in this view.
	pub fn render_component(&self, name: &str, props: &PropBag) -> WpceResult<PropValue> {
		self.context.render(name, props).map(PropValue::Html)
	}

	pub(crate) fn finish(self, name: &str, template: &str, class: Option<String>) -> ViewModel {
		ViewModel {
			name: name.to_string(),
			template: template.to_string(),
			class,
			props: self.props,
			derived: self.derived,
			classes: self.classes,
		}
	}
}
