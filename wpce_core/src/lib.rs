//! `wpce_core` is the component props pipeline behind the `wpce` command
//! line. Components declare a schema of props, callers supply a bag of
//! values, and the pipeline validates and defaults the bag, derives CSS
//! classes and HTML fragments, and renders an escaped template.
//!
//! ## Pipeline
//!
//! ```text
//! PropBag
//!   → Schema resolution (unknown keys, required props, types, allowed values, defaults)
//!   → Derivation (root class list, derived fields, nested components)
//!   → ViewModel (immutable)
//!   → Renderer (minijinja, entity-escaped unless raw HTML)
//!   → HTML string
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from `wpce.toml` and props files in JSON, TOML or YAML.
//! - [`html`]: Entity escaping, URL sanitizing, attribute serialization and element builders.
//! - [`text`]: Tag stripping and text trimming helpers.
//! - [`request`]: Field and form error collection for form-style endpoints.
//!
//! ## Key Types
//!
//! - [`Component`]: A renderable component: its name, schema and derivation step.
//! - [`ComponentContext`]: The registry, schema cache and renderer. Explicitly constructed, no global state.
//! - [`PropSchema`]: Declared props with their defaults, type tags and allowed values.
//! - [`PropBag`] / [`ResolvedProps`]: Props before and after validation.
//! - [`RootClassList`]: The ordered, duplicate-free classes of a component's root element.
//! - [`ViewModel`]: Everything a template sees.
//! - [`Renderer`] / [`TemplateRenderer`]: Template lookup and rendering.
//!
//! ## Quick Start
//!
//! ```rust
//! use wpce_core::ComponentContext;
//! use wpce_core::WpceConfig;
//! use wpce_core::props;
//!
//! let context = ComponentContext::with_builtins(WpceConfig::default(), std::path::Path::new("."));
//! let html = context.render("Link", &props! { "label" => "Docs & help", "url" => "/docs" })?;
//! assert_eq!(html, r#"<a class="c-Link" href="/docs">Docs &amp; help</a>"#);
//! # Ok::<(), wpce_core::WpceError>(())
//! ```

pub use class_list::*;
pub use component::*;
pub use components::*;
pub use config::WpceConfig;
pub use error::*;
pub use renderer::*;
pub use schema::*;
pub use value::*;
pub use view::*;

mod class_list;
mod component;
pub mod components;
pub mod config;
#[allow(unused_assignments)]
mod error;
pub mod html;
mod renderer;
pub mod request;
mod schema;
pub(crate) mod templates;
pub mod text;
mod value;
mod view;

#[cfg(test)]
mod __fixtures;
