use crate::Component;
use crate::PropDef;
use crate::PropSchema;
use crate::WpceConfig;
use crate::WpceResult;

/// Wraps editor-authored markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditorContent;

impl Component for EditorContent {
	fn name(&self) -> &str {
		"EditorContent"
	}

	fn define_props(&self, _config: &WpceConfig) -> WpceResult<PropSchema> {
		PropSchema::builder()
			.prop(PropDef::new("content").html())
			.build()
	}
}
