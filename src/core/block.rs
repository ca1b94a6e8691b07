//! Block registration records
//!
//! A block is how a module shows up in the Gutenberg block picker. The
//! record only describes the block; the module still declares its controls.

use serde::{Deserialize, Serialize};

/// Identifier of the render callback every block is registered with.
/// The host invokes it once per block instance at render time.
pub const RENDER_CALLBACK: &str = "acf_blocks::runtime::registry::BlockRegistry::render_block";

/// How a block first appears in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockMode {
    /// Show the field form
    #[default]
    Edit,
    /// Show the rendered preview
    Preview,
    /// Preview until selected, then edit
    Auto,
}

/// Block registration payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockRecord {
    /// Programmatic name, the owning module's key
    pub name: String,
    /// User friendly name
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub render_callback: String,
    /// Block picker category slug
    pub category: String,
    pub mode: BlockMode,
}

impl BlockRecord {
    /// Record for a block using the shared render callback and edit mode
    pub fn new(name: &str, title: &str, category: &str) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            description: None,
            render_callback: RENDER_CALLBACK.to_string(),
            category: category.to_string(),
            mode: BlockMode::Edit,
        }
    }
}

/// A block instance the host asks to render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockInstance {
    /// Registered block name, e.g. `acf/group_hero-banner`
    pub name: String,
    /// Raw field values keyed by control name
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
}
