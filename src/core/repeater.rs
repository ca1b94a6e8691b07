//! Repeater controls
//!
//! A repeater is a control of type `repeater` that owns its own ordered
//! collection of sub controls. Editors can add the group as many times as
//! they like. Repeaters nest to any depth.

use serde::Serialize;
use serde_json::Map;

use super::control::{control_key, extend_properties, to_value, Attributes, ControlBuilder, ControlRecord};
use super::manager::{ControlCollection, ControlManager};

/// How the rows of a repeater are laid out in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeaterLayout {
    Table,
    Block,
    Row,
}

/// Settings for repeater controls
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepeaterSettings {
    /// Minimum number of rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    /// Maximum number of rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<RepeaterLayout>,
    /// Text of the "add row" button
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_label: Option<String>,
}

/// A repeatable group of sub controls
#[derive(Debug, Clone, PartialEq)]
pub struct Repeater {
    key: String,
    name: String,
    label: String,
    attributes: Attributes,
    settings: RepeaterSettings,
    controls: ControlCollection,
}

impl Repeater {
    pub fn new(name: &str, label: &str) -> Self {
        if name.is_empty() {
            log::warn!("Creating a repeater with an empty name");
        }
        Self {
            key: control_key(name),
            name: name.to_string(),
            label: label.to_string(),
            attributes: Attributes::default(),
            settings: RepeaterSettings::default(),
            controls: ControlCollection::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn settings(&self) -> &RepeaterSettings {
        &self.settings
    }

    /// Replace the repeater settings
    pub fn with_settings(&mut self, settings: RepeaterSettings) -> &mut Self {
        self.settings = settings;
        self
    }

    /// Render the repeater and, recursively, all of its sub controls.
    ///
    /// `sub_fields` is rebuilt from the current sub controls on every call.
    /// Properties set through the mutators override the repeater settings.
    pub fn render(&self) -> ControlRecord {
        let mut properties = Map::new();
        extend_properties(&mut properties, to_value(&self.settings));
        self.attributes.write(&mut properties);

        ControlRecord {
            key: self.key.clone(),
            name: self.name.clone(),
            label: self.label.clone(),
            kind: "repeater".to_string(),
            properties,
            sub_fields: Some(self.controls.render()),
        }
    }
}

impl ControlBuilder for Repeater {
    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

impl ControlManager for Repeater {
    fn controls(&self) -> &ControlCollection {
        &self.controls
    }

    fn controls_mut(&mut self) -> &mut ControlCollection {
        &mut self.controls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::TextSettings;
    use serde_json::json;

    #[test]
    fn test_empty_repeater_renders_empty_sub_fields() {
        let record = Repeater::new("items", "Items").render();
        assert_eq!(record.kind, "repeater");
        assert_eq!(record.key, "field_items");
        assert_eq!(record.sub_fields, Some(vec![]));
    }

    #[test]
    fn test_settings_written_into_record() {
        let mut repeater = Repeater::new("items", "Items");
        repeater
            .with_settings(RepeaterSettings {
                max: Some(4),
                layout: Some(RepeaterLayout::Row),
                button_label: Some("Add item".to_string()),
                ..Default::default()
            })
            .mark_required();

        let value = repeater.render().to_value();
        assert_eq!(
            value,
            json!({
                "key": "field_items",
                "name": "items",
                "label": "Items",
                "type": "repeater",
                "required": 1,
                "max": 4,
                "layout": "row",
                "button_label": "Add item",
                "sub_fields": [],
            })
        );
    }

    #[test]
    fn test_mutators_override_settings() {
        let mut repeater = Repeater::new("items", "Items");
        repeater
            .with_settings(RepeaterSettings {
                max: Some(5),
                button_label: Some("Add row".to_string()),
                ..Default::default()
            })
            .set_property("max", 2);

        let record = repeater.render();
        assert_eq!(record.get("max"), Some(&json!(2)));
        assert_eq!(record.get("button_label"), Some(&json!("Add row")));
    }

    #[test]
    fn test_rerender_after_adding_does_not_duplicate() {
        let mut repeater = Repeater::new("items", "Items");
        repeater.add_text("first", "First", TextSettings::default());
        assert_eq!(repeater.render().sub_fields.map(|f| f.len()), Some(1));

        repeater.add_text("second", "Second", TextSettings::default());
        let first = repeater.render();
        let second = repeater.render();
        assert_eq!(first.sub_fields.as_ref().map(Vec::len), Some(2));
        assert_eq!(first, second);
    }

    #[test]
    fn test_nested_repeaters() {
        let mut outer = Repeater::new("sections", "Sections");
        let inner = outer.add_repeater("rows", "Rows");
        inner
            .add_repeater("cells", "Cells")
            .add_text("content", "Content", TextSettings::default());

        let record = outer.render();
        let rows = &record.sub_fields.as_ref().unwrap()[0];
        let cells = &rows.sub_fields.as_ref().unwrap()[0];
        let content = &cells.sub_fields.as_ref().unwrap()[0];
        assert_eq!(rows.key, "field_rows");
        assert_eq!(cells.kind, "repeater");
        assert_eq!(content.key, "field_content");
        assert!(content.sub_fields.is_none());
    }
}
