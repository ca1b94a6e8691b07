//! Control definitions
//!
//! A control is one input field inside a module or a repeater. It is built in
//! two steps: a [`ControlManager`](super::manager::ControlManager) creates the
//! [`ControlSpec`] with its kind settings, and the caller then customizes it
//! through the [`ControlBuilder`] mutators. [`ControlSpec::render`] turns the
//! accumulated state into the [`ControlRecord`] the host consumes.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::settings::{
    BooleanSettings, CheckboxSettings, Choices, EmbedSettings, FileSettings, GallerySettings,
    ImageSettings, NumberSettings, RadioSettings, RichTextSettings, SelectSettings,
    TextAreaSettings, TextSettings,
};

/// Prefix of every control key
pub const CONTROL_KEY_PREFIX: &str = "field_";

/// Record keys owned by the control itself, never overridable by properties
pub const RESERVED_KEYS: [&str; 5] = ["key", "name", "label", "type", "sub_fields"];

/// Derive the key of the control called `name`
pub fn control_key(name: &str) -> String {
    format!("{}{}", CONTROL_KEY_PREFIX, name)
}

/// The kind of a control together with its kind-specific settings
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    Text(TextSettings),
    TextArea(TextAreaSettings),
    Number(NumberSettings),
    Email,
    Url,
    Password,
    RichText(RichTextSettings),
    Embed(EmbedSettings),
    Image(ImageSettings),
    File(FileSettings),
    Gallery(GallerySettings),
    Select { choices: Choices, settings: SelectSettings },
    Checkbox { choices: Choices, settings: CheckboxSettings },
    Boolean(BooleanSettings),
    Radio { choices: Choices, settings: RadioSettings },
}

impl ControlKind {
    /// The host's name for this kind, written as the record's `type`
    pub fn type_name(&self) -> &'static str {
        match self {
            ControlKind::Text(_) => "text",
            ControlKind::TextArea(_) => "textarea",
            ControlKind::Number(_) => "number",
            ControlKind::Email => "email",
            ControlKind::Url => "url",
            ControlKind::Password => "password",
            ControlKind::RichText(_) => "wysiwyg",
            ControlKind::Embed(_) => "oembed",
            ControlKind::Image(_) => "image",
            ControlKind::File(_) => "file",
            ControlKind::Gallery(_) => "gallery",
            ControlKind::Select { .. } => "select",
            ControlKind::Checkbox { .. } => "checkbox",
            ControlKind::Boolean(_) => "true_false",
            ControlKind::Radio { .. } => "radio",
        }
    }

    /// Choices offered by choice kinds
    pub fn choices(&self) -> Option<&Choices> {
        match self {
            ControlKind::Select { choices, .. }
            | ControlKind::Checkbox { choices, .. }
            | ControlKind::Radio { choices, .. } => Some(choices),
            _ => None,
        }
    }

    fn write_settings(&self, properties: &mut Map<String, Value>) {
        if let Some(choices) = self.choices() {
            properties.insert("choices".to_string(), to_value(choices));
        }

        let settings = match self {
            ControlKind::Text(settings) => to_value(settings),
            ControlKind::TextArea(settings) => to_value(settings),
            ControlKind::Number(settings) => to_value(settings),
            ControlKind::Email | ControlKind::Url | ControlKind::Password => return,
            ControlKind::RichText(settings) => to_value(settings),
            ControlKind::Embed(settings) => to_value(settings),
            ControlKind::Image(settings) => to_value(settings),
            ControlKind::File(settings) => to_value(settings),
            ControlKind::Gallery(settings) => to_value(settings),
            ControlKind::Select { settings, .. } => to_value(settings),
            ControlKind::Checkbox { settings, .. } => to_value(settings),
            ControlKind::Boolean(settings) => to_value(settings),
            ControlKind::Radio { settings, .. } => to_value(settings),
        };
        extend_properties(properties, settings);
    }
}

/// Serialize a settings record. Settings only hold strings, numbers and flags,
/// so this never fails; a failure would leave the settings out.
pub(crate) fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        log::error!("Failed to serialize control settings: {}", e);
        Value::Null
    })
}

/// Merge the entries of an object value into `properties`, later entries win
pub(crate) fn extend_properties(properties: &mut Map<String, Value>, value: Value) {
    if let Value::Object(entries) = value {
        for (key, value) in entries {
            properties.insert(key, value);
        }
    }
}

/// Makes a control visible only when another control holds an expected value
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalRule {
    /// Key of the control this one depends on
    pub field: String,
    /// The value that control must equal
    pub value: Value,
}

impl ConditionalRule {
    /// Rule that shows the owner when the control called `control_name`
    /// equals `expected`
    pub fn equals(control_name: &str, expected: impl Into<Value>) -> Self {
        Self {
            field: control_key(control_name),
            value: expected.into(),
        }
    }

    pub fn operator(&self) -> &'static str {
        "=="
    }
}

/// Written as a single OR group holding a single AND clause:
/// `[[{"field": ..., "operator": "==", "value": ...}]]`
impl Serialize for ConditionalRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Clause<'a> {
            field: &'a str,
            operator: &'a str,
            value: &'a Value,
        }

        let clause = Clause {
            field: &self.field,
            operator: self.operator(),
            value: &self.value,
        };
        let mut groups = serializer.serialize_seq(Some(1))?;
        groups.serialize_element(&[clause])?;
        groups.end()
    }
}

/// Optional attributes shared by every control, repeaters included
///
/// Every mutator writes one entry into a single ordered map, so the last
/// write to a property wins and entries keep the order they were first set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    properties: Map<String, Value>,
    condition: Option<ConditionalRule>,
}

impl Attributes {
    /// Current value of a property
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.properties.get(property)
    }

    /// The condition set through [`ControlBuilder::set_condition`], unless a
    /// later write replaced it
    pub fn condition(&self) -> Option<&ConditionalRule> {
        self.condition.as_ref()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub(crate) fn set(&mut self, property: &str, value: Value) {
        if property == CONDITION_PROPERTY {
            self.condition = None;
        }
        self.properties.insert(property.to_string(), value);
    }

    pub(crate) fn set_condition(&mut self, rule: ConditionalRule) {
        self.properties.insert(CONDITION_PROPERTY.to_string(), to_value(&rule));
        self.condition = Some(rule);
    }

    /// Write every property over `properties`, in the order they were set
    pub(crate) fn write(&self, properties: &mut Map<String, Value>) {
        for (key, value) in &self.properties {
            properties.insert(key.clone(), value.clone());
        }
    }
}

const CONDITION_PROPERTY: &str = "conditional_logic";

/// Mutators shared by every control
///
/// Each mutator sets one property in place and hands the control back so
/// calls can be chained. Setting a property twice keeps the last value:
///
/// ```
/// use acf_blocks::prelude::*;
///
/// let mut heading = ControlSpec::new("heading", "Heading", ControlKind::Text(Default::default()));
/// heading
///     .mark_required()
///     .set_property("placeholder", "Heading")
///     .set_placeholder("Enter heading");
///
/// let record = heading.render();
/// assert_eq!(record.get("required"), Some(&1.into()));
/// assert_eq!(record.get("placeholder"), Some(&"Enter heading".into()));
/// ```
pub trait ControlBuilder {
    /// Name the control is referenced by in templates
    fn name(&self) -> &str;

    fn attributes(&self) -> &Attributes;

    fn attributes_mut(&mut self) -> &mut Attributes;

    /// Help text shown to editors
    fn set_instructions(&mut self, instructions: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.attributes_mut().set("instructions", Value::from(instructions));
        self
    }

    fn mark_required(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self.attributes_mut().set("required", Value::from(1));
        self
    }

    fn set_default(&mut self, value: impl Into<Value>) -> &mut Self
    where
        Self: Sized,
    {
        self.attributes_mut().set("default_value", value.into());
        self
    }

    /// Show this control only while the control called `control_name` equals
    /// `expected`. The referenced control is not required to exist.
    fn set_condition(&mut self, control_name: &str, expected: impl Into<Value>) -> &mut Self
    where
        Self: Sized,
    {
        self.attributes_mut()
            .set_condition(ConditionalRule::equals(control_name, expected));
        self
    }

    fn set_placeholder(&mut self, text: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.attributes_mut().set("placeholder", Value::from(text));
        self
    }

    fn set_prepend(&mut self, text: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.attributes_mut().set("prepend", Value::from(text));
        self
    }

    fn set_append(&mut self, text: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.attributes_mut().set("append", Value::from(text));
        self
    }

    /// Set any other property the host understands. Reserved record keys
    /// (`key`, `name`, `label`, `type`, `sub_fields`) are ignored.
    fn set_property(&mut self, property: &str, value: impl Into<Value>) -> &mut Self
    where
        Self: Sized,
    {
        if RESERVED_KEYS.contains(&property) {
            log::warn!(
                "Ignoring reserved property '{}' on control '{}'",
                property,
                self.name()
            );
        } else {
            self.attributes_mut().set(property, value.into());
        }
        self
    }
}

/// One form field definition
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSpec {
    key: String,
    name: String,
    label: String,
    kind: ControlKind,
    attributes: Attributes,
}

impl ControlSpec {
    /// Create a control. Its key is `field_<name>`.
    pub fn new(name: &str, label: &str, kind: ControlKind) -> Self {
        if name.is_empty() {
            log::warn!("Creating a {} control with an empty name", kind.type_name());
        }
        Self {
            key: control_key(name),
            name: name.to_string(),
            label: label.to_string(),
            kind,
            attributes: Attributes::default(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &ControlKind {
        &self.kind
    }

    /// Snapshot of the control in the shape the host expects.
    ///
    /// Kind settings are written first; properties set through the
    /// [`ControlBuilder`] mutators follow and override them.
    pub fn render(&self) -> ControlRecord {
        let mut properties = Map::new();
        self.kind.write_settings(&mut properties);
        self.attributes.write(&mut properties);

        ControlRecord {
            key: self.key.clone(),
            name: self.name.clone(),
            label: self.label.clone(),
            kind: self.kind.type_name().to_string(),
            properties,
            sub_fields: None,
        }
    }
}

impl ControlBuilder for ControlSpec {
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

/// A rendered control: the flat mapping handed to the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlRecord {
    pub key: String,
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Optional and kind-specific properties, in write order
    #[serde(flatten)]
    pub properties: Map<String, Value>,
    /// Rendered sub controls, only present on repeaters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_fields: Option<Vec<ControlRecord>>,
}

impl ControlRecord {
    /// Look up an optional property
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.properties.get(property)
    }

    /// The record as a JSON value
    pub fn to_value(&self) -> Value {
        to_value(self)
    }
}
