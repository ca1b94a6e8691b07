//! Control factory and ordered control collections
//!
//! [`ControlManager`] is implemented by everything that owns controls:
//! modules and repeaters. Its `add_*` methods create a typed control, append
//! it to the owner's [`ControlCollection`] and return it for further
//! customization. None of them fail: option values are passed through to the
//! host as they are.

use super::control::{ControlBuilder, ControlKind, ControlRecord, ControlSpec};
use super::repeater::Repeater;
use super::settings::{
    BooleanSettings, CheckboxSettings, Choices, EmbedSettings, FileSettings, GallerySettings,
    ImageSettings, NumberSettings, RadioSettings, RichTextSettings, SelectSettings,
    TextAreaSettings, TextSettings,
};

/// An entry of a control collection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control<'a> {
    Field(&'a ControlSpec),
    Repeater(&'a Repeater),
}

impl<'a> Control<'a> {
    pub fn key(self) -> &'a str {
        match self {
            Control::Field(spec) => spec.key(),
            Control::Repeater(repeater) => repeater.key(),
        }
    }

    pub fn name(self) -> &'a str {
        match self {
            Control::Field(spec) => spec.name(),
            Control::Repeater(repeater) => repeater.name(),
        }
    }

    pub fn render(self) -> ControlRecord {
        match self {
            Control::Field(spec) => spec.render(),
            Control::Repeater(repeater) => repeater.render(),
        }
    }
}

/// Position of an entry in the typed storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Field(usize),
    Repeater(usize),
}

/// Controls in the order they were added. The host renders fields in this
/// order, so the collection is append-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlCollection {
    fields: Vec<ControlSpec>,
    repeaters: Vec<Repeater>,
    order: Vec<Slot>,
}

impl ControlCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Controls in insertion order
    pub fn iter(&self) -> impl Iterator<Item = Control<'_>> + '_ {
        self.order.iter().filter_map(move |slot| match *slot {
            Slot::Field(index) => self.fields.get(index).map(Control::Field),
            Slot::Repeater(index) => self.repeaters.get(index).map(Control::Repeater),
        })
    }

    /// First control with the given name, searching nested repeaters too
    pub fn find(&self, name: &str) -> Option<Control<'_>> {
        self.iter().find_map(|control| {
            if control.name() == name {
                return Some(control);
            }
            match control {
                Control::Repeater(repeater) => repeater.controls().find(name),
                Control::Field(_) => None,
            }
        })
    }

    /// Keys of every control, nested ones included
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        for control in self.iter() {
            keys.push(control.key().to_string());
            if let Control::Repeater(repeater) = control {
                keys.extend(repeater.controls().keys());
            }
        }
        keys
    }

    /// Render every control, in order
    pub fn render(&self) -> Vec<ControlRecord> {
        self.iter().map(Control::render).collect()
    }

    pub(crate) fn push_field(&mut self, spec: ControlSpec) -> &mut ControlSpec {
        let index = self.fields.len();
        self.order.push(Slot::Field(index));
        self.fields.push(spec);
        &mut self.fields[index]
    }

    pub(crate) fn push_repeater(&mut self, repeater: Repeater) -> &mut Repeater {
        let index = self.repeaters.len();
        self.order.push(Slot::Repeater(index));
        self.repeaters.push(repeater);
        &mut self.repeaters[index]
    }
}

/// Typed control factory shared by modules and repeaters
pub trait ControlManager {
    fn controls(&self) -> &ControlCollection;

    fn controls_mut(&mut self) -> &mut ControlCollection;

    /// Append an already built control
    fn add_control(&mut self, spec: ControlSpec) -> &mut ControlSpec {
        log::trace!("Adding {} control '{}'", spec.kind().type_name(), spec.key());
        self.controls_mut().push_field(spec)
    }

    /// Single line text. The value is returned exactly as entered.
    fn add_text(&mut self, name: &str, label: &str, settings: TextSettings) -> &mut ControlSpec {
        self.add_control(ControlSpec::new(name, label, ControlKind::Text(settings)))
    }

    /// Multi line text
    fn add_textarea(&mut self, name: &str, label: &str, settings: TextAreaSettings) -> &mut ControlSpec {
        self.add_control(ControlSpec::new(name, label, ControlKind::TextArea(settings)))
    }

    fn add_number(&mut self, name: &str, label: &str, settings: NumberSettings) -> &mut ControlSpec {
        self.add_control(ControlSpec::new(name, label, ControlKind::Number(settings)))
    }

    /// Email input. Takes no settings: placeholder, prepend and append are
    /// set through the [`ControlBuilder`] mutators.
    fn add_email(&mut self, name: &str, label: &str) -> &mut ControlSpec {
        self.add_control(ControlSpec::new(name, label, ControlKind::Email))
    }

    /// URL input. Like [`add_email`](Self::add_email), configured through
    /// the mutators only.
    fn add_url(&mut self, name: &str, label: &str) -> &mut ControlSpec {
        self.add_control(ControlSpec::new(name, label, ControlKind::Url))
    }

    /// Password input. Like [`add_email`](Self::add_email), configured
    /// through the mutators only.
    fn add_password(&mut self, name: &str, label: &str) -> &mut ControlSpec {
        self.add_control(ControlSpec::new(name, label, ControlKind::Password))
    }

    /// WYSIWYG editor
    fn add_richtext(&mut self, name: &str, label: &str, settings: RichTextSettings) -> &mut ControlSpec {
        self.add_control(ControlSpec::new(name, label, ControlKind::RichText(settings)))
    }

    /// oEmbed field
    fn add_embed(&mut self, name: &str, label: &str, settings: EmbedSettings) -> &mut ControlSpec {
        self.add_control(ControlSpec::new(name, label, ControlKind::Embed(settings)))
    }

    /// Single image picker, returns the image URL unless configured otherwise
    fn add_image(&mut self, name: &str, label: &str, settings: ImageSettings) -> &mut ControlSpec {
        self.add_control(ControlSpec::new(name, label, ControlKind::Image(settings)))
    }

    fn add_file(&mut self, name: &str, label: &str, settings: FileSettings) -> &mut ControlSpec {
        self.add_control(ControlSpec::new(name, label, ControlKind::File(settings)))
    }

    fn add_gallery(&mut self, name: &str, label: &str, settings: GallerySettings) -> &mut ControlSpec {
        self.add_control(ControlSpec::new(name, label, ControlKind::Gallery(settings)))
    }

    /// Select dropdown offering `choices`
    fn add_select(
        &mut self,
        name: &str,
        label: &str,
        choices: Choices,
        settings: SelectSettings,
    ) -> &mut ControlSpec {
        self.add_control(ControlSpec::new(name, label, ControlKind::Select { choices, settings }))
    }

    fn add_checkbox(
        &mut self,
        name: &str,
        label: &str,
        choices: Choices,
        settings: CheckboxSettings,
    ) -> &mut ControlSpec {
        self.add_control(ControlSpec::new(name, label, ControlKind::Checkbox { choices, settings }))
    }

    /// True/false toggle with an optional message next to it
    fn add_boolean(&mut self, name: &str, label: &str, message: &str) -> &mut ControlSpec {
        let settings = BooleanSettings {
            message: message.to_string(),
        };
        self.add_control(ControlSpec::new(name, label, ControlKind::Boolean(settings)))
    }

    /// Radio buttons. Templates receive the chosen value, not its label.
    fn add_radio(
        &mut self,
        name: &str,
        label: &str,
        choices: Choices,
        settings: RadioSettings,
    ) -> &mut ControlSpec {
        self.add_control(ControlSpec::new(name, label, ControlKind::Radio { choices, settings }))
    }

    /// Repeatable group of sub controls. Add the sub controls to the returned
    /// repeater.
    fn add_repeater(&mut self, name: &str, label: &str) -> &mut Repeater {
        log::trace!("Adding repeater control '{}'", name);
        self.controls_mut().push_repeater(Repeater::new(name, label))
    }
}
