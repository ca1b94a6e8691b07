//! Modules
//!
//! A module is a named collection of controls that defines how one content
//! section looks. It becomes both a field group and a block in the block
//! picker. Modules are authored through the [`ControlManager`] methods and
//! then finalized exactly once: [`Module::finalize`] consumes the module,
//! registers its two records with the host and returns them.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use super::block::{BlockMode, BlockRecord};
use super::control::{ControlBuilder, ControlRecord};
use super::manager::{Control, ControlCollection, ControlManager};
use super::strings::to_kebab_case;
use crate::runtime::host::{Host, HostError};

/// Prefix of every module key
pub const MODULE_KEY_PREFIX: &str = "group_";

/// Namespace the host gives to registered blocks
pub const BLOCK_NAMESPACE: &str = "acf/";

/// Derive the key of the module titled `title`
pub fn module_key(title: &str) -> String {
    format!("{}{}", MODULE_KEY_PREFIX, to_kebab_case(title))
}

/// Binds a field group to exactly one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRule {
    block: String,
}

impl LocationRule {
    /// Rule matching the block registered for the module with `module_key`
    pub fn for_module(module_key: &str) -> Self {
        Self {
            block: format!("{}{}", BLOCK_NAMESPACE, module_key),
        }
    }

    /// The block identifier this rule matches, e.g. `acf/group_hero-banner`
    pub fn block(&self) -> &str {
        &self.block
    }
}

/// Written as `[[{"param": "block", "operator": "==", "value": ...}]]`
impl Serialize for LocationRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Clause<'a> {
            param: &'a str,
            operator: &'a str,
            value: &'a str,
        }

        let clause = Clause {
            param: "block",
            operator: "==",
            value: &self.block,
        };
        let mut groups = serializer.serialize_seq(Some(1))?;
        groups.serialize_element(&[clause])?;
        groups.end()
    }
}

/// Field group registration payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldGroupRecord {
    pub key: String,
    pub title: String,
    pub location: LocationRule,
    pub fields: Vec<ControlRecord>,
}

/// The records a module produced when it was finalized
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizedModule {
    pub block: BlockRecord,
    pub field_group: FieldGroupRecord,
}

impl FinalizedModule {
    pub fn key(&self) -> &str {
        &self.field_group.key
    }

    pub fn location(&self) -> &LocationRule {
        &self.field_group.location
    }
}

/// A content section under authoring
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    key: String,
    title: String,
    category: String,
    description: Option<String>,
    mode: BlockMode,
    location: LocationRule,
    controls: ControlCollection,
}

impl Module {
    /// Create an empty module titled `title` in the block picker category
    /// `category`. Its key is `group_<kebab(title)>`.
    pub fn new(title: &str, category: &str) -> Self {
        let key = module_key(title);
        let location = LocationRule::for_module(&key);
        Self {
            key,
            title: title.to_string(),
            category: category.to_string(),
            description: None,
            mode: BlockMode::default(),
            location,
            controls: ControlCollection::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn location(&self) -> &LocationRule {
        &self.location
    }

    /// Description shown in the block picker
    pub fn set_description(&mut self, description: &str) -> &mut Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn set_mode(&mut self, mode: BlockMode) -> &mut Self {
        self.mode = mode;
        self
    }

    /// The block record this module registers
    pub fn block_record(&self) -> BlockRecord {
        let mut block = BlockRecord::new(&self.key, &self.title, &self.category);
        block.description = self.description.clone();
        block.mode = self.mode;
        block
    }

    /// The field group record this module registers, rendered from the
    /// current controls
    pub fn field_group_record(&self) -> FieldGroupRecord {
        FieldGroupRecord {
            key: self.key.clone(),
            title: self.title.clone(),
            location: self.location.clone(),
            fields: self.controls.render(),
        }
    }

    /// Conditions that reference a control this module does not contain,
    /// as `(dependent key, referenced key)` pairs
    pub fn dangling_conditions(&self) -> Vec<(String, String)> {
        let known = self.controls.keys();
        let mut dangling = Vec::new();
        collect_dangling(&self.controls, &known, &mut dangling);
        dangling
    }

    /// Register the block and the field group with the host
    ///
    /// Consumes the module: no control can be added once it is registered.
    /// Conditions referencing unknown controls are logged, not rejected.
    ///
    /// # Arguments
    /// * `host` - The host to register both records with
    ///
    /// # Returns
    /// * `Ok(FinalizedModule)` holding the two registered records
    /// * `Err(HostError)` as returned by the host, unretried. If the field
    ///   group is rejected the block stays registered.
    ///
    /// # Example
    /// ```
    /// use acf_blocks::prelude::*;
    ///
    /// let mut module = Module::new("Hero Banner", "layout");
    /// module.add_text("heading", "Heading", TextSettings::default());
    ///
    /// let mut host = MemoryHost::new();
    /// let finalized = module.finalize(&mut host)?;
    /// assert_eq!(finalized.location().block(), "acf/group_hero-banner");
    /// assert_eq!(host.field_groups()[0].fields.len(), 1);
    /// # Ok::<(), acf_blocks::HostError>(())
    /// ```
    pub fn finalize<H: Host + ?Sized>(self, host: &mut H) -> Result<FinalizedModule, HostError> {
        for (dependent, referenced) in self.dangling_conditions() {
            log::warn!(
                "Control '{}' in module '{}' depends on unknown control '{}'",
                dependent,
                self.key,
                referenced
            );
        }

        let block = self.block_record();
        log::debug!("Registering block '{}' in category '{}'", block.name, block.category);
        host.register_block(&block)?;

        let field_group = self.field_group_record();
        log::debug!(
            "Registering field group '{}' with {} fields",
            field_group.key,
            field_group.fields.len()
        );
        host.add_field_group(&field_group)?;

        Ok(FinalizedModule { block, field_group })
    }
}

fn collect_dangling(controls: &ControlCollection, known: &[String], dangling: &mut Vec<(String, String)>) {
    for control in controls.iter() {
        let (key, attributes) = match control {
            Control::Field(spec) => (spec.key(), spec.attributes()),
            Control::Repeater(repeater) => (repeater.key(), repeater.attributes()),
        };
        if let Some(rule) = attributes.condition() {
            if !known.iter().any(|k| *k == rule.field) {
                dangling.push((key.to_string(), rule.field.clone()));
            }
        }
        if let Control::Repeater(repeater) = control {
            collect_dangling(repeater.controls(), known, dangling);
        }
    }
}

impl ControlManager for Module {
    fn controls(&self) -> &ControlCollection {
        &self.controls
    }

    fn controls_mut(&mut self) -> &mut ControlCollection {
        &mut self.controls
    }
}
