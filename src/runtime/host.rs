//! The host the records are registered with
//!
//! The host is the content management platform and its custom fields plugin.
//! It is an external dependency: the crate only hands it records through the
//! [`Host`] trait. [`MemoryHost`] records everything in memory, which is
//! enough for dry-runs and tests.

use std::collections::HashSet;

use serde_json::{json, Value};

use crate::core::block::BlockRecord;
use crate::core::module::FieldGroupRecord;

/// Host function that registers field groups. The builder refuses to start
/// without it.
pub const FIELD_GROUP_CAPABILITY: &str = "acf_add_local_field_group";

/// Host function that registers blocks
pub const BLOCK_CAPABILITY: &str = "acf_register_block";

/// Registration interface of the host
pub trait Host {
    /// Whether the host provides the named function
    fn has_capability(&self, capability: &str) -> bool;

    /// Register one block with the block editor
    fn register_block(&mut self, block: &BlockRecord) -> Result<(), HostError>;

    /// Register one field group
    fn add_field_group(&mut self, group: &FieldGroupRecord) -> Result<(), HostError>;
}

/// A record the host refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("Host rejected block '{name}': {reason}")]
    BlockRejected { name: String, reason: String },

    #[error("Host rejected field group '{key}': {reason}")]
    FieldGroupRejected { key: String, reason: String },
}

/// Host that keeps registered records in memory, in registration order
#[derive(Debug, Clone)]
pub struct MemoryHost {
    capabilities: HashSet<String>,
    blocks: Vec<BlockRecord>,
    field_groups: Vec<FieldGroupRecord>,
    rejected_blocks: HashSet<String>,
    rejected_field_groups: HashSet<String>,
}

impl MemoryHost {
    /// Host providing both registration functions
    pub fn new() -> Self {
        Self {
            capabilities: [FIELD_GROUP_CAPABILITY, BLOCK_CAPABILITY]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            blocks: Vec::new(),
            field_groups: Vec::new(),
            rejected_blocks: HashSet::new(),
            rejected_field_groups: HashSet::new(),
        }
    }

    /// Host missing the given function
    pub fn without_capability(capability: &str) -> Self {
        let mut host = Self::new();
        host.capabilities.remove(capability);
        host
    }

    /// Make the host reject the block registered under `name`
    pub fn reject_block(&mut self, name: &str) {
        self.rejected_blocks.insert(name.to_string());
    }

    /// Make the host reject the field group with `key`
    pub fn reject_field_group(&mut self, key: &str) {
        self.rejected_field_groups.insert(key.to_string());
    }

    pub fn blocks(&self) -> &[BlockRecord] {
        &self.blocks
    }

    pub fn field_groups(&self) -> &[FieldGroupRecord] {
        &self.field_groups
    }

    /// All registered records as one document:
    /// `{"blocks": [...], "field_groups": [...]}`
    pub fn to_json(&self) -> Value {
        json!({
            "blocks": self.blocks,
            "field_groups": self.field_groups,
        })
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for MemoryHost {
    fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }

    fn register_block(&mut self, block: &BlockRecord) -> Result<(), HostError> {
        if self.rejected_blocks.contains(&block.name) {
            return Err(HostError::BlockRejected {
                name: block.name.clone(),
                reason: "rejected by host".to_string(),
            });
        }
        self.blocks.push(block.clone());
        Ok(())
    }

    fn add_field_group(&mut self, group: &FieldGroupRecord) -> Result<(), HostError> {
        if self.rejected_field_groups.contains(&group.key) {
            return Err(HostError::FieldGroupRejected {
                key: group.key.clone(),
                reason: "rejected by host".to_string(),
            });
        }
        self.field_groups.push(group.clone());
        Ok(())
    }
}
