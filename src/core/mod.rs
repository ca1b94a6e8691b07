//! Core authoring types
//!
//! Controls, repeaters and modules, plus the records they render into. These
//! types only shape data; registering it is left to
//! [`runtime`](crate::runtime).

pub mod block;
pub mod control;
pub mod manager;
pub mod module;
pub mod repeater;
pub mod settings;
pub mod strings;

pub use block::{BlockInstance, BlockMode, BlockRecord};
pub use control::{Attributes, ConditionalRule, ControlBuilder, ControlKind, ControlRecord, ControlSpec};
pub use manager::{Control, ControlCollection, ControlManager};
pub use module::{FieldGroupRecord, FinalizedModule, LocationRule, Module};
pub use repeater::{Repeater, RepeaterLayout, RepeaterSettings};
