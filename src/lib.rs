//! ACF Blocks - declare content modules once, register them twice
//!
//! Each module declared through the [`Builder`] becomes both a custom fields
//! group and a block in the block editor's picker. The crate shapes the
//! registration records; the host platform is reached only through the
//! [`Host`] trait.

pub mod categories;
pub mod core;
pub mod runtime;
mod tests;

// Re-export commonly used types
pub use crate::categories::{Category, CategoryList};
pub use crate::core::{ControlBuilder, ControlManager, ControlRecord, ControlSpec, Module, Repeater};
pub use crate::runtime::{BlockRegistry, Builder, BuilderError, BuilderOptions, Host, HostError, MemoryHost};

/// Everything needed to declare modules
pub mod prelude {
    pub use crate::categories::Category;
    pub use crate::core::block::{BlockInstance, BlockMode};
    pub use crate::core::control::{ControlBuilder, ControlKind, ControlSpec};
    pub use crate::core::manager::ControlManager;
    pub use crate::core::module::Module;
    pub use crate::core::repeater::{Repeater, RepeaterLayout, RepeaterSettings};
    pub use crate::core::settings::*;
    pub use crate::runtime::{BlockRegistry, Builder, BuilderError, BuilderOptions, Host, MemoryHost};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
