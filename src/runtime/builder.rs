//! The builder: entry point for declaring modules
//!
//! One builder is constructed per process. It refuses to start when the host
//! cannot register field groups, collects modules and their categories while
//! the plugin sets itself up, and turns into a [`BlockRegistry`] when the host
//! signals initialization.
//!
//! ```
//! use acf_blocks::prelude::*;
//!
//! let mut host = MemoryHost::new();
//! let mut builder = Builder::new(&host, BuilderOptions::default())?;
//!
//! let hero = builder.add_module("Hero Banner", "layout");
//! hero.add_text("heading", "Heading", TextSettings::default())
//!     .set_placeholder("Enter heading");
//! hero.add_image("background", "Background", ImageSettings::default());
//!
//! let registry = builder.finalize(&mut host)?;
//! assert_eq!(registry.modules().len(), 1);
//! assert_eq!(host.field_groups()[0].key, "group_hero-banner");
//! # Ok::<(), BuilderError>(())
//! ```

use serde_json::Value;

use crate::categories::{Category, CategoryList};
use crate::core::module::Module;

use super::host::{Host, HostError, FIELD_GROUP_CAPABILITY};
use super::options::BuilderOptions;
use super::registry::{restrict_block_types, BlockRegistry};

/// Builder errors
#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    /// The host lacks a function the builder cannot work without
    #[error(
        "The Advanced Custom Fields plugin was not detected (missing `{capability}`). \
         Please check to make sure it is active and try again."
    )]
    MissingHostCapability { capability: String },

    /// The host refused a record during finalization
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Registry of modules and block categories under authoring
#[derive(Debug)]
pub struct Builder {
    options: BuilderOptions,
    modules: Vec<Module>,
    categories: CategoryList,
}

impl Builder {
    /// Create a builder for `host`.
    ///
    /// # Arguments
    /// * `host` - The host the modules will be registered with
    /// * `options` - Builder configuration
    ///
    /// # Returns
    /// * `Ok(Builder)` with no modules and no categories
    /// * `Err(BuilderError::MissingHostCapability)` if the host cannot register
    ///   field groups. Nothing is created in that case.
    pub fn new<H: Host + ?Sized>(host: &H, options: BuilderOptions) -> Result<Self, BuilderError> {
        if !host.has_capability(FIELD_GROUP_CAPABILITY) {
            log::error!("Host capability '{}' is missing", FIELD_GROUP_CAPABILITY);
            return Err(BuilderError::MissingHostCapability {
                capability: FIELD_GROUP_CAPABILITY.to_string(),
            });
        }

        log::debug!("Builder created with options {:?}", options);
        Ok(Self {
            options,
            modules: Vec::new(),
            categories: CategoryList::new(),
        })
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Declare a module and return it for adding controls
    ///
    /// The category is registered the first time it is seen. Declaring two
    /// modules whose titles give the same key is logged but allowed.
    ///
    /// # Arguments
    /// * `name` - Module title; its kebab case form gives the key `group_<title>`
    /// * `category` - Slug of the block picker category
    ///
    /// # Returns
    /// The stored module, open for changes until [`finalize`](Self::finalize)
    ///
    /// # Example
    /// ```
    /// use acf_blocks::prelude::*;
    ///
    /// let mut builder = Builder::new(&MemoryHost::new(), BuilderOptions::default())?;
    /// builder
    ///     .add_module("Call To Action", "marketing")
    ///     .add_url("link", "Link");
    /// assert!(builder.module("group_call-to-action").is_some());
    /// assert_eq!(builder.categories()[0].title, "Marketing");
    /// # Ok::<(), BuilderError>(())
    /// ```
    pub fn add_module(&mut self, name: &str, category: &str) -> &mut Module {
        let module = Module::new(name, category);
        if self.modules.iter().any(|m| m.key() == module.key()) {
            log::warn!("Module key '{}' is declared more than once", module.key());
        }
        log::debug!("Adding module '{}' in category '{}'", module.key(), category);

        self.categories.insert(category);
        let index = self.modules.len();
        self.modules.push(module);
        &mut self.modules[index]
    }

    /// Register a block picker category. Categories are unique by slug, so
    /// adding an existing slug does nothing and returns `false`.
    pub fn add_block_category(&mut self, name: &str) -> bool {
        self.categories.insert(name)
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Module with the given key
    pub fn module(&self, key: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.key() == key)
    }

    pub fn module_mut(&mut self, key: &str) -> Option<&mut Module> {
        self.modules.iter_mut().find(|m| m.key() == key)
    }

    pub fn categories(&self) -> &[Category] {
        self.categories.as_slice()
    }

    /// Answer the host's category hook: the host's categories followed by
    /// this builder's. `context` is the editor context the host passes along
    /// (the post being edited); it does not affect the result.
    pub fn merge_block_categories(&self, existing: Vec<Category>, context: &Value) -> Vec<Category> {
        log::trace!("Merging block categories for context {}", context);
        self.categories.merged_into(existing)
    }

    /// Block types the picker may offer: the blocks of this builder's modules
    /// when restriction is enabled, `host_default` otherwise
    pub fn restrict_block_types(&self, host_default: Vec<String>) -> Vec<String> {
        restrict_block_types(
            &self.options,
            self.modules.iter().map(|m| m.location().block()),
            host_default,
        )
    }

    /// Finalize every module in declaration order and hand back the registry
    /// the host talks to from now on.
    ///
    /// # Arguments
    /// * `host` - The host to register every block and field group with
    ///
    /// # Returns
    /// * `Ok(BlockRegistry)` once every module is registered
    /// * `Err(BuilderError::Host)` for the first record the host rejects.
    ///   Records registered before it stay registered.
    pub fn finalize<H: Host + ?Sized>(self, host: &mut H) -> Result<BlockRegistry, BuilderError> {
        let Builder {
            options,
            modules,
            categories,
        } = self;

        let mut finalized = Vec::with_capacity(modules.len());
        for module in modules {
            finalized.push(module.finalize(host)?);
        }

        log::info!(
            "Registered {} modules in {} categories",
            finalized.len(),
            categories.len()
        );
        Ok(BlockRegistry::new(options, categories, finalized))
    }
}
