//! Block registry: what the host talks to after initialization
//!
//! Once every module is finalized the registry keeps the produced records and
//! answers the host's later callbacks:
//! - merging this plugin's categories into the block picker's list
//! - restricting the block picker to this plugin's blocks
//! - dispatching block renders to subscribed renderers
//! - listing the editor assets for an admin screen

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::categories::{Category, CategoryList};
use crate::core::block::{BlockInstance, BlockRecord};
use crate::core::module::{FieldGroupRecord, FinalizedModule};

use super::assets::{editor_assets, EditorAsset};
use super::options::BuilderOptions;

/// Name of the event renderers subscribe to
pub const RENDER_EVENT: &str = "builder_render_callback";

/// Receives every block instance the host renders
pub type RenderListener = Arc<dyn Fn(&BlockInstance) + Send + Sync>;

/// Block types the picker may offer. Restriction replaces the host's list
/// with `blocks`; without it the host's list is returned untouched.
pub(crate) fn restrict_block_types<'a>(
    options: &BuilderOptions,
    blocks: impl Iterator<Item = &'a str>,
    host_default: Vec<String>,
) -> Vec<String> {
    if options.restrict_block_categories {
        blocks.map(str::to_string).collect()
    } else {
        host_default
    }
}

/// Registered modules and their categories
#[derive(Clone)]
pub struct BlockRegistry {
    options: BuilderOptions,
    categories: CategoryList,
    modules: Vec<FinalizedModule>,
    listeners: Vec<RenderListener>,
}

impl BlockRegistry {
    pub(crate) fn new(options: BuilderOptions, categories: CategoryList, modules: Vec<FinalizedModule>) -> Self {
        Self {
            options,
            categories,
            modules,
            listeners: Vec::new(),
        }
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    pub fn modules(&self) -> &[FinalizedModule] {
        &self.modules
    }

    pub fn categories(&self) -> &[Category] {
        self.categories.as_slice()
    }

    /// Block records in registration order
    pub fn blocks(&self) -> impl Iterator<Item = &BlockRecord> {
        self.modules.iter().map(|m| &m.block)
    }

    /// Field group records in registration order
    pub fn field_groups(&self) -> impl Iterator<Item = &FieldGroupRecord> {
        self.modules.iter().map(|m| &m.field_group)
    }

    /// Finalized module with the given key
    pub fn module(&self, key: &str) -> Option<&FinalizedModule> {
        self.modules.iter().find(|m| m.key() == key)
    }

    /// Answer the host's category hook
    ///
    /// # Arguments
    /// * `existing` - Categories the host already shows
    /// * `context` - The editor context the host passes along (the post being
    ///   edited). It does not affect the result.
    ///
    /// # Returns
    /// `existing` followed by this plugin's categories. Host categories are
    /// not deduplicated against ours.
    pub fn merge_block_categories(&self, existing: Vec<Category>, context: &Value) -> Vec<Category> {
        log::trace!("Merging block categories for context {}", context);
        self.categories.merged_into(existing)
    }

    /// See [`Builder::restrict_block_types`](super::builder::Builder::restrict_block_types)
    pub fn restrict_block_types(&self, host_default: Vec<String>) -> Vec<String> {
        restrict_block_types(
            &self.options,
            self.modules.iter().map(|m| m.location().block()),
            host_default,
        )
    }

    /// Subscribe a renderer to block renders
    ///
    /// Listeners are called in subscription order, once per rendered block.
    pub fn on_render<F>(&mut self, listener: F)
    where
        F: Fn(&BlockInstance) + Send + Sync + 'static,
    {
        self.listeners.push(Arc::new(listener));
    }

    /// Render callback entry point
    ///
    /// Forwards the instance to every listener subscribed through
    /// [`on_render`](Self::on_render). Producing markup is entirely up to the
    /// listeners; with none subscribed the call does nothing.
    ///
    /// # Arguments
    /// * `instance` - The block being rendered with its raw field values
    ///
    /// # Example
    /// ```
    /// use std::sync::{Arc, Mutex};
    /// use acf_blocks::prelude::*;
    ///
    /// let mut host = MemoryHost::new();
    /// let mut builder = Builder::new(&host, BuilderOptions::default())?;
    /// builder.add_module("Quote", "content");
    /// let mut registry = builder.finalize(&mut host)?;
    ///
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let sink = Arc::clone(&seen);
    /// registry.on_render(move |block| {
    ///     if let Ok(mut names) = sink.lock() {
    ///         names.push(block.name.clone());
    ///     }
    /// });
    ///
    /// registry.render_block(&BlockInstance {
    ///     name: "acf/group_quote".to_string(),
    ///     data: Default::default(),
    /// });
    /// assert_eq!(*seen.lock().unwrap(), vec!["acf/group_quote".to_string()]);
    /// # Ok::<(), BuilderError>(())
    /// ```
    pub fn render_block(&self, instance: &BlockInstance) {
        log::debug!(
            "Dispatching {} for '{}' to {} listeners",
            RENDER_EVENT,
            instance.name,
            self.listeners.len()
        );
        for listener in &self.listeners {
            listener(instance);
        }
    }

    /// Assets the admin screen `screen` should load
    pub fn editor_assets(&self, screen: &str) -> Vec<EditorAsset> {
        editor_assets(screen, &self.options)
    }
}

impl fmt::Debug for BlockRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockRegistry")
            .field("options", &self.options)
            .field("categories", &self.categories)
            .field("modules", &self.modules)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::module::Module;
    use crate::runtime::host::MemoryHost;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Default)]
    struct Counter(Arc<AtomicUsize>);

    impl Counter {
        fn bump(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }

        fn get(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    fn registry(titles: &[&str]) -> BlockRegistry {
        let mut host = MemoryHost::new();
        let mut categories = CategoryList::new();
        let mut modules = Vec::new();
        for title in titles {
            categories.insert("layout");
            modules.push(Module::new(title, "layout").finalize(&mut host).unwrap());
        }
        BlockRegistry::new(BuilderOptions::default(), categories, modules)
    }

    #[test]
    fn test_restrict_ignores_host_default() {
        let registry = registry(&["A", "B"]);
        let allowed = registry.restrict_block_types(vec!["core/paragraph".to_string()]);
        assert_eq!(allowed, vec!["acf/group_a", "acf/group_b"]);
    }

    #[test]
    fn test_render_dispatch_reaches_every_listener() {
        let mut registry = registry(&["A"]);
        let first = Counter::default();
        let second = Counter::default();

        let seen = first.clone();
        registry.on_render(move |instance| {
            assert_eq!(instance.name, "acf/group_a");
            seen.bump();
        });
        let seen = second.clone();
        registry.on_render(move |_| seen.bump());

        let instance = BlockInstance {
            name: "acf/group_a".to_string(),
            data: Default::default(),
        };
        registry.render_block(&instance);
        registry.render_block(&instance);

        assert_eq!(first.get(), 2);
        assert_eq!(second.get(), 2);
    }

    #[test]
    fn test_render_without_listeners_is_a_no_op() {
        let registry = registry(&["A"]);
        registry.render_block(&BlockInstance {
            name: "acf/group_a".to_string(),
            data: Default::default(),
        });
    }

    #[test]
    fn test_lookup_and_records() {
        let registry = registry(&["Hero Banner", "Quote"]);
        assert!(registry.module("group_quote").is_some());
        assert_eq!(registry.blocks().count(), 2);
        assert_eq!(
            registry.field_groups().map(|g| g.key.as_str()).collect::<Vec<_>>(),
            vec!["group_hero-banner", "group_quote"]
        );
        assert_eq!(registry.editor_assets("post.php").len(), 3);
    }
}
