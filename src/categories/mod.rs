//! Block picker categories
//!
//! Modules are grouped under categories in the block picker. The builder
//! keeps its own categories unique by slug and appends them to the list the
//! host already has.

use serde::{Deserialize, Serialize};

use crate::core::strings::to_user_friendly_case;

/// A block picker category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    /// Programmatic name, referenced by block records
    pub slug: String,
    /// Name shown in the block picker
    pub title: String,
    /// Host-provided categories may carry an icon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Category {
    /// Category whose title is the user friendly form of `slug`
    pub fn from_slug(slug: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: to_user_friendly_case(slug),
            icon: None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Categories in first-seen order, unique by slug
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryList {
    categories: Vec<Category>,
}

impl CategoryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the category `slug` unless it is already present.
    /// Returns whether it was added.
    pub fn insert(&mut self, slug: &str) -> bool {
        if self.contains(slug) {
            return false;
        }
        log::debug!("Adding block category '{}'", slug);
        self.categories.push(Category::from_slug(slug));
        true
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.categories.iter().any(|c| c.slug == slug)
    }

    pub fn get(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn as_slice(&self) -> &[Category] {
        &self.categories
    }

    /// `existing` followed by these categories. Host categories are not
    /// deduplicated against ours.
    pub fn merged_into(&self, mut existing: Vec<Category>) -> Vec<Category> {
        existing.extend(self.categories.iter().cloned());
        existing
    }
}
