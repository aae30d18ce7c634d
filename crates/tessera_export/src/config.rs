//! Configuration for the identity allocator.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tessera_foundation::category::{
    BUILD_UP_FAMILY, ELEMENT, LOAD_CASE, MODEL_OBJECT_SET, NODE, SECTION_FAMILY,
};
use tessera_foundation::{Category, KindHierarchy};

/// Configuration for an [`IdAllocator`](crate::IdAllocator) session.
///
/// The registered categories are fixed once the allocator is built.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AllocatorConfig {
    /// Name of the internal identifier space.
    pub first_id_name: String,

    /// Name of the external identifier space.
    pub second_id_name: String,

    /// Kinds that own a numbering counter.
    pub categories: Vec<Category>,

    /// First value handed out by every counter.
    pub start_value: u32,

    /// Generalizations used when a kind has no counter of its own.
    pub hierarchy: KindHierarchy,

    /// Token emitted for the global coordinate-system reference.
    pub global_token: String,

    /// Token emitted for the local coordinate-system reference.
    pub local_token: String,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self::gsa()
    }
}

impl AllocatorConfig {
    /// Numbering for the GSA exchange format: nodes, elements, section and
    /// build-up families, sets and load cases each count from 1.
    #[must_use]
    pub fn gsa() -> Self {
        Self {
            categories: vec![
                NODE,
                ELEMENT,
                SECTION_FAMILY,
                BUILD_UP_FAMILY,
                MODEL_OBJECT_SET,
                LOAD_CASE,
            ],
            ..Self::empty()
        }
    }

    /// No registered categories. Every resolution fails until categories are
    /// added with [`with_category`](Self::with_category).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            first_id_name: "Tessera".to_string(),
            second_id_name: "GSA".to_string(),
            categories: Vec::new(),
            start_value: 1,
            hierarchy: KindHierarchy::structural(),
            global_token: "GLOBAL".to_string(),
            local_token: "LOCAL".to_string(),
        }
    }

    /// Builder method to register a category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<Category>) -> Self {
        let category = category.into();
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
        self
    }

    /// Builder method to replace the registered categories.
    #[must_use]
    pub fn with_categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories = Vec::new();
        for category in categories {
            self = self.with_category(category);
        }
        self
    }

    /// Builder method to set the counter start value.
    #[must_use]
    pub fn with_start_value(mut self, start: u32) -> Self {
        self.start_value = start;
        self
    }

    /// Builder method to set the kind hierarchy.
    #[must_use]
    pub fn with_hierarchy(mut self, hierarchy: KindHierarchy) -> Self {
        self.hierarchy = hierarchy;
        self
    }

    /// Builder method to name both identifier spaces.
    #[must_use]
    pub fn with_id_names(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.first_id_name = first.into();
        self.second_id_name = second.into();
        self
    }

    /// Builder method to set the coordinate-system sentinel tokens.
    #[must_use]
    pub fn with_sentinel_tokens(
        mut self,
        global: impl Into<String>,
        local: impl Into<String>,
    ) -> Self {
        self.global_token = global.into();
        self.local_token = local.into();
        self
    }
}
