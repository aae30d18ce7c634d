//! Entity kinds and their declared generalizations.
//!
//! Every entity kind carries a statically declared [`Category`] tag. Kinds
//! form a single-parent generalization tree recorded explicitly in a
//! [`KindHierarchy`], which is walked outward to find the nearest kind that
//! owns a numbering bucket.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A kind or numbering-bucket tag, compared by name.
#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Category(Cow<'static, str>);

impl Category {
    /// Creates a category from a static name. Usable in `const` items.
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates a category from an owned name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// The category's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Category {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category({})", self.0)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Well-known kinds
// =============================================================================

/// Root of the structural model taxonomy.
pub const MODEL_OBJECT: Category = Category::from_static("ModelObject");
/// Analysis node.
pub const NODE: Category = Category::from_static("Node");
/// Any element.
pub const ELEMENT: Category = Category::from_static("Element");
/// Element with a curve as its set-out geometry.
pub const LINEAR_ELEMENT: Category = Category::from_static("LinearElement");
/// Element with a surface or mesh as its set-out geometry.
pub const PANEL_ELEMENT: Category = Category::from_static("PanelElement");
/// Any element property family.
pub const FAMILY: Category = Category::from_static("Family");
/// Cross-section family of linear elements.
pub const SECTION_FAMILY: Category = Category::from_static("SectionFamily");
/// Build-up family of panel elements.
pub const BUILD_UP_FAMILY: Category = Category::from_static("BuildUpFamily");
/// Any named set of model objects.
pub const MODEL_OBJECT_SET: Category = Category::from_static("ModelObjectSet");
/// Set of nodes.
pub const NODE_SET: Category = Category::from_static("NodeSet");
/// Set of elements.
pub const ELEMENT_SET: Category = Category::from_static("ElementSet");
/// Load case.
pub const LOAD_CASE: Category = Category::from_static("LoadCase");
/// Geometric vertex. Not a model object, so it has no numbering ancestor.
pub const VERTEX: Category = Category::from_static("Vertex");
/// Global or local coordinate-system reference.
pub const COORDINATE_SYSTEM_REFERENCE: Category =
    Category::from_static("CoordinateSystemReference");

// =============================================================================
// KindHierarchy
// =============================================================================

/// Explicit generalization table: each kind maps to at most one parent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KindHierarchy {
    parents: HashMap<Category, Category>,
}

impl KindHierarchy {
    /// Creates an empty hierarchy in which every kind is its own root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The structural model taxonomy.
    #[must_use]
    pub fn structural() -> Self {
        let mut hierarchy = Self::new();
        let declarations = [
            (NODE, MODEL_OBJECT),
            (ELEMENT, MODEL_OBJECT),
            (LINEAR_ELEMENT, ELEMENT),
            (PANEL_ELEMENT, ELEMENT),
            (FAMILY, MODEL_OBJECT),
            (SECTION_FAMILY, FAMILY),
            (BUILD_UP_FAMILY, FAMILY),
            (MODEL_OBJECT_SET, MODEL_OBJECT),
            (NODE_SET, MODEL_OBJECT_SET),
            (ELEMENT_SET, MODEL_OBJECT_SET),
            (LOAD_CASE, MODEL_OBJECT),
            (COORDINATE_SYSTEM_REFERENCE, MODEL_OBJECT),
        ];
        for (child, parent) in declarations {
            hierarchy.parents.insert(child, parent);
        }
        hierarchy
    }

    /// Declares `parent` as the direct generalization of `child`.
    ///
    /// Re-declaring a child replaces its parent.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration would make `child` its own ancestor.
    pub fn declare(&mut self, child: Category, parent: Category) -> Result<()> {
        if self.ancestors(&parent).any(|a| *a == child) {
            return Err(Error::cyclic_kind_hierarchy(child, parent));
        }
        self.parents.insert(child, parent);
        Ok(())
    }

    /// Builder form of [`declare`](Self::declare).
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration would introduce a cycle.
    pub fn with(mut self, child: Category, parent: Category) -> Result<Self> {
        self.declare(child, parent)?;
        Ok(self)
    }

    /// The direct generalization of `kind`, if declared.
    #[must_use]
    pub fn parent_of(&self, kind: &Category) -> Option<&Category> {
        self.parents.get(kind)
    }

    /// Number of declared child → parent edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Returns true if no generalizations are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Walks from `kind` outward: `kind` itself first, then each
    /// generalization in order of increasing distance.
    pub fn ancestors<'a>(&'a self, kind: &'a Category) -> impl Iterator<Item = &'a Category> + 'a {
        // A chain can never be longer than the number of edges plus its start.
        let bound = self.parents.len() + 1;
        std::iter::successors(Some(kind), move |k| self.parents.get(*k)).take(bound)
    }

    /// Finds the nearest kind in the generalization chain of `kind` that
    /// satisfies `is_registered`, returning it with its step distance.
    pub fn closest_registered<F>(&self, kind: &Category, mut is_registered: F) -> Option<(Category, usize)>
    where
        F: FnMut(&Category) -> bool,
    {
        self.ancestors(kind)
            .enumerate()
            .find(|(_, k)| is_registered(*k))
            .map(|(steps, k)| (k.clone(), steps))
    }

    /// Returns true if `ancestor` appears in the generalization chain of
    /// `kind` (including `kind` itself).
    #[must_use]
    pub fn is_a(&self, kind: &Category, ancestor: &Category) -> bool {
        self.ancestors(kind).any(|k| k == ancestor)
    }
}
