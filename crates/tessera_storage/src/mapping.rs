//! Category-partitioned identifier mapping tables.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tessera_foundation::{Error, Result};
use tracing::trace;

use crate::bimap::BiMap;

/// A table of [`BiMap`]s from one identifier space to another, partitioned
/// by category name.
///
/// Category buckets are created on first write. Every operation has a form
/// that uses [`DEFAULT_CATEGORY`](Self::DEFAULT_CATEGORY) and an `_in` form
/// taking an explicit category.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "A: Serialize + Eq + Hash, B: Serialize + Eq + Hash",
        deserialize = "A: Deserialize<'de> + Eq + Hash, B: Deserialize<'de> + Eq + Hash"
    ))
)]
pub struct IdMappingTable<A, B> {
    first_id_name: String,
    second_id_name: String,
    categories: HashMap<String, BiMap<A, B>>,
}

impl<A, B> IdMappingTable<A, B>
where
    A: Eq + Hash + Clone + Debug,
    B: Eq + Hash + Clone + Debug,
{
    /// The category used when none is specified.
    pub const DEFAULT_CATEGORY: &'static str = "";

    /// Creates an empty table mapping the named first space to the named
    /// second space.
    #[must_use]
    pub fn new(first_id_name: impl Into<String>, second_id_name: impl Into<String>) -> Self {
        Self {
            first_id_name: first_id_name.into(),
            second_id_name: second_id_name.into(),
            categories: HashMap::new(),
        }
    }

    /// Name of the first identifier space.
    #[must_use]
    pub fn first_id_name(&self) -> &str {
        &self.first_id_name
    }

    /// Name of the second identifier space.
    #[must_use]
    pub fn second_id_name(&self) -> &str {
        &self.second_id_name
    }

    /// The bucket for `category`, if it has been written to.
    #[must_use]
    pub fn category(&self, category: &str) -> Option<&BiMap<A, B>> {
        self.categories.get(category)
    }

    /// Names of every category written to, in no particular order.
    pub fn categories(&self) -> impl Iterator<Item = &str> + '_ {
        self.categories.keys().map(String::as_str)
    }

    /// Total number of pairs across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.values().map(BiMap::len).sum()
    }

    /// Returns true if no pairs are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `first` has a second-space entry in `category`.
    #[must_use]
    pub fn has_second_id_in(&self, category: &str, first: &A) -> bool {
        self.category(category)
            .is_some_and(|map| map.contains_first(first))
    }

    /// Returns true if `first` has a second-space entry in the default category.
    #[must_use]
    pub fn has_second_id(&self, first: &A) -> bool {
        self.has_second_id_in(Self::DEFAULT_CATEGORY, first)
    }

    /// The second-space value mapped from `first` in `category`.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the category or entry does not exist.
    pub fn second_id_in(&self, category: &str, first: &A) -> Result<&B> {
        self.category(category)
            .and_then(|map| map.try_second(first))
            .ok_or_else(|| Error::not_found(&self.second_id_name, category, format!("{first:?}")))
    }

    /// The second-space value mapped from `first` in the default category.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the entry does not exist.
    pub fn second_id(&self, first: &A) -> Result<&B> {
        self.second_id_in(Self::DEFAULT_CATEGORY, first)
    }

    /// Returns true if `second` has a first-space entry in `category`.
    #[must_use]
    pub fn has_first_id_in(&self, category: &str, second: &B) -> bool {
        self.category(category)
            .is_some_and(|map| map.contains_second(second))
    }

    /// Returns true if `second` has a first-space entry in the default category.
    #[must_use]
    pub fn has_first_id(&self, second: &B) -> bool {
        self.has_first_id_in(Self::DEFAULT_CATEGORY, second)
    }

    /// The first-space value mapped from `second` in `category`.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the category or entry does not exist.
    pub fn first_id_in(&self, category: &str, second: &B) -> Result<&A> {
        self.category(category)
            .and_then(|map| map.try_first(second))
            .ok_or_else(|| Error::not_found(&self.first_id_name, category, format!("{second:?}")))
    }

    /// The first-space value mapped from `second` in the default category.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the entry does not exist.
    pub fn first_id(&self, second: &B) -> Result<&A> {
        self.first_id_in(Self::DEFAULT_CATEGORY, second)
    }

    /// Records `first` <-> `second` in `category`, creating the bucket on
    /// first use. Existing pairings that collide are replaced.
    pub fn add_in(&mut self, category: &str, first: A, second: B) {
        if let Some(map) = self.categories.get_mut(category) {
            map.set(first, second);
            return;
        }
        trace!(
            table = %self.second_id_name,
            category,
            "created mapping category"
        );
        self.categories
            .entry(category.to_string())
            .or_default()
            .set(first, second);
    }

    /// Records `first` <-> `second` in the default category.
    pub fn add(&mut self, first: A, second: B) {
        self.add_in(Self::DEFAULT_CATEGORY, first, second);
    }
}
