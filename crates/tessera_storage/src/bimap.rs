//! One-to-one association between two identifier spaces.
//!
//! Forward and reverse indices are kept in lock-step, so lookups are O(1)
//! in both directions.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tessera_foundation::{Error, Result};

/// Reversible one-to-one map between "first" and "second" values.
///
/// [`set`](Self::set) is last-write-wins: a pair that reuses an existing
/// first or second value evicts the stale pairing from both directions.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "A: Serialize + Eq + Hash, B: Serialize + Eq + Hash",
        deserialize = "A: Deserialize<'de> + Eq + Hash, B: Deserialize<'de> + Eq + Hash"
    ))
)]
pub struct BiMap<A, B> {
    /// First -> second.
    forward: HashMap<A, B>,
    /// Second -> first.
    reverse: HashMap<B, A>,
}

impl<A, B> Default for BiMap<A, B> {
    fn default() -> Self {
        Self {
            forward: HashMap::new(),
            reverse: HashMap::new(),
        }
    }
}

/// Pairs evicted by a [`BiMap::set`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Evicted<A, B> {
    /// The second value previously paired with the new first value.
    pub previous_second: Option<B>,
    /// The first value previously paired with the new second value.
    pub previous_first: Option<A>,
}

impl<A, B> Evicted<A, B> {
    /// Returns true if nothing was overwritten.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.previous_second.is_none() && self.previous_first.is_none()
    }
}

impl<A, B> BiMap<A, B>
where
    A: Eq + Hash + Clone,
    B: Eq + Hash + Clone,
{
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns true if there are no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Associates `first` with `second`, replacing any pairing either value
    /// was part of.
    pub fn set(&mut self, first: A, second: B) -> Evicted<A, B> {
        let previous_second = self.forward.remove(&first);
        if let Some(old) = &previous_second {
            self.reverse.remove(old);
        }
        let previous_first = self.reverse.remove(&second);
        if let Some(old) = &previous_first {
            self.forward.remove(old);
        }

        self.forward.insert(first.clone(), second.clone());
        self.reverse.insert(second, first);

        Evicted {
            previous_second,
            previous_first,
        }
    }

    /// Returns true if `first` is paired.
    #[must_use]
    pub fn contains_first(&self, first: &A) -> bool {
        self.forward.contains_key(first)
    }

    /// Returns true if `second` is paired.
    #[must_use]
    pub fn contains_second(&self, second: &B) -> bool {
        self.reverse.contains_key(second)
    }

    /// The second value paired with `first`, if any.
    #[must_use]
    pub fn try_second(&self, first: &A) -> Option<&B> {
        self.forward.get(first)
    }

    /// The first value paired with `second`, if any.
    #[must_use]
    pub fn try_first(&self, second: &B) -> Option<&A> {
        self.reverse.get(second)
    }

    /// Removes the pair containing `first`.
    pub fn remove_first(&mut self, first: &A) -> Option<B> {
        let second = self.forward.remove(first)?;
        self.reverse.remove(&second);
        Some(second)
    }

    /// Iterates over all pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&A, &B)> + '_ {
        self.forward.iter()
    }
}

impl<A, B> BiMap<A, B>
where
    A: Eq + Hash + Clone + Debug,
    B: Eq + Hash + Clone + Debug,
{
    /// The second value paired with `first`.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if `first` is not paired.
    pub fn get_second(&self, first: &A) -> Result<&B> {
        self.try_second(first)
            .ok_or_else(|| Error::not_found("second", "", format!("{first:?}")))
    }

    /// The first value paired with `second`.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if `second` is not paired.
    pub fn get_first(&self, second: &B) -> Result<&A> {
        self.try_first(second)
            .ok_or_else(|| Error::not_found("first", "", format!("{second:?}")))
    }
}
