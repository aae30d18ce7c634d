//! Collections that enforce single ownership of their members.
//!
//! An [`OwnedCollection`] is the sole owner of its members. Each member
//! keeps a non-owning back-reference (the owner's [`Identity`]) that the
//! collection sets on add and clears on remove, so "which aggregate does this
//! vertex belong to" can be answered without reference cycles.

use tessera_foundation::{Entity, Error, Identity, Result};
use tracing::warn;

/// A member that records which aggregate currently owns it.
pub trait Owned: Entity {
    /// Identity of the current owner, if any.
    fn owner(&self) -> Option<Identity>;

    /// Sets or clears the owner back-reference.
    ///
    /// Only owned collections should call this.
    fn set_owner(&mut self, owner: Option<Identity>);
}

/// Ordered collection whose members belong to at most one owner at a time.
///
/// The owner may be `None` for a detached collection; members added to it
/// carry no owner.
#[derive(Clone, Debug)]
pub struct OwnedCollection<T: Owned> {
    owner: Option<Identity>,
    items: Vec<T>,
}

impl<T: Owned> Default for OwnedCollection<T> {
    fn default() -> Self {
        Self::detached()
    }
}

impl<T: Owned> OwnedCollection<T> {
    /// Creates an empty collection owned by `owner`.
    #[must_use]
    pub fn new(owner: Identity) -> Self {
        Self {
            owner: Some(owner),
            items: Vec::new(),
        }
    }

    /// Creates an empty collection with no owner.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            owner: None,
            items: Vec::new(),
        }
    }

    /// The owning aggregate's identity.
    #[must_use]
    pub fn owner(&self) -> Option<Identity> {
        self.owner
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends `item` and points its back-reference at this collection's owner.
    ///
    /// Adding an item whose identity is already a member is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an ownership conflict if `item` is owned by a different owner.
    /// The item must be removed from its current collection first.
    pub fn add(&mut self, mut item: T) -> Result<()> {
        if let Some(current) = item.owner() {
            if Some(current) != self.owner {
                warn!(
                    item = %item.identity(),
                    owner = %current,
                    "rejected add of item that already has an owner"
                );
                return Err(Error::ownership_conflict(
                    item.identity(),
                    current,
                    self.owner,
                ));
            }
        }
        if self.contains(item.identity()) {
            return Ok(());
        }
        item.set_owner(self.owner);
        self.items.push(item);
        Ok(())
    }

    /// Adds each item in order, stopping at the first conflict.
    ///
    /// # Errors
    ///
    /// Returns the first ownership conflict; items before it remain added.
    pub fn add_all(&mut self, items: impl IntoIterator<Item = T>) -> Result<()> {
        for item in items {
            self.add(item)?;
        }
        Ok(())
    }

    /// Removes the member with `identity`, returning it.
    ///
    /// The back-reference is cleared only if it still points at this
    /// collection's owner.
    pub fn remove(&mut self, identity: Identity) -> Option<T> {
        let idx = self.position(identity)?;
        let mut item = self.items.remove(idx);
        if item.owner() == self.owner {
            item.set_owner(None);
        }
        Some(item)
    }

    /// Removes every member, clearing their back-references.
    ///
    /// Called when the owning aggregate is destroyed.
    pub fn clear(&mut self) -> Vec<T> {
        let owner = self.owner;
        self.items
            .drain(..)
            .map(|mut item| {
                if item.owner() == owner {
                    item.set_owner(None);
                }
                item
            })
            .collect()
    }

    /// Returns true if a member has `identity`.
    #[must_use]
    pub fn contains(&self, identity: Identity) -> bool {
        self.position(identity).is_some()
    }

    /// Index of the member with `identity`.
    #[must_use]
    pub fn position(&self, identity: Identity) -> Option<usize> {
        self.items.iter().position(|item| item.identity() == identity)
    }

    /// The member with `identity`.
    #[must_use]
    pub fn get(&self, identity: Identity) -> Option<&T> {
        self.items.iter().find(|item| item.identity() == identity)
    }

    /// The member with `identity`, mutably.
    ///
    /// Callers must not change the member's owner through this reference.
    pub fn get_mut(&mut self, identity: Identity) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.identity() == identity)
    }

    /// The member at `index` in insertion order.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Members in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Members as a slice, in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// The first member satisfying `predicate`.
    pub fn find<F>(&self, mut predicate: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.items.iter().find(|item| predicate(*item))
    }

    /// Identities of every member satisfying `predicate`, in order.
    ///
    /// Ownership is untouched; the result is a plain list of references.
    pub fn all_with<F>(&self, mut predicate: F) -> Vec<Identity>
    where
        F: FnMut(&T) -> bool,
    {
        self.items
            .iter()
            .filter(|item| predicate(*item))
            .map(Entity::identity)
            .collect()
    }
}

impl<'a, T: Owned> IntoIterator for &'a OwnedCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
