//! Entity identities.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::Category;

/// Stable, globally-unique identity carried by every model entity.
///
/// Identities are assigned once when an entity is created and never change,
/// so they are the key under which every external-identifier mapping is
/// indexed. They carry no numbering of their own.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Identity(Uuid);

impl Identity {
    /// Reserved identity of the global coordinate-system reference.
    pub const GLOBAL: Identity = Identity(Uuid::from_u128(1));

    /// Reserved identity of the local coordinate-system reference.
    pub const LOCAL: Identity = Identity(Uuid::from_u128(2));

    /// Draws a fresh random identity.
    ///
    /// Random (v4) values carry a version nibble, so this never returns
    /// [`Identity::GLOBAL`], [`Identity::LOCAL`] or [`Identity::nil`].
    #[must_use]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID, e.g. one read back from a saved model.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns a sentinel value representing "no entity".
    #[must_use]
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Returns true if this is the nil sentinel value.
    #[must_use]
    pub fn is_nil(self) -> bool {
        self.0.is_nil()
    }

    /// Returns true for the reserved coordinate-system reference identities.
    #[must_use]
    pub fn is_reserved(self) -> bool {
        self == Self::GLOBAL || self == Self::LOCAL
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    fn short(self) -> String {
        let simple = self.0.simple().to_string();
        simple[..8].to_string()
    }
}

impl From<Uuid> for Identity {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            write!(f, "Identity(nil)")
        } else if *self == Self::GLOBAL {
            write!(f, "Identity(global)")
        } else if *self == Self::LOCAL {
            write!(f, "Identity(local)")
        } else {
            write!(f, "Identity({})", self.short())
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A participant in the model graph.
///
/// The kind is a statically declared category tag; numbering buckets are
/// resolved from it through a [`KindHierarchy`](crate::KindHierarchy).
pub trait Entity {
    /// The entity's stable identity.
    fn identity(&self) -> Identity;

    /// Human-readable name. May be empty.
    fn name(&self) -> &str {
        ""
    }

    /// The concrete kind of this entity.
    fn kind(&self) -> Category;
}
