//! Error types for the Tessera system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::category::Category;
use crate::entity::Identity;

/// Result type alias using Tessera's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Tessera operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an ownership conflict error.
    #[must_use]
    pub fn ownership_conflict(
        item: Identity,
        current_owner: Identity,
        requested_owner: Option<Identity>,
    ) -> Self {
        Self::new(ErrorKind::OwnershipConflict {
            item,
            current_owner,
            requested_owner,
        })
    }

    /// Creates an unregistered identity category error.
    #[must_use]
    pub fn unregistered_category(kind: Category) -> Self {
        Self::new(ErrorKind::UnregisteredIdentityCategory(kind))
    }

    /// Creates a not-found error for a mapping lookup.
    #[must_use]
    pub fn not_found(
        space: impl Into<String>,
        category: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::NotFound {
            space: space.into(),
            category: category.into(),
            key: key.into(),
        })
    }

    /// Creates a component construction error.
    #[must_use]
    pub fn component_construction(component: &'static str, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::ComponentConstructionError {
            component,
            reason: reason.into(),
        })
    }

    /// Creates a cyclic kind hierarchy error.
    #[must_use]
    pub fn cyclic_kind_hierarchy(child: Category, parent: Category) -> Self {
        Self::new(ErrorKind::CyclicKindHierarchy { child, parent })
    }

    /// Creates an invalid list definition error.
    #[must_use]
    pub fn invalid_list(definition: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidListDefinition {
            definition: definition.into(),
            reason: reason.into(),
        })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// An item would end up with two simultaneous owners.
    #[error(
        "ownership conflict: {item:?} is owned by {current_owner:?} and cannot join a collection owned by {requested_owner:?}"
    )]
    OwnershipConflict {
        /// The item being added.
        item: Identity,
        /// The owner the item already belongs to.
        current_owner: Identity,
        /// The owner of the collection the item was added to.
        requested_owner: Option<Identity>,
    },

    /// No registered numbering category exists for a kind or its ancestors.
    #[error("no identity category registered for kind {0} or any of its generalizations")]
    UnregisteredIdentityCategory(Category),

    /// A mapping lookup found no entry for the key.
    #[error("no {space} entry for {key} in category {category:?}")]
    NotFound {
        /// Name of the identifier space being searched.
        space: String,
        /// The mapping category searched.
        category: String,
        /// Debug rendering of the missing key.
        key: String,
    },

    /// A data component could not be constructed on demand.
    #[error("cannot construct component {component}: {reason}")]
    ComponentConstructionError {
        /// Type name of the component.
        component: &'static str,
        /// Why construction failed.
        reason: String,
    },

    /// Declaring a generalization would create a cycle.
    #[error("kind {child} cannot generalize to {parent}: cycle in kind hierarchy")]
    CyclicKindHierarchy {
        /// The kind being declared.
        child: Category,
        /// The requested parent.
        parent: Category,
    },

    /// A compressed identifier list could not be parsed.
    #[error("invalid list definition {definition:?}: {reason}")]
    InvalidListDefinition {
        /// The text that failed to parse.
        definition: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Entity or operation the error relates to.
    pub source: Option<String>,
    /// Enclosing operations, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
