//! Core identity, category and error types for Tessera.
//!
//! This crate provides:
//! - [`Identity`] - Stable, globally-unique entity identities
//! - [`Entity`] - The trait every model participant implements
//! - [`Category`] and [`KindHierarchy`] - Kind tags and their declared generalizations
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod category;
pub mod entity;
pub mod error;

pub use category::{Category, KindHierarchy};
pub use entity::{Entity, Identity};
pub use error::{Error, ErrorContext, ErrorKind, Result};
