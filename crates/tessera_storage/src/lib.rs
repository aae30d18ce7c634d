//! Attached data, owned collections and identifier mapping for Tessera.
//!
//! This crate provides:
//! - [`DataStore`] and [`DataOwner`] - Typed components attached to entities, retrievable by capability
//! - [`OwnedCollection`] - Single-owner membership with conflict detection
//! - [`BiMap`] - One-to-one association with O(1) lookup in both directions
//! - [`IdMappingTable`] - Category-partitioned mapping between two identifier spaces
//! - [`VertexCollection`] - Shape vertices and their derived geometric queries

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bimap;
pub mod data;
pub mod geometry;
pub mod mapping;
pub mod owned;

pub use bimap::{BiMap, Evicted};
pub use data::{Component, DataOwner, DataSlot, DataStore, Views};
pub use geometry::{BoundingBox, Plane, Vector, Vertex, VertexCollection};
pub use mapping::IdMappingTable;
pub use owned::{Owned, OwnedCollection};
